use crate::api;
use crate::cases::{CaseStore, CASES_KEY};
use crate::chat::{ChatController, ChatState};
use crate::completion::*;
use crate::event_bus::EventBus;
use crate::export::*;
use crate::ports::*;
use crate::sessions::{SessionStore, SESSIONS_KEY};
use async_trait::async_trait;
use radchat_types::case::{CaseDraft, CasePatch, CaseStatus, RadiologyModality};
use radchat_types::event::ChatEvent;
use radchat_types::message::*;
use radchat_types::prompt::RadiologyCategory;
use radchat_types::{AppError, Result};
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;

// ─── Test doubles ────────────────────────────────────────────

struct MockCompletion {
    reply: String,
    confidence: Option<f64>,
    fail: bool,
    chat_requests: RefCell<Vec<Vec<OutboundMessage>>>,
    analysis_requests: RefCell<Vec<Vec<OutboundMessage>>>,
}

impl MockCompletion {
    fn replying(text: &str) -> Self {
        Self {
            reply: text.to_string(),
            confidence: Some(0.9),
            fail: false,
            chat_requests: RefCell::new(Vec::new()),
            analysis_requests: RefCell::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::replying("")
        }
    }
}

#[async_trait(?Send)]
impl CompletionPort for MockCompletion {
    async fn send_message(&self, messages: Vec<OutboundMessage>) -> Result<AiResponse> {
        if self.fail {
            return Err(AppError::RemoteService {
                status: 500,
                body: "upstream down".to_string(),
            });
        }
        self.chat_requests.borrow_mut().push(messages);
        Ok(AiResponse {
            message: self.reply.clone(),
            confidence: self.confidence,
        })
    }

    async fn analyze_image(&self, messages: Vec<OutboundMessage>) -> Result<AiResponse> {
        if self.fail {
            return Err(AppError::RemoteService {
                status: 500,
                body: "upstream down".to_string(),
            });
        }
        self.analysis_requests.borrow_mut().push(messages);
        Ok(AiResponse {
            message: self.reply.clone(),
            confidence: self.confidence,
        })
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

struct MockStorage {
    docs: RefCell<HashMap<String, String>>,
}

impl MockStorage {
    fn new() -> Self {
        Self {
            docs: RefCell::new(HashMap::new()),
        }
    }

    fn seeded(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.docs.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }
}

#[async_trait(?Send)]
impl StoragePort for MockStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.docs.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.docs.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.docs.borrow_mut().remove(key);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .docs
            .borrow()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

// Simple single-threaded executor; everything in these tests completes
// without real pending awaits.
fn block_on<F: std::future::Future<Output = T>, T>(f: F) -> T {
    use std::sync::Arc;
    use std::task::{Context, Poll, Wake, Waker};

    struct NoopWaker;
    impl Wake for NoopWaker {
        fn wake(self: Arc<Self>) {}
    }

    let waker = Waker::from(Arc::new(NoopWaker));
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(val) => return val,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

// ─── EventBus ────────────────────────────────────────────────

#[test]
fn event_bus_new_is_empty() {
    let bus = EventBus::new();
    assert!(!bus.has_pending());
    assert!(bus.drain().is_empty());
}

#[test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(ChatEvent::SendStart { session_id: "s1".to_string() });
    bus.emit(ChatEvent::AssistantReply { text: "hi".to_string(), confidence: None });

    assert!(bus.has_pending());
    let events = bus.drain();
    assert_eq!(events.len(), 2);
    assert!(!bus.has_pending());
}

#[test]
fn event_bus_clone_shares_state() {
    let bus1 = EventBus::new();
    let bus2 = bus1.clone();
    bus1.emit(ChatEvent::Error { message: "x".to_string() });
    assert!(bus2.has_pending());
    assert_eq!(bus2.drain().len(), 1);
    assert!(!bus1.has_pending());
}

// ─── Completion formatting ───────────────────────────────────

#[test]
fn outbound_starts_with_system_prompt() {
    let out = build_outbound("sys", &[Message::user("hi")], &[]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].role, Role::System);
    assert_eq!(out[0].content.as_text(), "sys");
    assert_eq!(out[1].role, Role::User);
}

#[test]
fn outbound_keeps_last_ten_entries() {
    let mut history = Vec::new();
    for i in 0..14 {
        history.push(Message::user(format!("m{}", i)));
    }
    let out = build_outbound("sys", &history, &[]);
    // system + 10
    assert_eq!(out.len(), 11);
    assert_eq!(out[1].content.as_text(), "m4");
    assert_eq!(out[10].content.as_text(), "m13");
}

#[test]
fn outbound_drops_system_history_entries() {
    let history = vec![
        Message {
            id: "m1".to_string(),
            role: Role::System,
            content: "stray".to_string(),
            timestamp: chrono::Utc::now(),
            images: Vec::new(),
        },
        Message::user("question"),
    ];
    let out = build_outbound("sys", &history, &[]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].content.as_text(), "question");
}

#[test]
fn outbound_converts_trailing_user_entry_to_multipart() {
    let img_a = ImageAttachment::new("data:image/png;base64,AAAA", "blob:a", "image/png");
    let img_b = ImageAttachment::new("data:image/png;base64,BBBB", "blob:b", "image/png");
    let history = vec![Message::user("look")];
    let out = build_outbound("sys", &history, &[img_a, img_b]);

    match &out[1].content {
        MessageContent::Parts(parts) => {
            assert_eq!(parts.len(), 3);
            assert!(matches!(&parts[0], ContentPart::Text { text } if text == "look"));
            assert!(matches!(&parts[1], ContentPart::ImageUrl { image_url }
                if image_url.url == "data:image/png;base64,AAAA"));
        }
        other => panic!("expected multipart content, got {:?}", other),
    }
}

#[test]
fn outbound_leaves_assistant_tail_as_text() {
    let img = ImageAttachment::new("data:x", "blob:x", "image/png");
    let history = vec![Message::user("a"), Message::assistant("b")];
    let out = build_outbound("sys", &history, &[img]);
    assert!(matches!(out[2].content, MessageContent::Text(_)));
}

#[test]
fn image_analysis_messages_shape() {
    let out = build_image_analysis("sys", "what is this", "data:image/png;base64,AAAA");
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].role, Role::System);
    match &out[1].content {
        MessageContent::Parts(parts) => assert_eq!(parts.len(), 2),
        other => panic!("expected multipart content, got {:?}", other),
    }
}

#[test]
fn confidence_floor_without_totals() {
    assert_eq!(confidence_from_usage(&TokenUsage::default()), 0.8);
}

#[test]
fn confidence_scales_with_completion_ratio() {
    let usage = TokenUsage {
        prompt_tokens: 80,
        completion_tokens: 20,
        total_tokens: 100,
    };
    let c = confidence_from_usage(&usage);
    assert!((c - 0.6).abs() < 1e-9);
}

#[test]
fn confidence_thirty_percent_ratio() {
    let usage = TokenUsage {
        prompt_tokens: 70,
        completion_tokens: 30,
        total_tokens: 100,
    };
    assert!((confidence_from_usage(&usage) - 0.65).abs() < 1e-9);
}

#[test]
fn confidence_caps_at_ninety_five() {
    let usage = TokenUsage {
        prompt_tokens: 0,
        completion_tokens: 100,
        total_tokens: 100,
    };
    assert_eq!(confidence_from_usage(&usage), 0.95);
}

// ─── SessionStore ────────────────────────────────────────────

#[test]
fn create_session_uses_catalog_default() {
    let mut store = SessionStore::new();
    let session = store.create(None, None);
    assert_eq!(session.category, RadiologyCategory::GeneralRadiology);
    assert!(!session.system_prompt.is_empty());
    let id = session.id.clone();
    assert_eq!(store.current().map(|s| s.id.clone()), Some(id));
}

#[test]
fn create_session_with_category_picks_catalog_prompt() {
    let mut store = SessionStore::new();
    let session = store.create(None, Some(RadiologyCategory::MriAnalysis));
    assert_eq!(session.category, RadiologyCategory::MriAnalysis);
    assert!(session.system_prompt.contains("MRI"));
}

#[test]
fn switch_unknown_session_is_ignored() {
    let mut store = SessionStore::new();
    let current = store.create(None, None).id.clone();
    assert!(!store.switch("session-missing"));
    assert_eq!(store.current().map(|s| s.id.clone()), Some(current));
}

#[test]
fn delete_current_falls_back_to_latest() {
    let mut store = SessionStore::new();
    let first = store.create(None, None).id.clone();
    let second = store.create(None, None).id.clone();
    assert!(store.switch(&second));

    store.delete(&second).unwrap();
    assert_eq!(store.current().map(|s| s.id.clone()), Some(first));

    let last = store.current().map(|s| s.id.clone()).unwrap();
    store.delete(&last).unwrap();
    assert!(store.current().is_none());
}

#[test]
fn first_user_message_titles_session() {
    let mut store = SessionStore::new();
    store.create(None, None);
    let long = "Please review this chest CT for pulmonary embolism and report findings";
    store.push_user(long, Vec::new()).unwrap();
    let title = store.current().unwrap().title.clone();
    assert!(title.ends_with("..."));
    assert_eq!(title.chars().count(), 53);

    // second message leaves the title alone
    store.push_user("follow-up", Vec::new()).unwrap();
    assert_eq!(store.current().unwrap().title, title);
}

#[test]
fn load_missing_document_starts_empty() {
    let storage = MockStorage::new();
    let mut store = SessionStore::new();
    block_on(store.load(&storage)).unwrap();
    assert!(store.is_empty());
    assert!(store.current().is_none());
}

#[test]
fn load_corrupt_document_degrades_to_empty() {
    let storage = MockStorage::seeded(SESSIONS_KEY, "not json at all");
    let mut store = SessionStore::new();
    block_on(store.load(&storage)).unwrap();
    assert!(store.is_empty());
}

#[test]
fn load_restores_latest_session_as_current() {
    let mut store = SessionStore::new();
    store.create(None, None);
    let latest = store.create(None, Some(RadiologyCategory::CtInterpretation)).id.clone();
    let storage = MockStorage::new();
    block_on(store.persist(&storage)).unwrap();

    let mut restored = SessionStore::new();
    block_on(restored.load(&storage)).unwrap();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.current().map(|s| s.id.clone()), Some(latest));
}

#[test]
fn persist_skips_empty_collection() {
    let storage = MockStorage::new();
    let store = SessionStore::new();
    block_on(store.persist(&storage)).unwrap();
    assert!(block_on(storage.get(SESSIONS_KEY)).unwrap().is_none());
}

// ─── ChatController ──────────────────────────────────────────

#[test]
fn send_creates_session_when_none_exists() {
    let bus = EventBus::new();
    let mut controller = ChatController::new(bus.clone());
    let llm = MockCompletion::replying("Ground-glass opacity suggests...");

    block_on(controller.send_message("What is GGO?", Vec::new(), &llm)).unwrap();

    let session = controller.sessions.current().unwrap();
    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[0].role, Role::User);
    assert_eq!(session.messages[1].role, Role::Assistant);
    assert_eq!(session.title, "What is GGO?");
    assert_eq!(controller.state, ChatState::Idle);

    let events = bus.drain();
    assert!(matches!(events[0], ChatEvent::SessionCreated { .. }));
    assert!(matches!(events[1], ChatEvent::SendStart { .. }));
    assert!(matches!(
        events[2],
        ChatEvent::AssistantReply { confidence: Some(_), .. }
    ));
}

#[test]
fn send_includes_new_user_message_in_outbound() {
    let mut controller = ChatController::new(EventBus::new());
    let llm = MockCompletion::replying("reply");
    block_on(controller.send_message("first question", Vec::new(), &llm)).unwrap();

    let requests = llm.chat_requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0][0].role, Role::System);
    assert_eq!(requests[0][1].content.as_text(), "first question");
}

#[test]
fn send_with_images_goes_through_chat_parameters() {
    let mut controller = ChatController::new(EventBus::new());
    let llm = MockCompletion::replying("analysis");
    let img = ImageAttachment::new("data:image/png;base64,AAAA", "blob:x", "image/png");

    block_on(controller.send_message("review this scan", vec![img], &llm)).unwrap();

    // images ride along in the regular chat call, not the analysis variant
    assert_eq!(llm.chat_requests.borrow().len(), 1);
    assert!(llm.analysis_requests.borrow().is_empty());
    let requests = llm.chat_requests.borrow();
    let last = requests[0].last().unwrap();
    assert!(matches!(last.content, MessageContent::Parts(_)));

    // the stored session message stays plain text with attachments
    let session = controller.sessions.current().unwrap();
    assert_eq!(session.messages[0].content, "review this scan");
    assert_eq!(session.messages[0].images.len(), 1);
}

#[test]
fn send_is_single_flight() {
    let mut controller = ChatController::new(EventBus::new());
    controller.state = ChatState::Sending;
    let llm = MockCompletion::replying("x");
    let result = block_on(controller.send_message("hello", Vec::new(), &llm));
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn send_rejects_empty_input() {
    let mut controller = ChatController::new(EventBus::new());
    let llm = MockCompletion::replying("x");
    let result = block_on(controller.send_message("   ", Vec::new(), &llm));
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn send_failure_sets_error_state_and_emits() {
    let bus = EventBus::new();
    let mut controller = ChatController::new(bus.clone());
    let llm = MockCompletion::failing();

    let result = block_on(controller.send_message("hello", Vec::new(), &llm));
    assert!(matches!(result, Err(AppError::RemoteService { .. })));
    assert!(matches!(controller.state, ChatState::Error(_)));

    let events = bus.drain();
    assert!(events.iter().any(|e| matches!(e, ChatEvent::Error { .. })));

    // user message is kept; no assistant reply was appended
    assert_eq!(controller.sessions.current().unwrap().messages.len(), 1);

    controller.clear_error();
    assert_eq!(controller.state, ChatState::Idle);
}

#[test]
fn prompt_update_touches_current_session() {
    let bus = EventBus::new();
    let mut controller = ChatController::new(bus.clone());
    controller.new_session(None, None);
    bus.drain();

    controller.set_system_prompt("You are a neuroradiology assistant.").unwrap();
    assert_eq!(
        controller.sessions.current().unwrap().system_prompt,
        "You are a neuroradiology assistant."
    );
    assert!(matches!(bus.drain()[0], ChatEvent::PromptUpdated { .. }));
}

#[test]
fn prompt_update_without_session_fails() {
    let mut controller = ChatController::new(EventBus::new());
    assert!(controller.set_system_prompt("x").is_err());
}

// ─── CaseStore ───────────────────────────────────────────────

#[test]
fn case_store_crud_round_trip() {
    let bus = EventBus::new();
    let mut store = CaseStore::new(bus.clone());

    let id = store
        .create(CaseDraft {
            title: Some("CT chest".to_string()),
            modality: Some(RadiologyModality::Ct),
            ..Default::default()
        })
        .id
        .clone();
    assert_eq!(store.len(), 1);

    store
        .update(&id, CasePatch {
            status: Some(CaseStatus::Completed),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(store.get(&id).unwrap().status, CaseStatus::Completed);

    let removed = store.remove(&id).unwrap();
    assert_eq!(removed.id, id);
    assert!(store.is_empty());

    let events = bus.drain();
    assert!(matches!(events[0], ChatEvent::CaseCreated { .. }));
    assert!(matches!(events[1], ChatEvent::CaseUpdated { .. }));
    assert!(matches!(events[2], ChatEvent::CaseDeleted { .. }));
}

#[test]
fn case_store_unknown_ids_fail() {
    let mut store = CaseStore::new(EventBus::new());
    assert!(store.update("case-x", CasePatch::default()).is_err());
    assert!(store.remove("case-x").is_err());
    assert!(store.load_case("case-x").is_err());
}

#[test]
fn case_store_tracks_current_case() {
    let mut store = CaseStore::new(EventBus::new());
    let first = store.create(CaseDraft::default()).id.clone();
    let second = store.create(CaseDraft::default()).id.clone();
    assert_eq!(store.current().map(|c| c.id.clone()), Some(second.clone()));

    store.load_case(&first).unwrap();
    assert_eq!(store.current().map(|c| c.id.clone()), Some(first.clone()));

    // removing another record leaves the pointer alone
    store.remove(&second).unwrap();
    assert_eq!(store.current().map(|c| c.id.clone()), Some(first.clone()));

    // removing the current record clears it
    store.remove(&first).unwrap();
    assert!(store.current().is_none());
}

#[test]
fn case_store_persistence_round_trip() {
    let storage = MockStorage::new();
    let mut store = CaseStore::new(EventBus::new());
    store.create(CaseDraft::default());
    block_on(store.persist(&storage)).unwrap();

    let mut restored = CaseStore::new(EventBus::new());
    block_on(restored.load(&storage)).unwrap();
    assert_eq!(restored.len(), 1);
}

#[test]
fn case_store_corrupt_load_degrades() {
    let storage = MockStorage::seeded(CASES_KEY, "[{broken");
    let mut store = CaseStore::new(EventBus::new());
    block_on(store.load(&storage)).unwrap();
    assert!(store.is_empty());
}

// ─── Export ──────────────────────────────────────────────────

fn sample_case() -> radchat_types::case::RadiologyCase {
    radchat_types::case::RadiologyCase::from_draft(CaseDraft {
        title: Some("CT Chest - PE Study".to_string()),
        description: Some("Suspected pulmonary embolism".to_string()),
        modality: Some(RadiologyModality::Ct),
        ..Default::default()
    })
}

#[test]
fn report_contains_fixed_sections() {
    let report = generate_case_report(&sample_case());
    assert!(report.starts_with("\nRADIOLOGY CASE REPORT"));
    assert!(report.contains("CASE DETAILS"));
    assert!(report.contains("Modality: CT"));
    assert!(report.contains("FINDINGS\n--------\nNo findings recorded"));
    assert!(report.contains("IMPRESSION\n----------\nNo impression recorded"));
    assert!(report.contains("Patient ID: Not specified"));
    assert!(report.contains("DISCLAIMER:"));
}

#[test]
fn store_export_unknown_id_is_not_found() {
    let store = CaseStore::new(EventBus::new());
    assert!(matches!(
        store.export("case-x", ExportFormat::Json),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn store_export_known_id_round_trips() {
    let mut store = CaseStore::new(EventBus::new());
    let id = store.create(CaseDraft::default()).id.clone();
    let json = store.export(&id, ExportFormat::Json).unwrap();
    let back: radchat_types::case::RadiologyCase = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, id);
}

#[test]
fn json_export_round_trips() {
    let case = sample_case();
    let json = export_case(&case, ExportFormat::Json).unwrap();
    let back: radchat_types::case::RadiologyCase = serde_json::from_str(&json).unwrap();
    assert_eq!(back, case);
}

#[test]
fn export_file_names() {
    let case = sample_case();
    assert_eq!(export_file_name(&case, ExportFormat::Json), "ct_chest___pe_study.json");
    assert_eq!(
        export_file_name(&case, ExportFormat::Report),
        "ct_chest___pe_study_report.txt"
    );
}

#[test]
fn case_title_suggestion_truncates() {
    let short = generate_case_title(RadiologyModality::Mri, "brain without contrast");
    assert_eq!(short, "MRI - brain without contrast");

    let long = generate_case_title(RadiologyModality::Ct, &"d".repeat(60));
    assert!(long.starts_with("CT - "));
    assert!(long.ends_with("..."));
}

#[test]
fn transcript_line_labels_speakers() {
    let user_line = format_message_for_display(&Message::user("hello"));
    assert!(user_line.contains("You: hello"));
    let ai_line = format_message_for_display(&Message::assistant("hi"));
    assert!(ai_line.contains("AI Assistant: hi"));
}

#[test]
fn sanitize_redacts_ssn_and_long_ids() {
    let text = "Patient 123-45-6789, MRN 12345678901, age 54";
    let clean = sanitize_patient_data(text);
    assert_eq!(clean, "Patient [SSN-REDACTED], MRN [ID-REDACTED], age 54");
}

#[test]
fn sanitize_leaves_short_numbers_alone() {
    let text = "Series 3, 120 kV, slice 2.5mm";
    assert_eq!(sanitize_patient_data(text), text);
}

// ─── REST handlers ───────────────────────────────────────────

#[test]
fn api_get_cases_envelope() {
    let mut store = CaseStore::new(EventBus::new());
    store.create(CaseDraft::default());
    let reply = api::get_cases(&store);
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["success"], true);
    assert_eq!(reply.body["count"], 1);
    assert!(reply.body["cases"].is_array());
}

#[test]
fn api_post_case_creates_record() {
    let mut store = CaseStore::new(EventBus::new());
    let reply = api::post_case(&mut store, &json!({ "title": "X-Ray wrist" }));
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["success"], true);
    assert_eq!(reply.body["case"]["title"], "X-Ray wrist");
    assert_eq!(reply.body["message"], "Case created successfully");
    assert_eq!(store.len(), 1);
}

#[test]
fn api_post_case_rejects_unknown_fields() {
    let mut store = CaseStore::new(EventBus::new());
    let reply = api::post_case(&mut store, &json!({ "title": "x", "bogus": 1 }));
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body["success"], false);
    assert!(store.is_empty());
}

#[test]
fn api_put_case_requires_id() {
    let mut store = CaseStore::new(EventBus::new());
    let reply = api::put_case(&mut store, &json!({ "title": "renamed" }));
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body["error"], "Validation error: Case ID is required");
}

#[test]
fn api_put_case_unknown_id_is_404() {
    let mut store = CaseStore::new(EventBus::new());
    let reply = api::put_case(&mut store, &json!({ "id": "case-x", "title": "renamed" }));
    assert_eq!(reply.status, 404);
    assert_eq!(reply.body["success"], false);
}

#[test]
fn api_put_case_applies_patch() {
    let mut store = CaseStore::new(EventBus::new());
    let id = store.create(CaseDraft::default()).id.clone();
    let reply = api::put_case(&mut store, &json!({ "id": id, "findings": "normal study" }));
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["case"]["findings"], "normal study");
    assert_eq!(store.get(&id).unwrap().findings, "normal study");
}

#[test]
fn api_delete_case_paths() {
    let mut store = CaseStore::new(EventBus::new());
    let id = store.create(CaseDraft::default()).id.clone();

    assert_eq!(api::delete_case(&mut store, None).status, 400);
    assert_eq!(api::delete_case(&mut store, Some("case-x")).status, 404);

    let reply = api::delete_case(&mut store, Some(&id));
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["deletedCase"]["id"], id.as_str());
    assert!(store.is_empty());
}

#[test]
fn api_post_chat_requires_messages_and_prompt() {
    let llm = MockCompletion::replying("x");
    let reply = block_on(api::post_chat(&llm, &json!({ "messages": [] })));
    assert_eq!(reply.status, 400);
    assert_eq!(
        reply.body["error"],
        "Validation error: Messages and system prompt are required"
    );
}

#[test]
fn api_post_chat_text_path() {
    let llm = MockCompletion::replying("assistant text");
    let body = json!({
        "systemPrompt": "sys",
        "messages": [serde_json::to_value(Message::user("hi")).unwrap()],
    });
    let reply = block_on(api::post_chat(&llm, &body));
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["message"], "assistant text");
    assert_eq!(reply.body["confidence"], 0.9);
    assert_eq!(llm.chat_requests.borrow().len(), 1);
}

#[test]
fn api_post_chat_image_path_uses_analysis() {
    let llm = MockCompletion::replying("analysis text");
    let body = json!({
        "systemPrompt": "sys",
        "messages": [serde_json::to_value(Message::user("what is this")).unwrap()],
        "images": [{ "base64": "data:image/png;base64,AAAA" }],
    });
    let reply = block_on(api::post_chat(&llm, &body));
    assert_eq!(reply.status, 200);
    assert_eq!(llm.analysis_requests.borrow().len(), 1);
    assert!(llm.chat_requests.borrow().is_empty());
}

#[test]
fn api_post_chat_upstream_failure_is_502() {
    let llm = MockCompletion::failing();
    let body = json!({
        "systemPrompt": "sys",
        "messages": [serde_json::to_value(Message::user("hi")).unwrap()],
    });
    let reply = block_on(api::post_chat(&llm, &body));
    assert_eq!(reply.status, 502);
    assert_eq!(reply.body["success"], false);
}

#[test]
fn api_image_analysis_requires_inputs() {
    let llm = MockCompletion::replying("x");
    let reply = block_on(api::post_image_analysis(&llm, &json!({ "prompt": "p" })));
    assert_eq!(reply.status, 400);
}

#[test]
fn api_image_analysis_reports_model() {
    let llm = MockCompletion::replying("left lower lobe consolidation");
    let body = json!({
        "imageBase64": "data:image/png;base64,AAAA",
        "prompt": "describe this film",
    });
    let reply = block_on(api::post_image_analysis(&llm, &body));
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["analysis"], "left lower lobe consolidation");
    assert_eq!(reply.body["model"], "mock-model");
}

#[test]
fn api_info_endpoints() {
    assert_eq!(api::get_chat_info().status, 200);
    assert_eq!(api::get_image_analysis_info().status, 200);
}
