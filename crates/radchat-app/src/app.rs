//! Main egui application — composes all panels and manages the chat
//! controller and case store.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, ScrollArea, SidePanel, TopBottomPanel};

use radchat_core::cases::{CaseStore, CASES_KEY};
use radchat_core::chat::ChatController;
use radchat_core::event_bus::EventBus;
use radchat_core::export::{export_case, export_file_name};
use radchat_core::ports::{CompletionPort, StoragePort};
use radchat_core::sessions::SESSIONS_KEY;
use radchat_platform::llm::RemoteCompletionProvider;
use radchat_platform::storage::auto_detect_storage;
use radchat_types::config::AppConfig;
use radchat_types::event::ChatEvent;
use radchat_types::message::ImageAttachment;
use radchat_types::prompt::default_prompt;
use radchat_ui::panels::{cases, chat, prompts, sessions};
use radchat_ui::panels::cases::CaseAction;
use radchat_ui::panels::sessions::SessionAction;
use radchat_ui::state::{ActiveView, UiState};
use radchat_ui::theme;

/// The main application state
pub struct RadChatApp {
    ui_state: UiState,
    config: AppConfig,
    event_bus: EventBus,
    controller: Rc<RefCell<ChatController>>,
    cases: Rc<RefCell<CaseStore>>,
    llm: Rc<dyn CompletionPort>,
    storage: Rc<dyn StoragePort>,
    first_frame: bool,
}

impl RadChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::default();
        let event_bus = EventBus::new();
        let controller = Rc::new(RefCell::new(ChatController::new(event_bus.clone())));
        let cases = Rc::new(RefCell::new(CaseStore::new(event_bus.clone())));

        let llm: Rc<dyn CompletionPort> =
            Rc::new(RemoteCompletionProvider::new(config.llm.clone()));
        let storage = auto_detect_storage(config.storage.backend);

        let app = Self {
            ui_state: UiState::new(),
            config,
            event_bus,
            controller,
            cases,
            llm,
            storage,
            first_frame: true,
        };

        app.restore_collections();
        app
    }

    /// Load persisted sessions and cases from storage (async)
    fn restore_collections(&self) {
        let controller = self.controller.clone();
        let cases = self.cases.clone();
        let storage = self.storage.clone();
        let event_bus = self.event_bus.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let loaded = {
                let mut c = controller.borrow_mut();
                c.sessions.load(storage.as_ref()).await
            };
            if let Err(e) = loaded {
                log::warn!("Failed to load sessions: {}", e);
            }

            let loaded = {
                let mut store = cases.borrow_mut();
                store.load(storage.as_ref()).await
            };
            if let Err(e) = loaded {
                log::warn!("Failed to load cases: {}", e);
            }

            // Nudge the UI to rebuild its transcript projection
            let restored = controller.borrow().sessions.current().map(|s| s.id.clone());
            if let Some(session_id) = restored {
                event_bus.emit(ChatEvent::SessionSwitched { session_id });
            }
        });
    }

    /// Write the session collection back to storage (async, fire-and-forget)
    fn persist_sessions(&self) {
        let doc = match self.controller.borrow().sessions.to_document() {
            Ok(Some(doc)) => doc,
            Ok(None) => return,
            Err(e) => {
                log::error!("Failed to serialize sessions: {}", e);
                return;
            }
        };
        let storage = self.storage.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = storage.set(SESSIONS_KEY, &doc).await {
                log::error!("Failed to persist sessions: {}", e);
            }
        });
    }

    /// Write the case collection back to storage (async, fire-and-forget)
    fn persist_cases(&self) {
        let doc = match self.cases.borrow().to_document() {
            Ok(Some(doc)) => doc,
            Ok(None) => return,
            Err(e) => {
                log::error!("Failed to serialize cases: {}", e);
                return;
            }
        };
        let storage = self.storage.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = storage.set(CASES_KEY, &doc).await {
                log::error!("Failed to persist cases: {}", e);
            }
        });
    }
}

impl eframe::App for RadChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain controller and store events
        let events = self.event_bus.drain();
        if !events.is_empty() {
            let mut sessions_dirty = false;
            let mut cases_dirty = false;
            for event in &events {
                match event {
                    ChatEvent::SessionCreated { .. }
                    | ChatEvent::SessionDeleted { .. }
                    | ChatEvent::SendStart { .. }
                    | ChatEvent::AssistantReply { .. }
                    | ChatEvent::PromptUpdated { .. } => sessions_dirty = true,
                    ChatEvent::CaseCreated { .. }
                    | ChatEvent::CaseUpdated { .. }
                    | ChatEvent::CaseDeleted { .. } => cases_dirty = true,
                    ChatEvent::SessionSwitched { .. } | ChatEvent::Error { .. } => {}
                }
            }
            self.ui_state.process_events(events);
            if sessions_dirty {
                self.persist_sessions();
            }
            if cases_dirty {
                self.persist_cases();
            }
            ctx.request_repaint();
        }

        if self.ui_state.transcript_stale {
            let messages = self
                .controller
                .borrow()
                .sessions
                .current()
                .map(|s| s.messages.clone())
                .unwrap_or_default();
            self.ui_state.sync_transcript(&messages);
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        // Snapshot the session collection for this frame's panels
        let (summaries, current_id, current_title, current_category) = {
            let c = self.controller.borrow();
            let current = c.sessions.current();
            (
                c.sessions.summaries(),
                current.map(|s| s.id.clone()),
                current
                    .map(|s| s.title.clone())
                    .unwrap_or_else(|| "Radiology Chat".to_string()),
                current.map(|s| s.category).unwrap_or(default_prompt().category),
            )
        };

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("AI Radiology Chat")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!("Model: {}", self.config.llm.model))
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_prompts, "Prompts")
                        .clicked()
                    {
                        self.ui_state.show_prompts = !self.ui_state.show_prompts;
                    }
                    if ui
                        .selectable_label(self.ui_state.active_view == ActiveView::Cases, "Cases")
                        .clicked()
                    {
                        self.ui_state.active_view = ActiveView::Cases;
                    }
                    if ui
                        .selectable_label(self.ui_state.active_view == ActiveView::Chat, "Chat")
                        .clicked()
                    {
                        self.ui_state.active_view = ActiveView::Chat;
                    }
                });
            });
        });

        if self.ui_state.active_view == ActiveView::Chat {
            // ── Session sidebar ──────────────────────────────
            SidePanel::left("session_sidebar")
                .min_width(200.0)
                .max_width(280.0)
                .show(ctx, |ui| {
                    if let Some(action) =
                        sessions::session_sidebar(ui, &summaries, current_id.as_deref())
                    {
                        self.handle_session_action(action);
                    }
                });

            // ── Prompt catalog panel ─────────────────────────
            if self.ui_state.show_prompts {
                SidePanel::right("prompt_panel")
                    .min_width(260.0)
                    .max_width(340.0)
                    .show(ctx, |ui| {
                        if let Some(selected) = prompts::prompt_panel(ui, current_category) {
                            let mut c = self.controller.borrow_mut();
                            if c.sessions.current().is_none() {
                                c.new_session(
                                    Some(selected.prompt.to_string()),
                                    Some(selected.category),
                                );
                            } else if let Err(e) = c.set_system_prompt(selected.prompt) {
                                log::error!("Prompt update failed: {}", e);
                            } else if let Some(session) = c.sessions.current_mut() {
                                session.category = selected.category;
                            }
                        }
                    });
            }
        }

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| match self.ui_state.active_view {
            ActiveView::Chat => {
                if let Some(text) = chat::chat_panel(ui, &mut self.ui_state, &current_title) {
                    let images = std::mem::take(&mut self.ui_state.pending_images);
                    self.dispatch_message(text, images, ctx);
                }
            }
            ActiveView::Cases => {
                let action = {
                    let store = self.cases.borrow();
                    cases::cases_panel(ui, store.list(), &mut self.ui_state, current_id.as_deref())
                };
                if let Some(action) = action {
                    self.handle_case_action(action);
                }
            }
        });

        // ── Export preview ───────────────────────────────────
        if let Some((name, content)) = self.ui_state.export_preview.clone() {
            let mut open = true;
            egui::Window::new(&name)
                .open(&mut open)
                .default_width(480.0)
                .show(ctx, |ui| {
                    ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
                        ui.label(RichText::new(&content).monospace().color(theme::TEXT_PRIMARY));
                    });
                });
            if !open {
                self.ui_state.export_preview = None;
            }
        }
    }
}

impl RadChatApp {
    /// Stage the user turn synchronously, then run the completion call
    /// without holding the controller borrow across the await.
    fn dispatch_message(
        &mut self,
        text: String,
        images: Vec<ImageAttachment>,
        ctx: &egui::Context,
    ) {
        let outbound = {
            let mut c = self.controller.borrow_mut();
            c.clear_error();
            match c.begin_send(&text, images) {
                Ok(outbound) => outbound,
                Err(e) => {
                    log::warn!("Send rejected: {}", e);
                    self.ui_state.error_banner = Some(e.to_string());
                    return;
                }
            }
        };

        let controller = self.controller.clone();
        let llm = self.llm.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let result = llm.send_message(outbound).await;
            if let Err(e) = controller.borrow_mut().complete_send(result) {
                log::error!("Chat turn failed: {}", e);
            }
            ctx.request_repaint();
        });
    }

    fn handle_session_action(&mut self, action: SessionAction) {
        match action {
            SessionAction::New => {
                self.controller.borrow_mut().new_session(None, None);
            }
            SessionAction::Switch(id) => {
                self.controller.borrow_mut().switch_session(&id);
            }
            SessionAction::Delete(id) => {
                if let Err(e) = self.controller.borrow_mut().delete_session(&id) {
                    log::error!("Session delete failed: {}", e);
                }
            }
        }
    }

    fn handle_case_action(&mut self, action: CaseAction) {
        match action {
            CaseAction::Create(draft) => {
                self.cases.borrow_mut().create(draft);
            }
            CaseAction::Update(id, patch) => {
                if let Err(e) = self.cases.borrow_mut().update(&id, patch) {
                    log::error!("Case update failed: {}", e);
                }
            }
            CaseAction::Delete(id) => {
                if let Err(e) = self.cases.borrow_mut().remove(&id) {
                    log::error!("Case delete failed: {}", e);
                }
            }
            CaseAction::Export(id, format) => {
                let store = self.cases.borrow();
                match store.get(&id) {
                    Some(case) => match export_case(case, format) {
                        Ok(content) => {
                            self.ui_state.export_preview =
                                Some((export_file_name(case, format), content));
                        }
                        Err(e) => log::error!("Export failed: {}", e),
                    },
                    None => log::warn!("Export requested for unknown case {}", id),
                }
            }
        }
    }
}
