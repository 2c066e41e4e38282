#[cfg(test)]
mod tests {
    use crate::state::*;
    use radchat_types::case::{CaseStatus, RadiologyCase, RadiologyModality};
    use radchat_types::event::ChatEvent;
    use radchat_types::message::{ImageAttachment, Message, Role};

    fn sample_case() -> RadiologyCase {
        let mut case = RadiologyCase::from_draft(Default::default());
        case.title = "CT Chest".to_string();
        case.patient_id = Some("PT-001".to_string());
        case.description = "Follow-up".to_string();
        case.findings = "Nodule".to_string();
        case.impression = "Stable".to_string();
        case.modality = RadiologyModality::Ct;
        case.status = CaseStatus::InProgress;
        case
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert!(state.transcript.is_empty());
        assert!(!state.transcript_stale);
        assert!(!state.sending);
        assert!(state.error_banner.is_none());
        assert_eq!(state.status_text, "Ready");
        assert!(state.input_text.is_empty());
        assert!(state.pending_images.is_empty());
        assert_eq!(state.active_view, ActiveView::Chat);
        assert!(!state.show_prompts);
        assert!(!state.show_case_form);
        assert!(state.export_preview.is_none());
        assert!(!state.is_busy());
    }

    #[test]
    fn test_ui_state_push_user_message() {
        let mut state = UiState::new();
        state.push_user_message("describe this scan", 2);
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].role, Role::User);
        assert_eq!(state.transcript[0].content, "describe this scan");
        assert_eq!(state.transcript[0].image_count, 2);
        assert!(state.transcript[0].confidence.is_none());
    }

    #[test]
    fn test_ui_state_process_send_start() {
        let mut state = UiState::new();
        state.error_banner = Some("old error".to_string());

        state.process_events(vec![ChatEvent::SendStart {
            session_id: "session-1".to_string(),
        }]);

        assert!(state.sending);
        assert!(state.is_busy());
        assert!(state.error_banner.is_none());
        assert_eq!(state.status_text, "Consulting assistant...");
    }

    #[test]
    fn test_ui_state_process_assistant_reply() {
        let mut state = UiState::new();
        state.sending = true;

        state.process_events(vec![ChatEvent::AssistantReply {
            text: "Findings are unremarkable.".to_string(),
            confidence: Some(0.85),
        }]);

        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].role, Role::Assistant);
        assert_eq!(state.transcript[0].content, "Findings are unremarkable.");
        assert_eq!(state.transcript[0].confidence, Some(0.85));
        assert!(!state.sending);
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_process_error() {
        let mut state = UiState::new();
        state.sending = true;

        state.process_events(vec![ChatEvent::Error {
            message: "Network error: timeout".to_string(),
        }]);

        assert!(!state.sending);
        assert_eq!(state.status_text, "Error");
        assert_eq!(state.error_banner.as_deref(), Some("Network error: timeout"));
    }

    #[test]
    fn test_ui_state_session_events_mark_transcript_stale() {
        let mut state = UiState::new();
        state.error_banner = Some("stale error".to_string());

        state.process_events(vec![ChatEvent::SessionSwitched {
            session_id: "session-2".to_string(),
        }]);
        assert!(state.transcript_stale);
        assert!(state.error_banner.is_none());
        assert_eq!(state.status_text, "Ready");

        state.transcript_stale = false;
        state.process_events(vec![ChatEvent::SessionDeleted {
            session_id: "session-2".to_string(),
        }]);
        assert!(state.transcript_stale);

        state.transcript_stale = false;
        state.process_events(vec![ChatEvent::SessionCreated {
            session_id: "session-3".to_string(),
        }]);
        assert!(state.transcript_stale);
    }

    #[test]
    fn test_ui_state_prompt_updated_sets_status() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::PromptUpdated {
            session_id: "session-1".to_string(),
        }]);
        assert_eq!(state.status_text, "System prompt updated");
    }

    #[test]
    fn test_ui_state_case_events_do_not_touch_transcript() {
        let mut state = UiState::new();
        state.process_events(vec![
            ChatEvent::CaseCreated { case_id: "case-1".to_string() },
            ChatEvent::CaseUpdated { case_id: "case-1".to_string() },
            ChatEvent::CaseDeleted { case_id: "case-1".to_string() },
        ]);
        assert!(state.transcript.is_empty());
        assert!(!state.transcript_stale);
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_sync_transcript() {
        let mut state = UiState::new();
        state.transcript_stale = true;

        let mut with_image = Message::user("see attached");
        with_image.images.push(ImageAttachment {
            id: "img-1".to_string(),
            base64: "data:image/png;base64,AAAA".to_string(),
            preview: String::new(),
            mime_type: "image/png".to_string(),
        });
        let messages = vec![with_image, Message::assistant("Noted.")];

        state.sync_transcript(&messages);

        assert!(!state.transcript_stale);
        assert_eq!(state.transcript.len(), 2);
        assert_eq!(state.transcript[0].role, Role::User);
        assert_eq!(state.transcript[0].image_count, 1);
        assert_eq!(state.transcript[1].role, Role::Assistant);
        assert_eq!(state.transcript[1].image_count, 0);
    }

    #[test]
    fn test_ui_state_full_exchange() {
        let mut state = UiState::new();

        state.push_user_message("CT shows ground glass opacities", 0);
        state.process_events(vec![ChatEvent::SendStart {
            session_id: "session-1".to_string(),
        }]);
        assert!(state.is_busy());

        state.process_events(vec![ChatEvent::AssistantReply {
            text: "Ground glass opacities can represent...".to_string(),
            confidence: Some(0.9),
        }]);

        assert!(!state.is_busy());
        assert_eq!(state.status_text, "Ready");
        assert_eq!(state.transcript.len(), 2);
    }

    #[test]
    fn test_ui_state_default() {
        let state = UiState::default();
        assert!(state.transcript.is_empty());
        assert!(!state.is_busy());
    }

    // ─── CaseForm Tests ──────────────────────────────────────

    #[test]
    fn test_case_form_from_case() {
        let case = sample_case();
        let form = CaseForm::from_case(&case);

        assert_eq!(form.title, "CT Chest");
        assert_eq!(form.patient_id, "PT-001");
        assert_eq!(form.description, "Follow-up");
        assert_eq!(form.findings, "Nodule");
        assert_eq!(form.impression, "Stable");
        assert_eq!(form.modality, Some(RadiologyModality::Ct));
        assert_eq!(form.status, Some(CaseStatus::InProgress));
        assert_eq!(form.editing.as_deref(), Some(case.id.as_str()));
    }

    #[test]
    fn test_case_form_to_draft_skips_blank_fields() {
        let form = CaseForm {
            title: "  Trauma series  ".to_string(),
            patient_id: "   ".to_string(),
            description: String::new(),
            modality: Some(RadiologyModality::XRay),
            ..Default::default()
        };

        let draft = form.to_draft(Some("session-9"));
        assert_eq!(draft.title.as_deref(), Some("Trauma series"));
        assert!(draft.patient_id.is_none());
        assert!(draft.description.is_none());
        assert_eq!(draft.modality, Some(RadiologyModality::XRay));
        assert_eq!(draft.chat_session_id.as_deref(), Some("session-9"));
        assert!(draft.status.is_none());
    }

    #[test]
    fn test_case_form_to_draft_without_session() {
        let form = CaseForm::default();
        let draft = form.to_draft(None);
        assert!(draft.chat_session_id.is_none());
        assert!(draft.title.is_none());
    }

    #[test]
    fn test_case_form_to_patch_keeps_cleared_text_fields() {
        // Clearing findings in the form must clear them on the case,
        // so text fields patch with their literal (possibly empty) value.
        let form = CaseForm {
            title: "Updated title".to_string(),
            findings: String::new(),
            impression: "Resolved".to_string(),
            status: Some(CaseStatus::Completed),
            ..Default::default()
        };

        let patch = form.to_patch();
        assert_eq!(patch.title.as_deref(), Some("Updated title"));
        assert_eq!(patch.findings.as_deref(), Some(""));
        assert_eq!(patch.impression.as_deref(), Some("Resolved"));
        assert_eq!(patch.status, Some(CaseStatus::Completed));
        assert!(patch.chat_session_id.is_none());
    }

    #[test]
    fn test_case_form_clear() {
        let mut form = CaseForm::from_case(&sample_case());
        form.clear();
        assert!(form.title.is_empty());
        assert!(form.modality.is_none());
        assert!(form.editing.is_none());
    }
}
