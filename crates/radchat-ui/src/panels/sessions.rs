//! Session sidebar — list of chat sessions with create/switch/delete.

use crate::theme::*;
use egui::{self, Align, Layout, RichText, ScrollArea};
use radchat_types::session::SessionSummary;

/// Action requested from the session sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    New,
    Switch(String),
    Delete(String),
}

pub fn session_sidebar(
    ui: &mut egui::Ui,
    sessions: &[SessionSummary],
    current_id: Option<&str>,
) -> Option<SessionAction> {
    let mut action = None;

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Sessions").color(TEXT_PRIMARY).strong());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui
                .button(RichText::new("+ New").color(ACCENT))
                .on_hover_text("Start a new chat session")
                .clicked()
            {
                action = Some(SessionAction::New);
            }
        });
    });
    ui.separator();

    ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        if sessions.is_empty() {
            ui.label(RichText::new("No sessions yet").color(TEXT_SECONDARY).small());
        }

        for summary in sessions {
            let selected = current_id == Some(summary.id.as_str());
            let fill = if selected { BG_SURFACE } else { BG_SECONDARY };

            egui::Frame::default()
                .fill(fill)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(6.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let title_color = if selected { ACCENT } else { TEXT_PRIMARY };
                        let title = ui.add(
                            egui::Label::new(
                                RichText::new(&summary.title).color(title_color),
                            )
                            .truncate()
                            .sense(egui::Sense::click()),
                        );
                        if title.clicked() && !selected {
                            action = Some(SessionAction::Switch(summary.id.clone()));
                        }
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui
                                .small_button(RichText::new("✕").color(ERROR))
                                .on_hover_text("Delete session")
                                .clicked()
                            {
                                action = Some(SessionAction::Delete(summary.id.clone()));
                            }
                        });
                    });
                    ui.label(
                        RichText::new(format!(
                            "{} messages · {}",
                            summary.message_count,
                            summary.updated_at.format("%b %d, %H:%M")
                        ))
                        .color(TEXT_SECONDARY)
                        .small(),
                    );
                });
            ui.add_space(2.0);
        }
    });

    action
}
