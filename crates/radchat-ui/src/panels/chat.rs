//! Chat panel — conversation transcript, error banner, and input field.

use crate::state::{ChatEntry, UiState};
use crate::theme::*;
use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use radchat_types::message::Role;

/// Render the chat panel. Returns Some(message) when the user submits input.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState, session_title: &str) -> Option<String> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new(session_title).color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                    });
                });

                ui.separator();

                // Error banner with dismiss
                let mut dismiss = false;
                if let Some(ref message) = state.error_banner {
                    egui::Frame::default()
                        .fill(BG_SURFACE)
                        .corner_radius(PANEL_ROUNDING)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(message).color(ERROR));
                                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                    if ui.small_button("Dismiss").clicked() {
                                        dismiss = true;
                                    }
                                });
                            });
                        });
                }
                if dismiss {
                    state.error_banner = None;
                }

                // Messages area
                let available_height = ui.available_height() - 90.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in &state.transcript {
                            render_message(ui, entry);
                            ui.add_space(4.0);
                        }

                        if state.is_busy() {
                            ui.label(
                                RichText::new("Assistant is thinking...")
                                    .color(TEXT_SECONDARY)
                                    .italics(),
                            );
                        }
                    });

                ui.add_space(4.0);

                // Staged image attachments
                if !state.pending_images.is_empty() {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!(
                                "{} image(s) attached",
                                state.pending_images.len()
                            ))
                            .color(ACCENT)
                            .small(),
                        );
                        if ui.small_button("Clear").clicked() {
                            state.pending_images.clear();
                        }
                    });
                }

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Ask a radiology question...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add(input);

                    let send_enabled = !state.input_text.trim().is_empty() && !state.is_busy();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    if (response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter))
                        && send_enabled)
                        || send_btn.clicked()
                    {
                        let text = state.input_text.trim().to_string();
                        state.push_user_message(&text, state.pending_images.len());
                        submitted = Some(text);
                        state.input_text.clear();
                        response.request_focus();
                    }
                });

                egui::Frame::default()
                    .fill(DISCLAIMER_BG)
                    .corner_radius(PANEL_ROUNDING)
                    .inner_margin(6.0)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(
                                "Educational support only — all interpretations require \
                                 review by a qualified radiologist.",
                            )
                            .color(WARNING)
                            .small(),
                        );
                    });
            });
        });

    submitted
}

fn render_message(ui: &mut egui::Ui, entry: &ChatEntry) {
    let (label, label_color) = match entry.role {
        Role::User => ("You", ACCENT),
        Role::Assistant => ("Assistant", SUCCESS),
        Role::System => ("System", TEXT_SECONDARY),
    };

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(label).color(label_color).strong().small());
                if entry.image_count > 0 {
                    ui.label(
                        RichText::new(format!("📎 {}", entry.image_count))
                            .color(TEXT_SECONDARY)
                            .small(),
                    );
                }
                if let Some(confidence) = entry.confidence {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("confidence {:.0}%", confidence * 100.0))
                                .color(TEXT_SECONDARY)
                                .small(),
                        );
                    });
                }
            });
            ui.label(RichText::new(&entry.content).color(TEXT_PRIMARY));
        });
}
