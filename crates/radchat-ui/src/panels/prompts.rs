//! Prompt catalog panel — pick a specialty system prompt for the
//! current session.

use crate::theme::*;
use egui::{self, RichText, ScrollArea};
use radchat_types::prompt::{RadiologyCategory, SystemPrompt, SYSTEM_PROMPTS};

/// Render the prompt catalog. Returns the selected prompt, if any.
pub fn prompt_panel(
    ui: &mut egui::Ui,
    current_category: RadiologyCategory,
) -> Option<&'static SystemPrompt> {
    let mut selected = None;

    ui.label(RichText::new("Specialty Prompts").color(TEXT_PRIMARY).strong());
    ui.label(
        RichText::new("Changing the prompt reshapes how the assistant answers in this session.")
            .color(TEXT_SECONDARY)
            .small(),
    );
    ui.separator();

    ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        for prompt in SYSTEM_PROMPTS {
            let active = prompt.category == current_category;
            let fill = if active { BG_SURFACE } else { BG_SECONDARY };

            let response = egui::Frame::default()
                .fill(fill)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let name_color = if active { ACCENT } else { TEXT_PRIMARY };
                        ui.label(RichText::new(prompt.name).color(name_color).strong());
                        if prompt.is_default {
                            ui.label(RichText::new("default").color(TEXT_SECONDARY).small());
                        }
                    });
                    ui.label(
                        RichText::new(prompt.description)
                            .color(TEXT_SECONDARY)
                            .small(),
                    );
                })
                .response;

            if response.interact(egui::Sense::click()).clicked() && !active {
                selected = Some(prompt);
            }
            ui.add_space(2.0);
        }
    });

    selected
}
