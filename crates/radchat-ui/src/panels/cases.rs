//! Case management panel — list, create/edit form, and export.

use crate::state::{CaseForm, UiState};
use crate::theme::*;
use egui::{self, Align, Layout, RichText, ScrollArea};
use radchat_core::export::ExportFormat;
use radchat_types::case::{CaseDraft, CasePatch, CaseStatus, RadiologyCase, RadiologyModality};

/// Action requested from the cases panel
#[derive(Debug, Clone, PartialEq)]
pub enum CaseAction {
    Create(CaseDraft),
    Update(String, CasePatch),
    Delete(String),
    Export(String, ExportFormat),
}

pub fn cases_panel(
    ui: &mut egui::Ui,
    cases: &[RadiologyCase],
    state: &mut UiState,
    current_session_id: Option<&str>,
) -> Option<CaseAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Cases").color(TEXT_PRIMARY).strong());
                ui.label(
                    RichText::new(format!("{} total", cases.len()))
                        .color(TEXT_SECONDARY)
                        .small(),
                );
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let toggle_label = if state.show_case_form {
                        "Close form"
                    } else {
                        "+ New case"
                    };
                    if ui.button(RichText::new(toggle_label).color(ACCENT)).clicked() {
                        if state.show_case_form {
                            state.case_form.clear();
                        }
                        state.show_case_form = !state.show_case_form;
                    }
                });
            });
            ui.separator();

            if state.show_case_form {
                if let Some(form_action) = case_form(ui, &mut state.case_form, current_session_id)
                {
                    state.case_form.clear();
                    state.show_case_form = false;
                    action = Some(form_action);
                }
                ui.separator();
            }

            ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                if cases.is_empty() {
                    ui.label(
                        RichText::new("No cases recorded yet")
                            .color(TEXT_SECONDARY)
                            .italics(),
                    );
                }

                for case in cases {
                    if let Some(row_action) = case_row(ui, case, state) {
                        action = Some(row_action);
                    }
                    ui.add_space(4.0);
                }
            });
        });

    action
}

fn case_row(ui: &mut egui::Ui, case: &RadiologyCase, state: &mut UiState) -> Option<CaseAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&case.title).color(TEXT_PRIMARY).strong());
                ui.label(
                    RichText::new(case.modality.short_label())
                        .color(ACCENT)
                        .small(),
                );
                let status_color = match case.status {
                    CaseStatus::Completed => SUCCESS,
                    CaseStatus::Archived => TEXT_SECONDARY,
                    _ => WARNING,
                };
                ui.label(RichText::new(case.status.label()).color(status_color).small());
            });

            if !case.description.is_empty() {
                ui.label(
                    RichText::new(&case.description)
                        .color(TEXT_SECONDARY)
                        .small(),
                );
            }

            ui.horizontal(|ui| {
                if ui.small_button("Edit").clicked() {
                    state.case_form = CaseForm::from_case(case);
                    state.show_case_form = true;
                }
                if ui.small_button("Export JSON").clicked() {
                    action = Some(CaseAction::Export(case.id.clone(), ExportFormat::Json));
                }
                if ui.small_button("Export report").clicked() {
                    action = Some(CaseAction::Export(case.id.clone(), ExportFormat::Report));
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui
                        .small_button(RichText::new("Delete").color(ERROR))
                        .clicked()
                    {
                        action = Some(CaseAction::Delete(case.id.clone()));
                    }
                });
            });
        });

    action
}

fn case_form(
    ui: &mut egui::Ui,
    form: &mut CaseForm,
    current_session_id: Option<&str>,
) -> Option<CaseAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            let heading = if form.editing.is_some() {
                "Edit case"
            } else {
                "New case"
            };
            ui.label(RichText::new(heading).color(TEXT_PRIMARY).strong());

            egui::Grid::new("case_form_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title").color(TEXT_SECONDARY));
                    ui.text_edit_singleline(&mut form.title);
                    ui.end_row();

                    ui.label(RichText::new("Patient ID").color(TEXT_SECONDARY));
                    ui.text_edit_singleline(&mut form.patient_id);
                    ui.end_row();

                    ui.label(RichText::new("Modality").color(TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("case_modality")
                        .selected_text(
                            form.modality.map(|m| m.label()).unwrap_or("Select modality"),
                        )
                        .show_ui(ui, |ui| {
                            for modality in RadiologyModality::all() {
                                ui.selectable_value(
                                    &mut form.modality,
                                    Some(*modality),
                                    modality.label(),
                                );
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Status").color(TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("case_status")
                        .selected_text(form.status.map(|s| s.label()).unwrap_or("Draft"))
                        .show_ui(ui, |ui| {
                            for status in CaseStatus::all() {
                                ui.selectable_value(
                                    &mut form.status,
                                    Some(*status),
                                    status.label(),
                                );
                            }
                        });
                    ui.end_row();
                });

            ui.label(RichText::new("Description").color(TEXT_SECONDARY));
            ui.text_edit_multiline(&mut form.description);
            ui.label(RichText::new("Findings").color(TEXT_SECONDARY));
            ui.text_edit_multiline(&mut form.findings);
            ui.label(RichText::new("Impression").color(TEXT_SECONDARY));
            ui.text_edit_multiline(&mut form.impression);

            ui.horizontal(|ui| {
                let save_label = if form.editing.is_some() { "Save" } else { "Create" };
                if ui
                    .button(RichText::new(save_label).color(TEXT_PRIMARY))
                    .clicked()
                {
                    action = Some(match form.editing.clone() {
                        Some(id) => CaseAction::Update(id, form.to_patch()),
                        None => CaseAction::Create(form.to_draft(current_session_id)),
                    });
                }
            });
        });

    action
}
