//! Onboarding requests: approve or reject new schools.

use chrono::Local;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CHECK, X};

use super::app::App;
use super::components::{
    action_button, back_button, colors, danger_action_button, loading_or_empty, pagination_bar, panel_header,
    primary_button_with_icon, search_box, sortable_headers, status_chip, styled_button, styled_button_with_icon,
};
use crate::i18n::Msg;
use crate::models::{OnboardingRequest, OnboardingStatus};
use crate::table::{SortDirection, TableState};

/// Rejection dialog input.
pub struct RejectForm {
    pub id: String,
    pub school_name: String,
    pub reason: String,
}

pub struct OnboardingState {
    pub requests: Vec<OnboardingRequest>,
    pub loading: bool,
    pub table: TableState,
    pub pending_only: bool,
    pub busy_id: Option<String>,
    pub reject: Option<RejectForm>,
}

impl OnboardingState {
    pub fn new(page_size: usize) -> Self {
        Self {
            requests: Vec::new(),
            loading: false,
            // Newest first
            table: TableState::new(page_size).sorted_by(5, SortDirection::Descending),
            pending_only: true,
            busy_id: None,
            reject: None,
        }
    }
}

fn status_color(status: OnboardingStatus) -> egui::Color32 {
    match status {
        OnboardingStatus::Pending => colors::WARNING,
        OnboardingStatus::Approved => colors::SUCCESS,
        OnboardingStatus::Rejected => colors::ERROR,
        OnboardingStatus::Unknown => colors::NEUTRAL,
    }
}

enum Action {
    Approve(String),
    OpenReject(String, String),
}

/// Show the onboarding panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Onboarding Requests");

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_onboarding();
        }
        ui.add_space(20.0);

        let state = &mut app.onboarding;
        if ui.checkbox(&mut state.pending_only, "Pending only").changed() {
            state.table.first_page();
        }

        ui.add_space(20.0);
        search_box(ui, &mut state.table, "School, contact or email...");
    });

    ui.add_space(15.0);

    let no_data = app.tr(Msg::NoData);
    let state = &mut app.onboarding;
    let rows: Vec<OnboardingRequest> = state
        .requests
        .iter()
        .filter(|r| !state.pending_only || r.is_pending())
        .cloned()
        .collect();

    let mut action = None;

    if loading_or_empty(ui, state.loading, rows.is_empty(), no_data) {
        let view = state.table.view(&rows);

        pagination_bar(ui, &mut state.table, &view, "requests");
        ui.add_space(10.0);

        ScrollArea::vertical().id_salt("onboarding_scroll").show(ui, |ui| {
            egui::Grid::new("onboarding_grid")
                .num_columns(OnboardingRequest::COLUMNS.len() + 1)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    sortable_headers(ui, &mut state.table, &OnboardingRequest::COLUMNS);
                    ui.strong("Actions");
                    ui.end_row();

                    for request in &view.rows {
                        ui.label(&request.school_name);
                        ui.label(&request.contact_name);
                        ui.label(&request.contact_email);
                        ui.label(request.requested_plan.as_deref().unwrap_or("-"));
                        status_chip(ui, request.status.name(), status_color(request.status));
                        ui.label(
                            request
                                .submitted_at
                                .map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
                                .unwrap_or_else(|| "-".to_string()),
                        );

                        ui.horizontal(|ui| {
                            if state.busy_id.as_deref() == Some(request.id.as_str()) {
                                ui.spinner();
                            } else if request.is_pending() {
                                ui.add_enabled_ui(state.busy_id.is_none(), |ui| {
                                    if action_button(ui, CHECK, "Approve").clicked() {
                                        action = Some(Action::Approve(request.id.clone()));
                                    }
                                    ui.add_space(4.0);
                                    if danger_action_button(ui, X, "Reject").clicked() {
                                        action =
                                            Some(Action::OpenReject(request.id.clone(), request.school_name.clone()));
                                    }
                                });
                            }
                        });

                        ui.end_row();
                    }
                });
        });
    }

    match action {
        Some(Action::Approve(id)) => app.approve_onboarding(id),
        Some(Action::OpenReject(id, school_name)) => {
            app.onboarding.reject = Some(RejectForm {
                id,
                school_name,
                reason: String::new(),
            });
        }
        None => {}
    }

    if app.onboarding.reject.is_some() {
        show_reject_dialog(app, ui.ctx());
    }

    go_back
}

fn show_reject_dialog(app: &mut App, ctx: &egui::Context) {
    let busy = app.onboarding.busy_id.is_some();
    let Some(form) = app.onboarding.reject.as_mut() else {
        return;
    };

    let mut close = false;
    let mut submit = None;

    egui::Window::new("Reject Request")
        .collapsible(false)
        .resizable(false)
        .default_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Reject onboarding of '{}'?", form.school_name));
            ui.add_space(10.0);
            ui.label("Reason (sent to the contact):");
            ui.add(
                egui::TextEdit::multiline(&mut form.reason)
                    .desired_rows(3)
                    .desired_width(360.0),
            );

            ui.add_space(15.0);
            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    close = true;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let ready = !busy && !form.reason.trim().is_empty();
                    ui.add_enabled_ui(ready, |ui| {
                        if primary_button_with_icon(ui, X, "Reject").clicked() {
                            submit = Some((form.id.clone(), form.reason.trim().to_string()));
                        }
                    });
                    if busy {
                        ui.spinner();
                    }
                });
            });
            if form.reason.trim().is_empty() {
                ui.label(RichText::new("A reason is required.").small().weak());
            }
        });

    if close {
        app.onboarding.reject = None;
    } else if let Some((id, reason)) = submit {
        app.reject_onboarding(id, reason);
    }
}
