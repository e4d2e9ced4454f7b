//! Parent requests across every school.

use chrono::Local;
use eframe::egui::{self, Color32, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CHECK, EYE, X};

use super::app::App;
use super::components::{
    action_button, back_button, colors, danger_action_button, loading_or_empty, pagination_bar, panel_header,
    search_box, sortable_header, status_chip, styled_button_with_icon,
};
use crate::i18n::Msg;
use crate::models::{ParentRequest, RequestStatus};
use crate::table::{SortDirection, TableState};

pub struct ParentRequestsState {
    pub requests: Vec<ParentRequest>,
    pub loading: bool,
    pub status_filter: Option<RequestStatus>,
    pub table: TableState,
}

impl ParentRequestsState {
    pub fn new(page_size: usize) -> Self {
        Self {
            requests: Vec::new(),
            loading: false,
            status_filter: None,
            table: TableState::new(page_size).sorted_by(0, SortDirection::Descending),
        }
    }
}

pub fn status_color(status: RequestStatus) -> Color32 {
    match status {
        RequestStatus::Pending => colors::WARNING,
        RequestStatus::InReview => colors::INFO,
        RequestStatus::Approved => colors::SUCCESS,
        RequestStatus::Rejected => colors::ERROR,
        RequestStatus::Unknown => colors::NEUTRAL,
    }
}

/// Grid of requests with status actions; returns the status change clicked.
///
/// Shared with the per-school view.
pub fn request_grid(
    ui: &mut Ui,
    id_salt: &str,
    table: &mut TableState,
    requests: &[ParentRequest],
    show_school: bool,
) -> Option<(String, RequestStatus)> {
    let view = table.view(requests);
    let mut change = None;

    pagination_bar(ui, table, &view, "requests");
    ui.add_space(10.0);

    // The school column is hidden in the per-school view
    let column_count = ParentRequest::COLUMNS.len() - usize::from(!show_school);

    ScrollArea::vertical().id_salt(format!("{id_salt}_scroll")).show(ui, |ui| {
        egui::Grid::new(format!("{id_salt}_grid"))
            .num_columns(column_count + 1)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for (i, title) in ParentRequest::COLUMNS.iter().enumerate() {
                    if show_school || i != 1 {
                        sortable_header(ui, table, i, title);
                    }
                }
                ui.strong("Actions");
                ui.end_row();

                for request in &view.rows {
                    ui.label(
                        request
                            .submission_date
                            .with_timezone(&Local)
                            .format("%Y-%m-%d %H:%M")
                            .to_string(),
                    );
                    if show_school {
                        ui.label(request.school_name.as_deref().unwrap_or("-"));
                    }
                    ui.label(request.parent_name.as_deref().unwrap_or("-"));
                    ui.label(&request.request_type);
                    status_chip(ui, request.status.name(), status_color(request.status));
                    ui.add(egui::Label::new(&request.details).truncate())
                        .on_hover_text(&request.details);

                    ui.horizontal(|ui| {
                        ui.add_enabled_ui(!request.status.is_closed(), |ui| {
                            if request.status != RequestStatus::InReview
                                && action_button(ui, EYE, "Mark in review").clicked()
                            {
                                change = Some((request.id.clone(), RequestStatus::InReview));
                            }
                            ui.add_space(4.0);
                            if action_button(ui, CHECK, "Approve").clicked() {
                                change = Some((request.id.clone(), RequestStatus::Approved));
                            }
                            ui.add_space(4.0);
                            if danger_action_button(ui, X, "Reject").clicked() {
                                change = Some((request.id.clone(), RequestStatus::Rejected));
                            }
                        });
                    });

                    ui.end_row();
                }
            });
    });

    change
}

/// Show the parent requests panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Parent Requests");

    let mut reload = false;

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            reload = true;
        }
        ui.add_space(20.0);

        let state = &mut app.parent_requests;
        ui.label("Status:");
        let selected = state.status_filter.map(|s| s.name()).unwrap_or("All");
        egui::ComboBox::from_id_salt("parent_status_filter")
            .width(120.0)
            .selected_text(selected)
            .show_ui(ui, |ui| {
                reload |= ui.selectable_value(&mut state.status_filter, None, "All").changed();
                for status in RequestStatus::SETTABLE {
                    reload |= ui
                        .selectable_value(&mut state.status_filter, Some(status), status.name())
                        .changed();
                }
            });

        ui.add_space(20.0);
        search_box(ui, &mut state.table, "School, parent, type...");
    });

    if reload {
        app.load_parent_requests();
    }

    ui.add_space(15.0);

    let no_data = app.tr(Msg::NoData);
    let state = &mut app.parent_requests;
    let mut change = None;
    if loading_or_empty(ui, state.loading, state.requests.is_empty(), no_data) {
        change = request_grid(ui, "parent_requests", &mut state.table, &state.requests, true);
    }

    if let Some((id, status)) = change {
        app.update_parent_request(id, status);
    }

    go_back
}
