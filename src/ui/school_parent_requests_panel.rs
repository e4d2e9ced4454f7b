//! Parent requests of a single school.

use eframe::egui::Ui;
use egui_phosphor::regular::ARROWS_CLOCKWISE;

use super::app::App;
use super::components::{back_button, loading_or_empty, panel_header, search_box, styled_button_with_icon};
use super::parent_requests_panel::request_grid;
use super::school_admins_panel::school_picker;
use crate::i18n::Msg;
use crate::models::{ParentRequest, School};
use crate::table::{SortDirection, TableState};

pub struct SchoolRequestsState {
    pub schools: Vec<School>,
    pub selected: Option<String>,
    pub requests: Vec<ParentRequest>,
    pub loading: bool,
    pub table: TableState,
}

impl SchoolRequestsState {
    pub fn new(page_size: usize) -> Self {
        Self {
            schools: Vec::new(),
            selected: None,
            requests: Vec::new(),
            loading: false,
            table: TableState::new(page_size).sorted_by(0, SortDirection::Descending),
        }
    }
}

/// Show the per-school parent requests panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "School Parent Requests");

    let mut picked = None;
    let mut refresh = false;

    ui.horizontal(|ui| {
        let state = &mut app.school_requests;
        if state.schools.is_empty() && state.loading {
            ui.spinner();
        } else {
            picked = school_picker(ui, "requests_school", &state.schools, state.selected.as_deref());
        }

        ui.add_space(10.0);
        ui.add_enabled_ui(state.selected.is_some(), |ui| {
            if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
                refresh = true;
            }
        });

        ui.add_space(20.0);
        search_box(ui, &mut state.table, "Parent, type, details...");
    });

    if let Some(id) = picked {
        let state = &mut app.school_requests;
        state.selected = Some(id.clone());
        state.requests.clear();
        state.table.first_page();
        app.load_school_parent_requests(id);
    } else if refresh && let Some(id) = app.school_requests.selected.clone() {
        app.load_school_parent_requests(id);
    }

    ui.add_space(15.0);

    if app.school_requests.selected.is_none() {
        ui.label("Select a school to see its parent requests.");
        return go_back;
    }

    let no_data = app.tr(Msg::NoData);
    let state = &mut app.school_requests;
    let mut change = None;
    if loading_or_empty(ui, state.loading, state.requests.is_empty(), no_data) {
        change = request_grid(ui, "school_requests", &mut state.table, &state.requests, false);
    }

    if let Some((id, status)) = change {
        app.update_parent_request(id, status);
    }

    go_back
}
