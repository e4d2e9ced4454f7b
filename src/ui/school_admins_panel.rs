//! Administrators of one school.

use chrono::Local;
use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, TRASH, USER_PLUS};

use super::app::{App, DeleteTarget};
use super::components::{
    back_button, colors, danger_action_button, loading_or_empty, pagination_bar, panel_header,
    primary_button_with_icon, search_box, sortable_headers, styled_button, styled_button_with_icon,
};
use crate::i18n::Msg;
use crate::models::{CreateSchoolAdmin, School, SchoolAdmin};
use crate::table::TableState;

pub struct SchoolAdminsState {
    pub schools: Vec<School>,
    pub selected: Option<String>,
    pub admins: Vec<SchoolAdmin>,
    pub loading: bool,
    pub submitting: bool,
    pub table: TableState,
    pub form: Option<CreateSchoolAdmin>,
}

impl SchoolAdminsState {
    pub fn new(page_size: usize) -> Self {
        Self {
            schools: Vec::new(),
            selected: None,
            admins: Vec::new(),
            loading: false,
            submitting: false,
            table: TableState::new(page_size),
            form: None,
        }
    }

    /// Switch school, dropping the admins of the previous one.
    pub fn select(&mut self, school_id: String) {
        self.selected = Some(school_id);
        self.admins.clear();
        self.form = None;
        self.table.first_page();
    }

    fn selected_name(&self) -> Option<&str> {
        let id = self.selected.as_deref()?;
        self.schools.iter().find(|s| s.id == id).map(|s| s.name.as_str())
    }
}

/// Pick a school from a combo box; returns the newly picked id.
pub fn school_picker(ui: &mut Ui, id_salt: &str, schools: &[School], selected: Option<&str>) -> Option<String> {
    let mut picked = None;
    let text = selected
        .and_then(|id| schools.iter().find(|s| s.id == id))
        .map(|s| s.name.as_str())
        .unwrap_or("Select school...");

    ui.label("School:");
    egui::ComboBox::from_id_salt(id_salt)
        .width(260.0)
        .selected_text(text)
        .show_ui(ui, |ui| {
            for school in schools {
                if ui
                    .selectable_label(selected == Some(school.id.as_str()), &school.name)
                    .clicked()
                    && selected != Some(school.id.as_str())
                {
                    picked = Some(school.id.clone());
                }
            }
        });

    picked
}

enum Action {
    SetActive(String, bool),
    Delete(String, String),
}

/// Show the school admins panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "School Admins");

    let mut picked = None;
    let mut refresh = false;

    ui.horizontal(|ui| {
        let state = &mut app.school_admins;
        if state.schools.is_empty() && state.loading {
            ui.spinner();
        } else {
            picked = school_picker(ui, "admins_school", &state.schools, state.selected.as_deref());
        }

        ui.add_space(10.0);
        ui.add_enabled_ui(state.selected.is_some(), |ui| {
            if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
                refresh = true;
            }
            ui.add_space(10.0);
            if primary_button_with_icon(ui, USER_PLUS, "Add Admin").clicked() {
                state.form = Some(CreateSchoolAdmin::default());
            }
        });

        ui.add_space(20.0);
        search_box(ui, &mut state.table, "Name or email...");
    });

    if let Some(id) = picked {
        app.school_admins.select(id.clone());
        app.load_admins(id);
    } else if refresh && let Some(id) = app.school_admins.selected.clone() {
        app.load_admins(id);
    }

    ui.add_space(15.0);

    let Some(school_id) = app.school_admins.selected.clone() else {
        ui.label("Select a school to see its administrators.");
        return go_back;
    };

    let no_data = app.tr(Msg::NoData);
    let state = &mut app.school_admins;
    let mut action = None;

    if loading_or_empty(ui, state.loading, state.admins.is_empty(), no_data) {
        let view = state.table.view(&state.admins);
        pagination_bar(ui, &mut state.table, &view, "admins");
        ui.add_space(10.0);

        ScrollArea::vertical().id_salt("admins_scroll").show(ui, |ui| {
            egui::Grid::new("admins_grid")
                .num_columns(SchoolAdmin::COLUMNS.len() + 1)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    sortable_headers(ui, &mut state.table, &SchoolAdmin::COLUMNS);
                    ui.strong("Actions");
                    ui.end_row();

                    for admin in &view.rows {
                        ui.label(&admin.name);
                        ui.label(&admin.email);

                        let mut active = admin.is_active;
                        if ui.checkbox(&mut active, "").changed() {
                            action = Some(Action::SetActive(admin.id.clone(), active));
                        }

                        ui.label(
                            admin
                                .last_login
                                .map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
                                .unwrap_or_else(|| "Never".to_string()),
                        );

                        if danger_action_button(ui, TRASH, "Remove").clicked() {
                            action = Some(Action::Delete(admin.id.clone(), admin.name.clone()));
                        }
                        ui.end_row();
                    }
                });
        });
    }

    match action {
        Some(Action::SetActive(admin_id, active)) => app.set_admin_active(school_id.clone(), admin_id, active),
        Some(Action::Delete(admin_id, name)) => {
            app.delete_target = Some(DeleteTarget::Admin {
                school_id: school_id.clone(),
                admin_id,
                name,
            });
        }
        None => {}
    }

    if app.school_admins.form.is_some() {
        show_form(app, ui.ctx(), school_id);
    }

    go_back
}

fn show_form(app: &mut App, ctx: &egui::Context, school_id: String) {
    let submitting = app.school_admins.submitting;
    let school_name = app.school_admins.selected_name().unwrap_or_default().to_string();
    let Some(form) = app.school_admins.form.as_mut() else {
        return;
    };

    let mut close = false;
    let mut save = false;

    egui::Window::new("Add School Admin")
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(school_name);
            ui.add_space(10.0);

            egui::Grid::new("admin_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(egui::TextEdit::singleline(&mut form.name).desired_width(240.0));
                    ui.end_row();

                    ui.label("Email:");
                    let valid = form.email.is_empty() || form.email.contains('@');
                    ui.add(
                        egui::TextEdit::singleline(&mut form.email)
                            .desired_width(240.0)
                            .text_color(if valid {
                                ui.visuals().text_color()
                            } else {
                                colors::ERROR
                            }),
                    );
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    close = true;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_enabled_ui(!submitting, |ui| {
                        if primary_button_with_icon(ui, USER_PLUS, "Add").clicked() {
                            save = true;
                        }
                    });
                    if submitting {
                        ui.spinner();
                    }
                });
            });
        });

    if close {
        app.school_admins.form = None;
        return;
    }
    if save {
        let data = CreateSchoolAdmin {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
        };
        if data.name.is_empty() || !data.email.contains('@') {
            app.toasts
                .warning(format!("{}: name, email", app.tr(Msg::RequiredField)));
        } else {
            app.create_admin(school_id, data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_clears_previous_school() {
        let mut state = SchoolAdminsState::new(10);
        state.admins.push(SchoolAdmin {
            id: "a1".to_string(),
            name: "Ana".to_string(),
            email: "ana@oak.edu".to_string(),
            is_active: true,
            last_login: None,
        });
        state.form = Some(CreateSchoolAdmin::default());

        state.select("s2".to_string());
        assert_eq!(state.selected.as_deref(), Some("s2"));
        assert!(state.admins.is_empty());
        assert!(state.form.is_none());
    }
}
