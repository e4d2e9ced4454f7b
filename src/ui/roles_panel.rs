//! Platform roles list with create/edit form.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, PENCIL, PLUS, TRASH};

use super::app::{App, DeleteTarget};
use super::components::{
    action_button, back_button, danger_action_button, loading_or_empty, pagination_bar, panel_header,
    primary_button_with_icon, search_box, sortable_headers, styled_button, styled_button_with_icon,
};
use crate::i18n::Msg;
use crate::models::role::parse_permissions;
use crate::models::{Role, RoleInput};
use crate::table::TableState;

/// Role being created (no `id`) or edited.
#[derive(Debug, Clone, Default)]
pub struct RoleForm {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub permissions: String,
}

impl RoleForm {
    pub fn edit(role: &Role) -> Self {
        Self {
            id: Some(role.id.clone()),
            name: role.name.clone(),
            description: role.description.clone(),
            permissions: role.permissions.join("\n"),
        }
    }

    pub fn to_input(&self) -> Option<RoleInput> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(RoleInput {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            permissions: parse_permissions(&self.permissions),
        })
    }
}

pub struct RolesState {
    pub roles: Vec<Role>,
    pub loading: bool,
    pub submitting: bool,
    pub table: TableState,
    pub form: Option<RoleForm>,
}

impl RolesState {
    pub fn new(page_size: usize) -> Self {
        Self {
            roles: Vec::new(),
            loading: false,
            submitting: false,
            table: TableState::new(page_size),
            form: None,
        }
    }
}

enum Action {
    Edit(RoleForm),
    Delete(String, String),
}

/// Show the roles panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Roles");

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "New Role").clicked() {
            app.roles.form = Some(RoleForm::default());
        }
        ui.add_space(10.0);
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_roles();
        }
        ui.add_space(20.0);
        search_box(ui, &mut app.roles.table, "Name or permission...");
    });

    ui.add_space(15.0);

    let no_data = app.tr(Msg::NoData);
    let state = &mut app.roles;
    let mut action = None;

    if loading_or_empty(ui, state.loading, state.roles.is_empty(), no_data) {
        let view = state.table.view(&state.roles);
        pagination_bar(ui, &mut state.table, &view, "roles");
        ui.add_space(10.0);

        ScrollArea::vertical().id_salt("roles_scroll").show(ui, |ui| {
            egui::Grid::new("roles_grid")
                .num_columns(Role::COLUMNS.len() + 1)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    sortable_headers(ui, &mut state.table, &Role::COLUMNS);
                    ui.strong("Actions");
                    ui.end_row();

                    for role in &view.rows {
                        ui.label(&role.name);
                        ui.label(&role.description);
                        ui.label(role.user_count.to_string());
                        ui.label(format!("{}", role.permissions.len()))
                            .on_hover_text(role.permissions.join("\n"));

                        ui.horizontal(|ui| {
                            if action_button(ui, PENCIL, "Edit").clicked() {
                                action = Some(Action::Edit(RoleForm::edit(role)));
                            }
                            ui.add_space(4.0);
                            if danger_action_button(ui, TRASH, "Delete").clicked() {
                                action = Some(Action::Delete(role.id.clone(), role.name.clone()));
                            }
                        });
                        ui.end_row();
                    }
                });
        });
    }

    match action {
        Some(Action::Edit(form)) => app.roles.form = Some(form),
        Some(Action::Delete(id, name)) => app.delete_target = Some(DeleteTarget::Role(id, name)),
        None => {}
    }

    if app.roles.form.is_some() {
        show_form(app, ui.ctx());
    }

    go_back
}

fn show_form(app: &mut App, ctx: &egui::Context) {
    let submitting = app.roles.submitting;
    let Some(form) = app.roles.form.as_mut() else {
        return;
    };

    let title = if form.id.is_some() { "Edit Role" } else { "New Role" };
    let mut close = false;
    let mut save = false;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("role_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(egui::TextEdit::singleline(&mut form.name).desired_width(280.0));
                    ui.end_row();

                    ui.label("Description:");
                    ui.add(egui::TextEdit::singleline(&mut form.description).desired_width(280.0));
                    ui.end_row();

                    ui.label("Permissions:");
                    ui.add(
                        egui::TextEdit::multiline(&mut form.permissions)
                            .desired_rows(6)
                            .desired_width(280.0)
                            .hint_text("schools.read\nbilling.write"),
                    );
                    ui.end_row();
                });

            ui.label(RichText::new("One permission per line or comma separated.").small().weak());

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    close = true;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_enabled_ui(!submitting, |ui| {
                        if primary_button_with_icon(ui, "", "Save").clicked() {
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
        app.roles.form = None;
        return;
    }
    if save {
        let id = form.id.clone();
        match form.to_input() {
            Some(input) => app.save_role(id, input),
            None => {
                app.toasts.warning(format!("{}: name", app.tr(Msg::RequiredField)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_round_trip_from_role() {
        let role = Role {
            id: "r1".to_string(),
            name: "Support".to_string(),
            description: "Helpdesk".to_string(),
            user_count: 3,
            permissions: vec!["schools.read".to_string(), "requests.write".to_string()],
        };
        let form = RoleForm::edit(&role);
        assert_eq!(form.id.as_deref(), Some("r1"));

        let input = form.to_input().unwrap();
        assert_eq!(input.permissions, role.permissions);
    }

    #[test]
    fn test_form_requires_name() {
        let form = RoleForm {
            name: "  ".to_string(),
            ..Default::default()
        };
        assert!(form.to_input().is_none());
    }
}
