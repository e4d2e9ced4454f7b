//! New school form.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::BUILDINGS;

use super::app::App;
use super::components::{back_button, colors, panel_header, primary_button_with_icon, styled_button};
use crate::i18n::Msg;
use crate::models::{CreateSchool, Plan};

#[derive(Default)]
pub struct CreateSchoolState {
    pub plans: Vec<Plan>,
    pub plans_loaded: bool,
    pub form: CreateSchoolForm,
    pub submitting: bool,
    /// Last request the server accepted.
    pub created: Option<CreateSchool>,
}

impl CreateSchoolState {
    pub fn set_plans(&mut self, plans: Vec<Plan>) {
        if self.form.plan_id.is_empty()
            && let Some(first) = plans.first()
        {
            self.form.plan_id = first.id.clone();
        }
        self.plans = plans;
        self.plans_loaded = true;
    }

    /// Clear the inputs but keep the selected plan.
    pub fn reset_form(&mut self) {
        let plan_id = std::mem::take(&mut self.form.plan_id);
        self.form = CreateSchoolForm {
            plan_id,
            ..Default::default()
        };
    }
}

#[derive(Default, Clone)]
pub struct CreateSchoolForm {
    pub name: String,
    pub subdomain: String,
    pub plan_id: String,
    pub admin_name: String,
    pub admin_email: String,
    pub country: String,
}

impl CreateSchoolForm {
    /// Fields that still need a value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("school name");
        }
        if self.subdomain.trim().is_empty() {
            missing.push("subdomain");
        }
        if self.plan_id.is_empty() {
            missing.push("plan");
        }
        if self.admin_name.trim().is_empty() {
            missing.push("admin name");
        }
        if self.admin_email.trim().is_empty() {
            missing.push("admin email");
        }
        missing
    }

    pub fn to_request(&self) -> CreateSchool {
        let country = self.country.trim();
        CreateSchool {
            name: self.name.trim().to_string(),
            subdomain: self.subdomain.trim().to_lowercase(),
            plan_id: self.plan_id.clone(),
            admin_name: self.admin_name.trim().to_string(),
            admin_email: self.admin_email.trim().to_string(),
            country: (!country.is_empty()).then(|| country.to_string()),
        }
    }
}

/// Suggested subdomain for a school name: lowercase ASCII words joined by `-`.
pub fn suggest_subdomain(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Show the create school panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Create School");

    if let Some(school) = &app.create_school.created {
        ui.colored_label(
            colors::SUCCESS,
            format!("{}: {} ({})", app.tr(Msg::SchoolCreated), school.name, school.subdomain),
        );
        ui.add_space(10.0);
    }

    let mut submit = false;
    let state = &mut app.create_school;

    egui::Grid::new("create_school_grid")
        .num_columns(2)
        .spacing([20.0, 10.0])
        .show(ui, |ui| {
            let form = &mut state.form;

            ui.label("School name:");
            let before = suggest_subdomain(&form.name);
            if ui
                .add(egui::TextEdit::singleline(&mut form.name).desired_width(300.0))
                .changed()
                && (form.subdomain.is_empty() || form.subdomain == before)
            {
                // Keep the subdomain in step until the user edits it
                form.subdomain = suggest_subdomain(&form.name);
            }
            ui.end_row();

            ui.label("Subdomain:");
            ui.add(
                egui::TextEdit::singleline(&mut form.subdomain)
                    .desired_width(200.0)
                    .hint_text("oak-primary"),
            );
            ui.end_row();

            ui.label("Plan:");
            if !state.plans_loaded {
                ui.spinner();
            } else {
                let selected = state
                    .plans
                    .iter()
                    .find(|p| p.id == form.plan_id)
                    .map(Plan::label)
                    .unwrap_or_else(|| "Select plan...".to_string());
                egui::ComboBox::from_id_salt("create_school_plan")
                    .width(300.0)
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for plan in &state.plans {
                            ui.selectable_value(&mut form.plan_id, plan.id.clone(), plan.label());
                        }
                    });
            }
            ui.end_row();

            ui.label("Admin name:");
            ui.add(egui::TextEdit::singleline(&mut form.admin_name).desired_width(300.0));
            ui.end_row();

            ui.label("Admin email:");
            ui.add(egui::TextEdit::singleline(&mut form.admin_email).desired_width(300.0));
            ui.end_row();

            ui.label("Country:");
            ui.add(
                egui::TextEdit::singleline(&mut form.country)
                    .desired_width(150.0)
                    .hint_text("Optional"),
            );
            ui.end_row();
        });

    ui.add_space(20.0);

    ui.horizontal(|ui| {
        ui.add_enabled_ui(!state.submitting, |ui| {
            if primary_button_with_icon(ui, BUILDINGS, "Create School").clicked() {
                submit = true;
            }
        });
        if state.submitting {
            ui.spinner();
        }
        ui.add_space(10.0);
        if styled_button(ui, "Clear").clicked() {
            state.reset_form();
            state.created = None;
        }
    });

    ui.add_space(10.0);
    ui.label(RichText::new("The admin receives an invitation email from the platform.").weak());

    if submit {
        let missing = app.create_school.form.missing_fields();
        if missing.is_empty() {
            let request = app.create_school.form.to_request();
            app.create_school(request);
        } else {
            app.toasts
                .warning(format!("{}: {}", app.tr(Msg::RequiredField), missing.join(", ")));
        }
    }

    go_back
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_subdomain() {
        assert_eq!(suggest_subdomain("Oak Primary School"), "oak-primary-school");
        assert_eq!(suggest_subdomain("  St. Mary's  "), "st-mary-s");
        assert_eq!(suggest_subdomain(""), "");
    }

    #[test]
    fn test_missing_fields() {
        let mut form = CreateSchoolForm {
            name: "Oak".to_string(),
            admin_email: "ana@oak.edu".to_string(),
            ..Default::default()
        };
        assert_eq!(form.missing_fields(), vec!["subdomain", "plan", "admin name"]);

        form.subdomain = "oak".to_string();
        form.plan_id = "p1".to_string();
        form.admin_name = "Ana".to_string();
        assert!(form.missing_fields().is_empty());
    }

    #[test]
    fn test_request_trims_and_drops_blank_country() {
        let form = CreateSchoolForm {
            name: " Oak ".to_string(),
            subdomain: "Oak".to_string(),
            plan_id: "p1".to_string(),
            admin_name: "Ana".to_string(),
            admin_email: " ana@oak.edu ".to_string(),
            country: "  ".to_string(),
        };
        let request = form.to_request();
        assert_eq!(request.name, "Oak");
        assert_eq!(request.subdomain, "oak");
        assert_eq!(request.admin_email, "ana@oak.edu");
        assert!(request.country.is_none());
    }

    #[test]
    fn test_reset_keeps_plan() {
        let mut state = CreateSchoolState::default();
        state.form.name = "Oak".to_string();
        state.form.plan_id = "p2".to_string();
        state.reset_form();
        assert!(state.form.name.is_empty());
        assert_eq!(state.form.plan_id, "p2");
    }
}
