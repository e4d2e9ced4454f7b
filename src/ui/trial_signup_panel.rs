//! Public trial signup, submitted on behalf of a prospective school.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{CHECK_CIRCLE, ROCKET_LAUNCH};

use super::app::App;
use super::components::{back_button, colors, panel_header, primary_button_with_icon, styled_button};
use crate::i18n::Msg;
use crate::models::{OnboardResponse, TrialSignup};

#[derive(Default, Clone)]
pub struct TrialForm {
    pub school_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub student_count: String,
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

impl TrialForm {
    /// Build the request, or the list of problems with the input.
    pub fn to_request(&self) -> Result<TrialSignup, Vec<&'static str>> {
        let student_count = match self.student_count.trim() {
            "" => None,
            text => match text.parse::<u32>() {
                Ok(n) => Some(n),
                Err(_) => return Err(vec!["student count must be a whole number"]),
            },
        };

        let signup = TrialSignup {
            school_name: self.school_name.trim().to_string(),
            contact_name: self.contact_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_empty(&self.phone),
            country: non_empty(&self.country),
            student_count,
        };

        let missing = signup.missing_fields();
        if missing.is_empty() { Ok(signup) } else { Err(missing) }
    }
}

#[derive(Default)]
pub struct TrialSignupState {
    pub form: TrialForm,
    pub submitting: bool,
    pub submitted: Option<OnboardResponse>,
}

/// Show the trial signup panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Trial Signup");

    if let Some(response) = &app.trial.submitted {
        ui.colored_label(colors::SUCCESS, format!("{CHECK_CIRCLE} Signup received"));
        if let Some(id) = &response.request_id {
            ui.label(format!("Request id: {id}"));
        }
        if let Some(message) = &response.message {
            ui.label(message);
        }
        ui.add_space(10.0);
        if styled_button(ui, "New Signup").clicked() {
            app.trial = TrialSignupState::default();
        }
        return go_back;
    }

    ui.label(RichText::new("Sent to the public onboarding endpoint without operator credentials.").weak());
    ui.add_space(10.0);

    let state = &mut app.trial;
    let mut submit = false;

    egui::Grid::new("trial_grid")
        .num_columns(2)
        .spacing([20.0, 10.0])
        .show(ui, |ui| {
            let form = &mut state.form;
            let fields: [(&str, &mut String, &str); 6] = [
                ("School name:", &mut form.school_name, ""),
                ("Contact name:", &mut form.contact_name, ""),
                ("Email:", &mut form.email, "name@school.edu"),
                ("Phone:", &mut form.phone, "Optional"),
                ("Country:", &mut form.country, "Optional"),
                ("Students:", &mut form.student_count, "Optional"),
            ];
            for (label, value, hint) in fields {
                ui.label(label);
                ui.add(egui::TextEdit::singleline(value).desired_width(280.0).hint_text(hint));
                ui.end_row();
            }
        });

    ui.add_space(20.0);

    ui.horizontal(|ui| {
        ui.add_enabled_ui(!state.submitting, |ui| {
            if primary_button_with_icon(ui, ROCKET_LAUNCH, "Submit Signup").clicked() {
                submit = true;
            }
        });
        if state.submitting {
            ui.spinner();
        }
    });

    if submit {
        match app.trial.form.to_request() {
            Ok(signup) => app.submit_trial(signup),
            Err(problems) => {
                app.toasts
                    .warning(format!("{}: {}", app.tr(Msg::RequiredField), problems.join(", ")));
            }
        }
    }

    go_back
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TrialForm {
        TrialForm {
            school_name: " Maple ".to_string(),
            contact_name: "Jo".to_string(),
            email: "jo@maple.org".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_to_request_trims_and_skips_blank_optionals() {
        let mut form = filled();
        form.student_count = " 250 ".to_string();
        let signup = form.to_request().unwrap();
        assert_eq!(signup.school_name, "Maple");
        assert_eq!(signup.student_count, Some(250));
        assert!(signup.phone.is_none());
    }

    #[test]
    fn test_to_request_errors() {
        let mut form = filled();
        form.student_count = "lots".to_string();
        assert!(form.to_request().is_err());

        let form = TrialForm::default();
        assert_eq!(form.to_request().unwrap_err(), vec!["school name", "contact name", "email"]);
    }
}
