//! Single sign-on settings.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{ARROW_COUNTER_CLOCKWISE, FLOPPY_DISK, PLUS, TRASH};

use super::app::App;
use super::components::{
    back_button, colors, danger_action_button, panel_header, primary_button_with_icon, styled_button_with_icon,
};
use crate::i18n::Msg;
use crate::models::{SsoConfig, SsoProvider};

#[derive(Default)]
pub struct SsoState {
    pub config: Option<SsoConfig>,
    pub draft: SsoConfig,
    pub loading: bool,
    pub saving: bool,
}

impl SsoState {
    pub fn set_config(&mut self, config: SsoConfig) {
        self.draft = config.clone();
        self.config = Some(config);
    }

    pub fn is_dirty(&self) -> bool {
        self.config.as_ref().is_some_and(|c| *c != self.draft)
    }
}

/// Empty provider fields, as "<provider>: <field>".
pub fn missing_fields(config: &SsoConfig) -> Vec<String> {
    let mut missing = Vec::new();
    for (i, provider) in config.providers.iter().enumerate() {
        let label = match provider.name.trim() {
            "" => format!("Provider {}", i + 1),
            name => name.to_string(),
        };
        for (field, value) in [
            ("name", &provider.name),
            ("client id", &provider.client_id),
            ("issuer URL", &provider.issuer_url),
        ] {
            if value.trim().is_empty() {
                missing.push(format!("{label}: {field}"));
            }
        }
    }
    missing
}

/// Show the SSO settings panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "SSO Settings");

    if app.sso.config.is_none() {
        if app.sso.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(app.tr(Msg::Loading));
            });
        } else if ui.button("Retry").clicked() {
            app.load_sso();
        }
        return go_back;
    }

    let required_text = app.tr(Msg::RequiredField);
    let state = &mut app.sso;

    ui.checkbox(&mut state.draft.enabled, "Enable single sign-on");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label("Callback URL:");
        ui.add(egui::TextEdit::singleline(&mut state.draft.callback_url).desired_width(360.0));
    });

    ui.add_space(15.0);
    ui.label(RichText::new("Providers").strong());
    ui.add_space(5.0);

    let mut remove = None;

    egui::Grid::new("sso_providers_grid")
        .num_columns(5)
        .striped(true)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.strong("Enabled");
            ui.strong("Name");
            ui.strong("Client ID");
            ui.strong("Issuer URL");
            ui.strong("");
            ui.end_row();

            for (i, provider) in state.draft.providers.iter_mut().enumerate() {
                ui.checkbox(&mut provider.enabled, "");
                ui.add(egui::TextEdit::singleline(&mut provider.name).desired_width(120.0));
                ui.add(egui::TextEdit::singleline(&mut provider.client_id).desired_width(180.0));
                ui.add(
                    egui::TextEdit::singleline(&mut provider.issuer_url)
                        .desired_width(240.0)
                        .hint_text("https://"),
                );
                if danger_action_button(ui, TRASH, "Remove provider").clicked() {
                    remove = Some(i);
                }
                ui.end_row();
            }
        });

    if let Some(i) = remove {
        state.draft.providers.remove(i);
    }

    ui.add_space(8.0);
    if styled_button_with_icon(ui, PLUS, "Add Provider").clicked() {
        state.draft.providers.push(SsoProvider {
            enabled: true,
            ..Default::default()
        });
    }

    let missing = missing_fields(&state.draft);
    if !missing.is_empty() {
        ui.add_space(10.0);
        ui.colored_label(colors::ERROR, format!("{}: {}", required_text, missing.join(", ")));
    }

    ui.add_space(20.0);

    let dirty = state.is_dirty();
    let mut save = false;

    ui.horizontal(|ui| {
        ui.add_enabled_ui(dirty && !state.saving && missing.is_empty(), |ui| {
            if primary_button_with_icon(ui, FLOPPY_DISK, "Save SSO Settings").clicked() {
                save = true;
            }
        });
        if state.saving {
            ui.spinner();
        }
        ui.add_space(10.0);
        ui.add_enabled_ui(dirty, |ui| {
            if styled_button_with_icon(ui, ARROW_COUNTER_CLOCKWISE, "Discard").clicked()
                && let Some(config) = state.config.clone()
            {
                state.set_config(config);
            }
        });
    });

    if save {
        let config = app.sso.draft.clone();
        app.save_sso(config);
    }

    go_back
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str, issuer: &str, enabled: bool) -> SsoProvider {
        SsoProvider {
            name: name.to_string(),
            client_id: "client".to_string(),
            issuer_url: issuer.to_string(),
            enabled,
        }
    }

    #[test]
    fn test_missing_provider_fields() {
        let mut config = SsoConfig {
            enabled: true,
            providers: vec![provider("Google", "https://accounts.google.com", true)],
            callback_url: String::new(),
        };
        assert!(missing_fields(&config).is_empty());

        config.providers.push(provider("", "", false));
        assert_eq!(missing_fields(&config), vec!["Provider 2: name", "Provider 2: issuer URL"]);
    }

    #[test]
    fn test_server_rules_left_to_backend() {
        // Plain-http issuers and SSO with no active provider are the backend's call
        let config = SsoConfig {
            enabled: true,
            providers: vec![provider("Okta", "http://okta.internal", false)],
            callback_url: String::new(),
        };
        assert!(missing_fields(&config).is_empty());
    }

    #[test]
    fn test_dirty_after_edit() {
        let mut state = SsoState::default();
        state.set_config(SsoConfig::default());
        assert!(!state.is_dirty());
        state.draft.enabled = true;
        assert!(state.is_dirty());
    }
}
