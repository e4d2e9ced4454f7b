//! Platform security policy editor.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{ARROW_COUNTER_CLOCKWISE, FLOPPY_DISK};

use super::app::App;
use super::components::{back_button, colors, panel_header, primary_button_with_icon, styled_button_with_icon};
use crate::i18n::Msg;
use crate::models::SecurityPolicy;
use crate::models::security::parse_ip_ranges;

#[derive(Default)]
pub struct SecurityState {
    /// Last policy returned by the server.
    pub policy: Option<SecurityPolicy>,
    pub draft: SecurityPolicy,
    pub ip_text: String,
    pub loading: bool,
    pub saving: bool,
}

impl SecurityState {
    pub fn set_policy(&mut self, policy: SecurityPolicy) {
        self.draft = policy.clone();
        self.ip_text = policy.allowed_ip_ranges.join("\n");
        self.policy = Some(policy);
    }

    /// Draft with the IP text folded in.
    pub fn edited(&self) -> SecurityPolicy {
        SecurityPolicy {
            allowed_ip_ranges: parse_ip_ranges(&self.ip_text),
            ..self.draft.clone()
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.policy.as_ref().is_some_and(|p| *p != self.edited())
    }
}

/// Show the security settings panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Security Settings");

    if app.security.policy.is_none() {
        if app.security.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(app.tr(Msg::Loading));
            });
        } else if ui.button("Retry").clicked() {
            app.load_policy();
        }
        return go_back;
    }

    let state = &mut app.security;

    egui::Grid::new("security_grid")
        .num_columns(2)
        .spacing([20.0, 12.0])
        .show(ui, |ui| {
            let draft = &mut state.draft;

            ui.label("Require MFA for admins:");
            ui.checkbox(&mut draft.enforce_mfa_for_admins, "");
            ui.end_row();

            ui.label("Minimum password length:");
            ui.add(egui::DragValue::new(&mut draft.password_min_length));
            ui.end_row();

            ui.label("Lockout after failed logins:");
            ui.horizontal(|ui| {
                ui.add(egui::DragValue::new(&mut draft.lockout_threshold));
                if draft.lockout_threshold == 0 {
                    ui.label(RichText::new("never").weak());
                }
            });
            ui.end_row();

            ui.label("Session lifetime (hours):");
            ui.add(egui::DragValue::new(&mut draft.session_max_age_hours));
            ui.end_row();

            ui.label("Allowed IP ranges:");
            ui.vertical(|ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut state.ip_text)
                        .desired_rows(5)
                        .desired_width(260.0)
                        .hint_text("10.0.0.0/8\n203.0.113.7"),
                );
                ui.label(RichText::new("One address or CIDR range per line. Empty allows all.").small().weak());
            });
            ui.end_row();
        });

    ui.add_space(20.0);

    let dirty = state.is_dirty();
    let mut save = false;

    ui.horizontal(|ui| {
        ui.add_enabled_ui(dirty && !state.saving, |ui| {
            if primary_button_with_icon(ui, FLOPPY_DISK, "Save Policy").clicked() {
                save = true;
            }
        });
        if state.saving {
            ui.spinner();
        }
        ui.add_space(10.0);
        ui.add_enabled_ui(dirty, |ui| {
            if styled_button_with_icon(ui, ARROW_COUNTER_CLOCKWISE, "Discard").clicked()
                && let Some(policy) = state.policy.clone()
            {
                state.set_policy(policy);
            }
        });
        if dirty {
            ui.label(RichText::new("Unsaved changes").color(colors::WARNING));
        }
    });

    if save {
        let policy = app.security.edited();
        app.save_policy(policy);
    }

    go_back
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirty_tracks_ip_text() {
        let mut state = SecurityState::default();
        assert!(!state.is_dirty());

        state.set_policy(SecurityPolicy {
            allowed_ip_ranges: vec!["10.0.0.0/8".to_string()],
            ..Default::default()
        });
        assert!(!state.is_dirty());

        state.ip_text.push_str("\n\n");
        assert!(!state.is_dirty());

        state.ip_text.push_str("192.168.0.0/16");
        assert!(state.is_dirty());
        assert_eq!(state.edited().allowed_ip_ranges.len(), 2);
    }

    #[test]
    fn test_loaded_policy_kept_verbatim() {
        let mut state = SecurityState::default();
        state.set_policy(SecurityPolicy {
            password_min_length: 200,
            lockout_threshold: 0,
            session_max_age_hours: 0,
            allowed_ip_ranges: vec!["office-vpn".to_string()],
            ..Default::default()
        });

        assert!(!state.is_dirty());
        let edited = state.edited();
        assert_eq!(edited.password_min_length, 200);
        assert_eq!(edited.session_max_age_hours, 0);
        assert_eq!(edited.allowed_ip_ranges, vec!["office-vpn"]);
    }
}
