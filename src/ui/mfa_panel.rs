//! Multi-factor authentication for the signed-in super-admin.

use eframe::egui::{self, CornerRadius, Margin, RichText, Ui};
use egui_phosphor::regular::{COPY, FINGERPRINT, SHIELD_CHECK, X};

use super::app::App;
use super::components::{back_button, colors, panel_header, primary_button_with_icon, styled_button_with_icon};
use crate::i18n::Msg;
use crate::models::security::is_valid_mfa_code;
use crate::models::{MfaSetup, MfaStatus};

#[derive(Default)]
pub struct MfaState {
    pub status: Option<MfaStatus>,
    pub setup: Option<MfaSetup>,
    pub code: String,
    pub loading: bool,
    pub submitting: bool,
}

enum Action {
    StartSetup,
    Enable(String),
    Disable(String),
}

/// Show the MFA panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "MFA Settings");

    if app.mfa.loading && app.mfa.status.is_none() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(app.tr(Msg::Loading));
        });
        return go_back;
    }

    let Some(enabled) = app.mfa.status.as_ref().map(|s| s.enabled) else {
        if ui.button("Retry").clicked() {
            app.load_mfa_status();
        }
        return go_back;
    };

    let mut action = None;
    let state = &mut app.mfa;

    ui.horizontal(|ui| {
        ui.label("Status:");
        if enabled {
            ui.colored_label(colors::SUCCESS, format!("{SHIELD_CHECK} Enabled"));
        } else {
            ui.colored_label(colors::WARNING, "Disabled");
        }
    });

    ui.add_space(15.0);

    if !enabled && state.setup.is_none() {
        ui.label("Protect your account with an authenticator app.");
        ui.add_space(10.0);
        ui.add_enabled_ui(!state.submitting, |ui| {
            if primary_button_with_icon(ui, FINGERPRINT, "Start Setup").clicked() {
                action = Some(Action::StartSetup);
            }
        });
    }

    if let Some(setup) = &state.setup {
        show_setup(ui, setup);
        ui.add_space(15.0);
    }

    if state.setup.is_some() || enabled {
        let prompt = if enabled {
            "Enter a code from your authenticator to disable MFA:"
        } else {
            "Enter the 6-digit code shown by your authenticator:"
        };
        ui.label(prompt);
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            let valid = state.code.is_empty() || is_valid_mfa_code(&state.code);
            ui.add(
                egui::TextEdit::singleline(&mut state.code)
                    .desired_width(100.0)
                    .hint_text("123456")
                    .char_limit(6)
                    .text_color(if valid {
                        ui.visuals().text_color()
                    } else {
                        colors::ERROR
                    }),
            );

            ui.add_enabled_ui(!state.submitting && is_valid_mfa_code(&state.code), |ui| {
                let code = state.code.trim().to_string();
                if enabled {
                    if styled_button_with_icon(ui, X, "Disable MFA").clicked() {
                        action = Some(Action::Disable(code));
                    }
                } else if primary_button_with_icon(ui, SHIELD_CHECK, "Enable MFA").clicked() {
                    action = Some(Action::Enable(code));
                }
            });

            if state.submitting {
                ui.spinner();
            }
        });
    }

    match action {
        Some(Action::StartSetup) => app.start_mfa_setup(),
        Some(Action::Enable(code)) => app.enable_mfa(code),
        Some(Action::Disable(code)) => app.disable_mfa(code),
        None => {}
    }

    go_back
}

fn show_setup(ui: &mut Ui, setup: &MfaSetup) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(RichText::new("1. Add this account to your authenticator").strong());
            ui.add_space(5.0);

            egui::Grid::new("mfa_setup_grid")
                .num_columns(3)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Secret:");
                    ui.monospace(&setup.secret);
                    if ui.small_button(COPY).on_hover_text("Copy").clicked() {
                        ui.ctx().copy_text(setup.secret.clone());
                    }
                    ui.end_row();

                    if !setup.otpauth_url.is_empty() {
                        ui.label("Setup URL:");
                        ui.monospace(&setup.otpauth_url);
                        if ui.small_button(COPY).on_hover_text("Copy").clicked() {
                            ui.ctx().copy_text(setup.otpauth_url.clone());
                        }
                        ui.end_row();
                    }
                });

            if !setup.backup_codes.is_empty() {
                ui.add_space(10.0);
                ui.label(RichText::new("2. Store these backup codes somewhere safe").strong());
                ui.add_space(5.0);
                ui.horizontal_wrapped(|ui| {
                    for code in &setup.backup_codes {
                        ui.monospace(code);
                        ui.add_space(8.0);
                    }
                });
                if ui.small_button(format!("{COPY} Copy all")).clicked() {
                    ui.ctx().copy_text(setup.backup_codes.join("\n"));
                }
            }
        });
}
