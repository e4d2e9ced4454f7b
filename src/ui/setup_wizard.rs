//! First-run setup wizard for configuration.

use std::path::PathBuf;
use std::sync::mpsc;

use eframe::egui::{self, Color32, RichText};

use crate::api;
use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::i18n::Locale;

/// Connection test state.
#[derive(Default, Clone)]
pub enum ConnectionTestState {
    #[default]
    NotTested,
    Testing,
    Success,
    Failed(String),
}

/// Setup wizard state.
pub struct SetupWizard {
    /// Current step (0-3).
    pub current_step: usize,
    /// Configuration being built.
    pub config: AppConfig,
    /// API connection test state.
    pub api_test_state: ConnectionTestState,
    /// Wizard completed flag.
    pub completed: bool,
    /// Timeout input as string for text editing.
    timeout_input: String,
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupWizard {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Start from an existing (possibly invalid) configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            current_step: 0,
            timeout_input: config.api.timeout_secs.to_string(),
            config,
            api_test_state: ConnectionTestState::NotTested,
            completed: false,
        }
    }

    /// Check if user can proceed to next step.
    pub fn can_proceed(&self) -> bool {
        match self.current_step {
            0 => true,
            1 => matches!(self.api_test_state, ConnectionTestState::Success),
            2 => self.config.validate().is_ok(),
            3 => true,
            _ => false,
        }
    }

    /// Invalidate a previous test after the connection inputs change.
    fn connection_changed(&mut self) {
        if !matches!(self.api_test_state, ConnectionTestState::Testing) {
            self.api_test_state = ConnectionTestState::NotTested;
        }
    }

    /// Get step title.
    fn step_title(&self) -> &'static str {
        match self.current_step {
            0 => "Welcome",
            1 => "API Connection",
            2 => "Preferences",
            3 => "Confirmation",
            _ => "Setup",
        }
    }

    /// Total number of steps.
    const TOTAL_STEPS: usize = 4;
}

/// Setup wizard application.
pub struct SetupApp {
    pub wizard: SetupWizard,
    pub initial_error: Option<String>,
    pub rt: tokio::runtime::Runtime,
    config_path: PathBuf,
    api_test_rx: Option<mpsc::Receiver<Result<(), String>>>,
}

impl SetupApp {
    pub fn new(
        wizard: SetupWizard,
        initial_error: Option<String>,
        config_path: PathBuf,
        rt: tokio::runtime::Runtime,
    ) -> Self {
        Self {
            wizard,
            initial_error,
            rt,
            config_path,
            api_test_rx: None,
        }
    }

    /// Test API connection asynchronously.
    fn start_api_test(&mut self) {
        let api = &self.wizard.config.api;
        let client = match ApiClient::build(&api.base_url, Some(api.token.as_str()), api.timeout_secs) {
            Ok(client) => client,
            Err(e) => {
                self.wizard.api_test_state = ConnectionTestState::Failed(e.to_string());
                return;
            }
        };

        let (tx, rx) = mpsc::channel();
        self.api_test_rx = Some(rx);
        self.wizard.api_test_state = ConnectionTestState::Testing;

        self.rt.spawn(async move {
            let result = test_api_connection(&client).await.map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
    }

    /// Check for async test results.
    fn poll_test_results(&mut self) {
        if let Some(rx) = &self.api_test_rx
            && let Ok(result) = rx.try_recv()
        {
            self.wizard.api_test_state = match result {
                Ok(()) => ConnectionTestState::Success,
                Err(e) => ConnectionTestState::Failed(e),
            };
            self.api_test_rx = None;
        }
    }
}

impl eframe::App for SetupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_test_results();

        if matches!(self.wizard.api_test_state, ConnectionTestState::Testing) {
            ctx.request_repaint();
        }

        if let Some(err) = self.initial_error.clone() {
            egui::Window::new("Configuration Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(Color32::from_rgb(255, 100, 100), &err);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.initial_error = None;
                    }
                });
            return;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);

                ui.horizontal(|ui| {
                    ui.heading(RichText::new("School Admin Console Setup").size(24.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!(
                            "Step {} of {}",
                            self.wizard.current_step + 1,
                            SetupWizard::TOTAL_STEPS
                        ));
                    });
                });

                ui.separator();
                ui.add_space(10.0);

                ui.heading(self.wizard.step_title());
                ui.add_space(20.0);

                let needs_api_test = match self.wizard.current_step {
                    0 => {
                        show_welcome_step(ui);
                        false
                    }
                    1 => show_api_step(ui, &mut self.wizard),
                    2 => {
                        show_preferences_step(ui, &mut self.wizard);
                        false
                    }
                    3 => {
                        show_confirmation_step(ui, &self.wizard, &self.config_path);
                        false
                    }
                    _ => false,
                };

                if needs_api_test {
                    self.start_api_test();
                }

                ui.add_space(30.0);
                ui.separator();

                ui.horizontal(|ui| {
                    if self.wizard.current_step > 0 && ui.button("< Back").clicked() {
                        self.wizard.current_step -= 1;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.wizard.current_step < SetupWizard::TOTAL_STEPS - 1 {
                            let btn_text = if self.wizard.current_step == 0 {
                                "Get Started >"
                            } else {
                                "Next >"
                            };
                            let enabled = self.wizard.can_proceed();
                            if ui.add_enabled(enabled, egui::Button::new(btn_text)).clicked() {
                                self.wizard.current_step += 1;
                            }
                        } else if ui.button("Save & Exit").clicked() {
                            self.wizard.completed = true;
                        }
                    });
                });
            });
        });

        if self.wizard.completed {
            match self.wizard.config.save(&self.config_path) {
                Ok(()) => {
                    tracing::info!("Config saved to {}", self.config_path.display());
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                Err(e) => {
                    self.initial_error = Some(format!("Failed to save config: {}", e));
                    self.wizard.completed = false;
                }
            }
        }
    }
}

fn show_welcome_step(ui: &mut egui::Ui) {
    ui.label("Welcome to the School Admin Console!");
    ui.add_space(10.0);
    ui.label("This wizard will help you configure the application.");
    ui.add_space(20.0);
    ui.label("You will need:");
    ui.add_space(5.0);
    ui.label("  - The platform API base URL");
    ui.label("  - A super-admin access token");
}

fn show_api_step(ui: &mut egui::Ui, wizard: &mut SetupWizard) -> bool {
    let mut needs_test = false;
    let mut changed = false;

    egui::Grid::new("api_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("API base URL:");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut wizard.config.api.base_url)
                        .desired_width(300.0)
                        .hint_text("https://api.example.com/api"),
                )
                .changed();
            ui.end_row();

            ui.label("Access token:");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut wizard.config.api.token)
                        .desired_width(300.0)
                        .password(true),
                )
                .changed();
            ui.end_row();

            ui.label("Timeout (seconds):");
            if ui.text_edit_singleline(&mut wizard.timeout_input).changed()
                && let Ok(secs) = wizard.timeout_input.trim().parse()
            {
                wizard.config.api.timeout_secs = secs;
                changed = true;
            }
            ui.end_row();
        });

    if changed {
        wizard.connection_changed();
    }

    ui.add_space(20.0);

    ui.horizontal(|ui| {
        let testing = matches!(wizard.api_test_state, ConnectionTestState::Testing);
        let ready = !wizard.config.api.base_url.trim().is_empty();
        if ui
            .add_enabled(!testing && ready, egui::Button::new("Test Connection"))
            .clicked()
        {
            needs_test = true;
        }

        ui.add_space(10.0);

        match &wizard.api_test_state {
            ConnectionTestState::NotTested => {
                ui.label("Not tested");
            }
            ConnectionTestState::Testing => {
                ui.spinner();
                ui.label("Testing...");
            }
            ConnectionTestState::Success => {
                ui.colored_label(Color32::from_rgb(100, 200, 100), "Connected and authorized!");
            }
            ConnectionTestState::Failed(e) => {
                ui.colored_label(Color32::from_rgb(255, 100, 100), format!("Failed: {}", e));
            }
        }
    });

    needs_test
}

fn show_preferences_step(ui: &mut egui::Ui, wizard: &mut SetupWizard) {
    ui.label("Adjust how the console looks. These can be changed later in Settings.");
    ui.add_space(10.0);

    let ui_config = &mut wizard.config.ui;

    egui::Grid::new("prefs_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("Language:");
            egui::ComboBox::from_id_salt("setup_locale")
                .selected_text(ui_config.locale.name())
                .show_ui(ui, |ui| {
                    for locale in Locale::ALL {
                        ui.selectable_value(&mut ui_config.locale, locale, locale.name());
                    }
                });
            ui.end_row();

            ui.label("Rows per page:");
            ui.add(egui::Slider::new(&mut ui_config.page_size, 5..=200));
            ui.end_row();

            ui.label("Notification time (s):");
            ui.add(egui::Slider::new(&mut ui_config.toast_secs, 1..=60));
            ui.end_row();

            ui.label("Theme:");
            ui.checkbox(&mut ui_config.dark_mode, "Dark mode");
            ui.end_row();
        });

    if let Err(e) = wizard.config.validate() {
        ui.add_space(10.0);
        ui.colored_label(Color32::from_rgb(255, 100, 100), e.to_string());
    }
}

fn show_confirmation_step(ui: &mut egui::Ui, wizard: &SetupWizard, path: &std::path::Path) {
    ui.label("Review your configuration:");
    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("API");
        ui.label(format!("  {}", wizard.config.api.base_url));
        ui.label(format!(
            "  Token: {}",
            if wizard.config.api.token.trim().is_empty() {
                "Not set"
            } else {
                "Set"
            }
        ));
        ui.label(format!("  Timeout: {} seconds", wizard.config.api.timeout_secs));
    });

    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Preferences");
        ui.label(format!("  Language: {}", wizard.config.ui.locale.name()));
        ui.label(format!("  Rows per page: {}", wizard.config.ui.page_size));
        ui.label(format!(
            "  Theme: {}",
            if wizard.config.ui.dark_mode { "Dark" } else { "Light" }
        ));
    });

    ui.add_space(20.0);
    ui.label(format!("Config file: {}", path.display()));
    ui.label("Click 'Save & Exit' to save and close the wizard.");
    ui.label("You will need to restart the application after setup.");
}

/// Reach the API and check that the token is accepted.
pub(crate) async fn test_api_connection(client: &ApiClient) -> crate::Result<()> {
    client.ping().await?;

    if !client.has_token() {
        return Err(AppError::Unauthorized("Access token is empty".to_string()));
    }

    api::dashboard::stats(client).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_step_requires_successful_test() {
        let mut wizard = SetupWizard::new();
        assert!(wizard.can_proceed());

        wizard.current_step = 1;
        assert!(!wizard.can_proceed());

        wizard.api_test_state = ConnectionTestState::Success;
        assert!(wizard.can_proceed());

        wizard.connection_changed();
        assert!(!wizard.can_proceed());
    }

    #[test]
    fn test_preferences_step_validates_config() {
        let mut wizard = SetupWizard::new();
        wizard.current_step = 2;
        assert!(wizard.can_proceed());

        wizard.config.ui.page_size = 1;
        assert!(!wizard.can_proceed());
    }

    #[tokio::test]
    async fn test_connection_check_rejects_bad_token() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/superadmin/dashboard/stats"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "Invalid token"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::build(&format!("{}/api", server.uri()), Some("stale"), 5).unwrap();
        let err = test_api_connection(&client).await.unwrap_err();
        assert!(err.is_auth());

        let anonymous = ApiClient::build(&format!("{}/api", server.uri()), None, 5).unwrap();
        assert!(test_api_connection(&anonymous).await.unwrap_err().is_auth());
    }

    #[test]
    fn test_with_config_prefills_timeout() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 45;
        let wizard = SetupWizard::with_config(config);
        assert_eq!(wizard.timeout_input, "45");
    }
}
