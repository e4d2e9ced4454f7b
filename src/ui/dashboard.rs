//! Dashboard panel with platform stats and navigation cards.

use eframe::egui::{self, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{
    BUILDINGS, CALENDAR, CHART_BAR, CHATS, CREDIT_CARD, FINGERPRINT, KEY, LIST_CHECKS, LOCK, ROCKET_LAUNCH,
    SHIELD_CHECK, USER_GEAR, USER_PLUS, USERS,
};

use super::app::{App, Panel};
use super::components::{colors, dashboard_card};
use crate::i18n::Msg;
use crate::models::DashboardStats;

#[derive(Default)]
pub struct DashboardState {
    pub stats: Option<DashboardStats>,
    pub loading: bool,
}

/// Navigation cards: target, title, description, icon.
const CARDS: [(Panel, &str, &str, &str); 14] = [
    (Panel::CreateSchool, "Create School", "Provision a new tenant", BUILDINGS),
    (Panel::Billing, "Billing", "Plans and balances", CREDIT_CARD),
    (Panel::SchoolAdminsList, "School Admins", "Manage tenant admins", USER_GEAR),
    (Panel::OnboardingRequests, "Onboarding", "Approve new schools", LIST_CHECKS),
    (Panel::TrialSignup, "Trial Signup", "Public signup form", ROCKET_LAUNCH),
    (Panel::ParentRequests, "Parent Requests", "Platform-wide queue", CHATS),
    (Panel::SchoolParentRequests, "By School", "Requests per school", USERS),
    (Panel::Calendar, "Calendar", "School events", CALENDAR),
    (Panel::ReportsCenter, "Reports", "Generate & export", CHART_BAR),
    (Panel::RolesList, "Roles", "Permissions", USER_PLUS),
    (Panel::SecuritySettings, "Security", "Password & lockout policy", SHIELD_CHECK),
    (Panel::SsoSettings, "SSO", "Identity providers", KEY),
    (Panel::MfaSettings, "MFA", "Two-factor for your account", FINGERPRINT),
    (Panel::AuditLogs, "Audit Logs", "Who did what", LOCK),
];

/// Show the dashboard panel.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;

    ScrollArea::vertical().id_salt("dashboard_scroll").show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);

            ui.label(RichText::new("School Admin Console").size(32.0).strong());
            ui.add_space(5.0);
            ui.label(RichText::new("Platform administration").size(14.0).weak());

            ui.add_space(30.0);
        });

        show_stats(app, ui);

        ui.add_space(30.0);

        // Navigation cards, wrapped into centered rows
        let available = ui.available_width();
        let spacing = 20.0;
        let per_row = ((available + spacing) / (180.0 + spacing)).floor().clamp(2.0, 5.0) as usize;
        let card_width = ((available - spacing * (per_row as f32 - 1.0)) / per_row as f32).clamp(150.0, 230.0);
        let card_size = egui::vec2(card_width, card_width * 0.7);

        for row in CARDS.chunks(per_row) {
            let row_width = card_width * row.len() as f32 + spacing * (row.len() as f32 - 1.0);
            let start_offset = ((available - row_width) / 2.0).max(0.0);

            ui.horizontal(|ui| {
                ui.add_space(start_offset);
                for (i, (panel, title, desc, icon)) in row.iter().enumerate() {
                    if i > 0 {
                        ui.add_space(spacing);
                    }
                    if dashboard_card(ui, title, desc, icon, card_size).clicked() {
                        next_panel = Some(*panel);
                    }
                }
            });
            ui.add_space(spacing);
        }
    });

    next_panel
}

fn show_stats(app: &mut App, ui: &mut Ui) {
    let Some(stats) = &app.dashboard.stats else {
        ui.vertical_centered(|ui| {
            if app.dashboard.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(app.tr(Msg::Loading));
                });
            } else if ui.button("Reload stats").clicked() {
                app.load_stats();
            }
        });
        return;
    };

    let revenue = format!("{:.2}", stats.monthly_revenue);
    let cards = [
        ("Schools", stats.total_schools.to_string(), "On the platform"),
        ("Active", stats.active_schools.to_string(), "Paying tenants"),
        ("Trials", stats.trial_schools.to_string(), "In trial period"),
        ("Onboarding", stats.pending_onboarding.to_string(), "Awaiting approval"),
        ("Parent Requests", stats.pending_parent_requests.to_string(), "Pending"),
        ("Monthly Revenue", revenue, "Recurring"),
    ];

    ui.horizontal_wrapped(|ui| {
        let available = ui.available_width();
        let start_offset = ((available - 6.0 * 170.0) / 2.0).max(0.0);
        ui.add_space(start_offset);

        for (title, value, subtitle) in &cards {
            stat_card(ui, title, value, subtitle);
        }
    });

    if stats.pending_onboarding > 0 {
        ui.vertical_centered(|ui| {
            ui.colored_label(
                colors::WARNING,
                format!("{} onboarding request(s) waiting for review", stats.pending_onboarding),
            );
        });
    }
}

/// Render a stat card with title, value, and subtitle.
fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(130.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}
