//! GUI panels and application state.

pub mod app;
pub mod audit_panel;
pub mod billing_panel;
pub mod calendar_panel;
pub mod components;
pub mod create_school_panel;
pub mod dashboard;
pub mod mfa_panel;
pub mod onboarding_panel;
pub mod parent_requests_panel;
pub mod reports_panel;
pub mod roles_panel;
pub mod school_admins_panel;
pub mod school_parent_requests_panel;
pub mod security_panel;
pub mod setup_wizard;
pub mod sso_panel;
pub mod trial_signup_panel;

pub use app::{App, apply_theme};
pub use setup_wizard::{SetupApp, SetupWizard};
