//! Main application UI.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use eframe::egui::{self, Align, Layout};
use tokio::sync::mpsc;

use crate::api;
use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::export;
use crate::i18n::{Locale, Msg, tr};
use crate::models::{
    AuditLogEntry, BalanceCredit, CreateEvent, CreateSchool, CreateSchoolAdmin, DashboardStats, MfaSetup, MfaStatus,
    OnboardResponse, OnboardingRequest, ParentRequest, Plan, Report, RequestStatus, Role, RoleInput, School,
    SchoolAdmin, SchoolEvent, SecurityPolicy, SsoConfig, TrialSignup, UpdateRequestStatus, UpdateSchoolAdmin,
};
use crate::toast::Toasts;

use super::components::{self, colors};
use super::{
    audit_panel, billing_panel, calendar_panel, create_school_panel, dashboard, mfa_panel, onboarding_panel,
    parent_requests_panel, reports_panel, roles_panel, school_admins_panel, school_parent_requests_panel,
    security_panel, setup_wizard, sso_panel, trial_signup_panel,
};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Billing,
    Calendar,
    CreateSchool,
    MfaSettings,
    OnboardingRequests,
    ParentRequests,
    ReportsCenter,
    RolesList,
    SchoolAdminsList,
    SchoolParentRequests,
    SecuritySettings,
    SsoSettings,
    TrialSignup,
    AuditLogs,
}

impl Panel {
    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Billing => "Billing",
            Panel::Calendar => "Calendar",
            Panel::CreateSchool => "Create School",
            Panel::MfaSettings => "MFA Settings",
            Panel::OnboardingRequests => "Onboarding Requests",
            Panel::ParentRequests => "Parent Requests",
            Panel::ReportsCenter => "Reports Center",
            Panel::RolesList => "Roles",
            Panel::SchoolAdminsList => "School Admins",
            Panel::SchoolParentRequests => "School Parent Requests",
            Panel::SecuritySettings => "Security Settings",
            Panel::SsoSettings => "SSO Settings",
            Panel::TrialSignup => "Trial Signup",
            Panel::AuditLogs => "Audit Logs",
        }
    }
}

/// API reachability as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    #[default]
    Unknown,
    Checking,
    Online,
    Offline,
    Unauthorized,
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    StatsLoaded(Result<DashboardStats>),

    // Billing and schools
    AccountsLoaded(Result<Vec<School>>),
    PlansLoaded(Panel, Result<Vec<Plan>>),
    AccountUpdated(Msg, Result<()>),
    SchoolCreated(CreateSchool, Result<()>),
    SchoolsLoaded(Panel, Result<Vec<School>>),

    // Calendar
    EventsLoaded(chrono::NaiveDate, Result<Vec<SchoolEvent>>),
    EventCreated(Result<()>),
    EventDeleted(String, Result<()>),

    // Onboarding
    OnboardingLoaded(Result<Vec<OnboardingRequest>>),
    OnboardingDecided(Msg, Result<()>),
    TrialSubmitted(Result<OnboardResponse>),

    // Parent requests
    ParentRequestsLoaded(Result<Vec<ParentRequest>>),
    SchoolParentRequestsLoaded(String, Result<Vec<ParentRequest>>),
    ParentRequestUpdated(Result<()>),

    ReportGenerated(Result<Report>),

    // Roles and admins
    RolesLoaded(Result<Vec<Role>>),
    RoleSaved(Result<()>),
    RoleDeleted(String, Result<()>),
    AdminsLoaded(String, Result<Vec<SchoolAdmin>>),
    AdminSaved(String, Msg, Result<()>),
    AdminDeleted(String, Result<()>),

    // Security
    PolicyLoaded(Result<SecurityPolicy>),
    PolicySaved(Result<()>),
    SsoLoaded(Result<SsoConfig>),
    SsoSaved(Result<()>),
    MfaStatusLoaded(Result<MfaStatus>),
    MfaSetupStarted(Result<MfaSetup>),
    MfaChanged(Msg, Result<()>),

    AuditLoaded(Result<Vec<AuditLogEntry>>),

    // Connection checks
    PingResult(Result<()>),
    ConnectionTested(Result<()>),
}

/// Record awaiting delete confirmation.
#[derive(Debug, Clone)]
pub enum DeleteTarget {
    Event(String, String),
    Role(String, String),
    Admin { school_id: String, admin_id: String, name: String },
}

/// Settings dialog inputs.
#[derive(Default)]
struct SettingsDialog {
    open: bool,
    url_input: String,
    token_input: String,
    timeout_input: String,
    locale: Locale,
    page_size: usize,
    dark_mode: bool,
    testing: bool,
    test_status: Option<std::result::Result<(), String>>,
}

/// Main application state.
pub struct App {
    rt: tokio::runtime::Runtime,
    api: ApiClient,
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,

    pub config: AppConfig,
    config_path: PathBuf,

    pub current_panel: Panel,
    pub api_status: ApiStatus,
    pending: usize,
    pub toasts: Toasts,

    // Per-panel view state, rebuilt each time the panel opens
    pub dashboard: dashboard::DashboardState,
    pub billing: billing_panel::BillingState,
    pub calendar: calendar_panel::CalendarState,
    pub create_school: create_school_panel::CreateSchoolState,
    pub mfa: mfa_panel::MfaState,
    pub onboarding: onboarding_panel::OnboardingState,
    pub parent_requests: parent_requests_panel::ParentRequestsState,
    pub reports: reports_panel::ReportsState,
    pub roles: roles_panel::RolesState,
    pub school_admins: school_admins_panel::SchoolAdminsState,
    pub school_requests: school_parent_requests_panel::SchoolRequestsState,
    pub security: security_panel::SecurityState,
    pub sso: sso_panel::SsoState,
    pub trial: trial_signup_panel::TrialSignupState,
    pub audit: audit_panel::AuditState,

    // Delete confirmation
    pub delete_target: Option<DeleteTarget>,

    settings: SettingsDialog,
}

impl App {
    pub fn new(api: ApiClient, config: AppConfig, config_path: PathBuf, rt: tokio::runtime::Runtime) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let page_size = config.ui.page_size;
        let toasts = Toasts::new(Duration::from_secs(config.ui.toast_secs));

        let mut app = Self {
            rt,
            api,
            tx,
            rx,
            config,
            config_path,
            current_panel: Panel::default(),
            api_status: ApiStatus::Unknown,
            pending: 0,
            toasts,
            dashboard: Default::default(),
            billing: billing_panel::BillingState::new(page_size),
            calendar: Default::default(),
            create_school: Default::default(),
            mfa: Default::default(),
            onboarding: onboarding_panel::OnboardingState::new(page_size),
            parent_requests: parent_requests_panel::ParentRequestsState::new(page_size),
            reports: Default::default(),
            roles: roles_panel::RolesState::new(page_size),
            school_admins: school_admins_panel::SchoolAdminsState::new(page_size),
            school_requests: school_parent_requests_panel::SchoolRequestsState::new(page_size),
            security: Default::default(),
            sso: Default::default(),
            trial: Default::default(),
            audit: audit_panel::AuditState::new(page_size),
            delete_target: None,
            settings: SettingsDialog::default(),
        };

        app.ping();
        app.load_stats();

        app
    }

    /// Localized text for a message key.
    pub fn tr(&self, msg: Msg) -> &'static str {
        tr(self.config.ui.locale, msg)
    }

    pub fn page_size(&self) -> usize {
        self.config.ui.page_size
    }

    /// Whether any request is still in flight.
    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }

    /// Switch panels, rebuilding the target panel's state and starting its loads.
    pub fn navigate(&mut self, panel: Panel) {
        tracing::info!("Opening panel: {}", panel.name());
        self.current_panel = panel;
        self.delete_target = None;

        let page_size = self.page_size();
        match panel {
            Panel::Dashboard => {
                self.dashboard = Default::default();
                self.load_stats();
            }
            Panel::Billing => {
                self.billing = billing_panel::BillingState::new(page_size);
                self.load_billing();
            }
            Panel::Calendar => {
                self.calendar = Default::default();
                self.load_events();
            }
            Panel::CreateSchool => {
                self.create_school = Default::default();
                self.load_plans(Panel::CreateSchool);
            }
            Panel::MfaSettings => {
                self.mfa = Default::default();
                self.load_mfa_status();
            }
            Panel::OnboardingRequests => {
                self.onboarding = onboarding_panel::OnboardingState::new(page_size);
                self.load_onboarding();
            }
            Panel::ParentRequests => {
                self.parent_requests = parent_requests_panel::ParentRequestsState::new(page_size);
                self.load_parent_requests();
            }
            Panel::ReportsCenter => {
                self.reports = Default::default();
            }
            Panel::RolesList => {
                self.roles = roles_panel::RolesState::new(page_size);
                self.load_roles();
            }
            Panel::SchoolAdminsList => {
                self.school_admins = school_admins_panel::SchoolAdminsState::new(page_size);
                self.load_schools(Panel::SchoolAdminsList);
            }
            Panel::SchoolParentRequests => {
                self.school_requests = school_parent_requests_panel::SchoolRequestsState::new(page_size);
                self.load_schools(Panel::SchoolParentRequests);
            }
            Panel::SecuritySettings => {
                self.security = Default::default();
                self.load_policy();
            }
            Panel::SsoSettings => {
                self.sso = Default::default();
                self.load_sso();
            }
            Panel::TrialSignup => {
                self.trial = Default::default();
            }
            Panel::AuditLogs => {
                self.audit = audit_panel::AuditState::new(page_size);
                self.load_audit();
            }
        }
    }

    /// Run an API call on the runtime and post its result back as a message.
    fn spawn<T, F, M>(&mut self, fut: F, into_msg: M)
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
        M: FnOnce(Result<T>) -> UiMessage + Send + 'static,
    {
        let tx = self.tx.clone();
        self.pending += 1;
        self.rt.spawn(async move {
            let _ = tx.send(into_msg(fut.await));
        });
    }

    /// Check that the API answers.
    pub fn ping(&mut self) {
        self.api_status = ApiStatus::Checking;
        let client = self.api.clone();
        self.spawn(async move { client.ping().await }, UiMessage::PingResult);
    }

    pub fn load_stats(&mut self) {
        self.dashboard.loading = true;
        let client = self.api.clone();
        self.spawn(async move { api::dashboard::stats(&client).await }, UiMessage::StatsLoaded);
    }

    pub fn load_billing(&mut self) {
        self.billing.loading = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::billing::list_accounts(&client).await },
            UiMessage::AccountsLoaded,
        );
        self.load_plans(Panel::Billing);
    }

    pub fn load_plans(&mut self, target: Panel) {
        let client = self.api.clone();
        self.spawn(async move { api::school::list_plans(&client).await }, move |r| {
            UiMessage::PlansLoaded(target, r)
        });
    }

    pub fn change_plan(&mut self, school_id: String, plan_id: String) {
        tracing::info!("Changing plan of school {} to {}", school_id, plan_id);
        self.billing.submitting = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::billing::change_plan(&client, &school_id, &plan_id).await },
            |r| UiMessage::AccountUpdated(Msg::PlanChanged, r),
        );
    }

    pub fn record_credit(&mut self, school_id: String, credit: BalanceCredit) {
        tracing::info!("Recording credit of {:.2} for school {}", credit.amount, school_id);
        self.billing.submitting = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::billing::record_credit(&client, &school_id, &credit).await },
            |r| UiMessage::AccountUpdated(Msg::CreditRecorded, r),
        );
    }

    pub fn create_school(&mut self, data: CreateSchool) {
        tracing::info!("Creating school: {}", data.name);
        self.create_school.submitting = true;
        let client = self.api.clone();
        let request = data.clone();
        self.spawn(async move { api::school::create(&client, &data).await }, move |r| {
            UiMessage::SchoolCreated(request, r)
        });
    }

    /// Load the school picker of a panel.
    pub fn load_schools(&mut self, target: Panel) {
        match target {
            Panel::SchoolAdminsList => self.school_admins.loading = true,
            Panel::SchoolParentRequests => self.school_requests.loading = true,
            _ => {}
        }
        let client = self.api.clone();
        self.spawn(async move { api::school::list_all(&client).await }, move |r| {
            UiMessage::SchoolsLoaded(target, r)
        });
    }

    /// Load events of the calendar's visible month.
    pub fn load_events(&mut self) {
        self.calendar.loading = true;
        let month = self.calendar.month;
        let (from, to) = calendar_panel::month_bounds(month);
        let client = self.api.clone();
        self.spawn(
            async move { api::calendar::list_range(&client, from, to).await },
            move |r| UiMessage::EventsLoaded(month, r),
        );
    }

    pub fn create_event(&mut self, data: CreateEvent) {
        tracing::info!("Creating event '{}' on {}", data.title, data.date);
        self.calendar.submitting = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::calendar::create(&client, &data).await },
            UiMessage::EventCreated,
        );
    }

    fn delete_event(&mut self, id: String) {
        let client = self.api.clone();
        let event_id = id.clone();
        self.spawn(async move { api::calendar::delete(&client, &event_id).await }, move |r| {
            UiMessage::EventDeleted(id, r)
        });
    }

    pub fn load_mfa_status(&mut self) {
        self.mfa.loading = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::security::mfa_status(&client).await },
            UiMessage::MfaStatusLoaded,
        );
    }

    pub fn start_mfa_setup(&mut self) {
        self.mfa.submitting = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::security::mfa_setup(&client).await },
            UiMessage::MfaSetupStarted,
        );
    }

    pub fn enable_mfa(&mut self, code: String) {
        self.mfa.submitting = true;
        let client = self.api.clone();
        self.spawn(async move { api::security::mfa_enable(&client, &code).await }, |r| {
            UiMessage::MfaChanged(Msg::MfaEnabled, r)
        });
    }

    pub fn disable_mfa(&mut self, code: String) {
        self.mfa.submitting = true;
        let client = self.api.clone();
        self.spawn(async move { api::security::mfa_disable(&client, &code).await }, |r| {
            UiMessage::MfaChanged(Msg::MfaDisabled, r)
        });
    }

    pub fn load_onboarding(&mut self) {
        self.onboarding.loading = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::onboarding::list_requests(&client).await },
            UiMessage::OnboardingLoaded,
        );
    }

    pub fn approve_onboarding(&mut self, id: String) {
        tracing::info!("Approving onboarding request {}", id);
        self.onboarding.busy_id = Some(id.clone());
        let client = self.api.clone();
        self.spawn(async move { api::onboarding::approve(&client, &id).await }, |r| {
            UiMessage::OnboardingDecided(Msg::RequestApproved, r)
        });
    }

    pub fn reject_onboarding(&mut self, id: String, reason: String) {
        tracing::info!("Rejecting onboarding request {}", id);
        self.onboarding.busy_id = Some(id.clone());
        let client = self.api.clone();
        self.spawn(
            async move { api::onboarding::reject(&client, &id, &reason).await },
            |r| UiMessage::OnboardingDecided(Msg::RequestRejected, r),
        );
    }

    pub fn submit_trial(&mut self, signup: TrialSignup) {
        tracing::info!("Submitting trial signup for {}", signup.school_name);
        self.trial.submitting = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::onboarding::submit_trial(&client, &signup).await },
            UiMessage::TrialSubmitted,
        );
    }

    pub fn load_parent_requests(&mut self) {
        self.parent_requests.loading = true;
        let status = self.parent_requests.status_filter;
        let client = self.api.clone();
        self.spawn(
            async move { api::parent_request::list_all(&client, status).await },
            UiMessage::ParentRequestsLoaded,
        );
    }

    pub fn load_school_parent_requests(&mut self, school_id: String) {
        self.school_requests.loading = true;
        let client = self.api.clone();
        let id = school_id.clone();
        self.spawn(
            async move { api::parent_request::list_for_school(&client, &id).await },
            move |r| UiMessage::SchoolParentRequestsLoaded(school_id, r),
        );
    }

    pub fn update_parent_request(&mut self, id: String, status: RequestStatus) {
        tracing::info!("Setting parent request {} to {}", id, status.name());
        let client = self.api.clone();
        let update = UpdateRequestStatus { status, note: None };
        self.spawn(
            async move { api::parent_request::update_status(&client, &id, &update).await },
            UiMessage::ParentRequestUpdated,
        );
    }

    /// Reload whichever parent request list is on screen.
    fn refresh_parent_requests(&mut self) {
        match self.current_panel {
            Panel::ParentRequests => self.load_parent_requests(),
            Panel::SchoolParentRequests => {
                if let Some(school_id) = self.school_requests.selected.clone() {
                    self.load_school_parent_requests(school_id);
                }
            }
            _ => {}
        }
    }

    pub fn generate_report(&mut self) {
        let Some(query) = self.reports.query() else {
            self.toasts.warning(self.tr(Msg::RequiredField));
            return;
        };
        tracing::info!("Generating {} report", query.report_type.slug());
        self.reports.loading = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::report::generate(&client, &query).await },
            UiMessage::ReportGenerated,
        );
    }

    pub fn load_roles(&mut self) {
        self.roles.loading = true;
        let client = self.api.clone();
        self.spawn(async move { api::role::list_all(&client).await }, UiMessage::RolesLoaded);
    }

    pub fn save_role(&mut self, id: Option<String>, data: RoleInput) {
        tracing::info!("Saving role: {}", data.name);
        self.roles.submitting = true;
        let client = self.api.clone();
        self.spawn(
            async move {
                match id {
                    Some(id) => api::role::update(&client, &id, &data).await,
                    None => api::role::create(&client, &data).await,
                }
            },
            UiMessage::RoleSaved,
        );
    }

    fn delete_role(&mut self, id: String) {
        let client = self.api.clone();
        let role_id = id.clone();
        self.spawn(async move { api::role::delete(&client, &role_id).await }, move |r| {
            UiMessage::RoleDeleted(id, r)
        });
    }

    pub fn load_admins(&mut self, school_id: String) {
        self.school_admins.loading = true;
        let client = self.api.clone();
        let id = school_id.clone();
        self.spawn(
            async move { api::school_admin::list_for_school(&client, &id).await },
            move |r| UiMessage::AdminsLoaded(school_id, r),
        );
    }

    pub fn create_admin(&mut self, school_id: String, data: CreateSchoolAdmin) {
        tracing::info!("Adding admin {} to school {}", data.email, school_id);
        self.school_admins.submitting = true;
        let client = self.api.clone();
        let id = school_id.clone();
        self.spawn(
            async move { api::school_admin::create(&client, &id, &data).await },
            move |r| UiMessage::AdminSaved(school_id, Msg::AdminCreated, r),
        );
    }

    pub fn set_admin_active(&mut self, school_id: String, admin_id: String, is_active: bool) {
        let client = self.api.clone();
        let update = UpdateSchoolAdmin {
            is_active: Some(is_active),
        };
        let id = school_id.clone();
        self.spawn(
            async move { api::school_admin::update(&client, &id, &admin_id, &update).await },
            move |r| UiMessage::AdminSaved(school_id, Msg::AdminUpdated, r),
        );
    }

    fn delete_admin(&mut self, school_id: String, admin_id: String) {
        let client = self.api.clone();
        let id = admin_id.clone();
        self.spawn(
            async move { api::school_admin::delete(&client, &school_id, &id).await },
            move |r| UiMessage::AdminDeleted(admin_id, r),
        );
    }

    pub fn load_policy(&mut self) {
        self.security.loading = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::security::get_policy(&client).await },
            UiMessage::PolicyLoaded,
        );
    }

    pub fn save_policy(&mut self, policy: SecurityPolicy) {
        tracing::info!("Saving security policy");
        self.security.saving = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::security::update_policy(&client, &policy).await },
            UiMessage::PolicySaved,
        );
    }

    pub fn load_sso(&mut self) {
        self.sso.loading = true;
        let client = self.api.clone();
        self.spawn(async move { api::security::get_sso(&client).await }, UiMessage::SsoLoaded);
    }

    pub fn save_sso(&mut self, config: SsoConfig) {
        tracing::info!("Saving SSO config ({} providers)", config.providers.len());
        self.sso.saving = true;
        let client = self.api.clone();
        self.spawn(
            async move { api::security::update_sso(&client, &config).await },
            UiMessage::SsoSaved,
        );
    }

    pub fn load_audit(&mut self) {
        self.audit.loading = true;
        let query = self.audit.query();
        let client = self.api.clone();
        self.spawn(async move { api::audit::list(&client, &query).await }, UiMessage::AuditLoaded);
    }

    /// Export the billing table to Excel.
    pub fn export_billing(&mut self) {
        let filename = export::generate_export_filename("billing");
        let Some(path) = export::show_save_dialog(&filename) else {
            return;
        };
        let result = export::export_schools_to_excel(&self.billing.schools, &path);
        self.finish_export(result, &path);
    }

    /// Export the generated report to Excel.
    pub fn export_report(&mut self) {
        let Some(report) = &self.reports.report else {
            self.toasts.warning(self.tr(Msg::NoData));
            return;
        };
        let filename = export::generate_export_filename(self.reports.report_type.slug());
        let Some(path) = export::show_save_dialog(&filename) else {
            return;
        };
        let result = export::export_report_to_excel(report, &path);
        self.finish_export(result, &path);
    }

    /// Export the loaded audit entries to Excel.
    pub fn export_audit(&mut self) {
        if self.audit.entries.is_empty() {
            self.toasts.warning(self.tr(Msg::NoData));
            return;
        }
        let filename = export::generate_export_filename("audit_log");
        let Some(path) = export::show_save_dialog(&filename) else {
            return;
        };
        let result = export::export_audit_logs_to_excel(&self.audit.entries, &path);
        self.finish_export(result, &path);
    }

    fn finish_export(&mut self, result: std::result::Result<(), rust_xlsxwriter::XlsxError>, path: &std::path::Path) {
        match result {
            Ok(()) => {
                tracing::info!("Exported to {}", path.display());
                self.toasts
                    .success(format!("{}: {}", self.tr(Msg::ExportCompleted), path.display()));
            }
            Err(e) => self.report_error(Msg::ExportFailed, AppError::from(e)),
        }
    }

    /// Log a failure and show it as a toast.
    pub fn report_error(&mut self, msg: Msg, err: AppError) {
        tracing::error!("{}: {}", tr(Locale::En, msg), err);
        if err.is_auth() {
            self.api_status = ApiStatus::Unauthorized;
            self.toasts.error(self.tr(Msg::Unauthorized));
        }
        self.toasts.error(format!("{}: {}", self.tr(msg), err));
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            self.handle_message(msg);
        }
    }

    fn handle_message(&mut self, msg: UiMessage) {
        match msg {
            UiMessage::StatsLoaded(result) => {
                self.dashboard.loading = false;
                match result {
                    Ok(stats) => self.dashboard.stats = Some(stats),
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::AccountsLoaded(result) => {
                self.billing.loading = false;
                match result {
                    Ok(schools) => {
                        tracing::info!("Loaded {} school accounts", schools.len());
                        self.billing.schools = schools;
                    }
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::PlansLoaded(target, result) => match result {
                Ok(plans) => match target {
                    Panel::CreateSchool => self.create_school.set_plans(plans),
                    _ => self.billing.plans = plans,
                },
                Err(e) => self.report_error(Msg::LoadFailed, e),
            },
            UiMessage::AccountUpdated(msg, result) => {
                self.billing.submitting = false;
                match result {
                    Ok(()) => {
                        self.toasts.success(self.tr(msg));
                        self.billing.dialog = None;
                        self.load_billing();
                    }
                    Err(e) => self.report_error(Msg::SaveFailed, e),
                }
            }
            UiMessage::SchoolCreated(school, result) => {
                self.create_school.submitting = false;
                match result {
                    Ok(()) => {
                        tracing::info!("School created: {} ({})", school.name, school.subdomain);
                        self.toasts.success(format!("{}: {}", self.tr(Msg::SchoolCreated), school.name));
                        self.create_school.reset_form();
                        self.create_school.created = Some(school);
                    }
                    Err(e) => self.report_error(Msg::SaveFailed, e),
                }
            }
            UiMessage::SchoolsLoaded(target, result) => {
                match target {
                    Panel::SchoolAdminsList => self.school_admins.loading = false,
                    Panel::SchoolParentRequests => self.school_requests.loading = false,
                    _ => {}
                }
                match result {
                    Ok(schools) => match target {
                        Panel::SchoolAdminsList => self.school_admins.schools = schools,
                        Panel::SchoolParentRequests => self.school_requests.schools = schools,
                        _ => {}
                    },
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::EventsLoaded(month, result) => {
                // Replies for a month the user already left are dropped
                if month != self.calendar.month {
                    return;
                }
                self.calendar.loading = false;
                match result {
                    Ok(events) => self.calendar.events = events,
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::EventCreated(result) => {
                self.calendar.submitting = false;
                match result {
                    Ok(()) => {
                        self.toasts.success(self.tr(Msg::EventCreated));
                        self.calendar.form = None;
                        self.load_events();
                    }
                    Err(e) => self.report_error(Msg::SaveFailed, e),
                }
            }
            UiMessage::EventDeleted(id, result) => match result {
                Ok(()) => {
                    self.calendar.events.retain(|e| e.id != id);
                    self.toasts.success(self.tr(Msg::EventDeleted));
                }
                Err(e) => self.report_error(Msg::SaveFailed, e),
            },
            UiMessage::OnboardingLoaded(result) => {
                self.onboarding.loading = false;
                match result {
                    Ok(requests) => self.onboarding.requests = requests,
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::OnboardingDecided(msg, result) => {
                self.onboarding.busy_id = None;
                match result {
                    Ok(()) => {
                        self.toasts.success(self.tr(msg));
                        self.onboarding.reject = None;
                        self.load_onboarding();
                    }
                    Err(e) => self.report_error(Msg::SaveFailed, e),
                }
            }
            UiMessage::TrialSubmitted(result) => {
                self.trial.submitting = false;
                match result {
                    Ok(response) => {
                        self.toasts.success(self.tr(Msg::SignupSubmitted));
                        self.trial.submitted = Some(response);
                    }
                    Err(e) => self.report_error(Msg::SaveFailed, e),
                }
            }
            UiMessage::ParentRequestsLoaded(result) => {
                self.parent_requests.loading = false;
                match result {
                    Ok(requests) => self.parent_requests.requests = requests,
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::SchoolParentRequestsLoaded(school_id, result) => {
                if self.school_requests.selected.as_deref() != Some(school_id.as_str()) {
                    return;
                }
                self.school_requests.loading = false;
                match result {
                    Ok(requests) => self.school_requests.requests = requests,
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::ParentRequestUpdated(result) => match result {
                Ok(()) => {
                    self.toasts.success(self.tr(Msg::StatusUpdated));
                    self.refresh_parent_requests();
                }
                Err(e) => self.report_error(Msg::SaveFailed, e),
            },
            UiMessage::ReportGenerated(result) => {
                self.reports.loading = false;
                match result {
                    Ok(report) => {
                        tracing::info!("Report '{}' has {} rows", report.title, report.rows.len());
                        self.toasts.success(self.tr(Msg::ReportGenerated));
                        self.reports.set_report(report, self.config.ui.page_size);
                    }
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::RolesLoaded(result) => {
                self.roles.loading = false;
                match result {
                    Ok(roles) => self.roles.roles = roles,
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::RoleSaved(result) => {
                self.roles.submitting = false;
                match result {
                    Ok(()) => {
                        self.toasts.success(self.tr(Msg::RoleSaved));
                        self.roles.form = None;
                        self.load_roles();
                    }
                    Err(e) => self.report_error(Msg::SaveFailed, e),
                }
            }
            UiMessage::RoleDeleted(id, result) => match result {
                Ok(()) => {
                    self.roles.roles.retain(|r| r.id != id);
                    self.toasts.success(self.tr(Msg::RoleDeleted));
                }
                Err(e) => self.report_error(Msg::SaveFailed, e),
            },
            UiMessage::AdminsLoaded(school_id, result) => {
                if self.school_admins.selected.as_deref() != Some(school_id.as_str()) {
                    return;
                }
                self.school_admins.loading = false;
                match result {
                    Ok(admins) => self.school_admins.admins = admins,
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::AdminSaved(school_id, msg, result) => {
                self.school_admins.submitting = false;
                match result {
                    Ok(()) => {
                        self.toasts.success(self.tr(msg));
                        // The admin list on screen may belong to another school by now
                        if self.school_admins.selected.as_deref() != Some(school_id.as_str()) {
                            return;
                        }
                        if msg == Msg::AdminCreated {
                            self.school_admins.form = None;
                        }
                        self.load_admins(school_id);
                    }
                    Err(e) => self.report_error(Msg::SaveFailed, e),
                }
            }
            UiMessage::AdminDeleted(id, result) => match result {
                Ok(()) => {
                    self.school_admins.admins.retain(|a| a.id != id);
                    self.toasts.success(self.tr(Msg::AdminDeleted));
                }
                Err(e) => self.report_error(Msg::SaveFailed, e),
            },
            UiMessage::PolicyLoaded(result) => {
                self.security.loading = false;
                match result {
                    Ok(policy) => self.security.set_policy(policy),
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::PolicySaved(result) => {
                self.security.saving = false;
                match result {
                    Ok(()) => {
                        self.toasts.success(self.tr(Msg::PolicySaved));
                        self.load_policy();
                    }
                    Err(e) => self.report_error(Msg::SaveFailed, e),
                }
            }
            UiMessage::SsoLoaded(result) => {
                self.sso.loading = false;
                match result {
                    Ok(config) => self.sso.set_config(config),
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::SsoSaved(result) => {
                self.sso.saving = false;
                match result {
                    Ok(()) => {
                        self.toasts.success(self.tr(Msg::SsoSaved));
                        self.load_sso();
                    }
                    Err(e) => self.report_error(Msg::SaveFailed, e),
                }
            }
            UiMessage::MfaStatusLoaded(result) => {
                self.mfa.loading = false;
                match result {
                    Ok(status) => self.mfa.status = Some(status),
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::MfaSetupStarted(result) => {
                self.mfa.submitting = false;
                match result {
                    Ok(setup) => {
                        self.toasts.info(self.tr(Msg::MfaSetupStarted));
                        self.mfa.setup = Some(setup);
                    }
                    Err(e) => self.report_error(Msg::SaveFailed, e),
                }
            }
            UiMessage::MfaChanged(msg, result) => {
                self.mfa.submitting = false;
                match result {
                    Ok(()) => {
                        self.toasts.success(self.tr(msg));
                        self.mfa.code.clear();
                        self.mfa.setup = None;
                        self.load_mfa_status();
                    }
                    Err(e) => self.report_error(Msg::SaveFailed, e),
                }
            }
            UiMessage::AuditLoaded(result) => {
                self.audit.loading = false;
                match result {
                    Ok(entries) => {
                        tracing::info!("Loaded {} audit entries", entries.len());
                        self.audit.entries = entries;
                    }
                    Err(e) => self.report_error(Msg::LoadFailed, e),
                }
            }
            UiMessage::PingResult(result) => match result {
                Ok(()) => {
                    if self.api_status != ApiStatus::Unauthorized {
                        self.api_status = ApiStatus::Online;
                    }
                }
                Err(e) => {
                    tracing::warn!("API unreachable: {}", e);
                    self.api_status = ApiStatus::Offline;
                }
            },
            UiMessage::ConnectionTested(result) => {
                self.settings.testing = false;
                self.settings.test_status = Some(result.map_err(|e| e.to_string()));
            }
        }
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                let mut target = None;

                ui.menu_button("Schools", |ui| {
                    for panel in [Panel::Dashboard, Panel::CreateSchool, Panel::Billing, Panel::SchoolAdminsList] {
                        if ui.button(panel.name()).clicked() {
                            target = Some(panel);
                            ui.close();
                        }
                    }
                });
                ui.menu_button("Requests", |ui| {
                    for panel in [
                        Panel::OnboardingRequests,
                        Panel::TrialSignup,
                        Panel::ParentRequests,
                        Panel::SchoolParentRequests,
                        Panel::Calendar,
                    ] {
                        if ui.button(panel.name()).clicked() {
                            target = Some(panel);
                            ui.close();
                        }
                    }
                });
                ui.menu_button("Security", |ui| {
                    for panel in [
                        Panel::RolesList,
                        Panel::SecuritySettings,
                        Panel::SsoSettings,
                        Panel::MfaSettings,
                        Panel::AuditLogs,
                    ] {
                        if ui.button(panel.name()).clicked() {
                            target = Some(panel);
                            ui.close();
                        }
                    }
                });
                ui.menu_button("Reports", |ui| {
                    if ui.button(Panel::ReportsCenter.name()).clicked() {
                        target = Some(Panel::ReportsCenter);
                        ui.close();
                    }
                });
                ui.menu_button("Settings", |ui| {
                    if ui.button("Connection & Preferences").clicked() {
                        self.open_settings();
                        ui.close();
                    }
                    if ui.button("Check Connection").clicked() {
                        self.ping();
                        ui.close();
                    }
                });

                if let Some(panel) = target {
                    self.navigate(panel);
                }
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    let (color, text) = match self.api_status {
                        ApiStatus::Unknown => (colors::NEUTRAL, Msg::StatusNotChecked),
                        ApiStatus::Checking => (colors::WARNING, Msg::StatusChecking),
                        ApiStatus::Online => (colors::SUCCESS, Msg::StatusOnline),
                        ApiStatus::Offline => (colors::ERROR, Msg::StatusOffline),
                        ApiStatus::Unauthorized => (colors::ERROR, Msg::StatusUnauthorized),
                    };

                    if matches!(self.api_status, ApiStatus::Checking) {
                        ui.spinner();
                    }
                    ui.colored_label(color, format!("API: {}", self.tr(text)));
                    ui.label(self.api.base_url());
                    if !self.api.has_token() {
                        ui.colored_label(colors::WARNING, self.tr(Msg::NoToken));
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.current_panel.name());
                        if self.is_busy() {
                            ui.separator();
                            ui.spinner();
                            ui.label(self.tr(Msg::Loading));
                        }
                    });
                });
            });
    }

    fn open_settings(&mut self) {
        self.settings = SettingsDialog {
            open: true,
            url_input: self.config.api.base_url.clone(),
            token_input: self.config.api.token.clone(),
            timeout_input: self.config.api.timeout_secs.to_string(),
            locale: self.config.ui.locale,
            page_size: self.config.ui.page_size,
            dark_mode: self.config.ui.dark_mode,
            testing: false,
            test_status: None,
        };
    }

    /// Test the URL and token typed into the settings dialog.
    fn test_settings_connection(&mut self) {
        let client = match ApiClient::build(&self.settings.url_input, Some(self.settings.token_input.as_str()), 10) {
            Ok(client) => client,
            Err(e) => {
                self.settings.test_status = Some(Err(e.to_string()));
                return;
            }
        };
        self.settings.testing = true;
        self.settings.test_status = None;
        self.spawn(
            async move { setup_wizard::test_api_connection(&client).await },
            UiMessage::ConnectionTested,
        );
    }

    /// Apply the settings dialog: validate, persist, and rebuild the client.
    fn save_settings(&mut self, ctx: &egui::Context) -> bool {
        let mut config = self.config.clone();
        config.api.base_url = self.settings.url_input.trim().to_string();
        config.api.token = self.settings.token_input.trim().to_string();
        config.api.timeout_secs = match self.settings.timeout_input.trim().parse() {
            Ok(secs) => secs,
            Err(_) => {
                self.settings.test_status = Some(Err("Timeout must be a number of seconds".to_string()));
                return false;
            }
        };
        config.ui.locale = self.settings.locale;
        config.ui.page_size = self.settings.page_size;
        config.ui.dark_mode = self.settings.dark_mode;

        if let Err(e) = config.validate() {
            self.settings.test_status = Some(Err(e.to_string()));
            return false;
        }

        let client = match ApiClient::new(&config.api) {
            Ok(client) => client,
            Err(e) => {
                self.settings.test_status = Some(Err(e.to_string()));
                return false;
            }
        };

        if let Err(e) = config.save(&self.config_path) {
            self.report_error(Msg::SaveFailed, AppError::config(e.to_string()));
            return false;
        }

        tracing::info!("Settings saved to {:?}", self.config_path);
        self.api = client;
        self.toasts.set_ttl(Duration::from_secs(config.ui.toast_secs));
        apply_theme(ctx, config.ui.dark_mode);
        self.config = config;
        self.toasts.success(self.tr(Msg::Saved));

        self.ping();
        self.navigate(self.current_panel);
        true
    }

    /// Render connection and preferences dialog.
    fn show_settings_dialog(&mut self, ctx: &egui::Context) {
        if !self.settings.open {
            return;
        }

        let mut open = true;
        let mut test = false;
        let mut save = false;
        let mut cancel = false;
        let testing_text = self.tr(Msg::Testing);
        let ok_text = self.tr(Msg::ConnectionOk);
        let failed_text = self.tr(Msg::ConnectionFailed);

        egui::Window::new("Connection & Preferences")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_space(10.0);

                let dialog = &mut self.settings;
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("API URL:");
                        ui.add(egui::TextEdit::singleline(&mut dialog.url_input).desired_width(300.0));
                        ui.end_row();

                        ui.label("Token:");
                        ui.add(
                            egui::TextEdit::singleline(&mut dialog.token_input)
                                .password(true)
                                .desired_width(300.0),
                        );
                        ui.end_row();

                        ui.label("Timeout (s):");
                        ui.add(egui::TextEdit::singleline(&mut dialog.timeout_input).desired_width(60.0));
                        ui.end_row();

                        ui.label("Language:");
                        egui::ComboBox::from_id_salt("settings_locale")
                            .selected_text(dialog.locale.name())
                            .show_ui(ui, |ui| {
                                for locale in Locale::ALL {
                                    ui.selectable_value(&mut dialog.locale, locale, locale.name());
                                }
                            });
                        ui.end_row();

                        ui.label("Rows per page:");
                        ui.add(egui::Slider::new(&mut dialog.page_size, 5..=200));
                        ui.end_row();

                        ui.label("Dark mode:");
                        ui.checkbox(&mut dialog.dark_mode, "");
                        ui.end_row();
                    });

                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!dialog.testing, egui::Button::new("Test Connection"))
                        .clicked()
                    {
                        test = true;
                    }

                    ui.add_space(10.0);

                    if dialog.testing {
                        ui.spinner();
                        ui.label(testing_text);
                    } else if let Some(result) = &dialog.test_status {
                        match result {
                            Ok(()) => {
                                ui.colored_label(colors::SUCCESS, ok_text);
                            }
                            Err(e) => {
                                ui.colored_label(colors::ERROR, format!("{}: {}", failed_text, e));
                            }
                        }
                    }
                });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Save").clicked() {
                            save = true;
                        }
                    });
                });
            });

        if test {
            self.test_settings_connection();
        }
        if save && self.save_settings(ctx) {
            self.settings.open = false;
        }
        if !open || cancel {
            self.settings.open = false;
        }
    }

    /// Render delete confirmation.
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        let Some(target) = self.delete_target.clone() else {
            return;
        };

        let (title, message) = match &target {
            DeleteTarget::Event(_, title) => ("Delete Event", format!("Delete event '{}'?", title)),
            DeleteTarget::Role(_, name) => ("Delete Role", format!("Delete role '{}'?", name)),
            DeleteTarget::Admin { name, .. } => ("Remove Admin", format!("Remove school admin '{}'?", name)),
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.delete_target = None;
                    }
                    if ui.button("Delete").clicked() {
                        self.confirm_delete();
                    }
                });
            });
    }

    /// Execute the confirmed delete operation.
    fn confirm_delete(&mut self) {
        if let Some(target) = self.delete_target.take() {
            match target {
                DeleteTarget::Event(id, title) => {
                    tracing::info!("Deleting event: {}", title);
                    self.delete_event(id);
                }
                DeleteTarget::Role(id, name) => {
                    tracing::info!("Deleting role: {}", name);
                    self.delete_role(id);
                }
                DeleteTarget::Admin {
                    school_id,
                    admin_id,
                    name,
                } => {
                    tracing::info!("Removing school admin: {}", name);
                    self.delete_admin(school_id, admin_id);
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Request repaint while requests are outstanding
        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);
        self.show_settings_dialog(ctx);
        self.show_dialogs(ctx);
        components::show_toasts(ctx, &mut self.toasts);

        // Main content
        let mut next = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let back = match self.current_panel {
                Panel::Dashboard => {
                    next = dashboard::show(self, ui);
                    false
                }
                Panel::Billing => billing_panel::show(self, ui),
                Panel::Calendar => calendar_panel::show(self, ui),
                Panel::CreateSchool => create_school_panel::show(self, ui),
                Panel::MfaSettings => mfa_panel::show(self, ui),
                Panel::OnboardingRequests => onboarding_panel::show(self, ui),
                Panel::ParentRequests => parent_requests_panel::show(self, ui),
                Panel::ReportsCenter => reports_panel::show(self, ui),
                Panel::RolesList => roles_panel::show(self, ui),
                Panel::SchoolAdminsList => school_admins_panel::show(self, ui),
                Panel::SchoolParentRequests => school_parent_requests_panel::show(self, ui),
                Panel::SecuritySettings => security_panel::show(self, ui),
                Panel::SsoSettings => sso_panel::show(self, ui),
                Panel::TrialSignup => trial_signup_panel::show(self, ui),
                Panel::AuditLogs => audit_panel::show(self, ui),
            };
            if back {
                next = Some(Panel::Dashboard);
            }
        });

        if let Some(panel) = next {
            self.navigate(panel);
        }
    }
}

/// Switch between the dark and light egui themes.
pub fn apply_theme(ctx: &egui::Context, dark_mode: bool) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_names_unique() {
        let panels = [
            Panel::Dashboard,
            Panel::Billing,
            Panel::Calendar,
            Panel::CreateSchool,
            Panel::MfaSettings,
            Panel::OnboardingRequests,
            Panel::ParentRequests,
            Panel::ReportsCenter,
            Panel::RolesList,
            Panel::SchoolAdminsList,
            Panel::SchoolParentRequests,
            Panel::SecuritySettings,
            Panel::SsoSettings,
            Panel::TrialSignup,
            Panel::AuditLogs,
        ];
        let names: std::collections::HashSet<_> = panels.iter().map(Panel::name).collect();
        assert_eq!(names.len(), panels.len());
    }

    fn test_app() -> App {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let api = ApiClient::build("http://127.0.0.1:9", None, 1).unwrap();
        App::new(api, AppConfig::default(), PathBuf::from("unused.toml"), rt)
    }

    fn admin(id: &str) -> SchoolAdmin {
        serde_json::from_value(serde_json::json!({"id": id, "name": "Ana", "email": "ana@oak.edu"})).unwrap()
    }

    #[test]
    fn test_stale_month_events_dropped() {
        let mut app = test_app();
        app.calendar.loading = true;
        let current = app.calendar.month;
        let previous = current - chrono::Months::new(1);
        let event: SchoolEvent = serde_json::from_value(serde_json::json!({
            "id": 1, "date": previous.to_string(), "title": "Exams"
        }))
        .unwrap();

        app.handle_message(UiMessage::EventsLoaded(previous, Ok(vec![event.clone()])));
        assert!(app.calendar.events.is_empty());
        assert!(app.calendar.loading);

        app.handle_message(UiMessage::EventsLoaded(current, Ok(vec![event])));
        assert_eq!(app.calendar.events.len(), 1);
        assert!(!app.calendar.loading);
    }

    #[test]
    fn test_replies_for_other_school_dropped() {
        let mut app = test_app();
        app.school_admins.selected = Some("s2".to_string());
        app.school_admins.loading = true;
        app.school_requests.selected = Some("s2".to_string());
        app.school_requests.loading = true;

        app.handle_message(UiMessage::AdminsLoaded("s1".to_string(), Ok(vec![admin("a1")])));
        assert!(app.school_admins.admins.is_empty());
        assert!(app.school_admins.loading);

        let request: ParentRequest = serde_json::from_value(serde_json::json!({
            "id": 5, "schoolId": 1, "submissionDate": "2025-03-01T08:30:00Z", "type": "transfer"
        }))
        .unwrap();
        app.handle_message(UiMessage::SchoolParentRequestsLoaded("s1".to_string(), Ok(vec![request])));
        assert!(app.school_requests.requests.is_empty());
        assert!(app.school_requests.loading);

        app.handle_message(UiMessage::AdminsLoaded("s2".to_string(), Ok(vec![admin("a2")])));
        assert_eq!(app.school_admins.admins[0].id, "a2");
        assert!(!app.school_admins.loading);
    }

    #[test]
    fn test_admin_saved_for_other_school_keeps_list() {
        let mut app = test_app();
        app.school_admins.selected = Some("s2".to_string());
        app.school_admins.admins = vec![admin("a2")];
        app.school_admins.form = Some(CreateSchoolAdmin::default());
        app.school_admins.submitting = true;
        let pending = app.pending;

        app.handle_message(UiMessage::AdminSaved("s1".to_string(), Msg::AdminCreated, Ok(())));

        assert_eq!(app.pending, pending);
        assert!(!app.school_admins.submitting);
        assert!(app.school_admins.form.is_some());
        assert_eq!(app.school_admins.admins.len(), 1);
        assert!(!app.toasts.is_empty());

        app.handle_message(UiMessage::AdminSaved("s2".to_string(), Msg::AdminCreated, Ok(())));
        assert_eq!(app.pending, pending + 1);
        assert!(app.school_admins.form.is_none());
        assert!(app.school_admins.loading);
    }

    #[test]
    fn test_saved_policy_reloaded() {
        let mut app = test_app();
        app.security.saving = true;
        let pending = app.pending;

        app.handle_message(UiMessage::PolicySaved(Ok(())));

        assert!(!app.security.saving);
        assert!(app.security.loading);
        assert_eq!(app.pending, pending + 1);
    }
}
