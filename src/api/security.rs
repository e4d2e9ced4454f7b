//! Security policy, SSO, and MFA endpoints.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{MfaCode, MfaSetup, MfaStatus, SecurityPolicy, SsoConfig};

pub async fn get_policy(api: &ApiClient) -> Result<SecurityPolicy> {
    api.get("/superadmin/security/policies").await
}

pub async fn update_policy(api: &ApiClient, policy: &SecurityPolicy) -> Result<()> {
    api.put("/superadmin/security/policies", policy).await
}

pub async fn get_sso(api: &ApiClient) -> Result<SsoConfig> {
    api.get("/superadmin/security/sso").await
}

pub async fn update_sso(api: &ApiClient, config: &SsoConfig) -> Result<()> {
    api.put("/superadmin/security/sso", config).await
}

pub async fn mfa_status(api: &ApiClient) -> Result<MfaStatus> {
    api.get("/superadmin/security/mfa").await
}

/// Start MFA enrolment and receive the shared secret.
pub async fn mfa_setup(api: &ApiClient) -> Result<MfaSetup> {
    api.post_empty_for("/superadmin/security/mfa/setup").await
}

/// Confirm enrolment with a code from the authenticator.
pub async fn mfa_enable(api: &ApiClient, code: &str) -> Result<()> {
    let body = MfaCode {
        code: code.trim().to_string(),
    };
    api.post("/superadmin/security/mfa/enable", &body).await
}

pub async fn mfa_disable(api: &ApiClient, code: &str) -> Result<()> {
    let body = MfaCode {
        code: code.trim().to_string(),
    };
    api.post("/superadmin/security/mfa/disable", &body).await
}
