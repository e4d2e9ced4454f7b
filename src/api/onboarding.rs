//! Onboarding requests and the public trial signup.

use urlencoding::encode;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{OnboardResponse, OnboardingRequest, RejectOnboarding, TrialSignup};

/// List onboarding requests, newest first as returned by the API.
pub async fn list_requests(api: &ApiClient) -> Result<Vec<OnboardingRequest>> {
    api.get("/superadmin/onboarding/requests").await
}

/// Approve a request; the backend provisions the school.
pub async fn approve(api: &ApiClient, id: &str) -> Result<()> {
    api.post_empty(&format!("/superadmin/onboarding/requests/{}/approve", encode(id)))
        .await
}

pub async fn reject(api: &ApiClient, id: &str, reason: &str) -> Result<()> {
    let body = RejectOnboarding {
        reason: reason.to_string(),
    };
    api.post(&format!("/superadmin/onboarding/requests/{}/reject", encode(id)), &body)
        .await
}

/// Submit a trial signup without credentials.
pub async fn submit_trial(api: &ApiClient, signup: &TrialSignup) -> Result<OnboardResponse> {
    api.post_public("/superadmin/public/onboard", signup).await
}
