//! Billing: school balances and plan changes.

use urlencoding::encode;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{BalanceCredit, ChangePlan, School};

/// Schools with their current plan and balance.
pub async fn list_accounts(api: &ApiClient) -> Result<Vec<School>> {
    api.get("/superadmin/billing/schools").await
}

/// Move a school to another plan.
pub async fn change_plan(api: &ApiClient, school_id: &str, plan_id: &str) -> Result<()> {
    let body = ChangePlan {
        plan_id: plan_id.to_string(),
    };
    api.post(&format!("/superadmin/billing/schools/{}/plan", encode(school_id)), &body)
        .await
}

/// Record a manual credit (negative amounts are charges).
pub async fn record_credit(api: &ApiClient, school_id: &str, credit: &BalanceCredit) -> Result<()> {
    api.post(&format!("/superadmin/billing/schools/{}/credit", encode(school_id)), credit)
        .await
}
