//! Dashboard counters.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::DashboardStats;

/// Fetch platform-wide counters.
pub async fn stats(api: &ApiClient) -> Result<DashboardStats> {
    api.get("/superadmin/dashboard/stats").await
}
