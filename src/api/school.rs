//! Schools and plans.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{CreateSchool, Plan, School};

/// List all schools.
pub async fn list_all(api: &ApiClient) -> Result<Vec<School>> {
    api.get("/superadmin/schools").await
}

/// Create a school with its first administrator.
pub async fn create(api: &ApiClient, data: &CreateSchool) -> Result<()> {
    api.post("/superadmin/schools/create", data).await
}

/// List subscription plans.
pub async fn list_plans(api: &ApiClient) -> Result<Vec<Plan>> {
    api.get("/superadmin/plans").await
}
