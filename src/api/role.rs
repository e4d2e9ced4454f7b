//! Platform roles.

use urlencoding::encode;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Role, RoleInput};

pub async fn list_all(api: &ApiClient) -> Result<Vec<Role>> {
    api.get("/superadmin/roles").await
}

pub async fn create(api: &ApiClient, data: &RoleInput) -> Result<()> {
    api.post("/superadmin/roles", data).await
}

pub async fn update(api: &ApiClient, id: &str, data: &RoleInput) -> Result<()> {
    api.put(&format!("/superadmin/roles/{}", encode(id)), data).await
}

pub async fn delete(api: &ApiClient, id: &str) -> Result<()> {
    api.delete(&format!("/superadmin/roles/{}", encode(id))).await
}
