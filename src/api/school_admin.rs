//! Administrators of a school.

use urlencoding::encode;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{CreateSchoolAdmin, SchoolAdmin, UpdateSchoolAdmin};

fn admins_path(school_id: &str) -> String {
    format!("/superadmin/schools/{}/admins", encode(school_id))
}

pub async fn list_for_school(api: &ApiClient, school_id: &str) -> Result<Vec<SchoolAdmin>> {
    api.get(&admins_path(school_id)).await
}

pub async fn create(api: &ApiClient, school_id: &str, data: &CreateSchoolAdmin) -> Result<()> {
    api.post(&admins_path(school_id), data).await
}

pub async fn update(api: &ApiClient, school_id: &str, admin_id: &str, data: &UpdateSchoolAdmin) -> Result<()> {
    api.put(&format!("{}/{}", admins_path(school_id), encode(admin_id)), data)
        .await
}

pub async fn delete(api: &ApiClient, school_id: &str, admin_id: &str) -> Result<()> {
    api.delete(&format!("{}/{}", admins_path(school_id), encode(admin_id)))
        .await
}
