//! Parent requests, platform-wide and per school.

use urlencoding::encode;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{ParentRequest, RequestStatus, UpdateRequestStatus};

/// All parent requests across schools, optionally filtered by status.
pub async fn list_all(api: &ApiClient, status: Option<RequestStatus>) -> Result<Vec<ParentRequest>> {
    match status {
        Some(status) => {
            let query = [("status", status_param(status))];
            api.get_query("/superadmin/parent-requests", &query).await
        }
        None => api.get("/superadmin/parent-requests").await,
    }
}

/// Parent requests of one school.
pub async fn list_for_school(api: &ApiClient, school_id: &str) -> Result<Vec<ParentRequest>> {
    api.get(&format!("/superadmin/schools/{}/parent-requests", encode(school_id)))
        .await
}

pub async fn update_status(api: &ApiClient, id: &str, update: &UpdateRequestStatus) -> Result<()> {
    api.put(&format!("/superadmin/parent-requests/{}/status", encode(id)), update)
        .await
}

fn status_param(status: RequestStatus) -> String {
    serde_json::to_value(status)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_param() {
        assert_eq!(status_param(RequestStatus::InReview), "in_review");
        assert_eq!(status_param(RequestStatus::Pending), "pending");
    }
}
