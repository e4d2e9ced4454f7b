//! Calendar events.

use chrono::NaiveDate;
use urlencoding::encode;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{CreateEvent, SchoolEvent};

/// Events between two dates, inclusive.
pub async fn list_range(api: &ApiClient, from: NaiveDate, to: NaiveDate) -> Result<Vec<SchoolEvent>> {
    let query = [
        ("from", from.format("%Y-%m-%d").to_string()),
        ("to", to.format("%Y-%m-%d").to_string()),
    ];
    api.get_query("/superadmin/calendar/events", &query).await
}

pub async fn create(api: &ApiClient, data: &CreateEvent) -> Result<()> {
    api.post("/superadmin/calendar/events", data).await
}

pub async fn delete(api: &ApiClient, id: &str) -> Result<()> {
    api.delete(&format!("/superadmin/calendar/events/{}", encode(id))).await
}
