//! Reports center.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Report, ReportQuery};

/// Run a report on the server.
pub async fn generate(api: &ApiClient, query: &ReportQuery) -> Result<Report> {
    api.get_query("/superadmin/reports", &query.to_params()).await
}
