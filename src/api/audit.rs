//! Audit log.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{AuditLogEntry, AuditQuery};

pub async fn list(api: &ApiClient, query: &AuditQuery) -> Result<Vec<AuditLogEntry>> {
    api.get_query("/superadmin/audit-logs", &query.to_params()).await
}
