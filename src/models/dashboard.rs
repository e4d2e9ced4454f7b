//! Platform-wide dashboard counters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_schools: u64,
    pub active_schools: u64,
    pub trial_schools: u64,
    pub pending_onboarding: u64,
    pub pending_parent_requests: u64,
    pub monthly_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_stats() {
        let stats: DashboardStats = serde_json::from_str(r#"{"totalSchools":14,"monthlyRevenue":1200.5}"#).unwrap();
        assert_eq!(stats.total_schools, 14);
        assert_eq!(stats.pending_onboarding, 0);
        assert_eq!(stats.monthly_revenue, 1200.5);
    }
}
