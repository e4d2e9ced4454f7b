//! Platform security policy, SSO, and MFA records.

use serde::{Deserialize, Serialize};

/// Platform-wide authentication policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityPolicy {
    pub enforce_mfa_for_admins: bool,
    pub password_min_length: u32,
    pub lockout_threshold: u32,
    pub allowed_ip_ranges: Vec<String>,
    pub session_max_age_hours: u32,
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            enforce_mfa_for_admins: false,
            password_min_length: 8,
            lockout_threshold: 5,
            allowed_ip_ranges: Vec::new(),
            session_max_age_hours: 24,
        }
    }
}

/// Split one-per-line IP ranges, dropping blank lines.
pub fn parse_ip_ranges(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// One identity provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SsoProvider {
    pub name: String,
    pub client_id: String,
    pub issuer_url: String,
    pub enabled: bool,
}

/// Single sign-on settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SsoConfig {
    pub enabled: bool,
    pub providers: Vec<SsoProvider>,
    pub callback_url: String,
}

/// MFA state of the signed-in super-admin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MfaStatus {
    pub enabled: bool,
}

/// Secret material returned when MFA setup starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MfaSetup {
    pub secret: String,
    pub otpauth_url: String,
    pub backup_codes: Vec<String>,
}

/// Body of MFA enable/disable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfaCode {
    pub code: String,
}

/// A TOTP code is six ASCII digits.
pub fn is_valid_mfa_code(code: &str) -> bool {
    let code = code.trim();
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_camel_case() {
        let json = r#"{
            "enforceMfaForAdmins": true,
            "passwordMinLength": 12,
            "lockoutThreshold": 3,
            "allowedIpRanges": ["10.0.0.0/8"],
            "sessionMaxAgeHours": 8
        }"#;
        let policy: SecurityPolicy = serde_json::from_str(json).unwrap();

        assert!(policy.enforce_mfa_for_admins);
        assert_eq!(policy.password_min_length, 12);
        assert_eq!(policy.allowed_ip_ranges, vec!["10.0.0.0/8"]);
    }

    #[test]
    fn test_ip_ranges() {
        let ranges = parse_ip_ranges("10.0.0.0/8\n\n  192.168.1.7 \nlab-network\n");
        assert_eq!(ranges, vec!["10.0.0.0/8", "192.168.1.7", "lab-network"]);
    }

    #[test]
    fn test_mfa_code() {
        assert!(is_valid_mfa_code("123456"));
        assert!(is_valid_mfa_code(" 000111 "));
        assert!(!is_valid_mfa_code("12345"));
        assert!(!is_valid_mfa_code("12a456"));
    }

    #[test]
    fn test_sso_defaults() {
        let sso: SsoConfig = serde_json::from_str(r#"{"enabled":true}"#).unwrap();
        assert!(sso.enabled);
        assert!(sso.providers.is_empty());
        assert!(sso.callback_url.is_empty());
    }
}
