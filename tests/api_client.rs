//! Endpoint tests against a mock platform API.

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use school_admin_console::AppError;
use school_admin_console::api;
use school_admin_console::client::ApiClient;
use school_admin_console::models::{
    AuditQuery, CreateSchool, RequestStatus, RiskLevel, RoleInput, SecurityPolicy, TrialSignup,
};

const TOKEN: &str = "secret-token";

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::build(&format!("{}/api", server.uri()), Some(TOKEN), 5).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_list_schools_sends_bearer_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/superadmin/schools"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "name": "Oak Primary", "plan": "standard", "balance": 120.5},
                {"id": "s2", "name": "Birch Academy", "plan": "basic", "balance": -10}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let schools = api::school::list_all(&client).await.unwrap();

    assert_eq!(schools.len(), 2);
    assert_eq!(schools[0].id, "1");
    assert_eq!(schools[1].balance, -10.0);
}

#[tokio::test]
async fn test_create_school_posts_camel_case_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/superadmin/schools/create"))
        .and(body_json(json!({
            "name": "Oak Primary",
            "subdomain": "oak",
            "planId": "p1",
            "adminName": "Ana",
            "adminEmail": "ana@oak.edu"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "s9", "name": "Oak Primary", "plan": "standard"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data = CreateSchool {
        name: "Oak Primary".to_string(),
        subdomain: "oak".to_string(),
        plan_id: "p1".to_string(),
        admin_name: "Ana".to_string(),
        admin_email: "ana@oak.edu".to_string(),
        country: None,
    };
    api::school::create(&client, &data).await.unwrap();
}

#[tokio::test]
async fn test_policy_update_accepts_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/superadmin/security/policies"))
        .and(body_json(json!({
            "enforceMfaForAdmins": true,
            "passwordMinLength": 8,
            "lockoutThreshold": 5,
            "allowedIpRanges": [],
            "sessionMaxAgeHours": 24
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let policy = SecurityPolicy {
        enforce_mfa_for_admins: true,
        ..Default::default()
    };
    api::security::update_policy(&client, &policy).await.unwrap();
}

#[tokio::test]
async fn test_mutations_accept_success_acknowledgement() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/superadmin/security/mfa/enable"))
        .and(body_json(json!({"code": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/superadmin/roles"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    api::security::mfa_enable(&client, "123456").await.unwrap();

    let role = RoleInput {
        name: "Auditor".to_string(),
        description: String::new(),
        permissions: vec!["audit.read".to_string()],
    };
    api::role::create(&client, &role).await.unwrap();
}

#[tokio::test]
async fn test_trial_signup_is_sent_without_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/superadmin/public/onboard"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/superadmin/public/onboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requestId": "req-7", "message": "Thanks, we will be in touch"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let signup = TrialSignup {
        school_name: "Maple".to_string(),
        contact_name: "Jo".to_string(),
        email: "jo@maple.org".to_string(),
        ..Default::default()
    };
    let response = api::onboarding::submit_trial(&client, &signup).await.unwrap();

    assert_eq!(response.request_id.as_deref(), Some("req-7"));
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/superadmin/roles"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .mount(&server)
        .await;

    let err = api::role::list_all(&client).await.unwrap_err();

    assert!(err.is_auth());
    assert!(matches!(err, AppError::Unauthorized(ref m) if m == "Token expired"));
}

#[tokio::test]
async fn test_validation_message_surfaces() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/superadmin/schools/create"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "Subdomain taken"})))
        .mount(&server)
        .await;

    let err = api::school::create(&client, &CreateSchool::default()).await.unwrap_err();

    match err {
        AppError::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Subdomain taken");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/superadmin/calendar/events/ev%2F1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    api::calendar::delete(&client, "ev/1").await.unwrap();
}

#[tokio::test]
async fn test_calendar_range_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/superadmin/calendar/events"))
        .and(query_param("from", "2025-03-01"))
        .and(query_param("to", "2025-03-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let from = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
    let events = api::calendar::list_range(&client, from, to).await.unwrap();

    assert!(events.is_empty());
}

#[tokio::test]
async fn test_audit_filters_become_query_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/superadmin/audit-logs"))
        .and(query_param("riskLevel", "critical"))
        .and(query_param("from", "2025-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 3,
                "timestamp": "2025-01-02T10:00:00Z",
                "action": "school.delete",
                "userId": "u1",
                "riskLevel": "critical",
                "details": {"schoolId": 4}
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let query = AuditQuery {
        from: NaiveDate::from_ymd_opt(2025, 1, 1),
        to: None,
        risk_level: Some(RiskLevel::Critical),
    };
    let entries = api::audit::list(&client, &query).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].risk_level, RiskLevel::Critical);
    assert_eq!(entries[0].details_text(), r#"{"schoolId":4}"#);
}

#[tokio::test]
async fn test_parent_request_status_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/superadmin/parent-requests"))
        .and(query_param("status", "in_review"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let requests = api::parent_request::list_all(&client, Some(RequestStatus::InReview))
        .await
        .unwrap();

    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let client = ApiClient::build("http://127.0.0.1:9", Some(TOKEN), 2).unwrap();

    let err = client.ping().await.unwrap_err();

    assert!(matches!(err, AppError::Http(_)));
}
