//! Account Use Case Tests
//!
//! Exercise the register / login / update flows against the in-memory
//! repository, including the authorization, uniqueness and invariant
//! behavior the HTTP layer relies on.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use platform::token;
use serde_json::json;
use tower::ServiceExt;

use crate::application::config::AccountConfig;
use crate::application::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, UpdateProfileUseCase,
};
use crate::domain::entity::account::{Billing, ProfilePatch};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_id::AccountId, plan::Plan, theme::Theme};
use crate::error::AccountError;
use crate::infra::memory::MemoryAccountRepository;
use crate::presentation::dto::UpdateProfileRequest;
use crate::presentation::router::account_router_generic;

fn setup() -> (Arc<MemoryAccountRepository>, Arc<AccountConfig>) {
    (
        Arc::new(MemoryAccountRepository::new()),
        Arc::new(AccountConfig::with_random_secret()),
    )
}

async fn register(
    repo: &Arc<MemoryAccountRepository>,
    config: &Arc<AccountConfig>,
    name: &str,
    email: &str,
    password: &str,
) -> crate::error::AccountResult<crate::application::RegisterOutput> {
    RegisterUseCase::new(repo.clone(), config.clone())
        .execute(RegisterInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
}

// ============================================================================
// Register
// ============================================================================

#[tokio::test]
async fn test_register_issues_verifiable_token() {
    let (repo, config) = setup();

    let output = register(&repo, &config, "Ana", "ana@test.com", "Passw0rd")
        .await
        .unwrap();

    assert_eq!(output.account.email.as_str(), "ana@test.com");
    assert_eq!(output.account.plan, Plan::Free);

    // The issued credential names the new account
    let subject = token::verify(&config.token_secret, &output.token).unwrap();
    assert_eq!(subject, output.account.account_id.to_string());
}

#[tokio::test]
async fn test_register_normalized_email_collision() {
    let (repo, config) = setup();

    register(&repo, &config, "Ana", " Ana@Test.com ", "Passw0rd")
        .await
        .unwrap();

    // Same address after trim + lowercase
    let result = register(&repo, &config, "Ana2", "ana@test.com", "Passw0rd").await;
    assert!(matches!(result, Err(AccountError::EmailTaken)));
}

#[tokio::test]
async fn test_register_validates_in_field_order() {
    let (repo, config) = setup();

    // Both name and password are bad; name is reported
    let result = register(&repo, &config, "  ", "ana@test.com", "short").await;
    match result {
        Err(AccountError::Validation(msg)) => assert_eq!(msg, "Name is required"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let (repo, config) = setup();

    let result = register(&repo, &config, "Ana", "ana@test.com", "alllowercase1").await;
    assert!(matches!(result, Err(AccountError::Validation(_))));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_outcomes() {
    let (repo, config) = setup();
    register(&repo, &config, "Ana", "ana@test.com", "Passw0rd")
        .await
        .unwrap();

    let login = LoginUseCase::new(repo.clone(), config.clone());

    // Unknown email
    let result = login
        .execute(LoginInput {
            email: "nobody@test.com".to_string(),
            password: "Passw0rd".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AccountError::AccountNotFound)));

    // Wrong password for a known email
    let result = login
        .execute(LoginInput {
            email: "ana@test.com".to_string(),
            password: "WrongPass1".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AccountError::InvalidCredentials)));

    // Correct credentials; email matching is normalized
    let output = login
        .execute(LoginInput {
            email: " ANA@test.com ".to_string(),
            password: "Passw0rd".to_string(),
        })
        .await
        .unwrap();
    let subject = token::verify(&config.token_secret, &output.token).unwrap();
    assert_eq!(subject, output.account.account_id.to_string());
}

#[tokio::test]
async fn test_login_requires_password() {
    let (repo, config) = setup();
    register(&repo, &config, "Ana", "ana@test.com", "Passw0rd")
        .await
        .unwrap();

    let result = LoginUseCase::new(repo.clone(), config.clone())
        .execute(LoginInput {
            email: "ana@test.com".to_string(),
            password: String::new(),
        })
        .await;
    match result {
        Err(AccountError::Validation(msg)) => assert_eq!(msg, "Password is required"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ============================================================================
// Update Profile
// ============================================================================

#[tokio::test]
async fn test_update_rejects_cross_account_request() {
    let (repo, config) = setup();
    let ana = register(&repo, &config, "Ana", "ana@test.com", "Passw0rd")
        .await
        .unwrap();
    let eva = register(&repo, &config, "Eva", "eva@test.com", "Passw0rd")
        .await
        .unwrap();

    let result = UpdateProfileUseCase::new(repo.clone())
        .execute(
            &ana.account.account_id,
            &eva.account.account_id,
            ProfilePatch {
                theme: Some(Theme::Dark),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AccountError::Forbidden)));

    // Target untouched
    let stored = repo
        .find_by_id(&eva.account.account_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.theme, Theme::Light);
}

#[tokio::test]
async fn test_update_unknown_target_is_not_found() {
    let (repo, _config) = setup();
    let ghost = AccountId::new();

    let result = UpdateProfileUseCase::new(repo.clone())
        .execute(&ghost, &ghost, ProfilePatch::default())
        .await;
    assert!(matches!(result, Err(AccountError::AccountNotFound)));
}

#[tokio::test]
async fn test_update_is_field_local() {
    let (repo, config) = setup();
    let ana = register(&repo, &config, "Ana", "ana@test.com", "Passw0rd")
        .await
        .unwrap();
    let id = ana.account.account_id;

    // Seed favorites first
    UpdateProfileUseCase::new(repo.clone())
        .execute(
            &id,
            &id,
            ProfilePatch {
                favorites: Some(vec!["p1".to_string(), "p2".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // A theme-only patch must not disturb anything else
    let updated = UpdateProfileUseCase::new(repo.clone())
        .execute(
            &id,
            &id,
            ProfilePatch {
                theme: Some(Theme::Dark),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.theme, Theme::Dark);
    assert_eq!(updated.favorites, vec!["p1", "p2"]);
    assert_eq!(updated.email.as_str(), "ana@test.com");
    assert_eq!(updated.name.as_str(), "Ana");
}

#[tokio::test]
async fn test_update_email_conflict_excludes_self() {
    let (repo, config) = setup();
    let ana = register(&repo, &config, "Ana", "ana@test.com", "Passw0rd")
        .await
        .unwrap();
    register(&repo, &config, "Eva", "eva@test.com", "Passw0rd")
        .await
        .unwrap();

    let id = ana.account.account_id;
    let use_case = UpdateProfileUseCase::new(repo.clone());

    // Re-submitting the current email is not a conflict
    let req: UpdateProfileRequest =
        serde_json::from_value(serde_json::json!({ "email": "ana@test.com" })).unwrap();
    use_case.execute(&id, &id, req.validate().unwrap()).await.unwrap();

    // Claiming another account's email is
    let req: UpdateProfileRequest =
        serde_json::from_value(serde_json::json!({ "email": "Eva@Test.com" })).unwrap();
    let result = use_case.execute(&id, &id, req.validate().unwrap()).await;
    assert!(matches!(result, Err(AccountError::EmailTaken)));
}

#[tokio::test]
async fn test_update_plan_downgrade_clears_billing_and_consent() {
    let (repo, config) = setup();
    let ana = register(&repo, &config, "Ana", "ana@test.com", "Passw0rd")
        .await
        .unwrap();
    let id = ana.account.account_id;
    let use_case = UpdateProfileUseCase::new(repo.clone());

    let upgraded = use_case
        .execute(
            &id,
            &id,
            ProfilePatch {
                plan: Some(Plan::Business),
                consent: Some(true),
                billing: Some(Billing {
                    cif: Some("B1234".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(upgraded.consent);
    assert!(upgraded.consent_date.is_some());
    assert!(upgraded.billing.is_some());

    let downgraded = use_case
        .execute(
            &id,
            &id,
            ProfilePatch {
                plan: Some(Plan::Free),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(downgraded.plan, Plan::Free);
    assert!(!downgraded.consent);
    assert!(downgraded.consent_date.is_none());
    assert!(downgraded.billing.is_none());
}

// ============================================================================
// HTTP surface
// ============================================================================

fn put_user(id: &str, auth: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PUT")
        .uri(format!("/user/{id}"))
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_gate_collapses_all_credential_failures_identically() {
    let (repo, config) = setup();
    let ana = register(&repo, &config, "Ana", "ana@test.com", "Passw0rd")
        .await
        .unwrap();
    let id = ana.account.account_id.to_string();

    let router = account_router_generic((*repo).clone(), (*config).clone());

    let expired = token::issue_with_expiry(&config.token_secret, &id, 0);
    let forged = token::issue(
        &AccountConfig::with_random_secret().token_secret,
        &id,
        Duration::from_secs(3600),
    );

    let headers = [
        None,
        Some(format!("Bearer {expired}")),
        Some(format!("Bearer {forged}")),
        Some("Bearer not-even-a-token".to_string()),
    ];

    let mut bodies = Vec::new();
    for auth in &headers {
        let response = router
            .clone()
            .oneshot(put_user(&id, auth.as_deref(), json!({ "theme": "dark" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(body_bytes(response).await);
    }

    // Missing, expired, forged and malformed credentials are
    // indistinguishable from outside
    for body in &bodies[1..] {
        assert_eq!(body, &bodies[0]);
    }
}

#[tokio::test]
async fn test_gate_cross_account_put_is_forbidden_before_validation() {
    let (repo, config) = setup();
    let ana = register(&repo, &config, "Ana", "ana@test.com", "Passw0rd")
        .await
        .unwrap();
    let eva = register(&repo, &config, "Eva", "eva@test.com", "Passw0rd")
        .await
        .unwrap();

    let router = account_router_generic((*repo).clone(), (*config).clone());

    // Out-of-schema payload: the ownership check still answers first
    let response = router
        .oneshot(put_user(
            &eva.account.account_id.to_string(),
            Some(&format!("Bearer {}", ana.token)),
            json!({ "plan": "gold", "extraField": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_auth_endpoints_rate_limited_per_source() {
    let (repo, config) = setup();
    let router = account_router_generic((*repo).clone(), (*config).clone());

    // Exhaust the window; without connection info every request shares
    // one bucket
    for _ in 0..30 {
        let response = router
            .clone()
            .oneshot(post_json(
                "/login",
                json!({ "email": "nobody@test.com", "password": "Passw0rd" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let response = router
        .clone()
        .oneshot(post_json(
            "/login",
            json!({ "email": "nobody@test.com", "password": "Passw0rd" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(
        body["detail"],
        "Too many authentication attempts, please try again later"
    );
}
