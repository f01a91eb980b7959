mod common;

use std::time::Duration;

use assert_matches::assert_matches;

use backoffice_api::auth::{AuthService, LoginRequest, RegisterRequest};
use backoffice_api::errors::ServiceError;

fn register_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "a-sufficiently-long-password".to_string(),
    }
}

async fn auth_service(name: &str) -> AuthService {
    let db = common::test_db(name).await;
    AuthService::new(
        db,
        "unit-test-secret-key-that-is-long-enough",
        Duration::from_secs(3600),
        Duration::from_secs(86400),
    )
}

#[tokio::test]
async fn register_login_verify_refresh_roundtrip() {
    let auth = auth_service("auth_roundtrip").await;
    auth.register(register_request("clerk")).await.unwrap();

    let pair = auth
        .login(LoginRequest {
            username: "clerk".to_string(),
            password: "a-sufficiently-long-password".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(pair.username, "clerk");

    let account = auth.verify(&pair.access).await.unwrap();
    assert_eq!(account.username, "clerk");

    // Email works as the login identifier too.
    let by_email = auth
        .login(LoginRequest {
            username: "clerk@example.com".to_string(),
            password: "a-sufficiently-long-password".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(by_email.username, "clerk");

    let refreshed = auth.refresh(&pair.refresh).await.unwrap();
    assert!(auth.verify(&refreshed.access).await.is_ok());
}

#[tokio::test]
async fn refresh_token_cannot_be_used_as_access_token() {
    let auth = auth_service("auth_token_types").await;
    auth.register(register_request("typed")).await.unwrap();
    let pair = auth
        .login(LoginRequest {
            username: "typed".to_string(),
            password: "a-sufficiently-long-password".to_string(),
        })
        .await
        .unwrap();

    let err = auth.verify(&pair.refresh).await.unwrap_err();
    assert_matches!(err, ServiceError::Unauthorized(_));
    let err = auth.refresh(&pair.access).await.unwrap_err();
    assert_matches!(err, ServiceError::Unauthorized(_));
}

#[tokio::test]
async fn wrong_password_and_duplicate_registration_are_rejected() {
    let auth = auth_service("auth_rejections").await;
    auth.register(register_request("dupe")).await.unwrap();

    let err = auth.register(register_request("dupe")).await.unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));

    let err = auth
        .login(LoginRequest {
            username: "dupe".to_string(),
            password: "wrong-password-entirely".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Unauthorized(_));
}
