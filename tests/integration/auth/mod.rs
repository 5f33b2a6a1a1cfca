//! Bearer token handling on the membership endpoints

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use tower::ServiceExt;

use teamgate_auth::{AccessClaims, OrgRole};

use crate::common::*;

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new();
    let req = Request::builder()
        .method(Method::GET)
        .uri(members_uri(TEAM))
        .body(Body::empty())
        .unwrap();

    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let app = TestApp::new();
    let now = Utc::now().timestamp() as u64;
    let claims = AccessClaims {
        sub: TEAM_ADMIN.to_string(),
        org_id: ORG,
        org_role: OrgRole::Admin,
        login: "team-admin".to_string(),
        email: None,
        is_server_admin: false,
        iat: now,
        exp: now + 3600,
    };
    let jwt = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .unwrap();

    let req = authed_request(Method::DELETE, &member_uri(TEAM, TEAM_MEMBER), &jwt, None);
    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(app.store.writes().is_empty());
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let app = TestApp::new();
    let req = Request::builder()
        .method(Method::GET)
        .uri(members_uri(TEAM))
        .header("authorization", format!("Basic {}", team_admin_jwt()))
        .body(Body::empty())
        .unwrap();

    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
