//! Common test utilities and fixtures for integration tests
//!
//! - Application wiring over the in-memory team store
//! - Token minting for signed-in users
//! - Request and response helpers

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, Response},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use teamgate_auth::{AccessClaims, AuthBackend, AuthConfig, OrgRole};
use teamgate_teams::{
    domain::visibility::HiddenUsers, AccessControlMode, InMemoryTeamStore, PermissionType,
    TeamsSettings, TeamsState,
};

pub const JWT_SECRET: &str = "test_secret_key_for_testing_only";

pub const ORG: i64 = 1;
pub const TEAM: i64 = 3;

/// Org admin, not on the team
pub const ORG_ADMIN: i64 = 1;
/// Team member holding Admin on the team
pub const TEAM_ADMIN: i64 = 10;
/// Plain team member
pub const TEAM_MEMBER: i64 = 11;
/// Org member not on the team
pub const OUTSIDER: i64 = 5;
/// Externally synced team member
pub const SYNCED: i64 = 12;
/// Team member configured as hidden
pub const HIDDEN: i64 = 13;

/// Test application over a seeded in-memory store
pub struct TestApp {
    pub store: Arc<InMemoryTeamStore>,
    pub settings: TeamsSettings,
}

impl TestApp {
    /// Legacy authorization mode, no licensed features
    pub fn new() -> Self {
        Self::with_settings(TeamsSettings {
            hidden_users: HiddenUsers::new(["hidden"]),
            ..Default::default()
        })
    }

    /// Fine-grained authorization mode
    pub fn fine_grained() -> Self {
        Self::with_settings(TeamsSettings {
            access_control: AccessControlMode::FineGrained,
            hidden_users: HiddenUsers::new(["hidden"]),
            ..Default::default()
        })
    }

    pub fn with_settings(settings: TeamsSettings) -> Self {
        let store = InMemoryTeamStore::new()
            .with_team(ORG, TEAM)
            .with_user(ORG_ADMIN, "admin", "admin@teamgate.test")
            .with_user(TEAM_ADMIN, "team-admin", "team-admin@teamgate.test")
            .with_user(TEAM_MEMBER, "team-member", "team-member@teamgate.test")
            .with_user(OUTSIDER, "outsider", "outsider@teamgate.test")
            .with_user(SYNCED, "synced", "synced@teamgate.test")
            .with_auth_module(SYNCED, "oauth_gitlab")
            .with_user(HIDDEN, "hidden", "hidden@teamgate.test")
            .with_member(ORG, TEAM, TEAM_ADMIN, PermissionType::Admin, false)
            .with_member(ORG, TEAM, TEAM_MEMBER, PermissionType::Member, false)
            .with_member(ORG, TEAM, SYNCED, PermissionType::Member, true)
            .with_member(ORG, TEAM, HIDDEN, PermissionType::Member, false);

        Self {
            store: Arc::new(store),
            settings,
        }
    }

    /// Router wired the same way as the server, sharing this app's store
    pub fn test_router(&self) -> Router {
        let auth = AuthBackend::new(AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
            issuer: None,
            audience: None,
        });
        let state = TeamsState::new(
            auth,
            self.settings.clone(),
            self.store.clone(),
            self.store.clone(),
        );
        teamgate_app::router(state)
    }
}

/// Mint a token for a user signed in to `ORG`
pub fn create_test_jwt(user_id: i64, login: &str, org_role: OrgRole) -> String {
    let now = Utc::now().timestamp() as u64;
    let claims = AccessClaims {
        sub: user_id.to_string(),
        org_id: ORG,
        org_role,
        login: login.to_string(),
        email: Some(format!("{}@teamgate.test", login)),
        is_server_admin: false,
        iat: now,
        exp: now + 3600,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn org_admin_jwt() -> String {
    create_test_jwt(ORG_ADMIN, "admin", OrgRole::Admin)
}

pub fn team_admin_jwt() -> String {
    create_test_jwt(TEAM_ADMIN, "team-admin", OrgRole::Editor)
}

pub fn team_member_jwt() -> String {
    create_test_jwt(TEAM_MEMBER, "team-member", OrgRole::Editor)
}

/// Build an authenticated request
pub fn authed_request(method: Method, uri: &str, jwt: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", jwt));

    match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Parse response body as JSON
pub async fn parse_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn members_uri(team_id: i64) -> String {
    format!("/api/teams/{}/members", team_id)
}

pub fn member_uri(team_id: i64, user_id: i64) -> String {
    format!("/api/teams/{}/members/{}", team_id, user_id)
}
