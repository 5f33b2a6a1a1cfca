//! Teamgate application composition root
//!
//! Composes the domain routers into a single application.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use teamgate_auth::{AuthBackend, AuthConfig};
use teamgate_common::Config;
use teamgate_teams::{TeamsRepositories, TeamsSettings, TeamsState};

/// Create the main application router backed by Postgres
pub fn create_app(config: &Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let repos = TeamsRepositories::new(pool);

    let auth = AuthBackend::new(AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        issuer: config.jwt_issuer.clone(),
        audience: config.jwt_audience.clone(),
    });

    let settings = TeamsSettings::from_config(config);
    tracing::info!(
        access_control = ?settings.access_control,
        team_group_sync = settings.team_group_sync,
        "Teams domain configured"
    );

    let teams_state = TeamsState::new(
        auth,
        settings,
        Arc::new(repos.members),
        Arc::new(repos.permissions),
    );

    Ok(router(teams_state))
}

/// Compose domain routers with shared infrastructure routes
pub fn router(teams_state: TeamsState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(teamgate_teams::routes().with_state(teams_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
