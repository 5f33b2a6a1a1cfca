//! Route definitions for Teams domain API

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::members;
use super::middleware::TeamsState;

/// Create team membership routes
fn membership_routes() -> Router<TeamsState> {
    Router::new()
        .route(
            "/api/teams/{team_id}/members",
            get(members::list_members).post(members::add_member),
        )
        .route(
            "/api/teams/{team_id}/members/{user_id}",
            put(members::update_member).delete(members::remove_member),
        )
}

/// Create all Teams domain API routes
pub fn routes() -> Router<TeamsState> {
    Router::new().merge(membership_routes())
}
