//! Team membership API handlers
//!
//! Thin adapters over [`MembershipMutator`](crate::service::MembershipMutator)
//! and [`MembershipReader`](crate::service::MembershipReader). The organization
//! is always the one the caller is signed in to.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use teamgate_auth::AuthUser;
use teamgate_common::{Result, ValidatedJson};
use validator::Validate;

use crate::api::middleware::TeamsState;
use crate::domain::entities::{PermissionType, TeamMemberView};
use crate::service::AddMember;

/// Request for adding a team member
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    #[validate(range(min = 1))]
    pub user_id: i64,

    /// Permission code; members get the zero level when omitted
    #[serde(default)]
    pub permission: PermissionType,
}

/// Request for changing a member's permission
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    pub permission: PermissionType,
}

/// Response for membership mutations
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Wrap a confirmation text in the mutation response body
fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.to_string(),
    })
}

/// List team members
///
/// **GET /api/teams/{team_id}/members**
pub async fn list_members(
    AuthUser(user): AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<i64>,
) -> Result<Json<Vec<TeamMemberView>>> {
    let members = state
        .reader
        .list_members(&user, user.org_id, team_id)
        .await?;

    Ok(Json(members))
}

/// Add a user to a team
///
/// **POST /api/teams/{team_id}/members**
///
/// Memberships added over the API are never external; those come from
/// group sync.
pub async fn add_member(
    AuthUser(user): AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<AddMemberRequest>,
) -> Result<Json<MessageResponse>> {
    let member = AddMember {
        user_id: request.user_id,
        permission: request.permission,
        external: false,
    };

    state
        .mutator
        .add_member(&user, user.org_id, team_id, member)
        .await?;

    Ok(message("Member added to Team"))
}

/// Change a member's permission
///
/// **PUT /api/teams/{team_id}/members/{user_id}**
pub async fn update_member(
    AuthUser(user): AuthUser,
    State(state): State<TeamsState>,
    Path((team_id, member_id)): Path<(i64, i64)>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> Result<Json<MessageResponse>> {
    state
        .mutator
        .update_member(&user, user.org_id, team_id, member_id, request.permission)
        .await?;

    Ok(message("Team member updated"))
}

/// Remove a member from a team
///
/// **DELETE /api/teams/{team_id}/members/{user_id}**
pub async fn remove_member(
    AuthUser(user): AuthUser,
    State(state): State<TeamsState>,
    Path((team_id, member_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>> {
    state
        .mutator
        .remove_member(&user, user.org_id, team_id, member_id)
        .await?;

    Ok(message("Team Member removed"))
}
