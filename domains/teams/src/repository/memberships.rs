//! Team member repository
//!
//! Uses runtime `sqlx::query_as` so the crate builds without a live database.

use async_trait::async_trait;
use sqlx::PgPool;
use teamgate_common::RepositoryError;

use super::TeamMemberStore;
use crate::domain::entities::{PermissionType, TeamMember};

/// Row type for member listings
#[derive(sqlx::FromRow)]
struct TeamMemberRow {
    org_id: i64,
    team_id: i64,
    user_id: i64,
    login: String,
    email: String,
    name: String,
    auth_module: String,
    external: bool,
    permission: i64,
}

impl TryFrom<TeamMemberRow> for TeamMember {
    type Error = RepositoryError;

    fn try_from(row: TeamMemberRow) -> Result<Self, Self::Error> {
        let permission =
            PermissionType::try_from(row.permission).map_err(RepositoryError::InvalidData)?;

        Ok(TeamMember {
            org_id: row.org_id,
            team_id: row.team_id,
            user_id: row.user_id,
            login: row.login,
            email: row.email,
            name: row.name,
            auth_module: row.auth_module,
            external: row.external,
            permission,
        })
    }
}

#[derive(Clone)]
pub struct TeamMemberRepository {
    pool: PgPool,
}

impl TeamMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamMemberStore for TeamMemberRepository {
    async fn is_team_member(
        &self,
        org_id: i64,
        team_id: i64,
        user_id: i64,
    ) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM team_member
                WHERE org_id = $1 AND team_id = $2 AND user_id = $3
            )
            "#,
        )
        .bind(org_id)
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn member_permission(
        &self,
        org_id: i64,
        team_id: i64,
        user_id: i64,
    ) -> Result<Option<PermissionType>, RepositoryError> {
        let code: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT permission::BIGINT
            FROM team_member
            WHERE org_id = $1 AND team_id = $2 AND user_id = $3
            "#,
        )
        .bind(org_id)
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        code.map(|c| PermissionType::try_from(c).map_err(RepositoryError::InvalidData))
            .transpose()
    }

    async fn list_members(
        &self,
        org_id: i64,
        team_id: i64,
    ) -> Result<Vec<TeamMember>, RepositoryError> {
        let rows: Vec<TeamMemberRow> = sqlx::query_as(
            r#"
            SELECT tm.org_id, tm.team_id, tm.user_id,
                   u.login, u.email, COALESCE(u.name, '') AS name,
                   COALESCE(ua.auth_module, '') AS auth_module,
                   tm.external, tm.permission::BIGINT AS permission
            FROM team_member tm
            INNER JOIN team t ON t.id = tm.team_id AND t.org_id = tm.org_id
            INNER JOIN users u ON u.id = tm.user_id
            LEFT JOIN LATERAL (
                SELECT auth_module
                FROM user_auth
                WHERE user_auth.user_id = tm.user_id
                ORDER BY created DESC
                LIMIT 1
            ) ua ON TRUE
            WHERE tm.org_id = $1 AND tm.team_id = $2
            ORDER BY u.login ASC, u.email ASC
            "#,
        )
        .bind(org_id)
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TeamMember::try_from).collect()
    }
}
