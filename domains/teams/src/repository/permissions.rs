//! Postgres-backed resource-permission service for team resources
//!
//! A write replaces the user's managed grants on `teams:id:<team>` and keeps
//! the `team_member` row in step with them, inside one transaction.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::ResourcePermissionService;
use crate::domain::entities::{
    ActionSet, PermissionType, ResourcePermission, SetUserPermission,
};
use crate::domain::error::PermissionError;
use crate::domain::permissions::{team_scope, PermissionTable};

#[derive(Clone)]
pub struct TeamPermissionService {
    pool: PgPool,
    table: PermissionTable,
}

impl TeamPermissionService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table: PermissionTable::teams(),
        }
    }
}

/// Resolve the label and membership level a non-empty action set stands for
pub(crate) fn resolve_grant(
    table: &PermissionTable,
    actions: &ActionSet,
) -> Result<(&'static str, PermissionType), PermissionError> {
    let label = table.permission_for(actions).ok_or_else(|| {
        PermissionError::UnknownPermission(actions.iter().collect::<Vec<_>>().join(","))
    })?;
    let level = PermissionType::from_label(label)
        .ok_or_else(|| PermissionError::UnknownPermission(label.to_string()))?;
    Ok((label, level))
}

/// Team id encoded in a resource id
pub(crate) fn parse_team_id(resource_id: &str) -> Result<i64, PermissionError> {
    resource_id
        .parse()
        .map_err(|_| PermissionError::InvalidResource(resource_id.to_string()))
}

#[async_trait]
impl ResourcePermissionService for TeamPermissionService {
    fn map_permission(&self, permission: &str) -> Result<ActionSet, PermissionError> {
        self.table.map_permission(permission)
    }

    async fn set_user_permission(
        &self,
        cmd: SetUserPermission,
    ) -> Result<ResourcePermission, PermissionError> {
        let team_id = parse_team_id(&cmd.resource_id)?;
        let grant = if cmd.actions.is_empty() {
            None
        } else {
            Some(resolve_grant(&self.table, &cmd.actions)?)
        };
        let scope = team_scope(&cmd.resource_id);

        let mut tx = self.pool.begin().await?;

        let team: Option<i64> =
            sqlx::query_scalar("SELECT id FROM team WHERE org_id = $1 AND id = $2")
                .bind(cmd.org_id)
                .bind(team_id)
                .fetch_optional(&mut *tx)
                .await?;

        if team.is_none() {
            return Err(PermissionError::TeamNotFound);
        }

        match grant {
            None => {
                let removed = sqlx::query(
                    "DELETE FROM team_member WHERE org_id = $1 AND team_id = $2 AND user_id = $3",
                )
                .bind(cmd.org_id)
                .bind(team_id)
                .bind(cmd.user_id)
                .execute(&mut *tx)
                .await?;

                if removed.rows_affected() == 0 {
                    return Err(PermissionError::TeamMemberNotFound);
                }
            }
            Some((_, level)) => {
                sqlx::query(
                    r#"
                    INSERT INTO team_member (org_id, team_id, user_id, external, permission, created, updated)
                    VALUES ($1, $2, $3, COALESCE($4, FALSE), $5, NOW(), NOW())
                    ON CONFLICT (org_id, team_id, user_id) DO UPDATE
                    SET permission = EXCLUDED.permission,
                        external = COALESCE($4, team_member.external),
                        updated = NOW()
                    "#,
                )
                .bind(cmd.org_id)
                .bind(team_id)
                .bind(cmd.user_id)
                .bind(cmd.external)
                .bind(level.code())
                .execute(&mut *tx)
                .await?;
            }
        }

        sqlx::query("DELETE FROM resource_permission WHERE org_id = $1 AND user_id = $2 AND scope = $3")
            .bind(cmd.org_id)
            .bind(cmd.user_id)
            .bind(&scope)
            .execute(&mut *tx)
            .await?;

        for action in cmd.actions.iter() {
            sqlx::query(
                r#"
                INSERT INTO resource_permission (org_id, user_id, scope, action, created, updated)
                VALUES ($1, $2, $3, $4, NOW(), NOW())
                "#,
            )
            .bind(cmd.org_id)
            .bind(cmd.user_id)
            .bind(&scope)
            .bind(action)
            .execute(&mut *tx)
            .await?;
        }

        // Explicit commit; dropping the transaction rolls back
        tx.commit().await?;

        tracing::debug!(
            org_id = cmd.org_id,
            user_id = cmd.user_id,
            scope = %scope,
            actions = cmd.actions.len(),
            "Team permission written"
        );

        Ok(ResourcePermission {
            resource_id: cmd.resource_id,
            user_id: cmd.user_id,
            permission: grant.map(|(label, _)| label.to_string()).unwrap_or_default(),
            actions: cmd.actions,
            scope,
            updated_at: Utc::now(),
        })
    }
}
