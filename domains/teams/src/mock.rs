//! In-memory team store
//!
//! Implements both [`TeamMemberStore`] and [`ResourcePermissionService`] over
//! shared maps, with the same semantics as the Postgres implementations, and
//! records every mapper call and store write for test assertions.
//! Thread-safe via `Arc<Mutex<>>`.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use teamgate_common::RepositoryError;

use crate::domain::entities::{
    ActionSet, PermissionType, ResourcePermission, SetUserPermission, TeamMember,
};
use crate::domain::error::PermissionError;
use crate::domain::permissions::{team_scope, PermissionTable};
use crate::repository::permissions::{parse_team_id, resolve_grant};
use crate::repository::{ResourcePermissionService, TeamMemberStore};

#[derive(Debug, Clone, Default)]
struct UserRecord {
    login: String,
    email: String,
    name: String,
    auth_module: String,
}

#[derive(Debug, Clone, Copy)]
struct MemberRecord {
    permission: PermissionType,
    external: bool,
}

#[derive(Debug, Default)]
struct State {
    teams: HashSet<(i64, i64)>,
    users: HashMap<i64, UserRecord>,
    /// (org, team, user) → membership
    members: BTreeMap<(i64, i64, i64), MemberRecord>,
    /// (org, user, scope) → granted actions
    grants: HashMap<(i64, i64, String), ActionSet>,
    mapped_labels: Vec<String>,
    writes: Vec<SetUserPermission>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory team store for tests and local development.
///
/// The builder, failure switches and recorders (`mapped_labels`, `writes`,
/// `member`, `granted_actions`) are test support; serving code only goes
/// through the two store traits.
#[derive(Debug, Clone)]
pub struct InMemoryTeamStore {
    state: Arc<Mutex<State>>,
    table: PermissionTable,
}

impl InMemoryTeamStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            table: PermissionTable::teams(),
        }
    }

    /// Register a team in an organization
    pub fn with_team(self, org_id: i64, team_id: i64) -> Self {
        self.lock_for_test().teams.insert((org_id, team_id));
        self
    }

    /// Register a user record
    pub fn with_user(self, user_id: i64, login: &str, email: &str) -> Self {
        self.lock_for_test().users.insert(
            user_id,
            UserRecord {
                login: login.to_string(),
                email: email.to_string(),
                name: login.to_string(),
                auth_module: String::new(),
            },
        );
        self
    }

    /// Set the auth module a user last signed in with
    pub fn with_auth_module(self, user_id: i64, auth_module: &str) -> Self {
        self.lock_for_test()
            .users
            .entry(user_id)
            .or_default()
            .auth_module = auth_module.to_string();
        self
    }

    /// Add a membership row directly, bypassing the permission service
    pub fn with_member(
        self,
        org_id: i64,
        team_id: i64,
        user_id: i64,
        permission: PermissionType,
        external: bool,
    ) -> Self {
        self.lock_for_test().members.insert(
            (org_id, team_id, user_id),
            MemberRecord {
                permission,
                external,
            },
        );
        self
    }

    /// Make every read fail with a connection error
    pub fn fail_reads(&self) {
        self.lock_for_test().fail_reads = true;
    }

    /// Make every write fail with a connection error
    pub fn fail_writes(&self) {
        self.lock_for_test().fail_writes = true;
    }

    /// Labels passed to `map_permission`, in call order
    pub fn mapped_labels(&self) -> Vec<String> {
        self.lock_for_test().mapped_labels.clone()
    }

    /// Commands passed to `set_user_permission`, in call order
    pub fn writes(&self) -> Vec<SetUserPermission> {
        self.lock_for_test().writes.clone()
    }

    /// Stored membership as (permission, external)
    pub fn member(
        &self,
        org_id: i64,
        team_id: i64,
        user_id: i64,
    ) -> Option<(PermissionType, bool)> {
        self.lock_for_test()
            .members
            .get(&(org_id, team_id, user_id))
            .map(|m| (m.permission, m.external))
    }

    /// Actions a user holds on a team
    pub fn granted_actions(&self, org_id: i64, user_id: i64, team_id: i64) -> Option<ActionSet> {
        let scope = team_scope(&team_id.to_string());
        self.lock_for_test()
            .grants
            .get(&(org_id, user_id, scope))
            .cloned()
    }

    /// Lock for the seeding and inspection helpers. A poisoned lock is
    /// recovered, so a panic elsewhere never turns these into panics.
    fn lock_for_test(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|e| RepositoryError::InvalidData(format!("state lock poisoned: {e}")))
    }
}

impl Default for InMemoryTeamStore {
    fn default() -> Self {
        Self::new()
    }
}

fn unavailable() -> RepositoryError {
    RepositoryError::Connection(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl TeamMemberStore for InMemoryTeamStore {
    async fn is_team_member(
        &self,
        org_id: i64,
        team_id: i64,
        user_id: i64,
    ) -> Result<bool, RepositoryError> {
        let state = self.lock()?;
        if state.fail_reads {
            return Err(unavailable());
        }
        Ok(state.members.contains_key(&(org_id, team_id, user_id)))
    }

    async fn member_permission(
        &self,
        org_id: i64,
        team_id: i64,
        user_id: i64,
    ) -> Result<Option<PermissionType>, RepositoryError> {
        let state = self.lock()?;
        if state.fail_reads {
            return Err(unavailable());
        }
        Ok(state
            .members
            .get(&(org_id, team_id, user_id))
            .map(|m| m.permission))
    }

    async fn list_members(
        &self,
        org_id: i64,
        team_id: i64,
    ) -> Result<Vec<TeamMember>, RepositoryError> {
        let state = self.lock()?;
        if state.fail_reads {
            return Err(unavailable());
        }

        let mut members: Vec<TeamMember> = state
            .members
            .iter()
            .filter(|((org, team, _), _)| *org == org_id && *team == team_id)
            .map(|(&(org, team, user_id), record)| {
                let user = state.users.get(&user_id).cloned().unwrap_or_default();
                TeamMember {
                    org_id: org,
                    team_id: team,
                    user_id,
                    login: user.login,
                    email: user.email,
                    name: user.name,
                    auth_module: user.auth_module,
                    external: record.external,
                    permission: record.permission,
                }
            })
            .collect();

        members.sort_by(|a, b| a.login.cmp(&b.login).then_with(|| a.email.cmp(&b.email)));
        Ok(members)
    }
}

#[async_trait]
impl ResourcePermissionService for InMemoryTeamStore {
    fn map_permission(&self, permission: &str) -> Result<ActionSet, PermissionError> {
        self.lock()?.mapped_labels.push(permission.to_string());
        self.table.map_permission(permission)
    }

    async fn set_user_permission(
        &self,
        cmd: SetUserPermission,
    ) -> Result<ResourcePermission, PermissionError> {
        let mut state = self.lock()?;
        state.writes.push(cmd.clone());

        if state.fail_writes {
            return Err(unavailable().into());
        }

        let team_id = parse_team_id(&cmd.resource_id)?;
        let grant = if cmd.actions.is_empty() {
            None
        } else {
            Some(resolve_grant(&self.table, &cmd.actions)?)
        };

        if !state.teams.contains(&(cmd.org_id, team_id)) {
            return Err(PermissionError::TeamNotFound);
        }

        let key = (cmd.org_id, team_id, cmd.user_id);
        match grant {
            None => {
                if state.members.remove(&key).is_none() {
                    return Err(PermissionError::TeamMemberNotFound);
                }
            }
            Some((_, permission)) => {
                let external = cmd
                    .external
                    .or_else(|| state.members.get(&key).map(|m| m.external))
                    .unwrap_or(false);
                state.members.insert(
                    key,
                    MemberRecord {
                        permission,
                        external,
                    },
                );
            }
        }

        let scope = team_scope(&cmd.resource_id);
        let grant_key = (cmd.org_id, cmd.user_id, scope.clone());
        if cmd.actions.is_empty() {
            state.grants.remove(&grant_key);
        } else {
            state.grants.insert(grant_key, cmd.actions.clone());
        }

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
