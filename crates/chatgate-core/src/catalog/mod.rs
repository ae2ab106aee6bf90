//! Immutable role catalog: permissions, chat matrix, upload limits and the
//! message mutability window.
//!
//! A catalog is built once, from the built-in tables or from a validated
//! [`PolicyConfig`], and is read-only afterwards. Share it with `Arc`.

pub mod builtin;

use crate::config::PolicyConfig;
use crate::errors::CatalogError;
use crate::model::Actor;
use crate::permission::Permission;
use crate::role::Role;
use chrono::Duration;
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

static NO_PERMISSIONS: BTreeSet<Permission> = BTreeSet::new();
static NO_ROLES: BTreeSet<Role> = BTreeSet::new();

lazy_static! {
    static ref BUILTIN: Arc<PolicyCatalog> = Arc::new(PolicyCatalog::builtin());
}

/// Process-wide built-in catalog.
pub fn shared_builtin() -> Arc<PolicyCatalog> {
    Arc::clone(&BUILTIN)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyCatalog {
    permissions: BTreeMap<Role, BTreeSet<Permission>>,
    chat_matrix: BTreeMap<Role, BTreeSet<Role>>,
    upload_limits_bytes: BTreeMap<Role, u64>,
    message_edit_window_ms: i64,
    clock_skew_ms: i64,
}

impl Default for PolicyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PolicyCatalog {
    pub fn builtin() -> Self {
        Self {
            permissions: Role::ALL
                .iter()
                .map(|&r| (r, builtin::role_permissions(r)))
                .collect(),
            chat_matrix: Role::ALL
                .iter()
                .map(|&r| (r, builtin::chat_targets(r)))
                .collect(),
            upload_limits_bytes: Role::ALL
                .iter()
                .map(|&r| (r, builtin::upload_limit_bytes(r)))
                .collect(),
            message_edit_window_ms: builtin::DEFAULT_EDIT_WINDOW_MS,
            clock_skew_ms: builtin::DEFAULT_CLOCK_SKEW_MS,
        }
    }

    /// Build a catalog from a policy file. Absent sections keep the built-in
    /// table; a present section must name every role.
    pub fn from_config(config: PolicyConfig) -> Result<Self, CatalogError> {
        let mut catalog = Self::builtin();

        if let Some(roles) = config.roles {
            tracing::warn!("policy overrides built-in role permissions");
            catalog.permissions = complete(roles, "roles")?
                .into_iter()
                .map(|(role, perms)| (role, perms.into_iter().collect()))
                .collect();
        }
        if let Some(matrix) = config.chat_matrix {
            tracing::warn!("policy overrides built-in chat matrix");
            catalog.chat_matrix = complete(matrix, "chat_matrix")?
                .into_iter()
                .map(|(role, targets)| (role, targets.into_iter().collect()))
                .collect();
        }
        if let Some(limits) = config.upload_limits_bytes {
            tracing::warn!("policy overrides built-in upload limits");
            catalog.upload_limits_bytes = complete(limits, "upload_limits_bytes")?;
        }
        if let Some(window_ms) = config.message_edit_window_ms {
            if window_ms <= 0 {
                return Err(CatalogError::InvalidEditWindow { window_ms });
            }
            catalog.message_edit_window_ms = window_ms;
        }
        if let Some(skew_ms) = config.clock_skew_ms {
            if skew_ms < 0 {
                return Err(CatalogError::InvalidClockSkew { skew_ms });
            }
            catalog.clock_skew_ms = skew_ms;
        }

        catalog.validate()?;
        Ok(catalog)
    }

    /// Every role must hold at least one permission.
    fn validate(&self) -> Result<(), CatalogError> {
        for role in Role::ALL {
            if self.permissions_for(role).is_empty() {
                return Err(CatalogError::EmptyPermissionSet { role });
            }
        }
        Ok(())
    }

    pub fn permissions_for(&self, role: Role) -> &BTreeSet<Permission> {
        self.permissions.get(&role).unwrap_or(&NO_PERMISSIONS)
    }

    pub fn role_has(&self, role: Role, permission: Permission) -> bool {
        self.permissions_for(role).contains(&permission)
    }

    /// Fails closed: a missing actor or role holds no permissions.
    pub fn has_permission(&self, actor: Option<&Actor>, permission: Permission) -> bool {
        actor
            .and_then(|a| a.role)
            .is_some_and(|role| self.role_has(role, permission))
    }

    /// Roles `role` may start a conversation with.
    pub fn chat_targets(&self, role: Role) -> &BTreeSet<Role> {
        self.chat_matrix.get(&role).unwrap_or(&NO_ROLES)
    }

    pub fn upload_limit_bytes(&self, role: Role) -> u64 {
        self.upload_limits_bytes.get(&role).copied().unwrap_or(0)
    }

    pub fn message_edit_window(&self) -> Duration {
        Duration::milliseconds(self.message_edit_window_ms)
    }

    pub fn clock_skew(&self) -> Duration {
        Duration::milliseconds(self.clock_skew_ms)
    }

    /// A fully spelled-out policy file equivalent to this catalog.
    pub fn to_config(&self) -> PolicyConfig {
        PolicyConfig {
            message_edit_window_ms: Some(self.message_edit_window_ms),
            clock_skew_ms: Some(self.clock_skew_ms),
            roles: Some(
                self.permissions
                    .iter()
                    .map(|(&role, perms)| (role, perms.iter().copied().collect()))
                    .collect(),
            ),
            chat_matrix: Some(
                self.chat_matrix
                    .iter()
                    .map(|(&role, targets)| (role, targets.iter().copied().collect()))
                    .collect(),
            ),
            upload_limits_bytes: Some(self.upload_limits_bytes.clone()),
            ..PolicyConfig::default()
        }
    }
}

fn complete<V>(
    table: BTreeMap<Role, V>,
    name: &'static str,
) -> Result<BTreeMap<Role, V>, CatalogError> {
    if let Some(role) = Role::ALL.into_iter().find(|r| !table.contains_key(r)) {
        return Err(CatalogError::MissingRole { role, table: name });
    }
    Ok(table)
}
