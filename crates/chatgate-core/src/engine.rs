//! `PolicyEngine`: the decision API consumed by messaging collaborators.
//!
//! The engine owns an immutable catalog behind an `Arc`; cloning is cheap
//! and clones may be used from any number of threads. Every actor argument
//! accepts `&Actor` or `None`, and a missing input always yields the most
//! restrictive answer.

use crate::catalog::{self, PolicyCatalog};
use crate::config::PolicyConfig;
use crate::conversation::{self, PermissionDecision};
use crate::errors::CatalogError;
use crate::model::{Actor, Conversation, Message, UploadCandidate};
use crate::mutability::{self, MessagePermissions, MutabilityOptions};
use crate::permission::Permission;
use crate::resource::{self, UploadVerdict};
use crate::role::Role;
use crate::targets::{self, CreationVerdict};
use crate::{eligibility, scope, visibility};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PolicyEngine {
    catalog: Arc<PolicyCatalog>,
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PolicyEngine {
    /// Engine over the process-wide built-in catalog.
    pub fn builtin() -> Self {
        Self {
            catalog: catalog::shared_builtin(),
        }
    }

    pub fn new(catalog: PolicyCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn from_config(config: PolicyConfig) -> Result<Self, CatalogError> {
        PolicyCatalog::from_config(config).map(Self::new)
    }

    /// Load and validate a policy file. Meant to run once at startup.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let config = PolicyConfig::from_file(path)?;
        let engine = Self::from_config(config)?;
        tracing::info!(path = %path.display(), "loaded policy catalog");
        Ok(engine)
    }

    pub fn catalog(&self) -> &PolicyCatalog {
        &self.catalog
    }

    pub fn permissions_for(&self, role: Role) -> &BTreeSet<Permission> {
        self.catalog.permissions_for(role)
    }

    pub fn has_permission<'a>(
        &self,
        actor: impl Into<Option<&'a Actor>>,
        permission: Permission,
    ) -> bool {
        self.catalog.has_permission(actor.into(), permission)
    }

    pub fn can_chat_with<'a, 'b>(
        &self,
        from: impl Into<Option<&'a Actor>>,
        to: impl Into<Option<&'b Actor>>,
    ) -> bool {
        let (from, to) = (from.into(), to.into());
        let allowed = eligibility::can_initiate(&self.catalog, from, to);
        if !allowed {
            tracing::debug!(
                from = from.map(|a| a.id.as_str()),
                from_role = role_name(from),
                to = to.map(|a| a.id.as_str()),
                to_role = role_name(to),
                "chat initiation denied"
            );
        }
        allowed
    }

    pub fn can_access_office<'a>(
        &self,
        actor: impl Into<Option<&'a Actor>>,
        office_id: &str,
    ) -> bool {
        scope::can_access_office(actor.into(), office_id)
    }

    pub fn message_permissions<'a, 'm>(
        &self,
        actor: impl Into<Option<&'a Actor>>,
        message: impl Into<Option<&'m Message>>,
        options: Option<&MutabilityOptions>,
        now: DateTime<Utc>,
    ) -> MessagePermissions {
        let options = options
            .copied()
            .unwrap_or_else(|| MutabilityOptions::from_catalog(&self.catalog));
        mutability::evaluate(&self.catalog, actor.into(), message.into(), &options, now)
    }

    /// [`Self::message_permissions`] at the current wall-clock time.
    pub fn message_permissions_now<'a, 'm>(
        &self,
        actor: impl Into<Option<&'a Actor>>,
        message: impl Into<Option<&'m Message>>,
    ) -> MessagePermissions {
        self.message_permissions(actor, message, None, Utc::now())
    }

    pub fn can_upload_file_type<'a>(
        &self,
        actor: impl Into<Option<&'a Actor>>,
        content_type: Option<&str>,
    ) -> bool {
        resource::can_upload(&self.catalog, actor.into(), content_type)
    }

    pub fn max_file_size<'a>(&self, actor: impl Into<Option<&'a Actor>>) -> u64 {
        resource::max_size_bytes(&self.catalog, actor.into())
    }

    pub fn evaluate_upload<'a>(
        &self,
        actor: impl Into<Option<&'a Actor>>,
        candidate: &UploadCandidate,
    ) -> UploadVerdict {
        let actor = actor.into();
        let verdict = resource::evaluate_upload(&self.catalog, actor, candidate);
        if !verdict.allowed {
            tracing::debug!(
                actor_id = actor.map(|a| a.id.as_str()),
                role = role_name(actor),
                content_type = %candidate.content_type,
                size_bytes = candidate.size_bytes,
                reason_code = verdict.reason_code,
                "upload denied"
            );
        }
        verdict
    }

    pub fn can_create_conversation_with<'a>(
        &self,
        actor: impl Into<Option<&'a Actor>>,
        targets: &[Actor],
    ) -> bool {
        self.evaluate_creation(actor, targets).allowed
    }

    pub fn evaluate_creation<'a>(
        &self,
        actor: impl Into<Option<&'a Actor>>,
        targets: &[Actor],
    ) -> CreationVerdict {
        let actor = actor.into();
        let verdict = targets::evaluate_creation(&self.catalog, actor, targets);
        if !verdict.allowed {
            tracing::debug!(
                actor_id = actor.map(|a| a.id.as_str()),
                role = role_name(actor),
                targets = targets.len(),
                reason_code = verdict.reason_code,
                "conversation creation denied"
            );
        }
        verdict
    }

    pub fn accessible_conversations<'c, 'a>(
        &self,
        conversations: &'c [Conversation],
        actor: impl Into<Option<&'a Actor>>,
    ) -> Vec<&'c Conversation> {
        visibility::list_accessible(conversations, actor.into())
    }

    pub fn conversation_permissions<'a, 'c>(
        &self,
        actor: impl Into<Option<&'a Actor>>,
        conversation: impl Into<Option<&'c Conversation>>,
    ) -> PermissionDecision {
        conversation::authorize(&self.catalog, actor.into(), conversation.into())
    }

    pub fn available_chat_targets<'p, 'a>(
        &self,
        actor: impl Into<Option<&'a Actor>>,
        all_actors: &'p [Actor],
    ) -> Vec<&'p Actor> {
        targets::resolve_targets(&self.catalog, actor.into(), all_actors)
    }
}

fn role_name(actor: Option<&Actor>) -> Option<&'static str> {
    actor.and_then(|a| a.role).map(|r| r.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_is_thread_safe() {
        assert_send_sync::<PolicyEngine>();
        assert_send_sync::<PolicyCatalog>();
    }

    #[test]
    fn accepts_references_and_none() {
        let engine = PolicyEngine::builtin();
        let lead = Actor::new("u1", Role::Lead);
        assert!(engine.has_permission(&lead, Permission::SendMessages));
        assert!(!engine.has_permission(None, Permission::SendMessages));
        assert_eq!(engine.max_file_size(None), 0);
    }

    #[test]
    fn message_options_default_to_catalog_window() {
        let config = PolicyConfig {
            message_edit_window_ms: Some(60_000),
            ..PolicyConfig::default()
        };
        let engine = PolicyEngine::from_config(config).unwrap();
        let now = Utc::now();
        let lead = Actor::new("u1", Role::Lead);
        let msg = Message::text("m1", "u1", now - Duration::minutes(5));

        assert!(!engine.message_permissions(&lead, &msg, None, now).can_edit);
        let wide = MutabilityOptions::with_time_limit_ms(10 * 60 * 1000);
        assert!(engine.message_permissions(&lead, &msg, Some(&wide), now).can_edit);
    }

    #[test]
    fn clones_share_the_catalog() {
        let engine = PolicyEngine::builtin();
        let clone = engine.clone();
        assert!(std::ptr::eq(engine.catalog(), clone.catalog()));
    }
}
