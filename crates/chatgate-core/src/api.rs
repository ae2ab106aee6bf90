//! Free functions over the built-in catalog.
//!
//! Convenience for callers that never load a policy file. Anything that
//! needs a custom catalog should hold a [`PolicyEngine`] instead.

use crate::conversation::PermissionDecision;
use crate::engine::PolicyEngine;
use crate::model::{Actor, Conversation, Message};
use crate::mutability::{MessagePermissions, MutabilityOptions};
use crate::permission::Permission;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_ENGINE: PolicyEngine = PolicyEngine::builtin();
}

/// Engine over the built-in catalog.
pub fn default_engine() -> &'static PolicyEngine {
    &DEFAULT_ENGINE
}

pub fn has_permission(actor: Option<&Actor>, permission: Permission) -> bool {
    DEFAULT_ENGINE.has_permission(actor, permission)
}

pub fn can_chat_with(from: Option<&Actor>, to: Option<&Actor>) -> bool {
    DEFAULT_ENGINE.can_chat_with(from, to)
}

pub fn can_access_office(actor: Option<&Actor>, office_id: &str) -> bool {
    DEFAULT_ENGINE.can_access_office(actor, office_id)
}

pub fn message_permissions(
    actor: Option<&Actor>,
    message: Option<&Message>,
    options: Option<&MutabilityOptions>,
    now: DateTime<Utc>,
) -> MessagePermissions {
    DEFAULT_ENGINE.message_permissions(actor, message, options, now)
}

pub fn can_upload_file_type(actor: Option<&Actor>, content_type: Option<&str>) -> bool {
    DEFAULT_ENGINE.can_upload_file_type(actor, content_type)
}

pub fn max_file_size(actor: Option<&Actor>) -> u64 {
    DEFAULT_ENGINE.max_file_size(actor)
}

pub fn can_create_conversation_with(actor: Option<&Actor>, targets: &[Actor]) -> bool {
    DEFAULT_ENGINE.can_create_conversation_with(actor, targets)
}

pub fn accessible_conversations<'c>(
    conversations: &'c [Conversation],
    actor: Option<&Actor>,
) -> Vec<&'c Conversation> {
    DEFAULT_ENGINE.accessible_conversations(conversations, actor)
}

pub fn conversation_permissions(
    actor: Option<&Actor>,
    conversation: Option<&Conversation>,
) -> PermissionDecision {
    DEFAULT_ENGINE.conversation_permissions(actor, conversation)
}

pub fn available_chat_targets<'p>(actor: Option<&Actor>, all_actors: &'p [Actor]) -> Vec<&'p Actor> {
    DEFAULT_ENGINE.available_chat_targets(actor, all_actors)
}
