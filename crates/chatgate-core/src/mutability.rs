//! Message edit/delete decisions.
//!
//! Evaluation is an ordered pipeline of named stages, each a pure function
//! from the facts about the request and the permissions so far to the next
//! permissions:
//!
//! ```text
//! default {edit: false, delete: false}
//!     │
//!     ▼
//! ownership             owner + permission + inside the window (+ text for edit)
//!     │
//!     ▼
//! delete_any_override   DELETE_ANY_MESSAGES sets delete = true, last stage wins
//! ```
//!
//! The override is never combined with the window. The only time input is
//! the explicit `now`.

use crate::catalog::PolicyCatalog;
use crate::model::{Actor, Message, MessageKind};
use crate::permission::Permission;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[path = "mutability_internal/mod.rs"]
mod mutability_internal;

/// Default window in which an owner may still edit or delete.
pub const DEFAULT_TIME_LIMIT_MS: i64 = 900_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutabilityOptions {
    pub time_limit: Duration,
}

impl Default for MutabilityOptions {
    fn default() -> Self {
        Self::with_time_limit_ms(DEFAULT_TIME_LIMIT_MS)
    }
}

impl MutabilityOptions {
    /// A non-positive or out-of-range limit leaves no window: owners keep
    /// no edit/delete rights.
    pub fn with_time_limit_ms(ms: i64) -> Self {
        let time_limit = Duration::try_milliseconds(ms)
            .filter(|limit| *limit > Duration::zero())
            .unwrap_or_else(Duration::zero);
        Self { time_limit }
    }

    /// Window configured in the catalog.
    pub fn from_catalog(catalog: &PolicyCatalog) -> Self {
        Self {
            time_limit: catalog.message_edit_window(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct MessagePermissions {
    pub can_edit: bool,
    pub can_delete: bool,
}

/// Facts the pipeline stages decide on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutabilityFacts {
    pub is_owner: bool,
    pub within_window: bool,
    pub is_text: bool,
    pub may_edit_own: bool,
    pub may_delete_own: bool,
    pub may_delete_any: bool,
}

impl MutabilityFacts {
    pub fn gather(
        catalog: &PolicyCatalog,
        actor: &Actor,
        message: &Message,
        options: &MutabilityOptions,
        now: DateTime<Utc>,
    ) -> Self {
        let age = message_age(message.created_at, now, catalog.clock_skew());
        Self {
            is_owner: actor
                .identity()
                .is_some_and(|id| id == message.sender_id),
            within_window: age.is_some_and(|age| age < options.time_limit),
            is_text: message.kind == MessageKind::Text,
            may_edit_own: catalog.has_permission(Some(actor), Permission::EditOwnMessages),
            may_delete_own: catalog.has_permission(Some(actor), Permission::DeleteOwnMessages),
            may_delete_any: catalog.has_permission(Some(actor), Permission::DeleteAnyMessages),
        }
    }
}

/// Age of a message at `now`. `None` stands for an infinite age: the
/// timestamp is missing, or lies further in the future than `skew` allows.
/// Future timestamps within the skew count as age zero.
pub fn message_age(
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    skew: Duration,
) -> Option<Duration> {
    let age = now.signed_duration_since(created_at?);
    if age >= Duration::zero() {
        Some(age)
    } else if -age <= skew {
        Some(Duration::zero())
    } else {
        None
    }
}

/// Names of the pipeline stages, in evaluation order.
pub fn stage_names() -> Vec<&'static str> {
    mutability_internal::rules::PIPELINE
        .iter()
        .map(|(name, _)| *name)
        .collect()
}

/// Run the pipeline over precomputed facts.
pub fn decide(facts: &MutabilityFacts) -> MessagePermissions {
    mutability_internal::rules::run_pipeline(facts)
}

/// Edit/delete rights of `actor` on `message` at `now`. Missing inputs deny.
pub fn evaluate(
    catalog: &PolicyCatalog,
    actor: Option<&Actor>,
    message: Option<&Message>,
    options: &MutabilityOptions,
    now: DateTime<Utc>,
) -> MessagePermissions {
    let (Some(actor), Some(message)) = (actor, message) else {
        return MessagePermissions::default();
    };
    let facts = MutabilityFacts::gather(catalog, actor, message, options, now);
    decide(&facts)
}
