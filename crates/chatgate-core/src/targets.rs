//! Chat target resolution and the conversation-creation gate.

use crate::catalog::PolicyCatalog;
use crate::decision::reason_codes;
use crate::eligibility::can_initiate;
use crate::model::Actor;
use crate::permission::Permission;
use crate::role::Role;
use serde::Serialize;

/// Everyone in `pool` that `actor` may start a conversation with,
/// excluding the actor itself, in pool order.
pub fn resolve_targets<'p>(
    catalog: &PolicyCatalog,
    actor: Option<&Actor>,
    pool: &'p [Actor],
) -> Vec<&'p Actor> {
    let Some(actor) = actor else {
        return Vec::new();
    };
    pool.iter()
        .filter(|candidate| !actor.identity().is_some_and(|id| candidate.id == id))
        .filter(|candidate| can_initiate(catalog, Some(actor), Some(*candidate)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationVerdict {
    pub allowed: bool,
    pub reason_code: &'static str,
    /// Ids of targets the actor may not initiate with.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ineligible: Vec<String>,
}

impl CreationVerdict {
    fn new(reason_code: &'static str) -> Self {
        Self {
            allowed: reason_codes::is_allow(reason_code),
            reason_code,
            ineligible: Vec::new(),
        }
    }
}

/// Explained form of [`can_create_with`].
///
/// Without `CREATE_CONVERSATIONS` only a lead may open a conversation, with
/// exactly one target; the chat matrix is not consulted for it, and
/// `ineligible` is filled for information only. With the permission, every
/// target must be eligible; one ineligible target blocks the whole set.
pub fn evaluate_creation(
    catalog: &PolicyCatalog,
    actor: Option<&Actor>,
    targets: &[Actor],
) -> CreationVerdict {
    let Some(actor) = actor.filter(|a| a.role.is_some()) else {
        return CreationVerdict::new(reason_codes::C_NO_ACTOR);
    };
    if targets.is_empty() {
        return CreationVerdict::new(reason_codes::C_NO_TARGETS);
    }

    let ineligible: Vec<String> = targets
        .iter()
        .filter(|t| !can_initiate(catalog, Some(actor), Some(*t)))
        .map(|t| t.id.clone())
        .collect();

    if !catalog.has_permission(Some(actor), Permission::CreateConversations) {
        let fallback = actor.role == Some(Role::lowest()) && targets.len() == 1;
        if !fallback {
            return CreationVerdict::new(reason_codes::C_NOT_PERMITTED);
        }
        return CreationVerdict {
            ineligible,
            ..CreationVerdict::new(reason_codes::OK_LEAD_FALLBACK)
        };
    }
    if ineligible.is_empty() {
        return CreationVerdict::new(reason_codes::OK);
    }

    CreationVerdict {
        ineligible,
        ..CreationVerdict::new(reason_codes::C_TARGET_NOT_ELIGIBLE)
    }
}

pub fn can_create_with(catalog: &PolicyCatalog, actor: Option<&Actor>, targets: &[Actor]) -> bool {
    evaluate_creation(catalog, actor, targets).allowed
}
