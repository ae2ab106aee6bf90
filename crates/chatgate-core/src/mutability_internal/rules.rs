use super::super::{MessagePermissions, MutabilityFacts};

pub(crate) type Stage = fn(&MutabilityFacts, MessagePermissions) -> MessagePermissions;

/// Evaluation order. Later stages see and may overwrite earlier results.
pub(crate) const PIPELINE: [(&str, Stage); 2] = [
    ("ownership", ownership),
    ("delete_any_override", delete_any_override),
];

pub(crate) fn ownership(facts: &MutabilityFacts, current: MessagePermissions) -> MessagePermissions {
    if !facts.is_owner {
        return current;
    }
    MessagePermissions {
        can_edit: facts.may_edit_own && facts.within_window && facts.is_text,
        can_delete: facts.may_delete_own && facts.within_window,
    }
}

pub(crate) fn delete_any_override(
    facts: &MutabilityFacts,
    current: MessagePermissions,
) -> MessagePermissions {
    if facts.may_delete_any {
        MessagePermissions {
            can_delete: true,
            ..current
        }
    } else {
        current
    }
}

pub(crate) fn run_pipeline(facts: &MutabilityFacts) -> MessagePermissions {
    PIPELINE
        .iter()
        .fold(MessagePermissions::default(), |current, (name, stage)| {
            let next = stage(facts, current);
            tracing::trace!(
                stage = *name,
                can_edit = next.can_edit,
                can_delete = next.can_delete,
                "mutability stage"
            );
            next
        })
}
