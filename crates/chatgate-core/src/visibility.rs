//! Bulk visibility filter over [`crate::conversation::can_view`].

use crate::conversation::can_view;
use crate::model::{Actor, Conversation};

/// Conversations `actor` may view, in input order.
pub fn list_accessible<'c>(
    conversations: &'c [Conversation],
    actor: Option<&Actor>,
) -> Vec<&'c Conversation> {
    conversations
        .iter()
        .filter(|c| can_view(actor, Some(*c)))
        .collect()
}

/// Owned variant of [`list_accessible`].
pub fn retain_accessible(conversations: &mut Vec<Conversation>, actor: Option<&Actor>) {
    conversations.retain(|c| can_view(actor, Some(c)));
}
