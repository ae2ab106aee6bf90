//! Who may start a conversation with whom.
//!
//! The matrix is directional. `can_initiate(a, b)` says nothing about
//! `can_initiate(b, a)`; callers that need both directions ask twice.

use crate::catalog::PolicyCatalog;
use crate::model::Actor;

pub fn can_initiate(catalog: &PolicyCatalog, from: Option<&Actor>, to: Option<&Actor>) -> bool {
    let (Some(from_role), Some(to_role)) = (from.and_then(|a| a.role), to.and_then(|a| a.role))
    else {
        return false;
    };
    if from_role.is_top() {
        return true;
    }
    catalog.chat_targets(from_role).contains(&to_role)
}
