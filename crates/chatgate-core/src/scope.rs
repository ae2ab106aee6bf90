//! Office (tenant) boundary.

use crate::model::Actor;

/// The top role crosses every office; everyone else needs an exact match.
/// Empty office ids on either side deny, as does an actor without a role.
pub fn can_access_office(actor: Option<&Actor>, office_id: &str) -> bool {
    let Some((actor, role)) = actor.and_then(|a| a.role.map(|r| (a, r))) else {
        return false;
    };
    if role.is_top() {
        return true;
    }
    if office_id.is_empty() {
        return false;
    }
    actor.office() == Some(office_id)
}
