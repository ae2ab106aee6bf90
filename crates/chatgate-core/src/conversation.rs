//! Per-conversation permission set.
//!
//! Three facts drive every flag:
//!
//! | fact | meaning |
//! |------|---------|
//! | participant | the actor's id is in the participant set |
//! | scoped manager | the actor is a manager whose office owns the conversation |
//! | top role | the actor is a super admin |
//!
//! Monitoring access (scoped manager, top role) grants viewing and
//! participant management, never posting. An actor without a recognized
//! role gets nothing, participant or not.

use crate::catalog::PolicyCatalog;
use crate::model::{Actor, Conversation};
use crate::permission::Permission;
use crate::role::Role;
use crate::scope::can_access_office;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PermissionDecision {
    pub can_view: bool,
    pub can_send_messages: bool,
    pub can_add_participants: bool,
    pub can_remove_participants: bool,
    pub can_archive: bool,
    pub can_delete: bool,
    pub can_export: bool,
}

impl PermissionDecision {
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Names of the granted flags, in declaration order.
    pub fn granted(&self) -> Vec<&'static str> {
        [
            ("view", self.can_view),
            ("send_messages", self.can_send_messages),
            ("add_participants", self.can_add_participants),
            ("remove_participants", self.can_remove_participants),
            ("archive", self.can_archive),
            ("delete", self.can_delete),
            ("export", self.can_export),
        ]
        .into_iter()
        .filter_map(|(name, granted)| granted.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Standing {
    is_participant: bool,
    is_scoped_manager: bool,
    is_top: bool,
}

impl Standing {
    fn of(actor: &Actor, conversation: &Conversation) -> Self {
        Self {
            is_participant: conversation.has_participant(actor),
            is_scoped_manager: actor.role == Some(Role::Manager)
                && can_access_office(Some(actor), &conversation.office_id),
            is_top: actor.role.is_some_and(|r| r.is_top()),
        }
    }

    fn can_view(&self) -> bool {
        self.is_participant || self.is_scoped_manager || self.is_top
    }
}

/// Visibility alone. The bulk filter in [`crate::visibility`] uses exactly this.
pub fn can_view(actor: Option<&Actor>, conversation: Option<&Conversation>) -> bool {
    match (actor.filter(|a| a.role.is_some()), conversation) {
        (Some(actor), Some(conversation)) => Standing::of(actor, conversation).can_view(),
        _ => false,
    }
}

pub fn authorize(
    catalog: &PolicyCatalog,
    actor: Option<&Actor>,
    conversation: Option<&Conversation>,
) -> PermissionDecision {
    let (Some(actor), Some(conversation)) = (actor.filter(|a| a.role.is_some()), conversation)
    else {
        return PermissionDecision::deny_all();
    };
    let standing = Standing::of(actor, conversation);
    let has = |p: Permission| catalog.has_permission(Some(actor), p);

    PermissionDecision {
        can_view: standing.can_view(),
        can_send_messages: standing.is_participant,
        can_add_participants: (standing.is_participant && has(Permission::CreateConversations))
            || standing.is_scoped_manager
            || standing.is_top,
        can_remove_participants: standing.is_scoped_manager || standing.is_top,
        can_archive: standing.is_participant && has(Permission::ArchiveConversations),
        can_delete: has(Permission::DeleteConversations),
        can_export: has(Permission::ExportConversations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convo() -> Conversation {
        Conversation::new("c1", "O1").with_participants(["lead-1", "cons-1"])
    }

    #[test]
    fn participant_consultant() {
        let catalog = PolicyCatalog::builtin();
        let consultant = Actor::new("cons-1", Role::Consultant).with_office("O1");
        let d = authorize(&catalog, Some(&consultant), Some(&convo()));
        assert_eq!(
            d,
            PermissionDecision {
                can_view: true,
                can_send_messages: true,
                can_add_participants: true,
                can_remove_participants: false,
                can_archive: true,
                can_delete: false,
                can_export: false,
            }
        );
    }

    #[test]
    fn participant_lead_cannot_add_or_archive() {
        let catalog = PolicyCatalog::builtin();
        let lead = Actor::new("lead-1", Role::Lead);
        let d = authorize(&catalog, Some(&lead), Some(&convo()));
        assert!(d.can_view);
        assert!(d.can_send_messages);
        assert!(!d.can_add_participants);
        assert!(!d.can_archive);
    }

    #[test]
    fn scoped_manager_monitors_without_posting() {
        let catalog = PolicyCatalog::builtin();
        let manager = Actor::new("mgr-1", Role::Manager).with_office("O1");
        let d = authorize(&catalog, Some(&manager), Some(&convo()));
        assert!(d.can_view);
        assert!(!d.can_send_messages);
        assert!(d.can_add_participants);
        assert!(d.can_remove_participants);
        assert!(!d.can_archive);
        assert!(d.can_delete);
        assert!(d.can_export);
    }

    #[test]
    fn manager_of_another_office_keeps_only_role_level_flags() {
        let catalog = PolicyCatalog::builtin();
        let manager = Actor::new("mgr-2", Role::Manager).with_office("O2");
        let d = authorize(&catalog, Some(&manager), Some(&convo()));
        assert_eq!(d.granted(), vec!["delete", "export"]);
    }

    #[test]
    fn super_admin_sees_everything_but_does_not_post() {
        let catalog = PolicyCatalog::builtin();
        let admin = Actor::new("root", Role::SuperAdmin);
        let d = authorize(&catalog, Some(&admin), Some(&convo()));
        assert!(d.can_view);
        assert!(!d.can_send_messages);
        assert!(d.can_remove_participants);
        assert!(!d.can_archive);
    }

    #[test]
    fn missing_inputs_deny_all() {
        let catalog = PolicyCatalog::builtin();
        let admin = Actor::new("root", Role::SuperAdmin);
        assert_eq!(
            authorize(&catalog, None, Some(&convo())),
            PermissionDecision::deny_all()
        );
        assert_eq!(
            authorize(&catalog, Some(&admin), None),
            PermissionDecision::deny_all()
        );
        assert!(!can_view(None, Some(&convo())));
    }

    #[test]
    fn roleless_participant_gets_nothing() {
        let catalog = PolicyCatalog::builtin();
        let ghost = Actor::from_directory("lead-1", "intern", None);
        assert_eq!(
            authorize(&catalog, Some(&ghost), Some(&convo())),
            PermissionDecision::deny_all()
        );
        assert!(!can_view(Some(&ghost), Some(&convo())));
    }

    #[test]
    fn can_view_agrees_with_authorize() {
        let catalog = PolicyCatalog::builtin();
        for role in Role::ALL {
            for office in ["O1", "O2"] {
                let actor = Actor::new("outsider", role).with_office(office);
                assert_eq!(
                    can_view(Some(&actor), Some(&convo())),
                    authorize(&catalog, Some(&actor), Some(&convo())).can_view,
                    "{role} in {office}"
                );
            }
        }
    }
}
