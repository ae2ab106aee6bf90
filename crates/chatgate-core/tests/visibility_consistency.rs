//! The bulk filter and the per-conversation decision must never disagree.

use chatgate_core::{Actor, Conversation, PolicyEngine, Role};
use proptest::prelude::*;

const OFFICES: [&str; 3] = ["O1", "O2", ""];
const IDS: [&str; 4] = ["u1", "u2", "u3", ""];

fn actor_strategy() -> impl Strategy<Value = Option<Actor>> {
    (
        prop::option::of(prop::sample::select(Role::ALL.to_vec())),
        prop::sample::select(IDS.to_vec()),
        prop::option::of(prop::sample::select(OFFICES.to_vec())),
    )
        .prop_map(|(role, id, office)| {
            // some roleless draws stand in for a missing actor
            if role.is_none() && id == "u3" {
                return None;
            }
            Some(Actor {
                id: id.to_string(),
                role,
                office_id: office.map(str::to_string),
            })
        })
}

fn conversation_strategy() -> impl Strategy<Value = Conversation> {
    (
        prop::sample::select(OFFICES.to_vec()),
        prop::collection::btree_set(prop::sample::select(IDS.to_vec()), 0..3),
    )
        .prop_map(|(office, participants)| {
            Conversation::new("c", office).with_participants(participants)
        })
}

proptest! {
    #[test]
    fn bulk_filter_matches_can_view(
        actor in actor_strategy(),
        convos in prop::collection::vec(conversation_strategy(), 0..12),
    ) {
        let engine = PolicyEngine::builtin();
        let expected: Vec<&Conversation> = convos
            .iter()
            .filter(|c| engine.conversation_permissions(actor.as_ref(), *c).can_view)
            .collect();
        let listed = engine.accessible_conversations(&convos, actor.as_ref());
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn monitoring_never_grants_posting(
        actor in actor_strategy(),
        convo in conversation_strategy(),
    ) {
        let engine = PolicyEngine::builtin();
        let d = engine.conversation_permissions(actor.as_ref(), &convo);
        let participant = actor
            .as_ref()
            .is_some_and(|a| {
                a.role.is_some() && !a.id.is_empty() && convo.participants.contains(&a.id)
            });
        prop_assert_eq!(d.can_send_messages, participant);
        prop_assert!(!d.can_archive || participant);
    }
}
