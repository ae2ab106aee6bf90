use super::super::*;
use super::rules;
use crate::role::Role;
use chrono::TimeZone;

fn fixed_now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

fn facts() -> MutabilityFacts {
    MutabilityFacts {
        is_owner: true,
        within_window: true,
        is_text: true,
        may_edit_own: true,
        may_delete_own: true,
        may_delete_any: false,
    }
}

fn text_from(sender: &str, age: Duration) -> Message {
    Message::text("m1", sender, fixed_now() - age)
}

#[test]
fn test_pipeline_order_is_ownership_then_override() {
    assert_eq!(stage_names(), vec!["ownership", "delete_any_override"]);
}

#[test]
fn test_ownership_grants_both_inside_window() {
    let out = rules::ownership(&facts(), MessagePermissions::default());
    assert_eq!(
        out,
        MessagePermissions {
            can_edit: true,
            can_delete: true
        }
    );
}

#[test]
fn test_ownership_edit_requires_text() {
    let f = MutabilityFacts {
        is_text: false,
        ..facts()
    };
    let out = rules::ownership(&f, MessagePermissions::default());
    assert!(!out.can_edit);
    assert!(out.can_delete);
}

#[test]
fn test_ownership_ignores_non_owner() {
    let f = MutabilityFacts {
        is_owner: false,
        ..facts()
    };
    let before = MessagePermissions::default();
    assert_eq!(rules::ownership(&f, before), before);
}

#[test]
fn test_ownership_closes_outside_window() {
    let f = MutabilityFacts {
        within_window: false,
        ..facts()
    };
    assert_eq!(
        rules::ownership(&f, MessagePermissions::default()),
        MessagePermissions::default()
    );
}

#[test]
fn test_override_sets_delete_and_keeps_edit() {
    let f = MutabilityFacts {
        may_delete_any: true,
        ..facts()
    };
    let before = MessagePermissions {
        can_edit: true,
        can_delete: false,
    };
    let out = rules::delete_any_override(&f, before);
    assert!(out.can_edit);
    assert!(out.can_delete);
}

#[test]
fn test_override_wins_over_expired_window() {
    let f = MutabilityFacts {
        is_owner: true,
        within_window: false,
        may_delete_any: true,
        ..facts()
    };
    assert_eq!(
        decide(&f),
        MessagePermissions {
            can_edit: false,
            can_delete: true
        }
    );
}

#[test]
fn test_owner_ten_minutes_old_text() {
    let catalog = PolicyCatalog::builtin();
    let lead = Actor::new("u1", Role::Lead);
    let msg = text_from("u1", Duration::minutes(10));
    let out = evaluate(
        &catalog,
        Some(&lead),
        Some(&msg),
        &MutabilityOptions::default(),
        fixed_now(),
    );
    assert_eq!(
        out,
        MessagePermissions {
            can_edit: true,
            can_delete: true
        }
    );
}

#[test]
fn test_owner_twenty_minutes_old_text() {
    let catalog = PolicyCatalog::builtin();
    let lead = Actor::new("u1", Role::Lead);
    let msg = text_from("u1", Duration::minutes(20));
    let out = evaluate(
        &catalog,
        Some(&lead),
        Some(&msg),
        &MutabilityOptions::default(),
        fixed_now(),
    );
    assert_eq!(out, MessagePermissions::default());
}

#[test]
fn test_window_boundary_is_exclusive() {
    let catalog = PolicyCatalog::builtin();
    let lead = Actor::new("u1", Role::Lead);
    let options = MutabilityOptions::default();

    let just_inside = text_from("u1", Duration::milliseconds(DEFAULT_TIME_LIMIT_MS - 1));
    let at_limit = text_from("u1", Duration::milliseconds(DEFAULT_TIME_LIMIT_MS));

    assert!(evaluate(&catalog, Some(&lead), Some(&just_inside), &options, fixed_now()).can_edit);
    assert!(!evaluate(&catalog, Some(&lead), Some(&at_limit), &options, fixed_now()).can_edit);
}

#[test]
fn test_manager_deletes_foreign_old_message() {
    let catalog = PolicyCatalog::builtin();
    let manager = Actor::new("mgr", Role::Manager);
    let msg = text_from("someone-else", Duration::minutes(20));
    let out = evaluate(
        &catalog,
        Some(&manager),
        Some(&msg),
        &MutabilityOptions::default(),
        fixed_now(),
    );
    assert_eq!(
        out,
        MessagePermissions {
            can_edit: false,
            can_delete: true
        }
    );
}

#[test]
fn test_malformed_timestamp_is_outside_window() {
    let catalog = PolicyCatalog::builtin();
    let lead = Actor::new("u1", Role::Lead);
    let msg = Message::text("m1", "u1", fixed_now()).with_raw_created_at("garbage");
    let out = evaluate(
        &catalog,
        Some(&lead),
        Some(&msg),
        &MutabilityOptions::default(),
        fixed_now(),
    );
    assert_eq!(out, MessagePermissions::default());
}

#[test]
fn test_future_timestamp_within_skew_counts_as_fresh() {
    let catalog = PolicyCatalog::builtin();
    let lead = Actor::new("u1", Role::Lead);
    let options = MutabilityOptions::default();

    let slightly_ahead = Message::text("m1", "u1", fixed_now() + Duration::seconds(5));
    let far_ahead = Message::text("m2", "u1", fixed_now() + Duration::hours(2));

    assert!(evaluate(&catalog, Some(&lead), Some(&slightly_ahead), &options, fixed_now()).can_edit);
    assert_eq!(
        evaluate(&catalog, Some(&lead), Some(&far_ahead), &options, fixed_now()),
        MessagePermissions::default()
    );
}

#[test]
fn test_missing_inputs_deny() {
    let catalog = PolicyCatalog::builtin();
    let lead = Actor::new("u1", Role::Lead);
    let msg = text_from("u1", Duration::minutes(1));
    let options = MutabilityOptions::default();
    assert_eq!(
        evaluate(&catalog, None, Some(&msg), &options, fixed_now()),
        MessagePermissions::default()
    );
    assert_eq!(
        evaluate(&catalog, Some(&lead), None, &options, fixed_now()),
        MessagePermissions::default()
    );
}

#[test]
fn test_custom_time_limit() {
    let catalog = PolicyCatalog::builtin();
    let lead = Actor::new("u1", Role::Lead);
    let msg = text_from("u1", Duration::minutes(20));
    let options = MutabilityOptions::with_time_limit_ms(30 * 60 * 1000);
    assert!(evaluate(&catalog, Some(&lead), Some(&msg), &options, fixed_now()).can_delete);
}

#[test]
fn test_non_positive_time_limit_leaves_no_window() {
    let catalog = PolicyCatalog::builtin();
    let lead = Actor::new("u1", Role::Lead);
    let manager = Actor::new("u1", Role::Manager);
    let fresh = text_from("u1", Duration::zero());
    for ms in [0, -1, i64::MIN, i64::MAX] {
        let options = MutabilityOptions::with_time_limit_ms(ms);
        if ms <= 0 {
            assert_eq!(options.time_limit, Duration::zero());
            assert_eq!(
                evaluate(&catalog, Some(&lead), Some(&fresh), &options, fixed_now()),
                MessagePermissions::default()
            );
        }
        // the override does not depend on the window
        assert!(evaluate(&catalog, Some(&manager), Some(&fresh), &options, fixed_now()).can_delete);
    }
}

#[test]
fn test_message_age_semantics() {
    let now = fixed_now();
    let skew = Duration::seconds(30);
    assert_eq!(message_age(None, now, skew), None);
    assert_eq!(
        message_age(Some(now - Duration::minutes(3)), now, skew),
        Some(Duration::minutes(3))
    );
    assert_eq!(
        message_age(Some(now + Duration::seconds(30)), now, skew),
        Some(Duration::zero())
    );
    assert_eq!(message_age(Some(now + Duration::seconds(31)), now, skew), None);
}
