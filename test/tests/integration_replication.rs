/// Authority to replica replication through the loopback transport.
///
/// Covers the dirty signal raised by authoritative commits, the replication
/// notification fired on the replica, and attributes that never leave the
/// authority.
use gasplus_shared::{presets, AttributeSet};
use gasplus_test::{
    assert_attribute_eq, assert_replicas_synced, init_logging, LoopbackTransport, RecordingHooks,
};

fn primary_pair() -> (AttributeSet, AttributeSet, RecordingHooks) {
    init_logging();
    let schema = presets::primary_attribute_set().unwrap();
    let hooks = RecordingHooks::new();
    let authority = AttributeSet::authority(schema.clone());
    let replica = AttributeSet::replica(schema).with_hooks(hooks.clone());
    (authority, replica, hooks)
}

#[test]
fn notification_fires_once_after_value_is_stored() {
    let (mut authority, mut replica, hooks) = primary_pair();
    let mut transport = LoopbackTransport::attach(&mut authority);

    authority.apply_change("Health", 10.0);
    transport.flush(&authority, &mut replica);
    hooks.clear();

    authority.apply_change("Health", 55.0);
    let notified = transport.flush(&authority, &mut replica);

    assert_eq!(notified.len(), 1);
    assert_eq!(notified[0].old, 10.0);
    assert_eq!(notified[0].new, 55.0);
    assert_eq!(hooks.notifications(), notified);
    assert_attribute_eq!(replica, "Health", 55.0);
}

#[test]
fn authority_clamps_before_shipping() {
    let (mut authority, mut replica, _hooks) = primary_pair();
    let mut transport = LoopbackTransport::attach(&mut authority);

    authority.apply_change("Health", -50.0);
    authority.apply_change("Mana", 900.0);
    transport.flush(&authority, &mut replica);

    assert_attribute_eq!(replica, "Health", 0.0);
    assert_attribute_eq!(replica, "Mana", 250.0);
}

#[test]
fn silent_attribute_replicates_without_notification() {
    let (mut authority, mut replica, hooks) = primary_pair();
    let mut transport = LoopbackTransport::attach(&mut authority);

    authority.apply_change("Stamina", 75.0);
    let notified = transport.flush(&authority, &mut replica);

    assert!(notified.is_empty());
    assert!(hooks.notifications().is_empty());
    assert_eq!(transport.shipped(), 1);
    assert_attribute_eq!(replica, "Stamina", 75.0);
}

#[test]
fn local_attribute_never_leaves_authority() {
    init_logging();
    let schema = presets::combat_attribute_set().unwrap();
    let hooks = RecordingHooks::new();
    let mut authority = AttributeSet::authority(schema.clone());
    let mut replica = AttributeSet::replica(schema).with_hooks(hooks.clone());
    let mut transport = LoopbackTransport::attach(&mut authority);

    authority.apply_change("DefensePower", 40.0);

    assert!(!transport.has_pending());
    assert!(transport.flush(&authority, &mut replica).is_empty());
    assert!(hooks.notifications().is_empty());
    assert_attribute_eq!(replica, "DefensePower", 0.0);
}

#[test]
fn repeated_commits_ship_latest_value_once() {
    let (mut authority, mut replica, _hooks) = primary_pair();
    let mut transport = LoopbackTransport::attach(&mut authority);

    authority.apply_change("Health", 80.0);
    authority.apply_change("Health", 60.0);
    authority.apply_change("Health", 70.0);
    let notified = transport.flush(&authority, &mut replica);

    assert_eq!(notified.len(), 1);
    assert_eq!(notified[0].new, 70.0);
    assert!(!transport.has_pending());
}

#[test]
fn observers_track_dirty_state_independently() {
    let (mut authority, mut replica, _hooks) = primary_pair();
    let mut transport = LoopbackTransport::attach(&mut authority);
    let observer = transport.observer();

    authority.apply_change("Mana", 10.0);
    transport.flush(&authority, &mut replica);

    assert!(!transport.has_pending());
    let pending: Vec<_> = observer.take_mask().iter_set().collect();
    assert_eq!(pending, vec![1]);
}

#[test]
fn new_replica_catches_up_with_sync_all() {
    let (mut authority, mut replica, hooks) = primary_pair();
    let mut transport = LoopbackTransport::attach(&mut authority);
    authority.apply_change("Health", 33.0);
    authority.apply_change("Mana", 120.0);
    authority.apply_change("Stamina", 12.0);

    let notified = transport.sync_all(&authority, &mut replica);

    assert_replicas_synced!(authority, replica);
    assert_eq!(notified.len(), 2);
    assert_eq!(hooks.notifications().len(), 2);
    assert!(!transport.has_pending());
}

#[test]
fn replica_local_commits_do_not_raise_dirty_signal() {
    let (mut authority, mut replica, _hooks) = primary_pair();
    let transport = LoopbackTransport::attach(&mut authority);
    let mut reverse = LoopbackTransport::attach(&mut replica);

    replica.apply_change("Health", 5.0);

    assert!(!reverse.has_pending());
    assert!(reverse.flush(&replica, &mut authority).is_empty());
    assert!(!transport.has_pending());
    assert_attribute_eq!(authority, "Health", 100.0);
}
