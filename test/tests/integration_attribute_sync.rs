//! Live attribute updates flowing host → replica: exactly one message per
//! propagated change, applied without echoing back.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use wisp_shared::{AttributeError, SyncMode};
use wisp_test::helpers::{companion::AutoswitchMode, peer_pair::PeerPair};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn propagated_float_update_reaches_replica() {
    init_logs();
    let mut pair = PeerPair::new();
    let entity = pair.entity;

    let handle = pair.host_handles.move_speed;
    pair.host
        .companion_mut(&entity)
        .attributes
        .get_mut(&handle)
        .set(1.1, SyncMode::Propagate)
        .unwrap();

    // Exactly one message crossed the wire
    assert_eq!(pair.flush_to_replica(), 1);

    let replica_handle = pair.replica_handles.move_speed;
    let replica_value = *pair
        .replica
        .companion(&entity)
        .attributes
        .get(&replica_handle)
        .get();
    assert_eq!(replica_value, 1.1);

    // Applying on the replica produced no echo
    assert!(pair.replica_outbox.is_empty());
}

#[test]
fn propagated_enum_update_resolves_through_the_table() {
    init_logs();
    let mut pair = PeerPair::new();
    let entity = pair.entity;

    let handle = pair.host_handles.autoswitch;
    pair.host
        .companion_mut(&entity)
        .attributes
        .get_mut(&handle)
        .set(AutoswitchMode::On, SyncMode::Propagate)
        .unwrap();

    assert_eq!(pair.flush_to_replica(), 1);

    let replica_handle = pair.replica_handles.autoswitch;
    let replica = pair.replica.companion(&entity);
    let attribute = replica.attributes.get(&replica_handle);
    assert_eq!(*attribute.get(), AutoswitchMode::On);
    assert_eq!(attribute.ordinal(), 1);
}

#[test]
fn local_only_set_produces_no_message() {
    init_logs();
    let mut pair = PeerPair::new();
    let entity = pair.entity;

    let handle = pair.host_handles.move_speed;
    pair.host
        .companion_mut(&entity)
        .attributes
        .get_mut(&handle)
        .set(2.0, SyncMode::LocalOnly)
        .unwrap();

    assert!(pair.host_outbox.is_empty());
    assert_eq!(pair.flush_to_replica(), 0);
}

#[test]
fn replica_cannot_originate() {
    init_logs();
    let mut pair = PeerPair::new();
    let entity = pair.entity;

    let handle = pair.replica_handles.move_speed;
    let result = pair
        .replica
        .companion_mut(&entity)
        .attributes
        .get_mut(&handle)
        .set(9.0, SyncMode::Propagate);

    assert!(matches!(
        result,
        Err(AttributeError::NotAuthoritative { .. })
    ));

    // The rejected write left the value alone and queued nothing
    let value = *pair.replica.companion(&entity).attributes.get(&handle).get();
    assert_eq!(value, 1.0);
    assert!(pair.replica_outbox.is_empty());
}

#[test]
fn change_callbacks_fire_on_both_peers() {
    init_logs();
    let mut pair = PeerPair::new();
    let entity = pair.entity;

    let host_calls = Arc::new(AtomicU32::new(0));
    let replica_calls = Arc::new(AtomicU32::new(0));

    {
        let handle = pair.host_handles.move_speed;
        let calls = host_calls.clone();
        pair.host
            .companion_mut(&entity)
            .attributes
            .get_mut(&handle)
            .on_change(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
    }
    {
        let handle = pair.replica_handles.move_speed;
        let calls = replica_calls.clone();
        pair.replica
            .companion_mut(&entity)
            .attributes
            .get_mut(&handle)
            .on_change(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
    }

    let handle = pair.host_handles.move_speed;
    pair.host
        .companion_mut(&entity)
        .attributes
        .get_mut(&handle)
        .set(1.3, SyncMode::Propagate)
        .unwrap();
    pair.flush_to_replica();

    assert_eq!(host_calls.load(Ordering::SeqCst), 1);
    assert_eq!(replica_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn each_propagated_set_sends_exactly_one_message() {
    init_logs();
    let mut pair = PeerPair::new();
    let entity = pair.entity;

    let speed = pair.host_handles.move_speed;
    let autoswitch = pair.host_handles.autoswitch;

    let companion = pair.host.companion_mut(&entity);
    companion
        .attributes
        .get_mut(&speed)
        .set(1.1, SyncMode::Propagate)
        .unwrap();
    companion
        .attributes
        .get_mut(&autoswitch)
        .set(AutoswitchMode::On, SyncMode::Propagate)
        .unwrap();
    companion
        .attributes
        .get_mut(&speed)
        .set(1.2, SyncMode::Propagate)
        .unwrap();

    assert_eq!(pair.flush_to_replica(), 3);

    let replica = pair.replica.companion(&entity);
    assert_eq!(
        *replica.attributes.get(&pair.replica_handles.move_speed).get(),
        1.2
    );
}
