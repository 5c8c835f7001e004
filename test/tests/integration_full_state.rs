//! The full-state snapshot a replica applies on first observing an entity,
//! plus the registration-order stability it depends on.

use wisp_shared::{encode_full_state, Authority, EntityId, SkillState, SyncMode};
use wisp_test::helpers::{
    companion::{spawn_companion, AutoswitchMode},
    peer_pair::PeerPair,
    test_graph::{general_skill_graph, ids},
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn snapshot_brings_a_fresh_replica_up_to_date() {
    init_logs();
    let mut pair = PeerPair::new();
    let entity = pair.entity;

    // Mutate the host without live sync, as if the replica were not yet
    // observing
    {
        let companion = pair.host.companion_mut(&entity);
        let speed = pair.host_handles.move_speed;
        let autoswitch = pair.host_handles.autoswitch;
        let combat = pair.host_handles.combat_level;
        companion
            .attributes
            .get_mut(&speed)
            .set(1.2, SyncMode::LocalOnly)
            .unwrap();
        companion
            .attributes
            .get_mut(&autoswitch)
            .set(AutoswitchMode::On, SyncMode::LocalOnly)
            .unwrap();
        companion
            .attributes
            .get_mut(&combat)
            .set(42, SyncMode::LocalOnly)
            .unwrap();
        companion
            .skills
            .set_state(
                &ids::GENERAL_GROUP,
                &ids::SPEED_1,
                SkillState::Purchased,
                SyncMode::LocalOnly,
            )
            .unwrap();
    }
    assert!(pair.host_outbox.is_empty());

    // Snapshot and apply on the replica
    let companion = pair.host.companion(&entity);
    let snapshot = encode_full_state(&companion.attributes, &companion.skills);
    pair.receiver
        .receive(&snapshot, &mut pair.replica)
        .expect("replica applies snapshot");

    let replica = pair.replica.companion(&entity);
    assert_eq!(
        *replica
            .attributes
            .get(&pair.replica_handles.move_speed)
            .get(),
        1.2
    );
    assert_eq!(
        *replica
            .attributes
            .get(&pair.replica_handles.autoswitch)
            .get(),
        AutoswitchMode::On
    );
    assert_eq!(
        *replica
            .attributes
            .get(&pair.replica_handles.combat_level)
            .get(),
        42
    );
    assert_eq!(
        replica
            .skills
            .state(&ids::GENERAL_GROUP, &ids::SPEED_1)
            .unwrap(),
        SkillState::Purchased
    );
    assert!(pair.replica_outbox.is_empty());
}

#[test]
fn identical_construction_sequences_agree_on_ordering() {
    init_logs();
    let entity = EntityId::new(3);
    let graph = general_skill_graph();

    let (first, _, _) = spawn_companion(entity, Authority::Authoritative, graph.clone());
    let (second, _, _) = spawn_companion(entity, Authority::Replica, graph);

    let first_ids: Vec<_> = first.attributes.ids().cloned().collect();
    let second_ids: Vec<_> = second.attributes.ids().cloned().collect();
    assert_eq!(first_ids, second_ids);

    for id in &first_ids {
        assert_eq!(first.attributes.index_of(id), second.attributes.index_of(id));
    }

    // Equal state encodes to equal snapshot bytes
    let first_snapshot = encode_full_state(&first.attributes, &first.skills);
    let second_snapshot = encode_full_state(&second.attributes, &second.skills);
    assert_eq!(first_snapshot, second_snapshot);
}

#[test]
fn attribute_records_round_trip() {
    init_logs();
    let mut pair = PeerPair::new();
    let entity = pair.entity;

    {
        let companion = pair.host.companion_mut(&entity);
        let speed = pair.host_handles.move_speed;
        let autoswitch = pair.host_handles.autoswitch;
        companion
            .attributes
            .get_mut(&speed)
            .set(1.7, SyncMode::LocalOnly)
            .unwrap();
        companion
            .attributes
            .get_mut(&autoswitch)
            .set(AutoswitchMode::On, SyncMode::LocalOnly)
            .unwrap();
    }

    let record = pair.host.companion(&entity).attributes.write_record();

    // Restore into the replica's fresh containers, as a save-load would
    let replica = pair.replica.companion_mut(&entity);
    replica.attributes.read_record(&record).unwrap();

    assert_eq!(
        *replica
            .attributes
            .get(&pair.replica_handles.move_speed)
            .get(),
        1.7
    );
    assert_eq!(
        *replica
            .attributes
            .get(&pair.replica_handles.autoswitch)
            .get(),
        AutoswitchMode::On
    );

    // Restoring never syncs
    assert!(pair.replica_outbox.is_empty());
}

#[test]
fn skill_records_round_trip() {
    init_logs();
    let mut pair = PeerPair::new();
    let entity = pair.entity;

    {
        let companion = pair.host.companion_mut(&entity);
        companion
            .skills
            .set_state(
                &ids::GENERAL_GROUP,
                &ids::SPEED_1,
                SkillState::Purchased,
                SyncMode::LocalOnly,
            )
            .unwrap();
        companion
            .skills
            .set_state(
                &ids::GENERAL_GROUP,
                &ids::SPEED_2,
                SkillState::Unlocked,
                SyncMode::LocalOnly,
            )
            .unwrap();
    }

    let record = pair.host.companion(&entity).skills.write_record();

    let replica = pair.replica.companion_mut(&entity);
    replica.skills.read_record(&record).unwrap();

    assert_eq!(
        replica
            .skills
            .state(&ids::GENERAL_GROUP, &ids::SPEED_1)
            .unwrap(),
        SkillState::Purchased
    );
    assert_eq!(
        replica
            .skills
            .state(&ids::GENERAL_GROUP, &ids::SPEED_2)
            .unwrap(),
        SkillState::Unlocked
    );
    assert_eq!(
        replica
            .skills
            .state(&ids::GENERAL_GROUP, &ids::HEAL)
            .unwrap(),
        SkillState::Unlocked
    );
}

#[test]
fn partial_record_keeps_unlisted_state() {
    init_logs();
    let mut pair = PeerPair::new();
    let entity = pair.entity;

    // A record written before some attribute existed: drop one sub-record
    let full = pair.host.companion(&entity).attributes.write_record();
    let mut partial = wisp_shared::Record::new();
    for key in full.keys() {
        if key == "move_speed" {
            continue;
        }
        partial.put(key, full.get(key).unwrap().clone());
    }

    let replica = pair.replica.companion_mut(&entity);
    let speed_before = *replica
        .attributes
        .get(&pair.replica_handles.move_speed)
        .get();
    replica.attributes.read_record(&partial).unwrap();

    let speed_after = *replica
        .attributes
        .get(&pair.replica_handles.move_speed)
        .get();
    assert_eq!(speed_before, speed_after);
}
