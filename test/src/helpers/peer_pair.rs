use wisp_shared::{Authority, EntityId, SyncConfig, SyncReceiver, UpdateReceiver};

use crate::helpers::{
    companion::{spawn_companion, CompanionHandles},
    test_graph::general_skill_graph,
    test_world::TestWorld,
};

/// Two connected peers observing one companion: the authoritative host and a
/// replica, built by the identical construction sequence. Messages flow
/// host → replica through `flush_to_replica`.
pub struct PeerPair {
    pub entity: EntityId,
    pub host: TestWorld,
    pub host_handles: CompanionHandles,
    pub host_outbox: SyncReceiver,
    pub replica: TestWorld,
    pub replica_handles: CompanionHandles,
    pub replica_outbox: SyncReceiver,
    pub receiver: UpdateReceiver,
}

impl PeerPair {
    pub fn new() -> Self {
        let entity = EntityId::new(1);
        let graph = general_skill_graph();

        let (host_companion, host_handles, host_outbox) =
            spawn_companion(entity, Authority::Authoritative, graph.clone());
        let mut host = TestWorld::new();
        host.insert(entity, host_companion);

        let (replica_companion, replica_handles, replica_outbox) =
            spawn_companion(entity, Authority::Replica, graph);
        let mut replica = TestWorld::new();
        replica.insert(entity, replica_companion);

        Self {
            entity,
            host,
            host_handles,
            host_outbox,
            replica,
            replica_handles,
            replica_outbox,
            receiver: UpdateReceiver::new(SyncConfig::default()),
        }
    }

    /// Drains the host outbox into the replica; returns how many messages
    /// crossed the wire
    pub fn flush_to_replica(&mut self) -> usize {
        let messages = self.host_outbox.drain();
        for message in &messages {
            self.receiver
                .receive(&message.bytes, &mut self.replica)
                .expect("replica applies host message");
        }
        messages.len()
    }
}

impl Default for PeerPair {
    fn default() -> Self {
        Self::new()
    }
}
