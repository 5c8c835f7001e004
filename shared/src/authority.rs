/// Which role a peer holds for a given entity instance.
///
/// Exactly one peer is `Authoritative` per entity and is the only side
/// permitted to originate state changes (`SyncMode::Propagate`); every
/// `Replica` only ever applies updates arriving from messages. The check
/// happens at the mutation API boundary, not by convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Authority {
    Authoritative,
    Replica,
}

impl Authority {
    pub fn can_originate(&self) -> bool {
        matches!(self, Authority::Authoritative)
    }

    pub fn invert(self) -> Self {
        match self {
            Authority::Authoritative => Authority::Replica,
            Authority::Replica => Authority::Authoritative,
        }
    }
}
