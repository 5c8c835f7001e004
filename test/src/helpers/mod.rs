pub mod peer_pair;
pub mod test_world;

pub use companion::{
    levels_of, spawn_companion, AutoswitchMode, Companion, CompanionHandles, AUTOSWITCH,
    MOVE_SPEED,
};
pub use peer_pair::PeerPair;
pub use test_graph::{general_skill_graph, ids};
pub use test_world::TestWorld;
