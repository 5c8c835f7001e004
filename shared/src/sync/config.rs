use crate::messages::PROTOCOL_VERSION;

/// Tuning knobs for the message boundary, cloned into every
/// [`UpdateReceiver`](crate::messages::UpdateReceiver).
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Protocol version accepted from the wire. Envelopes stamped with any
    /// other version are rejected before their payload is interpreted.
    pub protocol_version: u8,
    /// Resolution failures (unknown entity, attribute, group or skill id)
    /// point at version skew between peers. Under `strict` they additionally
    /// trip a debug assertion; otherwise the message is just dropped and
    /// logged. Malformed payloads are always dropped and logged.
    pub strict: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            strict: cfg!(debug_assertions),
        }
    }
}
