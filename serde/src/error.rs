use thiserror::Error;

/// Errors surfaced by the bit-level codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The bit stream ended before the value was fully read
    #[error("bit stream exhausted before the value was fully read")]
    Exhausted,

    /// The bits read do not form a valid encoding of the expected type
    #[error("bit stream contained an invalid value encoding")]
    InvalidValue,
}
