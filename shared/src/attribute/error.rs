use thiserror::Error;

use crate::{authority::Authority, types::AttributeId};

/// Errors that can occur during attribute operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// Attempted to propagate a change before the attribute was registered
    #[error("attribute `{id}` is not registered with an AttributeSet, so it cannot propagate")]
    Unbound { id: AttributeId },

    /// Attempted to originate a change from a non-authoritative container
    #[error("attribute `{id}` may only propagate from the Authoritative role (current role: {authority:?})")]
    NotAuthoritative {
        id: AttributeId,
        authority: Authority,
    },

    /// Attempted to register a second attribute under an id already taken
    #[error("attribute id `{id}` is already registered with this AttributeSet")]
    DuplicateId { id: AttributeId },

    /// The value is not a member of the attribute's enum table
    #[error("value is not a member of the enum table for attribute `{id}`")]
    UnknownVariant { id: AttributeId },

    /// An enum table must describe at least one variant
    #[error("enum table must contain at least one variant")]
    EmptyEnumTable,

    /// The handle was produced by a different set, or for a different type
    #[error("attribute handle does not belong to this AttributeSet")]
    BadHandle,
}
