use std::{any::Any, fmt::Debug};

use wisp_serde::{BitReader, BitWrite, Serde};

use crate::{
    authority::Authority,
    messages::DecodeError,
    record::{Record, RecordError, RecordPrimitive},
    sync::channel::SyncSender,
    types::{AttributeId, EntityId},
};

mod attribute;
mod attribute_set;
mod enum_attribute;
mod error;
mod level;

pub use attribute::{Attribute, DisplaySupplier};
pub use attribute_set::{AttributeHandle, AttributeSet};
pub use enum_attribute::{EnumAttribute, EnumTable};
pub use error::AttributeError;
pub use level::{
    xp_for_level, Level, LevelProvider, LevelRequirement, LevelSnapshot, LevelTarget,
};

/// Key the current value persists under; extension keys sit beside it
pub(crate) const VALUE_KEY: &str = "value";

/// Everything an attribute's value type must support: an exact wire
/// round-trip plus storage as a record primitive.
pub trait AttributeValue: Serde + RecordPrimitive + Debug + Send + 'static {}

impl<T: Serde + RecordPrimitive + Debug + Send + 'static> AttributeValue for T {}

/// Object-safe surface the attribute container works through. The two
/// implementations are [`Attribute`] (any [`AttributeValue`]) and
/// [`EnumAttribute`] (enumeration values encoded as ordinals).
pub trait SyncedAttribute: Send {
    fn id(&self) -> &AttributeId;
    fn key(&self) -> &str;

    /// Wires the attribute to its owning entity at registration
    fn bind(&mut self, entity: EntityId, authority: Authority, sender: SyncSender);

    /// Writes the current value's wire payload
    fn write_update(&self, writer: &mut dyn BitWrite);

    /// Reads a wire payload and applies it without propagating
    fn read_update(&mut self, reader: &mut BitReader) -> Result<(), DecodeError>;

    /// Emits the current value into a durable record
    fn write_record(&self, record: &mut Record);

    /// Restores the value from a durable record without propagating
    fn read_record(&mut self, record: &Record) -> Result<(), RecordError>;

    fn display_name(&self) -> String;
    fn display_value(&self) -> String;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The per-attribute wiring installed by `AttributeSet::register`
pub(crate) struct Binding {
    pub(crate) entity: EntityId,
    pub(crate) authority: Authority,
    pub(crate) sender: SyncSender,
}

/// Boundary check for originating a change: the attribute must be registered
/// and its container must hold the authoritative role.
pub(crate) fn propagation_binding<'b>(
    id: &AttributeId,
    binding: &'b Option<Binding>,
) -> Result<&'b Binding, AttributeError> {
    let Some(binding) = binding else {
        return Err(AttributeError::Unbound { id: id.clone() });
    };
    if !binding.authority.can_originate() {
        return Err(AttributeError::NotAuthoritative {
            id: id.clone(),
            authority: binding.authority,
        });
    }
    Ok(binding)
}
