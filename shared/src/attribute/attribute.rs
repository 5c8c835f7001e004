use std::{any::Any, ops::Deref};

use wisp_serde::{BitReader, BitWrite, Serde};

use crate::{
    attribute::{propagation_binding, AttributeError, AttributeValue, Binding, SyncedAttribute, VALUE_KEY},
    authority::Authority,
    messages::{attribute_update, DecodeError},
    record::{Record, RecordError, RecordPrimitive},
    sync::channel::{OutboundMessage, SyncSender},
    types::{AttributeId, EntityId, SyncMode},
};

/// Owner-supplied closure that renders a human-readable string; never
/// persisted or encoded.
pub type DisplaySupplier = Box<dyn Fn() -> String + Send + Sync>;

/// A named, typed, persisted, network-replicated value holder.
///
/// An attribute starts out detached; registering it with an
/// [`AttributeSet`](crate::attribute::AttributeSet) binds it to an entity, an
/// authority role, and the entity's outbound sync channel. From then on
/// `set(.., SyncMode::Propagate)` enqueues exactly one update message, while
/// `SyncMode::LocalOnly` (the apply path for remote updates and persisted
/// records) never does.
pub struct Attribute<T: AttributeValue> {
    id: AttributeId,
    key: String,
    value: T,
    callbacks: Vec<Box<dyn FnMut(&T) + Send>>,
    display_name: Option<DisplaySupplier>,
    display_value: Option<DisplaySupplier>,
    binding: Option<Binding>,
}

impl<T: AttributeValue> Attribute<T> {
    pub fn new(id: impl Into<String>, key: impl Into<String>, initial: T) -> Self {
        Self {
            id: AttributeId::new(id),
            key: key.into(),
            value: initial,
            callbacks: Vec::new(),
            display_name: None,
            display_value: None,
            binding: None,
        }
    }

    pub fn with_display_name(mut self, supplier: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.display_name = Some(Box::new(supplier));
        self
    }

    pub fn with_display_value(mut self, supplier: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.display_value = Some(Box::new(supplier));
        self
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Registers a callback fired on every value change, local or applied
    pub fn on_change(&mut self, callback: impl FnMut(&T) + Send + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Replaces the stored value and fires every change callback. With
    /// `SyncMode::Propagate`, also enqueues one update message for the
    /// remote peer; this requires registration and the authoritative role.
    pub fn set(&mut self, value: T, mode: SyncMode) -> Result<(), AttributeError> {
        if !mode.propagates() {
            self.apply(value);
            return Ok(());
        }

        propagation_binding(&self.id, &self.binding)?;
        self.apply(value);
        self.send_update();
        Ok(())
    }

    pub(crate) fn apply(&mut self, value: T) {
        self.value = value;
        for callback in self.callbacks.iter_mut() {
            callback(&self.value);
        }
    }

    fn send_update(&self) {
        let Some(binding) = &self.binding else {
            return;
        };
        let bytes = attribute_update::encode(&binding.entity, &self.id, |writer| {
            self.value.ser(writer);
        });
        binding.sender.send(OutboundMessage {
            entity: binding.entity,
            bytes,
        });
    }
}

impl<T: AttributeValue> SyncedAttribute for Attribute<T> {
    fn id(&self) -> &AttributeId {
        &self.id
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn bind(&mut self, entity: EntityId, authority: Authority, sender: SyncSender) {
        self.binding = Some(Binding {
            entity,
            authority,
            sender,
        });
    }

    fn write_update(&self, writer: &mut dyn BitWrite) {
        self.value.ser(writer);
    }

    fn read_update(&mut self, reader: &mut BitReader) -> Result<(), DecodeError> {
        let value = T::de(reader)?;
        self.apply(value);
        Ok(())
    }

    fn write_record(&self, record: &mut Record) {
        record.put(VALUE_KEY, self.value.to_record_value());
    }

    fn read_record(&mut self, record: &Record) -> Result<(), RecordError> {
        let raw = record.get(VALUE_KEY).ok_or_else(|| RecordError::MissingKey {
            key: VALUE_KEY.into(),
        })?;
        let value = T::from_record_value(raw).ok_or_else(|| RecordError::WrongKind {
            key: VALUE_KEY.into(),
        })?;
        self.apply(value);
        Ok(())
    }

    fn display_name(&self) -> String {
        match &self.display_name {
            Some(supplier) => supplier(),
            None => self.key.clone(),
        }
    }

    fn display_value(&self) -> String {
        match &self.display_value {
            Some(supplier) => supplier(),
            None => format!("{:?}", self.value),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// Read-side convenience; mutation must go through `set`
impl<T: AttributeValue> Deref for Attribute<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}
