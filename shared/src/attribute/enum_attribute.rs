use std::{any::Any, fmt::Debug, ops::Deref};

use wisp_serde::{BitReader, BitWrite, Serde};

use crate::{
    attribute::{propagation_binding, AttributeError, Binding, SyncedAttribute, VALUE_KEY},
    authority::Authority,
    messages::{attribute_update, DecodeError},
    record::{Record, RecordError, RecordValue},
    sync::channel::{OutboundMessage, SyncSender},
    types::{AttributeId, EntityId, SyncMode},
};

/// Explicit bidirectional ordinal ↔ variant table, supplied at attribute
/// construction. Ordinals are positions in the variant list, so the list
/// must be identical on both peers and append-only once shipped.
#[derive(Clone)]
pub struct EnumTable<T: Clone + PartialEq> {
    variants: Vec<T>,
}

impl<T: Clone + PartialEq> EnumTable<T> {
    pub fn new(variants: Vec<T>) -> Result<Self, AttributeError> {
        if variants.is_empty() {
            return Err(AttributeError::EmptyEnumTable);
        }
        Ok(Self { variants })
    }

    pub fn len(&self) -> u32 {
        self.variants.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn ordinal_of(&self, value: &T) -> Option<u32> {
        self.variants
            .iter()
            .position(|variant| variant == value)
            .map(|position| position as u32)
    }

    pub fn variant_at(&self, ordinal: u32) -> Option<&T> {
        self.variants.get(ordinal as usize)
    }
}

/// An attribute whose value is drawn from a fixed enumeration, encoded and
/// persisted as the value's ordinal in its [`EnumTable`].
pub struct EnumAttribute<T: Clone + PartialEq + Debug + Send + 'static> {
    id: AttributeId,
    key: String,
    table: EnumTable<T>,
    value: T,
    ordinal: u32,
    callbacks: Vec<Box<dyn FnMut(&T) + Send>>,
    binding: Option<Binding>,
}

impl<T: Clone + PartialEq + Debug + Send + 'static> EnumAttribute<T> {
    /// Fails with `UnknownVariant` if `initial` is absent from the table
    pub fn new(
        id: impl Into<String>,
        key: impl Into<String>,
        table: EnumTable<T>,
        initial: T,
    ) -> Result<Self, AttributeError> {
        let id = AttributeId::new(id);
        let Some(ordinal) = table.ordinal_of(&initial) else {
            return Err(AttributeError::UnknownVariant { id });
        };
        Ok(Self {
            id,
            key: key.into(),
            table,
            value: initial,
            ordinal,
            callbacks: Vec::new(),
            binding: None,
        })
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn table(&self) -> &EnumTable<T> {
        &self.table
    }

    pub fn on_change(&mut self, callback: impl FnMut(&T) + Send + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Counterpart of [`Attribute::set`](crate::attribute::Attribute::set);
    /// additionally rejects values absent from the enum table.
    pub fn set(&mut self, value: T, mode: SyncMode) -> Result<(), AttributeError> {
        let Some(ordinal) = self.table.ordinal_of(&value) else {
            return Err(AttributeError::UnknownVariant {
                id: self.id.clone(),
            });
        };

        if !mode.propagates() {
            self.apply(value, ordinal);
            return Ok(());
        }

        propagation_binding(&self.id, &self.binding)?;
        self.apply(value, ordinal);
        self.send_update();
        Ok(())
    }

    fn apply(&mut self, value: T, ordinal: u32) {
        self.value = value;
        self.ordinal = ordinal;
        for callback in self.callbacks.iter_mut() {
            callback(&self.value);
        }
    }

    fn send_update(&self) {
        let Some(binding) = &self.binding else {
            return;
        };
        let bytes = attribute_update::encode(&binding.entity, &self.id, |writer| {
            self.ordinal.ser(writer);
        });
        binding.sender.send(OutboundMessage {
            entity: binding.entity,
            bytes,
        });
    }
}

impl<T: Clone + PartialEq + Debug + Send + 'static> SyncedAttribute for EnumAttribute<T> {
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
        self.ordinal.ser(writer);
    }

    fn read_update(&mut self, reader: &mut BitReader) -> Result<(), DecodeError> {
        let ordinal = u32::de(reader)?;
        let Some(value) = self.table.variant_at(ordinal).cloned() else {
            // Prior value stays untouched
            return Err(DecodeError::OrdinalOutOfRange {
                ordinal,
                len: self.table.len(),
            });
        };
        self.apply(value, ordinal);
        Ok(())
    }

    fn write_record(&self, record: &mut Record) {
        record.put(VALUE_KEY, RecordValue::I32(self.ordinal as i32));
    }

    fn read_record(&mut self, record: &Record) -> Result<(), RecordError> {
        let raw = record.get_i32(VALUE_KEY)?;
        let resolved = u32::try_from(raw)
            .ok()
            .and_then(|ordinal| self.table.variant_at(ordinal).cloned());
        let Some(value) = resolved else {
            return Err(RecordError::OrdinalOutOfRange {
                key: VALUE_KEY.into(),
                ordinal: raw,
                len: self.table.len(),
            });
        };
        let ordinal = raw as u32;
        self.apply(value, ordinal);
        Ok(())
    }

    fn display_name(&self) -> String {
        self.key.clone()
    }

    fn display_value(&self) -> String {
        format!("{:?}", self.value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: Clone + PartialEq + Debug + Send + 'static> Deref for EnumAttribute<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}
