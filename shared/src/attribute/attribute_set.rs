use std::{collections::HashMap, marker::PhantomData};

use log::{debug, info};

use wisp_serde::{BitReader, BitWrite};

use crate::{
    attribute::{AttributeError, SyncedAttribute},
    authority::Authority,
    messages::{DecodeError, ProtocolMismatchError, SyncError},
    record::{Record, RecordError, RecordValue},
    sync::channel::SyncSender,
    types::{AttributeId, EntityId},
};

/// Typed ticket into an [`AttributeSet`], returned by `register`. The type
/// parameter is the concrete attribute type, so lookups come back typed.
#[derive(Debug)]
pub struct AttributeHandle<A> {
    slot: usize,
    marker: PhantomData<fn() -> A>,
}

impl<A> Clone for AttributeHandle<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for AttributeHandle<A> {}

/// An entity's ordered collection of attributes.
///
/// Registration order is significant: it is the wire contract of the
/// full-state snapshot and must be identical on both peers, which in practice
/// means both peers run the same construction sequence. Live updates are
/// addressed by stable attribute id instead, resolved through the id map.
pub struct AttributeSet {
    entity: EntityId,
    authority: Authority,
    attributes: Vec<Box<dyn SyncedAttribute>>,
    slots_by_id: HashMap<AttributeId, usize>,
    sender: SyncSender,
}

impl AttributeSet {
    pub fn new(entity: EntityId, authority: Authority, sender: SyncSender) -> Self {
        Self {
            entity,
            authority,
            attributes: Vec::new(),
            slots_by_id: HashMap::new(),
            sender,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Adds an attribute to the end of the set and wires it to this entity's
    /// sync channel. Fails if the attribute's id is already taken.
    pub fn register<A: SyncedAttribute + 'static>(
        &mut self,
        mut attribute: A,
    ) -> Result<AttributeHandle<A>, AttributeError> {
        let id = attribute.id().clone();
        if self.slots_by_id.contains_key(&id) {
            return Err(AttributeError::DuplicateId { id });
        }

        attribute.bind(self.entity, self.authority, self.sender.clone());

        let slot = self.attributes.len();
        info!(
            "AttributeSet: registering attribute `{}` for entity {:?}",
            id, self.entity
        );
        self.attributes.push(Box::new(attribute));
        self.slots_by_id.insert(id, slot);

        Ok(AttributeHandle {
            slot,
            marker: PhantomData,
        })
    }

    /// Typed access through a handle (panicking version)
    ///
    /// # Panics
    ///
    /// Panics if the handle was produced by a different set.
    /// Consider using `try_get` for non-panicking error handling.
    pub fn get<A: SyncedAttribute + 'static>(&self, handle: &AttributeHandle<A>) -> &A {
        self.try_get(handle)
            .expect("attribute handle does not belong to this AttributeSet")
    }

    /// Typed access through a handle (non-panicking version)
    pub fn try_get<A: SyncedAttribute + 'static>(
        &self,
        handle: &AttributeHandle<A>,
    ) -> Result<&A, AttributeError> {
        self.attributes
            .get(handle.slot)
            .and_then(|boxed| boxed.as_any().downcast_ref::<A>())
            .ok_or(AttributeError::BadHandle)
    }

    /// Typed mutable access through a handle (panicking version)
    ///
    /// # Panics
    ///
    /// Panics if the handle was produced by a different set.
    /// Consider using `try_get_mut` for non-panicking error handling.
    pub fn get_mut<A: SyncedAttribute + 'static>(
        &mut self,
        handle: &AttributeHandle<A>,
    ) -> &mut A {
        self.try_get_mut(handle)
            .expect("attribute handle does not belong to this AttributeSet")
    }

    /// Typed mutable access through a handle (non-panicking version)
    pub fn try_get_mut<A: SyncedAttribute + 'static>(
        &mut self,
        handle: &AttributeHandle<A>,
    ) -> Result<&mut A, AttributeError> {
        self.attributes
            .get_mut(handle.slot)
            .and_then(|boxed| boxed.as_any_mut().downcast_mut::<A>())
            .ok_or(AttributeError::BadHandle)
    }

    /// Typed lookup by stable id; `None` if the id is unknown here or the
    /// attribute is of a different concrete type
    pub fn get_by_id<A: SyncedAttribute + 'static>(&self, id: &AttributeId) -> Option<&A> {
        let slot = *self.slots_by_id.get(id)?;
        self.attributes[slot].as_any().downcast_ref::<A>()
    }

    pub fn get_by_id_mut<A: SyncedAttribute + 'static>(
        &mut self,
        id: &AttributeId,
    ) -> Option<&mut A> {
        let slot = *self.slots_by_id.get(id)?;
        self.attributes[slot].as_any_mut().downcast_mut::<A>()
    }

    pub fn contains(&self, id: &AttributeId) -> bool {
        self.slots_by_id.contains_key(id)
    }

    /// Position of an attribute in registration order
    pub fn index_of(&self, id: &AttributeId) -> Option<usize> {
        self.slots_by_id.get(id).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = &AttributeId> {
        self.attributes.iter().map(|attribute| attribute.id())
    }

    // Receive path

    /// Applies a live update arriving from the remote peer. Resolution goes
    /// through the id map; an unknown id is version skew, not corruption of
    /// whatever attribute happens to sit at some index.
    pub fn apply_update(
        &mut self,
        id: &AttributeId,
        reader: &mut BitReader,
    ) -> Result<(), SyncError> {
        let Some(slot) = self.slots_by_id.get(id).copied() else {
            return Err(ProtocolMismatchError::UnknownAttribute {
                entity: self.entity,
                attribute: id.clone(),
            }
            .into());
        };
        self.attributes[slot].read_update(reader)?;
        Ok(())
    }

    // Persistence

    /// One sub-record per attribute, keyed by attribute id
    pub fn write_record(&self) -> Record {
        let mut record = Record::new();
        for attribute in &self.attributes {
            let mut sub = Record::new();
            attribute.write_record(&mut sub);
            record.put(attribute.id().as_str(), RecordValue::Record(sub));
        }
        record
    }

    /// Restores every attribute present in the record; attributes without a
    /// sub-record keep their current value, so older saves stay loadable.
    pub fn read_record(&mut self, record: &Record) -> Result<(), RecordError> {
        for attribute in self.attributes.iter_mut() {
            let Some(RecordValue::Record(sub)) = record.get(attribute.id().as_str()) else {
                debug!(
                    "AttributeSet: no persisted entry for attribute `{}`, keeping current value",
                    attribute.id()
                );
                continue;
            };
            attribute.read_record(sub)?;
        }
        Ok(())
    }

    // Full-state snapshot

    /// Writes every attribute payload in registration order
    pub fn write_full_state(&self, writer: &mut dyn BitWrite) {
        for attribute in &self.attributes {
            attribute.write_update(writer);
        }
    }

    /// Reads every attribute payload in registration order
    pub fn read_full_state(&mut self, reader: &mut BitReader) -> Result<(), DecodeError> {
        for attribute in self.attributes.iter_mut() {
            attribute.read_update(reader)?;
        }
        Ok(())
    }
}
