use wisp_serde::{BitWrite, BitWriter, Serde};

use crate::{
    messages::{write_header, MessageKind},
    types::{AttributeId, EntityId},
};

/// Encodes one live attribute update:
/// `[header][attribute id][attribute-specific payload]`.
/// The payload is only interpretable by the attribute the id resolves to.
pub(crate) fn encode(
    entity: &EntityId,
    attribute: &AttributeId,
    payload: impl FnOnce(&mut dyn BitWrite),
) -> Vec<u8> {
    let mut writer = BitWriter::new();
    write_header(&mut writer, MessageKind::AttributeUpdate, entity);
    attribute.ser(&mut writer);
    payload(&mut writer);
    writer.to_bytes()
}
