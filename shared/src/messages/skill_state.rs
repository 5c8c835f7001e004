use uuid::Uuid;

use wisp_serde::{BitWriter, Serde};

use crate::{
    messages::{write_header, MessageKind},
    skill::SkillState,
    types::EntityId,
};

/// Encodes one skill state change:
/// `[header][skill id][group id][state ordinal]`
pub(crate) fn encode(
    entity: &EntityId,
    skill: &Uuid,
    group: &Uuid,
    state: SkillState,
) -> Vec<u8> {
    let mut writer = BitWriter::new();
    write_header(&mut writer, MessageKind::SkillState, entity);
    skill.ser(&mut writer);
    group.ser(&mut writer);
    state.ordinal().ser(&mut writer);
    writer.to_bytes()
}
