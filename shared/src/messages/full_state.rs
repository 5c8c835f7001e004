use wisp_serde::BitWriter;

use crate::{
    attribute::AttributeSet,
    messages::{write_header, MessageKind},
    skill::SkillSet,
};

/// Encodes the full-state snapshot a replica applies when it first observes
/// an entity: every attribute payload in registration order, then every
/// skill state in graph order. Positional order is the wire contract here,
/// which is why both peers must run the same construction sequence.
pub fn encode_full_state(attributes: &AttributeSet, skills: &SkillSet) -> Vec<u8> {
    debug_assert_eq!(
        attributes.entity(),
        skills.entity(),
        "snapshot spans one entity"
    );

    let mut writer = BitWriter::new();
    write_header(&mut writer, MessageKind::FullState, &attributes.entity());
    attributes.write_full_state(&mut writer);
    skills.write_full_state(&mut writer);
    writer.to_bytes()
}
