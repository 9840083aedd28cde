//! PacketCable MTA dialect.
//!
//! MTA configuration files share the DOCSIS TLV framing, and everything
//! voice-specific in them travels as SNMP MIB objects inside TLV 11 —
//! which the DOCSIS table already resolves, VarBind decomposition and
//! all. The only TLV PacketCable defines that DOCSIS doesn't is the
//! type-254 delimiter pair bracketing the telephony section, so that is
//! the whole table. It is consulted only when the DOCSIS table comes up
//! empty.

use super::{EnumDomain, MaxLength, MetadataSource, SpecEntry, Version};
use crate::value::ValueType;

const fn entry(
    name: &'static str,
    description: &'static str,
    value_type: ValueType,
    max_length: MaxLength,
) -> SpecEntry {
    SpecEntry {
        name,
        description,
        value_type,
        max_length,
        introduced: Version::V1_0,
        subtlv_support: matches!(value_type, ValueType::Compound),
        enum_domain: None,
        source: MetadataSource::MtaSpecs,
    }
}

pub static TELEPHONY_DELIMITER: EnumDomain = EnumDomain {
    name: "telephony_config_delimiter",
    width: 1,
    values: &[(1, "begin"), (255, "end")],
};

pub(crate) fn lookup(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        254 => {
            let mut e = entry(
                "Telephony Configuration File Delimiter",
                "Brackets the telephony section of an MTA file",
                ValueType::Enum,
                MaxLength::Bytes(1),
            );
            e.enum_domain = Some(&TELEPHONY_DELIMITER);
            e
        }
        _ => return None,
    })
}
