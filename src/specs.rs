//! The specification registry: immutable tables mapping (context, type) to
//! semantic metadata.
//!
//! Three layers, consulted in order: dialect tables keyed by context-path
//! suffix (deep sub-TLV trees like L2VPN service multiplexing), per-parent
//! sub-TLV tables, and the versioned top-level table. Lookups are total —
//! a type nobody knows comes back as an explicit unknown entry, never an
//! error — and everything here is `'static`, so the registry is free to
//! share across threads.

pub mod docsis;
pub mod mta;
pub mod subtlv;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::value::ValueType;

/// DOCSIS releases, totally ordered. An entry introduced at version V is
/// visible at every version ≥ V.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Version {
    #[serde(rename = "1.0")]
    V1_0,
    #[serde(rename = "1.1")]
    V1_1,
    #[serde(rename = "2.0")]
    V2_0,
    #[serde(rename = "3.0")]
    V3_0,
    #[serde(rename = "3.1")]
    V3_1,
}

impl Version {
    pub const LATEST: Version = Version::V3_1;

    pub const ALL: [Version; 5] = [
        Version::V1_0,
        Version::V1_1,
        Version::V2_0,
        Version::V3_0,
        Version::V3_1,
    ];

    /// Is an entry introduced at `introduced` visible at this version?
    pub fn supports(self, introduced: Version) -> bool {
        self >= introduced
    }

    pub fn name(self) -> &'static str {
        match self {
            Version::V1_0 => "1.0",
            Version::V1_1 => "1.1",
            Version::V2_0 => "2.0",
            Version::V3_0 => "3.0",
            Version::V3_1 => "3.1",
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Ok(match s.trim() {
            "1.0" => Version::V1_0,
            "1.1" => Version::V1_1,
            "2.0" => Version::V2_0,
            "3.0" => Version::V3_0,
            "3.1" => Version::V3_1,
            other => {
                return Err(Error::InvalidValue {
                    field: "docsis_version",
                    value: other.to_string(),
                    expected: "one of 1.0, 1.1, 2.0, 3.0, 3.1",
                });
            }
        })
    }
}

/// Coarse grouping inferred from the type number alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BasicConfiguration,
    SecurityPrivacy,
    AdvancedFeatures,
    Docsis30,
    Docsis31,
    VendorSpecific,
    Reserved,
}

impl Category {
    pub fn for_type(typ: u8) -> Category {
        match typ {
            1..=30 => Category::BasicConfiguration,
            31..=42 => Category::SecurityPrivacy,
            43..=63 => Category::AdvancedFeatures,
            64..=76 => Category::Docsis30,
            77..=85 => Category::Docsis31,
            200..=254 => Category::VendorSpecific,
            _ => Category::Reserved,
        }
    }
}

/// Wire-length cap for a TLV value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxLength {
    Unbounded,
    Bytes(usize),
}

impl MaxLength {
    pub fn limit(self) -> Option<usize> {
        match self {
            MaxLength::Unbounded => None,
            MaxLength::Bytes(n) => Some(n),
        }
    }
}

/// Which table an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataSource {
    DocsisSpecs,
    MtaSpecs,
    Unknown,
}

/// An integer-to-name mapping for enumerated TLVs. `width` is the wire
/// width of the underlying integer in bytes.
#[derive(Debug)]
pub struct EnumDomain {
    pub name: &'static str,
    pub width: usize,
    pub values: &'static [(u32, &'static str)],
}

impl EnumDomain {
    pub fn name_of(&self, value: u32) -> Option<&'static str> {
        self.values
            .iter()
            .find_map(|&(v, name)| (v == value).then_some(name))
    }

    /// Case-insensitive reverse lookup.
    pub fn value_of(&self, name: &str) -> Option<u32> {
        let wanted = name.trim();
        self.values
            .iter()
            .find_map(|&(v, n)| n.eq_ignore_ascii_case(wanted).then_some(v))
    }
}

/// One registry record.
#[derive(Debug, Clone, Copy)]
pub struct SpecEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub value_type: ValueType,
    pub max_length: MaxLength,
    pub introduced: Version,
    pub subtlv_support: bool,
    pub enum_domain: Option<&'static EnumDomain>,
    pub source: MetadataSource,
}

impl SpecEntry {
    pub fn is_known(&self) -> bool {
        self.source != MetadataSource::Unknown
    }
}

/// The entry every unknown type resolves to. Lookup is total by design:
/// parse never fails on an unrecognized type.
pub fn unknown(_typ: u8) -> SpecEntry {
    SpecEntry {
        name: "Unknown",
        description: "",
        value_type: ValueType::Unknown,
        max_length: MaxLength::Unbounded,
        introduced: Version::V1_0,
        subtlv_support: false,
        enum_domain: None,
        source: MetadataSource::Unknown,
    }
}

/// Top-level lookup for `typ` as seen by `version`.
pub fn lookup(typ: u8, version: Version) -> SpecEntry {
    match docsis::toplevel(typ) {
        Some(entry) if version.supports(entry.introduced) => entry,
        _ => unknown(typ),
    }
}

fn lookup_top(typ: u8, version: Version, include_mta: bool) -> SpecEntry {
    let entry = lookup(typ, version);
    if !entry.is_known() && include_mta {
        if let Some(entry) = mta::lookup(typ) {
            return entry;
        }
    }
    entry
}

/// Context-path lookup. `path` is the ancestry of the node being resolved,
/// outermost first; empty means top level.
///
/// Dialect tables match on path suffix first (the same L2VPN tree hangs
/// under both upstream and downstream classifiers), then the parent's own
/// sub-TLV table. A parent with no table at all gets unknown children —
/// heuristically discovered compounds stay honestly typed by length
/// inference rather than borrowing top-level names.
pub fn lookup_in(path: &[u8], typ: u8, version: Version, include_mta: bool) -> SpecEntry {
    let Some(&parent) = path.last() else {
        return lookup_top(typ, version, include_mta);
    };
    let table = subtlv::dialect(path).or_else(|| subtlv::for_parent(parent));
    match table.and_then(|table| table(typ)) {
        Some(entry) if version.supports(entry.introduced) => entry,
        _ => unknown(typ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_total() {
        for typ in 0..=255u8 {
            for version in Version::ALL {
                let entry = lookup(typ, version);
                assert!(!entry.name.is_empty(), "type {} @ {}", typ, version);
            }
        }
    }

    #[test]
    fn test_spec_monotonicity() {
        // Anything visible at version B is visible with identical metadata
        // at every A >= B.
        for typ in 0..=255u8 {
            for b in Version::ALL {
                let at_b = lookup(typ, b);
                if !at_b.is_known() {
                    continue;
                }
                for a in Version::ALL.into_iter().filter(|&a| a >= b) {
                    let at_a = lookup(typ, a);
                    assert_eq!(at_a.name, at_b.name, "type {} @ {} vs {}", typ, a, b);
                    assert_eq!(at_a.value_type, at_b.value_type);
                    assert_eq!(at_a.introduced, at_b.introduced);
                }
            }
        }
    }

    #[test]
    fn test_version_gating() {
        // TLV 22 (packet classification) arrived with 1.1.
        assert!(!lookup(22, Version::V1_0).is_known());
        assert!(lookup(22, Version::V1_1).is_known());
        // TLV 1 has been there since the beginning.
        assert!(lookup(1, Version::V1_0).is_known());
    }

    #[test]
    fn test_version_ordering() {
        assert!(Version::V3_1 > Version::V3_0);
        assert!(Version::V1_0 < Version::V1_1);
        assert!(Version::V3_1.supports(Version::V1_0));
        assert!(!Version::V1_0.supports(Version::V3_1));
        assert_eq!("3.1".parse::<Version>().unwrap(), Version::V3_1);
        assert!("4.0".parse::<Version>().is_err());
        assert_eq!(Version::V2_0.to_string(), "2.0");
    }

    #[test]
    fn test_categories() {
        assert_eq!(Category::for_type(1), Category::BasicConfiguration);
        assert_eq!(Category::for_type(30), Category::BasicConfiguration);
        assert_eq!(Category::for_type(31), Category::SecurityPrivacy);
        assert_eq!(Category::for_type(42), Category::SecurityPrivacy);
        assert_eq!(Category::for_type(43), Category::AdvancedFeatures);
        assert_eq!(Category::for_type(64), Category::Docsis30);
        assert_eq!(Category::for_type(77), Category::Docsis31);
        assert_eq!(Category::for_type(200), Category::VendorSpecific);
        assert_eq!(Category::for_type(254), Category::VendorSpecific);
        assert_eq!(Category::for_type(0), Category::Reserved);
        assert_eq!(Category::for_type(255), Category::Reserved);
    }

    #[test]
    fn test_unknown_entry_shape() {
        let entry = lookup(99, Version::LATEST);
        assert!(!entry.is_known());
        assert_eq!(entry.value_type, ValueType::Unknown);
        assert!(!entry.subtlv_support);
        assert_eq!(entry.max_length, MaxLength::Unbounded);
    }

    #[test]
    fn test_legacy_and_qos_service_flows_stay_distinct() {
        // Same sub-TLV numbers, different dictionaries.
        let latest = Version::LATEST;
        let legacy = lookup_in(&[17], 5, latest, false);
        let qos = lookup_in(&[24], 5, latest, false);
        assert!(legacy.is_known());
        assert!(qos.is_known());
        assert_ne!(legacy.name, qos.name);
    }

    #[test]
    fn test_dialect_paths() {
        let latest = Version::LATEST;
        // The L2VPN tree hangs under both classifier directions.
        for classifier in [22u8, 23] {
            let l2vpn = lookup_in(&[classifier, 43], 5, latest, false);
            assert_eq!(l2vpn.name, "L2VPN Encoding");
            let mux = lookup_in(&[classifier, 43, 5], 2, latest, false);
            assert_eq!(mux.name, "Service Multiplexing");
            let mpls = lookup_in(&[classifier, 43, 5, 2], 4, latest, false);
            assert_eq!(mpls.name, "MPLS Service Multiplexing Value");
            assert!(lookup_in(&[classifier, 43, 5, 2, 4], 1, latest, false).is_known());
        }
    }

    #[test]
    fn test_unknown_parents_have_unknown_children() {
        // Children of a parent nobody knows stay unknown; inference, not
        // top-level names, types them.
        let entry = lookup_in(&[21], 1, Version::LATEST, false);
        assert!(!entry.is_known());
        let entry = lookup_in(&[201], 8, Version::LATEST, false);
        assert!(!entry.is_known());
    }

    #[test]
    fn test_mta_fallback() {
        // 254 is the telephony config delimiter, MTA dialect only.
        assert!(!lookup_in(&[], 254, Version::LATEST, false).is_known());
        let entry = lookup_in(&[], 254, Version::LATEST, true);
        assert!(entry.is_known());
        assert_eq!(entry.source, MetadataSource::MtaSpecs);
        // The MTA table never shadows a DOCSIS entry.
        let entry = lookup_in(&[], 1, Version::LATEST, true);
        assert_eq!(entry.source, MetadataSource::DocsisSpecs);
    }

    #[test]
    fn test_enum_domain_lookups() {
        let entry = lookup_in(&[24], 15, Version::LATEST, false);
        let domain = entry.enum_domain.expect("scheduling type should be an enum");
        assert_eq!(domain.name_of(2), Some("Best Effort"));
        assert_eq!(domain.value_of("best effort"), Some(2));
        assert_eq!(domain.value_of("nope"), None);
        assert_eq!(domain.name_of(99), None);
    }
}
