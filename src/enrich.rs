//! Bidirectional enrichment: raw TLV trees annotated for humans, and the
//! inverse transform back to byte-exact wire form.
//!
//! Enrichment is deliberately asymmetric about failure. Structure is
//! strict — a truncated stream is an error — but semantics are tolerant:
//! a value that won't format, or a "compound" that won't decompose, is
//! downgraded to hex on the spot so the surrounding document still
//! round-trips byte-for-byte. The conservatism rules around compound
//! discovery are the load-bearing part: probe only where the registry
//! says so or stays silent, never reinterpret an atomic scalar, never
//! touch anything under three bytes, and only accept a decomposition that
//! re-serializes to the identical bytes.

use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};
use tracing::{trace_span, warn};

use crate::errors::{Error, Location, Result};
use crate::specs::{self, Category, MetadataSource, SpecEntry, Version};
use crate::tlv::{self, RawTlv};
use crate::value::{self, asn1, Formatted, Strictness, ValueType};

/// Nesting ceiling for adversarial inputs. Real configurations stay under
/// eight levels.
pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct EnrichOptions {
    pub version: Version,
    pub include_mta: bool,
    pub max_depth: usize,
    pub strictness: Strictness,
    /// Re-format freshly parsed bytes and insist the text matches.
    /// Exercised by tests; off for normal use.
    pub validate_round_trip: bool,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            version: Version::LATEST,
            include_mta: false,
            max_depth: DEFAULT_MAX_DEPTH,
            strictness: Strictness::default(),
            validate_round_trip: false,
        }
    }
}

impl EnrichOptions {
    pub fn for_version(version: Version) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A raw TLV plus everything the registry and value codec know about it.
/// Doubles as the document node on the JSON/YAML surface; everything but
/// `type` is optional on the way back in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTlv {
    #[serde(rename = "type")]
    pub typ: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduced_version: Option<Version>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub subtlv_support: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<Formatted>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_source: Option<MetadataSource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtlvs: Vec<EnrichedTlv>,
    /// Original wire bytes, kept so un-enrichment can always fall back to
    /// them. Never serialized to the surface.
    #[serde(skip)]
    pub raw: Option<Vec<u8>>,
}

impl EnrichedTlv {
    fn base(typ: u8, entry: &SpecEntry) -> Self {
        EnrichedTlv {
            typ,
            name: Some(if entry.is_known() {
                entry.name.to_string()
            } else {
                format!("Unknown TLV {}", typ)
            }),
            description: (!entry.description.is_empty()).then(|| entry.description.to_string()),
            value_type: None,
            introduced_version: entry.is_known().then_some(entry.introduced),
            category: Some(Category::for_type(typ)),
            max_length: entry.max_length.limit(),
            subtlv_support: entry.subtlv_support,
            formatted_value: None,
            raw_value: None,
            metadata_source: Some(entry.source),
            subtlvs: Vec::new(),
            raw: None,
        }
    }

    /// A bare surface node: just a type and a formatted value, the way a
    /// hand-written document would state it.
    pub fn leaf(typ: u8, formatted: impl Into<String>) -> Self {
        EnrichedTlv {
            typ,
            name: None,
            description: None,
            value_type: None,
            introduced_version: None,
            category: None,
            max_length: None,
            subtlv_support: false,
            formatted_value: Some(Formatted::text(formatted)),
            raw_value: None,
            metadata_source: None,
            subtlvs: Vec::new(),
            raw: None,
        }
    }
}

/// Annotates a raw TLV sequence, depth-first.
pub fn enrich(tlvs: &[RawTlv], opts: &EnrichOptions) -> Result<Vec<EnrichedTlv>> {
    let span = trace_span!("enrich");
    let _enter = span.enter();

    let mut path = Vec::new();
    tlvs.iter()
        .map(|tlv| enrich_node(tlv, &mut path, opts))
        .collect()
}

fn enrich_node(raw: &RawTlv, path: &mut Vec<u8>, opts: &EnrichOptions) -> Result<EnrichedTlv> {
    if path.len() >= opts.max_depth {
        return Err(Error::ExcessiveNesting {
            location: Location::default().with_path(path),
            limit: opts.max_depth,
        });
    }

    let entry = specs::lookup_in(path, raw.typ, opts.version, opts.include_mta);
    let mut node = EnrichedTlv::base(raw.typ, &entry);
    node.raw = Some(raw.value.clone());

    // A zero-length value is a marker no matter what the registry thinks.
    if raw.value.is_empty() {
        node.value_type = Some(ValueType::Marker);
        node.formatted_value = Some(Formatted::text(""));
        return Ok(node);
    }

    let declared = entry.is_known().then_some(entry.value_type);
    let candidate = declared.unwrap_or_else(|| infer_value_type(&raw.value));

    // A declared compound too short to hold even one TLV header goes
    // straight to hex.
    let compound_declared = entry.subtlv_support || candidate == ValueType::Compound;
    if compound_declared && raw.value.len() < 3 {
        return Ok(hex_leaf(node, raw));
    }

    // Probe for sub-TLVs where the registry says so, or heuristically
    // where it is silent and the inferred type isn't an atomic scalar.
    let try_compound = compound_declared
        || (declared.is_none() && raw.value.len() >= 3 && !candidate.is_atomic());
    if try_compound {
        if let Some(children) = discover(&raw.value) {
            path.push(raw.typ);
            let enriched: Result<Vec<_>> = children
                .iter()
                .map(|child| enrich_node(child, path, opts))
                .collect();
            path.pop();
            node.subtlvs = enriched?;
            node.value_type = Some(ValueType::Compound);
            return Ok(node);
        }
        if compound_declared {
            warn!(typ = raw.typ, "compound TLV value didn't decompose, keeping hex");
            return Ok(hex_leaf(node, raw));
        }
        // Heuristic probe came up empty; carry on with the inferred scalar.
    }

    match value::format(candidate, &raw.value, Some(&entry)) {
        Ok(formatted) => {
            node.value_type = Some(candidate);
            node.raw_value = value::raw_value(candidate, &raw.value);
            node.formatted_value = Some(formatted);
            Ok(node)
        }
        Err(err) => {
            warn!(typ = raw.typ, %err, "couldn't format value, keeping hex");
            Ok(hex_leaf(node, raw))
        }
    }
}

fn hex_leaf(mut node: EnrichedTlv, raw: &RawTlv) -> EnrichedTlv {
    node.value_type = Some(ValueType::HexString);
    node.formatted_value = Some(Formatted::Text(value::hex_pairs(&raw.value)));
    node
}

/// Length-based inference for types the registry doesn't know.
fn infer_value_type(value: &[u8]) -> ValueType {
    match value.len() {
        0 => ValueType::Marker,
        1 => ValueType::Uint8,
        2 => ValueType::Uint16,
        4 => {
            if BigEndian::read_u32(value) > 1_000_000 {
                ValueType::Frequency
            } else {
                ValueType::Uint32
            }
        }
        6 => ValueType::MacAddress,
        _ => ValueType::Binary,
    }
}

/// Speculative sub-TLV parse. Succeeds only if every byte lands in a
/// well-formed triple *and* the triples re-serialize to the identical
/// bytes — a decomposition that wouldn't round-trip is no decomposition.
fn discover(value: &[u8]) -> Option<Vec<RawTlv>> {
    let mut tlvs = Vec::new();
    let mut rest = value;
    while !rest.is_empty() {
        match tlv::take_tlv(rest) {
            Ok((after, (typ, val))) => {
                tlvs.push(RawTlv::new(typ, val));
                rest = after;
            }
            Err(_) => return None,
        }
    }
    if tlvs.is_empty() {
        return None;
    }
    match tlv::serialize(&tlvs, false) {
        Ok(bytes) if bytes == value => Some(tlvs),
        _ => None,
    }
}

/// Lowers an enriched tree back to raw TLVs.
///
/// Compound nodes re-serialize their children; leaves parse their
/// formatted value, falling back to retained raw bytes if that fails.
/// When a node carries both children and a formatted value, the children
/// win.
pub fn unenrich(tlvs: &[EnrichedTlv], opts: &EnrichOptions) -> Result<Vec<RawTlv>> {
    let span = trace_span!("unenrich");
    let _enter = span.enter();

    let mut path = Vec::new();
    tlvs.iter()
        .map(|tlv| unenrich_node(tlv, &mut path, opts))
        .collect()
}

fn unenrich_node(node: &EnrichedTlv, path: &mut Vec<u8>, opts: &EnrichOptions) -> Result<RawTlv> {
    if path.len() >= opts.max_depth {
        return Err(Error::ExcessiveNesting {
            location: Location::default().with_path(path),
            limit: opts.max_depth,
        });
    }

    if !node.subtlvs.is_empty() {
        path.push(node.typ);
        let children: Result<Vec<_>> = node
            .subtlvs
            .iter()
            .map(|child| unenrich_node(child, path, opts))
            .collect();
        path.pop();
        let value = tlv::serialize(&children?, false)?;
        return Ok(RawTlv::new(node.typ, value));
    }

    let Some(formatted) = &node.formatted_value else {
        return Ok(RawTlv::new(
            node.typ,
            node.raw.clone().unwrap_or_default(),
        ));
    };

    let entry = specs::lookup_in(path, node.typ, opts.version, opts.include_mta);
    let vt = node
        .value_type
        .or_else(|| entry.is_known().then_some(entry.value_type))
        .unwrap_or(ValueType::Binary);

    match value::parse(vt, formatted, Some(&entry), opts.strictness) {
        Ok(mut bytes) => {
            // A type-0x30 node sits where TLV framing regenerates the DER
            // SEQUENCE header; keeping it doubled would corrupt the wire.
            if vt == ValueType::Asn1Der && node.typ == u8::from(asn1::DerTag::Sequence) {
                if let Some(inner) = asn1::strip_sequence_header(&bytes) {
                    bytes = inner.to_vec();
                }
            }
            if opts.validate_round_trip {
                let reformatted = value::format(vt, &bytes, Some(&entry))?;
                if reformatted != *formatted {
                    return Err(Error::Generation(format!(
                        "TLV {} value didn't survive a round-trip: {} became {}",
                        node.typ, formatted, reformatted
                    )));
                }
            }
            Ok(RawTlv::new(node.typ, bytes))
        }
        Err(err) => match &node.raw {
            Some(raw) => {
                warn!(typ = node.typ, %err, "couldn't parse formatted value, keeping raw bytes");
                Ok(RawTlv::new(node.typ, raw.clone()))
            }
            None => Err(err),
        },
    }
}
