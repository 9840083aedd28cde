//! Typed value codec.
//!
//! Every TLV value type maps both directions between wire bytes and a
//! human-editable string (or, for SNMP VarBinds, a small structured
//! record). The formatting direction is total in practice: anything the
//! typed decoder rejects is representable as space-separated uppercase
//! hex, and enrichment falls back to exactly that so documents always
//! round-trip.
//!
//! Value types and their grammars follow CM-SP-MULPIv3.1 Annex C; the
//! PacketCable MTA dialect shares them wholesale.

pub mod asn1;
pub mod oid;
pub mod units;

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use byteorder::{BigEndian, ByteOrder};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub use asn1::MibObject;

use crate::errors::{Error, Result};
use crate::specs::SpecEntry;

/// The closed set of value encodings the registry can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Uint8,
    Uint16,
    Uint32,
    Boolean,
    Frequency,
    Bandwidth,
    Ipv4,
    Ipv6,
    MacAddress,
    VendorOui,
    Duration,
    Percentage,
    PowerQuarterDb,
    String,
    Binary,
    HexString,
    ServiceFlowRef,
    Oid,
    SnmpOid,
    Asn1Der,
    Certificate,
    Timestamp,
    Enum,
    Compound,
    Marker,
    Vendor,
    TrafficPriority,
    Unknown,
}

impl ValueType {
    /// The surface spelling, also used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Uint8 => "uint8",
            ValueType::Uint16 => "uint16",
            ValueType::Uint32 => "uint32",
            ValueType::Boolean => "boolean",
            ValueType::Frequency => "frequency",
            ValueType::Bandwidth => "bandwidth",
            ValueType::Ipv4 => "ipv4",
            ValueType::Ipv6 => "ipv6",
            ValueType::MacAddress => "mac_address",
            ValueType::VendorOui => "vendor_oui",
            ValueType::Duration => "duration",
            ValueType::Percentage => "percentage",
            ValueType::PowerQuarterDb => "power_quarter_db",
            ValueType::String => "string",
            ValueType::Binary => "binary",
            ValueType::HexString => "hex_string",
            ValueType::ServiceFlowRef => "service_flow_ref",
            ValueType::Oid => "oid",
            ValueType::SnmpOid => "snmp_oid",
            ValueType::Asn1Der => "asn1_der",
            ValueType::Certificate => "certificate",
            ValueType::Timestamp => "timestamp",
            ValueType::Enum => "enum",
            ValueType::Compound => "compound",
            ValueType::Marker => "marker",
            ValueType::Vendor => "vendor",
            ValueType::TrafficPriority => "traffic_priority",
            ValueType::Unknown => "unknown",
        }
    }

    /// Atomic types are single scalar values that must never be
    /// reinterpreted as compound, no matter how TLV-shaped their bytes
    /// happen to look.
    pub fn is_atomic(self) -> bool {
        matches!(
            self,
            ValueType::Frequency
                | ValueType::Boolean
                | ValueType::Ipv4
                | ValueType::Ipv6
                | ValueType::MacAddress
                | ValueType::Duration
                | ValueType::Percentage
                | ValueType::PowerQuarterDb
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How fussy string-to-bytes parsing should be about ambiguous input.
/// Lenient lets a non-hex `binary` value through as literal printable
/// bytes; strict rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

/// A formatted value on the human surface: plain text for almost
/// everything, a structured record for SNMP VarBinds.
///
/// Deserialization also swallows bare YAML/JSON scalars (`value: 5`,
/// `value: true`) as their text spelling, since hand-edited documents
/// rarely quote numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "FormattedRepr")]
pub enum Formatted {
    Text(String),
    Mib(MibObject),
}

impl Serialize for Formatted {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Formatted::Text(s) => serializer.serialize_str(s),
            Formatted::Mib(obj) => obj.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FormattedRepr {
    Number(serde_json::Number),
    Bool(bool),
    Text(String),
    Mib(MibObject),
}

impl From<FormattedRepr> for Formatted {
    fn from(repr: FormattedRepr) -> Self {
        match repr {
            FormattedRepr::Number(n) => Formatted::Text(n.to_string()),
            FormattedRepr::Bool(b) => Formatted::Text(b.to_string()),
            FormattedRepr::Text(s) => Formatted::Text(s),
            FormattedRepr::Mib(obj) => Formatted::Mib(obj),
        }
    }
}

impl Formatted {
    pub fn text(s: impl Into<String>) -> Self {
        Formatted::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Formatted::Text(s) => Some(s),
            Formatted::Mib(_) => None,
        }
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatted::Text(s) => f.write_str(s),
            Formatted::Mib(obj) => write!(f, "{} = ({}) {}", obj.oid, obj.typ, obj.value),
        }
    }
}

fn invalid(field: &'static str, value: String, expected: &'static str) -> Error {
    Error::InvalidValue {
        field,
        value,
        expected,
    }
}

fn expect_len(vt: ValueType, bytes: &[u8], want: usize, expected: &'static str) -> Result<()> {
    if bytes.len() != want {
        return Err(invalid(vt.name(), hex_pairs(bytes), expected));
    }
    Ok(())
}

/// Space-separated uppercase hex pairs, the universal fallback rendering.
pub(crate) fn hex_pairs(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// UTF-8 text with nothing worse than tabs in it.
pub(crate) fn printable(bytes: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(bytes).ok()?;
    text.chars()
        .all(|c| !c.is_control() || c == '\t')
        .then_some(text)
}

fn read_uint(bytes: &[u8]) -> Option<u64> {
    matches!(bytes.len(), 1 | 2 | 4).then(|| BigEndian::read_uint(bytes, bytes.len()))
}

/// Formats wire bytes into the human surface form for `vt`.
///
/// `spec` supplies the enum domain when `vt` is [`ValueType::Enum`].
/// Errors mean "these bytes don't fit this type"; enrichment catches them
/// and falls back to hex.
///
/// Out-of-domain enum values always come out in the compact
/// `"N (unknown)"` spelling. The verbose `"N (Unknown enum value)"` form
/// is accepted by [`parse`] but never emitted, so only the compact form
/// round-trips.
pub fn format(vt: ValueType, bytes: &[u8], spec: Option<&SpecEntry>) -> Result<Formatted> {
    let text = match vt {
        ValueType::Uint8 => {
            expect_len(vt, bytes, 1, "1 byte")?;
            bytes[0].to_string()
        }
        ValueType::Uint16 => {
            expect_len(vt, bytes, 2, "2 bytes")?;
            BigEndian::read_u16(bytes).to_string()
        }
        ValueType::Uint32 => {
            expect_len(vt, bytes, 4, "4 bytes")?;
            BigEndian::read_u32(bytes).to_string()
        }
        ValueType::Boolean => {
            expect_len(vt, bytes, 1, "1 byte")?;
            match bytes[0] {
                0 => "disabled".to_string(),
                1 => "enabled".to_string(),
                other => {
                    return Err(invalid(vt.name(), other.to_string(), "0 or 1"));
                }
            }
        }
        ValueType::Frequency => {
            expect_len(vt, bytes, 4, "a 4-byte frequency in Hz")?;
            units::format_frequency(BigEndian::read_u32(bytes))
        }
        ValueType::Bandwidth => {
            expect_len(vt, bytes, 4, "a 4-byte rate in bps")?;
            units::format_bandwidth(BigEndian::read_u32(bytes))
        }
        ValueType::Ipv4 => {
            expect_len(vt, bytes, 4, "a 4-byte IPv4 address")?;
            let octets: [u8; 4] = bytes.try_into().unwrap();
            Ipv4Addr::from(octets).to_string()
        }
        ValueType::Ipv6 => {
            expect_len(vt, bytes, 16, "a 16-byte IPv6 address")?;
            let octets: [u8; 16] = bytes.try_into().unwrap();
            Ipv6Addr::from(octets).to_string()
        }
        ValueType::MacAddress => {
            expect_len(vt, bytes, 6, "a 6-byte MAC address")?;
            format_colon_hex(bytes)
        }
        ValueType::VendorOui => {
            expect_len(vt, bytes, 3, "a 3-byte OUI")?;
            format_colon_hex(bytes)
        }
        ValueType::Duration => {
            expect_len(vt, bytes, 4, "a 4-byte duration in seconds")?;
            units::format_duration(BigEndian::read_u32(bytes))
        }
        ValueType::Percentage => {
            expect_len(vt, bytes, 1, "1 byte, 0-100")?;
            if bytes[0] > 100 {
                return Err(invalid(vt.name(), bytes[0].to_string(), "0-100"));
            }
            units::format_percentage(bytes[0])
        }
        ValueType::PowerQuarterDb => match bytes.len() {
            1 => units::format_quarter_db(bytes[0] as i8 as i64),
            4 => units::format_quarter_db(BigEndian::read_u32(bytes) as i64),
            _ => {
                return Err(invalid(
                    vt.name(),
                    hex_pairs(bytes),
                    "1 signed byte or 4 bytes of quarter-dB",
                ));
            }
        },
        ValueType::String => {
            let trimmed = strip_trailing_nuls(bytes);
            match printable(trimmed) {
                Some(text) => text.to_string(),
                None => {
                    return Err(invalid(vt.name(), hex_pairs(bytes), "printable text"));
                }
            }
        }
        ValueType::Binary
        | ValueType::HexString
        | ValueType::Certificate
        | ValueType::Vendor
        | ValueType::Compound
        | ValueType::Unknown => hex_pairs(bytes),
        ValueType::ServiceFlowRef => {
            expect_len(vt, bytes, 2, "a 2-byte service flow reference")?;
            format!("Service Flow #{}", BigEndian::read_u16(bytes))
        }
        ValueType::Oid | ValueType::SnmpOid => oid::decode_oid(bytes)?,
        ValueType::Asn1Der => return asn1::decode_mib(bytes).map(Formatted::Mib),
        ValueType::Timestamp => {
            expect_len(vt, bytes, 4, "a 4-byte Unix timestamp")?;
            let secs = BigEndian::read_u32(bytes);
            Utc.timestamp_opt(secs as i64, 0)
                .single()
                .ok_or_else(|| invalid(vt.name(), secs.to_string(), "a Unix timestamp"))?
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        }
        ValueType::Enum => {
            let n = read_uint(bytes).ok_or_else(|| {
                invalid(vt.name(), hex_pairs(bytes), "a 1, 2 or 4 byte enum value")
            })?;
            let domain = spec.and_then(|e| e.enum_domain);
            match u32::try_from(n).ok().and_then(|n| domain.and_then(|d| d.name_of(n))) {
                Some(name) => name.to_string(),
                None => format!("{} (unknown)", n),
            }
        }
        ValueType::Marker => {
            expect_len(vt, bytes, 0, "no value bytes")?;
            String::new()
        }
        ValueType::TrafficPriority => {
            expect_len(vt, bytes, 1, "1 byte, 0-7")?;
            if bytes[0] > 7 {
                return Err(invalid(vt.name(), bytes[0].to_string(), "0-7"));
            }
            bytes[0].to_string()
        }
    };
    Ok(Formatted::Text(text))
}

/// Total formatting: anything the typed decoder rejects comes back as hex.
pub fn format_or_hex(vt: ValueType, bytes: &[u8], spec: Option<&SpecEntry>) -> Formatted {
    format(vt, bytes, spec).unwrap_or_else(|_| Formatted::Text(hex_pairs(bytes)))
}

/// The decoded native form for the surface's `raw_value` field, where one
/// makes sense.
pub fn raw_value(vt: ValueType, bytes: &[u8]) -> Option<serde_json::Value> {
    use serde_json::Value;
    Some(match vt {
        ValueType::Uint8
        | ValueType::Uint16
        | ValueType::Uint32
        | ValueType::Frequency
        | ValueType::Bandwidth
        | ValueType::Duration
        | ValueType::Timestamp
        | ValueType::ServiceFlowRef
        | ValueType::TrafficPriority
        | ValueType::Enum => Value::from(read_uint(bytes)?),
        ValueType::Percentage => Value::from(*bytes.first()?),
        ValueType::Boolean => Value::from(*bytes.first()? != 0),
        ValueType::PowerQuarterDb => match bytes.len() {
            1 => Value::from(bytes[0] as i8 as f64 / 4.0),
            4 => Value::from(BigEndian::read_u32(bytes) as f64 / 4.0),
            _ => return None,
        },
        _ => return None,
    })
}

/// Parses a human surface value back into wire bytes.
pub fn parse(
    vt: ValueType,
    value: &Formatted,
    spec: Option<&SpecEntry>,
    strictness: Strictness,
) -> Result<Vec<u8>> {
    let s = match value {
        Formatted::Mib(obj) => {
            return match vt {
                ValueType::Asn1Der | ValueType::Binary | ValueType::Unknown => {
                    asn1::encode_mib(obj)
                }
                _ => Err(invalid(
                    vt.name(),
                    obj.oid.clone(),
                    "a plain string value (structured records are for asn1_der)",
                )),
            };
        }
        Formatted::Text(s) => s.as_str(),
    };
    match vt {
        ValueType::Uint8 => Ok(vec![parse_uint(vt.name(), s, u8::MAX as u64)? as u8]),
        ValueType::Uint16 => {
            Ok((parse_uint(vt.name(), s, u16::MAX as u64)? as u16).to_be_bytes().to_vec())
        }
        ValueType::Uint32 => {
            Ok((parse_uint(vt.name(), s, u32::MAX as u64)? as u32).to_be_bytes().to_vec())
        }
        ValueType::Boolean => parse_boolean(s),
        ValueType::Frequency => Ok(units::parse_frequency(s)?.to_be_bytes().to_vec()),
        ValueType::Bandwidth => Ok(units::parse_bandwidth(s)?.to_be_bytes().to_vec()),
        ValueType::Ipv4 => {
            let addr: Ipv4Addr = s.trim().parse().map_err(|_| {
                invalid(vt.name(), s.to_string(), "a dotted-quad IPv4 address")
            })?;
            Ok(addr.octets().to_vec())
        }
        ValueType::Ipv6 => {
            let addr: Ipv6Addr = s.trim().parse().map_err(|_| {
                invalid(vt.name(), s.to_string(), "an RFC 4291 IPv6 address")
            })?;
            Ok(addr.octets().to_vec())
        }
        ValueType::MacAddress => parse_plain_hex(vt.name(), s, 6, "a MAC like aa:bb:cc:dd:ee:ff"),
        ValueType::VendorOui => parse_plain_hex(vt.name(), s, 3, "a 3-byte OUI like 00:10:95"),
        ValueType::Duration => Ok(units::parse_duration(s)?.to_be_bytes().to_vec()),
        ValueType::Percentage => Ok(vec![units::parse_percentage(s)?]),
        ValueType::PowerQuarterDb => {
            let quarters = units::parse_quarter_db(s)?;
            if let Ok(q) = i8::try_from(quarters) {
                Ok(vec![q as u8])
            } else if let Ok(q) = u32::try_from(quarters) {
                Ok(q.to_be_bytes().to_vec())
            } else {
                Err(invalid(
                    vt.name(),
                    s.to_string(),
                    "-32.00 to 31.75 dBmV, or extended power up to 2^30 quarter-dB",
                ))
            }
        }
        ValueType::String => Ok(parse_string(s)),
        ValueType::Binary | ValueType::HexString | ValueType::Unknown | ValueType::Compound => {
            parse_binary(vt.name(), s, strictness)
        }
        ValueType::Certificate => {
            if asn1::looks_like_pem(s) {
                asn1::decode_pem(s)
            } else {
                parse_binary(vt.name(), s, Strictness::Strict)
            }
        }
        ValueType::ServiceFlowRef => {
            let stripped = s
                .trim()
                .strip_prefix("Service Flow")
                .or_else(|| s.trim().strip_prefix("service flow"))
                .map(|rest| rest.trim_start().trim_start_matches('#'))
                .unwrap_or(s);
            Ok((parse_uint(vt.name(), stripped, u16::MAX as u64)? as u16)
                .to_be_bytes()
                .to_vec())
        }
        ValueType::Oid | ValueType::SnmpOid => oid::encode_oid(s),
        ValueType::Asn1Der => {
            if let Some(bytes) = try_parse_hex(s) {
                Ok(bytes)
            } else if asn1::looks_like_pem(s) {
                asn1::decode_pem(s)
            } else {
                // Last chance: bare base64.
                asn1::decode_pem(s).map_err(|_| {
                    invalid(vt.name(), s.to_string(), "hex, PEM or base64 DER")
                })
            }
        }
        ValueType::Timestamp => Ok(parse_timestamp(s)?.to_be_bytes().to_vec()),
        ValueType::Enum => parse_enum(s, spec),
        ValueType::Marker => match s.trim() {
            "" | "end" | "end-of-data" => Ok(Vec::new()),
            _ => Err(invalid(vt.name(), s.to_string(), "empty, \"end\" or \"end-of-data\"")),
        },
        ValueType::Vendor => {
            let bytes = parse_binary(vt.name(), s, Strictness::Strict)?;
            if bytes.len() < 3 {
                return Err(invalid(
                    vt.name(),
                    s.to_string(),
                    "a 3-byte OUI followed by vendor data",
                ));
            }
            Ok(bytes)
        }
        ValueType::TrafficPriority => {
            let n = parse_uint(vt.name(), s, 7)?;
            Ok(vec![n as u8])
        }
    }
}

fn format_colon_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

fn strip_trailing_nuls(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map(|p| p + 1)
        .unwrap_or(0);
    &bytes[..end]
}

fn parse_uint(field: &'static str, s: &str, max: u64) -> Result<u64> {
    let t = s.trim();
    let parsed = match t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        Some(hex_part) => u64::from_str_radix(hex_part, 16),
        None => t.parse::<u64>(),
    };
    match parsed {
        Ok(v) if v <= max => Ok(v),
        _ => Err(invalid(field, s.to_string(), "an unsigned integer in range")),
    }
}

fn parse_boolean(s: &str) -> Result<Vec<u8>> {
    let t = s.trim().to_ascii_lowercase();
    match t.as_str() {
        "enabled" | "enable" | "on" | "true" | "yes" | "1" => Ok(vec![1]),
        "disabled" | "disable" | "off" | "false" | "no" | "0" => Ok(vec![0]),
        _ => {
            // A bare hex pair also reads as a boolean: any non-zero byte
            // is true.
            if t.len() == 2 && t.chars().all(|c| c.is_ascii_hexdigit()) {
                let byte = u8::from_str_radix(&t, 16).unwrap();
                Ok(vec![u8::from(byte != 0)])
            } else {
                Err(invalid(
                    "boolean",
                    s.to_string(),
                    "enabled/disabled, on/off, true/false or a hex pair",
                ))
            }
        }
    }
}

/// Quoted input is literal. Unquoted input that looks like one even-length
/// hex token is taken as hex; everything else is literal bytes.
fn parse_string(s: &str) -> Vec<u8> {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        return s[1..s.len() - 1].as_bytes().to_vec();
    }
    if s.len() >= 2 && s.len() % 2 == 0 && s.chars().all(|c| c.is_ascii_hexdigit()) {
        if let Ok(bytes) = hex::decode(s) {
            return bytes;
        }
    }
    s.as_bytes().to_vec()
}

/// MAC-style fixed-width hex with optional `:`/`-`/`.` separators.
fn parse_plain_hex(
    field: &'static str,
    s: &str,
    want: usize,
    expected: &'static str,
) -> Result<Vec<u8>> {
    let digits: String = s
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | '.') && !c.is_whitespace())
        .collect();
    if digits.len() != want * 2 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid(field, s.to_string(), expected));
    }
    Ok(hex::decode(digits).unwrap())
}

/// Accepts plain hex, `:`/`-` separated hex, and `NNNN:`-prefixed hex-dump
/// lines. Returns None when the input isn't hex at all.
pub(crate) fn try_parse_hex(s: &str) -> Option<Vec<u8>> {
    let mut digits = String::new();
    for line in s.lines() {
        let mut tokens = line.split_whitespace().peekable();
        let mut first = true;
        while let Some(token) = tokens.next() {
            // A leading all-hex token ending in ':' is a dump offset, not
            // data, as long as data follows it.
            if first {
                first = false;
                if let Some(stem) = token.strip_suffix(':') {
                    if !stem.is_empty()
                        && stem.chars().all(|c| c.is_ascii_hexdigit())
                        && tokens.peek().is_some()
                    {
                        continue;
                    }
                }
            }
            let cleaned: String = token.chars().filter(|c| !matches!(c, ':' | '-')).collect();
            if cleaned.is_empty() {
                continue;
            }
            if !cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            digits.push_str(&cleaned);
        }
    }
    if digits.is_empty() || digits.len() % 2 != 0 {
        return None;
    }
    hex::decode(digits).ok()
}

fn parse_binary(field: &'static str, s: &str, strictness: Strictness) -> Result<Vec<u8>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    if let Some(bytes) = try_parse_hex(s) {
        return Ok(bytes);
    }
    match strictness {
        Strictness::Strict => Err(invalid(
            field,
            s.to_string(),
            "hex pairs, optionally ':'/'-' separated or hex-dump formatted",
        )),
        Strictness::Lenient => {
            if s.chars().all(|c| !c.is_control() || c == '\t') {
                Ok(s.as_bytes().to_vec())
            } else {
                Err(invalid(field, s.to_string(), "hex pairs or printable text"))
            }
        }
    }
}

fn parse_timestamp(s: &str) -> Result<u32> {
    const EXPECTED: &str = "Unix seconds, RFC 3339, or \"YYYY-MM-DD HH:MM:SS\"";
    let t = s.trim();
    if let Ok(secs) = t.parse::<u32>() {
        return Ok(secs);
    }
    let secs = if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        dt.timestamp()
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S") {
        naive.and_utc().timestamp()
    } else {
        return Err(invalid("timestamp", s.to_string(), EXPECTED));
    };
    u32::try_from(secs).map_err(|_| invalid("timestamp", s.to_string(), EXPECTED))
}

fn parse_enum(s: &str, spec: Option<&SpecEntry>) -> Result<Vec<u8>> {
    const EXPECTED: &str = "an enum name or its integer value";
    let domain = spec.and_then(|e| e.enum_domain);
    let trimmed = s.trim();
    // Both fallback spellings are accepted here; the formatter only ever
    // emits the compact one.
    let (stripped, had_unknown_suffix) = match trimmed
        .strip_suffix("(unknown)")
        .or_else(|| trimmed.strip_suffix("(Unknown enum value)"))
    {
        Some(rest) => (rest.trim_end(), true),
        None => (trimmed, false),
    };

    let n = if let Some(v) = domain.and_then(|d| d.value_of(stripped)) {
        v
    } else {
        let parsed: u32 = stripped
            .parse()
            .map_err(|_| invalid("enum", s.to_string(), EXPECTED))?;
        let in_domain = domain.map(|d| d.name_of(parsed).is_some()).unwrap_or(true);
        if !in_domain && !had_unknown_suffix {
            return Err(invalid("enum", s.to_string(), EXPECTED));
        }
        parsed
    };

    let width = domain.map(|d| d.width).unwrap_or(1);
    let be = n.to_be_bytes();
    match width {
        1 if n <= u8::MAX as u32 => Ok(vec![be[3]]),
        2 if n <= u16::MAX as u32 => Ok(be[2..].to_vec()),
        4 => Ok(be.to_vec()),
        _ => Err(invalid("enum", s.to_string(), EXPECTED)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::{EnumDomain, MaxLength, MetadataSource, SpecEntry, Version};

    fn fmt(vt: ValueType, bytes: &[u8]) -> String {
        match format(vt, bytes, None).expect("couldn't format") {
            Formatted::Text(s) => s,
            Formatted::Mib(_) => panic!("expected text"),
        }
    }

    fn parse_text(vt: ValueType, s: &str) -> Vec<u8> {
        parse(vt, &Formatted::text(s), None, Strictness::Lenient).expect("couldn't parse")
    }

    #[test]
    fn test_uints() {
        assert_eq!(fmt(ValueType::Uint8, &[5]), "5");
        assert_eq!(fmt(ValueType::Uint16, &[0x01, 0x00]), "256");
        assert_eq!(fmt(ValueType::Uint32, &[0, 0, 0x30, 0x39]), "12345");
        assert_eq!(parse_text(ValueType::Uint8, "5"), vec![5]);
        assert_eq!(parse_text(ValueType::Uint16, "0x100"), vec![0x01, 0x00]);
        assert_eq!(parse_text(ValueType::Uint32, "12345"), vec![0, 0, 0x30, 0x39]);
        assert!(parse(
            ValueType::Uint8,
            &Formatted::text("256"),
            None,
            Strictness::Lenient
        )
        .is_err());
        assert!(format(ValueType::Uint16, &[1], None).is_err());
    }

    #[test]
    fn test_boolean_spellings() {
        assert_eq!(fmt(ValueType::Boolean, &[1]), "enabled");
        assert_eq!(fmt(ValueType::Boolean, &[0]), "disabled");
        assert!(format(ValueType::Boolean, &[2], None).is_err());
        for spelling in ["enabled", "on", "true", "yes", "1"] {
            assert_eq!(parse_text(ValueType::Boolean, spelling), vec![1], "{}", spelling);
        }
        for spelling in ["disabled", "off", "false", "no", "0", "Disabled", "OFF"] {
            assert_eq!(parse_text(ValueType::Boolean, spelling), vec![0], "{}", spelling);
        }
        // Hex pairs: any non-zero byte is true.
        assert_eq!(parse_text(ValueType::Boolean, "FF"), vec![1]);
        assert_eq!(parse_text(ValueType::Boolean, "00"), vec![0]);
        assert!(parse(
            ValueType::Boolean,
            &Formatted::text("maybe"),
            None,
            Strictness::Lenient
        )
        .is_err());
    }

    #[test]
    fn test_frequency_fixture() {
        // 591 MHz, the classic downstream frequency fixture.
        assert_eq!(fmt(ValueType::Frequency, &[0x23, 0x39, 0xF1, 0xC0]), "591 MHz");
        assert_eq!(
            parse_text(ValueType::Frequency, "591 MHz"),
            vec![0x23, 0x39, 0xF1, 0xC0]
        );
    }

    #[test]
    fn test_ipv4_fixture() {
        assert_eq!(fmt(ValueType::Ipv4, &[0xC0, 0xA8, 0x64, 0x0A]), "192.168.100.10");
        assert_eq!(
            parse_text(ValueType::Ipv4, "192.168.100.10"),
            vec![0xC0, 0xA8, 0x64, 0x0A]
        );
    }

    #[test]
    fn test_ipv6_round_trip() {
        let bytes = parse_text(ValueType::Ipv6, "2001:db8::1");
        assert_eq!(bytes.len(), 16);
        assert_eq!(fmt(ValueType::Ipv6, &bytes), "2001:db8::1");
    }

    #[test]
    fn test_mac_and_oui() {
        let mac = [0x00, 0x10, 0x95, 0xAB, 0xCD, 0xEF];
        assert_eq!(fmt(ValueType::MacAddress, &mac), "00:10:95:ab:cd:ef");
        assert_eq!(parse_text(ValueType::MacAddress, "00:10:95:ab:cd:ef"), mac);
        assert_eq!(parse_text(ValueType::MacAddress, "00-10-95-AB-CD-EF"), mac);
        assert_eq!(parse_text(ValueType::MacAddress, "001095abcdef"), mac);
        assert_eq!(fmt(ValueType::VendorOui, &mac[..3]), "00:10:95");
        assert_eq!(parse_text(ValueType::VendorOui, "00:10:95"), &mac[..3]);
        assert!(parse(
            ValueType::MacAddress,
            &Formatted::text("00:10:95"),
            None,
            Strictness::Lenient
        )
        .is_err());
    }

    #[test]
    fn test_power_wire_forms() {
        assert_eq!(fmt(ValueType::PowerQuarterDb, &[40]), "10.0 dBmV");
        assert_eq!(fmt(ValueType::PowerQuarterDb, &[0xF2]), "-3.5 dBmV");
        assert_eq!(parse_text(ValueType::PowerQuarterDb, "10.0 dBmV"), vec![40]);
        assert_eq!(parse_text(ValueType::PowerQuarterDb, "-3.5 dBmV"), vec![0xF2]);
        // Outside the signed byte range: extended uint32 quarter-dB.
        assert_eq!(
            parse_text(ValueType::PowerQuarterDb, "40.0 dBmV"),
            vec![0, 0, 0, 160]
        );
        assert_eq!(fmt(ValueType::PowerQuarterDb, &[0, 0, 0, 160]), "40.0 dBmV");
    }

    #[test]
    fn test_string_heuristics() {
        assert_eq!(fmt(ValueType::String, b"gold.cm\0"), "gold.cm");
        assert_eq!(parse_text(ValueType::String, "gold.cm"), b"gold.cm");
        // Even-length all-hex text reads as hex...
        assert_eq!(parse_text(ValueType::String, "DEADBEEF"), vec![0xDE, 0xAD, 0xBE, 0xEF]);
        // ...unless quoted, which forces the literal reading.
        assert_eq!(parse_text(ValueType::String, "\"DEADBEEF\""), b"DEADBEEF");
        // Odd length or non-hex characters stay literal.
        assert_eq!(parse_text(ValueType::String, "cafe5"), b"cafe5");
        assert_eq!(parse_text(ValueType::String, "config.bin"), b"config.bin");
    }

    #[test]
    fn test_binary_modes_share_fixtures() {
        let fixtures: &[(&str, &[u8])] = &[
            ("DE AD BE EF", &[0xDE, 0xAD, 0xBE, 0xEF]),
            ("de:ad:be:ef", &[0xDE, 0xAD, 0xBE, 0xEF]),
            ("de-ad-be-ef", &[0xDE, 0xAD, 0xBE, 0xEF]),
            ("deadbeef", &[0xDE, 0xAD, 0xBE, 0xEF]),
            ("0000: DE AD\n0002: BE EF", &[0xDE, 0xAD, 0xBE, 0xEF]),
        ];
        for &(input, expected) in fixtures {
            for strictness in [Strictness::Lenient, Strictness::Strict] {
                let got = parse(ValueType::Binary, &Formatted::text(input), None, strictness)
                    .expect("couldn't parse hex binary");
                assert_eq!(got, expected, "{:?} ({:?})", input, strictness);
            }
        }
        // Non-hex input: literal in lenient mode, rejected in strict.
        assert_eq!(
            parse(
                ValueType::Binary,
                &Formatted::text("hello"),
                None,
                Strictness::Lenient
            )
            .unwrap(),
            b"hello"
        );
        assert!(parse(
            ValueType::Binary,
            &Formatted::text("hello"),
            None,
            Strictness::Strict
        )
        .is_err());
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(fmt(ValueType::Binary, &[0xDE, 0xAD, 0xBE, 0xEF]), "DE AD BE EF");
        assert_eq!(fmt(ValueType::HexString, &[0x01]), "01");
        assert_eq!(fmt(ValueType::Vendor, &[0x00, 0x10, 0x95, 0x01, 0x02]), "00 10 95 01 02");
    }

    #[test]
    fn test_service_flow_ref() {
        assert_eq!(fmt(ValueType::ServiceFlowRef, &[0x00, 0x03]), "Service Flow #3");
        assert_eq!(parse_text(ValueType::ServiceFlowRef, "Service Flow #3"), vec![0, 3]);
        assert_eq!(parse_text(ValueType::ServiceFlowRef, "3"), vec![0, 3]);
    }

    #[test]
    fn test_timestamp_forms() {
        // 2024-01-15 10:30:00 UTC.
        let bytes = [0x65, 0xA5, 0x09, 0x28];
        assert_eq!(fmt(ValueType::Timestamp, &bytes), "2024-01-15 10:30:00");
        assert_eq!(parse_text(ValueType::Timestamp, "2024-01-15 10:30:00"), bytes);
        assert_eq!(parse_text(ValueType::Timestamp, "1705314600"), bytes);
        assert_eq!(
            parse_text(ValueType::Timestamp, "2024-01-15T10:30:00Z"),
            bytes
        );
    }

    #[test]
    fn test_marker() {
        assert_eq!(fmt(ValueType::Marker, &[]), "");
        assert_eq!(parse_text(ValueType::Marker, ""), Vec::<u8>::new());
        assert_eq!(parse_text(ValueType::Marker, "end-of-data"), Vec::<u8>::new());
    }

    #[test]
    fn test_traffic_priority_range() {
        assert_eq!(fmt(ValueType::TrafficPriority, &[7]), "7");
        assert!(format(ValueType::TrafficPriority, &[8], None).is_err());
        assert!(parse(
            ValueType::TrafficPriority,
            &Formatted::text("8"),
            None,
            Strictness::Lenient
        )
        .is_err());
    }

    static SCHEDULING: EnumDomain = EnumDomain {
        name: "scheduling_type",
        width: 1,
        values: &[
            (1, "Undefined"),
            (2, "Best Effort"),
            (3, "Non-Real-Time Polling"),
            (4, "Real-Time Polling"),
            (5, "Unsolicited Grant with AD"),
            (6, "Unsolicited Grant"),
        ],
    };

    fn enum_entry() -> SpecEntry {
        SpecEntry {
            name: "Service Flow Scheduling Type",
            description: "",
            value_type: ValueType::Enum,
            max_length: MaxLength::Bytes(1),
            introduced: Version::V1_1,
            subtlv_support: false,
            enum_domain: Some(&SCHEDULING),
            source: MetadataSource::DocsisSpecs,
        }
    }

    #[test]
    fn test_enum_named_values() {
        let entry = enum_entry();
        let formatted = format(ValueType::Enum, &[2], Some(&entry)).unwrap();
        assert_eq!(formatted.as_text(), Some("Best Effort"));
        assert_eq!(
            parse(ValueType::Enum, &formatted, Some(&entry), Strictness::Lenient).unwrap(),
            vec![2]
        );
        // Case-insensitive names and in-domain integers both work.
        assert_eq!(
            parse(
                ValueType::Enum,
                &Formatted::text("best effort"),
                Some(&entry),
                Strictness::Lenient
            )
            .unwrap(),
            vec![2]
        );
        assert_eq!(
            parse(ValueType::Enum, &Formatted::text("6"), Some(&entry), Strictness::Lenient)
                .unwrap(),
            vec![6]
        );
    }

    #[test]
    fn test_enum_unknown_round_trip() {
        let entry = enum_entry();
        let formatted = format(ValueType::Enum, &[99], Some(&entry)).unwrap();
        assert_eq!(formatted.as_text(), Some("99 (unknown)"));
        assert_eq!(
            parse(ValueType::Enum, &formatted, Some(&entry), Strictness::Lenient).unwrap(),
            vec![99]
        );
        // The verbose spelling is accepted on input, never emitted.
        assert_eq!(
            parse(
                ValueType::Enum,
                &Formatted::text("99 (Unknown enum value)"),
                Some(&entry),
                Strictness::Lenient
            )
            .unwrap(),
            vec![99]
        );
        // A bare out-of-domain integer is rejected; the explicit unknown
        // suffix is what makes it intentional.
        assert!(parse(
            ValueType::Enum,
            &Formatted::text("99"),
            Some(&entry),
            Strictness::Lenient
        )
        .is_err());
    }

    #[test]
    fn test_asn1_der_structured() {
        let obj = MibObject {
            oid: "1.3.6.1.4.1.8595.20.17.1.4.0".into(),
            typ: "INTEGER".into(),
            value: serde_json::json!(2),
        };
        let bytes = parse(
            ValueType::Asn1Der,
            &Formatted::Mib(obj.clone()),
            None,
            Strictness::Lenient,
        )
        .unwrap();
        match format(ValueType::Asn1Der, &bytes, None).unwrap() {
            Formatted::Mib(back) => assert_eq!(back, obj),
            Formatted::Text(t) => panic!("expected a structured VarBind, got {:?}", t),
        }
    }

    #[test]
    fn test_oid_value_type() {
        let bytes = parse_text(ValueType::SnmpOid, "1.3.6.1.2.1.1.1.0");
        assert_eq!(fmt(ValueType::SnmpOid, &bytes), "1.3.6.1.2.1.1.1.0");
    }

    #[test]
    fn test_format_or_hex_total() {
        // A 3-byte "frequency" is nonsense; the fallback still renders it.
        let formatted = format_or_hex(ValueType::Frequency, &[1, 2, 3], None);
        assert_eq!(formatted.as_text(), Some("01 02 03"));
    }

    #[test]
    fn test_raw_values() {
        assert_eq!(
            raw_value(ValueType::Frequency, &[0x23, 0x39, 0xF1, 0xC0]),
            Some(serde_json::json!(591_000_000u64))
        );
        assert_eq!(raw_value(ValueType::Boolean, &[1]), Some(serde_json::json!(true)));
        assert_eq!(raw_value(ValueType::Ipv4, &[1, 2, 3, 4]), None);
    }
}
