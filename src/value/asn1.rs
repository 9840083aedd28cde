//! DER-encoded SNMP MIB objects (VarBinds).
//!
//! A DOCSIS SNMP MIB Object TLV carries `SEQUENCE { OBJECT IDENTIFIER,
//! value }` in straight DER. Handily, DER's definite lengths are the same
//! BER subset the TLV framing uses, and the SEQUENCE tag `0x30` is a
//! perfectly plausible sub-TLV type (48) — so structural decomposition of
//! such a TLV naturally yields a type-48 node whose value is the SEQUENCE
//! *contents*. The decoder here accepts both the full form and that bare
//! contents form; the encoder always produces full DER and callers strip
//! the redundant outer header when TLV framing will regenerate it.

use std::net::Ipv4Addr;

use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::tlv;
use crate::value::oid;
use crate::value::{hex_pairs, printable};

/// DER tags SNMP VarBind values show up with: the ASN.1 universal class
/// plus the SMI application types (RFC 2578).
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum DerTag {
    Integer = 0x02,
    OctetString = 0x04,
    Null = 0x05,
    ObjectIdentifier = 0x06,
    Sequence = 0x30,
    IpAddress = 0x40,
    Counter32 = 0x41,
    Gauge32 = 0x42,
    TimeTicks = 0x43,
    Opaque = 0x44,
    Counter64 = 0x46,
    #[num_enum(catch_all)]
    Unknown(u8) = 0xFF,
}

impl DerTag {
    pub fn name(self) -> &'static str {
        match self {
            DerTag::Integer => "INTEGER",
            DerTag::OctetString => "OCTET STRING",
            DerTag::Null => "NULL",
            DerTag::ObjectIdentifier => "OBJECT IDENTIFIER",
            DerTag::Sequence => "SEQUENCE",
            DerTag::IpAddress => "IpAddress",
            DerTag::Counter32 => "Counter32",
            DerTag::Gauge32 => "Gauge32",
            DerTag::TimeTicks => "TimeTicks",
            DerTag::Opaque => "Opaque",
            DerTag::Counter64 => "Counter64",
            DerTag::Unknown(_) => "UNKNOWN",
        }
    }

    /// Case-insensitive, separator-insensitive name lookup, with the usual
    /// aliases ("STRING", "OID", "Unsigned32") accepted.
    pub fn from_name(name: &str) -> Option<DerTag> {
        let normalized: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Some(match normalized.as_str() {
            "INTEGER" | "INT" | "INTEGER32" => DerTag::Integer,
            "OCTETSTRING" | "STRING" => DerTag::OctetString,
            "NULL" => DerTag::Null,
            "OBJECTIDENTIFIER" | "OID" => DerTag::ObjectIdentifier,
            "SEQUENCE" => DerTag::Sequence,
            "IPADDRESS" => DerTag::IpAddress,
            "COUNTER32" | "COUNTER" => DerTag::Counter32,
            "GAUGE32" | "GAUGE" | "UNSIGNED32" => DerTag::Gauge32,
            "TIMETICKS" => DerTag::TimeTicks,
            "OPAQUE" => DerTag::Opaque,
            "COUNTER64" => DerTag::Counter64,
            _ => return None,
        })
    }
}

/// The structured surface form of a VarBind:
/// `{oid: "1.3.6...", type: "INTEGER", value: 2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MibObject {
    pub oid: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub value: serde_json::Value,
}

fn der_invalid(detail: &'static str) -> Error {
    Error::InvalidValue {
        field: "asn1_der",
        value: detail.to_string(),
        expected: "a DER-encoded SNMP VarBind",
    }
}

/// Reads one DER (tag, value) off the front of `data`.
fn der_tlv(data: &[u8]) -> Result<(&[u8], (u8, &[u8]))> {
    let (&tag, rest) = data
        .split_first()
        .ok_or_else(|| der_invalid("empty DER input"))?;
    let (rest, len) = tlv::take_len(rest).map_err(|_| der_invalid("bad DER length"))?;
    if rest.len() < len {
        return Err(der_invalid("DER value runs past the end of input"));
    }
    let (value, rest) = rest.split_at(len);
    Ok((rest, (tag, value)))
}

/// If `bytes` is exactly one DER SEQUENCE, returns its contents.
pub fn strip_sequence_header(bytes: &[u8]) -> Option<&[u8]> {
    if bytes.first() != Some(&u8::from(DerTag::Sequence)) {
        return None;
    }
    let (rest, (_, inner)) = der_tlv(bytes).ok()?;
    rest.is_empty().then_some(inner)
}

/// Decodes a VarBind from full DER or bare SEQUENCE contents.
pub fn decode_mib(bytes: &[u8]) -> Result<MibObject> {
    let contents = match strip_sequence_header(bytes) {
        Some(inner) => inner,
        None if bytes.first() == Some(&u8::from(DerTag::Sequence)) => {
            return Err(der_invalid("trailing bytes after SEQUENCE"));
        }
        None => bytes,
    };
    let (rest, (oid_tag, oid_bytes)) = der_tlv(contents)?;
    if oid_tag != u8::from(DerTag::ObjectIdentifier) {
        return Err(der_invalid("VarBind doesn't start with an OID"));
    }
    let dotted = oid::decode_oid(oid_bytes)?;
    let (rest, (value_tag, value_bytes)) = der_tlv(rest)?;
    if !rest.is_empty() {
        return Err(der_invalid("trailing bytes after VarBind value"));
    }
    let tag = DerTag::from(value_tag);
    Ok(MibObject {
        oid: dotted,
        typ: tag.name().to_string(),
        value: decode_value(tag, value_bytes)?,
    })
}

fn decode_value(tag: DerTag, bytes: &[u8]) -> Result<serde_json::Value> {
    use serde_json::Value;
    Ok(match tag {
        DerTag::Integer => Value::from(decode_i64(bytes)?),
        DerTag::Counter32 | DerTag::Gauge32 | DerTag::TimeTicks | DerTag::Counter64 => {
            Value::from(decode_u64(bytes)?)
        }
        DerTag::OctetString | DerTag::Opaque => match printable(bytes) {
            Some(text) => Value::from(text.to_string()),
            None => Value::from(hex_pairs(bytes)),
        },
        DerTag::Null => Value::Null,
        DerTag::ObjectIdentifier => Value::from(oid::decode_oid(bytes)?),
        DerTag::IpAddress => {
            let octets: [u8; 4] = bytes
                .try_into()
                .map_err(|_| der_invalid("IpAddress isn't 4 bytes"))?;
            Value::from(Ipv4Addr::from(octets).to_string())
        }
        DerTag::Sequence | DerTag::Unknown(_) => Value::from(hex_pairs(bytes)),
    })
}

/// Encodes a VarBind as full DER, SEQUENCE header included.
pub fn encode_mib(obj: &MibObject) -> Result<Vec<u8>> {
    let oid_bytes = oid::encode_oid(&obj.oid)?;
    let tag = DerTag::from_name(&obj.typ).ok_or_else(|| Error::InvalidValue {
        field: "asn1_der",
        value: obj.typ.clone(),
        expected: "an SNMP value type like INTEGER or OCTET STRING",
    })?;
    let value_bytes = encode_value(tag, &obj.value)?;
    let mut inner = Vec::new();
    put_der(&mut inner, u8::from(DerTag::ObjectIdentifier), &oid_bytes)?;
    put_der(&mut inner, tag.into(), &value_bytes)?;
    let mut out = Vec::new();
    put_der(&mut out, u8::from(DerTag::Sequence), &inner)?;
    Ok(out)
}

fn put_der(out: &mut Vec<u8>, tag: u8, value: &[u8]) -> Result<()> {
    out.push(tag);
    tlv::put_len(out, value.len())?;
    out.extend_from_slice(value);
    Ok(())
}

fn value_invalid(value: &serde_json::Value, expected: &'static str) -> Error {
    Error::InvalidValue {
        field: "asn1_der",
        value: value.to_string(),
        expected,
    }
}

fn encode_value(tag: DerTag, value: &serde_json::Value) -> Result<Vec<u8>> {
    Ok(match tag {
        DerTag::Integer => {
            let n = value
                .as_i64()
                .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
                .ok_or_else(|| value_invalid(value, "an integer"))?;
            encode_i64(n)
        }
        DerTag::Counter32 | DerTag::Gauge32 | DerTag::TimeTicks | DerTag::Counter64 => {
            let n = value
                .as_u64()
                .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
                .ok_or_else(|| value_invalid(value, "an unsigned integer"))?;
            encode_u64(n)
        }
        DerTag::OctetString | DerTag::Opaque | DerTag::Sequence | DerTag::Unknown(_) => {
            let s = value
                .as_str()
                .ok_or_else(|| value_invalid(value, "a string"))?;
            match super::try_parse_hex(s) {
                Some(bytes) => bytes,
                None => s.as_bytes().to_vec(),
            }
        }
        DerTag::Null => Vec::new(),
        DerTag::ObjectIdentifier => {
            let s = value
                .as_str()
                .ok_or_else(|| value_invalid(value, "a dotted-decimal OID"))?;
            oid::encode_oid(s)?
        }
        DerTag::IpAddress => {
            let s = value
                .as_str()
                .ok_or_else(|| value_invalid(value, "a dotted-quad IPv4 address"))?;
            let addr: Ipv4Addr = s
                .trim()
                .parse()
                .map_err(|_| value_invalid(value, "a dotted-quad IPv4 address"))?;
            addr.octets().to_vec()
        }
    })
}

/// Minimal two's-complement big-endian, per X.690 §8.3.
fn encode_i64(v: i64) -> Vec<u8> {
    let bytes = v.to_be_bytes();
    let mut start = 0;
    while start < 7 {
        let (b, next) = (bytes[start], bytes[start + 1]);
        if (b == 0x00 && next & 0x80 == 0) || (b == 0xFF && next & 0x80 != 0) {
            start += 1;
        } else {
            break;
        }
    }
    bytes[start..].to_vec()
}

fn decode_i64(bytes: &[u8]) -> Result<i64> {
    if bytes.is_empty() || bytes.len() > 8 {
        return Err(der_invalid("INTEGER isn't 1-8 bytes"));
    }
    let mut v: i64 = if bytes[0] & 0x80 != 0 { -1 } else { 0 };
    for &b in bytes {
        v = (v << 8) | b as i64;
    }
    Ok(v)
}

/// Unsigned with the X.690 leading-zero convention for values whose high
/// bit would otherwise read as a sign.
fn encode_u64(v: u64) -> Vec<u8> {
    let bytes = v.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(7);
    let mut out = bytes[start..].to_vec();
    if out[0] & 0x80 != 0 {
        out.insert(0, 0);
    }
    out
}

fn decode_u64(bytes: &[u8]) -> Result<u64> {
    let bytes = match bytes {
        [] => return Err(der_invalid("empty unsigned integer")),
        [0, rest @ ..] if rest.len() == 8 => rest,
        _ if bytes.len() > 8 => return Err(der_invalid("unsigned integer wider than 64 bits")),
        _ => bytes,
    };
    let mut v: u64 = 0;
    for &b in bytes {
        v = (v << 8) | b as u64;
    }
    Ok(v)
}

/// True when the text looks like PEM armor.
pub fn looks_like_pem(s: &str) -> bool {
    s.trim_start().starts_with("-----BEGIN")
}

/// Strips PEM armor (if any) and decodes the base64 body.
pub fn decode_pem(s: &str) -> Result<Vec<u8>> {
    use base64::Engine as _;
    let body: String = s
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("-----"))
        .collect();
    base64::engine::general_purpose::STANDARD
        .decode(body.as_bytes())
        .map_err(|_| Error::InvalidValue {
            field: "asn1_der",
            value: s.chars().take(40).collect(),
            expected: "PEM armor or base64-encoded DER",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // {oid: 1.3.6.1.4.1.8595.20.17.1.4.0, type: INTEGER, value: 2}
    const VARBIND: &[u8] = &[
        0x30, 0x11, 0x06, 0x0C, 0x2B, 0x06, 0x01, 0x04, 0x01, 0xC3, 0x13, 0x14, 0x11, 0x01, 0x04,
        0x00, 0x02, 0x01, 0x02,
    ];

    #[test]
    fn test_encode_integer_varbind() {
        let obj = MibObject {
            oid: "1.3.6.1.4.1.8595.20.17.1.4.0".into(),
            typ: "INTEGER".into(),
            value: json!(2),
        };
        assert_eq!(encode_mib(&obj).unwrap(), VARBIND);
    }

    #[test]
    fn test_decode_full_der() {
        let obj = decode_mib(VARBIND).expect("couldn't decode VarBind");
        assert_eq!(obj.oid, "1.3.6.1.4.1.8595.20.17.1.4.0");
        assert_eq!(obj.typ, "INTEGER");
        assert_eq!(obj.value, json!(2));
    }

    #[test]
    fn test_decode_contents_form() {
        // What a structurally-decomposed type-48 node carries: everything
        // after the SEQUENCE header.
        let obj = decode_mib(&VARBIND[2..]).expect("couldn't decode contents form");
        assert_eq!(obj.oid, "1.3.6.1.4.1.8595.20.17.1.4.0");
        assert_eq!(obj.value, json!(2));
    }

    #[test]
    fn test_strip_sequence_header() {
        assert_eq!(strip_sequence_header(VARBIND), Some(&VARBIND[2..]));
        assert_eq!(strip_sequence_header(&VARBIND[2..]), None);
        // SEQUENCE with trailing garbage isn't exactly one SEQUENCE.
        let mut with_garbage = VARBIND.to_vec();
        with_garbage.push(0x00);
        assert_eq!(strip_sequence_header(&with_garbage), None);
    }

    #[test]
    fn test_octet_string_round_trip() {
        let obj = MibObject {
            oid: "1.3.6.1.2.1.1.5.0".into(),
            typ: "OCTET STRING".into(),
            value: json!("cm-basement"),
        };
        let der = encode_mib(&obj).unwrap();
        let back = decode_mib(&der).unwrap();
        assert_eq!(back.value, json!("cm-basement"));
        assert_eq!(back.typ, "OCTET STRING");
    }

    #[test]
    fn test_octet_string_hex_value() {
        let obj = MibObject {
            oid: "1.3.6.1.2.1.69.1.1.1.0".into(),
            typ: "OCTET STRING".into(),
            value: json!("DE AD BE EF"),
        };
        let der = encode_mib(&obj).unwrap();
        // 04 04 DE AD BE EF inside the sequence.
        assert!(der.windows(6).any(|w| w == [0x04, 0x04, 0xDE, 0xAD, 0xBE, 0xEF]));
    }

    #[test]
    fn test_ipaddress_round_trip() {
        let obj = MibObject {
            oid: "1.3.6.1.2.1.4.1.0".into(),
            typ: "IpAddress".into(),
            value: json!("10.1.2.3"),
        };
        let back = decode_mib(&encode_mib(&obj).unwrap()).unwrap();
        assert_eq!(back.value, json!("10.1.2.3"));
        assert_eq!(back.typ, "IpAddress");
    }

    #[test]
    fn test_integer_encodings() {
        assert_eq!(encode_i64(0), vec![0x00]);
        assert_eq!(encode_i64(2), vec![0x02]);
        assert_eq!(encode_i64(127), vec![0x7F]);
        assert_eq!(encode_i64(128), vec![0x00, 0x80]);
        assert_eq!(encode_i64(-1), vec![0xFF]);
        assert_eq!(encode_i64(-129), vec![0xFF, 0x7F]);
        for v in [0i64, 1, -1, 127, 128, -128, -129, 65535, i64::MAX, i64::MIN] {
            assert_eq!(decode_i64(&encode_i64(v)).unwrap(), v, "for {}", v);
        }
    }

    #[test]
    fn test_unsigned_encodings() {
        assert_eq!(encode_u64(0), vec![0x00]);
        assert_eq!(encode_u64(255), vec![0x00, 0xFF]);
        for v in [0u64, 1, 127, 128, 255, 256, u32::MAX as u64, u64::MAX] {
            assert_eq!(decode_u64(&encode_u64(v)).unwrap(), v, "for {}", v);
        }
    }

    #[test]
    fn test_tag_names_round_trip() {
        for tag in [
            DerTag::Integer,
            DerTag::OctetString,
            DerTag::Null,
            DerTag::ObjectIdentifier,
            DerTag::IpAddress,
            DerTag::Counter32,
            DerTag::Gauge32,
            DerTag::TimeTicks,
            DerTag::Opaque,
            DerTag::Counter64,
        ] {
            assert_eq!(DerTag::from_name(tag.name()), Some(tag));
        }
        assert_eq!(DerTag::from_name("octet string"), Some(DerTag::OctetString));
        assert_eq!(DerTag::from_name("oid"), Some(DerTag::ObjectIdentifier));
        assert_eq!(DerTag::from_name("bogus"), None);
    }

    #[test]
    fn test_decode_pem() {
        let pem = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";
        assert!(looks_like_pem(pem));
        assert_eq!(decode_pem(pem).unwrap(), vec![0x30, 0x82, 0x01]);
    }

    #[test]
    fn test_decode_rejects_truncated() {
        assert!(decode_mib(&[0x30, 0x05, 0x06, 0x01]).is_err());
        assert!(decode_mib(&[]).is_err());
    }
}
