//! DOCSIS flavoured TLV (Type-Length-Value) implementation.
//!
//! A cable-modem configuration file is a bare concatenation of TLVs: a
//! one-byte type, a BER-style length, and that many value bytes. There is
//! no magic number and no header; the end of the stream is optionally
//! marked by type 255, which stands alone without a length byte.
//!
//! The length field is the definite-length subset of ISO 8825 BER: a single
//! byte when the length is 127 or less, otherwise `0x81`, `0x82` or `0x84`
//! followed by that many big-endian length bytes. DOCSIS never uses the
//! other multi-byte forms, and neither do we — `0x83`, `0x85`-`0x8F` and
//! the indeterminate `0x80` are rejected outright.
//!
//! (There are general-purpose ASN.1 crates out there, but this framing is
//! trivial and the DOCSIS dialect is just odd enough — single-byte types,
//! a lone `0xFF` terminator, a restricted length alphabet — that parsing
//! it directly is simpler than bending a BER library around it.)
//!
//! Parsing here is purely structural: nothing recurses into values.
//! Whether a value is itself a TLV sequence is a semantic question answered
//! by the registry and the enrichment pass (see [`crate::enrich`]).

use byteorder::{BigEndian, ByteOrder};
use nom::bytes::complete::take;
use nom::number::complete::be_u8;

use crate::errors::{Error, Location, Result};

pub type IResult<'a, T> = nom::IResult<&'a [u8], T>;

/// End-of-data marker type. Stands alone on the wire, no length byte.
pub const TYPE_EOD: u8 = 255;

/// Pad type, used to round configurations up to word boundaries.
pub const TYPE_PAD: u8 = 0;

/// One raw TLV. The wire length is always `value.len()`; it is never stored
/// separately, so the length/value consistency invariant holds by
/// construction on both decode and encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTlv {
    pub typ: u8,
    pub value: Vec<u8>,
}

impl RawTlv {
    pub fn new(typ: u8, value: impl Into<Vec<u8>>) -> Self {
        Self {
            typ,
            value: value.into(),
        }
    }

    /// The end-of-data marker, `0xFF`.
    pub fn marker() -> Self {
        Self::new(TYPE_EOD, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_marker(&self) -> bool {
        self.typ == TYPE_EOD && self.value.is_empty()
    }

    /// Encoded size on the wire: type byte, length field, value bytes.
    pub fn wire_len(&self) -> usize {
        if self.is_marker() {
            1
        } else {
            1 + len_size(self.value.len()) + self.value.len()
        }
    }
}

/// Parsing knobs. The default stops at the first end-of-data marker, which
/// is what a CMTS does.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Keep going after an end-of-data marker instead of stopping there.
    /// Trailing zero padding then shows up as explicit Pad TLVs.
    pub parse_past_marker: bool,
}

/// Parses a length field.
///
/// Single byte for lengths up to 127; `0x81 LL`, `0x82 LLLL` or
/// `0x84 LLLLLLLL` above that. Everything else in the `0x8N` space is a
/// reserved form and fails with `TooLarge`.
pub fn take_len(data_: &[u8]) -> IResult<usize> {
    let (data, first) = be_u8(data_)?;
    if first <= 127 {
        Ok((data, first as usize))
    } else {
        let lensize = (first & 0b0111_1111) as usize;
        if !matches!(lensize, 1 | 2 | 4) {
            Err(nom::Err::Error(nom::error::Error::new(
                data_, // Return the full input!
                nom::error::ErrorKind::TooLarge,
            )))
        } else if data.len() < lensize {
            Err(nom::Err::Error(nom::error::Error::new(
                data_,
                nom::error::ErrorKind::Eof,
            )))
        } else {
            Ok((
                &data[lensize..],
                BigEndian::read_uint(data, lensize) as usize,
            ))
        }
    }
}

/// Appends a length field, using the shortest encoding for `len`.
///
/// Lengths of 2³² or more have no DOCSIS encoding and are refused.
pub fn put_len(out: &mut Vec<u8>, len: usize) -> Result<()> {
    if len <= 127 {
        out.push(len as u8);
    } else if len <= 0xFF {
        out.push(0x81);
        out.push(len as u8);
    } else if len <= 0xFFFF {
        out.push(0x82);
        out.extend_from_slice(&(len as u16).to_be_bytes());
    } else if u64::try_from(len).unwrap_or(u64::MAX) <= 0xFFFF_FFFF {
        out.push(0x84);
        out.extend_from_slice(&(len as u32).to_be_bytes());
    } else {
        return Err(Error::InvalidLength {
            location: Location::at(out.len()),
            detail: format!("length {} doesn't fit in 32 bits", len),
        });
    }
    Ok(())
}

/// Bytes the length field for `len` occupies on the wire.
pub fn len_size(len: usize) -> usize {
    match len {
        0..=127 => 1,
        128..=255 => 2,
        256..=65535 => 3,
        _ => 5,
    }
}

/// Parses the next (type, value) pair from a TLV stream.
///
/// nom-flavoured building block; [`parse`] wraps it with offset-carrying
/// errors and marker handling. The end-of-data marker comes back as
/// `(255, &[])` without consuming a length byte.
pub fn take_tlv(data: &[u8]) -> IResult<(u8, &[u8])> {
    let (rest, typ) = be_u8(data)?;
    if typ == TYPE_EOD {
        return Ok((rest, (typ, &data[..0])));
    }
    let (rest, len) = take_len(rest)?;
    let (rest, val) = take(len)(rest)?;
    Ok((rest, (typ, val)))
}

/// Parses a whole TLV stream into a flat sequence.
pub fn parse(data: &[u8], opts: ParseOptions) -> Result<Vec<RawTlv>> {
    parse_at(data, 0, opts)
}

/// Same as [`parse`], but error offsets are reported relative to `base`.
/// Used when the input is itself the value of an enclosing TLV.
pub fn parse_at(data: &[u8], base: usize, opts: ParseOptions) -> Result<Vec<RawTlv>> {
    let mut tlvs = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        let offset = base + (data.len() - rest.len());
        let typ = rest[0];
        if typ == TYPE_EOD {
            tlvs.push(RawTlv::marker());
            rest = &rest[1..];
            if opts.parse_past_marker {
                continue;
            }
            break;
        }
        rest = &rest[1..];

        let (after_len, declared) = match take_len(rest) {
            Ok(ok) => ok,
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e))
                if e.code == nom::error::ErrorKind::TooLarge =>
            {
                return Err(Error::InvalidLength {
                    location: Location::at(offset + 1),
                    detail: format!(
                        "reserved multi-byte length form {:#04X} in TLV {}",
                        rest.first().copied().unwrap_or_default(),
                        typ
                    ),
                });
            }
            Err(_) => {
                return Err(Error::UnexpectedEof {
                    location: Location::at(offset + 1),
                    wanted: rest.first().map(|b| (b & 0x7F) as usize).unwrap_or(1),
                    remaining: rest.len().saturating_sub(1),
                });
            }
        };
        if after_len.len() < declared {
            return Err(Error::TruncatedTlv {
                typ,
                location: Location::at(offset),
                declared,
                remaining: after_len.len(),
            });
        }
        let (value, after) = after_len.split_at(declared);
        tlvs.push(RawTlv::new(typ, value));
        rest = after;
    }
    Ok(tlvs)
}

/// Serializes a TLV sequence back to wire bytes.
///
/// `terminate` appends an end-of-data marker unless the sequence already
/// ends in one.
pub fn serialize(tlvs: &[RawTlv], terminate: bool) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(tlvs.iter().map(RawTlv::wire_len).sum::<usize>() + 1);
    for tlv in tlvs {
        if tlv.is_marker() {
            out.push(TYPE_EOD);
            continue;
        }
        out.push(tlv.typ);
        put_len(&mut out, tlv.value.len())?;
        out.extend_from_slice(&tlv.value);
    }
    if terminate && !tlvs.last().is_some_and(RawTlv::is_marker) {
        out.push(TYPE_EOD);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_length_short() {
        assert_eq!(
            take_len(&[0b0000_0000, 0xED]).expect("couldn't take length"),
            (&[0xED][..], 0)
        );
        assert_eq!(
            take_len(&[0b0000_0001, 0xED]).expect("couldn't take length"),
            (&[0xED][..], 1)
        );
        assert_eq!(
            take_len(&[0b0111_1111, 0xED]).expect("couldn't take length"),
            (&[0xED][..], 127)
        );
    }

    #[test]
    fn test_take_length_u8() {
        assert_eq!(
            take_len(&[0x81, 0x80, 0xED]).expect("couldn't take length"),
            (&[0xED][..], 128)
        );
        assert_eq!(
            take_len(&[0x81, 0xFF, 0xED]).expect("couldn't take length"),
            (&[0xED][..], 255)
        );
    }

    #[test]
    fn test_take_length_u16() {
        assert_eq!(
            take_len(&[0x82, 0x01, 0x00, 0xED]).expect("couldn't take length"),
            (&[0xED][..], 256)
        );
        assert_eq!(
            take_len(&[0x82, 0x12, 0x34, 0xED]).expect("couldn't take length"),
            (&[0xED][..], 0x1234)
        );
        assert_eq!(
            take_len(&[0x82, 0xFF, 0xFF, 0xED]).expect("couldn't take length"),
            (&[0xED][..], 0xFFFF)
        );
    }

    #[test]
    fn test_take_length_u32() {
        assert_eq!(
            take_len(&[0x84, 0x00, 0x01, 0x00, 0x00, 0xED]).expect("couldn't take length"),
            (&[0xED][..], 0x10000)
        );
        assert_eq!(
            take_len(&[0x84, 0x12, 0x34, 0x56, 0x78, 0xED]).expect("couldn't take length"),
            (&[0xED][..], 0x12345678)
        );
        assert_eq!(
            take_len(&[0x84, 0xFF, 0xFF, 0xFF, 0xFF, 0xED]).expect("couldn't take length"),
            (&[0xED][..], 0xFFFFFFFF)
        );
    }

    #[test]
    fn test_take_length_reserved_forms() {
        // 0x83 and 0x85-0x8F are valid general BER but never valid DOCSIS.
        for first in [0x83u8, 0x85, 0x86, 0x87, 0x88, 0x8F] {
            let data = [first, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
            assert_eq!(
                take_len(&data).expect_err("reserved length form didn't fail"),
                nom::Err::Error(nom::error::Error::new(
                    &data[..],
                    nom::error::ErrorKind::TooLarge
                ))
            );
        }
    }

    #[test]
    fn test_take_length_indeterminate() {
        // 0x80 means "indeterminate length" in full BER, not allowed here.
        assert_eq!(
            take_len(&[0x80, 0xED]).expect_err("indeterminate length didn't fail"),
            nom::Err::Error(nom::error::Error::new(
                &[0x80, 0xED][..],
                nom::error::ErrorKind::TooLarge
            ))
        );
    }

    #[test]
    fn test_take_length_missing_bytes() {
        assert!(take_len(&[0x82, 0x01]).is_err());
        assert!(take_len(&[0x84, 0x01, 0x02]).is_err());
    }

    #[test]
    fn test_put_len_boundaries() {
        let cases: &[(usize, &[u8])] = &[
            (0, &[0x00]),
            (1, &[0x01]),
            (127, &[0x7F]),
            (128, &[0x81, 0x80]),
            (255, &[0x81, 0xFF]),
            (256, &[0x82, 0x01, 0x00]),
            (65535, &[0x82, 0xFF, 0xFF]),
            (65536, &[0x84, 0x00, 0x01, 0x00, 0x00]),
            (0xFFFF_FFFF, &[0x84, 0xFF, 0xFF, 0xFF, 0xFF]),
        ];
        for &(len, expected) in cases {
            let mut out = Vec::new();
            put_len(&mut out, len).expect("couldn't encode length");
            assert_eq!(out, expected, "length {}", len);
            assert_eq!(out.len(), len_size(len), "len_size mismatch for {}", len);
        }
    }

    #[test]
    fn test_length_codec_bijection() {
        // decode(encode(L)) == L, with all bytes consumed, across the
        // boundary set from every encoding form.
        for len in [
            0usize, 1, 2, 126, 127, 128, 129, 254, 255, 256, 257, 65534, 65535, 65536, 65537,
            0x123456, 0x7FFF_FFFF, 0xFFFF_FFFE, 0xFFFF_FFFF,
        ] {
            let mut encoded = Vec::new();
            put_len(&mut encoded, len).expect("couldn't encode length");
            let (rest, decoded) = take_len(&encoded).expect("couldn't decode length");
            assert_eq!(decoded, len);
            assert!(rest.is_empty());
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_put_len_too_large() {
        let mut out = Vec::new();
        assert!(matches!(
            put_len(&mut out, 0x1_0000_0000),
            Err(Error::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_parse_basic_config() {
        // Downstream Frequency, Network Access Control, end-of-data.
        let tlvs = parse(
            &[0x01, 0x04, 0x23, 0x39, 0xF1, 0xC0, 0x03, 0x01, 0x01, 0xFF],
            ParseOptions::default(),
        )
        .expect("couldn't parse");
        assert_eq!(
            tlvs,
            vec![
                RawTlv::new(1, vec![0x23, 0x39, 0xF1, 0xC0]),
                RawTlv::new(3, vec![0x01]),
                RawTlv::marker(),
            ]
        );
    }

    #[test]
    fn test_parse_stops_at_marker() {
        let tlvs = parse(&[0xFF, 0x03, 0x01, 0x01], ParseOptions::default())
            .expect("couldn't parse");
        assert_eq!(tlvs, vec![RawTlv::marker()]);
    }

    #[test]
    fn test_parse_past_marker() {
        let tlvs = parse(
            &[0xFF, 0x00, 0x00, 0x00, 0x00],
            ParseOptions {
                parse_past_marker: true,
            },
        )
        .expect("couldn't parse");
        // FF then two explicit Pad TLVs (00 00 each).
        assert_eq!(
            tlvs,
            vec![
                RawTlv::marker(),
                RawTlv::new(TYPE_PAD, vec![]),
                RawTlv::new(TYPE_PAD, vec![]),
            ]
        );
    }

    #[test]
    fn test_parse_multibyte_length() {
        let mut data = vec![0x09, 0x81, 0x80];
        data.extend(std::iter::repeat(b'x').take(128));
        let tlvs = parse(&data, ParseOptions::default()).expect("couldn't parse");
        assert_eq!(tlvs.len(), 1);
        assert_eq!(tlvs[0].typ, 9);
        assert_eq!(tlvs[0].len(), 128);
    }

    #[test]
    fn test_parse_zero_length_tlv() {
        let tlvs = parse(&[0x04, 0x00], ParseOptions::default()).expect("couldn't parse");
        assert_eq!(tlvs, vec![RawTlv::new(4, vec![])]);
    }

    #[test]
    fn test_parse_truncated_value() {
        let err = parse(&[0x16, 0x09, 0x01, 0x02, 0x03], ParseOptions::default())
            .expect_err("truncated TLV didn't fail");
        match err {
            Error::TruncatedTlv {
                typ,
                declared,
                remaining,
                location,
            } => {
                assert_eq!(typ, 0x16);
                assert_eq!(declared, 9);
                assert_eq!(remaining, 3);
                assert_eq!(location.offset, 0);
            }
            other => panic!("wrong error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_length() {
        assert!(matches!(
            parse(&[0x01], ParseOptions::default()),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_parse_reserved_length_form() {
        let err = parse(&[0x2B, 0x83, 0x01, 0x02, 0x03], ParseOptions::default())
            .expect_err("reserved length form didn't fail");
        match err {
            Error::InvalidLength { location, .. } => assert_eq!(location.offset, 1),
            other => panic!("wrong error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_offset_mid_stream() {
        // The second TLV starts at offset 3 and is truncated.
        let err = parse(&[0x03, 0x01, 0x01, 0x0C, 0x04, 0xC0], ParseOptions::default())
            .expect_err("truncated TLV didn't fail");
        match err {
            Error::TruncatedTlv { typ, location, .. } => {
                assert_eq!(typ, 0x0C);
                assert_eq!(location.offset, 3);
            }
            other => panic!("wrong error: {:?}", other),
        }
    }

    #[test]
    fn test_serialize_round_trip() {
        let fixtures: &[&[u8]] = &[
            &[0x01, 0x04, 0x23, 0x39, 0xF1, 0xC0, 0x03, 0x01, 0x01, 0xFF],
            &[0x0C, 0x04, 0xC0, 0xA8, 0x64, 0x0A],
            &[0x15, 0x03, 0x01, 0x01, 0x05],
            &[0x04, 0x00],
            &[0xFF],
        ];
        for &bytes in fixtures {
            let tlvs = parse(bytes, ParseOptions::default()).expect("couldn't parse");
            let out = serialize(&tlvs, false).expect("couldn't serialize");
            assert_eq!(out, bytes, "round-trip mismatch for {:02X?}", bytes);
        }
    }

    #[test]
    fn test_serialize_long_value_round_trip() {
        for len in [127usize, 128, 255, 256, 65535, 65536] {
            let tlvs = vec![RawTlv::new(9, vec![0xAB; len])];
            let bytes = serialize(&tlvs, false).expect("couldn't serialize");
            assert_eq!(bytes.len(), 1 + len_size(len) + len);
            let back = parse(&bytes, ParseOptions::default()).expect("couldn't parse");
            assert_eq!(back, tlvs);
        }
    }

    #[test]
    fn test_serialize_terminate() {
        let bytes = serialize(&[RawTlv::new(3, vec![0x01])], true).expect("couldn't serialize");
        assert_eq!(bytes, &[0x03, 0x01, 0x01, 0xFF]);
        // Already terminated: no doubled marker.
        let tlvs = vec![RawTlv::new(3, vec![0x01]), RawTlv::marker()];
        let bytes = serialize(&tlvs, true).expect("couldn't serialize");
        assert_eq!(bytes, &[0x03, 0x01, 0x01, 0xFF]);
    }

    #[test]
    fn test_take_tlv_marker() {
        let (rest, (typ, val)) = take_tlv(&[0xFF, 0x00]).expect("couldn't take marker");
        assert_eq!(typ, TYPE_EOD);
        assert!(val.is_empty());
        assert_eq!(rest, &[0x00]);
    }
}
