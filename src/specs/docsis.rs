//! Top-level DOCSIS configuration TLVs, per CM-SP-MULPIv3.1 Annex C and
//! its predecessors back to RFI 1.0.
//!
//! Entries carry the release that introduced them; [`super::lookup`] hides
//! anything newer than the version being parsed. Types 200-253 are the
//! vendor range and resolve to an opaque vendor entry (254 is left to the
//! PacketCable table, where it delimits telephony configuration).

use super::{EnumDomain, MaxLength, MetadataSource, SpecEntry, Version};
use crate::value::ValueType;

const fn entry(
    name: &'static str,
    description: &'static str,
    value_type: ValueType,
    max_length: MaxLength,
    introduced: Version,
) -> SpecEntry {
    SpecEntry {
        name,
        description,
        value_type,
        max_length,
        introduced,
        subtlv_support: matches!(value_type, ValueType::Compound),
        enum_domain: None,
        source: MetadataSource::DocsisSpecs,
    }
}

const fn with_domain(mut e: SpecEntry, domain: &'static EnumDomain) -> SpecEntry {
    e.enum_domain = Some(domain);
    e
}

pub static DIPLEXER_US_UPPER_EDGE: EnumDomain = EnumDomain {
    name: "diplexer_upstream_upper_band_edge",
    width: 1,
    values: &[
        (0, "42 MHz"),
        (1, "65 MHz"),
        (2, "85 MHz"),
        (3, "117 MHz"),
        (4, "204 MHz"),
    ],
};

pub static DIPLEXER_DS_LOWER_EDGE: EnumDomain = EnumDomain {
    name: "diplexer_downstream_lower_band_edge",
    width: 1,
    values: &[(0, "108 MHz"), (1, "258 MHz")],
};

pub static DIPLEXER_DS_UPPER_EDGE: EnumDomain = EnumDomain {
    name: "diplexer_downstream_upper_band_edge",
    width: 1,
    values: &[(0, "1218 MHz"), (1, "1794 MHz"), (2, "1002 MHz")],
};

use MaxLength::{Bytes, Unbounded};
use ValueType as V;
use Version as Ver;

/// The top-level table. Returns None for types with no entry; the caller
/// substitutes the unknown entry.
pub(crate) fn toplevel(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        0 => entry(
            "Pad",
            "Alignment filler, carries no data",
            V::Marker,
            Bytes(0),
            Ver::V1_0,
        ),
        1 => entry(
            "Downstream Frequency",
            "Receive frequency of the downstream channel, in Hz",
            V::Frequency,
            Bytes(4),
            Ver::V1_0,
        ),
        2 => entry(
            "Upstream Channel ID",
            "Upstream channel the modem must use",
            V::Uint8,
            Bytes(1),
            Ver::V1_0,
        ),
        3 => entry(
            "Network Access Control",
            "Whether CPE behind this modem may forward traffic",
            V::Boolean,
            Bytes(1),
            Ver::V1_0,
        ),
        4 => entry(
            "Class of Service",
            "DOCSIS 1.0 class-of-service parameters",
            V::Compound,
            Unbounded,
            Ver::V1_0,
        ),
        5 => entry(
            "Modem Capabilities",
            "Capabilities the modem reports during registration",
            V::Compound,
            Unbounded,
            Ver::V1_0,
        ),
        6 => entry(
            "CM Message Integrity Check",
            "MD5 digest over the configuration as the modem sees it",
            V::Binary,
            Bytes(16),
            Ver::V1_0,
        ),
        7 => entry(
            "CMTS Message Integrity Check",
            "Keyed MD5 digest the CMTS verifies at registration",
            V::Binary,
            Bytes(16),
            Ver::V1_0,
        ),
        8 => entry(
            "Vendor ID",
            "Organizationally unique identifier of the modem vendor",
            V::VendorOui,
            Bytes(3),
            Ver::V1_0,
        ),
        9 => entry(
            "Software Upgrade Filename",
            "Image the modem should download via TFTP",
            V::String,
            Unbounded,
            Ver::V1_0,
        ),
        10 => entry(
            "SNMP Write-Access Control",
            "OID prefix plus control byte gating SNMP writes",
            V::Binary,
            Unbounded,
            Ver::V1_0,
        ),
        11 => entry(
            "SNMP MIB Object",
            "DER-encoded VarBind applied at provisioning time",
            V::Compound,
            Unbounded,
            Ver::V1_0,
        ),
        12 => entry(
            "Modem IP Address",
            "Static management address, rarely used",
            V::Ipv4,
            Bytes(4),
            Ver::V1_0,
        ),
        13 => entry(
            "Services Not Available Response",
            "Class, type and confirmation code from registration",
            V::Binary,
            Bytes(3),
            Ver::V1_0,
        ),
        14 => entry(
            "CPE Ethernet MAC Address",
            "A CPE allowed to attach behind the modem",
            V::MacAddress,
            Bytes(6),
            Ver::V1_0,
        ),
        17 => entry(
            "Upstream Service Flow (Legacy)",
            "Pre-1.1 upstream service flow encoding",
            V::Compound,
            Unbounded,
            Ver::V1_0,
        ),
        18 => entry(
            "Downstream Service Flow (Legacy)",
            "Pre-1.1 downstream service flow encoding",
            V::Compound,
            Unbounded,
            Ver::V1_0,
        ),
        19 => entry(
            "TFTP Server Timestamp",
            "Time the provisioning server emitted this file",
            V::Timestamp,
            Bytes(4),
            Ver::V1_1,
        ),
        20 => entry(
            "TFTP Server Provisioned Modem Address",
            "Modem address the file was generated for",
            V::Ipv4,
            Bytes(4),
            Ver::V1_1,
        ),
        22 => entry(
            "Upstream Packet Classification",
            "Classifier steering upstream packets into service flows",
            V::Compound,
            Unbounded,
            Ver::V1_1,
        ),
        23 => entry(
            "Downstream Packet Classification",
            "Classifier steering downstream packets into service flows",
            V::Compound,
            Unbounded,
            Ver::V1_1,
        ),
        24 => entry(
            "Upstream Service Flow",
            "QoS parameter set for an upstream service flow",
            V::Compound,
            Unbounded,
            Ver::V1_1,
        ),
        25 => entry(
            "Downstream Service Flow",
            "QoS parameter set for a downstream service flow",
            V::Compound,
            Unbounded,
            Ver::V1_1,
        ),
        26 => entry(
            "Payload Header Suppression",
            "PHS rule tied to a classifier and service flow",
            V::Compound,
            Unbounded,
            Ver::V1_1,
        ),
        27 => entry(
            "HMAC Digest",
            "Keyed digest used by dynamic service messages",
            V::Binary,
            Bytes(20),
            Ver::V1_1,
        ),
        28 => entry(
            "Maximum Number of Classifiers",
            "Cap on classifiers the modem may admit",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        29 => entry(
            "Privacy Enable",
            "Enables baseline privacy on the primary service flow",
            V::Boolean,
            Bytes(1),
            Ver::V1_1,
        ),
        30 => entry(
            "Authorization Block",
            "Opaque payload for the authorization module",
            V::Binary,
            Unbounded,
            Ver::V1_1,
        ),
        31 => entry(
            "Key Sequence Number",
            "BPI+ key sequence this configuration was signed under",
            V::Binary,
            Bytes(1),
            Ver::V1_1,
        ),
        32 => entry(
            "Manufacturer CVC",
            "Code verification certificate for secure software download",
            V::Certificate,
            Unbounded,
            Ver::V1_1,
        ),
        33 => entry(
            "Co-signer CVC",
            "Operator co-signer certificate for software download",
            V::Certificate,
            Unbounded,
            Ver::V1_1,
        ),
        34 => entry(
            "SNMPv3 Kickstart",
            "Diffie-Hellman kickstart material for SNMPv3 access",
            V::Compound,
            Unbounded,
            Ver::V1_1,
        ),
        35 => entry(
            "Subscriber Management Control",
            "CPE table learning controls",
            V::Binary,
            Bytes(3),
            Ver::V2_0,
        ),
        36 => entry(
            "Subscriber Management CPE IP Table",
            "Pre-provisioned CPE IPv4 addresses",
            V::Binary,
            Unbounded,
            Ver::V2_0,
        ),
        37 => entry(
            "Subscriber Management Filter Groups",
            "Upstream/downstream filter group indices",
            V::Binary,
            Bytes(8),
            Ver::V2_0,
        ),
        38 => entry(
            "SNMPv3 Notification Receiver",
            "Where and how to send SNMPv3 notifications",
            V::Compound,
            Unbounded,
            Ver::V2_0,
        ),
        39 => entry(
            "Enable 2.0 Mode",
            "Permits DOCSIS 2.0 channel operation",
            V::Boolean,
            Bytes(1),
            Ver::V2_0,
        ),
        40 => entry(
            "Enable Test Modes",
            "Unlocks pre-production test behavior",
            V::Boolean,
            Bytes(1),
            Ver::V2_0,
        ),
        41 => entry(
            "Downstream Channel List",
            "Channels and ranges the modem may acquire",
            V::Compound,
            Unbounded,
            Ver::V2_0,
        ),
        42 => entry(
            "Static Multicast MAC Address",
            "Multicast MAC the modem must forward",
            V::MacAddress,
            Bytes(6),
            Ver::V2_0,
        ),
        43 => entry(
            "Vendor Specific Information",
            "Vendor extension envelope, OUI-scoped",
            V::Compound,
            Unbounded,
            Ver::V1_0,
        ),
        45 => entry(
            "Downstream Unencrypted Traffic Filtering",
            "DUT filtering control and interface mask",
            V::Compound,
            Unbounded,
            Ver::V3_0,
        ),
        58 => entry(
            "Software Upgrade IPv6 TFTP Server",
            "IPv6 address of the software download server",
            V::Ipv6,
            Bytes(16),
            Ver::V3_0,
        ),
        60 => entry(
            "Upstream Drop Packet Classification",
            "Classifier for traffic the modem must discard",
            V::Compound,
            Unbounded,
            Ver::V3_0,
        ),
        64 => entry(
            "Software Upgrade HTTP Server",
            "URL of the software download server",
            V::String,
            Unbounded,
            Ver::V3_0,
        ),
        66 => entry(
            "Management Event Control",
            "Event reporting throttle settings",
            V::Binary,
            Unbounded,
            Ver::V3_0,
        ),
        67 => entry(
            "Subscriber Management CPE IPv6 Table",
            "Pre-provisioned CPE IPv6 prefixes",
            V::Binary,
            Unbounded,
            Ver::V3_0,
        ),
        68 => entry(
            "Default Upstream Target Buffer",
            "Upstream buffer target, in milliseconds",
            V::Uint16,
            Bytes(2),
            Ver::V3_0,
        ),
        75 => entry(
            "CM Upstream AQM Disable",
            "Disables active queue management upstream",
            V::Boolean,
            Bytes(1),
            Ver::V3_0,
        ),
        77 => entry(
            "Energy Management Mode Indicator",
            "Energy management modes the modem may enter",
            V::Uint8,
            Bytes(1),
            Ver::V3_1,
        ),
        78 => entry(
            "Energy Management Cycle Period",
            "Minimum period between energy management cycles",
            V::Duration,
            Bytes(4),
            Ver::V3_1,
        ),
        79 => with_domain(
            entry(
                "Diplexer Upstream Upper Band Edge",
                "Configured upstream diplexer split",
                V::Enum,
                Bytes(1),
                Ver::V3_1,
            ),
            &DIPLEXER_US_UPPER_EDGE,
        ),
        80 => with_domain(
            entry(
                "Diplexer Downstream Lower Band Edge",
                "Configured downstream diplexer lower edge",
                V::Enum,
                Bytes(1),
                Ver::V3_1,
            ),
            &DIPLEXER_DS_LOWER_EDGE,
        ),
        81 => with_domain(
            entry(
                "Diplexer Downstream Upper Band Edge",
                "Configured downstream diplexer upper edge",
                V::Enum,
                Bytes(1),
                Ver::V3_1,
            ),
            &DIPLEXER_DS_UPPER_EDGE,
        ),
        200..=253 => entry(
            "Vendor Specific TLV",
            "Opaque vendor payload, OUI followed by data",
            V::Vendor,
            Unbounded,
            Ver::V1_0,
        ),
        255 => entry(
            "End-of-Data Marker",
            "Terminates the configuration stream",
            V::Marker,
            Bytes(0),
            Ver::V1_0,
        ),
        _ => return None,
    })
}
