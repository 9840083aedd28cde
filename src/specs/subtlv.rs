//! Sub-TLV dictionaries.
//!
//! Most sub-TLV meaning is keyed by the immediate parent type. A handful
//! of deep dialects (the L2VPN tree that hangs under classifier vendor
//! extensions, nested downstream channel list encodings, classifier
//! criteria whose numbers collide with other parents) are keyed by context
//! path suffix instead and take precedence.
//!
//! The legacy (17/18) and QoS (24/25) service flow dictionaries share
//! sub-TLV numbers with different meanings. They are deliberately separate
//! tables; nothing here ever merges them.

use super::{EnumDomain, MaxLength, MetadataSource, SpecEntry, Version};
use crate::value::ValueType;

use MaxLength::{Bytes, Unbounded};
use ValueType as V;
use Version as Ver;

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

type Table = fn(u8) -> Option<SpecEntry>;

/// Context-path dialect tables, matched on suffix so the same tree
/// resolves identically under every parent it legitimately hangs from.
/// Longest suffix wins.
pub(crate) fn dialect(path: &[u8]) -> Option<Table> {
    if path.ends_with(&[43, 5, 2, 4]) {
        Some(mpls_service_mux)
    } else if path.ends_with(&[43, 5, 2]) {
        Some(service_mux)
    } else if path.ends_with(&[43, 5]) {
        Some(l2vpn)
    } else if path.ends_with(&[41, 1]) {
        Some(single_downstream_channel)
    } else if path.ends_with(&[41, 2]) {
        Some(downstream_frequency_range)
    } else if ends_under_classifier(path, 9) {
        Some(ip_criteria)
    } else if ends_under_classifier(path, 10) {
        Some(llc_criteria)
    } else if ends_under_classifier(path, 11) {
        Some(dot1pq_criteria)
    } else {
        None
    }
}

fn ends_under_classifier(path: &[u8], sub: u8) -> bool {
    let n = path.len();
    n >= 2 && path[n - 1] == sub && matches!(path[n - 2], 22 | 23 | 60)
}

/// Per-parent sub-TLV tables.
pub(crate) fn for_parent(parent: u8) -> Option<Table> {
    Some(match parent {
        4 => class_of_service,
        5 => modem_capabilities,
        11 => snmp_varbind,
        17 | 18 => legacy_service_flow,
        22 | 23 | 60 => packet_classifier,
        24 | 25 => qos_service_flow,
        26 => payload_header_suppression,
        34 => snmpv3_kickstart,
        38 => notification_receiver,
        41 => downstream_channel_list,
        43 => vendor_specific_info,
        45 => dut_filtering,
        _ => return None,
    })
}

fn class_of_service(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Class ID",
            "Identifier for this class of service",
            V::Uint8,
            Bytes(1),
            Ver::V1_0,
        ),
        2 => entry(
            "Maximum Downstream Rate",
            "Peak downstream rate for this class",
            V::Bandwidth,
            Bytes(4),
            Ver::V1_0,
        ),
        3 => entry(
            "Maximum Upstream Rate",
            "Peak upstream rate for this class",
            V::Bandwidth,
            Bytes(4),
            Ver::V1_0,
        ),
        4 => entry(
            "Upstream Channel Priority",
            "Relative priority on the upstream channel",
            V::TrafficPriority,
            Bytes(1),
            Ver::V1_0,
        ),
        5 => entry(
            "Guaranteed Minimum Upstream Rate",
            "Reserved upstream rate for this class",
            V::Bandwidth,
            Bytes(4),
            Ver::V1_0,
        ),
        6 => entry(
            "Maximum Upstream Burst",
            "Largest upstream burst, in bytes",
            V::Uint16,
            Bytes(2),
            Ver::V1_0,
        ),
        7 => entry(
            "Class-of-Service Privacy Enable",
            "Enables baseline privacy for this class",
            V::Boolean,
            Bytes(1),
            Ver::V1_0,
        ),
        _ => return None,
    })
}

pub static CAPABILITY_DOCSIS_VERSION: EnumDomain = EnumDomain {
    name: "docsis_version",
    width: 1,
    values: &[
        (0, "DOCSIS 1.0"),
        (1, "DOCSIS 1.1"),
        (2, "DOCSIS 2.0"),
        (3, "DOCSIS 3.0"),
        (4, "DOCSIS 3.1"),
    ],
};

pub static CAPABILITY_PRIVACY: EnumDomain = EnumDomain {
    name: "privacy_support",
    width: 1,
    values: &[(0, "BPI Support"), (1, "BPI Plus Support")],
};

fn modem_capabilities(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Concatenation Support",
            "Modem can concatenate upstream frames",
            V::Boolean,
            Bytes(1),
            Ver::V1_0,
        ),
        2 => with_domain(
            entry(
                "DOCSIS Version",
                "Highest DOCSIS release the modem implements",
                V::Enum,
                Bytes(1),
                Ver::V1_0,
            ),
            &CAPABILITY_DOCSIS_VERSION,
        ),
        3 => entry(
            "Fragmentation Support",
            "Modem can fragment upstream frames",
            V::Boolean,
            Bytes(1),
            Ver::V1_1,
        ),
        4 => entry(
            "Payload Header Suppression Support",
            "Modem supports PHS rules",
            V::Boolean,
            Bytes(1),
            Ver::V1_1,
        ),
        5 => entry(
            "IGMP Support",
            "Modem snoops IGMP for multicast forwarding",
            V::Boolean,
            Bytes(1),
            Ver::V1_1,
        ),
        6 => with_domain(
            entry(
                "Privacy Support",
                "Baseline privacy flavour the modem supports",
                V::Enum,
                Bytes(1),
                Ver::V1_0,
            ),
            &CAPABILITY_PRIVACY,
        ),
        7 => entry(
            "Downstream SAID Support",
            "Number of downstream SAIDs supported",
            V::Uint8,
            Bytes(1),
            Ver::V1_1,
        ),
        8 => entry(
            "Upstream SID Support",
            "Number of upstream SIDs supported",
            V::Uint8,
            Bytes(1),
            Ver::V1_1,
        ),
        9 => entry(
            "Optional Filtering Support",
            "Bitmask of 802.1P/Q filtering options",
            V::HexString,
            Bytes(1),
            Ver::V1_1,
        ),
        10 => entry(
            "Transmit Pre-Equalizer Taps per Modulation Interval",
            "Equalizer tap density",
            V::Uint8,
            Bytes(1),
            Ver::V1_1,
        ),
        11 => entry(
            "Number of Transmit Equalizer Taps",
            "Equalizer length",
            V::Uint8,
            Bytes(1),
            Ver::V1_1,
        ),
        12 => entry(
            "DCC Support",
            "Modem supports dynamic channel change",
            V::Boolean,
            Bytes(1),
            Ver::V1_1,
        ),
        _ => return None,
    })
}

fn snmp_varbind(typ: u8) -> Option<SpecEntry> {
    // 0x30 is the DER SEQUENCE tag; structural decomposition of a MIB
    // object TLV yields exactly one such child.
    (typ == 48).then(|| {
        entry(
            "SNMP VarBind",
            "DER SEQUENCE of OID and value",
            V::Asn1Der,
            Unbounded,
            Ver::V1_0,
        )
    })
}

fn legacy_service_flow(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Service Flow Reference",
            "Reference binding classifiers to this flow",
            V::ServiceFlowRef,
            Bytes(2),
            Ver::V1_0,
        ),
        2 => entry(
            "Service Class Name",
            "Named service class configured on the CMTS",
            V::String,
            Unbounded,
            Ver::V1_0,
        ),
        3 => entry(
            "Quality of Service Parameter Set Type",
            "Provisioned, admitted or active",
            V::Uint8,
            Bytes(1),
            Ver::V1_0,
        ),
        4 => entry(
            "Traffic Priority",
            "Relative priority among flows",
            V::TrafficPriority,
            Bytes(1),
            Ver::V1_0,
        ),
        5 => entry(
            "Maximum Sustained Traffic Rate",
            "Token bucket rate limit",
            V::Bandwidth,
            Bytes(4),
            Ver::V1_0,
        ),
        6 => entry(
            "Maximum Traffic Burst",
            "Token bucket depth, in bytes",
            V::Uint32,
            Bytes(4),
            Ver::V1_0,
        ),
        7 => entry(
            "Minimum Reserved Traffic Rate",
            "Guaranteed rate for this flow",
            V::Bandwidth,
            Bytes(4),
            Ver::V1_0,
        ),
        8 => entry(
            "Minimum Packet Size",
            "Assumed packet size for the reserved rate",
            V::Uint16,
            Bytes(2),
            Ver::V1_0,
        ),
        _ => return None,
    })
}

pub static DSC_ACTION: EnumDomain = EnumDomain {
    name: "dynamic_service_change_action",
    width: 1,
    values: &[
        (0, "DSC Add Classifier"),
        (1, "DSC Replace Classifier"),
        (2, "DSC Delete Classifier"),
    ],
};

fn packet_classifier(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Classifier Reference",
            "File-local identifier for this classifier",
            V::Uint8,
            Bytes(1),
            Ver::V1_1,
        ),
        2 => entry(
            "Classifier Identifier",
            "CMTS-assigned classifier identifier",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        3 => entry(
            "Service Flow Reference",
            "Flow this classifier steers packets into",
            V::ServiceFlowRef,
            Bytes(2),
            Ver::V1_1,
        ),
        4 => entry(
            "Service Flow Identifier",
            "CMTS-assigned flow identifier",
            V::Uint32,
            Bytes(4),
            Ver::V1_1,
        ),
        5 => entry(
            "Rule Priority",
            "Matching order among classifiers",
            V::Uint8,
            Bytes(1),
            Ver::V1_1,
        ),
        6 => entry(
            "Classifier Activation State",
            "Whether the classifier starts active",
            V::Boolean,
            Bytes(1),
            Ver::V1_1,
        ),
        7 => with_domain(
            entry(
                "Dynamic Service Change Action",
                "What a DSC carrying this classifier does",
                V::Enum,
                Bytes(1),
                Ver::V1_1,
            ),
            &DSC_ACTION,
        ),
        8 => entry(
            "Error Encodings",
            "Parameter and error code from a rejected request",
            V::Binary,
            Unbounded,
            Ver::V1_1,
        ),
        9 => entry(
            "IP Packet Classification Criteria",
            "Layer 3 match terms",
            V::Compound,
            Unbounded,
            Ver::V1_1,
        ),
        10 => entry(
            "Ethernet LLC Packet Classification Criteria",
            "Layer 2 match terms",
            V::Compound,
            Unbounded,
            Ver::V1_1,
        ),
        11 => entry(
            "IEEE 802.1P/Q Packet Classification Criteria",
            "VLAN priority and ID match terms",
            V::Compound,
            Unbounded,
            Ver::V1_1,
        ),
        43 => entry(
            "Vendor Specific Classifier Parameters",
            "Vendor extension envelope inside a classifier",
            V::Compound,
            Unbounded,
            Ver::V1_1,
        ),
        _ => return None,
    })
}

fn ip_criteria(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "IP Type of Service Range and Mask",
            "Low, high and mask over the TOS byte",
            V::HexString,
            Bytes(3),
            Ver::V1_1,
        ),
        2 => entry(
            "IP Protocol",
            "Protocol number, 256 for any, 257 for UDP or TCP",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        3 => entry(
            "IP Source Address",
            "Source network to match",
            V::Ipv4,
            Bytes(4),
            Ver::V1_1,
        ),
        4 => entry(
            "IP Source Mask",
            "Mask applied to the source address",
            V::Ipv4,
            Bytes(4),
            Ver::V1_1,
        ),
        5 => entry(
            "IP Destination Address",
            "Destination network to match",
            V::Ipv4,
            Bytes(4),
            Ver::V1_1,
        ),
        6 => entry(
            "IP Destination Mask",
            "Mask applied to the destination address",
            V::Ipv4,
            Bytes(4),
            Ver::V1_1,
        ),
        7 => entry(
            "TCP/UDP Source Port Start",
            "Low end of the source port range",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        8 => entry(
            "TCP/UDP Source Port End",
            "High end of the source port range",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        9 => entry(
            "TCP/UDP Destination Port Start",
            "Low end of the destination port range",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        10 => entry(
            "TCP/UDP Destination Port End",
            "High end of the destination port range",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        _ => return None,
    })
}

fn llc_criteria(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Destination MAC Address",
            "Address and mask, 12 bytes",
            V::Binary,
            Bytes(12),
            Ver::V1_1,
        ),
        2 => entry(
            "Source MAC Address",
            "Exact source address to match",
            V::MacAddress,
            Bytes(6),
            Ver::V1_1,
        ),
        3 => entry(
            "Ethertype/DSAP/MacType",
            "Frame type selector and value",
            V::HexString,
            Bytes(3),
            Ver::V1_1,
        ),
        _ => return None,
    })
}

fn dot1pq_criteria(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "IEEE 802.1P User Priority",
            "Low and high priority bounds",
            V::HexString,
            Bytes(2),
            Ver::V1_1,
        ),
        2 => entry(
            "IEEE 802.1Q VLAN ID",
            "VLAN to match",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        _ => return None,
    })
}

pub static SCHEDULING_TYPE: EnumDomain = EnumDomain {
    name: "service_flow_scheduling_type",
    width: 1,
    values: &[
        (1, "Undefined"),
        (2, "Best Effort"),
        (3, "Non-Real-Time Polling Service"),
        (4, "Real-Time Polling Service"),
        (5, "Unsolicited Grant Service with Activity Detection"),
        (6, "Unsolicited Grant Service"),
    ],
};

fn qos_service_flow(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Service Flow Reference",
            "File-local reference classifiers point at",
            V::ServiceFlowRef,
            Bytes(2),
            Ver::V1_1,
        ),
        2 => entry(
            "Service Flow Identifier",
            "CMTS-assigned flow identifier",
            V::Uint32,
            Bytes(4),
            Ver::V1_1,
        ),
        3 => entry(
            "Service Identifier",
            "Upstream SID once the flow is admitted",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        4 => entry(
            "Service Class Name",
            "Named service class configured on the CMTS",
            V::String,
            Unbounded,
            Ver::V1_1,
        ),
        5 => entry(
            "Error Encodings",
            "Parameter and error code from a rejected request",
            V::Binary,
            Unbounded,
            Ver::V1_1,
        ),
        6 => entry(
            "QoS Parameter Set Type",
            "Provisioned, admitted or active",
            V::Uint8,
            Bytes(1),
            Ver::V1_1,
        ),
        7 => entry(
            "Traffic Priority",
            "Relative priority among flows",
            V::TrafficPriority,
            Bytes(1),
            Ver::V1_1,
        ),
        8 => entry(
            "Maximum Sustained Traffic Rate",
            "Token bucket rate limit, in bps",
            V::Bandwidth,
            Bytes(4),
            Ver::V1_1,
        ),
        9 => entry(
            "Maximum Traffic Burst",
            "Token bucket depth, in bytes",
            V::Uint32,
            Bytes(4),
            Ver::V1_1,
        ),
        10 => entry(
            "Minimum Reserved Traffic Rate",
            "Guaranteed rate for this flow",
            V::Bandwidth,
            Bytes(4),
            Ver::V1_1,
        ),
        11 => entry(
            "Assumed Minimum Reserved Rate Packet Size",
            "Packet size assumed when policing the reserved rate",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        12 => entry(
            "Timeout for Active QoS Parameters",
            "Seconds of inactivity before active parameters expire",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        13 => entry(
            "Timeout for Admitted QoS Parameters",
            "Seconds admitted resources stay reserved",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        14 => entry(
            "Maximum Concatenated Burst",
            "Largest concatenated upstream burst, in bytes",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        15 => with_domain(
            entry(
                "Service Flow Scheduling Type",
                "Upstream scheduling service for this flow",
                V::Enum,
                Bytes(1),
                Ver::V1_1,
            ),
            &SCHEDULING_TYPE,
        ),
        16 => entry(
            "Request/Transmission Policy",
            "Bitmask restricting request opportunities",
            V::HexString,
            Bytes(4),
            Ver::V1_1,
        ),
        17 => entry(
            "Nominal Polling Interval",
            "Microseconds between unicast request opportunities",
            V::Uint32,
            Bytes(4),
            Ver::V1_1,
        ),
        18 => entry(
            "Tolerated Poll Jitter",
            "Microseconds of acceptable poll displacement",
            V::Uint32,
            Bytes(4),
            Ver::V1_1,
        ),
        19 => entry(
            "Unsolicited Grant Size",
            "Bytes granted per interval for UGS flows",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        20 => entry(
            "Nominal Grant Interval",
            "Microseconds between unsolicited grants",
            V::Uint32,
            Bytes(4),
            Ver::V1_1,
        ),
        21 => entry(
            "Tolerated Grant Jitter",
            "Microseconds of acceptable grant displacement",
            V::Uint32,
            Bytes(4),
            Ver::V1_1,
        ),
        22 => entry(
            "Grants per Interval",
            "Unsolicited grants per nominal interval",
            V::Uint8,
            Bytes(1),
            Ver::V1_1,
        ),
        23 => entry(
            "IP Type of Service Overwrite",
            "AND/OR masks rewriting the TOS byte",
            V::HexString,
            Bytes(2),
            Ver::V1_1,
        ),
        24 => entry(
            "Unsolicited Grant Time Reference",
            "Base time for the grant schedule",
            V::Uint32,
            Bytes(4),
            Ver::V1_1,
        ),
        25 => entry(
            "Maximum Downstream Latency",
            "Microseconds the CMTS may hold a packet",
            V::Uint32,
            Bytes(4),
            Ver::V1_1,
        ),
        _ => return None,
    })
}

pub static PHS_DSC_ACTION: EnumDomain = EnumDomain {
    name: "phs_dynamic_service_change_action",
    width: 1,
    values: &[
        (0, "Add PHS Rule"),
        (1, "Set PHS Rule"),
        (2, "Delete PHS Rule"),
        (3, "Delete all PHS Rules"),
    ],
};

fn payload_header_suppression(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Classifier Reference",
            "Classifier this PHS rule attaches to",
            V::Uint8,
            Bytes(1),
            Ver::V1_1,
        ),
        2 => entry(
            "Classifier Identifier",
            "CMTS-assigned classifier identifier",
            V::Uint16,
            Bytes(2),
            Ver::V1_1,
        ),
        3 => entry(
            "Service Flow Reference",
            "Flow this PHS rule applies to",
            V::ServiceFlowRef,
            Bytes(2),
            Ver::V1_1,
        ),
        4 => entry(
            "Service Flow Identifier",
            "CMTS-assigned flow identifier",
            V::Uint32,
            Bytes(4),
            Ver::V1_1,
        ),
        5 => with_domain(
            entry(
                "Dynamic Service Change Action",
                "What a DSC carrying this rule does",
                V::Enum,
                Bytes(1),
                Ver::V1_1,
            ),
            &PHS_DSC_ACTION,
        ),
        6 => entry(
            "Error Encodings",
            "Parameter and error code from a rejected request",
            V::Binary,
            Unbounded,
            Ver::V1_1,
        ),
        7 => entry(
            "PHS Field",
            "Header bytes to suppress",
            V::HexString,
            Unbounded,
            Ver::V1_1,
        ),
        8 => entry(
            "PHS Index",
            "Index naming this rule on the link",
            V::Uint8,
            Bytes(1),
            Ver::V1_1,
        ),
        9 => entry(
            "PHS Mask",
            "Bitmask of which field bytes are suppressed",
            V::HexString,
            Unbounded,
            Ver::V1_1,
        ),
        10 => entry(
            "PHS Size",
            "Total suppressed bytes",
            V::Uint8,
            Bytes(1),
            Ver::V1_1,
        ),
        11 => entry(
            "PHS Verification",
            "Whether the modem verifies suppressed bytes",
            V::Boolean,
            Bytes(1),
            Ver::V1_1,
        ),
        _ => return None,
    })
}

fn snmpv3_kickstart(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Security Name",
            "USM security name the kickstart provisions",
            V::String,
            Unbounded,
            Ver::V1_1,
        ),
        2 => entry(
            "Manager Public Number",
            "Diffie-Hellman public number of the manager",
            V::HexString,
            Unbounded,
            Ver::V1_1,
        ),
        _ => return None,
    })
}

pub static TRAP_TYPE: EnumDomain = EnumDomain {
    name: "notification_trap_type",
    width: 2,
    values: &[
        (1, "SNMPv1 Trap"),
        (2, "SNMPv2c Trap"),
        (3, "SNMP Inform"),
        (4, "SNMPv2c Trap with Acknowledgement"),
        (5, "SNMPv3 Trap"),
    ],
};

fn notification_receiver(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Receiver IP Address",
            "Where notifications are sent",
            V::Ipv4,
            Bytes(4),
            Ver::V2_0,
        ),
        2 => entry(
            "Receiver UDP Port",
            "Destination port, 162 by default",
            V::Uint16,
            Bytes(2),
            Ver::V2_0,
        ),
        3 => with_domain(
            entry(
                "Trap Type",
                "Notification PDU flavour",
                V::Enum,
                Bytes(2),
                Ver::V2_0,
            ),
            &TRAP_TYPE,
        ),
        4 => entry(
            "Timeout",
            "Milliseconds to wait for an inform response",
            V::Uint16,
            Bytes(2),
            Ver::V2_0,
        ),
        5 => entry(
            "Retries",
            "Inform retransmissions before giving up",
            V::Uint16,
            Bytes(2),
            Ver::V2_0,
        ),
        6 => entry(
            "Notification Filtering Parameters",
            "OID subtree the receiver is limited to",
            V::SnmpOid,
            Unbounded,
            Ver::V2_0,
        ),
        7 => entry(
            "Security Name",
            "USM security name notifications are sent under",
            V::String,
            Unbounded,
            Ver::V2_0,
        ),
        _ => return None,
    })
}

fn downstream_channel_list(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Single Downstream Channel",
            "One channel the modem may acquire",
            V::Compound,
            Unbounded,
            Ver::V2_0,
        ),
        2 => entry(
            "Downstream Frequency Range",
            "A scan range the modem may acquire from",
            V::Compound,
            Unbounded,
            Ver::V2_0,
        ),
        3 => entry(
            "Default Scanning Timeout",
            "Seconds before falling back to full scan",
            V::Uint16,
            Bytes(2),
            Ver::V2_0,
        ),
        _ => return None,
    })
}

fn single_downstream_channel(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Single Downstream Channel Timeout",
            "Seconds to wait on this channel",
            V::Uint16,
            Bytes(2),
            Ver::V2_0,
        ),
        2 => entry(
            "Single Downstream Channel Frequency",
            "Center frequency to acquire",
            V::Frequency,
            Bytes(4),
            Ver::V2_0,
        ),
        _ => return None,
    })
}

fn downstream_frequency_range(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Downstream Frequency Range Timeout",
            "Seconds to spend scanning this range",
            V::Uint16,
            Bytes(2),
            Ver::V2_0,
        ),
        2 => entry(
            "Downstream Frequency Range Start",
            "First frequency in the range",
            V::Frequency,
            Bytes(4),
            Ver::V2_0,
        ),
        3 => entry(
            "Downstream Frequency Range End",
            "Last frequency in the range",
            V::Frequency,
            Bytes(4),
            Ver::V2_0,
        ),
        4 => entry(
            "Downstream Frequency Range Step Size",
            "Scan step between attempts",
            V::Frequency,
            Bytes(4),
            Ver::V2_0,
        ),
        _ => return None,
    })
}

fn vendor_specific_info(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "CM Load Balancing Policy ID",
            "Load balancing policy the modem joins",
            V::Uint32,
            Bytes(4),
            Ver::V2_0,
        ),
        2 => entry(
            "CM Load Balancing Priority",
            "Priority within the load balancing group",
            V::Uint32,
            Bytes(4),
            Ver::V2_0,
        ),
        3 => entry(
            "CM Load Balancing Group ID",
            "Load balancing group the modem belongs to",
            V::Uint32,
            Bytes(4),
            Ver::V2_0,
        ),
        4 => entry(
            "CM Ranging Class ID Extension",
            "Extended ranging class bits",
            V::Uint32,
            Bytes(4),
            Ver::V2_0,
        ),
        5 => entry(
            "L2VPN Encoding",
            "Layer 2 VPN configuration envelope",
            V::Compound,
            Unbounded,
            Ver::V3_0,
        ),
        8 => entry(
            "Vendor ID",
            "OUI scoping the surrounding vendor TLVs",
            V::VendorOui,
            Bytes(3),
            Ver::V1_0,
        ),
        // Multicast join/leave authorization blocks look TLV-shaped often
        // enough to fool structural discovery; they stay opaque.
        10 => entry(
            "IP Multicast Join Authorization",
            "Session rules authorizing multicast joins",
            V::Binary,
            Unbounded,
            Ver::V3_0,
        ),
        11 => entry(
            "IP Multicast Leave Authorization",
            "Session rules authorizing multicast leaves",
            V::Binary,
            Unbounded,
            Ver::V3_0,
        ),
        _ => return None,
    })
}

fn l2vpn(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "VPN Identifier",
            "Opaque identifier naming the L2VPN",
            V::HexString,
            Unbounded,
            Ver::V3_0,
        ),
        2 => entry(
            "Service Multiplexing",
            "How attachment circuits are multiplexed onto the NSI",
            V::Compound,
            Unbounded,
            Ver::V3_0,
        ),
        3 => entry(
            "Downstream Classifier Identifier",
            "Downstream classifier carrying this VPN",
            V::Uint16,
            Bytes(2),
            Ver::V3_0,
        ),
        4 => entry(
            "Enable Forwarding",
            "Whether the attachment circuit forwards",
            V::Boolean,
            Bytes(1),
            Ver::V3_0,
        ),
        _ => return None,
    })
}

fn service_mux(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "Other Service Multiplexing Value",
            "Encapsulation-specific multiplexing value",
            V::HexString,
            Unbounded,
            Ver::V3_0,
        ),
        2 => entry(
            "IEEE 802.1Q Service Multiplexing Value",
            "VLAN ID on the network system interface",
            V::Uint16,
            Bytes(2),
            Ver::V3_0,
        ),
        3 => entry(
            "IEEE 802.1ad Service Multiplexing Value",
            "Stacked S-tag and C-tag on the NSI",
            V::Uint32,
            Bytes(4),
            Ver::V3_0,
        ),
        4 => entry(
            "MPLS Service Multiplexing Value",
            "MPLS pseudowire parameters for the NSI",
            V::Compound,
            Unbounded,
            Ver::V3_0,
        ),
        _ => return None,
    })
}

fn mpls_service_mux(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "MPLS Peer IP Address",
            "Pseudowire peer on the NSI side",
            V::Ipv4,
            Bytes(4),
            Ver::V3_0,
        ),
        2 => entry(
            "MPLS Pseudowire ID",
            "Pseudowire identifier signalled to the peer",
            V::Uint32,
            Bytes(4),
            Ver::V3_0,
        ),
        3 => entry(
            "MPLS Backup Peer IP Address",
            "Pseudowire peer used on failover",
            V::Ipv4,
            Bytes(4),
            Ver::V3_0,
        ),
        4 => entry(
            "MPLS Backup Pseudowire ID",
            "Pseudowire identifier used on failover",
            V::Uint32,
            Bytes(4),
            Ver::V3_0,
        ),
        _ => return None,
    })
}

fn dut_filtering(typ: u8) -> Option<SpecEntry> {
    Some(match typ {
        1 => entry(
            "DUT Control",
            "Enables downstream unencrypted traffic filtering",
            V::Boolean,
            Bytes(1),
            Ver::V3_0,
        ),
        2 => entry(
            "DUT CMIM",
            "Interface mask DUT filtering applies to",
            V::HexString,
            Unbounded,
            Ver::V3_0,
        ),
        _ => return None,
    })
}
