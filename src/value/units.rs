//! Unit-bearing scalar grammars: frequency, bandwidth, duration,
//! percentage and RF power.
//!
//! Wire forms are 32-bit base units (Hz, bps, seconds) except percentage
//! (one byte) and power (quarter-dB steps). The human grammar is tolerant
//! on input — any case, optional whitespace, float multipliers — and
//! compact on output, preferring the largest unit that divides cleanly.

use crate::errors::{Error, Result};

fn invalid(field: &'static str, value: &str, expected: &'static str) -> Error {
    Error::InvalidValue {
        field,
        value: value.to_string(),
        expected,
    }
}

/// Parses `"591 MHz"` / `"1.2ghz"` / `"591000000"` style input, returning
/// the value in base units. `units` maps lowercase suffixes to multipliers
/// and must be ordered longest-suffix-first.
fn parse_scaled(
    field: &'static str,
    input: &str,
    units: &[(&str, u64)],
    expected: &'static str,
) -> Result<u32> {
    let lower = input.trim().to_ascii_lowercase();
    let (number, mult) = units
        .iter()
        .find_map(|&(suffix, mult)| lower.strip_suffix(suffix).map(|n| (n, mult)))
        .unwrap_or((lower.as_str(), 1));
    let number = number.trim();
    if number.is_empty() {
        return Err(invalid(field, input, expected));
    }
    let parsed: f64 = number
        .parse()
        .map_err(|_| invalid(field, input, expected))?;
    let scaled = parsed * mult as f64;
    let rounded = scaled.round();
    if !(0.0..=u32::MAX as f64).contains(&rounded) || (scaled - rounded).abs() > 0.01 {
        return Err(invalid(field, input, expected));
    }
    Ok(rounded as u32)
}

const FREQUENCY_UNITS: &[(&str, u64)] = &[
    ("ghz", 1_000_000_000),
    ("mhz", 1_000_000),
    ("khz", 1_000),
    ("hz", 1),
];

pub fn parse_frequency(input: &str) -> Result<u32> {
    parse_scaled(
        "frequency",
        input,
        FREQUENCY_UNITS,
        "a frequency like \"591 MHz\" or a value in Hz",
    )
}

pub fn format_frequency(hz: u32) -> String {
    if hz != 0 && hz % 1_000_000_000 == 0 {
        format!("{} GHz", hz / 1_000_000_000)
    } else if hz != 0 && hz % 1_000_000 == 0 {
        format!("{} MHz", hz / 1_000_000)
    } else if hz != 0 && hz % 1_000 == 0 {
        format!("{} kHz", hz / 1_000)
    } else {
        format!("{} Hz", hz)
    }
}

const BANDWIDTH_UNITS: &[(&str, u64)] = &[
    ("gbps", 1_000_000_000),
    ("mbps", 1_000_000),
    ("kbps", 1_000),
    ("bps", 1),
];

pub fn parse_bandwidth(input: &str) -> Result<u32> {
    parse_scaled(
        "bandwidth",
        input,
        BANDWIDTH_UNITS,
        "a rate like \"100 Mbps\" or a value in bps",
    )
}

pub fn format_bandwidth(bps: u32) -> String {
    if bps != 0 && bps % 1_000_000_000 == 0 {
        format!("{} Gbps", bps / 1_000_000_000)
    } else if bps != 0 && bps % 1_000_000 == 0 {
        format!("{} Mbps", bps / 1_000_000)
    } else if bps != 0 && bps % 1_000 == 0 {
        format!("{} kbps", bps / 1_000)
    } else {
        format!("{} bps", bps)
    }
}

// Longest spellings first so "minutes" isn't eaten by the bare "s".
const DURATION_UNITS: &[(&str, u64)] = &[
    ("seconds", 1),
    ("second", 1),
    ("minutes", 60),
    ("minute", 60),
    ("hours", 3600),
    ("hour", 3600),
    ("days", 86400),
    ("day", 86400),
    ("secs", 1),
    ("sec", 1),
    ("mins", 60),
    ("min", 60),
    ("hrs", 3600),
    ("hr", 3600),
    ("d", 86400),
    ("h", 3600),
    ("m", 60),
    ("s", 1),
];

pub fn parse_duration(input: &str) -> Result<u32> {
    parse_scaled(
        "duration",
        input,
        DURATION_UNITS,
        "a duration like \"30 seconds\" or \"5 minutes\"",
    )
}

pub fn format_duration(secs: u32) -> String {
    let (n, unit) = if secs != 0 && secs % 86400 == 0 {
        (secs / 86400, "day")
    } else if secs != 0 && secs % 3600 == 0 {
        (secs / 3600, "hour")
    } else if secs != 0 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (secs, "second")
    };
    format!("{} {}{}", n, unit, if n == 1 { "" } else { "s" })
}

/// Accepts `"75%"`, a fraction in [0.0, 1.0], or a bare integer 0-100.
pub fn parse_percentage(input: &str) -> Result<u8> {
    const EXPECTED: &str = "a percentage: \"75%\", 0.75 or 75";
    let t = input.trim();
    let (number, scale) = match t.strip_suffix('%') {
        Some(n) => (n.trim_end(), 1.0),
        None if t.contains('.') => (t, 100.0),
        None => (t, 1.0),
    };
    let parsed: f64 = number
        .parse()
        .map_err(|_| invalid("percentage", input, EXPECTED))?;
    let scaled = (parsed * scale).round();
    if !(0.0..=100.0).contains(&scaled) {
        return Err(invalid("percentage", input, EXPECTED));
    }
    Ok(scaled as u8)
}

pub fn format_percentage(value: u8) -> String {
    format!("{}%", value)
}

/// Parses a dBmV figure into quarter-dB steps, rounding to the nearest
/// step. Range checks are the caller's business; a signed byte covers
/// -32.00 to +31.75 dBmV and extended power rides in a uint32.
pub fn parse_quarter_db(input: &str) -> Result<i64> {
    const EXPECTED: &str = "an RF power level like \"10.0 dBmV\"";
    let lower = input.trim().to_ascii_lowercase();
    let number = lower
        .strip_suffix("dbmv")
        .or_else(|| lower.strip_suffix("db"))
        .unwrap_or(&lower)
        .trim_end();
    let parsed: f64 = number
        .parse()
        .map_err(|_| invalid("power", input, EXPECTED))?;
    let quarters = (parsed * 4.0).round();
    if !(i64::MIN as f64..=i64::MAX as f64).contains(&quarters) {
        return Err(invalid("power", input, EXPECTED));
    }
    Ok(quarters as i64)
}

pub fn format_quarter_db(quarters: i64) -> String {
    let db = quarters as f64 / 4.0;
    if quarters % 2 == 0 {
        format!("{:.1} dBmV", db)
    } else {
        format!("{:.2} dBmV", db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_canonical() {
        assert_eq!(format_frequency(591_000_000), "591 MHz");
        assert_eq!(format_frequency(1_000_000_000), "1 GHz");
        assert_eq!(format_frequency(1_200_000_000), "1200 MHz");
        assert_eq!(format_frequency(473_250), "473250 Hz");
        assert_eq!(format_frequency(473_000), "473 kHz");
        assert_eq!(format_frequency(0), "0 Hz");
    }

    #[test]
    fn test_frequency_grammar() {
        assert_eq!(parse_frequency("591 MHz").unwrap(), 591_000_000);
        assert_eq!(parse_frequency("591mhz").unwrap(), 591_000_000);
        assert_eq!(parse_frequency("1.2 GHz").unwrap(), 1_200_000_000);
        assert_eq!(parse_frequency("  93000000  ").unwrap(), 93_000_000);
        assert_eq!(parse_frequency("93000000 Hz").unwrap(), 93_000_000);
        assert!(parse_frequency("").is_err());
        assert!(parse_frequency("MHz").is_err());
        assert!(parse_frequency("-591 MHz").is_err());
    }

    #[test]
    fn test_frequency_round_trip() {
        for hz in [0u32, 1, 999, 1_000, 473_000, 591_000_000, 1_000_000_000, u32::MAX] {
            assert_eq!(parse_frequency(&format_frequency(hz)).unwrap(), hz);
        }
    }

    #[test]
    fn test_bandwidth_grammar() {
        assert_eq!(parse_bandwidth("100 Mbps").unwrap(), 100_000_000);
        assert_eq!(parse_bandwidth("1 Gbps").unwrap(), 1_000_000_000);
        assert_eq!(parse_bandwidth("256kbps").unwrap(), 256_000);
        assert_eq!(parse_bandwidth("2500000").unwrap(), 2_500_000);
        assert_eq!(format_bandwidth(100_000_000), "100 Mbps");
        assert_eq!(format_bandwidth(1_000_000_000), "1 Gbps");
        assert_eq!(format_bandwidth(2_500), "2500 bps");
    }

    #[test]
    fn test_bandwidth_round_trip() {
        for bps in [0u32, 64_000, 2_500_000, 100_000_000, u32::MAX] {
            assert_eq!(parse_bandwidth(&format_bandwidth(bps)).unwrap(), bps);
        }
    }

    #[test]
    fn test_duration_grammar() {
        assert_eq!(parse_duration("30 seconds").unwrap(), 30);
        assert_eq!(parse_duration("5 minutes").unwrap(), 300);
        assert_eq!(parse_duration("2h").unwrap(), 7200);
        assert_eq!(parse_duration("1 day").unwrap(), 86400);
        assert_eq!(parse_duration("90").unwrap(), 90);
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_duration_canonical() {
        assert_eq!(format_duration(30), "30 seconds");
        assert_eq!(format_duration(1), "1 second");
        assert_eq!(format_duration(300), "5 minutes");
        assert_eq!(format_duration(7200), "2 hours");
        assert_eq!(format_duration(86400), "1 day");
        assert_eq!(format_duration(90), "90 seconds");
        assert_eq!(format_duration(0), "0 seconds");
    }

    #[test]
    fn test_duration_round_trip() {
        for secs in [0u32, 1, 30, 59, 60, 90, 300, 3600, 7200, 86400, u32::MAX] {
            assert_eq!(parse_duration(&format_duration(secs)).unwrap(), secs);
        }
    }

    #[test]
    fn test_percentage_grammar() {
        assert_eq!(parse_percentage("75%").unwrap(), 75);
        assert_eq!(parse_percentage("0.75").unwrap(), 75);
        assert_eq!(parse_percentage("75").unwrap(), 75);
        assert_eq!(parse_percentage("0%").unwrap(), 0);
        assert_eq!(parse_percentage("100").unwrap(), 100);
        assert!(parse_percentage("101").is_err());
        assert!(parse_percentage("1.5").is_err());
        assert!(parse_percentage("-1").is_err());
    }

    #[test]
    fn test_percentage_round_trip() {
        for p in 0u8..=100 {
            assert_eq!(parse_percentage(&format_percentage(p)).unwrap(), p);
        }
    }

    #[test]
    fn test_power_quantization() {
        assert_eq!(parse_quarter_db("10.0 dBmV").unwrap(), 40);
        assert_eq!(parse_quarter_db("10.25dBmV").unwrap(), 41);
        assert_eq!(parse_quarter_db("-3.5 dB").unwrap(), -14);
        assert_eq!(parse_quarter_db("6").unwrap(), 24);
        // Quantizes to the nearest quarter step.
        assert_eq!(parse_quarter_db("10.1").unwrap(), 40);
    }

    #[test]
    fn test_power_formatting() {
        assert_eq!(format_quarter_db(40), "10.0 dBmV");
        assert_eq!(format_quarter_db(41), "10.25 dBmV");
        assert_eq!(format_quarter_db(42), "10.5 dBmV");
        assert_eq!(format_quarter_db(-14), "-3.5 dBmV");
        assert_eq!(format_quarter_db(0), "0.0 dBmV");
    }

    #[test]
    fn test_power_round_trip() {
        for quarters in [-128i64, -14, -1, 0, 1, 40, 41, 127, 128, 500_000] {
            assert_eq!(
                parse_quarter_db(&format_quarter_db(quarters)).unwrap(),
                quarters
            );
        }
    }
}
