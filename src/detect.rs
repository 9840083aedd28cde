//! File-format auto-detection.
//!
//! Extension first, content sniff as the fallback. The sniff is
//! deliberately cheap: binary DOCSIS files fail the printable test almost
//! immediately, and the text surfaces have unmistakable openings.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Binary,
    Json,
    Yaml,
    Config,
    Asn1,
    Mta,
}

impl FileFormat {
    pub fn name(self) -> &'static str {
        match self {
            FileFormat::Binary => "binary",
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
            FileFormat::Config => "config",
            FileFormat::Asn1 => "asn1",
            FileFormat::Mta => "mta",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn from_extension(path: &Path) -> Option<FileFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "cm" | "bin" => FileFormat::Binary,
        "json" => FileFormat::Json,
        "yml" | "yaml" => FileFormat::Yaml,
        "conf" | "cfg" | "config" => FileFormat::Config,
        "asn1" | "der" => FileFormat::Asn1,
        "mta" => FileFormat::Mta,
        _ => return None,
    })
}

// Keywords the text config dialect opens sections with.
const CONFIG_KEYWORDS: &[&str] = &[
    "Main",
    "NetworkAccess",
    "DownstreamFrequency",
    "UpstreamChannelId",
    "SnmpMibObject",
    "MaxCPE",
    "UsServiceFlow",
    "DsServiceFlow",
];

/// Classifies by content alone.
pub fn sniff(data: &[u8]) -> FileFormat {
    let Ok(text) = std::str::from_utf8(data) else {
        return FileFormat::Binary;
    };
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return FileFormat::Json;
    }
    if trimmed.starts_with("---") || looks_like_yaml_mapping(trimmed) {
        return FileFormat::Yaml;
    }
    let printable = text
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .count();
    let high_printable = text.is_empty() || printable * 100 / text.chars().count() >= 95;
    if high_printable && CONFIG_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return FileFormat::Config;
    }
    FileFormat::Binary
}

fn looks_like_yaml_mapping(text: &str) -> bool {
    // A `key:` or `key: value` opening line.
    text.lines().next().is_some_and(|line| {
        let line = line.trim();
        match line.split_once(':') {
            Some((key, rest)) => {
                !key.is_empty()
                    && key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
                    && (rest.is_empty() || rest.starts_with(' '))
            }
            None => false,
        }
    })
}

/// Extension wins; content decides when the extension says nothing.
pub fn detect(path: &Path, data: &[u8]) -> FileFormat {
    from_extension(path).unwrap_or_else(|| sniff(data))
}
