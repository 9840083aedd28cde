//! Library-wide error type.
//!
//! Structural errors (bad lengths, truncation) are fatal to the decode that
//! hit them and carry a [`Location`] pointing into the input. Semantic
//! trouble — a TLV the registry doesn't know, a value that won't format —
//! is *not* an error; enrichment recovers locally by downgrading to hex so
//! the document still round-trips byte-for-byte.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Where in the input something went wrong.
///
/// `offset` is a byte offset for binary inputs and a line number for text
/// surfaces. `path` is the stack of enclosing TLV types, outermost first,
/// so a failure three levels deep reads as `offset 41 (in TLV 22.43.5)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub path: Vec<u8>,
    pub source: Option<String>,
}

impl Location {
    pub fn at(offset: usize) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: &[u8]) -> Self {
        self.path = path.to_vec();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(src) = &self.source {
            write!(f, "{}: ", src)?;
        }
        write!(f, "offset {}", self.offset)?;
        if !self.path.is_empty() {
            let path = self
                .path
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(".");
            write!(f, " (in TLV {})", path)?;
        }
        Ok(())
    }
}

/// Coarse buckets every boundary error reports alongside its message,
/// location and suggestion. The [`Error`] variants carry the
/// finer-grained kind; this is the closed set a caller can dispatch on.
/// `mic_error` and `file_error` belong to collaborators — the core
/// neither computes MICs nor touches files — but are part of the set so
/// shells can reuse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    ParseError,
    TlvError,
    ValidationError,
    MicError,
    FileError,
    FormatError,
    GenerationError,
}

impl ErrorType {
    pub fn name(self) -> &'static str {
        match self {
            ErrorType::ParseError => "parse_error",
            ErrorType::TlvError => "tlv_error",
            ErrorType::ValidationError => "validation_error",
            ErrorType::MicError => "mic_error",
            ErrorType::FileError => "file_error",
            ErrorType::FormatError => "format_error",
            ErrorType::GenerationError => "generation_error",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid length encoding at {location}: {detail}")]
    InvalidLength { location: Location, detail: String },

    #[error("unexpected end of input at {location}: wanted {wanted} more bytes, {remaining} left")]
    UnexpectedEof {
        location: Location,
        wanted: usize,
        remaining: usize,
    },

    #[error("truncated TLV {typ} at {location}: declares {declared} value bytes, only {remaining} left")]
    TruncatedTlv {
        typ: u8,
        location: Location,
        declared: usize,
        remaining: usize,
    },

    #[error("invalid TLV structure at {location}: {detail}")]
    InvalidStructure { location: Location, detail: String },

    #[error("invalid {field} value {value:?}: expected {expected}")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("TLV nesting deeper than {limit} levels at {location}")]
    ExcessiveNesting { location: Location, limit: usize },

    #[error("required TLV {typ} ({name}) is missing")]
    MissingRequiredTlv { typ: u8, name: String },

    #[error("TLV {typ} ({name}) appears more than once")]
    DuplicateTlv { typ: u8, name: String },

    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON document error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML document error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("couldn't generate output: {0}")]
    Generation(String),
}

impl Error {
    /// The coarse bucket this error reports at the public boundary.
    ///
    /// Length and EOF trouble while walking the byte stream is a parse
    /// error (so is blowing the nesting ceiling); a stream that walks but
    /// doesn't hold together as TLVs is a TLV error; values out of their
    /// domain are validation errors.
    pub fn error_type(&self) -> ErrorType {
        match self {
            Error::InvalidLength { .. }
            | Error::UnexpectedEof { .. }
            | Error::ExcessiveNesting { .. } => ErrorType::ParseError,
            Error::TruncatedTlv { .. } | Error::InvalidStructure { .. } => ErrorType::TlvError,
            Error::InvalidValue { .. }
            | Error::MissingRequiredTlv { .. }
            | Error::DuplicateTlv { .. } => ErrorType::ValidationError,
            Error::UnsupportedFormat(_) | Error::Json(_) | Error::Yaml(_) => {
                ErrorType::FormatError
            }
            Error::Generation(_) => ErrorType::GenerationError,
        }
    }

    /// A human-oriented hint for the CLI to print under the error message.
    pub fn suggestion(&self) -> Option<&'static str> {
        Some(match self {
            Error::InvalidLength { .. } => {
                "The length field uses a reserved multi-byte form. Only single-byte\n\
                 lengths and the 0x81/0x82/0x84 forms are valid in DOCSIS files; the\n\
                 input may not be a DOCSIS configuration at all."
            }
            Error::UnexpectedEof { .. } | Error::TruncatedTlv { .. } => {
                "The file ends in the middle of a TLV. It may have been truncated in\n\
                 transfer; try re-downloading it from the provisioning server."
            }
            Error::InvalidStructure { .. } => {
                "The byte stream doesn't decompose into type/length/value records.\n\
                 Check that the file really is a binary DOCSIS configuration and not\n\
                 a text surface saved with the wrong extension."
            }
            Error::InvalidValue { .. } => {
                "The value doesn't fit the TLV's declared type. Compare it against\n\
                 the grammar shown by `coax specs` for that TLV."
            }
            Error::ExcessiveNesting { .. } => {
                "Sub-TLV nesting ran past the configured limit. Well-formed\n\
                 configurations stay under 8 levels; raise the limit only if you\n\
                 trust the input."
            }
            Error::UnsupportedFormat(_) => {
                "Supported inputs are binary (.cm/.bin), JSON (.json) and YAML\n\
                 (.yml/.yaml). Convert the file to one of those first."
            }
            Error::Json(_) => {
                "The JSON document didn't parse. Validate the syntax, then check the\n\
                 document shape: a top-level mapping with docsis_version and tlvs."
            }
            Error::Yaml(_) => {
                "The YAML document didn't parse. Validate the syntax, then check the\n\
                 document shape: a top-level mapping with docsis_version and tlvs."
            }
            Error::MissingRequiredTlv { .. }
            | Error::DuplicateTlv { .. }
            | Error::Generation(_) => return None,
        })
    }

    /// The location attached to this error, if it has one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Error::InvalidLength { location, .. }
            | Error::UnexpectedEof { location, .. }
            | Error::TruncatedTlv { location, .. }
            | Error::InvalidStructure { location, .. }
            | Error::ExcessiveNesting { location, .. } => Some(location),
            _ => None,
        }
    }
}
