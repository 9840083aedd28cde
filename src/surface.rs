//! The human-editable document surface.
//!
//! One shape, two syntaxes: a top-level mapping with `docsis_version`, an
//! ordered `tlvs` sequence and optional `metadata`, written as YAML or
//! JSON. Leaves carry `formatted_value`, compound nodes carry `subtlvs`;
//! a node presenting both is read as compound. Values with no printable
//! rendering ride as uppercase hex strings, so every document survives
//! both syntaxes unmodified.

use serde::{Deserialize, Serialize};

use crate::enrich::EnrichedTlv;
use crate::errors::Result;
use crate::specs::Version;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub docsis_version: Version,
    pub tlvs: Vec<EnrichedTlv>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tlvs: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Document {
    pub fn new(docsis_version: Version, tlvs: Vec<EnrichedTlv>) -> Self {
        Self {
            docsis_version,
            tlvs,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

pub fn to_json(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

pub fn from_json(text: &str) -> Result<Document> {
    Ok(serde_json::from_str(text)?)
}

pub fn to_yaml(doc: &Document) -> Result<String> {
    Ok(serde_yaml::to_string(doc)?)
}

pub fn from_yaml(text: &str) -> Result<Document> {
    Ok(serde_yaml::from_str(text)?)
}
