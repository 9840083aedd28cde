use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use coax::detect::{self, FileFormat};
use coax::enrich::{self, EnrichOptions};
use coax::errors::Error;
use coax::specs::Version;
use coax::surface::{self, Document, Metadata};
use coax::tlv::{self, ParseOptions};
use coax::value::Strictness;
use tracing::{debug, info};

#[derive(clap::Args, Debug)]
pub struct Convert {
    /// Input file.
    input: PathBuf,

    /// Output file; stdout if omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Input format override: binary, json or yaml.
    #[arg(long)]
    from: Option<String>,

    /// Output format: binary, json or yaml. Guessed from the output
    /// extension, YAML by default.
    #[arg(long)]
    to: Option<String>,

    /// DOCSIS version to resolve names against.
    #[arg(long, default_value = "3.1")]
    docsis: String,

    /// Also consult the PacketCable MTA tables.
    #[arg(long)]
    mta: bool,

    /// Reject ambiguous binary values instead of guessing.
    #[arg(long)]
    strict: bool,

    /// Append an end-of-data marker when writing binary.
    #[arg(long)]
    terminate: bool,
}

impl Convert {
    pub fn run(&self) -> Result<()> {
        let data = fs::read(&self.input)
            .with_context(|| format!("couldn't read {}", self.input.display()))?;
        let from = match &self.from {
            Some(name) => parse_format(name)?,
            None => detect::detect(&self.input, &data),
        };
        debug!(%from, "Input format");

        let version: Version = self.docsis.parse().map_err(crate::suggest)?;
        let opts = EnrichOptions {
            version,
            include_mta: self.mta || from == FileFormat::Mta,
            strictness: if self.strict {
                Strictness::Strict
            } else {
                Strictness::Lenient
            },
            ..EnrichOptions::default()
        };

        let doc = self.load(&data, from, version, &opts)?;
        let to = match &self.to {
            Some(name) => parse_format(name)?,
            None => self
                .output
                .as_deref()
                .and_then(|path| detect::from_extension(path))
                .unwrap_or(FileFormat::Yaml),
        };
        debug!(%to, "Output format");

        match to {
            FileFormat::Binary | FileFormat::Mta => {
                let raw = enrich::unenrich(&doc.tlvs, &opts).map_err(crate::suggest)?;
                let bytes =
                    tlv::serialize(&raw, self.terminate).map_err(crate::suggest)?;
                self.emit(&bytes)?;
            }
            FileFormat::Json => {
                let mut text = surface::to_json(&doc).map_err(crate::suggest)?;
                text.push('\n');
                self.emit(text.as_bytes())?;
            }
            FileFormat::Yaml => {
                let text = surface::to_yaml(&doc).map_err(crate::suggest)?;
                self.emit(text.as_bytes())?;
            }
            other => {
                bail!(crate::suggest(Error::UnsupportedFormat(other.to_string())))
            }
        }
        Ok(())
    }

    fn load(
        &self,
        data: &[u8],
        from: FileFormat,
        version: Version,
        opts: &EnrichOptions,
    ) -> Result<Document> {
        Ok(match from {
            FileFormat::Binary | FileFormat::Mta => {
                let raw = tlv::parse(data, ParseOptions::default()).map_err(crate::suggest)?;
                let tlvs = enrich::enrich(&raw, opts).map_err(crate::suggest)?;
                let total = tlvs.len();
                Document::new(version, tlvs).with_metadata(Metadata {
                    total_tlvs: Some(total),
                    parsed_at: Some(Utc::now().to_rfc3339()),
                    source: Some(self.input.display().to_string()),
                })
            }
            FileFormat::Json => {
                surface::from_json(std::str::from_utf8(data)?).map_err(crate::suggest)?
            }
            FileFormat::Yaml => {
                surface::from_yaml(std::str::from_utf8(data)?).map_err(crate::suggest)?
            }
            other => bail!(crate::suggest(Error::UnsupportedFormat(other.to_string()))),
        })
    }

    fn emit(&self, bytes: &[u8]) -> Result<()> {
        match &self.output {
            Some(path) => {
                fs::write(path, bytes)
                    .with_context(|| format!("couldn't write {}", path.display()))?;
                info!(output = %path.display(), len = bytes.len(), "Wrote output");
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(bytes)?;
            }
        }
        Ok(())
    }
}

fn parse_format(name: &str) -> Result<FileFormat> {
    // Accept format names directly or as a bare extension.
    let by_name = match name.to_ascii_lowercase().as_str() {
        "binary" | "bin" | "cm" => Some(FileFormat::Binary),
        "json" => Some(FileFormat::Json),
        "yaml" | "yml" => Some(FileFormat::Yaml),
        "config" | "conf" => Some(FileFormat::Config),
        "asn1" | "der" => Some(FileFormat::Asn1),
        "mta" => Some(FileFormat::Mta),
        _ => None,
    };
    by_name.ok_or_else(|| {
        crate::suggest(Error::UnsupportedFormat(name.to_string()))
    })
}
