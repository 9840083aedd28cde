use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use coax::detect::{self, FileFormat};
use coax::enrich::{self, EnrichOptions, EnrichedTlv};
use coax::specs::{MetadataSource, Version};
use coax::surface;
use coax::tlv::{self, ParseOptions};
use owo_colors::{colors, OwoColorize};
use tap::TapOptional;
use tracing::debug;

type ColorType = colors::Cyan;
type ColorValue = colors::Green;
type ColorUnknown = colors::Magenta;
type ColorMeta = colors::Yellow;

#[derive(clap::Args, Debug)]
pub struct Dump {
    /// Configuration file to dump.
    file: PathBuf,

    /// DOCSIS version to resolve names against.
    #[arg(long, default_value = "3.1")]
    docsis: String,

    /// Also consult the PacketCable MTA tables.
    #[arg(long)]
    mta: bool,

    /// Print the registry description under each TLV.
    #[arg(long)]
    describe: bool,
}

impl Dump {
    pub fn run(&self) -> Result<()> {
        let data = fs::read(&self.file)
            .with_context(|| format!("couldn't read {}", self.file.display()))?;
        let format = detect::detect(&self.file, &data);
        debug!(%format, len = data.len(), "Detected input format");

        let version: Version = self.docsis.parse().map_err(crate::suggest)?;
        let opts = EnrichOptions {
            version,
            include_mta: self.mta || format == FileFormat::Mta,
            ..EnrichOptions::default()
        };

        let tlvs = load_tree(&data, format, &opts)?;
        println!(
            "┏╸{}╺ {} — {}, {} top-level TLVs",
            "coax".italic(),
            self.file.display(),
            version.fg::<ColorMeta>(),
            tlvs.len().fg::<ColorMeta>(),
        );
        for (i, node) in tlvs.iter().enumerate() {
            self.print_node(node, "", i == tlvs.len() - 1);
        }
        Ok(())
    }

    fn print_node(&self, node: &EnrichedTlv, prefix: &str, last: bool) {
        let branch = if prefix.is_empty() {
            if last { "┗─╴" } else { "┠─╴" }
        } else if last {
            "┖╴"
        } else {
            "┠╴"
        };
        print!("{}{}{}", prefix, branch, node.typ.fg::<ColorType>());

        let unknown = node.metadata_source == Some(MetadataSource::Unknown);
        match node.name.as_deref() {
            Some(name) if unknown => print!(" {}", name.fg::<ColorUnknown>()),
            Some(name) => print!(" {}", name),
            None => {}
        }
        if let Some(formatted) = &node.formatted_value {
            let rendered = formatted.to_string();
            if !rendered.is_empty() {
                print!(" — {}", rendered.fg::<ColorValue>());
            }
        }
        println!();

        if self.describe {
            node.description.as_deref().tap_some(|d| {
                println!("{}    {}", prefix, d.italic());
            });
        }

        let child_prefix = if prefix.is_empty() {
            if last { "    ".to_string() } else { "┃   ".to_string() }
        } else {
            format!("{}{}", prefix, if last { "   " } else { "┃  " })
        };
        for (i, child) in node.subtlvs.iter().enumerate() {
            self.print_node(child, &child_prefix, i == node.subtlvs.len() - 1);
        }
    }
}

fn load_tree(data: &[u8], format: FileFormat, opts: &EnrichOptions) -> Result<Vec<EnrichedTlv>> {
    Ok(match format {
        FileFormat::Binary | FileFormat::Mta => {
            let raw = tlv::parse(data, ParseOptions::default()).map_err(crate::suggest)?;
            enrich::enrich(&raw, opts).map_err(crate::suggest)?
        }
        FileFormat::Json => {
            surface::from_json(std::str::from_utf8(data)?).map_err(crate::suggest)?.tlvs
        }
        FileFormat::Yaml => {
            surface::from_yaml(std::str::from_utf8(data)?).map_err(crate::suggest)?.tlvs
        }
        other => bail!(crate::suggest(coax::errors::Error::UnsupportedFormat(
            other.to_string()
        ))),
    })
}
