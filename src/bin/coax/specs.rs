use anyhow::Result;
use coax::specs::{lookup_in, MaxLength, Version};
use owo_colors::OwoColorize;
use pad::{Alignment, PadStr};

#[derive(clap::Args, Debug)]
pub struct Specs {
    /// DOCSIS version to list.
    #[arg(long, default_value = "3.1")]
    docsis: String,

    /// Include the PacketCable MTA table.
    #[arg(long)]
    mta: bool,
}

impl Specs {
    pub fn run(&self) -> Result<()> {
        let version: Version = self.docsis.parse().map_err(crate::suggest)?;
        println!(
            "{} {} {} {} {}",
            "TLV".pad_to_width_with_alignment(3, Alignment::Right),
            "Name".pad_to_width(44),
            "Type".pad_to_width(16),
            "Max".pad_to_width(5),
            "Since",
        );
        for typ in 0..=255u8 {
            let entry = lookup_in(&[], typ, version, self.mta);
            if !entry.is_known() {
                continue;
            }
            let max = match entry.max_length {
                MaxLength::Unbounded => "-".to_string(),
                MaxLength::Bytes(n) => n.to_string(),
            };
            println!(
                "{} {} {} {} {}",
                typ.to_string()
                    .pad_to_width_with_alignment(3, Alignment::Right)
                    .cyan(),
                entry.name.pad_to_width(44),
                entry.value_type.name().pad_to_width(16).green(),
                max.pad_to_width(5),
                entry.introduced,
            );
        }
        Ok(())
    }
}
