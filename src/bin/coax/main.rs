mod convert;
mod dump;
mod specs;

use anyhow::Result;
use clap::Parser as _;
use tracing::trace;

#[derive(clap::Parser, Debug)]
#[command(name = "coax", about = "Read, edit and write DOCSIS configuration files")]
struct Args {
    /// Increase log level.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease log level.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    quiet: u8,

    /// Command.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Pretty-print a configuration file.
    Dump(dump::Dump),

    /// Convert between binary, JSON and YAML.
    Convert(convert::Convert),

    /// List the TLVs the registry knows about.
    Specs(specs::Specs),
}

impl Command {
    fn run(&self) -> Result<()> {
        match self {
            Self::Dump(cmd) => cmd.run(),
            Self::Convert(cmd) => cmd.run(),
            Self::Specs(cmd) => cmd.run(),
        }
    }
}

/// Bubbles a library error up with its boundary type tag and user-facing
/// hint attached.
pub(crate) fn suggest(err: coax::errors::Error) -> anyhow::Error {
    let typ = err.error_type();
    match err.suggestion() {
        Some(hint) => anyhow::anyhow!("{}: {}\n{}", typ, err, hint),
        None => anyhow::anyhow!("{}: {}", typ, err),
    }
}

fn init_logging(args: &Args) {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_max_level(
            match (2 + args.verbose as i16 - args.quiet as i16).clamp(0, 4) {
                0 => tracing::Level::ERROR,
                1 => tracing::Level::WARN,
                2 => tracing::Level::INFO,
                3 => tracing::Level::DEBUG,
                _ => tracing::Level::TRACE,
            },
        )
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);
    trace!(?args, "Starting up");
    args.command.run()
}
