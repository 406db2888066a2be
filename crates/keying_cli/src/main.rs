//! Keying CLI
//!
//! Command-line tools for trying out key strategies.
//!
//! # Commands
//!
//! - `validate` - Compile a strategy and list its segments
//! - `compute` - Preview the key a record would receive
//! - `key` - Stamp a fresh record and print its key
//! - `version` - Show version information

mod commands;
mod input;

use clap::{Parser, Subcommand};
use input::{RecordArgs, TypeArgs};
use tracing_subscriber::EnvFilter;

/// Keying command-line tools.
#[derive(Parser)]
#[command(name = "keying")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a strategy and list its segments
    Validate {
        #[command(flatten)]
        ty: TypeArgs,
    },

    /// Preview the key a record would receive, without UUID segments
    Compute {
        #[command(flatten)]
        ty: TypeArgs,

        #[command(flatten)]
        record: RecordArgs,
    },

    /// Stamp a fresh record and print its key
    Key {
        #[command(flatten)]
        ty: TypeArgs,

        #[command(flatten)]
        record: RecordArgs,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate { ty } => {
            println!("{}", commands::validate::run(&ty)?);
        }
        Commands::Compute { ty, record } => {
            println!("{}", commands::compute::run(&ty, &record)?);
        }
        Commands::Key { ty, record } => {
            println!("{}", commands::key::run(&ty, &record)?);
        }
        Commands::Version => {
            println!("Keying CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Keying Core v{}", keying_core::VERSION);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_type_args_match_default() {
        let cli = Cli::try_parse_from(["keying", "validate", "--strategy", "UUID"]).unwrap();
        let Commands::Validate { ty } = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(ty.name, TypeArgs::default().name);
        assert_eq!(ty.strategy.as_deref(), Some("UUID"));
    }
}
