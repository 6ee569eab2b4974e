//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use netdissect_core::protocol::DEFAULT_MAX_NAME_INDIRECTIONS;
use netdissect_core::SessionConfig;

use super::OutputLevel;

/// Decode hex-encoded Ethernet frames and print them layer by layer.
#[derive(Parser, Debug)]
#[command(name = "netdissect")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File with one hex frame per line (stdin if omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Amount of detail per frame
    #[arg(short = 'l', long = "level", value_enum, default_value = "summary")]
    pub level: OutputLevel,

    /// Render whatever decoded before an error instead of skipping the frame
    #[arg(long = "partial")]
    pub partial: bool,

    /// Stop at the first line that cannot be read or dissected
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Maximum DNS compression pointers followed per name
    #[arg(long = "max-indirections", default_value_t = DEFAULT_MAX_NAME_INDIRECTIONS)]
    pub max_indirections: usize,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Session settings derived from the flags.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            verbosity: self.level.into(),
            max_name_indirections: self.max_indirections,
            partial: self.partial,
        }
    }
}
