//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Running hex frame input through a dissection session

mod args;
mod output;

pub use args::Args;
pub use output::{FramePrinter, OutputLevel, RunStats};
