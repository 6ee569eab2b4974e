//! # netdissect
//!
//! Command-line driver for [`netdissect_core`]. Frames are read as hex text,
//! one per line, dissected and printed at the requested level of detail.
//!
//! ```text
//! $ echo 'ffffffffffff001122334455080600010800060400010011223344550a0000010000000000000a000002' \
//!     | netdissect --level minimal
//! ------------------------------------------------------------------
//! 00:00:00 00:11:22:33:44:55 > ff:ff:ff:ff:ff:ff ARP Request Who has 10.0.0.2 ? Tell 10.0.0.1
//! ```

pub mod cli;
pub mod error;
pub mod input;

pub use error::{Error, Result};
pub use input::{parse_line, InputFrame};
