//! # netdissect-core
//!
//! Layer-by-layer protocol dissection of captured Ethernet frames.
//!
//! Given the bytes of one frame and its capture timestamp, the engine decodes
//! the link, network, transport and application headers into owned, typed
//! values, verifies every embedded checksum and renders the result as text at
//! one of three verbosity levels.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use netdissect_core::{Session, SessionConfig, Verbosity};
//!
//! let frame: &[u8] = &[
//!     0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x08, 0x06,
//!     0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x01,
//!     0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 10, 0, 0, 1,
//!     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 10, 0, 0, 2,
//! ];
//!
//! let mut session = Session::new(SessionConfig {
//!     verbosity: Verbosity::Minimal,
//!     ..SessionConfig::default()
//! });
//! let text = session.process(frame, Utc.timestamp_opt(0, 0).unwrap()).unwrap();
//! assert!(text.contains("Who has 10.0.0.2 ? Tell 10.0.0.1"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        netdissect-core                              |
//! +---------------------------------------------------------------------+
//! |  session/    - Session, SessionConfig, packet counter               |
//! |  render/     - minimal / summary / full text output                 |
//! |  protocol/   - per-layer decoders, Frame, dissect pipeline          |
//! |  checksum/   - RFC 1071 checksum, pseudo-headers, ChecksumStatus    |
//! |  format/     - address text and numeric-to-name lookups             |
//! |  error/      - DecodeError                                          |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Supported Protocols
//!
//! | Layer | Protocols |
//! |-------|-----------|
//! | Link | Ethernet, VLAN (802.1Q) |
//! | Network | IPv4, IPv6, ARP |
//! | Transport | TCP, UDP, ICMP, ICMPv6 |
//! | Application | DNS, DHCP/BOOTP |

pub mod checksum;
pub mod error;
pub mod format;
pub mod prelude;
pub mod protocol;
pub mod render;
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use checksum::{build_transport_pseudo_header, internet_checksum, ChecksumStatus, IpPair};
pub use error::{DecodeError, Result};
pub use format::{format_ipv4, format_ipv6, format_mac};
pub use protocol::{
    dissect, dissect_partial, ApplicationLayer, Dissector, Frame, NetworkLayer, TransportLayer,
};
pub use render::{render, FrameDisplay, Verbosity};
pub use session::{Session, SessionConfig};
