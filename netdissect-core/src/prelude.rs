//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```rust
//! use netdissect_core::prelude::*;
//!
//! let session = Session::new(SessionConfig::default());
//! assert_eq!(session.config().verbosity, Verbosity::Summary);
//! ```

// Pipeline
pub use crate::protocol::{
    dissect, dissect_partial, ApplicationLayer, Dissector, Frame, NetworkLayer, TransportLayer,
};
pub use crate::session::{Session, SessionConfig};

// Per-layer headers
pub use crate::protocol::{
    ArpPacket, DhcpMessage, DnsMessage, EthernetHeader, IcmpMessage, Icmpv6Message, Ipv4Header,
    Ipv6Header, TcpHeader, UdpHeader,
};

// Rendering
pub use crate::render::{render, Verbosity};

// Errors
pub use crate::error::{DecodeError, Result};
