//! Per-layer decoders and the dissection pipeline.
//!
//! Each layer has its own `decode` entry point. [`dissect`] walks a whole
//! Ethernet frame, choosing the next decoder from the ethertype, the IP
//! protocol / next header and finally the transport ports.
//!
//! ## Dispatch
//!
//! | From | Field | Value | Decoder |
//! |------|-------|-------|---------|
//! | Ethernet | ethertype | 0x0806, 0x8035 | [`ArpPacket`] |
//! | Ethernet | ethertype | 0x0800 | [`Ipv4Header`] |
//! | Ethernet | ethertype | 0x86DD | [`Ipv6Header`] |
//! | IP | protocol | 6 | [`TcpHeader`] |
//! | IP | protocol | 17 | [`UdpHeader`] |
//! | IPv4 | protocol | 1 | [`IcmpMessage`] |
//! | IPv6 | next header | 58 | [`Icmpv6Message`] |
//! | TCP/UDP | port | 53 | [`DnsMessage`] |
//! | UDP | port | 67, 68 | [`DhcpMessage`] |
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use netdissect_core::protocol::{dissect, NetworkLayer};
//!
//! let frame: &[u8] = &[
//!     // Ethernet: broadcast destination, ARP
//!     0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x08, 0x06,
//!     // ARP request 192.168.1.1 -> who has 192.168.1.2
//!     0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x01,
//!     0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 192, 168, 1, 1,
//!     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 192, 168, 1, 2,
//! ];
//!
//! let decoded = dissect(frame, Utc.timestamp_opt(0, 0).unwrap()).unwrap();
//! assert!(matches!(decoded.network, Some(NetworkLayer::Arp(_))));
//! assert!(decoded.transport.is_none());
//! ```

mod cursor;

pub mod arp;
pub mod dhcp;
pub mod dns;
pub mod ethernet;
pub mod icmp;
pub mod icmpv6;
pub mod ipv4;
pub mod ipv6;
pub mod tcp;
pub mod udp;
pub mod vlan;

// Test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;

use chrono::{DateTime, Utc};
use tracing::debug;

pub use arp::ArpPacket;
pub use cursor::Cursor;
pub use dhcp::{DhcpMessage, DhcpOption};
pub use dns::{read_name, DnsMessage, DnsQuestion, ResourceRecord, DEFAULT_MAX_NAME_INDIRECTIONS};
pub use ethernet::EthernetHeader;
pub use icmp::{IcmpBody, IcmpMessage};
pub use icmpv6::{Icmpv6Body, Icmpv6Message};
pub use ipv4::Ipv4Header;
pub use ipv6::Ipv6Header;
pub use tcp::{parse_tcp_options, TcpHeader, TcpOption};
pub use udp::UdpHeader;
pub use vlan::VlanTag;

use crate::checksum::IpPair;
use crate::error::{DecodeError, Result};
use crate::format::describe::{ethertype, ip_proto};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkLayer {
    Arp(ArpPacket),
    Ipv4(Ipv4Header),
    Ipv6(Ipv6Header),
}

impl NetworkLayer {
    /// Addresses for transport checksums; ARP has none.
    pub fn ip_pair(&self) -> Option<IpPair> {
        match self {
            NetworkLayer::Arp(_) => None,
            NetworkLayer::Ipv4(ip) => Some(ip.ip_pair()),
            NetworkLayer::Ipv6(ip) => Some(ip.ip_pair()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportLayer {
    Tcp(TcpHeader),
    Udp(UdpHeader),
    Icmp(IcmpMessage),
    Icmpv6(Icmpv6Message),
}

impl TransportLayer {
    /// Source and destination ports for TCP and UDP.
    pub fn ports(&self) -> Option<(u16, u16)> {
        match self {
            TransportLayer::Tcp(tcp) => Some((tcp.src_port, tcp.dst_port)),
            TransportLayer::Udp(udp) => Some((udp.src_port, udp.dst_port)),
            TransportLayer::Icmp(_) | TransportLayer::Icmpv6(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationLayer {
    Dns(DnsMessage),
    Dhcp(DhcpMessage),
}

/// One dissected frame. Owns every decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Position in the session, starting at 1; 0 outside a session
    pub number: u64,
    pub timestamp: DateTime<Utc>,
    pub captured_len: usize,
    pub link: EthernetHeader,
    pub network: Option<NetworkLayer>,
    pub transport: Option<TransportLayer>,
    pub application: Option<ApplicationLayer>,
    /// Error that stopped a partial decode
    pub error: Option<DecodeError>,
}

impl Frame {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Decoding limits for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dissector {
    /// Pointer hops allowed per DNS name
    pub max_name_indirections: usize,
}

impl Default for Dissector {
    fn default() -> Self {
        Self {
            max_name_indirections: DEFAULT_MAX_NAME_INDIRECTIONS,
        }
    }
}

/// Dissect a frame with default limits and return the first error.
pub fn dissect(data: &[u8], timestamp: DateTime<Utc>) -> Result<Frame> {
    Dissector::default().dissect(data, timestamp)
}

/// Dissect a frame with default limits, keeping the decoded prefix on error.
pub fn dissect_partial(data: &[u8], timestamp: DateTime<Utc>) -> Result<Frame> {
    Dissector::default().dissect_partial(data, timestamp)
}

impl Dissector {
    /// Walk every layer; any decode error is returned.
    pub fn dissect(&self, data: &[u8], timestamp: DateTime<Utc>) -> Result<Frame> {
        let mut frame = self.dissect_partial(data, timestamp)?;
        match frame.error.take() {
            Some(err) => Err(err),
            None => Ok(frame),
        }
    }

    /// Walk every layer; errors above the link layer are stored in
    /// [`Frame::error`] and the layers decoded before them are kept.
    pub fn dissect_partial(&self, data: &[u8], timestamp: DateTime<Utc>) -> Result<Frame> {
        let (link, payload) = EthernetHeader::decode(data)?;
        let mut frame = Frame {
            number: 0,
            timestamp,
            captured_len: data.len(),
            link,
            network: None,
            transport: None,
            application: None,
            error: None,
        };

        if let Err(err) = self.decode_network(&mut frame, payload) {
            debug!(error = %err, "dissection stopped");
            frame.error = Some(err);
        }
        Ok(frame)
    }

    fn decode_network(&self, frame: &mut Frame, payload: &[u8]) -> Result<()> {
        let eth_type = frame.link.payload_type();
        debug!(ethertype = eth_type, "network dispatch");

        let (protocol, segment) = match eth_type {
            ethertype::ARP | ethertype::REVARP => {
                frame.network = Some(NetworkLayer::Arp(ArpPacket::decode(payload)?));
                return Ok(());
            }
            ethertype::IPV4 => {
                let (ip, segment) = Ipv4Header::decode(payload)?;
                let protocol = ip.protocol;
                let later_fragment = ip.fragment_offset() != 0;
                frame.network = Some(NetworkLayer::Ipv4(ip));
                if later_fragment {
                    debug!("non-initial fragment, transport header not present");
                    return Ok(());
                }
                (protocol, segment)
            }
            ethertype::IPV6 => {
                let (ip, segment) = Ipv6Header::decode(payload)?;
                let protocol = ip.next_header;
                frame.network = Some(NetworkLayer::Ipv6(ip));
                (protocol, segment)
            }
            _ => return Ok(()),
        };

        let Some(addrs) = frame.network.as_ref().and_then(NetworkLayer::ip_pair) else {
            return Ok(());
        };
        self.decode_transport(frame, protocol, &addrs, segment)
    }

    fn decode_transport(
        &self,
        frame: &mut Frame,
        protocol: u8,
        addrs: &IpPair,
        segment: &[u8],
    ) -> Result<()> {
        debug!(protocol, "transport dispatch");

        let app_payload = match (protocol, addrs) {
            (ip_proto::TCP, _) => {
                let (tcp, rest) = TcpHeader::decode(segment, addrs)?;
                frame.transport = Some(TransportLayer::Tcp(tcp));
                rest
            }
            (ip_proto::UDP, _) => {
                let (udp, rest) = UdpHeader::decode(segment, addrs)?;
                frame.transport = Some(TransportLayer::Udp(udp));
                rest
            }
            (ip_proto::ICMP, IpPair::V4 { .. }) => {
                frame.transport = Some(TransportLayer::Icmp(IcmpMessage::decode(segment)?));
                return Ok(());
            }
            (ip_proto::ICMPV6, IpPair::V6 { src, dst }) => {
                let icmp = Icmpv6Message::decode(segment, src, dst)?;
                frame.transport = Some(TransportLayer::Icmpv6(icmp));
                return Ok(());
            }
            _ => return Ok(()),
        };

        if app_payload.is_empty() {
            return Ok(());
        }
        self.decode_application(frame, app_payload)
    }

    fn decode_application(&self, frame: &mut Frame, payload: &[u8]) -> Result<()> {
        let Some(transport) = &frame.transport else {
            return Ok(());
        };
        let Some((sport, dport)) = transport.ports() else {
            return Ok(());
        };
        let is_udp = matches!(transport, TransportLayer::Udp(_));
        let either = |port: u16| sport == port || dport == port;

        if either(dns::DNS_PORT) {
            debug!(sport, dport, "application dispatch: DNS");
            let payload = if is_udp {
                payload
            } else {
                strip_tcp_length_prefix(payload)?
            };
            let dns = DnsMessage::decode_with_limit(payload, self.max_name_indirections)?;
            frame.application = Some(ApplicationLayer::Dns(dns));
        } else if is_udp && (either(dhcp::DHCP_SERVER_PORT) || either(dhcp::DHCP_CLIENT_PORT)) {
            debug!(sport, dport, "application dispatch: DHCP");
            frame.application = Some(ApplicationLayer::Dhcp(DhcpMessage::decode(payload)?));
        }
        Ok(())
    }
}

/// DNS over TCP prefixes each message with a 2-byte length. The message is
/// bounded by it when the segment holds that much.
fn strip_tcp_length_prefix(payload: &[u8]) -> Result<&[u8]> {
    let mut cursor = Cursor::new(payload, "DNS");
    let len = cursor.read_u16()? as usize;
    let rest = cursor.rest();
    Ok(&rest[..len.min(rest.len())])
}
