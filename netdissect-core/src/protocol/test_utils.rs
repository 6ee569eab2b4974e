//! Test utilities for protocol decoding.
//!
//! Builders for constructing test packets. Transport builders compute real
//! checksums against an [`IpPair`] unless told to write a fixed value.

use crate::checksum::{build_transport_pseudo_header, internet_checksum, IpPair};

pub const V4_SRC: [u8; 4] = [192, 168, 1, 1];
pub const V4_DST: [u8; 4] = [192, 168, 1, 2];

pub fn v6_src() -> [u8; 16] {
    let mut addr = [0u8; 16];
    addr[..2].copy_from_slice(&[0xfe, 0x80]);
    addr[15] = 0x01;
    addr
}

pub fn v6_dst() -> [u8; 16] {
    let mut addr = [0u8; 16];
    addr[..2].copy_from_slice(&[0xfe, 0x80]);
    addr[15] = 0x02;
    addr
}

pub fn v4_pair() -> IpPair {
    IpPair::V4 {
        src: V4_SRC,
        dst: V4_DST,
    }
}

pub fn v6_pair() -> IpPair {
    IpPair::V6 {
        src: v6_src(),
        dst: v6_dst(),
    }
}

/// Checksum a transport segment whose checksum field is still zero.
fn transport_checksum(addrs: &IpPair, protocol: u8, segment: &[u8]) -> u16 {
    let mut buf = build_transport_pseudo_header(addrs, protocol, segment.len() as u32).to_vec();
    buf.extend_from_slice(segment);
    internet_checksum(&buf)
}

/// Builder for constructing Ethernet frames.
#[derive(Debug, Clone)]
pub struct EthernetBuilder {
    src_mac: [u8; 6],
    dst_mac: [u8; 6],
    vlan_tci: Option<u16>,
    ethertype: u16,
    payload: Vec<u8>,
}

impl Default for EthernetBuilder {
    fn default() -> Self {
        Self {
            src_mac: [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
            dst_mac: [0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
            vlan_tci: None,
            ethertype: 0x0800,
            payload: Vec::new(),
        }
    }
}

impl EthernetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src_mac(mut self, mac: [u8; 6]) -> Self {
        self.src_mac = mac;
        self
    }

    pub fn dst_mac(mut self, mac: [u8; 6]) -> Self {
        self.dst_mac = mac;
        self
    }

    /// Insert an 802.1Q tag with the given TCI.
    pub fn vlan(mut self, tci: u16) -> Self {
        self.vlan_tci = Some(tci);
        self
    }

    pub fn ethertype(mut self, ethertype: u16) -> Self {
        self.ethertype = ethertype;
        self
    }

    pub fn ipv4(self) -> Self {
        self.ethertype(0x0800)
    }

    pub fn ipv6(self) -> Self {
        self.ethertype(0x86DD)
    }

    pub fn arp(self) -> Self {
        self.ethertype(0x0806)
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(18 + self.payload.len());
        frame.extend_from_slice(&self.dst_mac);
        frame.extend_from_slice(&self.src_mac);
        if let Some(tci) = self.vlan_tci {
            frame.extend_from_slice(&0x8100u16.to_be_bytes());
            frame.extend_from_slice(&tci.to_be_bytes());
        }
        frame.extend_from_slice(&self.ethertype.to_be_bytes());
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// Builder for constructing IPv4 packets with a valid header checksum.
#[derive(Debug, Clone)]
pub struct Ipv4Builder {
    tos: u8,
    identification: u16,
    flags_fragment: u16,
    ttl: u8,
    protocol: u8,
    src_ip: [u8; 4],
    dst_ip: [u8; 4],
    options: Vec<u8>,
    checksum: Option<u16>,
    payload: Vec<u8>,
}

impl Default for Ipv4Builder {
    fn default() -> Self {
        Self {
            tos: 0x00,
            identification: 0x0001,
            flags_fragment: 0x4000, // DF
            ttl: 64,
            protocol: 6,
            src_ip: V4_SRC,
            dst_ip: V4_DST,
            options: Vec::new(),
            checksum: None,
            payload: Vec::new(),
        }
    }
}

impl Ipv4Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tos(mut self, tos: u8) -> Self {
        self.tos = tos;
        self
    }

    pub fn identification(mut self, id: u16) -> Self {
        self.identification = id;
        self
    }

    pub fn flags_fragment(mut self, value: u16) -> Self {
        self.flags_fragment = value;
        self
    }

    pub fn ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn protocol(mut self, protocol: u8) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn tcp(self) -> Self {
        self.protocol(6)
    }

    pub fn udp(self) -> Self {
        self.protocol(17)
    }

    pub fn icmp(self) -> Self {
        self.protocol(1)
    }

    pub fn src_ip(mut self, ip: [u8; 4]) -> Self {
        self.src_ip = ip;
        self
    }

    pub fn dst_ip(mut self, ip: [u8; 4]) -> Self {
        self.dst_ip = ip;
        self
    }

    /// Header options; must be a multiple of 4 bytes.
    pub fn options(mut self, options: Vec<u8>) -> Self {
        self.options = options;
        self
    }

    /// Write a fixed checksum instead of computing it.
    pub fn checksum(mut self, checksum: u16) -> Self {
        self.checksum = Some(checksum);
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let header_len = 20 + self.options.len();
        let total_length = (header_len + self.payload.len()) as u16;
        let mut packet = Vec::with_capacity(header_len + self.payload.len());

        packet.push(0x40 | (header_len / 4) as u8);
        packet.push(self.tos);
        packet.extend_from_slice(&total_length.to_be_bytes());
        packet.extend_from_slice(&self.identification.to_be_bytes());
        packet.extend_from_slice(&self.flags_fragment.to_be_bytes());
        packet.push(self.ttl);
        packet.push(self.protocol);
        packet.extend_from_slice(&[0x00, 0x00]);
        packet.extend_from_slice(&self.src_ip);
        packet.extend_from_slice(&self.dst_ip);
        packet.extend_from_slice(&self.options);

        let checksum = self
            .checksum
            .unwrap_or_else(|| internet_checksum(&packet[..header_len]));
        packet[10..12].copy_from_slice(&checksum.to_be_bytes());

        packet.extend_from_slice(&self.payload);
        packet
    }
}

/// Builder for constructing IPv6 packets.
#[derive(Debug, Clone)]
pub struct Ipv6Builder {
    traffic_class: u8,
    flow_label: u32,
    next_header: u8,
    hop_limit: u8,
    src_ip: [u8; 16],
    dst_ip: [u8; 16],
    payload: Vec<u8>,
}

impl Default for Ipv6Builder {
    fn default() -> Self {
        Self {
            traffic_class: 0,
            flow_label: 0,
            next_header: 17,
            hop_limit: 64,
            src_ip: v6_src(),
            dst_ip: v6_dst(),
            payload: Vec::new(),
        }
    }
}

impl Ipv6Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traffic_class(mut self, tc: u8) -> Self {
        self.traffic_class = tc;
        self
    }

    pub fn flow_label(mut self, label: u32) -> Self {
        self.flow_label = label & 0x000f_ffff;
        self
    }

    pub fn next_header(mut self, nh: u8) -> Self {
        self.next_header = nh;
        self
    }

    pub fn hop_limit(mut self, hop_limit: u8) -> Self {
        self.hop_limit = hop_limit;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let first_word = (6u32 << 28) | ((self.traffic_class as u32) << 20) | self.flow_label;
        let mut packet = Vec::with_capacity(40 + self.payload.len());
        packet.extend_from_slice(&first_word.to_be_bytes());
        packet.extend_from_slice(&(self.payload.len() as u16).to_be_bytes());
        packet.push(self.next_header);
        packet.push(self.hop_limit);
        packet.extend_from_slice(&self.src_ip);
        packet.extend_from_slice(&self.dst_ip);
        packet.extend_from_slice(&self.payload);
        packet
    }
}

/// Builder for constructing TCP segments.
#[derive(Debug, Clone)]
pub struct TcpBuilder {
    src_port: u16,
    dst_port: u16,
    seq: u32,
    ack: u32,
    flags: u8,
    window: u16,
    urgent: u16,
    options: Vec<u8>,
    data_offset: Option<u8>,
    checksum: Option<u16>,
    payload: Vec<u8>,
}

impl Default for TcpBuilder {
    fn default() -> Self {
        Self {
            src_port: 12345,
            dst_port: 80,
            seq: 1,
            ack: 0,
            flags: 0x02, // SYN
            window: 65535,
            urgent: 0,
            options: Vec::new(),
            data_offset: None,
            checksum: None,
            payload: Vec::new(),
        }
    }
}

impl TcpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src_port(mut self, port: u16) -> Self {
        self.src_port = port;
        self
    }

    pub fn dst_port(mut self, port: u16) -> Self {
        self.dst_port = port;
        self
    }

    pub fn seq(mut self, seq: u32) -> Self {
        self.seq = seq;
        self
    }

    pub fn ack_num(mut self, ack: u32) -> Self {
        self.ack = ack;
        self
    }

    pub fn flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    pub fn syn_ack(self) -> Self {
        self.flags(0x12)
    }

    pub fn psh_ack(self) -> Self {
        self.flags(0x18)
    }

    pub fn window(mut self, window: u16) -> Self {
        self.window = window;
        self
    }

    /// Raw option bytes, padded with zeros to a multiple of 4.
    pub fn options(mut self, options: Vec<u8>) -> Self {
        self.options = options;
        self
    }

    /// Force the data offset nibble instead of deriving it from the options.
    pub fn data_offset(mut self, words: u8) -> Self {
        self.data_offset = Some(words);
        self
    }

    pub fn checksum(mut self, checksum: u16) -> Self {
        self.checksum = Some(checksum);
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    /// Build the segment with a checksum computed for `addrs`.
    pub fn build_for(self, addrs: &IpPair) -> Vec<u8> {
        let mut options = self.options.clone();
        while options.len() % 4 != 0 {
            options.push(0);
        }
        let data_offset = self
            .data_offset
            .unwrap_or(5 + (options.len() / 4) as u8);

        let mut segment = Vec::with_capacity(20 + options.len() + self.payload.len());
        segment.extend_from_slice(&self.src_port.to_be_bytes());
        segment.extend_from_slice(&self.dst_port.to_be_bytes());
        segment.extend_from_slice(&self.seq.to_be_bytes());
        segment.extend_from_slice(&self.ack.to_be_bytes());
        segment.push(data_offset << 4);
        segment.push(self.flags);
        segment.extend_from_slice(&self.window.to_be_bytes());
        segment.extend_from_slice(&[0x00, 0x00]);
        segment.extend_from_slice(&self.urgent.to_be_bytes());
        segment.extend_from_slice(&options);
        segment.extend_from_slice(&self.payload);

        let checksum = self
            .checksum
            .unwrap_or_else(|| transport_checksum(addrs, 6, &segment));
        segment[16..18].copy_from_slice(&checksum.to_be_bytes());
        segment
    }
}

/// Builder for constructing UDP datagrams.
#[derive(Debug, Clone)]
pub struct UdpBuilder {
    src_port: u16,
    dst_port: u16,
    checksum: Option<u16>,
    payload: Vec<u8>,
}

impl Default for UdpBuilder {
    fn default() -> Self {
        Self {
            src_port: 12345,
            dst_port: 53,
            checksum: None,
            payload: Vec::new(),
        }
    }
}

impl UdpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src_port(mut self, port: u16) -> Self {
        self.src_port = port;
        self
    }

    pub fn dst_port(mut self, port: u16) -> Self {
        self.dst_port = port;
        self
    }

    pub fn dns(self) -> Self {
        self.dst_port(53)
    }

    pub fn dhcp_request(self) -> Self {
        self.src_port(68).dst_port(67)
    }

    /// Write a fixed checksum (0 means "not computed").
    pub fn checksum(mut self, checksum: u16) -> Self {
        self.checksum = Some(checksum);
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build_for(self, addrs: &IpPair) -> Vec<u8> {
        let length = 8 + self.payload.len() as u16;
        let mut datagram = Vec::with_capacity(8 + self.payload.len());

        datagram.extend_from_slice(&self.src_port.to_be_bytes());
        datagram.extend_from_slice(&self.dst_port.to_be_bytes());
        datagram.extend_from_slice(&length.to_be_bytes());
        datagram.extend_from_slice(&[0x00, 0x00]);
        datagram.extend_from_slice(&self.payload);

        let checksum = self
            .checksum
            .unwrap_or_else(|| transport_checksum(addrs, 17, &datagram));
        datagram[6..8].copy_from_slice(&checksum.to_be_bytes());
        datagram
    }
}

/// Encode a domain name in DNS label format.
pub fn encode_domain_name(name: &str) -> Vec<u8> {
    let mut result = Vec::new();
    for part in name.split('.') {
        if !part.is_empty() {
            result.push(part.len() as u8);
            result.extend_from_slice(part.as_bytes());
        }
    }
    result.push(0);
    result
}

/// Standard query for `name` with the given type, class IN, RD set.
pub fn dns_query(transaction_id: u16, name: &str, qtype: u16) -> Vec<u8> {
    let mut packet = Vec::new();
    packet.extend_from_slice(&transaction_id.to_be_bytes());
    packet.extend_from_slice(&[0x01, 0x00]); // RD
    packet.extend_from_slice(&[0x00, 0x01]); // QDCOUNT
    packet.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    packet.extend_from_slice(&encode_domain_name(name));
    packet.extend_from_slice(&qtype.to_be_bytes());
    packet.extend_from_slice(&[0x00, 0x01]);
    packet
}

/// Builder for DHCP/BOOTP messages.
#[derive(Debug, Clone)]
pub struct DhcpBuilder {
    op: u8,
    xid: u32,
    secs: u16,
    flags: u16,
    ciaddr: [u8; 4],
    yiaddr: [u8; 4],
    siaddr: [u8; 4],
    giaddr: [u8; 4],
    chaddr: [u8; 6],
    sname: Vec<u8>,
    magic: u32,
    options: Vec<u8>,
}

impl Default for DhcpBuilder {
    fn default() -> Self {
        Self {
            op: 1,
            xid: 0x3903f326,
            secs: 0,
            flags: 0,
            ciaddr: [0; 4],
            yiaddr: [0; 4],
            siaddr: [0; 4],
            giaddr: [0; 4],
            chaddr: [0x00, 0x0b, 0x82, 0x01, 0xfc, 0x42],
            sname: Vec::new(),
            magic: 0x63825363,
            options: Vec::new(),
        }
    }
}

impl DhcpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self) -> Self {
        self.op = 2;
        self
    }

    pub fn xid(mut self, xid: u32) -> Self {
        self.xid = xid;
        self
    }

    pub fn secs(mut self, secs: u16) -> Self {
        self.secs = secs;
        self
    }

    pub fn broadcast(mut self) -> Self {
        self.flags |= 0x8000;
        self
    }

    pub fn ciaddr(mut self, ip: [u8; 4]) -> Self {
        self.ciaddr = ip;
        self
    }

    pub fn yiaddr(mut self, ip: [u8; 4]) -> Self {
        self.yiaddr = ip;
        self
    }

    pub fn siaddr(mut self, ip: [u8; 4]) -> Self {
        self.siaddr = ip;
        self
    }

    pub fn giaddr(mut self, ip: [u8; 4]) -> Self {
        self.giaddr = ip;
        self
    }

    pub fn sname(mut self, name: &str) -> Self {
        self.sname = name.as_bytes().to_vec();
        self
    }

    pub fn magic(mut self, magic: u32) -> Self {
        self.magic = magic;
        self
    }

    /// Append one option TLV.
    pub fn option(mut self, code: u8, value: &[u8]) -> Self {
        self.options.push(code);
        self.options.push(value.len() as u8);
        self.options.extend_from_slice(value);
        self
    }

    /// Append raw option bytes without framing.
    pub fn raw_options(mut self, bytes: &[u8]) -> Self {
        self.options.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut packet = Vec::with_capacity(300);
        packet.push(self.op);
        packet.push(1); // htype Ethernet
        packet.push(6); // hlen
        packet.push(0); // hops
        packet.extend_from_slice(&self.xid.to_be_bytes());
        packet.extend_from_slice(&self.secs.to_be_bytes());
        packet.extend_from_slice(&self.flags.to_be_bytes());
        packet.extend_from_slice(&self.ciaddr);
        packet.extend_from_slice(&self.yiaddr);
        packet.extend_from_slice(&self.siaddr);
        packet.extend_from_slice(&self.giaddr);
        let mut chaddr = [0u8; 16];
        chaddr[..6].copy_from_slice(&self.chaddr);
        packet.extend_from_slice(&chaddr);
        let mut sname = [0u8; 64];
        let n = self.sname.len().min(63);
        sname[..n].copy_from_slice(&self.sname[..n]);
        packet.extend_from_slice(&sname);
        packet.extend_from_slice(&[0u8; 128]); // file
        packet.extend_from_slice(&self.magic.to_be_bytes());
        packet.extend_from_slice(&self.options);
        packet
    }
}

/// Ethernet + IPv4 frame around a transport segment.
pub fn ipv4_frame(protocol: u8, segment: Vec<u8>) -> Vec<u8> {
    let ip = Ipv4Builder::new()
        .protocol(protocol)
        .payload(segment)
        .build();
    EthernetBuilder::new().ipv4().payload(ip).build()
}

/// Ethernet + IPv6 frame around a transport segment.
pub fn ipv6_frame(next_header: u8, segment: Vec<u8>) -> Vec<u8> {
    let ip = Ipv6Builder::new()
        .next_header(next_header)
        .payload(segment)
        .build();
    EthernetBuilder::new().ipv6().payload(ip).build()
}
