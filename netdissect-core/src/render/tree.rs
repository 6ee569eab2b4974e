//! Hierarchical rendering with `|   ` indentation per layer.

use std::fmt::{self, Write};

use super::{arp_statement, long, mac, SEPARATOR};
use crate::checksum::ChecksumStatus;
use crate::format::{
    dscp_description, ecn_description, ethertype_name, format_hex, format_ipv6,
    ip_protocol_description, printable_text,
};
use crate::protocol::dhcp::{self, message_type_name, option_code};
use crate::protocol::dns::{self, ResourceRecord};
use crate::protocol::{
    arp, icmp, icmpv6, ApplicationLayer, ArpPacket, DhcpMessage, DnsMessage, Frame,
    IcmpBody, IcmpMessage, Icmpv6Body, Icmpv6Message, Ipv4Header, Ipv6Header, NetworkLayer,
    TcpHeader, TransportLayer, UdpHeader,
};

const INDENT: &str = "|   ";

/// Writes indented tree lines to any [`fmt::Write`] sink.
///
/// ```rust
/// use netdissect_core::render::TreeWriter;
///
/// let mut out = String::new();
/// let mut tree = TreeWriter::new(&mut out);
/// tree.banner(1, "IPv4").unwrap();
/// tree.field(2, format_args!("TTL: {}", 64)).unwrap();
/// assert!(out.starts_with("|\n|   IPv4 ---"));
/// assert!(out.ends_with("|   |   TTL: 64\n"));
/// ```
pub struct TreeWriter<W> {
    out: W,
}

impl<W: Write> TreeWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Layer heading padded with dashes to the separator width. Nested
    /// headings are preceded by a connector line.
    pub fn banner(&mut self, depth: usize, title: &str) -> fmt::Result {
        if depth > 0 {
            self.indent(depth - 1)?;
            self.out.write_str("|\n")?;
        }
        self.indent(depth)?;
        let used = depth * INDENT.len() + title.len() + 1;
        let dashes = SEPARATOR.len().saturating_sub(used).max(4);
        writeln!(self.out, "{title} {}", &"-".repeat(dashes))
    }

    pub fn field(&mut self, depth: usize, args: fmt::Arguments<'_>) -> fmt::Result {
        self.indent(depth)?;
        self.out.write_fmt(args)?;
        self.out.write_char('\n')
    }

    fn indent(&mut self, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            self.out.write_str(INDENT)?;
        }
        Ok(())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// `"(correct)"`, `"(correct, offloaded)"` or `"(incorrect, calculated 0x1a2b)"`.
fn checksum_note(status: &ChecksumStatus) -> String {
    if status.is_valid_strict() {
        "(correct)".to_string()
    } else if status.is_valid() {
        "(correct, offloaded)".to_string()
    } else {
        format!("(incorrect, calculated 0x{:04x})", status.computed)
    }
}

pub(super) fn write_frame(f: &mut fmt::Formatter<'_>, frame: &Frame) -> fmt::Result {
    let mut tree = TreeWriter::new(f);
    write_ethernet(&mut tree, frame)?;

    match &frame.network {
        Some(NetworkLayer::Ipv4(ip)) => {
            tree.banner(1, "IPv4")?;
            write_ipv4(&mut tree, 2, ip)?;
        }
        Some(NetworkLayer::Ipv6(ip)) => {
            tree.banner(1, "IPv6")?;
            write_ipv6(&mut tree, 2, ip)?;
        }
        Some(NetworkLayer::Arp(packet)) => write_arp(&mut tree, packet)?,
        None => {}
    }

    match &frame.transport {
        Some(TransportLayer::Tcp(tcp)) => write_tcp(&mut tree, tcp)?,
        Some(TransportLayer::Udp(udp)) => write_udp(&mut tree, udp)?,
        Some(TransportLayer::Icmp(msg)) => write_icmp(&mut tree, msg)?,
        Some(TransportLayer::Icmpv6(msg)) => write_icmpv6(&mut tree, msg)?,
        None => {}
    }

    match &frame.application {
        Some(ApplicationLayer::Dns(msg)) => write_dns(&mut tree, msg)?,
        Some(ApplicationLayer::Dhcp(msg)) => write_dhcp(&mut tree, msg)?,
        None => {}
    }

    if let Some(err) = &frame.error {
        tree.field(0, format_args!("Error: {err}"))?;
    }
    Ok(())
}

fn write_ethernet<W: Write>(tree: &mut TreeWriter<W>, frame: &Frame) -> fmt::Result {
    let link = &frame.link;
    tree.banner(0, "Ethernet")?;
    tree.field(1, format_args!("Source MAC: {}", mac(&link.src)))?;
    tree.field(1, format_args!("Destination MAC: {}", mac(&link.dst)))?;
    tree.field(
        1,
        format_args!(
            "Type: {} (0x{:04x})",
            long(ethertype_name(link.ethertype)),
            link.ethertype
        ),
    )?;
    tree.field(1, format_args!("is vlan_tagged: {}", yes_no(link.vlan.is_some())))?;

    if let Some(tag) = &link.vlan {
        tree.field(2, format_args!("TCI: 0x{:04x}", tag.tci()))?;
        tree.field(2, format_args!("VLAN ID: {}", tag.id))?;
        tree.field(2, format_args!("PCP: {}", tag.priority))?;
        tree.field(2, format_args!("DEI: {}", u8::from(tag.drop_eligible)))?;
        tree.field(
            2,
            format_args!(
                "Type VLAN: {} (0x{:04x})",
                long(ethertype_name(tag.inner_ethertype)),
                tag.inner_ethertype
            ),
        )?;
    }
    Ok(())
}

fn write_ipv4<W: Write>(tree: &mut TreeWriter<W>, depth: usize, ip: &Ipv4Header) -> fmt::Result {
    let flags = ip.flags_text(true);
    tree.field(depth, format_args!("Source IP: {}", ip.src_text()))?;
    tree.field(depth, format_args!("Destination IP: {}", ip.dst_text()))?;
    tree.field(depth, format_args!("Version: {}", ip.version))?;
    tree.field(
        depth,
        format_args!("Header Length: {} ({} bytes)", ip.ihl, ip.header_len()),
    )?;
    tree.field(
        depth,
        format_args!("DSCP: {} ({})", long(dscp_description(ip.dscp)), ip.dscp),
    )?;
    tree.field(
        depth,
        format_args!("ECN: {} ({})", long(ecn_description(ip.ecn)), ip.ecn),
    )?;
    tree.field(depth, format_args!("Total Length: {}", ip.total_length))?;
    tree.field(
        depth,
        format_args!("Identification: {} (0x{:04x})", ip.identification, ip.identification),
    )?;
    tree.field(
        depth,
        format_args!(
            "Flags: {} (0x{:x})",
            if flags.is_empty() { "none" } else { flags.as_str() },
            ip.flags_fragment >> 13
        ),
    )?;
    tree.field(depth, format_args!("Fragment Offset: {}", ip.fragment_offset()))?;
    tree.field(depth, format_args!("TTL: {}", ip.ttl))?;
    tree.field(
        depth,
        format_args!(
            "Protocol: {} ({})",
            ip.protocol,
            long(ip_protocol_description(ip.protocol))
        ),
    )?;
    tree.field(depth, format_args!("Checksum: 0x{:04x}", ip.checksum.wire))?;
    tree.field(
        depth,
        format_args!("is Checksum correct: {}", yes_no(ip.checksum.is_valid())),
    )?;
    if !ip.options.is_empty() {
        tree.field(depth, format_args!("Options: {}", format_hex(&ip.options)))?;
    }
    tree.field(depth, format_args!("Source IP (raw): {}", format_hex(&ip.src)))?;
    tree.field(depth, format_args!("Destination IP (raw): {}", format_hex(&ip.dst)))
}

fn write_ipv6<W: Write>(tree: &mut TreeWriter<W>, depth: usize, ip: &Ipv6Header) -> fmt::Result {
    tree.field(depth, format_args!("Source IP: {}", ip.src_text()))?;
    tree.field(depth, format_args!("Destination IP: {}", ip.dst_text()))?;
    tree.field(depth, format_args!("Version: {}", ip.version))?;
    tree.field(
        depth,
        format_args!(
            "Traffic Class: 0x{:02x} (DSCP: {}, ECN: {})",
            ip.traffic_class,
            long(dscp_description(ip.dscp)),
            long(ecn_description(ip.ecn))
        ),
    )?;
    tree.field(depth, format_args!("Flow Label: 0x{:05x}", ip.flow_label))?;
    tree.field(depth, format_args!("Payload Length: {}", ip.payload_length))?;
    tree.field(
        depth,
        format_args!(
            "Next Header: {} ({})",
            ip.next_header,
            long(ip_protocol_description(ip.next_header))
        ),
    )?;
    tree.field(depth, format_args!("Hop Limit: {}", ip.hop_limit))?;
    tree.field(depth, format_args!("Source IP (raw): {}", format_hex(&ip.src)))?;
    tree.field(depth, format_args!("Destination IP (raw): {}", format_hex(&ip.dst)))
}

fn write_arp<W: Write>(tree: &mut TreeWriter<W>, packet: &ArpPacket) -> fmt::Result {
    let text = |r: crate::error::Result<compact_str::CompactString>| {
        r.unwrap_or_else(|_| "?".into())
    };

    tree.banner(1, "ARP")?;
    tree.field(
        2,
        format_args!(
            "Operation: {} ({})",
            long(arp::operation_description(packet.operation)),
            packet.operation
        ),
    )?;
    tree.field(
        2,
        format_args!(
            "Hardware Type: {} ({})",
            long(arp::hardware_type_name(packet.hardware_type)),
            packet.hardware_type
        ),
    )?;
    tree.field(
        2,
        format_args!(
            "Protocol Type: {} (0x{:04x})",
            long(ethertype_name(packet.protocol_type)),
            packet.protocol_type
        ),
    )?;
    tree.field(2, format_args!("Hardware Address Length: {}", packet.hardware_len))?;
    tree.field(2, format_args!("Protocol Length: {}", packet.protocol_len))?;
    tree.field(
        2,
        format_args!("Sender Hardware Address: {}", text(packet.sender_hardware_text())),
    )?;
    tree.field(
        2,
        format_args!("Sender Protocol Address: {}", text(packet.sender_protocol_text())),
    )?;
    tree.field(
        2,
        format_args!("Target Hardware Address: {}", text(packet.target_hardware_text())),
    )?;
    tree.field(
        2,
        format_args!("Target Protocol Address: {}", text(packet.target_protocol_text())),
    )?;
    tree.field(2, format_args!("{}", arp_statement(packet)))
}

fn write_tcp<W: Write>(tree: &mut TreeWriter<W>, tcp: &TcpHeader) -> fmt::Result {
    tree.banner(2, "TCP")?;
    tree.field(3, format_args!("Source Port: {} (0x{:x})", tcp.src_port, tcp.src_port))?;
    tree.field(
        3,
        format_args!("Destination Port: {} (0x{:x})", tcp.dst_port, tcp.dst_port),
    )?;
    tree.field(3, format_args!("Sequence Number: {}", tcp.sequence))?;
    tree.field(3, format_args!("Acknowledgment Number: {}", tcp.acknowledgment))?;
    tree.field(
        3,
        format_args!("Data Offset: {} ({} bytes)", tcp.data_offset, tcp.header_len()),
    )?;
    tree.field(3, format_args!("Flags: {}", tcp.flags_description(true)))?;
    tree.field(3, format_args!("Window: {}", tcp.window))?;
    tree.field(
        3,
        format_args!(
            "Checksum: 0x{:04x} {}",
            tcp.checksum.wire,
            checksum_note(&tcp.checksum)
        ),
    )?;
    tree.field(3, format_args!("Urgent Pointer: {}", tcp.urgent_pointer))?;
    if tcp.options_len() == 0 {
        tree.field(3, format_args!("Options: none"))?;
    } else {
        tree.field(3, format_args!("Options: {}", tcp.options_text(true)))?;
    }
    if let Some(err) = &tcp.options_error {
        tree.field(3, format_args!("Options error: {err}"))?;
    }
    Ok(())
}

fn write_udp<W: Write>(tree: &mut TreeWriter<W>, udp: &UdpHeader) -> fmt::Result {
    tree.banner(2, "UDP")?;
    tree.field(3, format_args!("Source Port: {} (0x{:x})", udp.src_port, udp.src_port))?;
    tree.field(
        3,
        format_args!("Destination Port: {} (0x{:x})", udp.dst_port, udp.dst_port),
    )?;
    tree.field(3, format_args!("Length: {}", udp.length))?;
    if udp.checksum_present() {
        tree.field(
            3,
            format_args!(
                "Checksum: 0x{:04x} {}",
                udp.checksum.wire,
                checksum_note(&udp.checksum)
            ),
        )
    } else {
        tree.field(3, format_args!("Checksum: 0x0000 (not computed)"))
    }
}

fn write_icmp<W: Write>(tree: &mut TreeWriter<W>, msg: &IcmpMessage) -> fmt::Result {
    tree.banner(2, "ICMP")?;
    tree.field(
        3,
        format_args!("Type: {} ({})", long(icmp::type_name(msg.icmp_type)), msg.icmp_type),
    )?;
    tree.field(
        3,
        format_args!("Code: {} ({})", msg.code_text(true).unwrap_or("-"), msg.code),
    )?;
    tree.field(
        3,
        format_args!(
            "Checksum: 0x{:04x} {}",
            msg.checksum.wire,
            checksum_note(&msg.checksum)
        ),
    )?;

    match &msg.body {
        IcmpBody::Echo {
            identifier,
            sequence,
            payload,
        } => write_echo(tree, *identifier, *sequence, payload),
        IcmpBody::DestinationUnreachable {
            original,
            original_transport,
            ..
        } => {
            if let Some(mtu) = msg.next_hop_mtu() {
                tree.field(3, format_args!("Next-hop MTU: {mtu}"))?;
            }
            tree.field(3, format_args!("Original IP Header:"))?;
            write_ipv4(tree, 4, original)?;
            tree.field(
                3,
                format_args!("Original Transport Header: {}", format_hex(original_transport)),
            )
        }
        IcmpBody::Other {
            rest_of_header,
            data,
        } => {
            tree.field(3, format_args!("Rest of Header: 0x{rest_of_header:08x}"))?;
            tree.field(3, format_args!("Data: {}", format_hex(data)))
        }
    }
}

fn write_icmpv6<W: Write>(tree: &mut TreeWriter<W>, msg: &Icmpv6Message) -> fmt::Result {
    tree.banner(2, "ICMPv6")?;
    tree.field(
        3,
        format_args!(
            "Type: {} ({})",
            long(icmpv6::type_description(msg.icmp_type)),
            msg.icmp_type
        ),
    )?;
    tree.field(
        3,
        format_args!("Code: {} ({})", msg.code_text(true).unwrap_or("-"), msg.code),
    )?;
    tree.field(
        3,
        format_args!(
            "Checksum: 0x{:04x} {}",
            msg.checksum.wire,
            checksum_note(&msg.checksum)
        ),
    )?;

    match &msg.body {
        Icmpv6Body::Echo {
            identifier,
            sequence,
            payload,
        } => write_echo(tree, *identifier, *sequence, payload),
        Icmpv6Body::NeighborSolicitation { target, options } => {
            tree.field(3, format_args!("Target address: {}", format_ipv6(*target)))?;
            if !options.is_empty() {
                tree.field(3, format_args!("Options: {}", format_hex(options)))?;
            }
            Ok(())
        }
        Icmpv6Body::DestinationUnreachable {
            original,
            original_transport,
        } => {
            tree.field(3, format_args!("Original IPv6 Header:"))?;
            write_ipv6(tree, 4, original)?;
            tree.field(
                3,
                format_args!("Original Transport Header: {}", format_hex(original_transport)),
            )
        }
        Icmpv6Body::Other {
            rest_of_header,
            data,
        } => {
            tree.field(3, format_args!("Rest of Header: 0x{rest_of_header:08x}"))?;
            tree.field(3, format_args!("Data: {}", format_hex(data)))
        }
    }
}

fn write_echo<W: Write>(
    tree: &mut TreeWriter<W>,
    identifier: u16,
    sequence: u16,
    payload: &[u8],
) -> fmt::Result {
    tree.field(3, format_args!("Identifier: {identifier} (0x{identifier:04x})"))?;
    tree.field(3, format_args!("Sequence Number: {sequence}"))?;
    tree.field(3, format_args!("Data: {}", printable_text(payload)))
}

/// `"A (1) host address"`, or `"Unknown (n)"`.
fn record_type_label(rtype: u16) -> String {
    match (dns::type_name(rtype), dns::type_description(rtype)) {
        (Some(name), Some(desc)) => format!("{name} ({rtype}) {desc}"),
        (Some(name), None) => format!("{name} ({rtype})"),
        _ => format!("Unknown ({rtype})"),
    }
}

fn class_label(class: u16) -> String {
    match (dns::class_name(class), dns::class_description(class)) {
        (Some(name), Some(desc)) => format!("{name} ({class}) {desc}"),
        (Some(name), None) => format!("{name} ({class})"),
        _ => format!("Unknown ({class})"),
    }
}

fn write_dns<W: Write>(tree: &mut TreeWriter<W>, msg: &DnsMessage) -> fmt::Result {
    tree.banner(3, "DNS")?;
    tree.field(4, format_args!("Transaction-ID: {} (0x{:04x})", msg.id, msg.id))?;
    tree.field(
        4,
        format_args!(
            "QR: {} ({})",
            if msg.is_response { "Response" } else { "Query" },
            u8::from(msg.is_response)
        ),
    )?;
    tree.field(
        4,
        format_args!(
            "Opcode: {} ({})",
            long(dns::opcode_description(msg.opcode)),
            msg.opcode
        ),
    )?;

    let flags = [
        (msg.authoritative, "Authoritative"),
        (msg.truncated, "Truncated"),
        (msg.recursion_desired, "Recursion desired"),
        (msg.recursion_available, "Recursion available"),
    ];
    for (_, label) in flags.iter().filter(|(set, _)| *set) {
        tree.field(4, format_args!("{label}: yes"))?;
    }

    tree.field(
        4,
        format_args!(
            "Error code: {} ({})",
            long(dns::rcode_description(msg.rcode)),
            msg.rcode
        ),
    )?;
    tree.field(4, format_args!("Questions: {}", msg.qdcount))?;
    tree.field(4, format_args!("Answers: {}", msg.ancount))?;
    tree.field(4, format_args!("Authority: {}", msg.nscount))?;
    tree.field(4, format_args!("Additional: {}", msg.arcount))?;

    for (i, question) in msg.questions.iter().enumerate() {
        tree.field(4, format_args!("Question ({}):", i + 1))?;
        tree.field(5, format_args!("Name: {}", question.name))?;
        tree.field(5, format_args!("Type: {}", record_type_label(question.qtype)))?;
        tree.field(5, format_args!("Class: {}", class_label(question.qclass)))?;
    }

    let sections: [(&str, &[ResourceRecord]); 3] = [
        ("Answer", msg.answers.as_slice()),
        ("Authority", msg.authorities.as_slice()),
        ("Additional", msg.additionals.as_slice()),
    ];
    for (title, records) in sections {
        for (i, record) in records.iter().enumerate() {
            tree.field(4, format_args!("{title} ({}):", i + 1))?;
            tree.field(5, format_args!("Name: {}", record.name))?;
            tree.field(5, format_args!("Type: {}", record_type_label(record.rtype)))?;
            tree.field(5, format_args!("Class: {}", class_label(record.class)))?;
            tree.field(5, format_args!("TTL: {}", record.ttl))?;
            tree.field(5, format_args!("Data length: {}", record.rdata.len()))?;
            tree.field(5, format_args!("Data: {}", record.rendered_rdata))?;
        }
    }
    Ok(())
}

fn write_dhcp<W: Write>(tree: &mut TreeWriter<W>, msg: &DhcpMessage) -> fmt::Result {
    let or_not_given = |s: &str| if s.is_empty() { "not given".to_string() } else { s.to_string() };

    tree.banner(3, "BOOTP/DHCP")?;
    tree.field(
        4,
        format_args!("Operation: {} ({})", long(dhcp::op_name(msg.op)), msg.op),
    )?;
    tree.field(
        4,
        format_args!(
            "Hardware type: {} ({})",
            long(arp::hardware_type_name(msg.htype as u16)),
            msg.htype
        ),
    )?;
    tree.field(4, format_args!("Hardware address length: {}", msg.hlen))?;
    tree.field(4, format_args!("Hops: {}", msg.hops))?;
    tree.field(4, format_args!("Transaction-ID: 0x{:08x}", msg.xid))?;
    tree.field(4, format_args!("Seconds elapsed: {}", msg.secs))?;
    tree.field(
        4,
        format_args!(
            "Broadcast flag: {}",
            if msg.is_broadcast() { "set" } else { "not set" }
        ),
    )?;
    if let Some(ip) = msg.ciaddr {
        tree.field(4, format_args!("Client IP: {ip}"))?;
    }
    tree.field(4, format_args!("Your IP: {}", msg.yiaddr))?;
    if let Some(ip) = msg.siaddr {
        tree.field(4, format_args!("Server IP: {ip}"))?;
    }
    if let Some(ip) = msg.giaddr {
        tree.field(4, format_args!("Gateway IP: {ip}"))?;
    }
    tree.field(
        4,
        format_args!("Client hardware address: {}", msg.client_hardware_text()),
    )?;
    tree.field(4, format_args!("Server host name: {}", or_not_given(&msg.sname)))?;
    tree.field(4, format_args!("Boot file name: {}", or_not_given(&msg.file)))?;
    tree.field(
        4,
        format_args!(
            "Magic cookie: 0x{:08x} ({})",
            msg.magic_cookie,
            if msg.has_magic_cookie() { "DHCP" } else { "BOOTP" }
        ),
    )?;

    for option in &msg.options {
        tree.field(
            4,
            format_args!(
                "Option: {} ({})",
                option.code,
                long(dhcp::option_name(option.code))
            ),
        )?;
        tree.field(5, format_args!("Length: {}", option.length))?;
        match (option.code, option.raw.first()) {
            (option_code::MESSAGE_TYPE, Some(&kind)) => tree.field(
                5,
                format_args!("Message type: {} ({kind})", long(message_type_name(kind))),
            )?,
            _ => tree.field(5, format_args!("Value: {}", option.rendered))?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::dissect;
    use crate::protocol::test_utils::{
        dns_query, ipv4_frame, v4_pair, DhcpBuilder, EthernetBuilder, Ipv4Builder, TcpBuilder,
        UdpBuilder, V4_DST, V4_SRC,
    };
    use crate::render::{render, Verbosity};
    use chrono::{TimeZone, Utc};

    fn full(data: &[u8]) -> String {
        let frame = dissect(data, Utc.timestamp_opt(0, 0).unwrap()).unwrap();
        render(&frame, Verbosity::Full)
    }

    #[test]
    fn test_banner_width_matches_separator() {
        let mut out = String::new();
        TreeWriter::new(&mut out).banner(0, "Ethernet").unwrap();
        assert_eq!(out.trim_end().len(), SEPARATOR.len());
        assert!(out.starts_with("Ethernet ----"));
    }

    #[test]
    fn test_nested_banner_has_connector() {
        let mut out = String::new();
        TreeWriter::new(&mut out).banner(2, "TCP").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "|   |");
        assert!(lines[1].starts_with("|   |   TCP ---"));
    }

    #[test]
    fn test_tcp_tree() {
        let segment = TcpBuilder::new()
            .src_port(443)
            .dst_port(50000)
            .syn_ack()
            .options(vec![0x02, 0x04, 0x05, 0xb4, 0x01, 0x00])
            .build_for(&v4_pair());
        let out = full(&ipv4_frame(6, segment));

        assert!(out.contains("\n|   Type: IP (0x0800)\n"));
        assert!(out.contains("\n|   is vlan_tagged: no\n"));
        assert!(out.contains("\n|   |   Protocol: 6 (TCP (Transmission Control Protocol))\n"));
        assert!(out.contains("\n|   |   is Checksum correct: yes\n"));
        assert!(out.contains("\n|   |   |   Source Port: 443 (0x1bb)\n"));
        assert!(out.contains("\n|   |   |   Flags: SYN ACK (0x12)\n"));
        assert!(out.contains("\n|   |   |   Data Offset: 7 (28 bytes)\n"));
        assert!(out.contains(
            "\n|   |   |   Options: Maximum Segment Size (1460) No-Operation End of option list\n"
        ));
        assert!(out.contains("(correct)\n"));
    }

    #[test]
    fn test_vlan_fields() {
        let ip = Ipv4Builder::new().udp().payload(vec![0; 8]).build();
        let tci = (3 << 13) | 42;
        let out = full(&EthernetBuilder::new().vlan(tci).ipv4().payload(ip).build());

        assert!(out.contains("|   Type: VLAN (0x8100)\n"));
        assert!(out.contains("|   is vlan_tagged: yes\n"));
        assert!(out.contains("|   |   TCI: 0x602a\n"));
        assert!(out.contains("|   |   VLAN ID: 42\n"));
        assert!(out.contains("|   |   PCP: 3\n"));
        assert!(out.contains("|   |   Type VLAN: IP (0x0800)\n"));
    }

    #[test]
    fn test_dns_question_block() {
        let udp = UdpBuilder::new()
            .dns()
            .payload(dns_query(0x00ff, "example.com", 1))
            .build_for(&v4_pair());
        let out = full(&ipv4_frame(17, udp));

        assert!(out.contains("|   |   |   |   Transaction-ID: 255 (0x00ff)\n"));
        assert!(out.contains("|   |   |   |   Opcode: Standard query (0)\n"));
        assert!(out.contains("|   |   |   |   Question (1):\n"));
        assert!(out.contains("|   |   |   |   |   Name: example.com\n"));
        assert!(out.contains("|   |   |   |   |   Type: A (1) host address\n"));
        assert!(out.contains("|   |   |   |   |   Class: IN (1) the Internet\n"));
    }

    #[test]
    fn test_icmp_unreachable_subtree() {
        let original = Ipv4Builder::new()
            .udp()
            .src_ip(V4_DST)
            .dst_ip(V4_SRC)
            .payload(vec![0x30, 0x39, 0x00, 0x35, 0x00, 0x08, 0x00, 0x00])
            .build();
        let mut msg = vec![0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        msg.extend_from_slice(&original);
        let sum = crate::checksum::internet_checksum(&msg);
        msg[2..4].copy_from_slice(&sum.to_be_bytes());

        let out = full(&ipv4_frame(1, msg));
        assert!(out.contains("|   |   |   Type: Destination Unreachable (3)\n"));
        assert!(out.contains("|   |   |   Code: Port Unreachable (3)\n"));
        assert!(out.contains("|   |   |   Original IP Header:\n"));
        assert!(out.contains("|   |   |   |   Source IP: 192.168.1.2\n"));
        assert!(out.contains("|   |   |   Original Transport Header: 30 39 00 35 00 08 00 00\n"));
    }

    #[test]
    fn test_dhcp_options_block() {
        let dhcp = DhcpBuilder::new()
            .broadcast()
            .option(53, &[1])
            .option(12, b"host")
            .raw_options(&[0xff])
            .build();
        let udp = UdpBuilder::new().dhcp_request().payload(dhcp).build_for(&v4_pair());
        let out = full(&ipv4_frame(17, udp));

        assert!(out.contains("|   |   |   |   Operation: BOOTREQUEST (1)\n"));
        assert!(out.contains("|   |   |   |   Broadcast flag: set\n"));
        assert!(out.contains("|   |   |   |   Client IP: 0.0.0.0\n"));
        assert!(!out.contains("Server IP:"));
        assert!(out.contains("|   |   |   |   Server host name: not given\n"));
        assert!(out.contains("|   |   |   |   Option: 53 (DHCP Message Type)\n"));
        assert!(out.contains("|   |   |   |   |   Message type: Discover (1)\n"));
        assert!(out.contains("|   |   |   |   |   Value: host\n"));
    }

    #[test]
    fn test_checksum_note_forms() {
        let ok = ChecksumStatus { wire: 0x1234, computed: 0x1234 };
        let offload = ChecksumStatus { wire: 0x1234, computed: 0xffff };
        let bad = ChecksumStatus { wire: 0x1234, computed: 0x4321 };
        assert_eq!(checksum_note(&ok), "(correct)");
        assert_eq!(checksum_note(&offload), "(correct, offloaded)");
        assert_eq!(checksum_note(&bad), "(incorrect, calculated 0x4321)");
    }
}
