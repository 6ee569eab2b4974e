//! One line per decoded layer.

use std::fmt;

use super::{arp_statement, checksum_verdict, link_type, mac, short};
use crate::format::describe::ip_proto;
use crate::format::{format_ipv6, ip_protocol_name};
use crate::protocol::dhcp::{message_type_name, op, op_name};
use crate::protocol::dns::{opcode_name, rcode_name};
use crate::protocol::{
    arp, icmp, icmpv6, ApplicationLayer, DhcpMessage, DnsMessage, Frame, NetworkLayer,
    TransportLayer,
};

pub(super) fn write_frame(f: &mut fmt::Formatter<'_>, frame: &Frame) -> fmt::Result {
    let link = &frame.link;
    write!(
        f,
        "Ethernet: src: {} > dst: {} {}",
        mac(&link.src),
        mac(&link.dst),
        link_type(frame)
    )?;
    if let Some(tag) = &link.vlan {
        write!(f, " | VLAN: {} (PCP {})", tag.id, tag.priority)?;
    }
    writeln!(f)?;

    match &frame.network {
        Some(NetworkLayer::Ipv4(ip)) => writeln!(
            f,
            "IPv4: {} > {} | Checksum: {:x} {} | TTL: {} | ID: {}",
            ip.src_text(),
            ip.dst_text(),
            ip.checksum.wire,
            checksum_verdict(ip.checksum.is_valid(), ip.checksum.computed),
            ip.ttl,
            ip.identification
        )?,
        Some(NetworkLayer::Ipv6(ip)) => writeln!(
            f,
            "IPv6: {} > {} | Hop Limit: {} | Flow Label: {} | Payload Length: {}",
            ip.src_text(),
            ip.dst_text(),
            ip.hop_limit,
            ip.flow_label,
            ip.payload_length
        )?,
        Some(NetworkLayer::Arp(packet)) => writeln!(
            f,
            "ARP: {} | {}",
            short(arp::operation_name(packet.operation)),
            arp_statement(packet)
        )?,
        None => {}
    }

    match &frame.transport {
        Some(TransportLayer::Tcp(tcp)) => writeln!(
            f,
            "TCP {} > {} | {} | Window: {} | Checksum: {:x} {}",
            tcp.src_port,
            tcp.dst_port,
            tcp.flags_description(false),
            tcp.window,
            tcp.checksum.wire,
            checksum_verdict(tcp.checksum.is_valid(), tcp.checksum.computed)
        )?,
        Some(TransportLayer::Udp(udp)) => {
            write!(
                f,
                "UDP {} > {} | Length: {} | Checksum: {:x} ",
                udp.src_port, udp.dst_port, udp.length, udp.checksum.wire
            )?;
            if udp.checksum_present() {
                writeln!(
                    f,
                    "{}",
                    checksum_verdict(udp.is_checksum_valid(), udp.checksum.computed)
                )?;
            } else {
                writeln!(f, "(none)")?;
            }
        }
        Some(TransportLayer::Icmp(msg)) => {
            write!(
                f,
                "{} Type: {} | Code: {} | ",
                short(ip_protocol_name(ip_proto::ICMP)),
                short(icmp::type_name(msg.icmp_type)),
                msg.code_text(false).map_or_else(|| msg.code.to_string(), str::to_string)
            )?;
            if let Some((identifier, _)) = msg.echo() {
                write!(f, "Identifier: {identifier} | ")?;
            }
            writeln!(
                f,
                "Checksum: {:x} {}",
                msg.checksum.wire,
                checksum_verdict(msg.checksum.is_valid(), msg.checksum.computed)
            )?;
        }
        Some(TransportLayer::Icmpv6(msg)) => {
            write!(
                f,
                "{} Type: {} | Code: {} | ",
                short(ip_protocol_name(ip_proto::ICMPV6)),
                short(icmpv6::type_name(msg.icmp_type)),
                msg.code_text(false).map_or_else(|| msg.code.to_string(), str::to_string)
            )?;
            if let Some((identifier, _)) = msg.echo() {
                write!(f, "Identifier: {identifier} | ")?;
            }
            if let Some(target) = msg.target() {
                write!(f, "Target address: {} | ", format_ipv6(*target))?;
            }
            writeln!(
                f,
                "Checksum: {:x} {}",
                msg.checksum.wire,
                checksum_verdict(msg.checksum.is_valid(), msg.checksum.computed)
            )?;
        }
        None => {}
    }

    match &frame.application {
        Some(ApplicationLayer::Dns(dns)) => write_dns(f, dns)?,
        Some(ApplicationLayer::Dhcp(dhcp)) => write_dhcp(f, dhcp)?,
        None => {}
    }

    if let Some(err) = &frame.error {
        writeln!(f, "Error: {err}")?;
    }
    Ok(())
}

fn write_dns(f: &mut fmt::Formatter<'_>, dns: &DnsMessage) -> fmt::Result {
    writeln!(
        f,
        "DNS xid: {} | {} | op: {} | res: {} | questions count: {} | answers count: {} | \
         authority count: {} | additional count: {}",
        dns.id,
        if dns.is_response { "RESPONSE" } else { "QUERY" },
        short(opcode_name(dns.opcode)),
        rcode_name(dns.rcode),
        dns.qdcount,
        dns.ancount,
        dns.nscount,
        dns.arcount
    )
}

fn write_dhcp(f: &mut fmt::Formatter<'_>, dhcp: &DhcpMessage) -> fmt::Result {
    write!(f, "BOOTP/DHCP {} | ", short(op_name(dhcp.op)))?;
    match (dhcp.op, dhcp.ciaddr) {
        (op::BOOTREQUEST, Some(ci)) => write!(f, "from {ci} | ")?,
        (op::BOOTREQUEST, None) => write!(f, "from ? | ")?,
        _ => write!(f, "to {} | ", dhcp.yiaddr)?,
    }
    write!(
        f,
        "xid: 0x{:08x} | Client HADDR: {} | Server host name: {}",
        dhcp.xid,
        dhcp.client_hardware_text(),
        dhcp.sname
    )?;
    if let Some(kind) = dhcp.message_type() {
        write!(f, " | Message type: {}", short(message_type_name(kind)))?;
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use crate::protocol::test_utils::{
        dns_query, ipv4_frame, v4_pair, DhcpBuilder, EthernetBuilder, Ipv4Builder, TcpBuilder,
        UdpBuilder,
    };
    use crate::protocol::{dissect, Frame};
    use crate::render::{render, Verbosity};
    use chrono::{TimeZone, Utc};

    fn decode(data: &[u8]) -> Frame {
        dissect(data, Utc.timestamp_opt(0, 0).unwrap()).unwrap()
    }

    fn lines(frame: &Frame) -> Vec<String> {
        render(frame, Verbosity::Summary)
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_one_line_per_layer() {
        let udp = UdpBuilder::new()
            .dns()
            .payload(dns_query(7, "example.org", 28))
            .build_for(&v4_pair());
        let out = lines(&decode(&ipv4_frame(17, udp)));

        // separator, timestamp, four layers, closing blank line
        assert_eq!(out.len(), 7);
        assert_eq!(out[1], "Timestamp: 00:00:00");
        assert_eq!(
            out[2],
            "Ethernet: src: 00:11:22:33:44:55 > dst: ff:ff:ff:ff:ff:ff IP"
        );
        assert!(out[3].starts_with("IPv4: 192.168.1.1 > 192.168.1.2 | Checksum: "));
        assert!(out[3].contains("(correct) | TTL: 64"));
        assert!(out[4].starts_with("UDP 12345 > 53 | Length: "));
        assert!(out[4].ends_with("(correct)"));
        assert_eq!(
            out[5],
            "DNS xid: 7 | QUERY | op: QUERY | res: 0 ! | questions count: 1 | \
             answers count: 0 | authority count: 0 | additional count: 0"
        );
    }

    #[test]
    fn test_bad_tcp_checksum_shows_computed() {
        let segment = TcpBuilder::new().checksum(0x0bad).build_for(&v4_pair());
        let out = lines(&decode(&ipv4_frame(6, segment)));
        let tcp = out.iter().find(|l| l.starts_with("TCP ")).unwrap();
        assert!(tcp.contains("Checksum: bad (incorrect) calculated: "), "{tcp}");
    }

    #[test]
    fn test_udp_without_checksum() {
        let udp = UdpBuilder::new().dst_port(9999).checksum(0).build_for(&v4_pair());
        let out = lines(&decode(&ipv4_frame(17, udp)));
        assert!(out[4].ends_with("Checksum: 0 (none)"));
    }

    #[test]
    fn test_vlan_suffix() {
        let ip = Ipv4Builder::new().icmp().payload(vec![8, 0, 0xf7, 0xff, 0, 0, 0, 0]).build();
        let data = EthernetBuilder::new().vlan(100).ipv4().payload(ip).build();
        let out = lines(&decode(&data));
        assert!(out[2].ends_with("IP | VLAN: 100 (PCP 0)"));
        assert!(out[4].starts_with("ICMP Type: Echo Request | Code: 0 | Identifier: 0 | "));
    }

    #[test]
    fn test_dhcp_summary() {
        let dhcp = DhcpBuilder::new()
            .xid(0x3903f326)
            .sname("boot")
            .option(53, &[1])
            .build();
        let udp = UdpBuilder::new().dhcp_request().payload(dhcp).build_for(&v4_pair());
        let out = lines(&decode(&ipv4_frame(17, udp)));
        assert_eq!(
            out[5],
            "BOOTP/DHCP BOOTREQUEST | from 0.0.0.0 | xid: 0x3903f326 | \
             Client HADDR: 00:0b:82:01:fc:42 | Server host name: boot | Message type: Discover"
        );
    }
}
