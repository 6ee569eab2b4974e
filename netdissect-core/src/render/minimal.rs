//! One-line rendering.

use std::fmt;

use super::{arp_statement, link_type, mac, short};
use crate::format::{format_ipv6, ip_protocol_name};
use crate::protocol::dhcp::{op, op_name};
use crate::protocol::dns::opcode_name;
use crate::protocol::icmpv6::icmpv6_type;
use crate::protocol::{
    arp, icmp, icmpv6, ApplicationLayer, Frame, NetworkLayer, TransportLayer,
};

pub(super) fn write_frame(f: &mut fmt::Formatter<'_>, frame: &Frame) -> fmt::Result {
    let mut parts: Vec<String> = vec![
        format!("{} > {}", mac(&frame.link.src), mac(&frame.link.dst)),
        link_type(frame).to_string(),
    ];

    match &frame.network {
        Some(NetworkLayer::Ipv4(ip)) => {
            parts.push(format!("{} > {}", ip.src_text(), ip.dst_text()));
            parts.push(short(ip_protocol_name(ip.protocol)).to_string());
        }
        Some(NetworkLayer::Ipv6(ip)) => {
            parts.push(format!("{} > {}", ip.src_text(), ip.dst_text()));
            parts.push(short(ip_protocol_name(ip.next_header)).to_string());
        }
        Some(NetworkLayer::Arp(packet)) => {
            parts.push(short(arp::operation_name(packet.operation)).to_string());
            if matches!(packet.operation, arp::operation::REQUEST | arp::operation::REPLY) {
                parts.push(arp_statement(packet));
            }
        }
        None => {}
    }

    match &frame.transport {
        Some(TransportLayer::Tcp(tcp)) => {
            parts.push(format!("{} > {}", tcp.src_port, tcp.dst_port));
            parts.push(tcp.flags_description(false));
        }
        Some(TransportLayer::Udp(udp)) => {
            parts.push(format!("{} > {}", udp.src_port, udp.dst_port));
        }
        Some(TransportLayer::Icmp(msg)) => {
            parts.push(short(icmp::type_name(msg.icmp_type)).to_string());
            parts.push(match msg.code_text(false) {
                Some(code) => code.to_string(),
                None => msg.code.to_string(),
            });
        }
        Some(TransportLayer::Icmpv6(msg)) => {
            parts.push(short(icmpv6::type_name(msg.icmp_type)).to_string());
            if msg.icmp_type == icmpv6_type::NEIGHBOR_SOLICITATION {
                if let Some(target) = msg.target() {
                    parts.push(format_ipv6(*target).to_string());
                }
            }
        }
        None => {}
    }

    match &frame.application {
        Some(ApplicationLayer::Dns(dns)) => {
            parts.push("DNS".to_string());
            parts.push(dns.id.to_string());
            parts.push(format!("op: {}", short(opcode_name(dns.opcode))));
            parts.push(format!("qd: {}", dns.qdcount));
        }
        Some(ApplicationLayer::Dhcp(dhcp)) => {
            parts.push("BOOTP/DHCP".to_string());
            parts.push(short(op_name(dhcp.op)).to_string());
            parts.push(match (dhcp.op, dhcp.ciaddr) {
                (op::BOOTREQUEST, Some(ci)) => format!("from {ci}"),
                (op::BOOTREQUEST, None) => "from ?".to_string(),
                _ => format!("to {}", dhcp.yiaddr),
            });
        }
        None => {}
    }

    if let Some(err) = &frame.error {
        parts.push(format!("[{err}]"));
    }

    f.write_str(&parts.join(" "))
}
