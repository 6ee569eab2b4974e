//! DHCP / BOOTP message decoder.
//!
//! The fixed BOOTP section is 236 bytes, followed by the 4-byte magic cookie
//! and a TLV option stream. Each option is rendered to text when decoded so
//! the renderer does not need to know option formats.

use std::net::Ipv4Addr;

use compact_str::CompactString;
use tracing::trace;

use super::cursor::Cursor;
use crate::error::{DecodeError, Result};
use crate::format::{fixed_field_text, format_hex, format_mac, printable_text};

/// Fixed BOOTP section size.
pub const BOOTP_FIXED_LEN: usize = 236;

/// Minimum decodable message: fixed section plus magic cookie.
pub const DHCP_MIN_LEN: usize = BOOTP_FIXED_LEN + 4;

pub const DHCP_MAGIC_COOKIE: u32 = 0x6382_5363;
pub const DHCP_SERVER_PORT: u16 = 67;
pub const DHCP_CLIENT_PORT: u16 = 68;

pub const BROADCAST_FLAG: u16 = 0x8000;

pub mod op {
    pub const BOOTREQUEST: u8 = 1;
    pub const BOOTREPLY: u8 = 2;
}

pub mod option_code {
    pub const PAD: u8 = 0;
    pub const SUBNET_MASK: u8 = 1;
    pub const TIME_OFFSET: u8 = 2;
    pub const ROUTER: u8 = 3;
    pub const DNS: u8 = 6;
    pub const HOST_NAME: u8 = 12;
    pub const DOMAIN_NAME: u8 = 15;
    pub const BROADCAST_ADDRESS: u8 = 28;
    pub const NETBIOS_NAME_SERVER: u8 = 44;
    pub const NETBIOS_SCOPE: u8 = 47;
    pub const REQUESTED_IP: u8 = 50;
    pub const LEASE_TIME: u8 = 51;
    pub const MESSAGE_TYPE: u8 = 53;
    pub const SERVER_ID: u8 = 54;
    pub const PARAMETER_REQUEST_LIST: u8 = 55;
    pub const CLIENT_ID: u8 = 61;
    pub const END: u8 = 255;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpOption {
    pub code: u8,
    pub length: u8,
    pub raw: Vec<u8>,
    pub rendered: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpMessage {
    pub op: u8,
    pub htype: u8,
    pub hlen: u8,
    pub hops: u8,
    pub xid: u32,
    pub secs: u16,
    pub flags: u16,
    /// Client address, carried by requests only
    pub ciaddr: Option<Ipv4Addr>,
    pub yiaddr: Ipv4Addr,
    /// Next server address, carried by replies only
    pub siaddr: Option<Ipv4Addr>,
    /// Relay agent address when nonzero
    pub giaddr: Option<Ipv4Addr>,
    pub chaddr: [u8; 16],
    pub sname: String,
    pub file: String,
    pub magic_cookie: u32,
    pub options: Vec<DhcpOption>,
}

impl DhcpMessage {
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data, "DHCP");
        cursor.require(DHCP_MIN_LEN)?;

        let op = cursor.read_u8()?;
        let htype = cursor.read_u8()?;
        let hlen = cursor.read_u8()?;
        let hops = cursor.read_u8()?;
        let xid = cursor.read_u32()?;
        let secs = cursor.read_u16()?;
        let flags = cursor.read_u16()?;
        let ciaddr = Ipv4Addr::from(cursor.read_array::<4>()?);
        let yiaddr = Ipv4Addr::from(cursor.read_array::<4>()?);
        let siaddr = Ipv4Addr::from(cursor.read_array::<4>()?);
        let giaddr = Ipv4Addr::from(cursor.read_array::<4>()?);
        let chaddr = cursor.read_array()?;
        let sname = fixed_field_text(cursor.read_bytes(64)?);
        let file = fixed_field_text(cursor.read_bytes(128)?);
        let magic_cookie = cursor.read_u32()?;

        let options = parse_options(cursor.rest(), cursor.position())?;

        Ok(Self {
            op,
            htype,
            hlen,
            hops,
            xid,
            secs,
            flags,
            ciaddr: (op == op::BOOTREQUEST).then_some(ciaddr),
            yiaddr,
            siaddr: (op == op::BOOTREPLY).then_some(siaddr),
            giaddr: (!giaddr.is_unspecified()).then_some(giaddr),
            chaddr,
            sname,
            file,
            magic_cookie,
            options,
        })
    }

    pub fn is_broadcast(&self) -> bool {
        self.flags & BROADCAST_FLAG != 0
    }

    pub fn has_magic_cookie(&self) -> bool {
        self.magic_cookie == DHCP_MAGIC_COOKIE
    }

    /// Value of option 53, if present.
    pub fn message_type(&self) -> Option<u8> {
        self.option(option_code::MESSAGE_TYPE)
            .and_then(|opt| opt.raw.first().copied())
    }

    pub fn option(&self, code: u8) -> Option<&DhcpOption> {
        self.options.iter().find(|opt| opt.code == code)
    }

    /// Client hardware address as text; Ethernet addresses render as a MAC.
    pub fn client_hardware_text(&self) -> CompactString {
        let len = (self.hlen as usize).min(self.chaddr.len());
        let bytes = &self.chaddr[..len];
        match format_mac(bytes) {
            Some(mac) if self.htype == 1 => mac,
            _ => format_hex(bytes).into(),
        }
    }
}

/// Walk the option stream. `base` is the stream's offset in the message and
/// only feeds error positions.
fn parse_options(stream: &[u8], base: usize) -> Result<Vec<DhcpOption>> {
    let mut options = Vec::new();
    let mut pos = 0;

    while let Some(&code) = stream.get(pos) {
        if code == option_code::END || code == option_code::PAD {
            break;
        }
        let length = *stream
            .get(pos + 1)
            .ok_or_else(|| DecodeError::truncated("DHCP", base + pos + 2, base + stream.len()))?;
        let start = pos + 2;
        let end = start + length as usize;
        let raw = stream
            .get(start..end)
            .ok_or_else(|| DecodeError::truncated("DHCP", base + end, base + stream.len()))?;

        trace!(code, length, "DHCP option");
        options.push(DhcpOption {
            code,
            length,
            rendered: render_option(code, raw),
            raw: raw.to_vec(),
        });
        pos = end;
    }

    Ok(options)
}

fn render_option(code: u8, raw: &[u8]) -> String {
    use option_code::*;

    match code {
        MESSAGE_TYPE if raw.len() == 1 => message_type_name(raw[0]).unwrap_or("Unknown").to_string(),
        SUBNET_MASK | ROUTER | DNS | BROADCAST_ADDRESS | NETBIOS_NAME_SERVER | REQUESTED_IP
        | SERVER_ID
            if !raw.is_empty() && raw.len() % 4 == 0 =>
        {
            raw.chunks_exact(4)
                .map(|c| Ipv4Addr::new(c[0], c[1], c[2], c[3]).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
        TIME_OFFSET if raw.len() == 4 => {
            i32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]).to_string()
        }
        LEASE_TIME if raw.len() == 4 => {
            u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]).to_string()
        }
        HOST_NAME | DOMAIN_NAME | NETBIOS_SCOPE => printable_text(raw),
        CLIENT_ID if raw.len() == 7 && raw[0] == 1 => match format_mac(&raw[1..]) {
            Some(mac) => mac.to_string(),
            None => format_hex(raw),
        },
        PARAMETER_REQUEST_LIST => raw
            .iter()
            .map(|code| code.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        _ => format_hex(raw),
    }
}

pub fn op_name(op: u8) -> Option<&'static str> {
    match op {
        op::BOOTREQUEST => Some("BOOTREQUEST"),
        op::BOOTREPLY => Some("BOOTREPLY"),
        _ => None,
    }
}

pub fn message_type_name(value: u8) -> Option<&'static str> {
    match value {
        1 => Some("Discover"),
        2 => Some("Offer"),
        3 => Some("Request"),
        4 => Some("Decline"),
        5 => Some("ACK"),
        6 => Some("NAK"),
        7 => Some("Release"),
        8 => Some("Inform"),
        _ => None,
    }
}

pub fn option_name(code: u8) -> Option<&'static str> {
    use option_code::*;

    match code {
        MESSAGE_TYPE => Some("DHCP Message Type"),
        SUBNET_MASK => Some("Subnet Mask"),
        TIME_OFFSET => Some("Time Offset"),
        ROUTER => Some("Router"),
        DNS => Some("DNS"),
        HOST_NAME => Some("Host Name"),
        DOMAIN_NAME => Some("Domain Name"),
        BROADCAST_ADDRESS => Some("Broadcast Address"),
        NETBIOS_NAME_SERVER => Some("NetBIOS Name Server"),
        NETBIOS_SCOPE => Some("NetBIOS Scope"),
        REQUESTED_IP => Some("Requested IP Address"),
        LEASE_TIME => Some("IP Address Lease Time"),
        SERVER_ID => Some("Server Identifier"),
        PARAMETER_REQUEST_LIST => Some("Parameter Request List"),
        CLIENT_ID => Some("Client Identifier"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::test_utils::DhcpBuilder;

    fn discover() -> Vec<u8> {
        DhcpBuilder::new()
            .broadcast()
            .option(option_code::MESSAGE_TYPE, &[1])
            .option(option_code::CLIENT_ID, &[0x01, 0x00, 0x0b, 0x82, 0x01, 0xfc, 0x42])
            .option(option_code::REQUESTED_IP, &[192, 168, 0, 10])
            .option(option_code::PARAMETER_REQUEST_LIST, &[1, 3, 6, 42])
            .raw_options(&[0xff])
            .build()
    }

    #[test]
    fn test_decode_discover() {
        let dhcp = DhcpMessage::decode(&discover()).unwrap();

        assert_eq!(dhcp.op, op::BOOTREQUEST);
        assert_eq!(dhcp.xid, 0x3903f326);
        assert!(dhcp.is_broadcast());
        assert!(dhcp.has_magic_cookie());
        assert_eq!(dhcp.client_hardware_text(), "00:0b:82:01:fc:42");
        assert_eq!(dhcp.message_type(), Some(1));
        assert_eq!(dhcp.options.len(), 4);

        let rendered: Vec<&str> = dhcp.options.iter().map(|o| o.rendered.as_str()).collect();
        assert_eq!(
            rendered,
            vec!["Discover", "00:0b:82:01:fc:42", "192.168.0.10", "1, 3, 6, 42"]
        );
    }

    #[test]
    fn test_request_address_population() {
        let packet = DhcpBuilder::new()
            .ciaddr([10, 0, 0, 5])
            .yiaddr([0, 0, 0, 0])
            .siaddr([10, 0, 0, 1])
            .build();
        let dhcp = DhcpMessage::decode(&packet).unwrap();

        assert_eq!(dhcp.ciaddr, Some(Ipv4Addr::new(10, 0, 0, 5)));
        assert_eq!(dhcp.yiaddr, Ipv4Addr::UNSPECIFIED);
        assert_eq!(dhcp.siaddr, None);
        assert_eq!(dhcp.giaddr, None);
    }

    #[test]
    fn test_reply_address_population() {
        let packet = DhcpBuilder::new()
            .reply()
            .ciaddr([10, 0, 0, 5])
            .yiaddr([192, 168, 0, 10])
            .siaddr([192, 168, 0, 1])
            .giaddr([172, 16, 0, 1])
            .sname("bootsrv")
            .option(option_code::MESSAGE_TYPE, &[5])
            .option(option_code::LEASE_TIME, &[0x00, 0x00, 0x0e, 0x10])
            .option(option_code::DNS, &[8, 8, 8, 8, 1, 1, 1, 1])
            .option(option_code::TIME_OFFSET, &(-3600i32).to_be_bytes())
            .raw_options(&[0xff])
            .build();
        let dhcp = DhcpMessage::decode(&packet).unwrap();

        assert_eq!(dhcp.ciaddr, None);
        assert_eq!(dhcp.yiaddr, Ipv4Addr::new(192, 168, 0, 10));
        assert_eq!(dhcp.siaddr, Some(Ipv4Addr::new(192, 168, 0, 1)));
        assert_eq!(dhcp.giaddr, Some(Ipv4Addr::new(172, 16, 0, 1)));
        assert_eq!(dhcp.sname, "bootsrv");
        assert_eq!(dhcp.message_type(), Some(5));
        assert_eq!(dhcp.option(option_code::LEASE_TIME).unwrap().rendered, "3600");
        assert_eq!(dhcp.option(option_code::DNS).unwrap().rendered, "8.8.8.8, 1.1.1.1");
        assert_eq!(dhcp.option(option_code::TIME_OFFSET).unwrap().rendered, "-3600");
    }

    #[test]
    fn test_options_stop_at_pad() {
        let packet = DhcpBuilder::new()
            .option(option_code::HOST_NAME, b"laptop")
            .raw_options(&[0x00, 0x35, 0x01, 0x01])
            .build();
        let dhcp = DhcpMessage::decode(&packet).unwrap();
        assert_eq!(dhcp.options.len(), 1);
        assert_eq!(dhcp.options[0].rendered, "laptop");
        assert_eq!(dhcp.message_type(), None);
    }

    #[test]
    fn test_options_stop_at_end_of_data() {
        let packet = DhcpBuilder::new().option(option_code::ROUTER, &[10, 0, 0, 1]).build();
        let dhcp = DhcpMessage::decode(&packet).unwrap();
        assert_eq!(dhcp.options.len(), 1);
        assert_eq!(dhcp.options[0].length, 4);
    }

    #[test]
    fn test_option_overrun_is_truncated() {
        let packet = DhcpBuilder::new().raw_options(&[0x0c, 0x08, b'a', b'b']).build();
        let err = DhcpMessage::decode(&packet).unwrap_err();
        assert_eq!(err, DecodeError::truncated("DHCP", 250, 244));
    }

    #[test]
    fn test_unknown_option_renders_hex() {
        let packet = DhcpBuilder::new().option(0x7b, &[0xde, 0xad]).build();
        let dhcp = DhcpMessage::decode(&packet).unwrap();
        assert_eq!(dhcp.options[0].rendered, "de ad");
        assert_eq!(option_name(0x7b), None);
    }

    #[test]
    fn test_too_short() {
        let packet = DhcpBuilder::new().build();
        let err = DhcpMessage::decode(&packet[..239]).unwrap_err();
        assert_eq!(err, DecodeError::truncated("DHCP", 240, 239));
    }

    #[test]
    fn test_name_tables() {
        assert_eq!(op_name(2), Some("BOOTREPLY"));
        assert_eq!(op_name(3), None);
        assert_eq!(message_type_name(8), Some("Inform"));
        assert_eq!(option_name(55), Some("Parameter Request List"));
    }
}
