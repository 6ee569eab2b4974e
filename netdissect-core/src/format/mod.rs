//! Formatting utilities: addresses, raw bytes and descriptive lookups.

mod address;
pub mod describe;

pub use address::{
    fixed_field_text, format_hex, format_ipv4, format_ipv6, format_mac, printable_text,
};
pub use describe::{
    dscp_description, dscp_name, ecn_description, ecn_name, ethertype_name,
    ip_protocol_description, ip_protocol_name,
};
