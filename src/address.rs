//! IPv4 address and subnet helpers.
//!
//! Addresses are handled as dotted-decimal strings at the edges and as
//! big-endian `u32` values for all mask arithmetic.

use crate::error::{Result, RoutingError};

/// Prefix length used when the topology does not say otherwise.
pub const DEFAULT_PREFIX_LEN: u8 = 24;

/// Parse a dotted-decimal IPv4 address into its numeric value, most
/// significant octet first.
///
/// Leading zeros are accepted, so `"010.000.001.001"` and `"10.0.1.1"` map to
/// the same value.
pub fn address_to_integer(address: &str) -> Result<u32> {
    let octets: Vec<&str> = address.split('.').collect();
    if octets.len() != 4 {
        return Err(RoutingError::InvalidAddress(address.to_string()));
    }

    let mut value = 0u32;
    for (i, octet_str) in octets.iter().enumerate() {
        // u8::from_str accepts a leading '+', which is not an address
        if octet_str.is_empty() || !octet_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RoutingError::InvalidAddress(address.to_string()));
        }
        let octet: u8 = octet_str
            .parse()
            .map_err(|_| RoutingError::InvalidAddress(address.to_string()))?;
        value |= (octet as u32) << (24 - i * 8);
    }

    Ok(value)
}

/// Render a numeric address back to dotted-decimal.
pub fn integer_to_address(value: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (value >> 24) & 0xFF,
        (value >> 16) & 0xFF,
        (value >> 8) & 0xFF,
        value & 0xFF
    )
}

/// Mask with the top `prefix_len` bits set.
pub fn subnet_mask(prefix_len: u8) -> Result<u32> {
    match prefix_len {
        0 => Ok(0),
        1..=32 => Ok(u32::MAX << (32 - prefix_len)),
        _ => Err(RoutingError::InvalidPrefix(prefix_len.to_string())),
    }
}

/// Parse slash notation such as `"/24"`. A bare `"24"` is accepted as well.
pub fn parse_prefix(notation: &str) -> Result<u8> {
    let digits = notation.trim().strip_prefix('/').unwrap_or(notation.trim());
    let prefix_len: u8 = digits
        .parse()
        .map_err(|_| RoutingError::InvalidPrefix(notation.to_string()))?;

    if prefix_len > 32 {
        return Err(RoutingError::InvalidPrefix(notation.to_string()));
    }
    Ok(prefix_len)
}

/// True when both addresses share the same network under `prefix_len`.
pub fn same_subnet(address_a: &str, address_b: &str, prefix_len: u8) -> Result<bool> {
    let mask = subnet_mask(prefix_len)?;
    let a = address_to_integer(address_a)?;
    let b = address_to_integer(address_b)?;
    Ok(a & mask == b & mask)
}
