// Startup-only helper: finds an address to print next to the bind port.
use crate::error::AppError;
use std::net::{IpAddr, Ipv4Addr};

/// First private, non-loopback IPv4 address on the host. `Ok(None)` when the
/// interfaces could be listed but none qualifies.
pub fn lan_ipv4() -> Result<Option<Ipv4Addr>, AppError> {
    let interfaces = if_addrs::get_if_addrs()
        .map_err(|e| AppError::Network(format!("Failed to list network interfaces: {}", e)))?;

    Ok(first_private_ipv4(
        interfaces
            .iter()
            .filter(|iface| !iface.is_loopback())
            .map(|iface| iface.ip()),
    ))
}

fn first_private_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> Option<Ipv4Addr> {
    addrs.into_iter().find_map(|addr| match addr {
        IpAddr::V4(v4) if !v4.is_loopback() && v4.is_private() => Some(v4),
        _ => None,
    })
}
