use log::debug;

use crate::RouterId;
use crate::address;
use crate::error::{Result, RoutingError};
use crate::network::Network;

/// Find the router whose own subnet contains `ip`.
///
/// Routers are scanned in network order and the first match wins, so with
/// overlapping subnets the lowest identifier is chosen. `Ok(None)` means no
/// subnet contains the address.
pub fn locate_router<'a>(network: &'a Network, ip: &str) -> Result<Option<&'a RouterId>> {
    let host = address::address_to_integer(ip)?;

    for (router_id, router) in &network.routers {
        let mask = address::subnet_mask(router.prefix_len)?;
        let network_addr = address::address_to_integer(router_id)?;

        if host & mask == network_addr & mask {
            debug!("{} attached to router {} ({})", ip, router_id, router.subnet(router_id)?);
            return Ok(Some(router_id));
        }
    }

    debug!("No router subnet contains {}", ip);
    Ok(None)
}

/// Like [`locate_router`], with a missing router reported as
/// [`RoutingError::RouterNotFound`].
pub fn resolve_router<'a>(network: &'a Network, ip: &str) -> Result<&'a RouterId> {
    locate_router(network, ip)?.ok_or_else(|| RoutingError::RouterNotFound(ip.to_string()))
}
