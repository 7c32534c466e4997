use thiserror::Error;

use crate::RouterId;

/// Errors raised while resolving addresses or computing a route.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// Not four dot-separated decimal octets in 0-255
    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),

    /// Prefix length outside 0-32, or unparsable slash notation
    #[error("Invalid prefix length: {0} (must be 0-32)")]
    InvalidPrefix(String),

    /// No router subnet contains the address
    #[error("No router attached to a subnet containing {0}")]
    RouterNotFound(String),

    /// Destination router sits in a component the source cannot reach
    #[error("No path from router {from} to router {to}")]
    Unreachable { from: RouterId, to: RouterId },

    #[error("Router {router} lists unknown neighbor {neighbor}")]
    UnknownNeighbor { router: RouterId, neighbor: RouterId },

    #[error("Router {0} lists itself as a neighbor")]
    SelfLoop(RouterId),
}

pub type Result<T> = std::result::Result<T, RoutingError>;
