pub mod address;
pub mod algorithms;
pub mod config;
pub mod error;
pub mod network;
pub mod report;

pub use algorithms::{RoutingPolicy, ShortestPath, shortest_path, shortest_path_with_policy, shortest_route};
pub use config::TopologyFile;
pub use error::{Result, RoutingError};
pub use network::{Edge, Network, Router};

/// Router identifier: the dotted-decimal address keying a router.
pub type RouterId = String;
