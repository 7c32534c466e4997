pub mod locator;
pub mod topology;

pub use locator::{locate_router, resolve_router};
pub use topology::{Edge, Network, Router};
