pub mod dijkstra;

pub use dijkstra::{
    RoutingPolicy, ShortestPath, shortest_path, shortest_path_with_policy, shortest_route,
};
