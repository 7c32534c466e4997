use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::{debug, info};

use crate::RouterId;
use crate::address::{self, DEFAULT_PREFIX_LEN};
use crate::error::{Result, RoutingError};
use crate::network::{Network, resolve_router};

/// Knobs that change routing outcomes without touching the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingPolicy {
    /// Routers sharing a subnet of this length need no inter-router path.
    /// `None` always runs the search.
    pub short_circuit_prefix: Option<u8>,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            short_circuit_prefix: Some(DEFAULT_PREFIX_LEN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    /// Sum of administrative distances along `path`
    pub cost: u64,
    pub next_hop: Option<RouterId>,
    /// Source router to destination router, inclusive. Empty when the hosts
    /// need no routing.
    pub path: Vec<RouterId>,
}

#[derive(Debug, PartialEq, Eq)]
struct State<'a> {
    cost: u64,
    router: &'a str,
}

impl Ord for State<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap, lowest identifier first on ties
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.router.cmp(self.router))
    }
}

impl PartialOrd for State<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Routers on the shortest path between the routers attached to
/// `source_ip` and `dest_ip`, using the default policy.
///
/// The host addresses themselves never appear in the result. An empty path
/// means both hosts sit behind routers in the same /24 and no routing is
/// needed; failures are reported as errors, never as an empty path.
pub fn shortest_path(network: &Network, source_ip: &str, dest_ip: &str) -> Result<Vec<RouterId>> {
    shortest_path_with_policy(network, source_ip, dest_ip, &RoutingPolicy::default())
}

pub fn shortest_path_with_policy(
    network: &Network,
    source_ip: &str,
    dest_ip: &str,
    policy: &RoutingPolicy,
) -> Result<Vec<RouterId>> {
    shortest_route(network, source_ip, dest_ip, policy).map(|route| route.path)
}

/// Full route between two hosts: path, cost and first hop.
pub fn shortest_route(
    network: &Network,
    source_ip: &str,
    dest_ip: &str,
    policy: &RoutingPolicy,
) -> Result<ShortestPath> {
    let source = resolve_router(network, source_ip)?;
    let destination = resolve_router(network, dest_ip)?;

    if let Some(prefix_len) = policy.short_circuit_prefix {
        if address::same_subnet(source, destination, prefix_len)? {
            let shared = address::address_to_integer(source)? & address::subnet_mask(prefix_len)?;
            debug!(
                "{} and {} share {}/{}, no routing needed",
                source,
                destination,
                address::integer_to_address(shared),
                prefix_len
            );
            return Ok(ShortestPath {
                cost: 0,
                next_hop: None,
                path: Vec::new(),
            });
        }
    }

    let (distances, previous) = calculate_distances(network, source);

    let Some(&cost) = distances.get(destination.as_str()) else {
        return Err(RoutingError::Unreachable {
            from: source.clone(),
            to: destination.clone(),
        });
    };

    let path = reconstruct_path(&previous, source, destination);
    let next_hop = path.get(1).cloned();
    info!(
        "Route {} -> {}: {} routers, cost {}",
        source_ip,
        dest_ip,
        path.len(),
        cost
    );

    Ok(ShortestPath {
        cost,
        next_hop,
        path,
    })
}

/// Single-source Dijkstra from `source` over the whole network.
///
/// Returns settled distances and predecessors. Routers missing from the
/// distance map are unreachable from `source`.
fn calculate_distances<'a>(
    network: &'a Network,
    source: &'a str,
) -> (HashMap<&'a str, u64>, HashMap<&'a str, &'a str>) {
    let mut distances: HashMap<&str, u64> = HashMap::with_capacity(network.len());
    let mut previous: HashMap<&str, &str> = HashMap::with_capacity(network.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(network.len());
    let mut heap = BinaryHeap::new();

    distances.insert(source, 0);
    heap.push(State {
        cost: 0,
        router: source,
    });

    while let Some(State { cost, router }) = heap.pop() {
        // Stale entry, router already settled with a lower cost
        if !visited.insert(router) {
            continue;
        }

        for (neighbor, link_cost) in network.get_neighbors(router) {
            let neighbor = neighbor.as_str();
            if visited.contains(neighbor) {
                continue;
            }

            let new_cost = cost + u64::from(link_cost);
            let improves = distances
                .get(neighbor)
                .is_none_or(|&current| new_cost < current);

            if improves {
                distances.insert(neighbor, new_cost);
                previous.insert(neighbor, router);
                heap.push(State {
                    cost: new_cost,
                    router: neighbor,
                });
            }
        }
    }

    debug!(
        "Settled {} of {} routers from {}",
        visited.len(),
        network.len(),
        source
    );
    (distances, previous)
}

/// Walk predecessors back from `destination`. Only called once
/// `destination` is known to be reachable, so the chain ends at `source`.
fn reconstruct_path(previous: &HashMap<&str, &str>, source: &str, destination: &str) -> Vec<RouterId> {
    let mut path = vec![destination.to_string()];
    let mut current = destination;

    while current != source {
        match previous.get(current) {
            Some(&prev) => {
                path.push(prev.to_string());
                current = prev;
            }
            None => break,
        }
    }

    path.reverse();
    path
}
