//! Per-pair result rendering for the command-line report.

use log::warn;
use serde::Serialize;

use crate::RouterId;
use crate::algorithms::{RoutingPolicy, ShortestPath, shortest_route};
use crate::config::TopologyFile;
use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct PairReport<'a> {
    pub source: &'a str,
    pub destination: &'a str,
    pub path: Option<Vec<RouterId>>,
    pub cost: Option<u64>,
    pub error: Option<String>,
}

impl<'a> PairReport<'a> {
    pub fn new(source: &'a str, destination: &'a str, result: Result<ShortestPath>) -> Self {
        match result {
            Ok(route) => Self {
                source,
                destination,
                path: Some(route.path),
                cost: Some(route.cost),
                error: None,
            },
            Err(e) => Self {
                source,
                destination,
                path: None,
                cost: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// `['a', 'b']`, or `[]` when no routing is needed.
pub fn format_path(path: &[RouterId]) -> String {
    let quoted: Vec<String> = path.iter().map(|id| format!("'{}'", id)).collect();
    format!("[{}]", quoted.join(", "))
}

pub fn render_line(source: &str, destination: &str, result: &Result<ShortestPath>) -> String {
    let rendered = match result {
        Ok(route) => format_path(&route.path),
        Err(e) => format!("error: {}", e),
    };
    format!("{:>15} -> {:<15}  {}", source, destination, rendered)
}

pub fn render_json(source: &str, destination: &str, result: Result<ShortestPath>) -> serde_json::Result<String> {
    serde_json::to_string(&PairReport::new(source, destination, result))
}

/// Route every `src-dest` pair of the topology, one output line per pair.
///
/// A failing pair is logged and rendered in place; it never stops the
/// remaining pairs.
pub fn route_all(topology: &TopologyFile, policy: &RoutingPolicy, json: bool) -> serde_json::Result<Vec<String>> {
    let mut lines = Vec::with_capacity(topology.src_dest.len());

    for (src_ip, dest_ip) in &topology.src_dest {
        let result = shortest_route(&topology.routers, src_ip, dest_ip, policy);
        if let Err(e) = &result {
            warn!("{} -> {}: {}", src_ip, dest_ip, e);
        }

        if json {
            lines.push(render_json(src_ip, dest_ip, result)?);
        } else {
            lines.push(render_line(src_ip, dest_ip, &result));
        }
    }

    Ok(lines)
}
