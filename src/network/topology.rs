use std::collections::BTreeMap;

use ipnet::Ipv4Net;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::RouterId;
use crate::address::{self, DEFAULT_PREFIX_LEN};
use crate::error::{Result, RoutingError};

/// Static router graph, keyed by router identifier.
///
/// Iteration runs in ascending identifier order. The locator relies on that
/// order for its first-match rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Network {
    pub routers: BTreeMap<RouterId, Router>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Router {
    /// Prefix length of the router's own subnet
    #[serde(
        rename = "netmask",
        default = "default_prefix_len",
        deserialize_with = "deserialize_prefix",
        serialize_with = "serialize_prefix"
    )]
    pub prefix_len: u8,
    #[serde(default)]
    pub connections: BTreeMap<RouterId, Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_prefix: Option<String>,
}

/// Directed connection towards a neighbor router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Administrative distance, the edge weight
    pub ad: u32,
    #[serde(default)]
    pub interface: String,
    /// Prefix length of the neighbor's subnet
    #[serde(
        rename = "netmask",
        default = "default_prefix_len",
        deserialize_with = "deserialize_prefix",
        serialize_with = "serialize_prefix"
    )]
    pub prefix_len: u8,
}

fn default_prefix_len() -> u8 {
    DEFAULT_PREFIX_LEN
}

fn deserialize_prefix<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let notation = String::deserialize(deserializer)?;
    address::parse_prefix(&notation).map_err(serde::de::Error::custom)
}

fn serialize_prefix<S>(prefix_len: &u8, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("/{prefix_len}"))
}

impl Router {
    pub fn new(prefix_len: u8) -> Self {
        Self {
            prefix_len,
            connections: BTreeMap::new(),
            if_count: None,
            if_prefix: None,
        }
    }

    /// Builder-style helper used when assembling topologies in code. The
    /// edge's neighbor prefix is set to this router's own prefix; use
    /// [`Router::with_edge`] when the neighbor's subnet differs.
    pub fn with_connection(mut self, neighbor: &str, ad: u32) -> Self {
        let interface = format!("en{}", self.connections.len());
        self.connections.insert(
            neighbor.to_string(),
            Edge {
                ad,
                interface,
                prefix_len: self.prefix_len,
            },
        );
        self
    }

    pub fn with_edge(mut self, neighbor: &str, edge: Edge) -> Self {
        self.connections.insert(neighbor.to_string(), edge);
        self
    }

    /// Subnet this router is attached to, given its identifier.
    pub fn subnet(&self, router_id: &str) -> Result<Ipv4Net> {
        let value = address::address_to_integer(router_id)?;
        Ipv4Net::new(value.into(), self.prefix_len)
            .map(|net| net.trunc())
            .map_err(|_| RoutingError::InvalidPrefix(self.prefix_len.to_string()))
    }
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_router(&mut self, router_id: &str, router: Router) {
        self.routers.insert(router_id.to_string(), router);
    }

    pub fn get(&self, router_id: &str) -> Option<&Router> {
        self.routers.get(router_id)
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    /// Neighbors of `router_id` with the administrative distance towards each.
    pub fn get_neighbors<'a>(&'a self, router_id: &str) -> impl Iterator<Item = (&'a RouterId, u32)> {
        self.routers
            .get(router_id)
            .into_iter()
            .flat_map(|router| router.connections.iter().map(|(id, edge)| (id, edge.ad)))
    }

    /// Check that every identifier parses, every prefix is in range, and
    /// the graph is closed over its own routers.
    pub fn validate(&self) -> Result<()> {
        for (router_id, router) in &self.routers {
            address::address_to_integer(router_id)?;
            address::subnet_mask(router.prefix_len)?;

            for neighbor in router.connections.keys() {
                if neighbor == router_id {
                    return Err(RoutingError::SelfLoop(router_id.clone()));
                }
                if !self.routers.contains_key(neighbor) {
                    return Err(RoutingError::UnknownNeighbor {
                        router: router_id.clone(),
                        neighbor: neighbor.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
