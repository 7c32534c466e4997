use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::network::Network;

/// On-disk topology description: the router graph plus the host pairs to
/// route between.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyFile {
    pub routers: Network,
    #[serde(rename = "src-dest", default)]
    pub src_dest: Vec<(String, String)>,
}

impl TopologyFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read topology file {}", path.display()))?;
        let topology = Self::from_json(&content)
            .with_context(|| format!("failed to parse topology file {}", path.display()))?;

        debug!(
            "Loaded {} routers and {} pairs from {}",
            topology.routers.len(),
            topology.src_dest.len(),
            path.display()
        );
        Ok(topology)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let topology: TopologyFile = serde_json::from_str(content)?;
        Ok(topology)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)
            .with_context(|| format!("failed to write topology file {}", path.as_ref().display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Router;

    const SAMPLE: &str = r#"{
        "routers": {
            "10.34.98.1": {
                "connections": {
                    "10.34.166.1": { "netmask": "/24", "interface": "en0", "ad": 70 }
                },
                "netmask": "/24",
                "if_count": 1,
                "if_prefix": "en"
            },
            "10.34.166.1": {
                "connections": {
                    "10.34.98.1": { "netmask": "/24", "interface": "en0", "ad": 70 }
                },
                "netmask": "/24",
                "if_count": 1,
                "if_prefix": "en"
            }
        },
        "src-dest": [
            ["10.34.98.5", "10.34.166.9"]
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let topology = TopologyFile::from_json(SAMPLE).unwrap();
        assert_eq!(topology.routers.len(), 2);
        assert_eq!(
            topology.src_dest,
            vec![("10.34.98.5".to_string(), "10.34.166.9".to_string())]
        );
    }

    #[test]
    fn test_missing_pairs_default_to_empty() {
        let topology = TopologyFile::from_json(r#"{ "routers": {} }"#).unwrap();
        assert!(topology.routers.is_empty());
        assert!(topology.src_dest.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topology.json");

        let mut topology = TopologyFile::default();
        topology
            .routers
            .add_router("10.0.1.1", Router::new(24).with_connection("10.0.2.1", 7));
        topology
            .routers
            .add_router("10.0.2.1", Router::new(24).with_connection("10.0.1.1", 7));
        topology.src_dest.push(("10.0.1.2".to_string(), "10.0.2.2".to_string()));

        topology.save(&path).unwrap();
        assert_eq!(TopologyFile::load(&path).unwrap(), topology);
    }

    #[test]
    fn test_load_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = TopologyFile::load(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.json"));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ \"routers\": ").unwrap();
        let err = TopologyFile::load(&broken).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
