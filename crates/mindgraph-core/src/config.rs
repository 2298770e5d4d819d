use serde::{Deserialize, Serialize};

use crate::element::{Dimension, NodeHierarchy};

/// Editor defaults applied when elements are created.
///
/// The config is plain data so embedders can deserialize it from their own
/// settings store; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Fill color assigned to newly created nodes and clusters.
    pub node_color: String,
    pub basic_dimension: Dimension,
    pub medium_dimension: Dimension,
    pub high_dimension: Dimension,
    pub new_node_label: String,
    /// Placeholder label for edges created by the link drag, shown until the
    /// user supplies one.
    pub new_edge_label: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_color: "#D3D3D3".to_string(),
            basic_dimension: Dimension {
                width: 100.0,
                height: 100.0,
            },
            medium_dimension: Dimension {
                width: 200.0,
                height: 100.0,
            },
            high_dimension: Dimension {
                width: 300.0,
                height: 150.0,
            },
            new_node_label: "New node".to_string(),
            new_edge_label: "edge".to_string(),
        }
    }
}

impl GraphConfig {
    pub fn dimension_for(&self, level: NodeHierarchy) -> Dimension {
        match level {
            NodeHierarchy::Basic => self.basic_dimension,
            NodeHierarchy::Medium => self.medium_dimension,
            NodeHierarchy::High => self.high_dimension,
        }
    }
}
