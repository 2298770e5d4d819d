//! The persisted document shape and its (de)serialization.
//!
//! `deserialize(serialize(model))` reproduces the model field for field.
//! Importing performs no referential validation: a document with dangling
//! edge endpoints or cluster members is applied as-is, and downstream
//! operations tolerate the danglers. `mindgraph-cli validate` is the strict
//! checker for callers that want one.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::element::{ClusterNode, Edge, Node, NodeData, Note};
use crate::error::{Error, Result};
use crate::graph::{MindGraph, ModelChange};

/// File name used when exporting a mind map for download.
pub const DEFAULT_DOCUMENT_FILE_NAME: &str = "mind_map.json";

/// Reading direction of the rendered layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "BT")]
    BottomToTop,
    #[serde(rename = "RL")]
    RightToLeft,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::TopToBottom => "TB",
            Orientation::LeftToRight => "LR",
            Orientation::BottomToTop => "BT",
            Orientation::RightToLeft => "RL",
        }
    }
}

/// Edge interpolation style. Serialized names match the labels the curve
/// picker shows, spaces included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurveStyle {
    Bundle,
    Cardinal,
    #[serde(rename = "Catmull Rom")]
    CatmullRom,
    #[default]
    Linear,
    #[serde(rename = "Monotone X")]
    MonotoneX,
    #[serde(rename = "Monotone Y")]
    MonotoneY,
    Natural,
    Step,
    #[serde(rename = "Step After")]
    StepAfter,
    #[serde(rename = "Step Before")]
    StepBefore,
}

/// The exchanged document: the exact persisted shape, nothing derived.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MindMapDocument {
    pub nodes: Vec<Node>,
    pub links: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clusters: Option<Vec<ClusterNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<CurveStyle>,
}

impl MindGraph {
    /// Structural snapshot of the full model. No transformation, no id
    /// remapping; all document fields are populated.
    pub fn to_document(&self) -> MindMapDocument {
        MindMapDocument {
            nodes: self.nodes.clone(),
            links: self.links.clone(),
            clusters: Some(self.clusters.clone()),
            notes: Some(self.notes.clone()),
            orientation: Some(self.orientation),
            curve: Some(self.curve),
        }
    }

    /// Applies a document to the model. `nodes` and `links` replace the
    /// current collections unconditionally; the optional fields replace only
    /// when present, so a document without a `clusters` key leaves existing
    /// clusters alone. The transient selection is reset.
    pub fn apply_document(&mut self, document: MindMapDocument) {
        self.nodes = document.nodes;
        self.links = document.links;
        if let Some(clusters) = document.clusters {
            self.clusters = clusters;
        }
        if let Some(notes) = document.notes {
            self.notes = notes;
        }
        if let Some(orientation) = document.orientation {
            self.orientation = orientation;
        }
        if let Some(curve) = document.curve {
            self.curve = curve;
        }
        self.selection.clear();
        self.notify(ModelChange::Document);
    }
}

/// Parses a document from JSON text. On failure the error carries the parser
/// message for display; the caller's model is untouched.
pub fn parse_document(json: &str) -> Result<MindMapDocument> {
    serde_json::from_str(json).map_err(|err| Error::DocumentParse {
        message: err.to_string(),
    })
}

/// Pretty-prints a document in the exact exchanged shape.
pub fn document_to_json(document: &MindMapDocument) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(|err| Error::DocumentParse {
        message: err.to_string(),
    })
}

pub fn read_document_file(path: impl AsRef<Path>) -> Result<MindMapDocument> {
    let text = fs::read_to_string(path)?;
    parse_document(&text)
}

pub fn write_document_file(path: impl AsRef<Path>, document: &MindMapDocument) -> Result<()> {
    let mut json = document_to_json(document)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

/// The starter document shown on first launch: one medium node linked to a
/// basic node, plus a two-member demo cluster.
pub fn demo_document() -> MindMapDocument {
    use crate::element::{ClusterData, Dimension, NodeHierarchy};

    let node = |id: &str, label: &str, level: NodeHierarchy, color: &str, custom: &str| Node {
        id: id.to_string(),
        label: label.to_string(),
        dimension: Some(match level {
            NodeHierarchy::Basic => Dimension {
                width: 100.0,
                height: 100.0,
            },
            _ => Dimension {
                width: 200.0,
                height: 100.0,
            },
        }),
        position: None,
        data: Some(NodeData {
            level: Some(level),
            custom_color: Some(custom.to_string()),
            color: Some(color.to_string()),
            stroke: Some("none".to_string()),
            ..NodeData::default()
        }),
    };

    MindMapDocument {
        nodes: vec![
            node(
                "jwdh",
                "Demo main node",
                NodeHierarchy::Medium,
                "#a8385d",
                "#fff000",
            ),
            node(
                "nzit",
                "demo linked node",
                NodeHierarchy::Basic,
                "#a27ea8",
                "#D3D3D3",
            ),
            node(
                "eifm",
                "demo basic node",
                NodeHierarchy::Basic,
                "#7aa3e5",
                "#D3D3D3",
            ),
        ],
        links: vec![Edge {
            id: "jwdh969881".to_string(),
            source: "jwdh".to_string(),
            target: "nzit".to_string(),
            label: "demo link".to_string(),
            data: None,
        }],
        clusters: Some(vec![ClusterNode {
            id: "tni".to_string(),
            label: "Demo Cluster".to_string(),
            child_node_ids: vec!["nzit".to_string(), "eifm".to_string()],
            data: Some(ClusterData {
                color: Some("#aae3f5".to_string()),
                ..ClusterData::default()
            }),
        }]),
        notes: None,
        orientation: None,
        curve: None,
    }
}
