//! The three graph element variants and their serde shapes.
//!
//! Field names follow the persisted JSON document (camelCase via
//! `#[serde(rename)]`); the `extra` maps keep unknown `data` keys intact
//! across a load/save round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stroke value marking a node as selected on the canvas.
pub(crate) const SELECTED_STROKE: &str = "black";
/// Stroke value for an unselected node.
pub(crate) const UNSELECTED_STROKE: &str = "none";
/// Stroke width applied to selected nodes.
pub(crate) const SELECTED_STROKE_WIDTH: &str = "4";
/// Class set on edges whose source node is selected.
pub(crate) const HIGHLIGHT_CLASS: &str = "highlighted";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Visual importance of a node; selects the default dimension of new nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeHierarchy {
    #[default]
    Basic,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<NodeHierarchy>,
    #[serde(default, rename = "customColor", skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, rename = "strokeWidth", skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<String>,
    #[serde(default, rename = "isEventNode", skip_serializing_if = "Option::is_none")]
    pub is_event_node: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
}

impl Node {
    /// The node's stroke doubles as its selection flag.
    pub fn is_selected(&self) -> bool {
        self.data.as_ref().and_then(|d| d.stroke.as_deref()) == Some(SELECTED_STROKE)
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        let data = self.data.get_or_insert_with(NodeData::default);
        if selected {
            data.stroke = Some(SELECTED_STROKE.to_string());
            data.stroke_width = Some(SELECTED_STROKE_WIDTH.to_string());
        } else {
            data.stroke = Some(UNSELECTED_STROKE.to_string());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A directed labeled link between two node ids.
///
/// Self-loops (`source == target`) and parallel edges between the same
/// ordered pair are both representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

impl Edge {
    pub(crate) fn set_class(&mut self, class: &str) {
        self.data.get_or_insert_with(EdgeData::default).class = Some(class.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClusterData {
    #[serde(default, rename = "customColor", skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A labeled group referencing a set of node ids.
///
/// Invariant: a node id appears in `childNodeIds` of at most one cluster at
/// any time. All mutation paths strip a node from its previous cluster before
/// adding it to a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "childNodeIds")]
    pub child_node_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ClusterData>,
}

impl ClusterNode {
    pub fn contains(&self, node_id: &str) -> bool {
        self.child_node_ids.iter().any(|id| id == node_id)
    }
}

/// A dated free-form annotation carried alongside the graph in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub date: String,
    pub note: String,
}

impl Note {
    /// A note stamped with the current local time.
    pub fn dated_now(text: impl Into<String>) -> Self {
        Self {
            date: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
            note: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Edge,
    Cluster,
}

/// A typed graph element. The variant is fixed at construction, so typed
/// callers never depend on shape-based classification.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphElement {
    Node(Node),
    Edge(Edge),
    Cluster(ClusterNode),
}

impl GraphElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            GraphElement::Node(_) => ElementKind::Node,
            GraphElement::Edge(_) => ElementKind::Edge,
            GraphElement::Cluster(_) => ElementKind::Cluster,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            GraphElement::Node(node) => &node.id,
            GraphElement::Edge(edge) => &edge.id,
            GraphElement::Cluster(cluster) => &cluster.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GraphElement::Node(node) => &node.label,
            GraphElement::Edge(edge) => &edge.label,
            GraphElement::Cluster(cluster) => &cluster.label,
        }
    }
}

impl From<Node> for GraphElement {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl From<Edge> for GraphElement {
    fn from(value: Edge) -> Self {
        Self::Edge(value)
    }
}

impl From<ClusterNode> for GraphElement {
    fn from(value: ClusterNode) -> Self {
        Self::Cluster(value)
    }
}

/// Classifies an untyped document element by shape.
///
/// Guard order matters and is part of the contract: no `childNodeIds` and no
/// `source` is a node; otherwise `source` wins over `childNodeIds`, so a
/// value carrying both classifies as an edge. A key set to `null` counts as
/// absent.
pub fn classify_value(element: &Value) -> ElementKind {
    let has_source = element.get("source").is_some_and(|v| !v.is_null());
    let has_child_ids = element.get("childNodeIds").is_some_and(|v| !v.is_null());
    if !has_child_ids && !has_source {
        ElementKind::Node
    } else if has_source {
        ElementKind::Edge
    } else {
        ElementKind::Cluster
    }
}
