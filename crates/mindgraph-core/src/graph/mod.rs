//! The graph model: exclusive owner of the nodes, links, clusters, notes, and
//! the transient selection set. All mutation goes through the methods in
//! [`ops`]; nothing else touches the collections.

mod ops;


use crate::config::GraphConfig;
use crate::document::{CurveStyle, Orientation};
use crate::element::{ClusterNode, Edge, Node, Note};

/// Which part of the model a completed mutation touched. Consumers redraw the
/// corresponding layer; `Document` means everything changed at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChange {
    Nodes,
    Links,
    Clusters,
    Notes,
    Selection,
    Layout,
    Document,
}

type ChangeListener = Box<dyn FnMut(ModelChange)>;

/// One editor session's mind map.
///
/// Constructed at session start, dropped at session end; passed by `&mut` to
/// whichever component needs it. Single-threaded by design: every mutation
/// runs to completion before the next event is processed, so the
/// strip-then-add sequences that uphold the cluster-membership invariant are
/// atomic by construction.
pub struct MindGraph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) links: Vec<Edge>,
    pub(crate) clusters: Vec<ClusterNode>,
    pub(crate) notes: Vec<Note>,
    pub(crate) orientation: Orientation,
    pub(crate) curve: CurveStyle,
    /// Node ids in the order they were ctrl-clicked. Transient; never
    /// serialized.
    pub(crate) selection: Vec<String>,
    pub(crate) config: GraphConfig,
    listener: Option<ChangeListener>,
}

impl std::fmt::Debug for MindGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MindGraph")
            .field("nodes", &self.nodes)
            .field("links", &self.links)
            .field("clusters", &self.clusters)
            .field("notes", &self.notes)
            .field("orientation", &self.orientation)
            .field("curve", &self.curve)
            .field("selection", &self.selection)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl Default for MindGraph {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl MindGraph {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            clusters: Vec::new(),
            notes: Vec::new(),
            orientation: Orientation::default(),
            curve: CurveStyle::default(),
            selection: Vec::new(),
            config,
            listener: None,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Edge] {
        &self.links
    }

    pub fn clusters(&self) -> &[ClusterNode] {
        &self.clusters
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn curve(&self) -> CurveStyle {
        self.curve
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Ids of the currently selected nodes, in selection order.
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn selected_nodes(&self) -> impl Iterator<Item = &Node> {
        self.selection.iter().filter_map(|id| self.node(id))
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn link(&self, id: &str) -> Option<&Edge> {
        self.links.iter().find(|e| e.id == id)
    }

    pub fn cluster(&self, id: &str) -> Option<&ClusterNode> {
        self.clusters.iter().find(|c| c.id == id)
    }

    /// Registers the redraw callback. Each completed mutation reports the
    /// layer it touched exactly once.
    pub fn set_change_listener(&mut self, listener: impl FnMut(ModelChange) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_change_listener(&mut self) {
        self.listener = None;
    }

    pub(crate) fn notify(&mut self, change: ModelChange) {
        if let Some(listener) = self.listener.as_mut() {
            listener(change);
        }
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.notify(ModelChange::Layout);
    }

    pub fn set_curve(&mut self, curve: CurveStyle) {
        self.curve = curve;
        self.notify(ModelChange::Layout);
    }
}
