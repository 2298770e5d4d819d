//! Drag-interaction state machines.
//!
//! The UI owns the raw pointer events and the hit test; this module owns the
//! interpretation. One [`DragState`] value carries the whole interaction, so
//! two simultaneous drags are unrepresentable: a link drag (started on a
//! node's connection handle) and a node-body drag are mutually exclusive, and
//! whichever press was reported last wins.

#[cfg(test)]
mod tests;

use crate::element::Position;
use crate::graph::MindGraph;

/// Read-only view-transform state supplied by the rendering collaborator,
/// used to convert screen coordinates into graph coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pan_offset_x: f64,
    pub pan_offset_y: f64,
    pub zoom_level: f64,
}

impl Viewport {
    pub fn to_graph(&self, screen: Position) -> Position {
        Position {
            x: (screen.x - self.pan_offset_x) / self.zoom_level,
            y: (screen.y - self.pan_offset_y) / self.zoom_level,
        }
    }

    fn scale_delta(&self, delta: Position) -> Position {
        Position {
            x: delta.x / self.zoom_level,
            y: delta.y / self.zoom_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Rubber-banding a new edge from `source`'s connection handle.
    DraggingLink {
        source: String,
        start: Position,
        current: Position,
    },
    /// The rendering component is moving a node body; we only track which
    /// one, so the release can be resolved against the hit test.
    DraggingNode { node: String },
}

/// What the UI's hit test found under the pointer when a node-body drag was
/// released, in the priority order the resolution expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget<'a> {
    /// A cluster's boundary region.
    Cluster(&'a str),
    /// Another node's body.
    Node(&'a str),
    /// Nothing relevant under the pointer.
    Canvas,
}

/// Outcome of releasing a link drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDrop {
    /// An edge was appended to the model; the caller should open label entry
    /// for it. The edge is already committed and cancelling the label entry
    /// does not roll it back.
    Created { edge_id: String },
    Discarded,
}

#[derive(Debug, Default)]
pub struct DragGesture {
    state: DragState,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging_link(&self) -> bool {
        matches!(self.state, DragState::DraggingLink { .. })
    }

    /// Whether the rendering component may move node bodies right now. False
    /// for the duration of a link drag so the node under the handle stays
    /// put.
    pub fn node_dragging_enabled(&self) -> bool {
        !self.is_dragging_link()
    }

    /// Primary-button press on a node's connection handle. The start point is
    /// the pointer converted to graph coordinates; the rubber band's moving
    /// end begins at the node's top-center when its geometry is known.
    pub fn begin_link_drag(
        &mut self,
        graph: &MindGraph,
        node_id: &str,
        pointer: Position,
        viewport: Viewport,
    ) {
        let start = viewport.to_graph(pointer);
        let current = graph
            .node(node_id)
            .and_then(|node| match (node.position, node.dimension) {
                (Some(position), Some(dimension)) => Some(Position {
                    x: position.x + dimension.width / 2.0,
                    y: position.y,
                }),
                _ => None,
            })
            .unwrap_or(start);
        self.state = DragState::DraggingLink {
            source: node_id.to_string(),
            start,
            current,
        };
    }

    /// Pointer movement while dragging; `delta` is the raw screen-space
    /// movement, divided by the zoom level so the rubber band stays anchored
    /// under the pointer.
    pub fn pointer_moved(&mut self, delta: Position, viewport: Viewport) {
        if let DragState::DraggingLink { current, .. } = &mut self.state {
            let scaled = viewport.scale_delta(delta);
            current.x += scaled.x;
            current.y += scaled.y;
        }
    }

    /// The rubber-band line endpoints while a link drag is in progress.
    pub fn link_preview(&self) -> Option<(Position, Position)> {
        match &self.state {
            DragState::DraggingLink { start, current, .. } => Some((*start, *current)),
            _ => None,
        }
    }

    /// Pointer release ending a link drag. `target` is the owning node of the
    /// connection handle under the release point, if any. A handle of a
    /// different node commits a new edge; anything else discards the gesture
    /// with no mutation. Either way the machine returns to idle.
    pub fn end_link_drag(&mut self, graph: &mut MindGraph, target: Option<&str>) -> LinkDrop {
        let source = match &self.state {
            DragState::DraggingLink { source, .. } => source.clone(),
            _ => return LinkDrop::Discarded,
        };
        self.state = DragState::Idle;
        let Some(target_id) = target else {
            return LinkDrop::Discarded;
        };
        if target_id == source {
            return LinkDrop::Discarded;
        }
        let edge_id = graph.create_link(&source, target_id);
        LinkDrop::Created { edge_id }
    }

    /// Primary-button press on a node body. Cancels any link drag in flight.
    pub fn begin_node_drag(&mut self, node_id: &str) {
        self.state = DragState::DraggingNode {
            node: node_id.to_string(),
        };
    }

    /// Pointer release of a node-body drag, resolved against the hit test in
    /// priority order: cluster region, then another node, then empty canvas.
    ///
    /// Dropping a node onto the cluster it already belongs to aborts with no
    /// change. Dropping onto another node forms a new two-member cluster.
    /// Dropping on empty canvas detaches the node from clustering. Each
    /// branch is idempotent under repetition. A release that arrives while a
    /// link drag is in progress belongs to that gesture and is ignored here;
    /// a release without a tracked node drag is still resolved (a plain
    /// click on a node is a harmless drop onto its current surroundings).
    pub fn end_node_drag(&mut self, graph: &mut MindGraph, node_id: &str, target: DropTarget<'_>) {
        if self.is_dragging_link() {
            return;
        }
        self.state = DragState::Idle;
        match target {
            DropTarget::Cluster(cluster_id) => {
                if graph.cluster(cluster_id).is_some_and(|c| c.contains(node_id)) {
                    return;
                }
                graph.move_to_cluster(node_id, cluster_id);
            }
            DropTarget::Node(other_id) if other_id != node_id => {
                graph.cluster_pair(node_id, other_id);
            }
            DropTarget::Node(_) | DropTarget::Canvas => {
                graph.remove_from_cluster(node_id);
            }
        }
    }

    /// Lost pointer capture: back to idle with no mutation.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
