//! Mutation operations. Lookups that miss are forgiving no-ops (logged at
//! debug level); the only user-facing error is cluster creation with an
//! empty selection.

use uuid::Uuid;

use super::{MindGraph, ModelChange};
use crate::element::{
    ClusterData, ClusterNode, Edge, GraphElement, HIGHLIGHT_CLASS, Node, NodeData, NodeHierarchy,
    Note, UNSELECTED_STROKE,
};
use crate::error::{Error, Result};

const ID_FRAGMENT_LEN: usize = 6;

impl MindGraph {
    fn id_in_use(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
            || self.links.iter().any(|e| e.id == id)
            || self.clusters.iter().any(|c| c.id == id)
    }

    /// Short random base-36 fragment, unique across nodes, links, and
    /// clusters at the time of the call.
    pub(crate) fn fresh_id(&self) -> String {
        loop {
            let id = base36_fragment(ID_FRAGMENT_LEN);
            if !self.id_in_use(&id) {
                return id;
            }
        }
    }

    /// Appends a new node with a fresh id and level-dependent defaults.
    /// Always succeeds; returns the new node's id.
    pub fn add_node(&mut self, level: NodeHierarchy) -> String {
        let id = self.fresh_id();
        self.nodes.push(Node {
            id: id.clone(),
            label: self.config.new_node_label.clone(),
            dimension: Some(self.config.dimension_for(level)),
            position: None,
            data: Some(NodeData {
                level: Some(level),
                custom_color: Some(self.config.node_color.clone()),
                stroke: Some(UNSELECTED_STROKE.to_string()),
                ..NodeData::default()
            }),
        });
        self.notify(ModelChange::Nodes);
        id
    }

    /// Appends a new edge with a fresh id and the placeholder label. The
    /// caller is expected to open label entry afterwards; the edge is already
    /// committed to the model.
    pub fn create_link(&mut self, source: &str, target: &str) -> String {
        let id = self.fresh_id();
        self.links.push(Edge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            label: self.config.new_edge_label.clone(),
            data: None,
        });
        self.notify(ModelChange::Links);
        id
    }

    /// Sets the label of the collection entry matching `element`'s id. A
    /// missing id is a no-op.
    pub fn rename_label(&mut self, new_label: &str, element: &GraphElement) {
        let change = match element {
            GraphElement::Node(n) => {
                let Some(node) = self.nodes.iter_mut().find(|x| x.id == n.id) else {
                    tracing::debug!(id = %n.id, "rename target node not found");
                    return;
                };
                node.label = new_label.to_string();
                ModelChange::Nodes
            }
            GraphElement::Edge(e) => {
                let Some(edge) = self.links.iter_mut().find(|x| x.id == e.id) else {
                    tracing::debug!(id = %e.id, "rename target edge not found");
                    return;
                };
                edge.label = new_label.to_string();
                ModelChange::Links
            }
            GraphElement::Cluster(c) => {
                let Some(cluster) = self.clusters.iter_mut().find(|x| x.id == c.id) else {
                    tracing::debug!(id = %c.id, "rename target cluster not found");
                    return;
                };
                cluster.label = new_label.to_string();
                ModelChange::Clusters
            }
        };
        self.notify(change);
    }

    /// Removes `element` from its own collection. Removing a node cascades to
    /// its incident edges; removing an edge or cluster never cascades.
    ///
    /// With `remove_all_selected` set and a node element, every node in the
    /// selection set is removed (with cascades) instead, the selection is
    /// cleared, and remaining edge highlights are reset. Single-element
    /// removal leaves selection and highlights untouched.
    pub fn remove_element(&mut self, element: &GraphElement, remove_all_selected: bool) {
        if remove_all_selected && matches!(element, GraphElement::Node(_)) {
            self.remove_selected_nodes();
            return;
        }
        match element {
            GraphElement::Node(n) => {
                let before = self.nodes.len();
                self.nodes.retain(|x| x.id != n.id);
                if self.nodes.len() == before {
                    tracing::debug!(id = %n.id, "remove target node not found");
                    return;
                }
                self.links.retain(|e| e.source != n.id && e.target != n.id);
                self.notify(ModelChange::Nodes);
            }
            GraphElement::Edge(e) => {
                let before = self.links.len();
                self.links.retain(|x| x.id != e.id);
                if self.links.len() == before {
                    tracing::debug!(id = %e.id, "remove target edge not found");
                    return;
                }
                self.notify(ModelChange::Links);
            }
            GraphElement::Cluster(c) => {
                let before = self.clusters.len();
                self.clusters.retain(|x| x.id != c.id);
                if self.clusters.len() == before {
                    tracing::debug!(id = %c.id, "remove target cluster not found");
                    return;
                }
                self.notify(ModelChange::Clusters);
            }
        }
    }

    fn remove_selected_nodes(&mut self) {
        let selected = std::mem::take(&mut self.selection);
        for id in &selected {
            self.nodes.retain(|n| n.id != *id);
            self.links.retain(|e| e.source != *id && e.target != *id);
        }
        for edge in &mut self.links {
            edge.set_class("");
        }
        self.notify(ModelChange::Document);
    }

    /// Strips the node from every cluster's member list. Idempotent.
    pub fn remove_from_cluster(&mut self, node_id: &str) {
        strip_from_clusters(&mut self.clusters, node_id);
        self.notify(ModelChange::Clusters);
    }

    pub fn is_in_cluster(&self, node_id: &str) -> bool {
        self.clusters.iter().any(|c| c.contains(node_id))
    }

    pub fn cluster_of(&self, node_id: &str) -> Option<&ClusterNode> {
        self.clusters.iter().find(|c| c.contains(node_id))
    }

    /// Clusters the current selection.
    ///
    /// With a target cluster id the selected nodes are moved into it; without
    /// one a new cluster is created around them. Either way each node is
    /// first stripped from whatever cluster held it, selection marks and edge
    /// highlights are cleared, and the affected cluster's id is returned.
    /// An empty selection is a user-facing error and mutates nothing.
    pub fn create_cluster(&mut self, existing: Option<&str>) -> Result<String> {
        if let (Some(cluster_id), false) = (existing, self.selection.is_empty()) {
            let cluster_id = cluster_id.to_string();
            let selected = std::mem::take(&mut self.selection);
            for node_id in &selected {
                strip_from_clusters(&mut self.clusters, node_id);
                match self.clusters.iter_mut().find(|c| c.id == cluster_id) {
                    Some(cluster) => cluster.child_node_ids.push(node_id.clone()),
                    None => {
                        tracing::debug!(id = %cluster_id, "target cluster not found");
                    }
                }
            }
            self.clear_selection_marks(&selected);
            self.reset_edge_highlights();
            self.notify(ModelChange::Clusters);
            Ok(cluster_id)
        } else if !self.selection.is_empty() {
            let id = self.fresh_id();
            let selected = std::mem::take(&mut self.selection);
            for node_id in &selected {
                strip_from_clusters(&mut self.clusters, node_id);
            }
            self.clusters.push(ClusterNode {
                id: id.clone(),
                label: format!("Cluster {id}"),
                child_node_ids: selected.clone(),
                data: Some(ClusterData {
                    custom_color: Some(self.config.node_color.clone()),
                    ..ClusterData::default()
                }),
            });
            self.clear_selection_marks(&selected);
            self.reset_edge_highlights();
            self.notify(ModelChange::Clusters);
            Ok(id)
        } else {
            Err(Error::EmptySelection)
        }
    }

    /// Moves a node into the given cluster, stripping it from any other
    /// cluster first. Adding a node to a cluster it is already in is a no-op
    /// for that cluster's member list.
    pub fn move_to_cluster(&mut self, node_id: &str, cluster_id: &str) {
        for cluster in &mut self.clusters {
            if cluster.id != cluster_id {
                cluster.child_node_ids.retain(|id| id != node_id);
            }
        }
        match self.clusters.iter_mut().find(|c| c.id == cluster_id) {
            Some(cluster) => {
                if !cluster.contains(node_id) {
                    cluster.child_node_ids.push(node_id.to_string());
                }
            }
            None => {
                tracing::debug!(id = %cluster_id, "drop target cluster not found");
            }
        }
        self.notify(ModelChange::Clusters);
    }

    /// Creates a new two-member cluster from a node dropped onto another.
    /// Both participants are stripped from any prior cluster first.
    pub fn cluster_pair(&mut self, node_id: &str, other_id: &str) -> String {
        strip_from_clusters(&mut self.clusters, node_id);
        strip_from_clusters(&mut self.clusters, other_id);
        let id = self.fresh_id();
        self.clusters.push(ClusterNode {
            id: id.clone(),
            label: format!("Cluster {id}"),
            child_node_ids: vec![node_id.to_string(), other_id.to_string()],
            data: Some(ClusterData {
                custom_color: Some(self.config.node_color.clone()),
                ..ClusterData::default()
            }),
        });
        self.notify(ModelChange::Clusters);
        id
    }

    /// Ctrl+click selection toggle. Selecting marks the node's stroke and
    /// highlights edges sourced from it; deselecting reverses both.
    pub fn toggle_select(&mut self, node_id: &str) {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) else {
            tracing::debug!(id = %node_id, "toggle-select target not found");
            return;
        };
        if node.is_selected() {
            node.set_selected(false);
            self.selection.retain(|id| id != node_id);
            set_class_on_edges_from(&mut self.links, node_id, "");
        } else {
            node.set_selected(true);
            self.selection.push(node_id.to_string());
            set_class_on_edges_from(&mut self.links, node_id, HIGHLIGHT_CLASS);
        }
        self.notify(ModelChange::Selection);
    }

    /// Empties nodes, links, and clusters, along with the transient
    /// selection.
    pub fn clear_mind_map(&mut self) {
        self.nodes.clear();
        self.links.clear();
        self.clusters.clear();
        self.selection.clear();
        self.notify(ModelChange::Document);
    }

    /// Appends a note stamped with the current local time.
    pub fn add_note(&mut self, text: impl Into<String>) {
        self.notes.push(Note::dated_now(text));
        self.notify(ModelChange::Notes);
    }

    fn clear_selection_marks(&mut self, ids: &[String]) {
        for id in ids {
            if let Some(node) = self.nodes.iter_mut().find(|n| n.id == *id) {
                node.set_selected(false);
            }
        }
    }

    fn reset_edge_highlights(&mut self) {
        for edge in &mut self.links {
            edge.set_class("");
        }
    }
}

fn strip_from_clusters(clusters: &mut [ClusterNode], node_id: &str) {
    for cluster in clusters {
        cluster.child_node_ids.retain(|id| id != node_id);
    }
}

fn set_class_on_edges_from(links: &mut [Edge], source_id: &str, class: &str) {
    for edge in links.iter_mut().filter(|e| e.source == source_id) {
        edge.set_class(class);
    }
}

fn base36_fragment(len: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut value = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        out.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    out
}
