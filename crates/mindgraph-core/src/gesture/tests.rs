use super::*;
use crate::element::{ClusterNode, Dimension, Node};
use crate::graph::MindGraph;

fn viewport(pan_x: f64, pan_y: f64, zoom: f64) -> Viewport {
    Viewport {
        pan_offset_x: pan_x,
        pan_offset_y: pan_y,
        zoom_level: zoom,
    }
}

fn placed_node(id: &str, x: f64, y: f64, width: f64) -> Node {
    Node {
        id: id.to_string(),
        label: id.to_string(),
        dimension: Some(Dimension {
            width,
            height: 100.0,
        }),
        position: Some(Position { x, y }),
        data: None,
    }
}

fn graph_with_nodes(ids: &[&str]) -> MindGraph {
    let mut graph = MindGraph::default();
    let mut doc = graph.to_document();
    doc.nodes = ids
        .iter()
        .map(|id| Node {
            id: id.to_string(),
            label: id.to_string(),
            dimension: None,
            position: None,
            data: None,
        })
        .collect();
    graph.apply_document(doc);
    graph
}

#[test]
fn viewport_converts_screen_to_graph_coordinates() {
    let vp = viewport(10.0, 20.0, 2.0);
    let point = vp.to_graph(Position { x: 110.0, y: 120.0 });
    assert_eq!(point, Position { x: 50.0, y: 50.0 });
}

#[test]
fn begin_link_drag_anchors_at_the_node_top_center() {
    let mut graph = MindGraph::default();
    let mut doc = graph.to_document();
    doc.nodes = vec![placed_node("a", 40.0, 60.0, 100.0)];
    graph.apply_document(doc);

    let mut gesture = DragGesture::new();
    gesture.begin_link_drag(&graph, "a", Position { x: 0.0, y: 0.0 }, viewport(0.0, 0.0, 1.0));

    let (_, current) = gesture.link_preview().unwrap();
    assert_eq!(current, Position { x: 90.0, y: 60.0 });
    assert!(!gesture.node_dragging_enabled());
}

#[test]
fn begin_link_drag_falls_back_to_the_pointer_when_geometry_is_unknown() {
    let graph = graph_with_nodes(&["a"]);
    let mut gesture = DragGesture::new();
    gesture.begin_link_drag(
        &graph,
        "a",
        Position { x: 30.0, y: 40.0 },
        viewport(10.0, 0.0, 2.0),
    );

    let (start, current) = gesture.link_preview().unwrap();
    assert_eq!(start, Position { x: 10.0, y: 20.0 });
    assert_eq!(current, start);
}

#[test]
fn pointer_movement_is_scaled_by_the_zoom_level() {
    let graph = graph_with_nodes(&["a"]);
    let mut gesture = DragGesture::new();
    gesture.begin_link_drag(&graph, "a", Position::default(), viewport(0.0, 0.0, 2.0));

    gesture.pointer_moved(Position { x: 8.0, y: -4.0 }, viewport(0.0, 0.0, 2.0));

    let (_, current) = gesture.link_preview().unwrap();
    assert_eq!(current, Position { x: 4.0, y: -2.0 });
}

#[test]
fn pointer_movement_while_idle_is_ignored() {
    let mut gesture = DragGesture::new();
    gesture.pointer_moved(Position { x: 5.0, y: 5.0 }, viewport(0.0, 0.0, 1.0));
    assert_eq!(gesture.state(), &DragState::Idle);
}

#[test]
fn releasing_on_another_handle_creates_a_labeled_placeholder_edge() {
    let mut graph = graph_with_nodes(&["a", "b"]);
    let mut gesture = DragGesture::new();
    gesture.begin_link_drag(&graph, "a", Position::default(), viewport(0.0, 0.0, 1.0));

    let outcome = gesture.end_link_drag(&mut graph, Some("b"));

    let LinkDrop::Created { edge_id } = outcome else {
        panic!("expected a created edge");
    };
    let edge = graph.link(&edge_id).unwrap();
    assert_eq!(edge.source, "a");
    assert_eq!(edge.target, "b");
    assert_eq!(edge.label, "edge");
    assert_eq!(gesture.state(), &DragState::Idle);
    assert!(gesture.node_dragging_enabled());
}

#[test]
fn releasing_off_any_handle_discards_the_gesture() {
    let mut graph = graph_with_nodes(&["a"]);
    let mut gesture = DragGesture::new();
    gesture.begin_link_drag(&graph, "a", Position::default(), viewport(0.0, 0.0, 1.0));

    assert_eq!(gesture.end_link_drag(&mut graph, None), LinkDrop::Discarded);
    assert!(graph.links().is_empty());
}

#[test]
fn releasing_on_the_source_handle_discards_the_gesture() {
    let mut graph = graph_with_nodes(&["a"]);
    let mut gesture = DragGesture::new();
    gesture.begin_link_drag(&graph, "a", Position::default(), viewport(0.0, 0.0, 1.0));

    assert_eq!(
        gesture.end_link_drag(&mut graph, Some("a")),
        LinkDrop::Discarded
    );
    assert!(graph.links().is_empty());
}

#[test]
fn end_link_drag_without_a_link_drag_is_a_no_op() {
    let mut graph = graph_with_nodes(&["a", "b"]);
    let mut gesture = DragGesture::new();
    gesture.begin_node_drag("a");

    assert_eq!(
        gesture.end_link_drag(&mut graph, Some("b")),
        LinkDrop::Discarded
    );
    assert_eq!(
        gesture.state(),
        &DragState::DraggingNode {
            node: "a".to_string()
        }
    );
}

#[test]
fn node_release_over_a_cluster_transfers_membership() {
    let mut graph = graph_with_nodes(&["a"]);
    let mut doc = graph.to_document();
    doc.clusters = Some(vec![
        ClusterNode {
            id: "c1".to_string(),
            label: "C1".to_string(),
            child_node_ids: vec!["a".to_string()],
            data: None,
        },
        ClusterNode {
            id: "c2".to_string(),
            label: "C2".to_string(),
            child_node_ids: Vec::new(),
            data: None,
        },
    ]);
    graph.apply_document(doc);

    let mut gesture = DragGesture::new();
    gesture.begin_node_drag("a");
    gesture.end_node_drag(&mut graph, "a", DropTarget::Cluster("c2"));

    assert!(!graph.cluster("c1").unwrap().contains("a"));
    assert_eq!(graph.cluster("c2").unwrap().child_node_ids, ["a"]);
}

#[test]
fn node_release_over_its_own_cluster_changes_nothing() {
    let mut graph = graph_with_nodes(&["a"]);
    let mut doc = graph.to_document();
    doc.clusters = Some(vec![ClusterNode {
        id: "c1".to_string(),
        label: "C1".to_string(),
        child_node_ids: vec!["a".to_string()],
        data: None,
    }]);
    graph.apply_document(doc);
    let before = graph.clusters().to_vec();

    let mut gesture = DragGesture::new();
    gesture.begin_node_drag("a");
    gesture.end_node_drag(&mut graph, "a", DropTarget::Cluster("c1"));

    assert_eq!(graph.clusters(), &before[..]);
}

#[test]
fn node_release_over_another_node_forms_a_pair_cluster() {
    let mut graph = graph_with_nodes(&["a", "b"]);
    let mut gesture = DragGesture::new();
    gesture.begin_node_drag("a");
    gesture.end_node_drag(&mut graph, "a", DropTarget::Node("b"));

    assert_eq!(graph.clusters().len(), 1);
    let created = &graph.clusters()[0];
    assert_eq!(created.child_node_ids, ["a", "b"]);
    assert_eq!(created.label, format!("Cluster {}", created.id));
}

#[test]
fn node_release_on_empty_canvas_detaches_from_clustering() {
    let mut graph = graph_with_nodes(&["a"]);
    let mut doc = graph.to_document();
    doc.clusters = Some(vec![ClusterNode {
        id: "c1".to_string(),
        label: "C1".to_string(),
        child_node_ids: vec!["a".to_string()],
        data: None,
    }]);
    graph.apply_document(doc);

    let mut gesture = DragGesture::new();
    gesture.begin_node_drag("a");
    gesture.end_node_drag(&mut graph, "a", DropTarget::Canvas);

    assert!(!graph.is_in_cluster("a"));

    // dropping again in the same spot is idempotent
    gesture.begin_node_drag("a");
    gesture.end_node_drag(&mut graph, "a", DropTarget::Canvas);
    assert!(!graph.is_in_cluster("a"));
}

#[test]
fn node_release_is_ignored_while_a_link_drag_is_in_flight() {
    let mut graph = graph_with_nodes(&["a", "b"]);
    let mut gesture = DragGesture::new();
    gesture.begin_link_drag(&graph, "a", Position::default(), viewport(0.0, 0.0, 1.0));

    gesture.end_node_drag(&mut graph, "a", DropTarget::Node("b"));

    assert!(graph.clusters().is_empty());
    assert!(gesture.is_dragging_link());
}

#[test]
fn body_press_cancels_a_link_drag_in_flight() {
    let graph = graph_with_nodes(&["a"]);
    let mut gesture = DragGesture::new();
    gesture.begin_link_drag(&graph, "a", Position::default(), viewport(0.0, 0.0, 1.0));

    gesture.begin_node_drag("a");

    assert!(!gesture.is_dragging_link());
    assert!(gesture.node_dragging_enabled());
}

#[test]
fn cancel_returns_to_idle_without_mutation() {
    let graph = graph_with_nodes(&["a"]);
    let mut gesture = DragGesture::new();
    gesture.begin_link_drag(&graph, "a", Position::default(), viewport(0.0, 0.0, 1.0));

    gesture.cancel();

    assert_eq!(gesture.state(), &DragState::Idle);
    assert!(graph.links().is_empty());
}
