use crate::element::{ClusterNode, Edge, ElementKind, GraphElement, Node, classify_value};
use serde_json::json;

#[test]
fn plain_object_classifies_as_node() {
    let value = json!({ "id": "a", "label": "A" });
    assert_eq!(classify_value(&value), ElementKind::Node);
}

#[test]
fn source_field_classifies_as_edge() {
    let value = json!({ "id": "e", "source": "a", "target": "b", "label": "" });
    assert_eq!(classify_value(&value), ElementKind::Edge);
}

#[test]
fn child_node_ids_classifies_as_cluster() {
    let value = json!({ "id": "c", "label": "C", "childNodeIds": ["a"] });
    assert_eq!(classify_value(&value), ElementKind::Cluster);
}

#[test]
fn source_wins_over_child_node_ids() {
    // A value carrying both fields is ambiguous by shape; the guard order
    // resolves it as an edge.
    let value = json!({ "id": "x", "source": "a", "childNodeIds": ["a"] });
    assert_eq!(classify_value(&value), ElementKind::Edge);
}

#[test]
fn null_fields_count_as_absent() {
    let value = json!({ "id": "a", "source": null, "childNodeIds": null });
    assert_eq!(classify_value(&value), ElementKind::Node);
}

#[test]
fn typed_elements_carry_their_kind() {
    let node = GraphElement::Node(Node {
        id: "a".to_string(),
        label: "A".to_string(),
        dimension: None,
        position: None,
        data: None,
    });
    let edge = GraphElement::Edge(Edge {
        id: "e".to_string(),
        source: "a".to_string(),
        target: "a".to_string(),
        label: String::new(),
        data: None,
    });
    let cluster = GraphElement::Cluster(ClusterNode {
        id: "c".to_string(),
        label: "C".to_string(),
        child_node_ids: Vec::new(),
        data: None,
    });

    assert_eq!(node.kind(), ElementKind::Node);
    assert_eq!(edge.kind(), ElementKind::Edge);
    assert_eq!(cluster.kind(), ElementKind::Cluster);
    assert_eq!(edge.id(), "e");
    assert_eq!(cluster.label(), "C");
}

#[test]
fn typed_and_untyped_classification_agree_on_serialized_elements() {
    let edge = Edge {
        id: "e".to_string(),
        source: "a".to_string(),
        target: "b".to_string(),
        label: String::new(),
        data: None,
    };
    let value = serde_json::to_value(&edge).unwrap();
    assert_eq!(classify_value(&value), GraphElement::Edge(edge).kind());
}
