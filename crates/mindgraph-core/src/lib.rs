#![forbid(unsafe_code)]

//! Headless mind-map editor core.
//!
//! This crate owns the graph data model of a mind map (nodes, directed
//! labeled edges, clusters), the mutation operations that keep the three
//! collections mutually consistent, the drag-interaction state machines that
//! turn pointer gestures into model mutations, and the JSON document format
//! used for import/export.
//!
//! Rendering, layout, hit testing, and menus are external collaborators: a UI
//! embeds a [`MindGraph`], drives it through [`DragGesture`] and the mutation
//! methods, and redraws when the registered change listener fires.

pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod gesture;
pub mod graph;

pub use config::GraphConfig;
pub use document::{
    CurveStyle, DEFAULT_DOCUMENT_FILE_NAME, MindMapDocument, Orientation, demo_document,
    document_to_json, parse_document, read_document_file, write_document_file,
};
pub use element::{
    ClusterData, ClusterNode, Dimension, Edge, EdgeData, ElementKind, GraphElement, Node, NodeData,
    NodeHierarchy, Note, Position, classify_value,
};
pub use error::{Error, Result};
pub use gesture::{DragGesture, DragState, DropTarget, LinkDrop, Viewport};
pub use graph::{MindGraph, ModelChange};

#[cfg(test)]
mod tests;
