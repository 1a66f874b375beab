use serde::{Deserialize, Serialize};

use super::note::NoteRecord;

/// Number of tags shown next to a node label.
pub const TAG_PREVIEW_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn distance_to(&self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A placed note. Borrows the note it was built from.
#[derive(Debug, Clone)]
pub struct GraphNode<'a> {
    pub id: String,
    pub position: Position,
    /// Distance from the layout center.
    pub radius: f64,
    pub connection_count: usize,
    pub note: &'a NoteRecord,
}

impl<'a> GraphNode<'a> {
    pub fn label(&self) -> &'a str {
        self.note.display_title()
    }

    pub fn tag_preview(&self) -> &'a [String] {
        let tags = &self.note.tags;
        &tags[..tags.len().min(TAG_PREVIEW_LEN)]
    }

    pub fn is_pinned(&self) -> bool {
        self.note.is_pinned
    }

    pub fn view(&self) -> NodeView {
        NodeView {
            id: self.id.clone(),
            label: self.label().to_string(),
            tags: self.tag_preview().to_vec(),
            pinned: self.is_pinned(),
            x: self.position.x,
            y: self.position.y,
            connection_count: self.connection_count,
        }
    }
}

/// Undirected connection between two notes. `id` does not depend on
/// endpoint order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default)]
pub struct GraphLayout<'a> {
    pub nodes: Vec<GraphNode<'a>>,
    pub edges: Vec<GraphEdge>,
}

impl<'a> GraphLayout<'a> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode<'a>> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn to_view(&self) -> LayoutView {
        LayoutView {
            nodes: self.nodes.iter().map(GraphNode::view).collect(),
            edges: self.edges.clone(),
        }
    }
}

/// Owned node as handed to the graph-drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: String,
    pub label: String,
    pub tags: Vec<String>,
    pub pinned: bool,
    pub x: f64,
    pub y: f64,
    pub connection_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<GraphEdge>,
}
