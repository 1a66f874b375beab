pub mod graph;
pub mod note;

pub use graph::{GraphEdge, GraphLayout, GraphNode, LayoutView, NodeView, Position};
pub use note::{NoteLink, NoteList, NoteRecord};
