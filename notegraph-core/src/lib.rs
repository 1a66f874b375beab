pub mod config;
pub mod error;
pub mod filter;
pub mod layout;
pub mod models;
pub mod source;
pub mod stats;

pub use config::{LayoutConfig, NoteGraphConfig, SourceConfig};
pub use error::NoteGraphError;
pub use filter::NoteFilter;
pub use layout::{compute_layout, compute_layout_with, edge_id};
pub use models::{GraphEdge, GraphLayout, GraphNode, LayoutView, NoteLink, NoteRecord, Position};
pub use source::{HttpNotesSource, JsonFileSource, NotesSource};
pub use stats::GraphStats;
