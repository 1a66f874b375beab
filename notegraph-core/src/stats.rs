use crate::models::{GraphLayout, NoteRecord};
use serde::Serialize;
use std::collections::HashSet;

/// Summary of a computed layout, for the calling layer to log or print.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    /// Notes with no forward or back links at all.
    pub isolated: usize,
    pub pinned: usize,
    pub max_connections: usize,
    /// Forward and back links naming a note outside the collection.
    pub dangling_links: usize,
}

impl GraphStats {
    pub fn collect(notes: &[NoteRecord], layout: &GraphLayout<'_>) -> Self {
        let dangling_links = dangling_link_ids(notes).len();

        Self {
            nodes: layout.nodes.len(),
            edges: layout.edges.len(),
            isolated: layout.nodes.iter().filter(|n| n.connection_count == 0).count(),
            pinned: layout.nodes.iter().filter(|n| n.is_pinned()).count(),
            max_connections: layout
                .nodes
                .iter()
                .map(|n| n.connection_count)
                .max()
                .unwrap_or(0),
            dangling_links,
        }
    }
}

/// Ids named by forward or back links that are not in `notes`, in link order.
pub fn dangling_link_ids(notes: &[NoteRecord]) -> Vec<&str> {
    let known: HashSet<&str> = notes.iter().map(|n| n.id.as_str()).collect();
    notes
        .iter()
        .flat_map(|n| n.forward_links.iter().chain(n.back_links.iter()))
        .map(|l| l.id.as_str())
        .filter(|id| !known.contains(id))
        .collect()
}
