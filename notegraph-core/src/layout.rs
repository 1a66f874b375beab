//! Radial layout of the note-link graph
//!
//! Notes are spread around a common center on equal angular slices:
//! - Placement order = notes sorted by connection count, most connected first
//! - Radius = shrinks towards `inner_radius` as a note's share of the
//!   maximum connection count grows
//! - Notes without links = pushed to a jittered outer band
//!
//! Edges are emitted once per unordered pair of notes that forward-link,
//! skipping links whose target is not in the collection.

use crate::config::LayoutConfig;
use crate::models::{GraphEdge, GraphLayout, GraphNode, NoteRecord, Position};
use rand::Rng;
use std::collections::HashSet;
use std::f64::consts::PI;

/// Joins the two endpoint ids of an edge id.
pub const EDGE_ID_SEPARATOR: &str = "--";

/// Marks the end of the length prefix of an edge id.
pub const EDGE_ID_LEN_MARKER: char = ':';

/// Lay out `notes` with the default geometry and the thread-local RNG.
pub fn compute_layout(notes: &[NoteRecord]) -> GraphLayout<'_> {
    compute_layout_with(notes, &LayoutConfig::default(), &mut rand::thread_rng())
}

/// Core layout algorithm
///
/// # Arguments
/// * `notes` - Full note collection; never mutated
/// * `config` - Layout geometry (center, radii, jitter width)
/// * `rng` - Source for the outer-band jitter of unconnected notes
///
/// # Returns
/// * `GraphLayout` - One node per note in placement order, plus deduplicated edges
pub fn compute_layout_with<'a, R: Rng + ?Sized>(
    notes: &'a [NoteRecord],
    config: &LayoutConfig,
    rng: &mut R,
) -> GraphLayout<'a> {
    if notes.is_empty() {
        return GraphLayout::default();
    }

    let center = Position {
        x: config.center_x,
        y: config.center_y,
    };

    // Stable sort keeps input order among equally connected notes
    let mut ordered: Vec<(&NoteRecord, usize)> =
        notes.iter().map(|n| (n, n.connection_count())).collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1));

    let max_connections = ordered.first().map(|&(_, c)| c).unwrap_or(0).max(1);
    let total = ordered.len();

    let nodes = ordered
        .into_iter()
        .enumerate()
        .map(|(i, (note, connections))| {
            let (position, radius) = if total == 1 {
                (center, 0.0)
            } else {
                let angle = 2.0 * PI * i as f64 / total as f64;
                let radius = node_radius(connections, max_connections, config, rng);
                (
                    Position {
                        x: center.x + radius * angle.cos(),
                        y: center.y + radius * angle.sin(),
                    },
                    radius,
                )
            };

            GraphNode {
                id: note.id.clone(),
                position,
                radius,
                connection_count: connections,
                note,
            }
        })
        .collect();

    GraphLayout {
        nodes,
        edges: build_edges(notes),
    }
}

/// Distance from the center for a note with `connections` links.
pub fn node_radius<R: Rng + ?Sized>(
    connections: usize,
    max_connections: usize,
    config: &LayoutConfig,
    rng: &mut R,
) -> f64 {
    if connections == 0 {
        let offset = if config.jitter > 0.0 && config.jitter.is_finite() {
            rng.gen_range(0.0..config.jitter)
        } else {
            0.0
        };
        return config.outer_radius + offset;
    }

    let share = connections as f64 / max_connections.max(1) as f64;
    config.inner_radius + config.radial_span * (1.0 - share)
}

/// Order-independent id for the edge between `a` and `b`.
///
/// Shaped `{len(lo)}:{lo}--{hi}`; the length prefix keeps ids unique even
/// when note ids contain the separator.
pub fn edge_id(a: &str, b: &str) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    format!("{}{EDGE_ID_LEN_MARKER}{lo}{EDGE_ID_SEPARATOR}{hi}", lo.len())
}

/// One edge per unordered pair joined by at least one resolvable forward link.
pub fn build_edges(notes: &[NoteRecord]) -> Vec<GraphEdge> {
    let known: HashSet<&str> = notes.iter().map(|n| n.id.as_str()).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut edges = Vec::new();

    for note in notes {
        for link in &note.forward_links {
            if !known.contains(link.id.as_str()) {
                continue;
            }

            let id = edge_id(&note.id, &link.id);
            if seen.insert(id.clone()) {
                edges.push(GraphEdge {
                    id,
                    source: note.id.clone(),
                    target: link.id.clone(),
                });
            }
        }
    }

    edges
}

// ============================================================================
// TESTS
// ============================================================================
