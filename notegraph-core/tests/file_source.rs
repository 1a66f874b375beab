//! End-to-end: JSON export on disk -> filtered notes -> layout view

use notegraph_core::{
    compute_layout_with, GraphStats, JsonFileSource, LayoutConfig, NoteFilter, NoteGraphError,
    NotesSource,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::io::Write;

fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

const EXPORT: &str = r#"[
    {"id": "n1", "title": "Graphs", "tags": ["cs", "math", "viz"], "isPinned": true,
     "forwardLinks": [{"id": "n2", "title": "Trees"}, {"id": "n4", "title": "Archived"}],
     "backLinks": [{"id": "n2", "title": "Trees"}]},
    {"id": "n2", "title": "Trees", "tags": ["cs"],
     "forwardLinks": [{"id": "n1", "title": "Graphs"}],
     "backLinks": [{"id": "n1", "title": "Graphs"}]},
    {"id": "n3", "title": "", "tags": []},
    {"id": "n4", "title": "Archived", "isArchived": true,
     "backLinks": [{"id": "n1", "title": "Graphs"}]}
]"#;

#[tokio::test]
async fn test_file_source_to_layout_view() {
    let fixture = write_fixture(EXPORT);
    let source = JsonFileSource::new(fixture.path());

    let notes = source
        .fetch_notes(&NoteFilter::default())
        .await
        .expect("export should load");
    assert_eq!(notes.len(), 3, "archived note filtered out");

    let layout = compute_layout_with(&notes, &LayoutConfig::default(), &mut StdRng::seed_from_u64(5));
    let view = layout.to_view();

    assert_eq!(view.nodes.len(), 3);
    // n1 <-> n2 collapses to a single edge; n1 -> n4 is dangling after filtering
    assert_eq!(view.edges.len(), 1);
    assert_eq!(view.edges[0].id, "2:n1--n2");

    let ids: HashSet<&str> = view
        .edges
        .iter()
        .flat_map(|e| [e.source.as_str(), e.target.as_str()])
        .collect();
    let node_ids: HashSet<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
    assert!(ids.is_subset(&node_ids));

    let n1 = view.nodes.iter().find(|n| n.id == "n1").unwrap();
    assert_eq!(n1.tags, vec!["cs".to_string(), "math".to_string()]);
    assert!(n1.pinned);
    assert_eq!(view.nodes[0].id, "n1", "most connected note placed first");

    let n3 = view.nodes.iter().find(|n| n.id == "n3").unwrap();
    assert_eq!(n3.label, "Untitled");

    let stats = GraphStats::collect(&notes, &layout);
    assert_eq!(stats.isolated, 1);
    assert_eq!(stats.dangling_links, 1);

    let json = serde_json::to_value(&view).expect("view serializes");
    assert!(json["nodes"][0]["x"].is_number());
    assert!(json["edges"][0]["source"].is_string());
}

#[tokio::test]
async fn test_file_source_missing_file() {
    let source = JsonFileSource::new("/nonexistent/notes-export.json");
    let result = source.fetch_notes(&NoteFilter::default()).await;
    assert!(matches!(result, Err(NoteGraphError::Io(_))));
}
