use serde::{Deserialize, Serialize};

/// Title shown for notes whose title is blank.
pub const UNTITLED: &str = "Untitled";

/// One end of a link between two notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteLink {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// A note as delivered by the notes API.
///
/// Accepts both the backend's snake_case field names and the camelCase
/// names used by the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "isPinned")]
    pub is_pinned: bool,
    #[serde(default, alias = "isArchived")]
    pub is_archived: bool,
    #[serde(default, alias = "isDaily")]
    pub is_daily: bool,
    #[serde(default, alias = "forwardLinks")]
    pub forward_links: Vec<NoteLink>,
    #[serde(
        default,
        rename = "backlinks",
        alias = "backLinks",
        alias = "back_links"
    )]
    pub back_links: Vec<NoteLink>,
}

impl NoteRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags: Vec::new(),
            is_pinned: false,
            is_archived: false,
            is_daily: false,
            forward_links: Vec::new(),
            back_links: Vec::new(),
        }
    }

    /// Raw link-list sizes; links to notes outside the collection still count.
    pub fn connection_count(&self) -> usize {
        self.forward_links.len() + self.back_links.len()
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }
}

/// One page of `GET /notes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteList {
    pub items: Vec<NoteRecord>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub has_more: bool,
}
