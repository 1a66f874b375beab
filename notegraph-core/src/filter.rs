use crate::models::NoteRecord;

/// Which notes take part in the graph. Mirrors the query options of the
/// notes listing endpoint so the same selection applies to file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFilter {
    pub include_archived: bool,
    pub include_daily: bool,
    pub pinned_only: bool,
    pub tag: Option<String>,
}

impl Default for NoteFilter {
    fn default() -> Self {
        Self {
            include_archived: false,
            include_daily: true,
            pinned_only: false,
            tag: None,
        }
    }
}

impl NoteFilter {
    pub fn matches(&self, note: &NoteRecord) -> bool {
        if note.is_archived && !self.include_archived {
            return false;
        }
        if note.is_daily && !self.include_daily {
            return false;
        }
        if self.pinned_only && !note.is_pinned {
            return false;
        }
        match &self.tag {
            Some(tag) => note.tags.iter().any(|t| t == tag),
            None => true,
        }
    }

    pub fn apply(&self, notes: Vec<NoteRecord>) -> Vec<NoteRecord> {
        notes.into_iter().filter(|n| self.matches(n)).collect()
    }
}
