//! Note sources: where the layout's input collection comes from
//!
//! Provides a `NotesSource` trait with implementations for:
//! - **HTTP**: pages through the notebook REST API (`GET /notes`), then
//!   optionally loads each note (`GET /notes/{id}`) for its link lists
//! - **File**: a JSON export, either a bare array or a `NoteList` page

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;

use crate::config::{SourceConfig, MAX_PAGE_SIZE};
use crate::error::NoteGraphError;
use crate::filter::NoteFilter;
use crate::models::{NoteList, NoteRecord};

// ============================================================================
// NotesSource trait
// ============================================================================

/// Supplies the full note collection for one layout run.
#[async_trait]
pub trait NotesSource: Send + Sync {
    async fn fetch_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteRecord>, NoteGraphError>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

// ============================================================================
// HttpNotesSource
// ============================================================================

/// Reads notes from the notebook REST API (`{base_url}/notes`).
#[derive(Debug, Clone)]
pub struct HttpNotesSource {
    client: Client,
    config: SourceConfig,
    token: Option<String>,
}

impl HttpNotesSource {
    pub fn new(config: SourceConfig) -> Result<Self, NoteGraphError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        let token = config.resolved_token();

        Ok(Self {
            client,
            config,
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn page_size(&self) -> u32 {
        self.config.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    async fn with_retry<T, F, Fut>(&self, what: &str, op: F) -> Result<T, NoteGraphError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, NoteGraphError>>,
    {
        let retry_strategy = ExponentialBackoff::from_millis(self.config.retry_delay_ms.max(1))
            .max_delay(Duration::from_secs(10))
            .map(jitter)
            .take(self.config.max_retries);

        let result = RetryIf::start(retry_strategy, op, |e: &NoteGraphError| {
            let retry = e.is_transient();
            if retry {
                tracing::warn!(request = what, error = %e, "Notes API request failed, retrying");
            }
            retry
        })
        .await;

        match result {
            Ok(value) => Ok(value),
            Err(e) if e.is_transient() => {
                let attempts = self.config.max_retries + 1;
                tracing::error!(
                    request = what,
                    attempts = attempts,
                    error = %e,
                    "All notes API retry attempts failed"
                );
                Err(NoteGraphError::RetryExhausted {
                    attempts,
                    last: Box::new(e),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, NoteGraphError> {
        let mut request = self.client.get(self.url(path)).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Notes API error");
            return Err(NoteGraphError::Api {
                status: status.as_u16(),
                body,
            });
        }

        // Decode separately so a malformed body surfaces as `Json`, not `Http`
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// One page of the listing. `archived` selects archived notes only,
    /// as the listing endpoint does.
    pub async fn fetch_page(
        &self,
        page: u32,
        archived: bool,
        filter: &NoteFilter,
    ) -> Result<NoteList, NoteGraphError> {
        let mut query = vec![
            ("page", page.to_string()),
            ("page_size", self.page_size().to_string()),
            ("archived", archived.to_string()),
        ];
        if filter.pinned_only {
            query.push(("pinned_only", "true".to_string()));
        }
        if let Some(tag) = &filter.tag {
            query.push(("tag", tag.clone()));
        }

        self.with_retry("list_notes", || self.get_json("/notes", &query))
            .await
    }

    /// A single note with its link lists loaded.
    pub async fn fetch_note(&self, id: &str) -> Result<NoteRecord, NoteGraphError> {
        let path = format!("/notes/{id}");
        self.with_retry("get_note", || self.get_json(&path, &[])).await
    }

    async fn fetch_listing(
        &self,
        archived: bool,
        filter: &NoteFilter,
    ) -> Result<Vec<NoteRecord>, NoteGraphError> {
        let mut notes = Vec::new();
        let mut page = 1;

        loop {
            let listing = self.fetch_page(page, archived, filter).await?;
            tracing::debug!(
                page = page,
                count = listing.items.len(),
                total = listing.total,
                archived = archived,
                "Fetched notes page"
            );
            notes.extend(listing.items);

            if !listing.has_more {
                break;
            }
            if page >= self.config.max_pages {
                tracing::warn!(
                    max_pages = self.config.max_pages,
                    fetched = notes.len(),
                    "Stopped paging notes at max_pages, graph will be partial"
                );
                break;
            }
            page += 1;
        }

        Ok(notes)
    }
}

#[async_trait]
impl NotesSource for HttpNotesSource {
    async fn fetch_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteRecord>, NoteGraphError> {
        let mut notes = self.fetch_listing(false, filter).await?;
        if filter.include_archived {
            notes.extend(self.fetch_listing(true, filter).await?);
        }

        if self.config.fetch_links {
            let ids: Vec<String> = notes.iter().map(|n| n.id.clone()).collect();
            notes = stream::iter(ids)
                .map(|id| async move { self.fetch_note(&id).await })
                .buffered(self.config.detail_concurrency.max(1))
                .try_collect()
                .await?;
        }

        let notes = filter.apply(notes);
        tracing::info!(source = self.name(), count = notes.len(), "Loaded notes");
        Ok(notes)
    }

    fn name(&self) -> &str {
        "http"
    }
}

// ============================================================================
// JsonFileSource
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NotesFile {
    Notes(Vec<NoteRecord>),
    Page(NoteList),
}

/// Reads notes from a JSON export on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(contents: &str) -> Result<Vec<NoteRecord>, NoteGraphError> {
        let file: NotesFile = serde_json::from_str(contents)?;
        Ok(match file {
            NotesFile::Notes(notes) => notes,
            NotesFile::Page(page) => page.items,
        })
    }
}

#[async_trait]
impl NotesSource for JsonFileSource {
    async fn fetch_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteRecord>, NoteGraphError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let notes = filter.apply(Self::parse(&contents)?);
        tracing::info!(
            source = self.name(),
            path = %self.path.display(),
            count = notes.len(),
            "Loaded notes"
        );
        Ok(notes)
    }

    fn name(&self) -> &str {
        "file"
    }
}

// ============================================================================
// TESTS
// ============================================================================
