use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::NoteGraphError;

/// Largest page the notes listing endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NoteGraphConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub page_size: u32,
    pub max_pages: u32,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
    pub timeout_seconds: u64,
    /// Load every note individually to get its link lists.
    pub fetch_links: bool,
    pub detail_concurrency: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/v1".to_string(),
            api_token: None,
            page_size: MAX_PAGE_SIZE,
            max_pages: 1000,
            max_retries: 3,
            retry_delay_ms: 250,
            timeout_seconds: 30,
            fetch_links: true,
            detail_concurrency: 8,
        }
    }
}

impl SourceConfig {
    /// Token from config, falling back to `NOTEGRAPH_API_TOKEN`.
    pub fn resolved_token(&self) -> Option<String> {
        self.api_token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var("NOTEGRAPH_API_TOKEN").ok())
            .filter(|t| !t.is_empty())
    }
}

/// Geometry of the radial note layout, in abstract layout units.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub center_x: f64,
    pub center_y: f64,
    /// Radius of the most connected notes.
    pub inner_radius: f64,
    /// Added to `inner_radius` as connectivity drops towards one link.
    pub radial_span: f64,
    /// Start of the band holding notes without any links.
    pub outer_radius: f64,
    /// Width of the random offset applied inside the outer band.
    pub jitter: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_x: 400.0,
            center_y: 300.0,
            inner_radius: 150.0,
            radial_span: 150.0,
            outer_radius: 300.0,
            jitter: 100.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), NoteGraphError> {
        for (name, value) in [
            ("center_x", self.center_x),
            ("center_y", self.center_y),
        ] {
            if !value.is_finite() {
                return Err(NoteGraphError::InvalidConfig(format!(
                    "layout.{name} must be finite, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("inner_radius", self.inner_radius),
            ("radial_span", self.radial_span),
            ("outer_radius", self.outer_radius),
            ("jitter", self.jitter),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(NoteGraphError::InvalidConfig(format!(
                    "layout.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl NoteGraphConfig {
    /// Load from an optional TOML file layered with `NOTEGRAPH_*` env vars
    /// (e.g. `NOTEGRAPH_SOURCE__BASE_URL`).
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("NOTEGRAPH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), NoteGraphError> {
        if self.source.page_size == 0 {
            return Err(NoteGraphError::InvalidConfig(
                "source.page_size must be at least 1".to_string(),
            ));
        }
        if self.source.max_pages == 0 {
            return Err(NoteGraphError::InvalidConfig(
                "source.max_pages must be at least 1".to_string(),
            ));
        }
        self.layout.validate()
    }
}
