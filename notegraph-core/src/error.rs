use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteGraphError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Notes API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("All {attempts} retry attempts failed: {last}")]
    RetryExhausted {
        attempts: usize,
        #[source]
        last: Box<NoteGraphError>,
    },
}

impl NoteGraphError {
    /// Worth retrying: transport failures, 429 and 5xx responses.
    /// Malformed bodies and client errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            NoteGraphError::Http(e) => {
                !e.is_decode() && (e.is_connect() || e.is_timeout() || e.is_request() || e.is_body())
            }
            NoteGraphError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
