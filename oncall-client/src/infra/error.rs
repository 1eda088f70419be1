//! Error type shared by the HTTP layer and the stores.

use oncall_model::ModelError;

/// Result type for client and store operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Client errors with enough context to build a user-facing notification
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unauthorized - check the configured API token")]
    Unauthorized,

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error("Invalid position {index} for a list of {len} channel filters")]
    InvalidPosition { index: usize, len: usize },

    #[error("Channel filter {id} is no longer at position {index}")]
    StalePosition { id: String, index: usize },

    #[error("Invalid model value: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        ClientError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// Short message suitable for the notification layer.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status { message, .. } if !message.is_empty() => message.clone(),
            ClientError::Transport { .. } => "Unable to reach the OnCall API".to_string(),
            other => other.to_string(),
        }
    }
}
