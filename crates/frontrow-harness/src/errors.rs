use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] crate::validation::ValidationError),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not connect to {url}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Expected status {expected}, got {actual}")]
    UnexpectedStatus {
        expected: StatusCode,
        actual: StatusCode,
    },

    #[error("Response did not contain a task_id")]
    MissingTaskId,
}

impl HarnessError {
    pub fn from_request(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            HarnessError::Timeout { url, source }
        } else if source.is_connect() {
            HarnessError::Connect { url, source }
        } else {
            HarnessError::Transport { url, source }
        }
    }

    /// Failures where no usable response came back from the backend.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            HarnessError::Timeout { .. }
                | HarnessError::Connect { .. }
                | HarnessError::Transport { .. }
        )
    }
}
