use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum CfError {
    /// An error occurred during an HTTP request (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server rejected the request parameters (HTTP 400).
    #[error("Bad request at {url}")]
    BadRequest {
        /// The URL that returned the error.
        url: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found at {url}")]
    NotFound {
        /// The URL that returned the error.
        url: String,
    },

    /// The server is throttling us (HTTP 429).
    #[error("Rate limited at {url}")]
    RateLimited {
        /// The URL that returned the error.
        url: String,
    },

    /// The server failed to handle the request (HTTP 5xx).
    #[error("Server error {status} at {url}")]
    ServerError {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The server returned any other unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The response envelope carried `success: false`.
    #[error("{endpoint} failed: {message}")]
    Api {
        /// Logical endpoint name (e.g. `news_latest`).
        endpoint: String,
        /// The server-supplied error message, if any.
        message: String,
    },

    /// The response envelope was successful but had no `data` member.
    #[error("{endpoint} returned no data")]
    MissingData {
        /// Logical endpoint name (e.g. `news_latest`).
        endpoint: String,
    },

    /// The response body was not valid JSON for the expected shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// Reading or writing persisted state failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures of the persisted key/value capability.
///
/// These never escape the stores or the cache: callers of those components see an empty or
/// default state instead, and the failure is logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The write would exceed the storage quota.
    #[error("quota exceeded writing {key}: needs {needed} bytes, limit is {limit}")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Total bytes the store would hold after the write.
        needed: usize,
        /// Configured byte limit.
        limit: usize,
    },
    /// The underlying medium failed.
    #[error("storage I/O failed: {0}")]
    Io(String),
    /// A persisted blob could not be decoded.
    #[error("corrupt value under {key}: {reason}")]
    Corrupt {
        /// Key holding the blob.
        key: String,
        /// Decoder message.
        reason: String,
    },
}

/// Coarse classification of a [`CfError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network unreachable, connection refused, or timed out.
    Transport,
    /// Non-2xx status or a `success: false` payload.
    Protocol,
    /// Malformed JSON or an unexpected response shape.
    Parse,
    /// Persisted read/write failure, including quota and corruption.
    Storage,
    /// Invalid client configuration (e.g. an unparsable base URL).
    Config,
}

impl CfError {
    /// Maps a non-success HTTP status to the matching variant.
    pub(crate) fn from_status(status: u16, url: impl Into<String>) -> Self {
        let url = url.into();
        match status {
            400 => Self::BadRequest { url },
            404 => Self::NotFound { url },
            429 => Self::RateLimited { url },
            500..=599 => Self::ServerError { status, url },
            _ => Self::Status { status, url },
        }
    }

    /// Classifies this error into the crate's error taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(e) if e.is_decode() => ErrorKind::Parse,
            Self::Http(_) => ErrorKind::Transport,
            Self::Url(_) => ErrorKind::Config,
            Self::BadRequest { .. }
            | Self::NotFound { .. }
            | Self::RateLimited { .. }
            | Self::ServerError { .. }
            | Self::Status { .. }
            | Self::Api { .. } => ErrorKind::Protocol,
            Self::MissingData { .. } | Self::Json(_) | Self::Data(_) => ErrorKind::Parse,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// The HTTP status behind this error, when there is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::ServerError { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// A short message suitable for showing to an end user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self.status() {
            Some(400) => "Invalid request. Please check your parameters.",
            Some(404) => "The requested news could not be found.",
            Some(429) => "Too many requests. Please wait a moment and try again.",
            Some(500) => "The news server encountered an error. Please try again later.",
            _ if self.kind() == ErrorKind::Transport => {
                "Unable to reach the server. Please check your connection."
            }
            _ => "An unexpected error occurred. Please try again.",
        }
    }
}
