use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP 403: Authentication error caused by API key \"{api_key}\"")]
    Authentication { api_key: String },

    #[error("HTTP 404: \"{0}\" is an unsupported/discontinued API method")]
    MethodUnavailable(String),

    #[error("HTTP 400: Insufficient arguments for \"{method}\". Parameters provided: {params}")]
    InsufficientArguments { method: String, params: String },

    #[error("HTTP 503: Timeout error")]
    Timeout,

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON parsing error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing key: {0}")]
    MissingKey(String),
}

/// Failures on the reference-data path. These never escape `sync`; they are
/// reported through [`crate::reference::SyncOutcome`] instead.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reference source unreachable: {0}")]
    Unreachable(String),

    #[error("Reference source returned HTTP {status} for {name}")]
    Status { status: u16, name: String },

    #[error("Invalid reference file name: {0:?}")]
    InvalidFileName(String),
}
