//! Error types for rolo-core.

use thiserror::Error;

/// Result type alias using rolo-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the sync layer.
///
/// The API client is the sole classifier of transport outcomes: every HTTP
/// response is mapped onto `Network`, `Unauthorized`, or `Api` before any
/// store sees it.
#[derive(Error, Debug)]
pub enum Error {
    // Transport errors
    #[error("网络请求失败: {0}")]
    Network(String),

    /// HTTP 401. The session has already been cleared by the time a caller
    /// observes this error.
    #[error("未授权，请重新登录")]
    Unauthorized,

    /// Any other non-2xx response, carrying the server's `detail` message
    /// when one was supplied.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx body that could not be decoded.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    // Local errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl Error {
    /// Build an `Api` error from a status code and the optional server
    /// `detail` field.
    pub fn api(status: u16, detail: Option<String>) -> Self {
        Self::Api {
            status,
            message: detail.unwrap_or_else(|| "请求失败".to_string()),
        }
    }

    /// True for errors produced by the 401 path.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}
