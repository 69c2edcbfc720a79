//! Error types for the relayer SDK

use thiserror::Error;

/// Errors raised by the relayer client and submission workflow
#[derive(Debug, Error)]
pub enum RelayerError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("relayer returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("relayer temporarily unavailable (HTTP {status})")]
    Transient { status: u16 },

    #[error("unexpected relayer response: {context}")]
    UnexpectedResponse { context: String },

    #[error("job did not reach {target} within {attempts} polls")]
    DeadlineExceeded { target: String, attempts: u32 },

    #[error("submission cancelled")]
    Cancelled,

    #[error("VK cache error: {0}")]
    Cache(String),

    #[error("verification key error: {0}")]
    Vk(#[from] ultraplonk_vk::VkError),
}

impl RelayerError {
    /// Transient failures are retried during polling; everything else
    /// aborts the workflow.
    pub fn is_transient(&self) -> bool {
        matches!(self, RelayerError::Transient { .. })
    }
}

pub type Result<T> = std::result::Result<T, RelayerError>;
