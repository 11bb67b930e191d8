//! Error types for the LitLens domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all LitLens operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Credential errors ---
    #[error("Please enter your OpenAI API key.")]
    MissingCredential,

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Input errors ---
    #[error("{0}")]
    InvalidInput(String),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error should be shown as a warning rather than a failure.
    ///
    /// Warnings are raised before any work starts (missing key, blank form
    /// fields); everything else is an upstream or internal failure.
    pub fn is_user_warning(&self) -> bool {
        matches!(self, Error::MissingCredential | Error::InvalidInput(_))
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error(
        "search limit reached after {rounds} rounds without an answer; please narrow the question and try again"
    )]
    RoundLimitReached { rounds: u32 },
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to parse {filename}: {reason}")]
    Unreadable { filename: String, reason: String },

    #[error("{filename} is not a PDF document")]
    NotPdf { filename: String },
}
