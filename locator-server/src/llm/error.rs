//! LLM client error types.

/// Errors from the chat-completions HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API key rejected
    #[error("unauthorized: check LLM_API_KEY")]
    Unauthorized,

    /// Rate limited by the provider
    #[error("rate limited by LLM provider")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Model returned no content
    #[error("model returned an empty reply")]
    EmptyReply,

    /// API key contains characters not allowed in a header
    #[error("invalid API key format")]
    InvalidApiKey,
}
