//! Address autocomplete.
//!
//! Suggestions are a convenience: the HTTP layer turns any failure here into
//! an empty list, so a flaky backend never blocks a search.

mod llm;

use futures::future::BoxFuture;

use crate::llm::LlmError;

pub use llm::{LlmSuggester, parse_suggestions_reply};

/// Most suggestions returned for one partial address.
pub const MAX_SUGGESTIONS: usize = 5;

/// Partial inputs shorter than this (in characters, after trimming) get no
/// suggestions and never reach a backend.
pub const MIN_PARTIAL_CHARS: usize = 2;

/// Errors from a suggestion backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestError {
    /// Backend could not be reached or refused the request
    #[error("suggestion service unavailable: {message}")]
    Unavailable { message: String },

    /// Backend reply did not match the expected schema
    #[error("malformed suggestion response: {message}")]
    Malformed { message: String },

    /// No backend configured
    #[error("no suggestion backend configured")]
    NotConfigured,
}

impl From<LlmError> for SuggestError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Json { .. } | LlmError::EmptyReply => SuggestError::Malformed {
                message: err.to_string(),
            },
            _ => SuggestError::Unavailable {
                message: err.to_string(),
            },
        }
    }
}

/// A backend producing full-address completions for partial input.
pub trait AddressSuggester: Send + Sync {
    fn suggest<'a>(
        &'a self,
        partial: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, SuggestError>>;
}

impl<T: AddressSuggester + ?Sized> AddressSuggester for std::sync::Arc<T> {
    fn suggest<'a>(
        &'a self,
        partial: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, SuggestError>> {
        (**self).suggest(partial)
    }
}

/// Suggest up to [`MAX_SUGGESTIONS`] addresses completing `partial`.
///
/// Short input short-circuits to an empty list. Backend output is trimmed,
/// blank entries dropped, and duplicates removed keeping first occurrence.
pub async fn suggest_addresses<S: AddressSuggester + ?Sized>(
    suggester: &S,
    partial: &str,
) -> Result<Vec<String>, SuggestError> {
    let partial = partial.trim();
    if partial.chars().count() < MIN_PARTIAL_CHARS {
        return Ok(Vec::new());
    }

    let raw = suggester.suggest(partial).await?;

    let mut suggestions: Vec<String> = Vec::with_capacity(raw.len().min(MAX_SUGGESTIONS));
    for s in raw {
        let s = s.trim();
        if s.is_empty() || suggestions.iter().any(|existing| existing == s) {
            continue;
        }
        suggestions.push(s.to_string());
        if suggestions.len() == MAX_SUGGESTIONS {
            break;
        }
    }

    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed list and counts calls.
    struct Fixed {
        reply: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(reply: Vec<&'static str>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl AddressSuggester for Fixed {
        fn suggest<'a>(
            &'a self,
            _partial: &'a str,
        ) -> BoxFuture<'a, Result<Vec<String>, SuggestError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply: Vec<String> = self.reply.iter().map(|s| s.to_string()).collect();
            Box::pin(async move { Ok(reply) })
        }
    }

    #[tokio::test]
    async fn short_input_skips_backend() {
        let backend = Fixed::new(vec!["anything"]);
        assert!(suggest_addresses(&backend, "").await.unwrap().is_empty());
        assert!(suggest_addresses(&backend, " a ").await.unwrap().is_empty());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn two_cjk_characters_are_enough() {
        let backend = Fixed::new(vec!["武汉市江汉区"]);
        let found = suggest_addresses(&backend, "武汉").await.unwrap();
        assert_eq!(found, vec!["武汉市江汉区".to_string()]);
    }

    #[tokio::test]
    async fn cleans_backend_output() {
        let backend = Fixed::new(vec![" 1 Main St ", "", "1 Main St", "2 Main St", "   "]);
        let found = suggest_addresses(&backend, "Main").await.unwrap();
        assert_eq!(found, vec!["1 Main St".to_string(), "2 Main St".to_string()]);
    }

    #[tokio::test]
    async fn caps_at_five() {
        let backend = Fixed::new(vec!["a1", "a2", "a3", "a4", "a5", "a6", "a7"]);
        let found = suggest_addresses(&backend, "a street").await.unwrap();
        assert_eq!(found.len(), MAX_SUGGESTIONS);
        assert_eq!(found[4], "a5");
    }

    #[test]
    fn llm_errors_map_to_suggest_errors() {
        let err: SuggestError = LlmError::EmptyReply.into();
        assert!(matches!(err, SuggestError::Malformed { .. }));

        let err: SuggestError = LlmError::Unauthorized.into();
        assert!(matches!(err, SuggestError::Unavailable { .. }));
    }
}
