//! LLM-backed address suggestions.

use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::warn;

use super::{AddressSuggester, MAX_SUGGESTIONS, SuggestError};
use crate::llm::LlmClient;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SuggestionsReply {
    suggestions: Vec<String>,
}

/// Suggests plausible full addresses by prompting a chat-completions model.
#[derive(Debug, Clone)]
pub struct LlmSuggester {
    client: LlmClient,
    system_prompt: String,
}

impl LlmSuggester {
    /// `region` narrows suggestions to one country or city, e.g. "China".
    pub fn new(client: LlmClient, region: Option<&str>) -> Self {
        Self {
            client,
            system_prompt: system_prompt(region),
        }
    }

    async fn fetch(&self, partial: &str) -> Result<Vec<String>, SuggestError> {
        let content = self
            .client
            .complete_json(&self.system_prompt, partial)
            .await
            .map_err(|e| {
                warn!(error = %e, "suggestion request failed");
                SuggestError::from(e)
            })?;

        parse_suggestions_reply(&content)
    }
}

impl AddressSuggester for LlmSuggester {
    fn suggest<'a>(
        &'a self,
        partial: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, SuggestError>> {
        Box::pin(self.fetch(partial))
    }
}

fn system_prompt(region: Option<&str>) -> String {
    let scope = match region {
        Some(region) => format!(" located in {region}"),
        None => String::new(),
    };

    format!(
        "You are an address autocomplete service. The user message is a partial \
         address. Suggest up to {MAX_SUGGESTIONS} plausible, real-world full \
         addresses{scope} that complete it. Reply with a single JSON object of \
         the form {{\"suggestions\": [\"...\"]}} and nothing else."
    )
}

/// Validate the model's reply text against the suggestions schema.
///
/// More than [`MAX_SUGGESTIONS`] entries is a schema violation.
pub fn parse_suggestions_reply(content: &str) -> Result<Vec<String>, SuggestError> {
    let reply: SuggestionsReply =
        serde_json::from_str(content.trim()).map_err(|e| SuggestError::Malformed {
            message: e.to_string(),
        })?;

    if reply.suggestions.len() > MAX_SUGGESTIONS {
        return Err(SuggestError::Malformed {
            message: format!(
                "expected at most {MAX_SUGGESTIONS} suggestions, got {}",
                reply.suggestions.len()
            ),
        });
    }

    Ok(reply.suggestions)
}
