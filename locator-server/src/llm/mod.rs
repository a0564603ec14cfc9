//! JSON-mode chat-completions client shared by the LLM geocoder and the
//! address suggester.

mod client;
mod error;
mod types;

pub use client::{LlmClient, LlmConfig};
pub use error::LlmError;
