//! Model fallback: few-shot completion against a hosted LLM
//!
//! Builds the query context from the example store, posts it as
//! `{"inputs": ...}`, and runs the extractor over the generated text.
//! Extraction failures make the source unusable rather than fatal; the
//! resolver reports no-answer if nothing else is left to try.

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ModelConfig;
use crate::extract;
use crate::prompt;
use crate::sources::{Answer, AnswerSource, Origin, SourceError};
use crate::store::ExampleStore;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

pub struct ModelSource {
    client: Client,
    config: ModelConfig,
    store: ExampleStore,
}

impl ModelSource {
    pub fn new(client: Client, config: ModelConfig, store: ExampleStore) -> Self {
        Self {
            client,
            config,
            store,
        }
    }
}

impl AnswerSource for ModelSource {
    fn origin(&self) -> Origin {
        Origin::Model
    }

    fn attempt(&self, query: &str) -> Result<Option<Answer>, SourceError> {
        let examples = self.store.load().map_err(SourceError::Storage)?;
        let context = prompt::render(&examples, query);
        debug!(endpoint = %self.config.endpoint, context = %context, "model query context");

        let mut request = self
            .client
            .post(&self.config.endpoint)
            .json(&GenerateRequest { inputs: &context });
        if let Some(token) = &self.config.api_token {
            request = request.header(AUTHORIZATION, token.as_str());
        }

        let body = request.send()?.error_for_status()?.text()?;
        debug!(%body, "model response");

        let generations: Vec<Generation> =
            serde_json::from_str(&body).map_err(|err| SourceError::Payload(err.to_string()))?;
        let generated = generations
            .first()
            .ok_or_else(|| SourceError::Payload("empty generations array".to_string()))?;

        let command = extract::extract(&generated.generated_text, &context, query)?;
        Ok(Some(Answer {
            command,
            origin: Origin::Model,
        }))
    }
}
