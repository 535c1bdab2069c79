//! Community answer service client
//!
//! Searches a community Q&A endpoint for the query, prefixed with a fixed
//! domain tag so the service stays in shell territory. Raw answers are
//! cleaned of comment lines, and the source only answers when enough
//! cleaned candidates agree that the query is well known there.

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::CommunityConfig;
use crate::sources::{Answer, AnswerSource, Origin, SourceError};

#[derive(Debug, Deserialize)]
struct AnswersPayload {
    answers: Vec<AnswerEntry>,
}

#[derive(Debug, Deserialize)]
struct AnswerEntry {
    answer: String,
}

pub struct CommunitySource {
    client: Client,
    config: CommunityConfig,
}

impl CommunitySource {
    pub fn new(client: Client, config: CommunityConfig) -> Self {
        Self { client, config }
    }
}

impl AnswerSource for CommunitySource {
    fn origin(&self) -> Origin {
        Origin::Community
    }

    fn attempt(&self, query: &str) -> Result<Option<Answer>, SourceError> {
        let search = format!("{} {}", self.config.tag, query);
        debug!(endpoint = %self.config.endpoint, %search, "querying community answers");

        let body = self
            .client
            .get(&self.config.endpoint)
            .query(&[("v", "3"), ("s", search.as_str())])
            .send()?
            .error_for_status()?
            .text()?;
        debug!(%body, "community response");

        let payload: AnswersPayload =
            serde_json::from_str(&body).map_err(|err| SourceError::Payload(err.to_string()))?;

        let candidates = usable_candidates(&payload);
        debug!(count = candidates.len(), "community candidates");

        Ok(pick(candidates, self.config.min_candidates).map(|command| Answer {
            command,
            origin: Origin::Community,
        }))
    }
}

/// Cleaned, non-empty answers in service order
fn usable_candidates(payload: &AnswersPayload) -> Vec<String> {
    payload
        .answers
        .iter()
        .map(|entry| clean_answer(&entry.answer))
        .filter(|cleaned| !cleaned.is_empty())
        .collect()
}

/// First candidate, but only when enough of them agree the query is known.
///
/// Below the threshold the source reports a clean miss and resolution moves
/// on to the model fallback.
fn pick(mut candidates: Vec<String>, min_candidates: usize) -> Option<String> {
    if candidates.is_empty() || candidates.len() < min_candidates {
        return None;
    }
    Some(candidates.swap_remove(0))
}

/// Strip comment lines from a raw community answer.
///
/// Answers arrive as pasted snippets where `#` lines carry commentary, not
/// commands. Multi-line commands survive; an answer that was all commentary
/// cleans down to the empty string and is discarded by the caller.
pub fn clean_answer(raw: &str) -> String {
    let kept: Vec<&str> = raw.lines().filter(|line| !line.starts_with('#')).collect();
    kept.join("\n").trim().to_string()
}
