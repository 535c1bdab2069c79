//! Answer sources, tried in a fixed priority order
//!
//! Each source implements [`AnswerSource`] and is consulted in turn by the
//! resolver: local cache, then the community answer service, then the model
//! fallback. `Ok(None)` means the source has nothing for this query;
//! `Err(SourceError)` means the source is unusable right now (network
//! trouble, bad payload, failed extraction) and the next one is tried.
//! The one non-recoverable case is `SourceError::Storage`: a broken example
//! store aborts resolution instead of falling through.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::extract::ExtractError;
use crate::store::ExampleStore;

/// Where a resolved command came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Community,
    Model,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Cache => "cache",
            Origin::Community => "community",
            Origin::Model => "model",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate command and the source that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub command: String,
    pub origin: Origin,
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected payload: {0}")]
    Payload(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("example store failure: {0}")]
    Storage(anyhow::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else {
            SourceError::Http(err)
        }
    }
}

/// One strategy for answering a query
pub trait AnswerSource {
    /// Origin label for answers produced here, also used in diagnostics
    fn origin(&self) -> Origin;

    /// Try to answer the query. `Ok(None)` is a clean miss.
    fn attempt(&self, query: &str) -> Result<Option<Answer>, SourceError>;
}

/// Exact-match lookup against the local example store
pub struct CacheSource {
    store: ExampleStore,
}

impl CacheSource {
    pub fn new(store: ExampleStore) -> Self {
        Self { store }
    }
}

impl AnswerSource for CacheSource {
    fn origin(&self) -> Origin {
        Origin::Cache
    }

    fn attempt(&self, query: &str) -> Result<Option<Answer>, SourceError> {
        match self.store.lookup(query) {
            Ok(Some(command)) => {
                debug!(%command, "cache hit");
                Ok(Some(Answer {
                    command,
                    origin: Origin::Cache,
                }))
            }
            Ok(None) => Ok(None),
            Err(err) => Err(SourceError::Storage(err)),
        }
    }
}
