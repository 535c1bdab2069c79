//! Answer resolution: sources in priority order, then confirmation
//!
//! The resolver walks its source list (cache, community, model, minus
//! whatever was disabled) and stops at the first answer. A source that
//! misses or breaks just hands over to the next one; only a broken example
//! store aborts. The winning answer goes through confirmation, and a
//! confirmed answer from anywhere but the cache is persisted so the next
//! resolution of the same query is a cache hit.

use anyhow::{bail, Result};
use thiserror::Error;
use tracing::debug;

use crate::confirm::Confirmation;
use crate::sources::{Answer, AnswerSource, Origin, SourceError};
use crate::store::{Example, ExampleStore};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no answer available from any source (tried: {})", format_tried(.tried))]
    NoAnswer { tried: Vec<&'static str> },
}

fn format_tried(tried: &[&'static str]) -> String {
    if tried.is_empty() {
        "none".to_string()
    } else {
        tried.join(", ")
    }
}

/// How a resolution ended. Both variants exit zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Accepted by the user, persisted unless it came from the cache
    Confirmed(Answer),
    /// Declined or unanswerable prompt, nothing persisted
    Abandoned(Answer),
}

impl Outcome {
    pub fn answer(&self) -> &Answer {
        match self {
            Outcome::Confirmed(answer) | Outcome::Abandoned(answer) => answer,
        }
    }
}

/// Walks the answer sources and settles the result with the user
pub struct Resolver {
    store: ExampleStore,
    sources: Vec<Box<dyn AnswerSource>>,
}

impl Resolver {
    pub fn new(store: ExampleStore, sources: Vec<Box<dyn AnswerSource>>) -> Self {
        Self { store, sources }
    }

    pub fn resolve(&self, query: &str, confirmation: &mut dyn Confirmation) -> Result<Outcome> {
        let mut tried: Vec<&'static str> = Vec::new();
        let mut resolved: Option<Answer> = None;

        for source in &self.sources {
            let label = source.origin().as_str();
            match source.attempt(query) {
                Ok(Some(answer)) => {
                    debug!(origin = label, command = %answer.command, "source answered");
                    resolved = Some(answer);
                    break;
                }
                Ok(None) => {
                    debug!(origin = label, "source had no answer");
                    tried.push(label);
                }
                Err(SourceError::Storage(err)) => {
                    return Err(err.context("example store failure during resolution"));
                }
                Err(err) => {
                    debug!(origin = label, error = %err, "source unusable");
                    tried.push(label);
                }
            }
        }

        let answer = match resolved {
            Some(answer) => answer,
            None => bail!(ResolveError::NoAnswer { tried }),
        };

        if !confirmation.confirm(&answer)? {
            return Ok(Outcome::Abandoned(answer));
        }

        // A cache hit is already stored; anything else becomes the next one
        if answer.origin != Origin::Cache {
            self.store
                .append(Example::new(query, answer.command.clone()))?;
        }

        Ok(Outcome::Confirmed(answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::CacheSource;
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct ScriptedSource {
        origin: Origin,
        answer: Option<&'static str>,
        calls: Rc<Cell<usize>>,
    }

    impl ScriptedSource {
        fn new(origin: Origin, answer: Option<&'static str>) -> (Self, Rc<Cell<usize>>) {
            let calls = Rc::new(Cell::new(0));
            (
                Self {
                    origin,
                    answer,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    impl AnswerSource for ScriptedSource {
        fn origin(&self) -> Origin {
            self.origin
        }

        fn attempt(&self, _query: &str) -> Result<Option<Answer>, SourceError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.answer.map(|command| Answer {
                command: command.to_string(),
                origin: self.origin,
            }))
        }
    }

    struct BrokenSource {
        origin: Origin,
    }

    impl AnswerSource for BrokenSource {
        fn origin(&self) -> Origin {
            self.origin
        }

        fn attempt(&self, _query: &str) -> Result<Option<Answer>, SourceError> {
            Err(SourceError::Payload("scripted failure".to_string()))
        }
    }

    struct UnreachableSource {
        origin: Origin,
    }

    impl AnswerSource for UnreachableSource {
        fn origin(&self) -> Origin {
            self.origin
        }

        fn attempt(&self, _query: &str) -> Result<Option<Answer>, SourceError> {
            panic!("source must not be consulted");
        }
    }

    struct ScriptedConfirmation {
        accept: bool,
    }

    impl Confirmation for ScriptedConfirmation {
        fn confirm(&mut self, _answer: &Answer) -> Result<bool> {
            Ok(self.accept)
        }
    }

    fn temp_store() -> (TempDir, ExampleStore) {
        let dir = TempDir::new().unwrap();
        let store = ExampleStore::open(&dir.path().join("examples.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_cache_hit_short_circuits_remote_sources() {
        let (_dir, store) = temp_store();
        store.append(Example::new("list files", "ls -la")).unwrap();
        let before = fs::read(store.path()).unwrap();

        let resolver = Resolver::new(
            store.clone(),
            vec![
                Box::new(CacheSource::new(store.clone())),
                Box::new(UnreachableSource {
                    origin: Origin::Community,
                }),
                Box::new(UnreachableSource {
                    origin: Origin::Model,
                }),
            ],
        );

        let outcome = resolver
            .resolve("list files", &mut ScriptedConfirmation { accept: true })
            .unwrap();

        let answer = outcome.answer();
        assert_eq!(answer.command, "ls -la");
        assert_eq!(answer.origin, Origin::Cache);
        assert!(matches!(outcome, Outcome::Confirmed(_)));

        // Cache hits are never re-persisted
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_fallback_reaches_model_when_community_is_empty() {
        let (_dir, store) = temp_store();
        let (community, community_calls) = ScriptedSource::new(Origin::Community, None);
        let (model, model_calls) = ScriptedSource::new(Origin::Model, Some("ls -la"));

        let resolver = Resolver::new(store, vec![Box::new(community), Box::new(model)]);
        let outcome = resolver
            .resolve("list files", &mut ScriptedConfirmation { accept: true })
            .unwrap();

        assert_eq!(outcome.answer().origin, Origin::Model);
        assert_eq!(community_calls.get(), 1);
        assert_eq!(model_calls.get(), 1);
    }

    #[test]
    fn test_broken_source_falls_through() {
        let (_dir, store) = temp_store();
        let (model, _) = ScriptedSource::new(Origin::Model, Some("df -h"));

        let resolver = Resolver::new(
            store,
            vec![
                Box::new(BrokenSource {
                    origin: Origin::Community,
                }),
                Box::new(model),
            ],
        );

        let outcome = resolver
            .resolve("show disk usage", &mut ScriptedConfirmation { accept: true })
            .unwrap();
        assert_eq!(outcome.answer().origin, Origin::Model);
    }

    #[test]
    fn test_exhausted_sources_name_what_was_tried() {
        let (_dir, store) = temp_store();
        let (community, _) = ScriptedSource::new(Origin::Community, None);

        let resolver = Resolver::new(
            store,
            vec![
                Box::new(community),
                Box::new(BrokenSource {
                    origin: Origin::Model,
                }),
            ],
        );

        let err = resolver
            .resolve("list files", &mut ScriptedConfirmation { accept: true })
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("community"));
        assert!(message.contains("model"));
    }

    #[test]
    fn test_no_sources_enabled_is_no_answer() {
        let (_dir, store) = temp_store();
        let resolver = Resolver::new(store, Vec::new());

        let err = resolver
            .resolve("list files", &mut ScriptedConfirmation { accept: true })
            .unwrap_err();
        assert!(err.to_string().contains("no answer available"));
    }

    #[test]
    fn test_abandoned_answer_is_not_persisted() {
        let (_dir, store) = temp_store();
        let before = fs::read(store.path()).unwrap();
        let (model, _) = ScriptedSource::new(Origin::Model, Some("rm -rf ./build"));

        let resolver = Resolver::new(store.clone(), vec![Box::new(model)]);
        let outcome = resolver
            .resolve("clean build dir", &mut ScriptedConfirmation { accept: false })
            .unwrap();

        assert!(matches!(outcome, Outcome::Abandoned(_)));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_confirmed_answer_becomes_next_cache_hit() {
        let (_dir, store) = temp_store();
        let (model, model_calls) = ScriptedSource::new(Origin::Model, Some("wc -l notes.txt"));

        let resolver = Resolver::new(
            store.clone(),
            vec![Box::new(CacheSource::new(store.clone())), Box::new(model)],
        );

        let first = resolver
            .resolve("count lines in notes", &mut ScriptedConfirmation { accept: true })
            .unwrap();
        assert_eq!(first.answer().origin, Origin::Model);

        let second = resolver
            .resolve("count lines in notes", &mut ScriptedConfirmation { accept: true })
            .unwrap();
        assert_eq!(second.answer().origin, Origin::Cache);
        assert_eq!(second.answer().command, "wc -l notes.txt");
        assert_eq!(model_calls.get(), 1);
    }

    #[test]
    fn test_broken_store_aborts_resolution() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "not json").unwrap();

        let resolver = Resolver::new(
            store.clone(),
            vec![
                Box::new(CacheSource::new(store)),
                Box::new(UnreachableSource {
                    origin: Origin::Model,
                }),
            ],
        );

        let err = resolver
            .resolve("list files", &mut ScriptedConfirmation { accept: true })
            .unwrap_err();
        assert!(err.to_string().contains("example store"));
    }
}
