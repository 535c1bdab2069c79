//! incant - translate English task descriptions into shell commands
//!
//! Resolution walks three answer sources in priority order:
//! 1. Local example store (exact-match cache of confirmed answers)
//! 2. Community answer service (when enough candidates agree)
//! 3. Model fallback (few-shot completion over the stored examples)
//!
//! Confirmed answers flow back into the store, which is also the few-shot
//! context for the model, so the tool gets cheaper and sharper with use.

pub mod cli;
pub mod clipboard;
pub mod community;
pub mod config;
pub mod confirm;
pub mod exec;
pub mod extract;
pub mod matcher;
pub mod model;
pub mod pipeline;
pub mod prompt;
pub mod sources;
pub mod store;
