//! Model signature atlas builder
//!
//! Ingests a directory tree of per-model signature files produced by an
//! external profiling pipeline, resolves each file to a canonical model
//! identity (organization, family, parameter count, instruction-tuned flag),
//! keeps the best run per model, reduces the retained signature vectors to
//! 2-D coordinates with t-SNE, and emits a single consolidated JSON database
//! for visualization.
//!
//! The interesting logic lives in [`identity`] (name-resolution heuristics)
//! and [`dedup`] (best-candidate selection); everything else is plumbing
//! around them.

pub mod config;
pub mod dedup;
pub mod embed;
pub mod error;
pub mod identity;
pub mod pipeline;
pub mod record;
pub mod scan;
pub mod signature;

pub use config::Config;
pub use dedup::Deduplicator;
pub use embed::{Reducer, TsneReducer};
pub use error::{AtlasError, Result};
pub use identity::{Family, ModelIdentity};
pub use record::{Database, Metadata, ModelRecord};
