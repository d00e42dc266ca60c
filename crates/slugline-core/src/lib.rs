//! Unique, human-readable slugs for persisted records.
//!
//! ## Summary
//! A slug is built from a record's source attributes and checked against storage
//! through a [`UniquenessOracle`]. Collisions escalate first by appending suffix
//! attributes and then by appending a numeric counter. [`SlugHooks`] runs the
//! whole process before a record is created.

pub mod change;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod options;
pub mod oracle;
pub mod record;
pub mod types;
pub mod util;

pub use engine::SlugEngine;
pub use error::{SlugError, SlugResult};
pub use hooks::{SlugHooks, SluggableModel};
pub use options::{SlugConfig, TransformOptions};
pub use oracle::UniquenessOracle;
pub use record::{Record, SlugRecord};
pub use types::SlugOutcome;
