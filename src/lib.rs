//! # LeetHelper
//!
//! Per-question cache and model assistant for coding-practice problems.
//!
//! LeetHelper keeps model-generated explanations, solutions, hints, dry runs
//! and code analyses per problem, in a shared key-value store, and expires
//! each problem's entry 24 hours after its most recent write.
//!
//! ## Modules
//!
//! - [`cache`] - Per-question response cache with lazy expiry
//! - [`storage`] - Key-value stores (memory, JSON file, SQLite)
//! - [`question`] - Active question resolution from problem URLs
//! - [`generator`] - Model clients and prompt templates
//! - [`assistant`] - Cache-or-generate workflow
//! - [`settings`] - API key kept next to the cache
//! - [`cli`] - Command-line interface
//! - [`types`] - Shared types

pub mod assistant;
pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod generator;
pub mod question;
pub mod settings;
pub mod storage;
pub mod types;

pub use types::config::Config;
pub use types::errors::{LeetHelperError, LeetHelperResult};
pub use types::fields::FieldKind;
