//! Shared types for LeetHelper.

pub mod config;
pub mod errors;
pub mod fields;
