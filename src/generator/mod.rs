//! Language-model clients.
//!
//! The cache never talks to a model itself: callers build a prompt with
//! [`build_prompt`], await a [`Generator`], and only cache successful output.

mod base;
mod cli;
mod prompts;

pub use base::Generator;
pub use cli::{CliGenerator, API_KEY_ENV};
pub use prompts::{build_prompt, PromptRequest};
