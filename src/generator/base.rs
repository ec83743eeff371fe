//! Base trait for text generators.

use async_trait::async_trait;

use crate::LeetHelperResult;

/// Turns a prompt into generated text.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Returns the generator name.
    fn name(&self) -> &str;

    /// Checks whether the generator can be used.
    async fn is_available(&self) -> bool {
        true
    }

    /// Generates text for `prompt`.
    ///
    /// Fails with a network, authentication or process error; never returns
    /// partial output.
    async fn generate(&self, prompt: &str) -> LeetHelperResult<String>;
}

#[async_trait]
impl<G: Generator + ?Sized> Generator for Box<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn is_available(&self) -> bool {
        (**self).is_available().await
    }

    async fn generate(&self, prompt: &str) -> LeetHelperResult<String> {
        (**self).generate(prompt).await
    }
}
