//! Generator backed by a model CLI (e.g. `gemini`).

use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

use super::base::Generator;
use crate::types::config::GeneratorConfig;
use crate::{LeetHelperError, LeetHelperResult};

/// Environment variable the model CLI reads its API key from.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Runs `command args... <prompt>` and returns its stdout.
pub struct CliGenerator {
    command_name: String,
    args: Vec<String>,
    timeout: Duration,
    api_key: Option<String>,
}

impl CliGenerator {
    /// Creates a generator for the Gemini CLI with default values.
    pub fn new() -> Self {
        Self {
            command_name: "gemini".to_string(),
            args: Vec::new(),
            timeout: Duration::from_secs(120),
            api_key: None,
        }
    }

    /// Creates a generator from the TOML configuration.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            command_name: config.command.clone(),
            args: config.args.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            api_key: None,
        }
    }

    /// Sets the command and its leading arguments.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>, args: &[&str]) -> Self {
        self.command_name = command.into();
        self.args = args.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Passes an API key to the child process.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Returns the CLI command.
    pub fn command(&self) -> &str {
        &self.command_name
    }

    /// Returns the CLI version.
    pub async fn version(&self) -> LeetHelperResult<String> {
        let output = Command::new(&self.command_name)
            .arg("--version")
            .output()
            .await?;

        let version = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("unknown")
            .to_string();

        Ok(version)
    }
}

impl Default for CliGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for CliGenerator {
    fn name(&self) -> &str {
        &self.command_name
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.command_name)
            .arg("--version")
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    async fn generate(&self, prompt: &str) -> LeetHelperResult<String> {
        let mut cmd = Command::new(&self.command_name);
        cmd.args(&self.args).arg(prompt).kill_on_drop(true);
        if let Some(key) = &self.api_key {
            cmd.env(API_KEY_ENV, key);
        }

        tracing::debug!(command = %self.command_name, prompt_len = prompt.len(), "Running generator");

        let result = tokio::time::timeout(self.timeout, cmd.output()).await;

        match result {
            Ok(Ok(output)) => {
                if output.status.success() {
                    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
                    if stdout.is_empty() {
                        Err(LeetHelperError::GeneratorFailed(
                            self.name().to_string(),
                            "empty response".to_string(),
                        ))
                    } else {
                        Ok(stdout)
                    }
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(LeetHelperError::GeneratorFailed(
                        self.name().to_string(),
                        stderr.trim().to_string(),
                    ))
                }
            }
            Ok(Err(e)) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Err(LeetHelperError::GeneratorNotFound(self.name().to_string()))
                } else {
                    Err(LeetHelperError::GeneratorFailed(
                        self.name().to_string(),
                        e.to_string(),
                    ))
                }
            }
            Err(_) => Err(LeetHelperError::GeneratorTimeout(self.name().to_string())),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_returns_stdout() {
        let generator = CliGenerator::new().with_command("echo", &["answer:"]);

        let text = generator.generate("two-sum").await.unwrap();
        assert_eq!(text, "answer: two-sum");
    }

    #[tokio::test]
    async fn test_api_key_is_passed_through_env() {
        let generator = CliGenerator::new()
            .with_command("sh", &["-c", "printf '%s' \"$GEMINI_API_KEY\""])
            .with_api_key(Some("secret".to_string()));

        assert_eq!(generator.generate("ignored").await.unwrap(), "secret");
    }

    #[tokio::test]
    async fn test_missing_command() {
        let generator = CliGenerator::new().with_command("leethelper-no-such-model-cli", &[]);

        assert!(!generator.is_available().await);
        let err = generator.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LeetHelperError::GeneratorNotFound(_)));
    }

    #[tokio::test]
    async fn test_non_zero_exit() {
        let generator = CliGenerator::new().with_command("sh", &["-c", "echo boom >&2; exit 3"]);

        let err = generator.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LeetHelperError::GeneratorFailed(_, ref msg) if msg == "boom"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let generator = CliGenerator::new()
            .with_command("sleep", &[])
            .with_timeout(Duration::from_millis(50));

        let err = generator.generate("5").await.unwrap_err();
        assert!(matches!(err, LeetHelperError::GeneratorTimeout(_)));
    }

    #[tokio::test]
    async fn test_empty_output_is_failure() {
        let generator = CliGenerator::new().with_command("true", &[]);

        let err = generator.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LeetHelperError::GeneratorFailed(_, _)));
    }
}
