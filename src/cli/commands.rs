//! Implementation of the LeetHelper CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assistant::Assistant;
use crate::cache::{CacheEntry, Clock, ResponseCache};
use crate::generator::{CliGenerator, Generator, PromptRequest, API_KEY_ENV};
use crate::question::{QuestionResolver, StaticQuestionResolver, UrlQuestionResolver, DEFAULT_QUESTION_ID};
use crate::settings;
use crate::storage::{open_store, KeyValueStore};
use crate::types::config::Config;
use crate::types::fields::FieldKind;
use crate::{LeetHelperError, LeetHelperResult};

type SharedStore = Arc<dyn KeyValueStore>;

fn open_cache(config: &Config) -> LeetHelperResult<(SharedStore, ResponseCache<SharedStore>)> {
    let store = open_store(&config.storage)?;
    let cache = ResponseCache::new(Arc::clone(&store));
    Ok((store, cache))
}

/// Reads `@path` arguments from disk, returns anything else as-is.
fn read_arg(value: &str) -> LeetHelperResult<String> {
    match value.strip_prefix('@') {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Ok(value.to_string()),
    }
}

/// Formats an age in milliseconds as "1h 05m".
fn format_age(millis: i64) -> String {
    let age = chrono::Duration::milliseconds(millis.max(0));
    let hours = age.num_hours();
    let minutes = age.num_minutes() % 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", age.num_seconds())
    }
}

fn field_names(entry: &CacheEntry) -> String {
    entry
        .fields
        .keys()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Initializes configuration in the specified directory.
pub async fn init(path: Option<PathBuf>) -> LeetHelperResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    // Create directory if it doesn't exist
    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("leethelper.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        println!("Use 'leethelper config' to modify.");
        return Ok(());
    }

    // Data directory for the store
    let data_dir = target_dir.join(".leethelper");
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        tracing::info!(".leethelper/ directory created");
    }

    update_gitignore(&target_dir)?;

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("LeetHelper initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!("Data directory: .leethelper/");
    println!();
    println!("Next steps:");
    println!("  1. Store your API key: leethelper api-key <key>");
    println!("  2. Check the model CLI: leethelper status");
    println!("  3. Ask for hints: leethelper ask hints --url <problem url>");

    Ok(())
}

/// Updates or creates .gitignore to include .leethelper/
fn update_gitignore(target_dir: &Path) -> LeetHelperResult<()> {
    let gitignore_path = target_dir.join(".gitignore");
    let entry = ".leethelper/";
    let comment = "# LeetHelper - local cache and settings";

    if gitignore_path.exists() {
        let content = std::fs::read_to_string(&gitignore_path)?;

        if content
            .lines()
            .any(|line| line.trim() == entry || line.trim() == ".leethelper")
        {
            tracing::debug!(".gitignore already contains .leethelper/");
            return Ok(());
        }

        let mut new_content = content.trim_end().to_string();
        if !new_content.is_empty() {
            new_content.push_str("\n\n");
        }
        new_content.push_str(comment);
        new_content.push('\n');
        new_content.push_str(entry);
        new_content.push('\n');

        std::fs::write(&gitignore_path, new_content)?;
        println!(".gitignore updated with .leethelper/");
    } else {
        let content = format!("{}\n{}\n", comment, entry);
        std::fs::write(&gitignore_path, content)?;
        println!(".gitignore created with .leethelper/");
    }

    Ok(())
}

/// Prints the cached entry for a question.
pub async fn get(question: &str, field: Option<&str>, config: &Config) -> LeetHelperResult<()> {
    let field = field.map(str::parse::<FieldKind>).transpose()?;
    let (_, cache) = open_cache(config)?;

    let Some(entry) = cache.get(question) else {
        println!("No cached entry for '{}'.", question);
        return Ok(());
    };

    if let Some(field) = field {
        match entry.field(field) {
            Some(text) => println!("{}", text),
            None => println!("No cached {} for '{}'.", field, question),
        }
        return Ok(());
    }

    let age = entry.age_millis(cache.clock().now_millis());
    eprintln!("{} (updated {} ago)", entry.question_id, format_age(age));
    println!("{}", entry.to_json_pretty()?);

    Ok(())
}

/// Caches a value for one field.
pub async fn set(question: &str, field: &str, value: &str, config: &Config) -> LeetHelperResult<()> {
    let field: FieldKind = field.parse()?;
    let value = read_arg(value)?;
    let (_, cache) = open_cache(config)?;

    cache.set(question, field, value);

    if cache.stats().write_failures > 0 {
        println!("Could not cache {} for '{}' (see logs).", field, question);
    } else {
        println!("Cached {} for '{}'.", field, question);
    }
    Ok(())
}

/// Removes the cached entry for a question.
pub async fn clear(question: &str, config: &Config) -> LeetHelperResult<()> {
    let (_, cache) = open_cache(config)?;
    cache.clear(question);
    println!("Cleared cache for '{}'.", question);
    Ok(())
}

/// Removes every cached entry.
pub async fn clear_all(yes: bool, config: &Config) -> LeetHelperResult<()> {
    let (_, cache) = open_cache(config)?;
    let count = cache.stats().stored;

    if count == 0 {
        println!("Cache is already empty.");
        return Ok(());
    }

    if !yes && !super::interactive::confirm(&format!("Remove {} cached question(s)?", count))? {
        println!("Aborted.");
        return Ok(());
    }

    cache.clear_all();
    println!("Removed {} cached question(s).", count);
    Ok(())
}

/// Lists cached questions.
pub async fn list(config: &Config) -> LeetHelperResult<()> {
    let (_, cache) = open_cache(config)?;
    let entries = cache.entries();

    if entries.is_empty() {
        println!("No cached questions.");
        return Ok(());
    }

    let now = cache.clock().now_millis();
    println!("Cached questions ({}):\n", entries.len());
    for entry in &entries {
        println!(
            "  {} - {} ({} ago)",
            entry.question_id,
            field_names(entry),
            format_age(entry.age_millis(now))
        );
    }

    Ok(())
}

/// Removes stale and corrupt entries.
pub async fn purge(config: &Config) -> LeetHelperResult<()> {
    let (_, cache) = open_cache(config)?;
    let purged = cache.purge_expired();
    println!("Purged {} stale entr{}.", purged, if purged == 1 { "y" } else { "ies" });
    Ok(())
}

/// Options of the `ask` command.
#[derive(Debug, Default)]
pub struct AskOptions {
    pub field: String,
    pub question: Option<String>,
    pub url: Option<String>,
    pub language: Option<String>,
    pub code: Option<String>,
    pub refresh: bool,
}

fn resolve_question(options: &AskOptions, config: &Config) -> String {
    match &options.question {
        Some(question) => StaticQuestionResolver(question.clone()).current_question_id(),
        None => UrlQuestionResolver::new(options.url.clone().or_else(|| config.question.url.clone()))
            .current_question_id(),
    }
}

/// Shows cached text for a question, generating it on a miss.
pub async fn ask(options: AskOptions, config: &Config) -> LeetHelperResult<()> {
    let field: FieldKind = options.field.parse()?;
    let question_id = resolve_question(&options, config);

    if question_id == DEFAULT_QUESTION_ID {
        return Err(LeetHelperError::other(
            "Could not determine the question. Pass --question or --url.",
        ));
    }

    let code = options.code.as_deref().map(read_arg).transpose()?;
    if field == FieldKind::Mistakes && code.is_none() {
        return Err(LeetHelperError::other(
            "Mistakes analysis needs your code. Pass --code <code> or --code @file.",
        ));
    }

    let (store, cache) = open_cache(config)?;

    let api_key = match settings::api_key(&store) {
        Ok(Some(key)) => Some(key),
        Ok(None) => std::env::var(API_KEY_ENV).ok(),
        Err(e) => {
            tracing::warn!("Failed to read stored API key: {}", e);
            std::env::var(API_KEY_ENV).ok()
        }
    };
    let generator = CliGenerator::from_config(&config.generator).with_api_key(api_key);

    let mut request = PromptRequest::new(&question_id, field).with_language(
        options
            .language
            .clone()
            .unwrap_or_else(|| config.generator.language.clone()),
    );
    if let Some(code) = code {
        request = request.with_code(code);
    }

    let assistant = Assistant::new(cache, generator);

    if !options.refresh && assistant.cached(&question_id, field).is_none() {
        eprintln!("Generating {} for '{}'...", field, question_id);
    }

    let text = assistant.fetch(&request, options.refresh).await?;
    println!("{}", text);

    Ok(())
}

/// Shows, stores or removes the API key.
pub async fn api_key(key: Option<String>, clear: bool, config: &Config) -> LeetHelperResult<()> {
    let store = open_store(&config.storage)?;

    if clear {
        settings::set_api_key(&store, "")?;
        println!("API key removed.");
    } else if let Some(key) = key {
        settings::set_api_key(&store, &key)?;
        println!("API key stored.");
    } else if settings::has_valid_api_key(&store) {
        println!("An API key is stored.");
    } else if std::env::var(API_KEY_ENV).is_ok() {
        println!("No API key stored; {} is set in the environment.", API_KEY_ENV);
    } else {
        println!("No API key configured.");
    }

    Ok(())
}

/// Shows cache and generator status.
pub async fn status(config: &Config) -> LeetHelperResult<()> {
    println!("Store: {} ({})", config.storage.backend, config.storage.path.display());

    let (store, cache) = open_cache(config)?;
    let entries = cache.entries();

    println!("Cached questions: {}", entries.len());
    for field in FieldKind::ALL {
        let count = entries.iter().filter(|e| e.fields.contains_key(&field)).count();
        println!("  {:<12} {}", field.as_str(), count);
    }

    let evictions = cache.stats().evictions;
    if evictions > 0 {
        println!("Stale entries evicted while reading: {}", evictions);
    }

    println!();
    let generator = CliGenerator::from_config(&config.generator);
    if generator.is_available().await {
        let version = generator.version().await.unwrap_or_else(|_| "unknown".to_string());
        println!("  ✓ {} - available (version: {})", generator.command(), version);
    } else {
        println!("  ✗ {} - not found", generator.command());
    }

    let key_icon = if settings::has_valid_api_key(&store) || std::env::var(API_KEY_ENV).is_ok() {
        "✓"
    } else {
        "✗"
    };
    println!("  {} API key", key_icon);

    Ok(())
}

/// Configures options interactively.
pub async fn config_cmd(config_path: &Path) -> LeetHelperResult<()> {
    use super::interactive::{run_interactive_config, show_config_summary};

    if config_path.exists() {
        let config = Config::load(config_path)?;
        show_config_summary(&config);
    }

    run_interactive_config(config_path)
}

/// Shows version.
pub fn version() {
    println!("leethelper {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Cached explanations, solutions and hints for coding problems");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::{StorageBackend, StorageConfig};

    fn file_config(dir: &Path) -> Config {
        let mut config = Config::default_config();
        config.storage = StorageConfig {
            backend: StorageBackend::File,
            path: dir.join("store.json"),
        };
        config
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(5_000), "5s");
        assert_eq!(format_age(3 * 60_000), "3m");
        assert_eq!(format_age(65 * 60_000), "1h 05m");
        assert_eq!(format_age(-10), "0s");
    }

    #[test]
    fn test_resolve_question_precedence() {
        let mut config = Config::default_config();
        config.question.url = Some("https://leetcode.com/problems/from-config/".into());

        let mut options = AskOptions::default();
        assert_eq!(resolve_question(&options, &config), "from-config");

        options.url = Some("https://leetcode.com/problems/from-url/".into());
        assert_eq!(resolve_question(&options, &config), "from-url");

        options.question = Some("explicit".into());
        assert_eq!(resolve_question(&options, &config), "explicit");
    }

    #[tokio::test]
    async fn test_set_get_clear_commands() {
        let dir = tempfile::tempdir().unwrap();
        let config = file_config(dir.path());

        set("two-sum", "hints", "H1", &config).await.unwrap();
        set("two-sum", "solution", "S1", &config).await.unwrap();
        get("two-sum", None, &config).await.unwrap();
        get("two-sum", Some("hints"), &config).await.unwrap();
        list(&config).await.unwrap();

        let (_, cache) = open_cache(&config).unwrap();
        let entry = cache.get("two-sum").unwrap();
        assert_eq!(entry.field(FieldKind::Hints), Some("H1"));
        assert_eq!(entry.field(FieldKind::Solution), Some("S1"));

        clear("two-sum", &config).await.unwrap();
        let (_, cache) = open_cache(&config).unwrap();
        assert!(cache.get("two-sum").is_none());
    }

    #[tokio::test]
    async fn test_invalid_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = file_config(dir.path());

        let result = set("two-sum", "timestamp", "x", &config).await;
        assert!(matches!(result, Err(LeetHelperError::InvalidField(_))));
    }

    #[tokio::test]
    async fn test_ask_serves_cached_value_without_generator() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = file_config(dir.path());
        config.generator.command = "leethelper-no-such-model-cli".into();

        set("two-sum", "hints", "H1", &config).await.unwrap();

        let options = AskOptions {
            field: "hints".into(),
            question: Some("two-sum".into()),
            ..Default::default()
        };
        ask(options, &config).await.unwrap();

        let options = AskOptions {
            field: "solution".into(),
            question: Some("two-sum".into()),
            ..Default::default()
        };
        let result = ask(options, &config).await;
        assert!(matches!(result, Err(LeetHelperError::GeneratorNotFound(_))));
    }

    #[tokio::test]
    async fn test_ask_requires_question_and_code() {
        let config = Config::default_config();

        let options = AskOptions {
            field: "hints".into(),
            ..Default::default()
        };
        assert!(ask(options, &config).await.is_err());

        let options = AskOptions {
            field: "mistakes".into(),
            question: Some("two-sum".into()),
            ..Default::default()
        };
        assert!(ask(options, &config).await.is_err());
    }

    #[tokio::test]
    async fn test_clear_all_with_yes_keeps_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = file_config(dir.path());

        api_key(Some("secret".into()), false, &config).await.unwrap();
        set("two-sum", "hints", "H1", &config).await.unwrap();
        clear_all(true, &config).await.unwrap();

        let store = open_store(&config.storage).unwrap();
        assert!(settings::has_valid_api_key(&store));
        assert_eq!(store.keys().unwrap(), vec![settings::API_KEY_KEY.to_string()]);
    }

    #[tokio::test]
    async fn test_version() {
        // Only checks that it does not panic
        version();
    }
}
