//! Interactive configuration for LeetHelper.
//!
//! This module implements interactive configuration using dialoguer.

use std::path::{Path, PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::types::config::{Config, StorageBackend};
use crate::LeetHelperResult;

/// Asks a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> LeetHelperResult<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(answer)
}

/// Runs the interactive configuration.
pub fn run_interactive_config(config_path: &Path) -> LeetHelperResult<()> {
    let theme = ColorfulTheme::default();

    println!("\n🔧 LeetHelper Interactive Configuration\n");

    let mut config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        println!("Creating new configuration...\n");
        Config::default_config()
    };

    loop {
        let options = vec![
            "General",
            "Storage",
            "Model CLI",
            "Question",
            "Save and Exit",
            "Exit without Saving",
        ];

        let selection = Select::with_theme(&theme)
            .with_prompt("What do you want to configure?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => configure_general(&theme, &mut config)?,
            1 => configure_storage(&theme, &mut config)?,
            2 => configure_generator(&theme, &mut config)?,
            3 => configure_question(&theme, &mut config)?,
            4 => {
                config.save(config_path)?;
                println!("\n✓ Configuration saved to: {}\n", config_path.display());
                break;
            }
            5 => {
                if Confirm::with_theme(&theme)
                    .with_prompt("Exit without saving?")
                    .default(false)
                    .interact()?
                {
                    println!("\nExiting without saving.\n");
                    break;
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn configure_general(theme: &ColorfulTheme, config: &mut Config) -> LeetHelperResult<()> {
    println!("\n📋 General\n");

    let log_levels = vec!["error", "warn", "info", "debug", "trace"];
    let current_idx = log_levels
        .iter()
        .position(|&l| l == config.general.log_level)
        .unwrap_or(2);

    let log_level_idx = Select::with_theme(theme)
        .with_prompt("Log level")
        .items(&log_levels)
        .default(current_idx)
        .interact()?;

    config.general.log_level = log_levels[log_level_idx].to_string();

    let log_formats = vec!["text", "json"];
    let current_format_idx = log_formats
        .iter()
        .position(|&f| f == config.general.log_format)
        .unwrap_or(0);

    let log_format_idx = Select::with_theme(theme)
        .with_prompt("Log format")
        .items(&log_formats)
        .default(current_format_idx)
        .interact()?;

    config.general.log_format = log_formats[log_format_idx].to_string();

    println!("\n✓ General settings updated.\n");
    Ok(())
}

fn configure_storage(theme: &ColorfulTheme, config: &mut Config) -> LeetHelperResult<()> {
    println!("\n💾 Storage\n");

    let backends = [StorageBackend::Sqlite, StorageBackend::File, StorageBackend::Memory];
    let labels = vec![
        "sqlite (database file)",
        "file (JSON file)",
        "memory (not persisted)",
    ];
    let current_idx = backends
        .iter()
        .position(|b| *b == config.storage.backend)
        .unwrap_or(0);

    let backend_idx = Select::with_theme(theme)
        .with_prompt("Backend")
        .items(&labels)
        .default(current_idx)
        .interact()?;

    config.storage.backend = backends[backend_idx];

    if config.storage.backend != StorageBackend::Memory {
        let path: String = Input::with_theme(theme)
            .with_prompt("Store path")
            .default(config.storage.path.display().to_string())
            .interact_text()?;

        config.storage.path = PathBuf::from(path);
    }

    println!("\n✓ Storage configured.\n");
    Ok(())
}

fn configure_generator(theme: &ColorfulTheme, config: &mut Config) -> LeetHelperResult<()> {
    println!("\n🤖 Model CLI\n");

    let generator = &mut config.generator;

    let command: String = Input::with_theme(theme)
        .with_prompt("Command")
        .default(generator.command.clone())
        .interact_text()?;

    generator.command = command;

    let args_str: String = Input::with_theme(theme)
        .with_prompt("Arguments before the prompt (space separated)")
        .default(generator.args.join(" "))
        .allow_empty(true)
        .interact_text()?;

    generator.args = args_str.split_whitespace().map(String::from).collect();

    let timeout: u64 = Input::with_theme(theme)
        .with_prompt("Timeout (seconds)")
        .default(generator.timeout_secs)
        .interact_text()?;

    generator.timeout_secs = timeout.max(1);

    let language: String = Input::with_theme(theme)
        .with_prompt("Default programming language")
        .default(generator.language.clone())
        .interact_text()?;

    generator.language = language;

    println!("\n✓ Model CLI configured.\n");
    Ok(())
}

fn configure_question(theme: &ColorfulTheme, config: &mut Config) -> LeetHelperResult<()> {
    println!("\n🔗 Question\n");

    let url: String = Input::with_theme(theme)
        .with_prompt("Default problem URL (empty for none)")
        .default(config.question.url.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    config.question.url = if url.trim().is_empty() {
        None
    } else {
        Some(url.trim().to_string())
    };

    println!("\n✓ Question configured.\n");
    Ok(())
}

/// Shows a configuration summary.
pub fn show_config_summary(config: &Config) {
    println!("\n📊 Configuration Summary\n");
    println!("┌─────────────────────────────────────────┐");
    println!("│ General                                 │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Log level: {:<28} │", config.general.log_level);
    println!("│ Log format: {:<27} │", config.general.log_format);
    println!("├─────────────────────────────────────────┤");
    println!("│ Storage                                 │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Backend: {:<30} │", config.storage.backend.to_string());
    if config.storage.backend != StorageBackend::Memory {
        println!("│ Path: {:<33} │", config.storage.path.display().to_string());
    }
    println!("├─────────────────────────────────────────┤");
    println!("│ Model CLI                               │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Command: {:<30} │", config.generator.command);
    println!("│ Timeout: {:<29}s │", config.generator.timeout_secs);
    println!("│ Language: {:<29} │", config.generator.language);
    println!("├─────────────────────────────────────────┤");
    println!("│ Question                                │");
    println!("├─────────────────────────────────────────┤");
    println!(
        "│ URL: {:<34} │",
        config.question.url.as_deref().unwrap_or("(none)")
    );
    println!("└─────────────────────────────────────────┘");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_config_summary() {
        let mut config = Config::default_config();
        // Only checks that it does not panic
        show_config_summary(&config);

        config.storage.backend = StorageBackend::Memory;
        config.question.url = Some("https://leetcode.com/problems/two-sum/".into());
        show_config_summary(&config);
    }
}
