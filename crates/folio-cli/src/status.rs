//! `folio status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use folio_core::config::schema::{
    DEFAULT_PRIMARY_API_BASE, DEFAULT_SECONDARY_API_BASE, DEFAULT_SECONDARY_MODEL,
};
use folio_core::config::{get_config_path, load_config};

use crate::helpers::key_status;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "Folio Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found, using defaults + env)".dimmed().to_string()
        }
    );

    println!(
        "  {:<18} {}",
        "System prompt:".bold(),
        folio_core::utils::truncate_string(&config.chat.system_prompt, 60)
    );
    println!(
        "  {:<18} {} | {} | {}",
        "Parameters:".bold(),
        format!("temp: {}", config.chat.temperature).dimmed(),
        format!("max_tokens: {}", config.chat.max_tokens).dimmed(),
        format!("timeout: {}s", config.chat.timeout_secs).dimmed(),
    );

    let primary = &config.providers.primary;
    let secondary = &config.providers.secondary;

    println!();
    println!("  {}", "Providers (in fallback order):".bold());
    println!(
        "    {:<20} {}",
        "1. Gemini",
        key_status(primary.is_configured())
    );
    println!(
        "       {}",
        primary
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_PRIMARY_API_BASE)
            .dimmed()
    );
    println!(
        "    {:<20} {}",
        "2. DeepSeek",
        key_status(secondary.is_configured())
    );
    println!(
        "       {} ({})",
        secondary
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_SECONDARY_API_BASE)
            .dimmed(),
        secondary.model.as_deref().unwrap_or(DEFAULT_SECONDARY_MODEL)
    );

    if !primary.is_configured() && !secondary.is_configured() {
        println!();
        println!(
            "  {} set LLM_API_KEY and/or DEEPSEEK_API_KEY to enable answers",
            "!".yellow().bold()
        );
    }

    println!();

    Ok(())
}
