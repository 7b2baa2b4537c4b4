//! `folio init` — write the default configuration file.
//!
//! API keys are left empty on purpose; they normally come from the
//! environment (`LLM_API_KEY`, `DEEPSEEK_API_KEY`).

use anyhow::{Context, Result};
use colored::Colorize;

use folio_core::config::{get_config_path, save_config, Config};

/// Run the init command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "Folio — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();

    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        save_config(&Config::default(), Some(&config_path))
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!(
        "{}",
        "Next: export LLM_API_KEY and DEEPSEEK_API_KEY (or add them to .env), then run `folio ask -m \"hello\"`."
            .dimmed()
    );
    println!();

    Ok(())
}
