//! Shared CLI output helpers — answer printing, banner, spinner placeholder.

use colored::Colorize;

use folio_core::Language;

/// Print an answer to stdout.
pub fn print_response(response: &str) {
    println!();
    println!("{}", "Folio".cyan().bold());
    if response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{response}");
    }
    println!();
}

/// Print a user-facing error to stderr.
pub fn print_error(message: &str) {
    eprintln!("\n{} {message}\n", "Error:".red().bold());
}

/// Print the banner shown at REPL start.
pub fn print_banner(language: Language) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "Folio".cyan().bold(), version.dimmed());
    println!(
        "{}",
        format!("Language: {language}. Type a question, or \"exit\" to quit.").dimmed()
    );
    println!();
}

/// Print a "thinking" placeholder while waiting on a provider.
pub fn print_thinking() {
    eprint!("{}", "thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

/// `✓`/`·` marker for a key's presence. Never prints the key itself.
pub fn key_status(configured: bool) -> String {
    if configured {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    }
}
