//! Interactive REPL.
//!
//! Uses `rustyline` for readline-style editing with persistent local history.
//! The history is only for line editing; every question is sent on its own.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use serde_json::json;
use tracing::debug;

use folio_core::Language;
use folio_providers::ChatService;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Run the interactive REPL loop.
pub async fn run(service: ChatService, language: Language) -> Result<()> {
    helpers::print_banner(language);

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye!");
            break;
        }

        let _ = editor.add_history_entry(&input);

        debug!(language = %language, "processing input");
        helpers::print_thinking();

        let result = service.handle(&request_body(&input, language)).await;
        helpers::clear_thinking();

        match result {
            Ok(response) => helpers::print_response(&response.response),
            Err(e) => helpers::print_error(&e.user_message()),
        }
    }

    save_history(&mut editor);

    Ok(())
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the history file.
fn history_path() -> std::path::PathBuf {
    folio_core::utils::get_data_path()
        .join("history")
        .join("chat_history")
}

/// JSON body for one REPL line. The line is sent as typed; trimming is only
/// used to detect blank input and exit commands.
fn request_body(input: &str, language: Language) -> serde_json::Value {
    json!({ "message": input, "language": language })
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("QUIT"));
        assert!(is_exit_command("/exit"));
        assert!(is_exit_command(":q"));
        assert!(!is_exit_command("what is rust?"));
        assert!(!is_exit_command(""));
    }

    #[test]
    fn request_body_keeps_line_as_typed() {
        let body = request_body("  what is rust?  ", Language::Ar);
        assert_eq!(body["message"], "  what is rust?  ");
        assert_eq!(body["language"], "ar");
    }

    #[test]
    fn history_path_under_data_dir() {
        let path = history_path();
        assert!(path.to_string_lossy().contains(".folio"));
        assert!(path.ends_with("chat_history"));
    }
}
