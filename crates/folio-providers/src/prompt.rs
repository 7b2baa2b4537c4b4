//! Prompt construction shared by both vendors.

use folio_core::Language;

/// The user's question with its language prefix, e.g. `"User question: What is 2+2?"`.
pub fn user_question(language: Language, message: &str) -> String {
    format!("{}{}", language.question_prefix(), message)
}

/// Full single-string prompt: system instruction, blank line, prefixed question.
pub fn build_prompt(system_prompt: &str, language: Language, message: &str) -> String {
    format!("{}\n\n{}", system_prompt, user_question(language, message))
}
