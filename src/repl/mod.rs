//! Interactive query editor
//!
//! A reedline line editor wired to the completion core:
//! - Tab completion driven by the cursor context
//! - Token-based syntax highlighting
//! - Multi-line input while parentheses or strings are open
//! - Prompt showing the root model
//! - Optional persistent history

mod completer;
mod engine;
mod highlighter;
mod prompt;
mod validator;

pub use completer::QueryCompleter;
pub use engine::ReplEngine;
pub use highlighter::{QueryHighlighter, token_style};
pub use prompt::FilterPrompt;
pub use validator::QueryValidator;
