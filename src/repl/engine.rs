use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use std::fs;
use tracing::debug;

use crate::completion::CompletionEngine;
use crate::config::HistoryConfig;
use crate::error::{FilterqError, Result};

use super::completer::QueryCompleter;
use super::highlighter::QueryHighlighter;
use super::prompt::FilterPrompt;
use super::validator::QueryValidator;

const COMPLETION_MENU: &str = "completion_menu";

/// REPL engine for interactive query editing
pub struct ReplEngine {
    /// Line editor for query input
    editor: Reedline,

    /// Prompt showing the root model
    prompt: FilterPrompt,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `completion_engine` - Engine used for Tab completion
    /// * `history_config` - History configuration
    /// * `highlighting_enabled` - Enable syntax highlighting
    pub fn new(
        completion_engine: CompletionEngine,
        history_config: &HistoryConfig,
        highlighting_enabled: bool,
    ) -> Result<Self> {
        let prompt = FilterPrompt::new(completion_engine.root_model().map(str::to_string));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let completion_menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));

        let mut editor = Reedline::create()
            .with_completer(Box::new(QueryCompleter::new(completion_engine)))
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_highlighter(Box::new(QueryHighlighter::new(highlighting_enabled)))
            .with_validator(Box::new(QueryValidator::new()));

        if history_config.persist {
            if let Some(dir) = history_config.file_path.parent() {
                fs::create_dir_all(dir)?;
            }
            let history =
                FileBackedHistory::with_file(history_config.max_size, history_config.file_path.clone())
                    .map_err(|e| FilterqError::Generic(format!("Failed to open history: {e}")))?;
            debug!("Using history file {}", history_config.file_path.display());
            editor = editor.with_history(Box::new(history));
        }

        Ok(Self {
            editor,
            prompt,
            running: true,
        })
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, empty on Ctrl-C, `None` on Ctrl-D
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlC => Ok(Some(String::new())),
            _ => {
                self.running = false;
                Ok(None)
            }
        }
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }
}
