//! Prompt showing the model queries start from

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};
use std::borrow::Cow;

/// Prompt for the filterq REPL
pub struct FilterPrompt {
    /// Root model, if the schema has one
    model: Option<String>,
}

impl FilterPrompt {
    pub fn new(model: Option<String>) -> Self {
        Self { model }
    }
}

impl Prompt for FilterPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        match &self.model {
            Some(model) => format!("{model}> ").into(),
            None => "filterq> ".into(),
        }
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_prompt() {
        let prompt = FilterPrompt::new(Some("Order".to_string()));
        assert_eq!(prompt.render_prompt_left(), "Order> ");
    }

    #[test]
    fn test_prompt_without_model() {
        let prompt = FilterPrompt::new(None);
        assert_eq!(prompt.render_prompt_left(), "filterq> ");
    }

    #[test]
    fn test_indicators() {
        let prompt = FilterPrompt::new(None);
        assert_eq!(prompt.render_prompt_right(), "");
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Default), "");
        assert_eq!(prompt.render_prompt_multiline_indicator(), "... ");
    }
}
