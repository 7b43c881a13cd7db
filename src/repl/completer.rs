//! Completer for reedline - provides completion suggestions

use reedline::{Completer, Span, Suggestion};

use crate::completion::CompletionEngine;

/// Filter query completer for reedline
pub struct QueryCompleter {
    /// Completion engine for context-aware suggestions
    completion_engine: CompletionEngine,
}

impl QueryCompleter {
    pub fn new(completion_engine: CompletionEngine) -> Self {
        Self { completion_engine }
    }
}

impl Completer for QueryCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let (start, candidates) = self.completion_engine.complete_line(line, pos);

        candidates
            .into_iter()
            .map(|value| Suggestion {
                value,
                description: None,
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, ScalarKind, SchemaGraph};
    use std::sync::Arc;

    fn create_test_completer() -> QueryCompleter {
        let schema = SchemaGraph::new()
            .with_model(
                "Order",
                [
                    ("customer", FieldDef::relation("Customer")),
                    ("total", FieldDef::scalar(ScalarKind::Int)),
                ],
            )
            .with_model("Customer", [("name", FieldDef::scalar(ScalarKind::Str))])
            .with_root_model("Order");
        QueryCompleter::new(CompletionEngine::new(Arc::new(schema)))
    }

    #[test]
    fn test_complete_fields() {
        let mut completer = create_test_completer();
        let values: Vec<String> = completer
            .complete("", 0)
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, vec!["customer", "total"]);
    }

    #[test]
    fn test_span_position() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("customer.na", 11);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "name");
        assert_eq!(suggestions[0].span.start, 9);
        assert_eq!(suggestions[0].span.end, 11);
    }

    #[test]
    fn test_operator_span() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("total >", 7);

        assert!(suggestions.iter().all(|s| s.span.start == 6));
        assert!(suggestions.iter().any(|s| s.value == ">="));
    }
}
