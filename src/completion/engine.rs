//! Completion engine - orchestrates the completion flow
//!
//! Ties the pieces together: token stream, context resolution and candidate
//! generation. The engine holds the schema and optional value source so that
//! front-ends only pass text and cursor.

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::context::CompletionContext;
use super::provider::{self, ValueSource};
use super::resolver::ContextResolver;
use super::token_stream::TokenStream;
use crate::schema::SchemaGraph;

/// Pipeline output: the prefix being completed and the matching candidates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    /// Text the suggestions replace, ending at the cursor
    pub prefix: String,
    /// Candidates starting with `prefix`
    pub suggestions: Vec<String>,
}

impl Suggestions {
    /// Build suggestions for a resolved context
    pub fn for_context(
        graph: &SchemaGraph,
        context: &CompletionContext,
        values: Option<&dyn ValueSource>,
    ) -> Self {
        Self {
            prefix: context.prefix().to_string(),
            suggestions: provider::suggest(graph, context, values),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// Run the whole pipeline once, starting at the graph's root model
///
/// `cursor` is a character index into `text`.
pub fn compute_suggestions(graph: &SchemaGraph, text: &str, cursor: usize) -> Suggestions {
    let stream = TokenStream::new(text, cursor);
    let context = ContextResolver::new(graph, graph.root_model()).resolve(&stream);
    Suggestions::for_context(graph, &context, None)
}

/// Main completion engine
#[derive(Clone)]
pub struct CompletionEngine {
    /// Schema the completions are drawn from
    schema: Arc<SchemaGraph>,
    /// Root model override; the schema's own root when unset
    root_model: Option<String>,
    /// Optional source for value completions
    values: Option<Arc<dyn ValueSource>>,
}

impl CompletionEngine {
    /// Create a new completion engine
    pub fn new(schema: Arc<SchemaGraph>) -> Self {
        Self {
            schema,
            root_model: None,
            values: None,
        }
    }

    /// Start completion from a different model than the schema's root
    pub fn with_root_model(mut self, model: impl Into<String>) -> Self {
        self.root_model = Some(model.into());
        self
    }

    /// Use a value source for value completions
    pub fn with_value_source(mut self, values: Arc<dyn ValueSource>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn schema(&self) -> &SchemaGraph {
        &self.schema
    }

    /// Model completion starts from
    pub fn root_model(&self) -> Option<&str> {
        self.root_model
            .as_deref()
            .or_else(|| self.schema.root_model())
    }

    /// Resolve the completion context at character `cursor`
    pub fn context(&self, text: &str, cursor: usize) -> CompletionContext {
        let stream = TokenStream::new(text, cursor);
        ContextResolver::new(&self.schema, self.root_model()).resolve(&stream)
    }

    /// Complete the input at character `cursor`
    pub fn complete(&self, text: &str, cursor: usize) -> Suggestions {
        let context = self.context(text, cursor);
        let suggestions = Suggestions::for_context(&self.schema, &context, self.values.as_deref());

        debug!(
            "Completion at {cursor}: {} prefix={:?} candidates={}",
            context.scope(),
            suggestions.prefix,
            suggestions.suggestions.len()
        );
        suggestions
    }

    /// Complete a line with the cursor at byte offset `pos`
    ///
    /// # Returns
    /// * `(usize, Vec<String>)` - Byte offset where the replacement starts, and candidates
    pub fn complete_line(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let head = line.get(..pos).unwrap_or(line);
        let result = self.complete(line, head.chars().count());

        // The prefix always ends at the cursor
        let start = head.len().saturating_sub(result.prefix.len());
        (start, result.suggestions)
    }
}

impl std::fmt::Debug for CompletionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionEngine")
            .field("models", &self.schema.model_count())
            .field("root_model", &self.root_model())
            .field("values", &self.values.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::provider::StaticValueSource;
    use crate::schema::{FieldDef, ScalarKind};

    fn create_test_engine() -> CompletionEngine {
        let schema = SchemaGraph::new()
            .with_model(
                "Order",
                [
                    ("customer", FieldDef::relation("Customer")),
                    ("total", FieldDef::scalar(ScalarKind::Float)),
                    ("status", FieldDef::scalar(ScalarKind::Str)),
                ],
            )
            .with_model("Customer", [("name", FieldDef::scalar(ScalarKind::Str))])
            .with_root_model("Order");
        CompletionEngine::new(Arc::new(schema))
    }

    #[test]
    fn test_complete_empty_input() {
        let engine = create_test_engine();
        let result = engine.complete("", 0);
        assert_eq!(result.prefix, "");
        assert_eq!(result.suggestions, vec!["customer", "total", "status"]);
    }

    #[test]
    fn test_complete_dotted_path() {
        let engine = create_test_engine();
        let result = engine.complete("customer.n", 10);
        assert_eq!(result.prefix, "n");
        assert_eq!(result.suggestions, vec!["name"]);
    }

    #[test]
    fn test_none_scope_forces_empty_prefix() {
        let engine = create_test_engine();
        let result = engine.complete("total >=1", 9);
        assert_eq!(result, Suggestions::default());
    }

    #[test]
    fn test_root_model_override() {
        let engine = create_test_engine().with_root_model("Customer");
        assert_eq!(engine.root_model(), Some("Customer"));
        assert_eq!(engine.complete("", 0).suggestions, vec!["name"]);
    }

    #[test]
    fn test_value_source() {
        let values = StaticValueSource::new().with_values("Order", "status", ["\"open\"", "\"closed\""]);
        let engine = create_test_engine().with_value_source(Arc::new(values));

        let result = engine.complete("status = \"o", 11);
        assert_eq!(result.prefix, "\"o");
        assert_eq!(result.suggestions, vec!["\"open\""]);
    }

    #[test]
    fn test_complete_line_byte_offsets() {
        let engine = create_test_engine();
        let line = "status = \"é\" and cu";

        let (start, candidates) = engine.complete_line(line, line.len());
        assert_eq!(&line[start..], "cu");
        assert_eq!(candidates, vec!["customer"]);
    }

    #[test]
    fn test_complete_line_cursor_in_middle() {
        let engine = create_test_engine();
        let (start, candidates) = engine.complete_line("tot > 1", 3);
        assert_eq!(start, 0);
        assert_eq!(candidates, vec!["total"]);
    }

    #[test]
    fn test_compute_suggestions_matches_engine() {
        let engine = create_test_engine();
        let text = "customer.name ";
        assert_eq!(
            compute_suggestions(engine.schema(), text, 14),
            engine.complete(text, 14)
        );
    }
}
