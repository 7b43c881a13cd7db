//! Cursor context resolution
//!
//! Classifies the editing position from the last one or two completed tokens,
//! whether whitespace follows them, and the raw text being typed. The rules
//! are tried in order and the first match wins:
//!
//! 1. trailing text is exactly `)`: nothing to complete
//! 2. start of input, after a connector, inside a fresh `(`, after a leading
//!    `not`, or a dotted path: field names
//! 3. `<path> <op> `: values for the path
//! 4. `<path> `: comparison operators for the path
//! 5. `<value> ` or `) `: logical connectors
//!
//! Every call starts from scratch; nothing is carried between keystrokes.

use super::context::{CompletionContext, FieldRef};
use super::token_stream::TokenStream;
use crate::parser::TokenKind;
use crate::schema::{ResolvedName, SchemaGraph};
use tracing::trace;

/// Resolve the completion context for `text` with the cursor at character `cursor`
pub fn get_context(
    graph: &SchemaGraph,
    root: Option<&str>,
    text: &str,
    cursor: usize,
) -> CompletionContext {
    let stream = TokenStream::new(text, cursor);
    ContextResolver::new(graph, root).resolve(&stream)
}

/// Context resolver bound to a schema graph and a root model
#[derive(Debug, Clone, Copy)]
pub struct ContextResolver<'a> {
    graph: &'a SchemaGraph,
    root: Option<&'a str>,
}

impl<'a> ContextResolver<'a> {
    pub fn new(graph: &'a SchemaGraph, root: Option<&'a str>) -> Self {
        Self { graph, root }
    }

    /// Classify the cursor position of a token stream
    pub fn resolve(&self, stream: &TokenStream) -> CompletionContext {
        if stream.trailing() == ")" {
            trace!("Cursor right after ')', no completion");
            return CompletionContext::None;
        }

        if Self::enters_field(stream) {
            return self.field_context(stream);
        }

        if !stream.has_leading_whitespace() {
            return CompletionContext::None;
        }

        let prefix = stream.prefix();
        let Some(last) = stream.last() else {
            return CompletionContext::None;
        };

        match last.kind {
            kind if kind.is_comparison() => match stream.before_last() {
                Some(path) if path.kind == TokenKind::Name => self
                    .resolve_path(&path.text)
                    .map(|(model, field)| CompletionContext::value(prefix, model, field))
                    .unwrap_or(CompletionContext::None),
                _ => CompletionContext::None,
            },
            TokenKind::Name => self
                .resolve_path(&last.text)
                .map(|(model, field)| CompletionContext::comparison(prefix, model, field))
                .unwrap_or(CompletionContext::None),
            kind if kind.ends_comparison() => CompletionContext::logical(prefix),
            _ => CompletionContext::None,
        }
    }

    /// Whether the cursor is at the start of a field path
    fn enters_field(stream: &TokenStream) -> bool {
        let spaced = stream.has_leading_whitespace();
        if !spaced && stream.prefix().contains('.') {
            return true;
        }

        let Some(last) = stream.last_kind() else {
            return true;
        };
        let before = stream.before_last_kind();

        match last {
            TokenKind::And | TokenKind::Or => spaced,
            // `not` after a path belongs to `not in`
            TokenKind::Not => {
                spaced
                    && matches!(
                        before,
                        None | Some(TokenKind::And | TokenKind::Or | TokenKind::Not | TokenKind::ParenL)
                    )
            }
            TokenKind::ParenL => matches!(
                before,
                None | Some(TokenKind::And | TokenKind::Or | TokenKind::Not)
            ),
            _ => false,
        }
    }

    /// Field scope, following a dotted prefix through its relations
    fn field_context(&self, stream: &TokenStream) -> CompletionContext {
        let prefix = stream.prefix();
        if !prefix.contains('.') {
            return CompletionContext::field(prefix, self.root);
        }

        // `customer.` lexes as NAME + trailing `.`, so glue the name back on
        let path = match stream.last() {
            Some(last)
                if last.kind == TokenKind::Name
                    && prefix.starts_with('.')
                    && !stream.has_leading_whitespace() =>
            {
                format!("{}{}", last.text, prefix)
            }
            _ => prefix.to_string(),
        };

        let Some((head, tail)) = path.rsplit_once('.') else {
            return CompletionContext::None;
        };

        match self.graph.resolve_name(self.root, head) {
            Some(ResolvedName::Model(model)) => CompletionContext::field(tail, Some(model)),
            _ => {
                trace!("Path '{head}' does not lead to a model");
                CompletionContext::None
            }
        }
    }

    /// Resolve a path to its model and, for terminal paths, its field
    fn resolve_path(&self, path: &str) -> Option<(String, Option<FieldRef>)> {
        let resolved = self.graph.resolve_name(self.root, path)?;
        let field = resolved
            .field()
            .zip(resolved.field_def())
            .map(|(name, def)| FieldRef::new(name, def.clone()));
        Some((resolved.model().to_string(), field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::context::Scope;
    use crate::schema::{FieldDef, ScalarKind};

    fn graph() -> SchemaGraph {
        SchemaGraph::new()
            .with_model(
                "Order",
                [
                    ("customer", FieldDef::relation("Customer")),
                    ("total", FieldDef::scalar(ScalarKind::Float)),
                    ("paid", FieldDef::scalar(ScalarKind::Bool)),
                ],
            )
            .with_model(
                "Customer",
                [
                    ("name", FieldDef::scalar(ScalarKind::Str)),
                    ("address", FieldDef::relation("Address")),
                ],
            )
            .with_model("Address", [("city", FieldDef::scalar(ScalarKind::Str))])
            .with_root_model("Order")
    }

    fn context(text: &str) -> CompletionContext {
        get_context(&graph(), Some("Order"), text, text.chars().count())
    }

    #[test]
    fn test_start_of_input() {
        assert_eq!(
            get_context(&graph(), Some("Order"), "", 0),
            CompletionContext::field("", Some("Order"))
        );
        assert_eq!(context("cust"), CompletionContext::field("cust", Some("Order")));
    }

    #[test]
    fn test_bare_relation_name_then_space() {
        let ctx = context("customer ");
        assert_eq!(ctx, CompletionContext::comparison("", "Customer", None));
    }

    #[test]
    fn test_terminal_field_then_space() {
        let ctx = context("customer.name ");
        assert_eq!(ctx.scope(), Scope::Comparison);
        assert_eq!(ctx.model(), Some("Customer"));
        assert_eq!(ctx.field_ref().map(|f| f.name.as_str()), Some("name"));
    }

    #[test]
    fn test_partial_operator_keeps_comparison() {
        let ctx = context("total >");
        assert_eq!(ctx.scope(), Scope::Comparison);
        assert_eq!(ctx.prefix(), ">");
    }

    #[test]
    fn test_unknown_name_has_no_context() {
        assert!(context("nope ").is_none());
        assert!(context("customer.name.x ").is_none());
    }

    #[test]
    fn test_value_after_operator() {
        let ctx = context("total >= ");
        assert_eq!(ctx.scope(), Scope::Value);
        assert_eq!(ctx.model(), Some("Order"));
        assert_eq!(ctx.field_ref().map(|f| f.name.as_str()), Some("total"));

        let ctx = context("customer.name ~ \"Al");
        assert_eq!(ctx.scope(), Scope::Value);
        assert_eq!(ctx.prefix(), "\"Al");
    }

    #[test]
    fn test_operator_spacing() {
        assert_eq!(context("total >=").scope(), Scope::Comparison);
        assert_eq!(context("total>= ").scope(), Scope::Value);
        assert!(context("total >=1").is_none());
    }

    #[test]
    fn test_logical_after_values() {
        assert_eq!(context("total > 10 "), CompletionContext::logical(""));
        assert_eq!(context("total > 1.5 a"), CompletionContext::logical("a"));
        assert_eq!(
            context("customer.name = \"Bob\" o"),
            CompletionContext::logical("o")
        );
        assert_eq!(context("(paid = True) "), CompletionContext::logical(""));
    }

    #[test]
    fn test_keyword_values_do_not_enter_logical() {
        assert!(context("paid = True ").is_none());
    }

    #[test]
    fn test_after_connector() {
        assert_eq!(
            context("total > 10 and "),
            CompletionContext::field("", Some("Order"))
        );
        assert_eq!(
            context("total > 10 or pa"),
            CompletionContext::field("pa", Some("Order"))
        );
        // Still typing the connector
        assert_eq!(context("total > 10 and"), CompletionContext::logical("and"));
    }

    #[test]
    fn test_closing_paren() {
        assert!(context("(total > 10)").is_none());
        assert_eq!(context("(total > 10) "), CompletionContext::logical(""));
    }

    #[test]
    fn test_opening_paren() {
        assert_eq!(context("("), CompletionContext::field("", Some("Order")));
        assert_eq!(context("(to"), CompletionContext::field("to", Some("Order")));
        assert_eq!(
            context("paid = True and ("),
            CompletionContext::field("", Some("Order"))
        );
        assert_eq!(
            context("paid = True and (cu"),
            CompletionContext::field("cu", Some("Order"))
        );
    }

    #[test]
    fn test_nested_paren_without_connector() {
        assert!(context("((to").is_none());
    }

    #[test]
    fn test_leading_not() {
        assert_eq!(context("not "), CompletionContext::field("", Some("Order")));
        assert_eq!(
            context("paid = True and not pa"),
            CompletionContext::field("pa", Some("Order"))
        );
        assert_eq!(context("not (to"), CompletionContext::field("to", Some("Order")));
        assert_eq!(context("not ("), CompletionContext::field("", Some("Order")));
        assert_eq!(
            context("total > 1 and not "),
            CompletionContext::field("", Some("Order"))
        );
    }

    #[test]
    fn test_not_after_path_is_not_field() {
        let total = FieldRef::new("total", FieldDef::scalar(ScalarKind::Float));
        assert_eq!(
            context("total not"),
            CompletionContext::comparison("not", "Order", Some(total))
        );
        assert!(context("total not ").is_none());
    }

    #[test]
    fn test_dotted_path() {
        assert_eq!(
            context("customer."),
            CompletionContext::field("", Some("Customer"))
        );
        assert_eq!(
            context("customer.na"),
            CompletionContext::field("na", Some("Customer"))
        );
        assert_eq!(
            context("customer.address.ci"),
            CompletionContext::field("ci", Some("Address"))
        );
        assert_eq!(
            context("customer.address."),
            CompletionContext::field("", Some("Address"))
        );
        assert_eq!(
            context("paid = True and customer.na"),
            CompletionContext::field("na", Some("Customer"))
        );
    }

    #[test]
    fn test_dotted_path_through_scalar_fails() {
        assert!(context("total.").is_none());
        assert!(context("customer.name.x").is_none());
        assert!(context("nope.x").is_none());
    }

    #[test]
    fn test_no_root_model() {
        let graph = graph();
        assert_eq!(
            get_context(&graph, None, "", 0),
            CompletionContext::field("", None::<String>)
        );
        assert!(get_context(&graph, None, "customer ", 9).is_none());
    }

    #[test]
    fn test_cursor_in_middle() {
        let graph = graph();
        let text = "total > 10 and paid = True";
        assert_eq!(
            get_context(&graph, Some("Order"), text, 0),
            CompletionContext::field("", Some("Order"))
        );
        assert_eq!(
            get_context(&graph, Some("Order"), text, 2),
            CompletionContext::field("to", Some("Order"))
        );
        assert_eq!(get_context(&graph, Some("Order"), text, 6).scope(), Scope::Comparison);
        assert_eq!(get_context(&graph, Some("Order"), text, 11), CompletionContext::logical(""));
    }
}
