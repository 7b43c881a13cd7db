//! Candidate generation for completion suggestions
//!
//! Candidates come from the schema (field names), fixed operator and connector
//! sets, and an optional [`ValueSource`] for values.

use indexmap::IndexMap;
use std::fs;
use std::path::Path;

use super::context::CompletionContext;
use crate::error::{ConfigError, Result};
use crate::schema::{FieldDef, ScalarKind, SchemaGraph};

/// Operators valid for every field
const EQUALITY_OPERATORS: &[&str] = &["=", "!="];

/// Substring operators, string fields only
const CONTAINS_OPERATORS: &[&str] = &["~", "!~"];

/// Ordering and membership operators, all non-boolean fields
const ORDERING_OPERATORS: &[&str] = &[">", ">=", "<", "<=", "in", "not in"];

/// Logical connectors
pub const CONNECTORS: &[&str] = &["and", "or"];

/// Trait for listing candidate values of a field
pub trait ValueSource: Send + Sync {
    /// Get values for `model.field`
    ///
    /// `field` is unset when the path ends on a relation. Implementations may
    /// narrow by `prefix`; the result is filtered by prefix again regardless.
    fn list_values(&self, model: &str, field: Option<&str>, prefix: &str) -> Vec<String>;
}

/// Value source backed by a fixed table of values per field
///
/// Loaded from JSON shaped as `{ "Model": { "field": ["value", ...] } }`.
#[derive(Debug, Clone, Default)]
pub struct StaticValueSource {
    values: IndexMap<String, IndexMap<String, Vec<String>>>,
}

impl StaticValueSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add values for a field
    pub fn with_values<I, S>(mut self, model: &str, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values
            .entry(model.to_string())
            .or_default()
            .insert(field.to_string(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let values = serde_json::from_str(json)
            .map_err(|e| ConfigError::InvalidFormat(format!("value table: {e}")))?;
        Ok(Self { values })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
        Self::from_json_str(&json)
    }
}

impl ValueSource for StaticValueSource {
    fn list_values(&self, model: &str, field: Option<&str>, _prefix: &str) -> Vec<String> {
        field
            .and_then(|field| self.values.get(model)?.get(field))
            .cloned()
            .unwrap_or_default()
    }
}

/// Comparison operators for a field, in suggestion order
///
/// Paths ending on a relation only compare for equality.
pub fn comparison_operators(field: Option<&FieldDef>) -> Vec<&'static str> {
    let mut operators = EQUALITY_OPERATORS.to_vec();
    let Some(kind) = field.and_then(FieldDef::scalar_kind) else {
        return operators;
    };

    if *kind == ScalarKind::Bool {
        return operators;
    }
    if *kind == ScalarKind::Str {
        operators.extend_from_slice(CONTAINS_OPERATORS);
    }
    operators.extend_from_slice(ORDERING_OPERATORS);
    operators
}

/// Raw, unfiltered candidates for a context
pub fn candidates(
    graph: &SchemaGraph,
    context: &CompletionContext,
    values: Option<&dyn ValueSource>,
) -> Vec<String> {
    match context {
        CompletionContext::Field { model, .. } => model
            .as_deref()
            .map(|model| {
                graph
                    .field_names(model)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        CompletionContext::Comparison { field, .. } => {
            comparison_operators(field.as_ref().map(|f| &f.def))
                .into_iter()
                .map(str::to_string)
                .collect()
        }
        CompletionContext::Value {
            prefix,
            model,
            field,
        } => {
            let field = field.as_ref().map(|f| f.name.as_str());
            values
                .map(|source| source.list_values(model, field, prefix))
                .unwrap_or_default()
        }
        CompletionContext::Logical { .. } => CONNECTORS.iter().map(|c| c.to_string()).collect(),
        CompletionContext::None => Vec::new(),
    }
}

/// Keep items starting with `prefix` (case-sensitive), preserving order
pub fn filter_by_prefix(items: Vec<String>, prefix: &str) -> Vec<String> {
    if prefix.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.starts_with(prefix))
        .collect()
}

/// Suggestions for a context: its candidates filtered by its prefix
pub fn suggest(
    graph: &SchemaGraph,
    context: &CompletionContext,
    values: Option<&dyn ValueSource>,
) -> Vec<String> {
    filter_by_prefix(candidates(graph, context, values), context.prefix())
}
