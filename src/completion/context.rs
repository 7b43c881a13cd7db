//! Completion context definitions
//!
//! A context describes what kind of token the user is about to type at the
//! cursor, which model and field it applies to, and the text typed so far.

use crate::schema::FieldDef;
use std::fmt;

/// Grammatical category of the token being typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Field,
    Comparison,
    Value,
    Logical,
    None,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Field => "FIELD",
            Scope::Comparison => "COMPARISON",
            Scope::Value => "VALUE",
            Scope::Logical => "LOGICAL",
            Scope::None => "NONE",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal field a comparison or value applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub name: String,
    pub def: FieldDef,
}

impl FieldRef {
    pub fn new(name: impl Into<String>, def: FieldDef) -> Self {
        Self {
            name: name.into(),
            def,
        }
    }
}

/// Represents the type of completion needed at the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// Complete field names of a model
    Field {
        /// Prefix to filter field names
        prefix: String,
        /// Model whose fields are listed (unset when the schema has no root)
        model: Option<String>,
    },

    /// Complete a comparison operator for a resolved path
    Comparison {
        prefix: String,
        model: String,
        /// Unset when the path ends on a relation
        field: Option<FieldRef>,
    },

    /// Complete a value for a resolved path
    Value {
        prefix: String,
        model: String,
        field: Option<FieldRef>,
    },

    /// Complete a logical connector (`and`, `or`)
    Logical { prefix: String },

    /// No completion available
    None,
}

impl CompletionContext {
    /// Create a field completion context
    pub fn field(prefix: impl Into<String>, model: Option<impl Into<String>>) -> Self {
        Self::Field {
            prefix: prefix.into(),
            model: model.map(Into::into),
        }
    }

    /// Create a comparison completion context
    pub fn comparison(
        prefix: impl Into<String>,
        model: impl Into<String>,
        field: Option<FieldRef>,
    ) -> Self {
        Self::Comparison {
            prefix: prefix.into(),
            model: model.into(),
            field,
        }
    }

    /// Create a value completion context
    pub fn value(prefix: impl Into<String>, model: impl Into<String>, field: Option<FieldRef>) -> Self {
        Self::Value {
            prefix: prefix.into(),
            model: model.into(),
            field,
        }
    }

    /// Create a logical connector completion context
    pub fn logical(prefix: impl Into<String>) -> Self {
        Self::Logical {
            prefix: prefix.into(),
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            Self::Field { .. } => Scope::Field,
            Self::Comparison { .. } => Scope::Comparison,
            Self::Value { .. } => Scope::Value,
            Self::Logical { .. } => Scope::Logical,
            Self::None => Scope::None,
        }
    }

    /// Get the prefix for this context (always empty for `None`)
    pub fn prefix(&self) -> &str {
        match self {
            Self::Field { prefix, .. } => prefix,
            Self::Comparison { prefix, .. } => prefix,
            Self::Value { prefix, .. } => prefix,
            Self::Logical { prefix } => prefix,
            Self::None => "",
        }
    }

    /// Model the completion applies to, if any
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Field { model, .. } => model.as_deref(),
            Self::Comparison { model, .. } | Self::Value { model, .. } => Some(model),
            Self::Logical { .. } | Self::None => None,
        }
    }

    /// Terminal field the completion applies to, if any
    pub fn field_ref(&self) -> Option<&FieldRef> {
        match self {
            Self::Comparison { field, .. } | Self::Value { field, .. } => field.as_ref(),
            _ => None,
        }
    }

    /// Check if this is a None context
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ScalarKind;

    #[test]
    fn test_field_context() {
        let ctx = CompletionContext::field("na", Some("Order"));
        assert_eq!(ctx.prefix(), "na");
        assert_eq!(ctx.model(), Some("Order"));
        assert_eq!(ctx.scope(), Scope::Field);
        assert!(!ctx.is_none());
    }

    #[test]
    fn test_field_context_without_model() {
        let ctx = CompletionContext::field("", None::<String>);
        assert_eq!(ctx.model(), None);
    }

    #[test]
    fn test_comparison_context() {
        let field = FieldRef::new("name", FieldDef::scalar(ScalarKind::Str));
        let ctx = CompletionContext::comparison("!", "Customer", Some(field.clone()));

        assert_eq!(ctx.scope(), Scope::Comparison);
        assert_eq!(ctx.model(), Some("Customer"));
        assert_eq!(ctx.field_ref(), Some(&field));
    }

    #[test]
    fn test_logical_context_has_no_model() {
        let ctx = CompletionContext::logical("a");
        assert_eq!(ctx.prefix(), "a");
        assert_eq!(ctx.model(), None);
        assert_eq!(ctx.field_ref(), None);
    }

    #[test]
    fn test_none_context() {
        let ctx = CompletionContext::None;
        assert_eq!(ctx.prefix(), "");
        assert_eq!(ctx.scope(), Scope::None);
        assert!(ctx.is_none());
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::Field.to_string(), "FIELD");
        assert_eq!(Scope::Comparison.to_string(), "COMPARISON");
        assert_eq!(Scope::None.to_string(), "NONE");
    }
}
