//! Schema graph and dotted-path name resolution
//!
//! A schema is a set of models, each declaring fields that are either scalars
//! (`str`, `int`, `float`, `bool`, ...) or relations to another model. Relations
//! are what make dotted paths such as `customer.address.city` meaningful.
//!
//! The graph is owned by the caller and only ever read by the completion core, so
//! a single graph can back any number of independent inputs.
//!
//! # Examples
//!
//! ```
//! use filterq::schema::{FieldDef, ResolvedName, ScalarKind, SchemaGraph};
//!
//! let graph = SchemaGraph::new()
//!     .with_model("Order", [("customer", FieldDef::relation("Customer"))])
//!     .with_model("Customer", [("name", FieldDef::scalar(ScalarKind::Str))])
//!     .with_root_model("Order");
//!
//! let resolved = graph.resolve_name(Some("Order"), "customer.name").unwrap();
//! assert_eq!(resolved.model(), "Customer");
//! assert_eq!(resolved.field(), Some("name"));
//! ```

mod loader;

use indexmap::IndexMap;
use std::fmt;

/// Fields of one model, in declaration order
pub type FieldMap = IndexMap<String, FieldDef>;

/// Scalar value kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Str,
    Int,
    Float,
    Bool,
    /// Any other scalar type name (dates, decimals, ...)
    Other(String),
}

impl ScalarKind {
    /// Map a schema type name to a scalar kind
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "str" => ScalarKind::Str,
            "int" => ScalarKind::Int,
            "float" => ScalarKind::Float,
            "bool" => ScalarKind::Bool,
            other => ScalarKind::Other(other.to_string()),
        }
    }

    /// The schema type name for this kind
    pub fn as_str(&self) -> &str {
        match self {
            ScalarKind::Str => "str",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "bool",
            ScalarKind::Other(name) => name,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of a single field
///
/// A relation never carries a scalar kind, and a scalar never names a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDef {
    /// Terminal field holding a value
    Scalar(ScalarKind),
    /// Reference to another model, by name
    Relation(String),
}

impl FieldDef {
    pub fn scalar(kind: ScalarKind) -> Self {
        FieldDef::Scalar(kind)
    }

    pub fn relation(target: impl Into<String>) -> Self {
        FieldDef::Relation(target.into())
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, FieldDef::Relation(_))
    }

    /// Scalar kind, if this is a terminal field
    pub fn scalar_kind(&self) -> Option<&ScalarKind> {
        match self {
            FieldDef::Scalar(kind) => Some(kind),
            FieldDef::Relation(_) => None,
        }
    }

    /// Target model, if this is a relation
    pub fn relation_target(&self) -> Option<&str> {
        match self {
            FieldDef::Relation(target) => Some(target),
            FieldDef::Scalar(_) => None,
        }
    }
}

/// Result of walking a dotted path
///
/// Failure is expressed by [`SchemaGraph::resolve_name`] returning `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedName<'a> {
    /// The path ends on a model that can be traversed further
    Model(&'a str),
    /// The path ends on a scalar field of `model`
    Field {
        model: &'a str,
        name: &'a str,
        def: &'a FieldDef,
    },
}

impl<'a> ResolvedName<'a> {
    /// Model the path ends in (the owner of the field for terminal paths)
    pub fn model(&self) -> &'a str {
        match self {
            ResolvedName::Model(model) => model,
            ResolvedName::Field { model, .. } => model,
        }
    }

    /// Terminal field name, if any
    pub fn field(&self) -> Option<&'a str> {
        match self {
            ResolvedName::Model(_) => None,
            ResolvedName::Field { name, .. } => Some(name),
        }
    }

    /// Terminal field definition, if any
    pub fn field_def(&self) -> Option<&'a FieldDef> {
        match self {
            ResolvedName::Model(_) => None,
            ResolvedName::Field { def, .. } => Some(def),
        }
    }
}

/// Mapping from model name to its fields, plus the model queries start from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaGraph {
    models: IndexMap<String, FieldMap>,
    root_model: Option<String>,
}

impl SchemaGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a model
    pub fn with_model<I, K>(mut self, name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldDef)>,
        K: Into<String>,
    {
        self.insert_model(name, fields.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    /// Set the model completion starts from
    pub fn with_root_model(mut self, model: impl Into<String>) -> Self {
        self.root_model = Some(model.into());
        self
    }

    /// Add (or replace) a model in place
    pub fn insert_model(&mut self, name: impl Into<String>, fields: FieldMap) {
        self.models.insert(name.into(), fields);
    }

    /// Override the root model
    pub fn set_root_model(&mut self, model: Option<String>) {
        self.root_model = model;
    }

    pub fn root_model(&self) -> Option<&str> {
        self.root_model.as_deref()
    }

    pub fn model(&self, name: &str) -> Option<&FieldMap> {
        self.models.get(name)
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Look up a single field
    pub fn field(&self, model: &str, field: &str) -> Option<&FieldDef> {
        self.models.get(model)?.get(field)
    }

    /// Field names of a model in declaration order (empty for unknown models)
    pub fn field_names(&self, model: &str) -> Vec<&str> {
        self.models
            .get(model)
            .map(|fields| fields.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Relation fields whose target model does not exist, as `(model, field, target)`
    pub fn dangling_relations(&self) -> Vec<(&str, &str, &str)> {
        self.models
            .iter()
            .flat_map(|(model, fields)| {
                fields.iter().filter_map(move |(field, def)| {
                    def.relation_target()
                        .filter(|target| !self.models.contains_key(*target))
                        .map(|target| (model.as_str(), field.as_str(), target))
                })
            })
            .collect()
    }

    /// Resolve a dotted field path starting at `root`
    ///
    /// Each segment is looked up in the current model. Relations move the walk to
    /// their target model; a scalar ends it, so any segment after a scalar fails.
    /// Unknown segments, unknown models and a missing root all yield `None`.
    pub fn resolve_name(&self, root: Option<&str>, path: &str) -> Option<ResolvedName<'_>> {
        let (root, _) = self.models.get_key_value(root?)?;
        let mut model = root.as_str();
        let mut terminal: Option<(&str, &FieldDef)> = None;

        for segment in path.split('.') {
            if terminal.is_some() {
                return None;
            }

            let (name, def) = self.models.get(model)?.get_key_value(segment)?;
            match def {
                FieldDef::Relation(target) => model = target.as_str(),
                FieldDef::Scalar(_) => terminal = Some((name.as_str(), def)),
            }
        }

        match terminal {
            Some((name, def)) => Some(ResolvedName::Field { model, name, def }),
            None => {
                // A dangling relation target is treated as not found
                let (model, _) = self.models.get_key_value(model)?;
                Some(ResolvedName::Model(model))
            }
        }
    }
}
