//! JSON schema ingestion
//!
//! Expected document shape:
//!
//! ```json
//! {
//!   "currentModel": "Order",
//!   "models": {
//!     "Order": {
//!       "customer": { "type": "relation", "relation": "Customer" },
//!       "total": { "type": "float" }
//!     },
//!     "Customer": { "name": { "type": "str" } }
//!   }
//! }
//! ```

use super::{FieldDef, FieldMap, ScalarKind, SchemaGraph};
use crate::error::{Result, SchemaError};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const RELATION_TYPE: &str = "relation";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    #[serde(default, alias = "rootModel")]
    current_model: Option<String>,
    models: IndexMap<String, IndexMap<String, RawField>>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    relation: Option<String>,
}

impl RawField {
    fn into_field_def(self, model: &str, field: &str) -> std::result::Result<FieldDef, SchemaError> {
        let invalid = |reason: &str| SchemaError::InvalidField {
            model: model.to_string(),
            field: field.to_string(),
            reason: reason.to_string(),
        };

        match (self.kind.as_str(), self.relation) {
            (RELATION_TYPE, Some(target)) if !target.is_empty() => Ok(FieldDef::Relation(target)),
            (RELATION_TYPE, _) => Err(invalid("relation field has no target model")),
            (_, Some(_)) => Err(invalid("only relation fields may name a target model")),
            (kind, None) => Ok(FieldDef::Scalar(ScalarKind::from_type_name(kind))),
        }
    }
}

impl SchemaGraph {
    /// Parse a schema graph from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        // Shape checks first so the common mistakes get precise errors
        let value: serde_json::Value = serde_json::from_str(json).map_err(SchemaError::from)?;
        let Some(object) = value.as_object() else {
            return Err(SchemaError::NotAnObject.into());
        };
        if !object.contains_key("models") {
            return Err(SchemaError::MissingModels.into());
        }

        // Deserialize straight from the text to keep field declaration order
        let raw: RawSchema = serde_json::from_str(json).map_err(SchemaError::from)?;
        let graph = Self::from_raw(raw)?;

        for (model, field, target) in graph.dangling_relations() {
            warn!("Relation '{model}.{field}' points to unknown model '{target}'");
        }
        if let Some(root) = graph.root_model()
            && !graph.has_model(root)
        {
            warn!("Root model '{root}' is not defined in the schema");
        }

        debug!("Loaded schema with {} models", graph.model_count());
        Ok(graph)
    }

    /// Read and parse a schema graph from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading schema from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn from_raw(raw: RawSchema) -> std::result::Result<Self, SchemaError> {
        let mut graph = SchemaGraph::new();

        for (model, raw_fields) in raw.models {
            let mut fields = FieldMap::with_capacity(raw_fields.len());
            for (field, raw_field) in raw_fields {
                let def = raw_field.into_field_def(&model, &field)?;
                fields.insert(field, def);
            }
            graph.insert_model(model, fields);
        }

        graph.set_root_model(raw.current_model);
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterqError;

    const ORDER_SCHEMA: &str = r#"{
        "currentModel": "Order",
        "models": {
            "Order": {
                "customer": { "type": "relation", "relation": "Customer" },
                "total": { "type": "float" },
                "paid": { "type": "bool" }
            },
            "Customer": {
                "name": { "type": "str" },
                "joined": { "type": "datetime" }
            }
        }
    }"#;

    fn schema_error(result: Result<SchemaGraph>) -> SchemaError {
        match result {
            Err(FilterqError::Schema(e)) => e,
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_valid_schema() {
        let graph = SchemaGraph::from_json_str(ORDER_SCHEMA).unwrap();

        assert_eq!(graph.model_count(), 2);
        assert_eq!(graph.root_model(), Some("Order"));
        assert_eq!(
            graph.field("Order", "customer"),
            Some(&FieldDef::relation("Customer"))
        );
        assert_eq!(
            graph.field("Customer", "joined"),
            Some(&FieldDef::scalar(ScalarKind::Other("datetime".to_string())))
        );
    }

    #[test]
    fn test_declaration_order_preserved() {
        let json = r#"{"models": {"M": {
            "zeta": {"type": "int"},
            "alpha": {"type": "int"},
            "mid": {"type": "int"}
        }}}"#;
        let graph = SchemaGraph::from_json_str(json).unwrap();
        assert_eq!(graph.field_names("M"), vec!["zeta", "alpha", "mid"]);
        assert_eq!(graph.root_model(), None);
    }

    #[test]
    fn test_not_an_object() {
        let err = schema_error(SchemaGraph::from_json_str("[1, 2]"));
        assert!(matches!(err, SchemaError::NotAnObject));
    }

    #[test]
    fn test_missing_models() {
        let err = schema_error(SchemaGraph::from_json_str(r#"{"currentModel": "Order"}"#));
        assert!(matches!(err, SchemaError::MissingModels));
    }

    #[test]
    fn test_invalid_json() {
        let err = schema_error(SchemaGraph::from_json_str("{ models"));
        assert!(matches!(err, SchemaError::InvalidFormat(_)));
    }

    #[test]
    fn test_relation_without_target() {
        let json = r#"{"models": {"Order": {"customer": {"type": "relation"}}}}"#;
        let err = schema_error(SchemaGraph::from_json_str(json));
        match err {
            SchemaError::InvalidField { model, field, .. } => {
                assert_eq!(model, "Order");
                assert_eq!(field, "customer");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_scalar_with_target_rejected() {
        let json = r#"{"models": {"Order": {"total": {"type": "int", "relation": "Customer"}}}}"#;
        let err = schema_error(SchemaGraph::from_json_str(json));
        assert!(matches!(err, SchemaError::InvalidField { .. }));
    }

    #[test]
    fn test_dangling_relation_loads() {
        let json = r#"{"currentModel": "Order", "models": {
            "Order": {"warehouse": {"type": "relation", "relation": "Warehouse"}}
        }}"#;
        let graph = SchemaGraph::from_json_str(json).unwrap();
        assert_eq!(graph.resolve_name(Some("Order"), "warehouse"), None);
    }

    #[test]
    fn test_from_missing_file() {
        let result = SchemaGraph::from_file("/nonexistent/filterq/schema.json");
        assert!(matches!(result, Err(FilterqError::Io(_))));
    }
}
