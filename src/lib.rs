//! filterq library
//!
//! Context-aware autocompletion for a small filter query language over a
//! schema of models with typed, possibly relational, fields.
//!
//! # Modules
//!
//! - `parser`: Tokenizer for the query language
//! - `schema`: Schema graph, JSON ingestion and dotted-path resolution
//! - `completion`: Cursor context resolution and suggestion generation
//! - `repl`: Interactive line editor wired to the completion engine
//! - `formatter`: Plain and JSON output
//! - `config`: Configuration management
//! - `cli`: Command-line interface
//! - `error`: Error types and handling
//!
//! # Example
//!
//! ```
//! use filterq::{SchemaGraph, compute_suggestions};
//!
//! let graph = SchemaGraph::from_json_str(r#"{
//!     "currentModel": "Order",
//!     "models": {
//!         "Order": { "customer": { "type": "relation", "relation": "Customer" } },
//!         "Customer": { "name": { "type": "str" }, "nationality": { "type": "str" } }
//!     }
//! }"#)?;
//!
//! let result = compute_suggestions(&graph, "customer.na", 11);
//! assert_eq!(result.prefix, "na");
//! assert_eq!(result.suggestions, vec!["name", "nationality"]);
//! # Ok::<(), filterq::FilterqError>(())
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod repl;
pub mod schema;

// Re-export commonly used types
pub use completion::{CompletionContext, CompletionEngine, Scope, Suggestions, compute_suggestions};
pub use config::Config;
pub use error::{FilterqError, Result};
pub use parser::{Token, TokenKind, tokenize};
pub use repl::ReplEngine;
pub use schema::{FieldDef, ResolvedName, ScalarKind, SchemaGraph};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}
