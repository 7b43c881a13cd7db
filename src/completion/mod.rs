//! Context-aware completion for filter queries
//!
//! Given the text typed so far and the cursor position, the completion core
//! decides what kind of token comes next and lists the valid candidates.
//!
//! # Architecture
//!
//! - **TokenStream**: completed tokens before the cursor plus the raw text being typed
//! - **ContextResolver**: ordered rules mapping the stream to a [`CompletionContext`]
//! - **Provider**: candidate lists per scope and the prefix filter
//! - **Engine**: orchestrates the flow for front-ends
//!
//! Everything here is a pure function of the schema, text and cursor.
//!
//! # Examples
//!
//! ```
//! use filterq::completion::compute_suggestions;
//! use filterq::schema::{FieldDef, ScalarKind, SchemaGraph};
//!
//! let graph = SchemaGraph::new()
//!     .with_model("Order", [("paid", FieldDef::scalar(ScalarKind::Bool))])
//!     .with_root_model("Order");
//!
//! let result = compute_suggestions(&graph, "paid ", 5);
//! assert_eq!(result.suggestions, vec!["=", "!="]);
//! ```

mod context;
mod engine;
mod provider;
mod resolver;
mod token_stream;


pub use context::{CompletionContext, FieldRef, Scope};
pub use engine::{CompletionEngine, Suggestions, compute_suggestions};
pub use provider::{
    CONNECTORS, StaticValueSource, ValueSource, comparison_operators, filter_by_prefix, suggest,
};
pub use resolver::{ContextResolver, get_context};
pub use token_stream::TokenStream;
