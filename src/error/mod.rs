//! Error handling module for filterq.
//!
//! Completion itself never fails: malformed input and unresolvable names simply
//! produce no suggestions. Errors only surface at the boundaries:
//! - Schema ingestion (the graph handed to the core is malformed)
//! - Configuration loading
//! - Terminal and file I/O in the CLI and REPL
//!
//! # Example
//!
//! ```rust,no_run
//! use filterq::error::{FilterqError, Result};
//! use filterq::schema::SchemaGraph;
//!
//! fn load() -> Result<SchemaGraph> {
//!     SchemaGraph::from_file("schema.json")
//! }
//!
//! match load() {
//!     Ok(graph) => println!("{} models", graph.model_count()),
//!     Err(FilterqError::Schema(e)) => eprintln!("bad schema: {e}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod kinds;

pub use kinds::{ConfigError, FilterqError, Result, SchemaError};
