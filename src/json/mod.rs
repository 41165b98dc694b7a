//! # JSON Export
//!
//! The `graphql_query_doc::json` module exports AST Nodes to `serde_json` values.
//!
//! All AST Nodes implement [serde::Serialize] in a tagged form, where selections and values are
//! objects carrying a `"type"` discriminator. The [ToJson] trait is a shorthand for converting any
//! AST Node into a [serde_json::Value] in this form.
//!
//! ```
//! use graphql_query_doc::{ast::*, json::ToJson};
//!
//! let ctx = ASTContext::new();
//! let ast = Document::parse(&ctx, "{ hero }").unwrap();
//! assert_eq!(
//!     ast.to_json(),
//!     serde_json::json!({
//!         "operations": {
//!             "": { "type": "query", "selection_set": [{ "type": "field", "name": "hero" }] }
//!         }
//!     })
//! );
//! ```
//!
//! [value_from_ast] instead converts an AST value to a plain JSON value without any type tags,
//! while filling in [Variables](crate::ast::Variables).

#[cfg(feature = "json")]
extern crate serde_json;

#[cfg(feature = "json")]
extern crate serde;

mod conversion;
mod serialize;

pub use conversion::*;
