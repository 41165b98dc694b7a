//! `graphql_query_doc`
//! =========
//!
//! _A small, strict parser for the GraphQL Query Language._
//!
//! The **`graphql_query_doc`** library parses GraphQL query documents into an arena-allocated AST
//! and renders them back, either as canonical GraphQL source text or as tagged JSON. It's meant
//! for intermediary layers, such as gateways, linters, and introspection tools, which inspect or
//! forward GraphQL documents without executing them.
//!
//! Parsing is a single forward pass of recursive descent over a byte cursor. A parsed
//! [`Document`](ast::Document) keys its operations and fragments by name and rejects duplicates,
//! and any failure aborts the parse with an [`Error`](error::Error) that points at the offending
//! character in the source text.
//!
//! Schema validation and execution are out of scope, and so are numeric, list, and object literals
//! as well as block strings. These fail with a distinct "not supported" error rather than a syntax
//! error.
//!
//! [A good place to start learning more about this crate is the `ast` module...](ast)

pub mod ast;
pub mod error;

pub use bumpalo;

#[cfg(feature = "json")]
pub mod json;
