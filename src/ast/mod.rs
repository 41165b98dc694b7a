//! # GraphQL Query Language AST
//!
//! The `graphql_query_doc::ast` module contains the GraphQL query language AST and traits to parse
//! and print the AST. The AST is specialized to the client-side query language that clients use to
//! make requests to a GraphQL service, and it's keyed: a [`Document`] maps operation and fragment
//! names to their definitions.
//! [Reference](https://spec.graphql.org/October2021/#sec-Language)
//!
//! It's easiest to use this module by importing all of it, however, its three main parts are:
//! - [`ASTContext`], a context containing an arena that defines the lifetime for an AST
//! - [`ParseNode`], a trait using which AST Nodes are parsed from source text
//! - [`PrintNode`], a trait using which AST Nodes are printed into source text
//!
//! The following workflow describes the minimum that's done using this module and while an AST
//! Context is active in the given scope.
//!
//! ```
//! use graphql_query_doc::ast::*;
//!
//! // Create an AST Context for a document
//! let ctx = ASTContext::new();
//!
//! // Parse a source text into a Document AST root node
//! let ast = Document::parse(&ctx, "query Hero { hero { name } }").unwrap();
//!
//! // Look up an operation by its name
//! let operation = ast.operation(Some("Hero")).unwrap();
//! assert_eq!(operation.operation, OperationKind::Query);
//!
//! // Print the Document node to an output String
//! let output = ast.print();
//! assert_eq!(output, "query Hero {\n  hero {\n    name\n  }\n}");
//! ```
//!
//! Integer, float, list, and object literals as well as block strings aren't supported and fail
//! to parse with [`ErrorType::NotSupported`](crate::error::ErrorType::NotSupported).

#[allow(clippy::module_inception)]
mod ast;

mod ast_conversion;
mod ast_kind;
mod cursor;
mod parser;
mod printer;

pub use ast::*;
pub use ast_kind::ASTKind;
pub use parser::ParseNode;
pub use printer::PrintNode;
