//! # Error and Result for this crate
//!
//! This crate defines a common [Error] structure that's returned when a source text fails to
//! parse, or when a parsed [Document](crate::ast::Document) is queried for something it doesn't
//! contain.

use logos::Span;
use std::{error, fmt, result};

/// This crate's result type using the [Error] structure.
pub type Result<T> = result::Result<T, Error>;

/// This crate's error structure which internal errors are converted into.
///
/// The error is split into a general message and a context string. For parsing, the context
/// string is populated with a snippet of the source text with a caret pointing at the position
/// where parsing stopped.
///
/// The Error implements both the [`fmt::Display`] and [`fmt::Debug`] traits. It also implements
/// [`error::Error`] so that it can be used with existing patterns for error handling.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) location: Option<Location>,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

/// The category of an [Error].
///
/// Parsing never recovers from an error, so the category only tells a caller *why* a source
/// text was rejected.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorType {
    /// An error that isn't caused by parsing, e.g. looking up an operation that doesn't exist.
    GraphQL,
    /// An unexpected character was encountered.
    Syntax,
    /// The source text ended before a required token was found.
    UnexpectedEnd,
    /// The source text is well-formed but violates a document invariant, e.g. a duplicate
    /// operation name.
    Semantic,
    /// The source text uses a language feature this parser deliberately doesn't handle, such as
    /// block strings or numeric values.
    NotSupported,
}

impl Error {
    /// Create a new Error with only a main message from an input string.
    pub fn new<S: Into<String>>(message: S, error_type: Option<ErrorType>) -> Self {
        Self {
            message: message.into(),
            location: None,
            context: None,
            error_type: error_type.unwrap_or(ErrorType::GraphQL),
        }
    }

    /// Create a new Error with a main message and a context string from two input strings.
    pub fn new_with_context<S: Into<String>>(
        message: S,
        location: Option<Location>,
        context: S,
        error_type: Option<ErrorType>,
    ) -> Self {
        Self {
            message: message.into(),
            location,
            context: Some(context.into()),
            error_type: error_type.unwrap_or(ErrorType::GraphQL),
        }
    }

    /// Returns the message of the current error. The context is discarded.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the location of the current error.
    pub fn location(&self) -> &Option<Location> {
        &self.location
    }

    /// Returns the category of the current error.
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Formats this error, with the option to include the context information as well,
    /// which will cause the string to be multi-line.
    pub fn print(&self, include_ctx: bool) -> String {
        let formatted = match self.error_type {
            ErrorType::GraphQL => format!("GraphQL Error: {}", self.message),
            ErrorType::Syntax => format!("Syntax Error: {}", self.message),
            ErrorType::UnexpectedEnd => format!("Syntax Error (unexpected end): {}", self.message),
            ErrorType::Semantic => format!("Document Error: {}", self.message),
            ErrorType::NotSupported => format!("Unsupported: {}", self.message),
        };

        match self.context {
            Some(ref context) if include_ctx => format!("{}\n{}", formatted, context),
            _ => formatted,
        }
    }
}

/// Counts the line a byte offset is on, starting at one.
fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

pub(crate) fn print_span(source: &str, span: Span) -> String {
    // A span starting on a line terminator is marked at the end of its line instead.
    let span = match source[span.start..span.end].find(|c: char| c == '\n' || c == '\r') {
        Some(idx) => span.start..span.start + idx,
        None => span,
    };
    let mut out = String::new();
    let start_line = {
        // The snippet starts one line above the failing line, if there is one.
        let line = line_of(source, span.start);
        if line > 1 {
            line - 1
        } else {
            line
        }
    };

    let start = source[..span.start]
        .rfind('\n')
        .and_then(|start| source[..start].rfind('\n'))
        .map_or(0, |idx| idx + 1);

    let end = source[span.end..]
        .find(|c: char| c == '\n' || c == '\r')
        .map_or(source.len(), |idx| idx + span.end);

    let snippet = &source[start..end];
    let line_count = snippet.lines().count().max(1);
    let line_num_pad = (start_line + line_count - 1).to_string().len();
    for (index, line) in snippet.lines().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let line_num = (start_line + index).to_string();
        out.push_str(&" ".repeat(line_num_pad - line_num.len() + 1));
        out.push_str(&line_num);
        out.push_str(" | ");
        out.push_str(line);
    }
    let line_start = source[..span.start].rfind('\n').map_or(0, |idx| idx + 1);
    out.push('\n');
    out.push_str(&" ".repeat(line_num_pad + 1));
    out.push_str(" | ");
    out.push_str(&" ".repeat(source[line_start..span.start].chars().count()));
    out.push_str(&"^".repeat(source[span.start..span.end].chars().count().max(1)));

    out
}

/// A position in a source text. Lines start at `1`, columns are zero-based character offsets
/// into the line.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

pub(crate) fn get_location(source: &str, span: Span) -> Location {
    let line = line_of(source, span.start);
    let line_start = source[..span.start].rfind('\n').map_or(0, |idx| idx + 1);
    let column = source[line_start..span.start].chars().count();
    Location { line, column }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print(true))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n", self)
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location() {
        let source = "query {\n  field(\n}";
        assert_eq!(get_location(source, 0..1), Location { line: 1, column: 0 });
        assert_eq!(get_location(source, 10..11), Location { line: 2, column: 2 });
        assert_eq!(
            get_location(source, source.len()..source.len()),
            Location { line: 3, column: 1 }
        );
    }

    #[test]
    fn span_snippet() {
        let source = "query {\n  field(\n}";
        assert_eq!(
            print_span(source, 10..15),
            " 1 | query {\n 2 |   field(\n   |   ^^^^^"
        );
    }

    #[test]
    fn span_snippet_at_line_end() {
        let source = "{ a(b: \"x\n\") }";
        assert_eq!(
            print_span(source, 9..10),
            " 1 | { a(b: \"x\n   |          ^"
        );
        let source = "{ a(b: \"x\r\n\") }";
        assert_eq!(
            print_span(source, 9..10),
            " 1 | { a(b: \"x\n   |          ^"
        );
    }

    #[test]
    fn print_with_type() {
        let error = Error::new("duplicate operation name Q", Some(ErrorType::Semantic));
        assert_eq!(error.print(false), "Document Error: duplicate operation name Q");
        assert_eq!(error.error_type(), ErrorType::Semantic);
        let error = Error::new_with_context("oops", None, "ctx", Some(ErrorType::Syntax));
        assert_eq!(error.print(true), "Syntax Error: oops\nctx");
        assert_eq!(error.print(false), "Syntax Error: oops");
    }
}
