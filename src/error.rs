//! Errors raised at the I/O, parsing and configuration boundaries.
//!
//! The outline algorithms themselves never fail: missing content degrades to an empty outline.
//! Everything that touches the filesystem, a parser, or the watcher reports through [`Error`].

use thiserror::Error;

/// Failures that can occur while loading, parsing, or watching a document.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The tree-sitter grammar could not be loaded into the parser.
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// A tree-sitter query did not compile against the grammar.
    #[error("invalid query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    /// The parser gave up without producing a tree.
    #[error("could not parse {0}")]
    Parse(String),
    /// An article payload was not valid JSON or had no usable shape.
    #[error("invalid article payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration file was unreadable or held out-of-range values.
    #[error("configuration error: {0}")]
    Config(String),
    /// The filesystem watcher could not be created or attached.
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),
    /// No format handles the given file extension.
    #[error("unsupported document type: {0}")]
    UnsupportedFormat(String),
    /// The tracing subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
