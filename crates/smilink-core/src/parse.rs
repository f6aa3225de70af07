//! The boundary to the textual parser.

use crate::hir::HirModule;
use crate::span::Span;
use alloc::string::String;
use alloc::vec::Vec;

/// One source file handed to a [`FileParser`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceText {
    /// Path or other identifier of the file, used in problem locations.
    pub path: String,
    /// File contents.
    pub text: String,
}

impl SourceText {
    /// Create a new source text.
    #[must_use]
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// A file that could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {span}")]
pub struct ParseFailure {
    /// What went wrong.
    pub message: String,
    /// Where it went wrong.
    pub span: Span,
}

impl ParseFailure {
    /// Create a new parse failure.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Turns source text into parse-tree modules.
///
/// A single file may define several modules. Implementations must be
/// shareable across threads so files can be parsed in parallel.
pub trait FileParser: Sync {
    /// Parse one file.
    fn parse(&self, source: &SourceText) -> Result<Vec<HirModule>, ParseFailure>;
}

impl<F> FileParser for F
where
    F: Fn(&SourceText) -> Result<Vec<HirModule>, ParseFailure> + Sync,
{
    fn parse(&self, source: &SourceText) -> Result<Vec<HirModule>, ParseFailure> {
        self(source)
    }
}

/// Result of parsing one file, ready for the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedFile {
    /// Path of the file.
    pub path: String,
    /// Modules, or the reason the file was rejected.
    pub result: Result<Vec<HirModule>, ParseFailure>,
}

impl ParsedFile {
    /// A successfully parsed file.
    #[must_use]
    pub fn ok(path: impl Into<String>, modules: Vec<HirModule>) -> Self {
        Self {
            path: path.into(),
            result: Ok(modules),
        }
    }

    /// A file that failed to parse.
    #[must_use]
    pub fn failed(path: impl Into<String>, failure: ParseFailure) -> Self {
        Self {
            path: path.into(),
            result: Err(failure),
        }
    }

    /// Parse `source` with `parser`.
    pub fn parse(parser: &dyn FileParser, source: &SourceText) -> Self {
        Self {
            path: source.path.clone(),
            result: parser.parse(source),
        }
    }
}
