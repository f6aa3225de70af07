//! Problems found while resolving a corpus.
//!
//! Resolution never stops at the first problem. Every stage appends to one
//! shared, append-only [`Problems`] list that travels with the model.

mod kind;

#[cfg(test)]
mod tests;

pub use kind::{ProblemKind, Severity};

use crate::model::{AssignmentId, FileId, ModuleId};
use crate::span::Span;
use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Where a problem was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub file: Option<FileId>,
    pub module: Option<ModuleId>,
    pub span: Span,
}

impl Location {
    pub fn file(file: FileId, span: Span) -> Self {
        Self {
            file: Some(file),
            module: None,
            span,
        }
    }

    pub fn module(file: Option<FileId>, module: ModuleId, span: Span) -> Self {
        Self {
            file,
            module: Some(module),
            span,
        }
    }
}

/// One recorded problem.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    pub kind: ProblemKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub location: Location,
    /// The assignment the problem is about.
    pub subject: Option<AssignmentId>,
    /// The assignment it conflicts with, for two-sided problems.
    pub other: Option<AssignmentId>,
}

impl Problem {
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }

    /// Check if `id` is the subject or the other side of this problem.
    pub fn concerns(&self, id: AssignmentId) -> bool {
        self.subject == Some(id) || self.other == Some(id)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.kind, self.message)
    }
}

/// Append-only, ordered problem list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problems {
    items: Vec<Problem>,
}

#[must_use = "problem not recorded, call .emit()"]
pub struct ProblemBuilder<'a> {
    problems: &'a mut Problems,
    problem: Problem,
}

impl Problems {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Start a problem of the given kind.
    ///
    /// Uses the kind's default severity and message. Override them on the builder.
    pub fn report(&mut self, kind: ProblemKind, location: Location) -> ProblemBuilder<'_> {
        ProblemBuilder {
            problems: self,
            problem: Problem {
                kind,
                severity: kind.default_severity(),
                message: Cow::Borrowed(kind.fallback_message()),
                location,
                subject: None,
                other: None,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Problem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Problem] {
        &self.items
    }

    /// Most severe recorded severity.
    pub fn worst(&self) -> Option<Severity> {
        self.items.iter().map(|p| p.severity).max()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|p| p.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|p| p.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Problem::is_error)
    }

    pub fn of_kind(&self, kind: ProblemKind) -> impl Iterator<Item = &Problem> {
        self.items.iter().filter(move |p| p.kind == kind)
    }

    /// Problems whose subject or other side is `id`.
    pub fn about(&self, id: AssignmentId) -> impl Iterator<Item = &Problem> {
        self.items.iter().filter(move |p| p.concerns(id))
    }
}

impl<'a> IntoIterator for &'a Problems {
    type Item = &'a Problem;
    type IntoIter = core::slice::Iter<'a, Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> ProblemBuilder<'a> {
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.problem.message = Cow::Owned(msg.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.problem.severity = severity;
        self
    }

    pub fn subject(mut self, id: AssignmentId) -> Self {
        self.problem.subject = Some(id);
        self
    }

    pub fn conflicts_with(mut self, id: AssignmentId) -> Self {
        self.problem.other = Some(id);
        self
    }

    /// Record the problem and hand back a reference to it.
    pub fn emit(self) -> &'a Problem {
        let problems = self.problems;
        problems.items.push(self.problem);
        &problems.items[problems.items.len() - 1]
    }
}
