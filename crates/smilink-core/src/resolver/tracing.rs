//! Resolver tracing support.
//!
//! Provides structured trace events for following a pipeline run.
//! The default [`NoopTracer`] makes it free when nobody listens.

use crate::model::{ModuleId, Oid};
use crate::problem::{Problem, Severity};
use crate::resolver::pipeline::PipelineState;

/// Trace verbosity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    /// Critical errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages (phase boundaries, summary stats).
    Info,
    /// Detailed debugging (individual lookups, decisions).
    Debug,
    /// Verbose tracing (every operation).
    Trace,
}

impl From<Severity> for TraceLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Fatal | Severity::Error => Self::Error,
            Severity::Warning => Self::Warn,
            Severity::Info => Self::Info,
        }
    }
}

/// Pipeline phase identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Turning source text into parse trees.
    Parsing,
    /// Module and assignment registration.
    Registration,
    /// Import linking.
    Linking,
    /// Type resolution.
    Types,
    /// OID resolution.
    Oids,
    /// Conflict detection and tree building.
    Finalizing,
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Phase::Parsing => write!(f, "parsing"),
            Phase::Registration => write!(f, "registration"),
            Phase::Linking => write!(f, "linking"),
            Phase::Types => write!(f, "types"),
            Phase::Oids => write!(f, "oids"),
            Phase::Finalizing => write!(f, "finalizing"),
        }
    }
}

/// Structured trace events emitted during a run.
#[derive(Clone, Debug)]
pub enum TraceEvent<'a> {
    /// The pipeline moved to a new state.
    StateChanged { state: PipelineState },
    /// A phase is starting.
    PhaseStart { phase: Phase },
    /// A phase has ended.
    PhaseEnd { phase: Phase },

    /// A file was parsed (or failed to).
    FileParsed {
        path: &'a str,
        /// Number of modules, `None` on failure.
        modules: Option<usize>,
    },
    /// A module was registered.
    ModuleRegistered {
        name: &'a str,
        id: ModuleId,
        synthetic: bool,
    },

    /// A worklist sweep is starting.
    PassStart {
        phase: Phase,
        /// The pass number (0-indexed).
        pass: usize,
        /// Number of entries still pending.
        pending: usize,
    },
    /// A worklist sweep has ended.
    PassEnd {
        phase: Phase,
        pass: usize,
        /// Entries retired in this sweep.
        resolved: usize,
        /// Entries still pending.
        remaining: usize,
    },
    /// A type reference was bound to its target.
    TypeResolved {
        module: ModuleId,
        symbol: &'a str,
    },
    /// An assignment received its OID.
    OidResolved { name: &'a str, oid: &'a Oid },

    /// A problem was recorded.
    ProblemRecorded { problem: &'a Problem },
}

/// Trait for receiving trace events during a run.
///
/// The tracer can filter events by returning a minimum trace level
/// from `level()`.
pub trait Tracer {
    /// Returns the most verbose level to emit.
    ///
    /// Events above this level will not be passed to `trace()`.
    /// Default: `TraceLevel::Info`.
    fn level(&self) -> TraceLevel {
        TraceLevel::Info
    }

    /// Called for each trace event the level permits.
    fn trace(&mut self, level: TraceLevel, event: TraceEvent<'_>);
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn level(&self) -> TraceLevel {
        (**self).level()
    }

    fn trace(&mut self, level: TraceLevel, event: TraceEvent<'_>) {
        (**self).trace(level, event);
    }
}

/// A no-op tracer that discards all events.
#[derive(Default, Clone, Copy, Debug)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn level(&self) -> TraceLevel {
        TraceLevel::Error
    }

    fn trace(&mut self, _level: TraceLevel, _event: TraceEvent<'_>) {}
}

/// Emit a trace event if the tracer level permits.
///
/// The level is checked before the event is constructed.
#[macro_export]
macro_rules! trace_event {
    ($tracer:expr, $level:expr, $event:expr) => {
        if $level <= $tracer.level() {
            $tracer.trace($level, $event);
        }
    };
}
