//! Pipeline orchestration.
//!
//! A run moves through
//! `Idle → Parsing → SymbolRegistration → Resolving { pass } → Finalizing`
//! and ends in `Done` or `Failed`. Problems never stop a run: every phase
//! runs to completion and the failure threshold is only consulted at the
//! end, so the caller always gets the complete model back.

use crate::model::{CapacityError, Mib};
use crate::parse::{FileParser, ParsedFile, SourceText};
use crate::problem::Severity;
use crate::resolver::config::ResolverConfig;
use crate::resolver::context::ResolverContext;
use crate::resolver::phases::{finalize, link_imports, register_modules, resolve_oids, resolve_types};
use crate::resolver::tracing::{NoopTracer, Phase, TraceEvent, TraceLevel, Tracer};
use alloc::boxed::Box;
use alloc::vec::Vec;

/// Where a pipeline run currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PipelineState {
    /// Not started.
    #[default]
    Idle,
    /// Turning sources into parse trees.
    Parsing,
    /// Registering modules and definitions.
    SymbolRegistration,
    /// Running a resolution sweep.
    ///
    /// The pipeline enters `pass: 0` once for linking and both fixpoints.
    /// Each sweep after that is announced to the tracer only.
    Resolving {
        /// Sweep number within the current phase (0-indexed).
        pass: usize,
    },
    /// Detecting conflicts and building the OID tree.
    Finalizing,
    /// Finished below the failure threshold.
    Done,
    /// Finished at or above the failure threshold.
    Failed,
}

/// A run whose worst problem reached the failure threshold.
///
/// Carries the complete model, problems included.
#[derive(Debug, thiserror::Error)]
#[error("resolution failed: worst problem is {worst} ({} problems recorded)", .mib.problems().len())]
pub struct Failed {
    /// The model as resolved.
    pub mib: Box<Mib>,
    /// The worst recorded severity.
    pub worst: Severity,
}

impl Failed {
    /// Take the model out.
    #[must_use]
    pub fn into_mib(self) -> Mib {
        *self.mib
    }
}

/// Error returned by a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The problems crossed the failure threshold.
    #[error(transparent)]
    Failed(#[from] Failed),
    /// The model ran out of ids.
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

impl PipelineError {
    /// The model, when the run got far enough to produce one.
    #[must_use]
    pub fn mib(&self) -> Option<&Mib> {
        match self {
            Self::Failed(failed) => Some(&failed.mib),
            Self::Capacity(_) => None,
        }
    }
}

/// Drives parse trees through every resolution phase.
///
/// # Example
///
/// ```ignore
/// let mut pipeline = Pipeline::new(ResolverConfig::default());
/// let mib = pipeline.run(&parser, sources)?;
/// for problem in mib.problems() {
///     eprintln!("{problem}");
/// }
/// ```
#[derive(Debug)]
pub struct Pipeline<T: Tracer = NoopTracer> {
    config: ResolverConfig,
    tracer: T,
    state: PipelineState,
}

impl Pipeline {
    /// Create a pipeline that does not trace.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            tracer: NoopTracer,
            state: PipelineState::Idle,
        }
    }
}

impl<T: Tracer> Pipeline<T> {
    /// Replace the tracer.
    #[must_use]
    pub fn with_tracer<U: Tracer>(self, tracer: U) -> Pipeline<U> {
        Pipeline {
            config: self.config,
            tracer,
            state: self.state,
        }
    }

    /// The run configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The state the last run reached.
    ///
    /// Moves between phases. Per-sweep [`PipelineState::Resolving`] states
    /// go to the tracer as [`TraceEvent::StateChanged`].
    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Parse `sources` one after another with `parser`, then resolve them.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::run_parsed`].
    pub fn run(
        &mut self,
        parser: &dyn FileParser,
        sources: impl IntoIterator<Item = SourceText>,
    ) -> Result<Mib, PipelineError> {
        self.enter(PipelineState::Parsing);
        crate::trace_event!(
            self.tracer,
            TraceLevel::Info,
            TraceEvent::PhaseStart {
                phase: Phase::Parsing
            }
        );
        let mut files = Vec::new();
        for source in sources {
            let file = ParsedFile::parse(parser, &source);
            crate::trace_event!(
                self.tracer,
                TraceLevel::Debug,
                TraceEvent::FileParsed {
                    path: &file.path,
                    modules: file.result.as_ref().ok().map(Vec::len),
                }
            );
            files.push(file);
        }
        crate::trace_event!(
            self.tracer,
            TraceLevel::Info,
            TraceEvent::PhaseEnd {
                phase: Phase::Parsing
            }
        );
        self.run_parsed(files)
    }

    /// Resolve files that were already parsed, in the order given.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Failed`] when the worst problem reaches the
    /// configured threshold; the model is inside. [`PipelineError::Capacity`]
    /// when the model runs out of ids.
    pub fn run_parsed(&mut self, files: Vec<ParsedFile>) -> Result<Mib, PipelineError> {
        let result = self.resolve(files);
        if result.is_err() {
            self.enter(PipelineState::Failed);
        }
        result
    }

    fn resolve(&mut self, files: Vec<ParsedFile>) -> Result<Mib, PipelineError> {
        let mut ctx = ResolverContext::new(self.config.clone());

        self.enter(PipelineState::SymbolRegistration);
        self.phase(&mut ctx, Phase::Registration, |ctx, tracer| {
            register_modules(ctx, files, tracer)
        })?;

        self.enter(PipelineState::Resolving { pass: 0 });
        self.phase(&mut ctx, Phase::Linking, |ctx, _| link_imports(ctx))?;
        self.phase(&mut ctx, Phase::Types, resolve_types)?;
        self.phase(&mut ctx, Phase::Oids, resolve_oids);

        self.enter(PipelineState::Finalizing);
        self.phase(&mut ctx, Phase::Finalizing, |ctx, _| finalize(ctx))?;

        let worst = ctx.mib.problems().worst();
        if let Some(worst) = worst.filter(|w| self.config.fails_at(Some(*w))) {
            return Err(Failed {
                mib: Box::new(ctx.mib),
                worst,
            }
            .into());
        }
        self.enter(PipelineState::Done);
        Ok(ctx.mib)
    }

    /// Run one phase, then trace the problems it recorded.
    fn phase<R>(
        &mut self,
        ctx: &mut ResolverContext,
        phase: Phase,
        run: impl FnOnce(&mut ResolverContext, &mut T) -> R,
    ) -> R {
        crate::trace_event!(self.tracer, TraceLevel::Info, TraceEvent::PhaseStart { phase });
        let before = ctx.mib.problems().len();

        let out = run(ctx, &mut self.tracer);

        for problem in ctx.mib.problems().iter().skip(before) {
            crate::trace_event!(
                self.tracer,
                TraceLevel::from(problem.severity),
                TraceEvent::ProblemRecorded { problem }
            );
        }
        crate::trace_event!(self.tracer, TraceLevel::Info, TraceEvent::PhaseEnd { phase });
        out
    }

    fn enter(&mut self, state: PipelineState) {
        self.state = state;
        crate::trace_event!(self.tracer, TraceLevel::Info, TraceEvent::StateChanged { state });
    }
}
