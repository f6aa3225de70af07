//! Resolution phases.
//!
//! Resolution proceeds in five ordered phases:
//!
//! 1. **Registration**: register modules and their definitions
//! 2. **Linking**: bind imports to their source modules
//! 3. **Types**: lower SYNTAX clauses and bind type references
//! 4. **OIDs**: compute absolute OIDs for every OID-bearing assignment
//! 5. **Finalizing**: detect OID conflicts and build the OID tree
//!
//! Phases 3 and 4 are worklist fixpoints. Every sweep decides against the
//! model as it stood when the sweep began and applies its decisions
//! afterwards.

pub mod finalize;
pub mod imports;
pub mod oids;
pub mod registration;
pub mod types;

pub use finalize::finalize;
pub use imports::link_imports;
pub use oids::resolve_oids;
pub use registration::register_modules;
pub use types::resolve_types;

use crate::resolver::pipeline::PipelineState;
use crate::resolver::tracing::{Phase, TraceEvent, TraceLevel, Tracer};

fn sweep_start<T: Tracer>(tracer: &mut T, phase: Phase, pass: usize, pending: usize) {
    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::StateChanged {
            state: PipelineState::Resolving { pass },
        }
    );
    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::PassStart {
            phase,
            pass,
            pending,
        }
    );
}

fn sweep_end<T: Tracer>(tracer: &mut T, phase: Phase, pass: usize, resolved: usize, remaining: usize) {
    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::PassEnd {
            phase,
            pass,
            resolved,
            remaining,
        }
    );
}
