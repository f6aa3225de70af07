//! Semantic resolution of MIB modules.
//!
//! The resolver takes parse trees ([`HirModule`](crate::hir::HirModule)),
//! which still refer to everything by name, and produces a [`Mib`] in which
//! every import, type reference and OID value points at exactly one
//! definition. Whatever cannot be resolved is recorded as a
//! [`Problem`](crate::problem::Problem) and the run carries on.
//!
//! # Pipeline
//!
//! ```text
//! SourceText → FileParser → HirModule → Pipeline → Mib + Problems
//! ```
//!
//! # Base modules
//!
//! SNMPv2-SMI, SNMPv2-TC, SNMPv2-CONF, RFC1155-SMI, RFC-1212 and RFC-1215
//! are generated on demand when a module imports from them and no copy was
//! supplied. A supplied copy always wins.
//!
//! # Usage
//!
//! ```ignore
//! use smilink_core::resolver::{Pipeline, ResolverConfig};
//!
//! let mut pipeline = Pipeline::new(ResolverConfig::default());
//! match pipeline.run_parsed(files) {
//!     Ok(mib) => println!("{} modules", mib.module_count()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```
//!
//! [`Mib`]: crate::model::Mib

pub mod config;
pub mod context;
pub mod phases;
pub mod pipeline;
pub mod symbols;
pub mod tracing;

pub use config::{CanonicalSelection, DuplicateImportMode, ResolverConfig};
pub use context::{ModuleSource, ResolverContext};
pub use pipeline::{Failed, Pipeline, PipelineError, PipelineState};
pub use symbols::{DuplicateDefinition, Lookup, SymbolTable};
pub use tracing::{NoopTracer, Phase, TraceEvent, TraceLevel, Tracer};
