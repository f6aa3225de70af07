//! smilink-core: semantic resolution for SNMP SMI MIB modules.
//!
//! Takes the parse trees of a corpus of MIB modules and links them into a
//! single model: imports bound to their source modules, type references
//! bound to their definitions, every OID value turned into an absolute path
//! in one OID tree. Problems are collected along the way instead of
//! stopping the run.
//!
//! The crate is `no_std` compatible and does no IO. Reading files and
//! parsing them in parallel lives in `smilink-std`.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub mod hir;
pub mod model;
pub mod parse;
pub mod problem;
pub mod resolver;
pub mod span;

pub use model::{Mib, Oid};
pub use parse::{FileParser, ParseFailure, ParsedFile, SourceText};
pub use problem::{Problem, ProblemKind, Problems, Severity};
pub use resolver::{Failed, Pipeline, PipelineError, PipelineState, ResolverConfig};
pub use span::Span;
