//! smilink-std: filesystem loading for the smilink resolver
//!
//! [`smilink_core`] never touches the filesystem. This crate adds the parts
//! a native program needs around it: choosing files ([`FileSet`]), reading
//! and parsing them in parallel ([`Loader`]), and routing pipeline trace
//! events into the `log` facade ([`LogTracer`]).

pub mod error;
pub mod fileset;
pub mod loader;
pub mod log_tracer;

pub use error::LoadError;
pub use fileset::{DirScan, FileSet, wildcard_match};
pub use loader::{CancelToken, Input, Loader};
pub use log_tracer::LogTracer;
pub use smilink_core;
