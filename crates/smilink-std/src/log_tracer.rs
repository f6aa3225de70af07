//! Forwarding trace events to the `log` facade.

use log::{Level, LevelFilter};
use smilink_core::resolver::{TraceEvent, TraceLevel, Tracer};

/// A [`Tracer`] that writes events through the `log` crate.
///
/// Its level follows [`log::max_level`], so nothing is formatted for levels
/// the installed logger would drop anyway.
#[derive(Clone, Copy, Debug)]
pub struct LogTracer {
    target: &'static str,
}

impl LogTracer {
    /// Log under the `smilink` target.
    #[must_use]
    pub fn new() -> Self {
        Self::with_target("smilink")
    }

    /// Log under `target`.
    #[must_use]
    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogTracer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracer for LogTracer {
    fn level(&self) -> TraceLevel {
        trace_level(log::max_level())
    }

    fn trace(&mut self, level: TraceLevel, event: TraceEvent<'_>) {
        let level = log_level(level);
        let target = self.target;
        match event {
            TraceEvent::StateChanged { state } => log::log!(target: target, level, "state: {state:?}"),
            TraceEvent::PhaseStart { phase } => log::log!(target: target, level, "{phase}: start"),
            TraceEvent::PhaseEnd { phase } => log::log!(target: target, level, "{phase}: done"),
            TraceEvent::FileParsed { path, modules: Some(n) } => {
                log::log!(target: target, level, "parsed {path}: {n} modules");
            }
            TraceEvent::FileParsed { path, modules: None } => {
                log::log!(target: target, level, "parsed {path}: failed");
            }
            TraceEvent::ModuleRegistered { name, synthetic, .. } => {
                let origin = if synthetic { " (synthetic)" } else { "" };
                log::log!(target: target, level, "registered {name}{origin}");
            }
            TraceEvent::PassStart { phase, pass, pending } => {
                log::log!(target: target, level, "{phase}: pass {pass}, {pending} pending");
            }
            TraceEvent::PassEnd {
                phase,
                pass,
                resolved,
                remaining,
            } => {
                log::log!(
                    target: target,
                    level,
                    "{phase}: pass {pass} resolved {resolved}, {remaining} remaining"
                );
            }
            TraceEvent::TypeResolved { module, symbol } => {
                log::log!(target: target, level, "type {symbol} bound in {module:?}");
            }
            TraceEvent::OidResolved { name, oid } => log::log!(target: target, level, "{name} = {oid}"),
            TraceEvent::ProblemRecorded { problem } => log::log!(target: target, level, "{problem}"),
        }
    }
}

fn log_level(level: TraceLevel) -> Level {
    match level {
        TraceLevel::Error => Level::Error,
        TraceLevel::Warn => Level::Warn,
        TraceLevel::Info => Level::Info,
        TraceLevel::Debug => Level::Debug,
        TraceLevel::Trace => Level::Trace,
    }
}

// `Off` still lets errors through; the logger drops them.
fn trace_level(filter: LevelFilter) -> TraceLevel {
    match filter {
        LevelFilter::Off | LevelFilter::Error => TraceLevel::Error,
        LevelFilter::Warn => TraceLevel::Warn,
        LevelFilter::Info => TraceLevel::Info,
        LevelFilter::Debug => TraceLevel::Debug,
        LevelFilter::Trace => TraceLevel::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smilink_core::resolver::Phase;

    #[test]
    fn levels_map_both_ways() {
        for level in [
            TraceLevel::Error,
            TraceLevel::Warn,
            TraceLevel::Info,
            TraceLevel::Debug,
            TraceLevel::Trace,
        ] {
            assert_eq!(trace_level(log_level(level).to_level_filter()), level);
        }
        assert_eq!(trace_level(LevelFilter::Off), TraceLevel::Error);
    }

    #[test]
    fn tracing_without_logger_is_harmless() {
        let mut tracer = LogTracer::default();
        tracer.trace(TraceLevel::Info, TraceEvent::PhaseStart { phase: Phase::Oids });
        assert_eq!(tracer.target, "smilink");
    }
}
