//! Reading and parsing a corpus from disk.

use crate::error::LoadError;
use crate::fileset::FileSet;
use smilink_core::resolver::Tracer;
use smilink_core::{FileParser, Mib, ParseFailure, ParsedFile, Pipeline, SourceText, Span};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

/// Shared flag for stopping a load from another thread.
///
/// Checked before each file is read or parsed. A file already being parsed
/// is finished first.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<(), LoadError> {
        if self.is_cancelled() {
            Err(LoadError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// One entry of a file set after reading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// File contents, ready to parse.
    Source(SourceText),
    /// The file could not be read. It enters the pipeline as a failed parse,
    /// which drops only this file.
    Unreadable(ParsedFile),
}

/// Loads MIB files through a [`FileParser`] and resolves them.
///
/// Files are parsed on up to `threads` worker threads; the parsed files are
/// always handed to the pipeline in file set order.
pub struct Loader<'p> {
    parser: &'p dyn FileParser,
    threads: NonZeroUsize,
    cancel: CancelToken,
}

impl<'p> Loader<'p> {
    /// Create a loader using all available cores.
    #[must_use]
    pub fn new(parser: &'p dyn FileParser) -> Self {
        Self {
            parser,
            threads: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            cancel: CancelToken::new(),
        }
    }

    /// Limit the number of parser threads.
    #[must_use]
    pub fn with_threads(mut self, threads: NonZeroUsize) -> Self {
        self.threads = threads;
        self
    }

    /// Stop loading when `token` is cancelled.
    #[must_use]
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Read every file of `files`, in file set order.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; older vendor MIBs are
    /// frequently Latin-1. A file that cannot be read becomes
    /// [`Input::Unreadable`] and the rest are still read.
    ///
    /// # Errors
    ///
    /// Fails when the file set cannot be expanded or the load is cancelled.
    pub fn read(&self, files: &FileSet) -> Result<Vec<Input>, LoadError> {
        let paths = files.resolve()?;
        let mut inputs = Vec::with_capacity(paths.len());
        for path in paths {
            self.cancel.check()?;
            let input = match read_source(&path) {
                Ok(source) => Input::Source(source),
                Err(err) => {
                    log::warn!(target: "smilink", "{err}");
                    let failure = ParseFailure::new(format!("cannot read file: {err}"), Span::SYNTHETIC);
                    Input::Unreadable(ParsedFile::failed(path.to_string_lossy(), failure))
                }
            };
            inputs.push(input);
        }
        log::debug!(target: "smilink", "read {} files", inputs.len());
        Ok(inputs)
    }

    /// Parse `sources` in parallel, returning results in input order.
    ///
    /// # Errors
    ///
    /// Fails only when the load is cancelled. Files that do not parse are
    /// returned as failed [`ParsedFile`]s.
    pub fn parse(&self, sources: &[SourceText]) -> Result<Vec<ParsedFile>, LoadError> {
        self.cancel.check()?;
        let workers = self.threads.get().min(sources.len()).max(1);
        let next = AtomicUsize::new(0);

        let mut parsed: Vec<(usize, ParsedFile)> = thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| scope.spawn(|| self.parse_worker(sources, &next)))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });
        self.cancel.check()?;

        parsed.sort_unstable_by_key(|(index, _)| *index);
        let failed = parsed.iter().filter(|(_, f)| f.result.is_err()).count();
        log::debug!(
            target: "smilink",
            "parsed {} files on {workers} threads ({failed} failed)",
            parsed.len()
        );
        Ok(parsed.into_iter().map(|(_, file)| file).collect())
    }

    fn parse_worker(&self, sources: &[SourceText], next: &AtomicUsize) -> Vec<(usize, ParsedFile)> {
        let mut out = Vec::new();
        while !self.cancel.is_cancelled() {
            let index = next.fetch_add(1, Ordering::Relaxed);
            let Some(source) = sources.get(index) else {
                break;
            };
            let file = ParsedFile::parse(self.parser, source);
            if let Err(failure) = &file.result {
                log::debug!(target: "smilink", "{}: {failure}", file.path);
            }
            out.push((index, file));
        }
        out
    }

    /// Read, parse and resolve `files` with `pipeline`.
    ///
    /// # Errors
    ///
    /// Any error from [`Loader::read`] or [`Loader::parse`], or
    /// [`LoadError::Resolve`] when the pipeline fails. A failed pipeline
    /// still carries its model.
    pub fn load<T: Tracer>(&self, files: &FileSet, pipeline: &mut Pipeline<T>) -> Result<Mib, LoadError> {
        let inputs = self.read(files)?;

        // unreadable files keep their slot so registration order is unchanged
        let mut sources = Vec::with_capacity(inputs.len());
        let mut slots = Vec::with_capacity(inputs.len());
        for input in inputs {
            match input {
                Input::Source(source) => {
                    sources.push(source);
                    slots.push(None);
                }
                Input::Unreadable(file) => slots.push(Some(file)),
            }
        }
        let mut parsed = self.parse(&sources)?.into_iter();
        drop(sources);
        let parsed: Vec<ParsedFile> = slots
            .into_iter()
            .filter_map(|slot| slot.or_else(|| parsed.next()))
            .collect();
        self.cancel.check()?;

        let mib = pipeline.run_parsed(parsed)?;
        log::info!(
            target: "smilink",
            "resolved {} modules, {} OID nodes, {} problems",
            mib.module_count(),
            mib.node_count(),
            mib.problems().len()
        );
        Ok(mib)
    }
}

fn read_source(path: &Path) -> Result<SourceText, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::io(path, e))?;
    let text = String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
    Ok(SourceText::new(path.to_string_lossy(), text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fileset::DirScan;
    use smilink_core::hir::{HirModule, HirOidAssignment, HirOidComponent, HirValueAssignment, Symbol};
    use smilink_core::{PipelineError, ProblemKind, ResolverConfig, Severity};
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Line format: `MODULE name`, `IMPORT source symbol`,
    /// `VALUE name component...`. Anything else fails the file.
    fn toy_parser(source: &SourceText) -> Result<Vec<HirModule>, ParseFailure> {
        let mut modules: Vec<HirModule> = Vec::new();
        for line in source.text.lines().filter(|l| !l.trim().is_empty()) {
            let words: Vec<&str> = line.split_whitespace().collect();
            let current = modules.pop();
            let module = match (words.as_slice(), current) {
                (["MODULE", name], current) => {
                    modules.extend(current);
                    HirModule::new(*name, Span::SYNTHETIC)
                }
                (["IMPORT", from, symbol], Some(module)) => module.with_import(from, symbol),
                (["VALUE", name, components @ ..], Some(module)) => {
                    let components = components
                        .iter()
                        .map(|c| match c.parse() {
                            Ok(n) => HirOidComponent::Number(n),
                            Err(_) => HirOidComponent::Name(Symbol::from_name(c)),
                        })
                        .collect();
                    let oid = HirOidAssignment::new(components, Span::SYNTHETIC);
                    module.with_definition(HirValueAssignment::new(*name, oid, Span::SYNTHETIC))
                }
                _ => return Err(ParseFailure::new(format!("unexpected line {line:?}"), Span::SYNTHETIC)),
            };
            modules.push(module);
        }
        Ok(modules)
    }

    fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn one_thread() -> NonZeroUsize {
        NonZeroUsize::MIN
    }

    #[test]
    fn parse_keeps_input_order() {
        let sources: Vec<_> = (0..40)
            .map(|i| SourceText::new(format!("M{i}.mib"), format!("MODULE M{i}\nVALUE v{i} 1 {i}")))
            .collect();
        let loader = Loader::new(&toy_parser).with_threads(NonZeroUsize::new(4).unwrap());
        let parsed = loader.parse(&sources).unwrap();
        let paths: Vec<_> = parsed.iter().map(|f| f.path.as_str()).collect();
        let expected: Vec<_> = sources.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, expected);
        assert!(parsed.iter().all(|f| f.result.is_ok()));
    }

    #[test]
    fn load_resolves_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "A-MIB.mib", "MODULE A-MIB\nIMPORT SNMPv2-SMI enterprises\nVALUE acme enterprises 9999");
        write(&dir, "B-MIB.mib", "MODULE B-MIB\nIMPORT A-MIB acme\nVALUE acmeProducts acme 1");
        write(&dir, "notes.txt", "not a MIB");

        let files = FileSet::new().with_scan(DirScan::new(dir.path()).include("*.mib"));
        let loader = Loader::new(&toy_parser).with_threads(one_thread());
        let mib = loader.load(&files, &mut Pipeline::new(ResolverConfig::default())).unwrap();

        let products = mib.lookup("B-MIB", "acmeProducts").unwrap();
        assert_eq!(products.oid.as_ref().unwrap().to_string(), "1.3.6.1.4.1.9999.1");
        assert!(mib.problems().is_empty());
    }

    #[test]
    fn parse_failure_only_drops_its_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(&dir, "good.mib", "MODULE GOOD-MIB\nVALUE root 1");
        let bad = write(&dir, "bad.mib", "MODULE BAD-MIB\nGARBAGE");

        let files = FileSet::new().with_file(&good).with_file(&bad);
        let err = Loader::new(&toy_parser)
            .load(&files, &mut Pipeline::new(ResolverConfig::default()))
            .unwrap_err();
        let LoadError::Resolve(PipelineError::Failed(failed)) = err else {
            panic!("expected a failed pipeline, got {err:?}");
        };
        let mib = failed.into_mib();
        assert!(mib.module_by_name("GOOD-MIB").is_some());
        assert!(mib.module_by_name("BAD-MIB").is_none());
        assert_eq!(mib.problems().worst(), Some(Severity::Fatal));
        assert_eq!(mib.problems().len(), 1);
    }

    #[test]
    fn unreadable_file_only_drops_itself() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(&dir, "good.mib", "MODULE GOOD-MIB\nVALUE root 1");
        let gone = dir.path().join("gone.mib");
        let later = write(&dir, "later.mib", "MODULE LATER-MIB\nIMPORT GOOD-MIB root\nVALUE leaf root 2");

        let files = FileSet::new().with_file(&good).with_file(&gone).with_file(&later);
        let loader = Loader::new(&toy_parser).with_threads(one_thread());

        let inputs = loader.read(&files).unwrap();
        assert!(matches!(inputs[0], Input::Source(_)));
        assert!(matches!(&inputs[1], Input::Unreadable(f) if f.path.ends_with("gone.mib")));
        assert!(matches!(inputs[2], Input::Source(_)));

        let err = loader
            .load(&files, &mut Pipeline::new(ResolverConfig::default()))
            .unwrap_err();
        let LoadError::Resolve(PipelineError::Failed(failed)) = err else {
            panic!("expected a failed pipeline, got {err:?}");
        };
        let mib = failed.into_mib();
        let leaf = mib.lookup("LATER-MIB", "leaf").unwrap();
        assert_eq!(leaf.oid.as_ref().unwrap().to_string(), "1.2");

        let problems: Vec<_> = mib.problems().iter().collect();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].kind, ProblemKind::ParseFailure);
        assert!(problems[0].message.contains("gone.mib"));
        let files: Vec<_> = mib.files().map(|f| mib.str(f.path)).collect();
        assert_eq!(files.len(), 3);
        assert!(files[1].ends_with("gone.mib"));
    }

    #[test]
    fn cancelled_before_start() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "A.mib", "MODULE A\nVALUE a 1");
        let token = CancelToken::new();
        token.cancel();

        let files = FileSet::new().with_scan(DirScan::new(dir.path()));
        let loader = Loader::new(&toy_parser).with_cancel(token);
        let err = loader
            .load(&files, &mut Pipeline::new(ResolverConfig::default()))
            .unwrap_err();
        assert!(matches!(err, LoadError::Cancelled));
    }

    #[test]
    fn cancel_mid_parse() {
        let token = CancelToken::new();
        let trip = token.clone();
        let parser = move |source: &SourceText| {
            trip.cancel();
            toy_parser(source)
        };
        let sources: Vec<_> = (0..8)
            .map(|i| SourceText::new(format!("{i}"), format!("MODULE M{i}")))
            .collect();
        let loader = Loader::new(&parser).with_threads(one_thread()).with_cancel(token);
        assert!(matches!(loader.parse(&sources), Err(LoadError::Cancelled)));
    }

    #[test]
    fn latin1_is_read_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.mib");
        fs::write(&path, b"MODULE LEGACY-MIB\n-- caf\xe9\n").unwrap();
        let source = read_source(&path).unwrap();
        assert!(source.text.contains("caf\u{fffd}"));
    }
}
