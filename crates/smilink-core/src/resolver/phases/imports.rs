//! Import linking.
//!
//! Binds every imported name to its source module, then checks that each
//! binding can actually be satisfied. Nothing here depends on other imports
//! being resolved first, so a module may import from a module registered
//! after it.

use crate::hir::intrinsic_root;
use crate::model::{CapacityError, ModuleId, ModuleImport};
use crate::problem::{Location, ProblemKind, Severity};
use crate::resolver::context::ResolverContext;
use crate::resolver::symbols::Lookup;
use crate::span::Span;
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Link the imports of every registered module.
pub fn link_imports(ctx: &mut ResolverContext) -> Result<(), CapacityError> {
    let mut checks = Vec::new();
    for idx in 0..ctx.sources.len() {
        bind_module_imports(ctx, idx, &mut checks)?;
    }
    verify_bindings(ctx, &checks);
    Ok(())
}

/// A binding to verify once every module has been linked.
struct PendingCheck {
    module: ModuleId,
    source: ModuleId,
    symbol: String,
    span: Span,
}

fn bind_module_imports(
    ctx: &mut ResolverContext,
    idx: usize,
    checks: &mut Vec<PendingCheck>,
) -> Result<(), CapacityError> {
    let module = ctx.sources[idx].id;
    let file = ctx.sources[idx].file;
    let imports = ctx.sources[idx].hir.imports.clone();

    let mut seen: Vec<(String, String)> = Vec::new();
    let mut missing_reported: BTreeSet<String> = BTreeSet::new();

    for import in imports {
        if import.is_macro_import() {
            continue;
        }
        let symbol = import.symbol.name.as_str();
        let source_name = import.module.name.as_str();
        let location = Location::module(file, module, import.span);

        if seen.iter().any(|(s, m)| s == symbol && m == source_name) {
            let severity = ctx.config.duplicate_imports.severity();
            ctx.mib
                .problems_mut()
                .report(ProblemKind::DuplicateImport, location)
                .severity(severity)
                .message(format!("{symbol} is imported from {source_name} more than once"))
                .emit();
            continue;
        }

        if let Some((_, other)) = seen.iter().find(|(s, _)| s == symbol) {
            let message = format!("{symbol} is imported from both {other} and {source_name}");
            ctx.mib
                .problems_mut()
                .report(ProblemKind::AmbiguousImport, location)
                .message(message)
                .emit();
        }
        seen.push((String::from(symbol), String::from(source_name)));

        let source = ctx.symbols.module(source_name);
        if source.is_none() && missing_reported.insert(String::from(source_name)) {
            ctx.mib
                .problems_mut()
                .report(ProblemKind::MissingImportSource, location)
                .message(format!("module {source_name} is not available"))
                .emit();
        }
        ctx.symbols.bind_import(module, symbol, source);

        let record = ModuleImport {
            symbol: ctx.mib.intern(symbol)?,
            source_name: ctx.mib.intern(source_name)?,
            source,
            span: import.span,
        };
        if let Some(m) = ctx.mib.module_mut(module) {
            m.imports.push(record);
        }

        if let Some(source) = source {
            checks.push(PendingCheck {
                module,
                source,
                symbol: String::from(symbol),
                span: import.span,
            });
        }
    }
    Ok(())
}

fn verify_bindings(ctx: &mut ResolverContext, checks: &[PendingCheck]) {
    for check in checks {
        if !matches!(ctx.symbols.resolve(check.source, &check.symbol), Lookup::NotFound) {
            continue;
        }
        if intrinsic_root(&check.symbol).is_some() {
            continue;
        }
        let location = Location::module(ctx.file_of(check.module), check.module, check.span);
        let message = format!(
            "{} is not defined in {}",
            check.symbol,
            ctx.mib.module_name(check.source)
        );
        ctx.mib
            .problems_mut()
            .report(ProblemKind::UnresolvedImport, location)
            .severity(Severity::Error)
            .message(message)
            .emit();
    }
}
