//! Module registration.
//!
//! Files are taken in input order, modules within a file by name, and
//! definitions in declaration order. Each module is registered completely
//! (module record, then every assignment) before the next one starts, so
//! assignment ids follow processing order.

use crate::hir::{BaseModule, HirDefinition, HirModule};
use crate::model::{AssignmentKind, CapacityError, FileId, ResolutionState};
use crate::parse::ParsedFile;
use crate::problem::{Location, ProblemKind};
use crate::resolver::context::{ModuleSource, ResolverContext};
use crate::resolver::tracing::{TraceEvent, TraceLevel, Tracer};
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::vec::Vec;

/// Register every parsed file, then synthesize missing base modules.
pub fn register_modules<T: Tracer>(
    ctx: &mut ResolverContext,
    files: Vec<ParsedFile>,
    tracer: &mut T,
) -> Result<(), CapacityError> {
    for file in files {
        let file_id = ctx.mib.add_file(&file.path)?;
        match file.result {
            Ok(mut modules) => {
                modules.sort_by(|a, b| a.name.cmp(&b.name));
                for module in modules {
                    register_module(ctx, module, Some(file_id), tracer)?;
                }
            }
            Err(failure) => {
                ctx.mib
                    .problems_mut()
                    .report(ProblemKind::ParseFailure, Location::file(file_id, failure.span))
                    .message(format!("{}: {}", file.path, failure.message))
                    .emit();
            }
        }
    }

    if ctx.config.synthesize_base_modules {
        synthesize_missing(ctx, tracer)?;
    }
    Ok(())
}

/// Generate base modules that are imported somewhere but were not supplied.
///
/// Repeats until stable, since a synthetic module may import another one.
fn synthesize_missing<T: Tracer>(
    ctx: &mut ResolverContext,
    tracer: &mut T,
) -> Result<(), CapacityError> {
    loop {
        let wanted: BTreeSet<&str> = ctx
            .sources
            .iter()
            .flat_map(|s| s.hir.imports.iter())
            .map(|i| i.module.name.as_str())
            .collect();
        let missing: Vec<BaseModule> = BaseModule::all()
            .filter(|b| wanted.contains(b.name()) && ctx.symbols.module(b.name()).is_none())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        for base in missing {
            register_module(ctx, base.synthesize(), None, tracer)?;
        }
    }
}

fn register_module<T: Tracer>(
    ctx: &mut ResolverContext,
    module: HirModule,
    file: Option<FileId>,
    tracer: &mut T,
) -> Result<(), CapacityError> {
    let name = ctx.mib.intern(&module.name.name)?;

    if let Some(existing) = ctx.symbols.module(&module.name.name) {
        let location = Location {
            file,
            module: None,
            span: module.span,
        };
        let first_file = ctx
            .file_of(existing)
            .and_then(|f| ctx.mib.file(f))
            .map_or("<synthetic>", |f| ctx.mib.str(f.path));
        let message = format!(
            "module {} is already defined in {first_file}; this copy is ignored",
            module.name
        );
        ctx.mib
            .problems_mut()
            .report(ProblemKind::DuplicateModule, location)
            .message(message)
            .emit();
        return Ok(());
    }

    let synthetic = file.is_none();
    let module_id = ctx.mib.add_module(name, file, module.span, synthetic)?;
    // cannot fail: the name was checked above
    let _ = ctx.symbols.register_module(&module.name.name, module_id);

    let source_idx = ctx.sources.len();
    for (def_idx, def) in module.definitions.iter().enumerate() {
        let def_name = ctx.mib.intern(&def.name().name)?;
        let id = ctx
            .mib
            .add_assignment(module_id, def_name, assignment_kind(def), def.span())?;
        if let Some(a) = ctx.mib.assignment_mut(id) {
            a.status = def.status().into();
            a.access = def.access().map(Into::into);
        }
        ctx.origins.insert(id, (source_idx, def_idx));

        match ctx.symbols.define(module_id, &def.name().name, id) {
            Ok(()) => ctx.mib.add_definition(id),
            Err(dup) => {
                if let Some(a) = ctx.mib.assignment_mut(id) {
                    a.state = ResolutionState::Excluded;
                }
                let location = Location::module(file, module_id, def.span());
                ctx.mib
                    .problems_mut()
                    .report(ProblemKind::DuplicateDefinition, location)
                    .message(format!(
                        "{} is already defined in {}",
                        def.name(),
                        module.name
                    ))
                    .subject(dup.rejected)
                    .conflicts_with(dup.existing)
                    .emit();
            }
        }
    }

    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::ModuleRegistered {
            name: &module.name.name,
            id: module_id,
            synthetic,
        }
    );

    ctx.sources.push(ModuleSource {
        id: module_id,
        file,
        hir: module,
    });
    Ok(())
}

fn assignment_kind(def: &HirDefinition) -> AssignmentKind {
    match def {
        HirDefinition::TypeDef(d) if d.is_textual_convention => AssignmentKind::TextualConvention,
        HirDefinition::TypeDef(_) => AssignmentKind::Type,
        HirDefinition::ValueAssignment(_) => AssignmentKind::Value,
        HirDefinition::ObjectType(_) => AssignmentKind::ObjectType,
        HirDefinition::ObjectIdentity(_) => AssignmentKind::ObjectIdentity,
        HirDefinition::ModuleIdentity(_) => AssignmentKind::ModuleIdentity,
        HirDefinition::Notification(_) => AssignmentKind::Notification,
    }
}
