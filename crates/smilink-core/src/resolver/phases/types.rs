//! Type resolution.
//!
//! Every TYPE assignment, TEXTUAL-CONVENTION and OBJECT-TYPE SYNTAX is
//! lowered into type nodes. Builtins are settled on the spot; each named
//! reference becomes a `Reference` node on the worklist and is bound once
//! its target is itself settled.

use super::{sweep_end, sweep_start};
use crate::hir::{HirConstraint, HirDefinition, HirRangeValue, HirStatus, HirTypeSyntax};
use crate::model::{
    AssignmentId, BuiltinType, CapacityError, Constraint, ConstraintRange, Field, ModuleId,
    NamedValue, RangeBound, ResolutionState, TypeId, TypeKind,
};
use crate::problem::ProblemKind;
use crate::resolver::context::ResolverContext;
use crate::resolver::symbols::Lookup;
use crate::resolver::tracing::{Phase, TraceEvent, TraceLevel, Tracer};
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// A `Reference` node waiting for its target.
#[derive(Clone, Debug)]
struct PendingRef {
    node: TypeId,
    /// Module the reference is written in.
    module: ModuleId,
    /// Assignment whose SYNTAX contains the reference.
    referrer: AssignmentId,
    symbol: String,
    qualifier: Option<String>,
}

impl PendingRef {
    fn display(&self) -> String {
        match &self.qualifier {
            Some(module) => format!("{module}.{}", self.symbol),
            None => self.symbol.clone(),
        }
    }
}

/// Resolve all type references.
pub fn resolve_types<T: Tracer>(
    ctx: &mut ResolverContext,
    tracer: &mut T,
) -> Result<(), CapacityError> {
    let mut worklist = lower_all(ctx)?;
    bind_references(ctx, &mut worklist, tracer);
    classify_remaining(ctx, &mut worklist, tracer);
    propagate_states(ctx);
    settle_type_assignments(ctx);
    Ok(())
}

// === Lowering ===

struct LowerJob {
    id: AssignmentId,
    module: ModuleId,
    syntax: HirTypeSyntax,
    /// Set for type assignments; OBJECT-TYPE syntax stays anonymous.
    named: bool,
    convention: Option<(Option<String>, HirStatus)>,
}

fn lower_all(ctx: &mut ResolverContext) -> Result<Vec<PendingRef>, CapacityError> {
    let jobs: Vec<LowerJob> = ctx
        .definitions()
        .filter(|(id, _, _)| {
            ctx.mib
                .assignment(*id)
                .is_some_and(|a| a.state != ResolutionState::Excluded)
        })
        .filter_map(|(id, module, def)| match def {
            HirDefinition::TypeDef(d) => Some(LowerJob {
                id,
                module,
                syntax: d.syntax.clone(),
                named: true,
                convention: d
                    .is_textual_convention
                    .then(|| (d.display_hint.clone(), d.status)),
            }),
            HirDefinition::ObjectType(o) => Some(LowerJob {
                id,
                module,
                syntax: o.syntax.clone(),
                named: false,
                convention: None,
            }),
            _ => None,
        })
        .collect();

    let mut refs = Vec::new();
    for job in jobs {
        let mut top = lower(ctx, job.module, job.id, &job.syntax, &mut refs)?;
        if let Some((hint, status)) = job.convention {
            let display_hint = hint.as_deref().map(|h| ctx.mib.intern(h)).transpose()?;
            top = ctx.mib.add_type(
                job.module,
                TypeKind::TextualConvention {
                    base: top,
                    display_hint,
                    status: status.into(),
                },
            )?;
        }
        if job.named {
            let name = ctx.mib.assignment(job.id).map(|a| a.name);
            if let Some(ty) = ctx.mib.type_mut(top) {
                ty.name = name;
            }
        }
        if let Some(a) = ctx.mib.assignment_mut(job.id) {
            a.ty = Some(top);
        }
    }
    Ok(refs)
}

fn lower(
    ctx: &mut ResolverContext,
    module: ModuleId,
    referrer: AssignmentId,
    syntax: &HirTypeSyntax,
    refs: &mut Vec<PendingRef>,
) -> Result<TypeId, CapacityError> {
    let kind = match syntax {
        HirTypeSyntax::TypeRef(name) => {
            return reference(ctx, module, referrer, &name.name, None, refs);
        }
        HirTypeSyntax::QualifiedTypeRef { module: qualifier, name } => {
            return reference(ctx, module, referrer, &name.name, Some(&qualifier.name), refs);
        }
        HirTypeSyntax::Integer => TypeKind::Builtin(BuiltinType::Integer),
        HirTypeSyntax::OctetString => TypeKind::Builtin(BuiltinType::OctetString),
        HirTypeSyntax::ObjectIdentifier => TypeKind::Builtin(BuiltinType::ObjectIdentifier),
        HirTypeSyntax::IntegerEnum(items) => {
            let base = ctx.mib.add_type(module, TypeKind::Builtin(BuiltinType::Integer))?;
            let items = named_values(ctx, items.iter().map(|(s, v)| (s.name.as_str(), *v)))?;
            TypeKind::Enumeration { base, items }
        }
        HirTypeSyntax::Bits(bits) => {
            let base = ctx.mib.add_type(module, TypeKind::Builtin(BuiltinType::Bits))?;
            let items = named_values(
                ctx,
                bits.iter().map(|(s, v)| (s.name.as_str(), i64::from(*v))),
            )?;
            TypeKind::Enumeration { base, items }
        }
        HirTypeSyntax::Constrained { base, constraint } => {
            let id = lower(ctx, module, referrer, base, refs)?;
            let constraint = check_constraint(ctx, referrer, constraint);
            if let Some(ty) = ctx.mib.type_mut(id) {
                ty.constraint = constraint;
            }
            return Ok(id);
        }
        HirTypeSyntax::Sequence(fields) => {
            TypeKind::Sequence(lower_fields(ctx, module, referrer, fields, refs)?)
        }
        HirTypeSyntax::SequenceOf(elem) => {
            TypeKind::SequenceOf(lower(ctx, module, referrer, elem, refs)?)
        }
        HirTypeSyntax::Choice(alternatives) => {
            TypeKind::Choice(lower_fields(ctx, module, referrer, alternatives, refs)?)
        }
    };
    ctx.mib.add_type(module, kind)
}

fn reference(
    ctx: &mut ResolverContext,
    module: ModuleId,
    referrer: AssignmentId,
    symbol: &str,
    qualifier: Option<&str>,
    refs: &mut Vec<PendingRef>,
) -> Result<TypeId, CapacityError> {
    let kind = TypeKind::Reference {
        symbol: ctx.mib.intern(symbol)?,
        qualifier: qualifier.map(|q| ctx.mib.intern(q)).transpose()?,
        target: None,
        imported_from: None,
    };
    let node = ctx.mib.add_type(module, kind)?;
    refs.push(PendingRef {
        node,
        module,
        referrer,
        symbol: String::from(symbol),
        qualifier: qualifier.map(String::from),
    });
    Ok(node)
}

fn lower_fields(
    ctx: &mut ResolverContext,
    module: ModuleId,
    referrer: AssignmentId,
    fields: &[(crate::hir::Symbol, HirTypeSyntax)],
    refs: &mut Vec<PendingRef>,
) -> Result<Vec<Field>, CapacityError> {
    let mut out = Vec::with_capacity(fields.len());
    for (name, syntax) in fields {
        let ty = lower(ctx, module, referrer, syntax, refs)?;
        out.push(Field {
            name: ctx.mib.intern(&name.name)?,
            ty,
        });
    }
    Ok(out)
}

fn named_values<'a>(
    ctx: &mut ResolverContext,
    items: impl Iterator<Item = (&'a str, i64)>,
) -> Result<Vec<NamedValue>, CapacityError> {
    items
        .map(|(name, value)| {
            Ok(NamedValue {
                name: ctx.mib.intern(name)?,
                value,
            })
        })
        .collect()
}

fn bound(value: &HirRangeValue) -> RangeBound {
    match value {
        HirRangeValue::Signed(v) => RangeBound::Value(i128::from(*v)),
        HirRangeValue::Unsigned(v) => RangeBound::Value(i128::from(*v)),
        HirRangeValue::Min => RangeBound::Min,
        HirRangeValue::Max => RangeBound::Max,
    }
}

/// Convert a constraint, dropping (and reporting) ranges that cannot hold.
fn check_constraint(
    ctx: &mut ResolverContext,
    referrer: AssignmentId,
    constraint: &HirConstraint,
) -> Option<Constraint> {
    let (ranges, is_size) = match constraint {
        HirConstraint::Size(r) => (r, true),
        HirConstraint::Range(r) => (r, false),
    };

    let mut kept = Vec::with_capacity(ranges.len());
    for range in ranges {
        let min = bound(&range.min);
        let max = range.max.as_ref().map_or(min, bound);
        let checked = ConstraintRange { min, max };
        let negative_size = is_size && matches!(min, RangeBound::Value(v) if v < 0);

        if checked.is_ordered() && !negative_size {
            kept.push(checked);
            continue;
        }
        let message = if negative_size {
            format!("SIZE {checked} of {} is negative", ctx.mib.name_of(referrer))
        } else {
            format!(
                "range {min}..{max} of {} has its lower bound above its upper bound",
                ctx.mib.name_of(referrer)
            )
        };
        let location = ctx.location_of(referrer);
        ctx.mib
            .problems_mut()
            .report(ProblemKind::RangeConstraintViolation, location)
            .message(message)
            .subject(referrer)
            .emit();
    }

    if kept.is_empty() {
        None
    } else if is_size {
        Some(Constraint::Size(kept))
    } else {
        Some(Constraint::Value(kept))
    }
}

// === Binding ===

fn lookup(ctx: &ResolverContext, r: &PendingRef) -> Lookup {
    match &r.qualifier {
        Some(module) => ctx.symbols.resolve_qualified(module, &r.symbol),
        None => ctx.symbols.resolve(r.module, &r.symbol),
    }
}

/// Check that no reference along the refinement chain of `id` is unbound.
fn is_settled(ctx: &ResolverContext, id: TypeId) -> bool {
    ctx.mib
        .type_chain(id)
        .iter()
        .all(|t| !t.kind.is_pending_reference())
}

/// The type node `r` names, with the module it lives in.
fn target_of(ctx: &ResolverContext, r: &PendingRef) -> Option<(TypeId, ModuleId)> {
    let found = ctx.mib.assignment(lookup(ctx, r).found()?)?;
    if !found.kind.is_type() {
        return None;
    }
    Some((found.ty?, found.module))
}

fn bind<T: Tracer>(
    ctx: &mut ResolverContext,
    r: &PendingRef,
    to: TypeId,
    found_in: ModuleId,
    tracer: &mut T,
) {
    if let Some(TypeKind::Reference {
        target,
        imported_from,
        ..
    }) = ctx.mib.type_mut(r.node).map(|t| &mut t.kind)
    {
        *target = Some(to);
        *imported_from = (found_in != r.module).then_some(found_in);
    }
    crate::trace_event!(
        tracer,
        TraceLevel::Trace,
        TraceEvent::TypeResolved {
            module: r.module,
            symbol: &r.symbol,
        }
    );
}

fn bind_references<T: Tracer>(
    ctx: &mut ResolverContext,
    worklist: &mut Vec<PendingRef>,
    tracer: &mut T,
) {
    let mut pass = 0;
    while !worklist.is_empty() {
        sweep_start(tracer, Phase::Types, pass, worklist.len());

        let decisions: Vec<Option<(TypeId, ModuleId)>> = worklist
            .iter()
            .map(|r| target_of(ctx, r).filter(|(ty, _)| is_settled(ctx, *ty)))
            .collect();

        let mut remaining = Vec::with_capacity(worklist.len());
        let mut resolved = 0;
        for (r, decision) in worklist.drain(..).zip(decisions) {
            match decision {
                Some((to, found_in)) => {
                    bind(ctx, &r, to, found_in, tracer);
                    resolved += 1;
                }
                None => remaining.push(r),
            }
        }
        *worklist = remaining;

        sweep_end(tracer, Phase::Types, pass, resolved, worklist.len());
        pass += 1;
        if resolved == 0 {
            break;
        }
    }
}

enum Verdict {
    /// The target exists but waits on something broken; bind it anyway.
    Bind(TypeId, ModuleId),
    Fail(ProblemKind, String),
}

/// Decide what to do with references the fixpoint could not bind.
fn classify_remaining<T: Tracer>(
    ctx: &mut ResolverContext,
    worklist: &mut Vec<PendingRef>,
    tracer: &mut T,
) {
    let snapshot: &[PendingRef] = worklist;
    let verdicts: Vec<Verdict> = snapshot.iter().map(|r| classify(ctx, snapshot, r)).collect();

    for (r, verdict) in worklist.drain(..).zip(verdicts) {
        match verdict {
            Verdict::Bind(to, found_in) => bind(ctx, &r, to, found_in, tracer),
            Verdict::Fail(kind, message) => {
                let location = ctx.location_of(r.referrer);
                ctx.mib
                    .problems_mut()
                    .report(kind, location)
                    .message(message)
                    .subject(r.referrer)
                    .emit();
            }
        }
    }
}

fn classify(ctx: &ResolverContext, worklist: &[PendingRef], r: &PendingRef) -> Verdict {
    let referrer = ctx.mib.name_of(r.referrer);
    let found = match lookup(ctx, r) {
        Lookup::Found(id) => id,
        Lookup::NotFound => {
            return Verdict::Fail(
                ProblemKind::UnresolvedType,
                format!("{referrer} refers to undefined type {}", r.display()),
            );
        }
        Lookup::Ambiguous(sources) => {
            return Verdict::Fail(
                ProblemKind::UnresolvedType,
                format!(
                    "{referrer} refers to type {}, which is imported from {} modules",
                    r.display(),
                    sources.len()
                ),
            );
        }
    };

    let Some((to, found_in)) = target_of(ctx, r) else {
        return Verdict::Fail(
            ProblemKind::UnresolvedType,
            format!("{referrer} uses {} as a type, but it is a value", r.display()),
        );
    };

    if leads_back(ctx, worklist, found, r.referrer) {
        return Verdict::Fail(
            ProblemKind::CircularTypeReference,
            format!("{referrer} is defined in terms of itself through {}", r.display()),
        );
    }
    Verdict::Bind(to, found_in)
}

/// Follow unbound references from `start` and report whether they lead to `referrer`.
fn leads_back(
    ctx: &ResolverContext,
    worklist: &[PendingRef],
    start: AssignmentId,
    referrer: AssignmentId,
) -> bool {
    let mut visited = BTreeSet::new();
    let mut current = start;
    loop {
        if current == referrer {
            return true;
        }
        if !visited.insert(current) {
            return false;
        }
        let Some(ty) = ctx.mib.assignment(current).and_then(|a| a.ty) else {
            return false;
        };
        let chain = ctx.mib.type_chain(ty);
        let Some(blocking) = chain.iter().find(|t| t.kind.is_pending_reference()) else {
            return false;
        };
        let Some(next) = worklist
            .iter()
            .find(|p| p.node == blocking.id)
            .and_then(|p| lookup(ctx, p).found())
        else {
            return false;
        };
        current = next;
    }
}

// === States ===

fn dependencies(kind: &TypeKind) -> Vec<TypeId> {
    match kind {
        TypeKind::Builtin(_) => Vec::new(),
        TypeKind::Reference { target, .. } => target.iter().copied().collect(),
        TypeKind::Enumeration { base, .. } | TypeKind::TextualConvention { base, .. } => {
            vec![*base]
        }
        TypeKind::SequenceOf(elem) => vec![*elem],
        TypeKind::Sequence(fields) | TypeKind::Choice(fields) => {
            fields.iter().map(|f| f.ty).collect()
        }
    }
}

/// Unbound references are `Unresolved`; everything built on them is `Partial`.
fn propagate_states(ctx: &mut ResolverContext) {
    let ids: Vec<TypeId> = ctx.mib.types().map(|t| t.id).collect();
    for id in &ids {
        if let Some(ty) = ctx.mib.type_mut(*id) {
            ty.state = if ty.kind.is_pending_reference() {
                ResolutionState::Unresolved
            } else {
                ResolutionState::Resolved
            };
        }
    }

    for _ in 0..=ids.len() {
        let updates: Vec<(TypeId, ResolutionState)> = ctx
            .mib
            .types()
            .filter_map(|ty| {
                let state = dependencies(&ty.kind)
                    .into_iter()
                    .filter_map(|d| ctx.mib.type_(d))
                    .fold(ty.state, |s, d| s.degrade_by(d.state));
                (state != ty.state).then_some((ty.id, state))
            })
            .collect();
        if updates.is_empty() {
            break;
        }
        for (id, state) in updates {
            if let Some(ty) = ctx.mib.type_mut(id) {
                ty.state = state;
            }
        }
    }
}

/// Type assignments take the state of their top node.
fn settle_type_assignments(ctx: &mut ResolverContext) {
    let settled: Vec<(AssignmentId, ResolutionState)> = ctx
        .mib
        .assignments()
        .filter(|a| a.kind.is_type() && a.state == ResolutionState::Pending)
        .map(|a| {
            let state = a
                .ty
                .and_then(|t| ctx.mib.type_(t))
                .map_or(ResolutionState::Unresolved, |t| t.state);
            (a.id, state)
        })
        .collect();
    for (id, state) in settled {
        if let Some(a) = ctx.mib.assignment_mut(id) {
            a.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::{
        HirModule, HirObjectType, HirOidAssignment, HirOidComponent, HirRange, HirTypeDef,
    };
    use crate::parse::ParsedFile;
    use crate::resolver::config::ResolverConfig;
    use crate::resolver::phases::{link_imports, register_modules};
    use crate::resolver::tracing::NoopTracer;
    use crate::span::Span;

    fn typedef(name: &str, syntax: HirTypeSyntax) -> HirTypeDef {
        HirTypeDef::new(name, syntax, Span::SYNTHETIC)
    }

    fn object(name: &str, syntax: HirTypeSyntax) -> HirObjectType {
        let oid = HirOidAssignment::new(vec![HirOidComponent::Number(1)], Span::SYNTHETIC);
        HirObjectType::new(name, syntax, oid, Span::SYNTHETIC)
    }

    fn resolve(modules: Vec<HirModule>) -> ResolverContext {
        let mut ctx = ResolverContext::new(ResolverConfig::default());
        register_modules(&mut ctx, vec![ParsedFile::ok("t.mib", modules)], &mut NoopTracer)
            .unwrap();
        link_imports(&mut ctx).unwrap();
        resolve_types(&mut ctx, &mut NoopTracer).unwrap();
        ctx
    }

    fn state(ctx: &ResolverContext, module: &str, name: &str) -> ResolutionState {
        ctx.mib.lookup(module, name).unwrap().state
    }

    fn kinds(ctx: &ResolverContext) -> Vec<ProblemKind> {
        ctx.mib.problems().iter().map(|p| p.kind).collect()
    }

    #[test]
    fn forward_reference_within_module() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC)
                .with_definition(typedef("Outer", HirTypeSyntax::reference("Inner")))
                .with_definition(typedef("Inner", HirTypeSyntax::OctetString)),
        ]);
        assert!(kinds(&ctx).is_empty());
        let outer = ctx.mib.lookup("A-MIB", "Outer").unwrap();
        let chain = ctx.mib.type_chain(outer.ty.unwrap());
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[1].kind, TypeKind::Builtin(BuiltinType::OctetString));
        assert_eq!(outer.state, ResolutionState::Resolved);
    }

    #[test]
    fn imported_textual_convention_carries_hint() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC)
                .with_import("SNMPv2-TC", "DisplayString")
                .with_definition(typedef("Label", HirTypeSyntax::reference("DisplayString"))),
        ]);
        assert!(kinds(&ctx).is_empty());
        let label = ctx.mib.lookup("A-MIB", "Label").unwrap();
        let node = ctx.mib.type_(label.ty.unwrap()).unwrap();
        let tc = ctx.mib.module_by_name("SNMPv2-TC").unwrap().id;
        assert!(matches!(node.kind, TypeKind::Reference { imported_from: Some(m), .. } if m == tc));
        assert_eq!(ctx.mib.effective_display_hint(node.id), Some("255a"));
    }

    #[test]
    fn undefined_type_is_unresolved_and_dependents_partial() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC)
                .with_definition(typedef("Broken", HirTypeSyntax::reference("Nowhere")))
                .with_definition(typedef("Alias", HirTypeSyntax::reference("Broken"))),
        ]);
        assert_eq!(kinds(&ctx), [ProblemKind::UnresolvedType]);
        assert_eq!(state(&ctx, "A-MIB", "Broken"), ResolutionState::Unresolved);
        assert_eq!(state(&ctx, "A-MIB", "Alias"), ResolutionState::Partial);
    }

    #[test]
    fn circular_types_are_reported_for_each_member() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC)
                .with_definition(typedef("Ping", HirTypeSyntax::reference("Pong")))
                .with_definition(typedef("Pong", HirTypeSyntax::reference("Ping")))
                .with_definition(typedef("User", HirTypeSyntax::reference("Ping"))),
        ]);
        let circular = ctx.mib.problems().of_kind(ProblemKind::CircularTypeReference).count();
        assert_eq!(circular, 2);
        assert_eq!(ctx.mib.problems().len(), 2);
        assert_eq!(state(&ctx, "A-MIB", "Ping"), ResolutionState::Unresolved);
        assert_eq!(state(&ctx, "A-MIB", "User"), ResolutionState::Partial);
    }

    #[test]
    fn self_reference_through_sequence_of_is_legal() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC).with_definition(typedef(
                "Tree",
                HirTypeSyntax::Sequence(vec![
                    ("label".into(), HirTypeSyntax::OctetString),
                    (
                        "children".into(),
                        HirTypeSyntax::SequenceOf(Box::new(HirTypeSyntax::reference("Tree"))),
                    ),
                ]),
            )),
        ]);
        assert!(kinds(&ctx).is_empty());
        assert_eq!(state(&ctx, "A-MIB", "Tree"), ResolutionState::Resolved);
    }

    #[test]
    fn value_used_as_type() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC)
                .with_definition(crate::hir::HirValueAssignment::new(
                    "notAType",
                    HirOidAssignment::new(vec![HirOidComponent::Number(1)], Span::SYNTHETIC),
                    Span::SYNTHETIC,
                ))
                .with_definition(object("obj", HirTypeSyntax::reference("notAType"))),
        ]);
        assert_eq!(kinds(&ctx), [ProblemKind::UnresolvedType]);
        let problem = &ctx.mib.problems().as_slice()[0];
        assert_eq!(problem.subject, Some(ctx.mib.lookup("A-MIB", "obj").unwrap().id));
    }

    #[test]
    fn inverted_range_is_dropped() {
        let syntax = HirTypeSyntax::Constrained {
            base: Box::new(HirTypeSyntax::Integer),
            constraint: HirConstraint::Range(vec![
                HirRange::range_signed(10, 1),
                HirRange::range_signed(20, 30),
            ]),
        };
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC).with_definition(typedef("Odd", syntax)),
        ]);
        assert_eq!(kinds(&ctx), [ProblemKind::RangeConstraintViolation]);
        let odd = ctx.mib.lookup("A-MIB", "Odd").unwrap();
        assert_eq!(odd.state, ResolutionState::Resolved);
        let node = ctx.mib.type_(odd.ty.unwrap()).unwrap();
        let ranges = node.constraint.as_ref().unwrap().ranges();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].min, RangeBound::Value(20));
    }

    #[test]
    fn negative_size_is_rejected() {
        let syntax = HirTypeSyntax::Constrained {
            base: Box::new(HirTypeSyntax::OctetString),
            constraint: HirConstraint::Size(vec![HirRange::single_signed(-1)]),
        };
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC).with_definition(typedef("Neg", syntax)),
        ]);
        assert_eq!(kinds(&ctx), [ProblemKind::RangeConstraintViolation]);
        let neg = ctx.mib.lookup("A-MIB", "Neg").unwrap();
        assert!(ctx.mib.type_(neg.ty.unwrap()).unwrap().constraint.is_none());
    }

    #[test]
    fn counter64_bounds_fit() {
        let syntax = HirTypeSyntax::Constrained {
            base: Box::new(HirTypeSyntax::Integer),
            constraint: HirConstraint::Range(vec![HirRange::range_unsigned(0, u64::MAX)]),
        };
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC).with_definition(typedef("Big", syntax)),
        ]);
        assert!(kinds(&ctx).is_empty());
    }

    #[test]
    fn qualified_reference_disambiguates() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC)
                .with_import("B-MIB", "T")
                .with_import("C-MIB", "T")
                .with_definition(typedef(
                    "Picked",
                    HirTypeSyntax::QualifiedTypeRef {
                        module: "C-MIB".into(),
                        name: "T".into(),
                    },
                )),
            HirModule::new("B-MIB", Span::SYNTHETIC)
                .with_definition(typedef("T", HirTypeSyntax::Integer)),
            HirModule::new("C-MIB", Span::SYNTHETIC)
                .with_definition(typedef("T", HirTypeSyntax::OctetString)),
        ]);
        assert_eq!(kinds(&ctx), [ProblemKind::AmbiguousImport]);
        let picked = ctx.mib.lookup("A-MIB", "Picked").unwrap();
        let chain = ctx.mib.type_chain(picked.ty.unwrap());
        assert_eq!(chain.last().unwrap().kind, TypeKind::Builtin(BuiltinType::OctetString));
    }

    #[test]
    fn enumeration_keeps_labels() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC).with_definition(typedef(
                "Toggle",
                HirTypeSyntax::IntegerEnum(vec![("on".into(), 1), ("off".into(), 2)]),
            )),
        ]);
        let toggle = ctx.mib.lookup("A-MIB", "Toggle").unwrap();
        let TypeKind::Enumeration { items, .. } = &ctx.mib.type_(toggle.ty.unwrap()).unwrap().kind
        else {
            panic!("expected enumeration");
        };
        let labels: Vec<_> = items.iter().map(|i| (ctx.mib.str(i.name), i.value)).collect();
        assert_eq!(labels, [("on", 1), ("off", 2)]);
    }
}
