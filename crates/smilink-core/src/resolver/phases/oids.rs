//! OID resolution.
//!
//! Computes the absolute OID of every OID-bearing assignment. A value is
//! anchored on a number, an intrinsic root (`iso`, `ccitt`,
//! `joint-iso-ccitt`) or the name of another OID-bearing assignment, which
//! may live in any module. Anchors on names are settled by a worklist
//! fixpoint; whatever is left afterwards is either part of a cycle or hangs
//! off something that never resolved.

use super::{sweep_end, sweep_start};
use crate::hir::{HirOidComponent, intrinsic_root};
use crate::model::{Assignment, AssignmentId, ModuleId, Oid, ResolutionState};
use crate::problem::ProblemKind;
use crate::resolver::context::ResolverContext;
use crate::resolver::symbols::Lookup;
use crate::resolver::tracing::{Phase, TraceEvent, TraceLevel, Tracer};
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// Where an OID value starts.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Anchor {
    /// A leading number: the value is absolute.
    Arc(u32),
    /// A leading name, optionally `MODULE.name`.
    Name {
        name: String,
        qualifier: Option<String>,
    },
}

impl core::fmt::Display for Anchor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Anchor::Arc(n) => write!(f, "{n}"),
            Anchor::Name {
                name,
                qualifier: Some(module),
            } => write!(f, "{module}.{name}"),
            Anchor::Name { name, .. } => f.write_str(name),
        }
    }
}

#[derive(Clone, Debug)]
struct OidEntry {
    id: AssignmentId,
    module: ModuleId,
    anchor: Anchor,
    /// Arcs following the anchor.
    arcs: Vec<u32>,
}

/// What an anchor currently resolves to.
enum Base {
    Ready(Oid),
    /// Names an assignment still on the worklist.
    Waiting(AssignmentId),
    /// Names nothing usable.
    Missing,
}

/// Resolve the OIDs of all OID-bearing assignments.
pub fn resolve_oids<T: Tracer>(ctx: &mut ResolverContext, tracer: &mut T) {
    let mut worklist = collect_entries(ctx);
    let mut pass = 0;
    while !worklist.is_empty() {
        sweep_start(tracer, Phase::Oids, pass, worklist.len());

        let decisions: Vec<Option<Oid>> = worklist
            .iter()
            .map(|entry| match base_of(ctx, entry) {
                Base::Ready(mut oid) => {
                    oid.extend(entry.arcs.iter().copied());
                    Some(oid)
                }
                Base::Waiting(_) | Base::Missing => None,
            })
            .collect();

        let mut remaining = Vec::with_capacity(worklist.len());
        let mut resolved = 0;
        for (entry, decision) in worklist.drain(..).zip(decisions) {
            match decision {
                Some(oid) => {
                    assign(ctx, entry.id, oid, tracer);
                    resolved += 1;
                }
                None => remaining.push(entry),
            }
        }
        worklist = remaining;

        sweep_end(tracer, Phase::Oids, pass, resolved, worklist.len());
        pass += 1;
        if resolved == 0 {
            break;
        }
    }

    classify_remaining(ctx, &worklist);
    settle_objects(ctx);
}

fn collect_entries(ctx: &mut ResolverContext) -> Vec<OidEntry> {
    let mut entries = Vec::new();
    let mut invalid = Vec::new();

    for (id, module, def) in ctx.definitions() {
        let excluded = ctx
            .mib
            .assignment(id)
            .is_none_or(|a| a.state == ResolutionState::Excluded);
        let Some(value) = def.oid() else {
            continue;
        };
        if excluded {
            continue;
        }

        let Some((first, rest)) = value.components.split_first() else {
            invalid.push((id, format!("OID value of {} is empty", def.name())));
            continue;
        };
        let anchor = match first {
            HirOidComponent::Number(n) | HirOidComponent::NamedNumber { number: n, .. } => {
                Anchor::Arc(*n)
            }
            HirOidComponent::Name(name) => Anchor::Name {
                name: name.name.clone(),
                qualifier: None,
            },
            HirOidComponent::QualifiedName { module, name } => Anchor::Name {
                name: name.name.clone(),
                qualifier: Some(module.name.clone()),
            },
        };
        let arcs: Option<Vec<u32>> = rest.iter().map(HirOidComponent::number).collect();
        let Some(arcs) = arcs else {
            let offending = rest
                .iter()
                .find(|c| c.number().is_none())
                .and_then(HirOidComponent::name)
                .map_or_else(String::new, |s| s.name.clone());
            invalid.push((
                id,
                format!(
                    "OID value of {} uses {offending} after its first component",
                    def.name()
                ),
            ));
            continue;
        };
        entries.push(OidEntry {
            id,
            module,
            anchor,
            arcs,
        });
    }

    for (id, message) in invalid {
        let location = ctx.location_of(id);
        ctx.mib
            .problems_mut()
            .report(ProblemKind::InvalidOidComponent, location)
            .message(message)
            .subject(id)
            .emit();
        if let Some(a) = ctx.mib.assignment_mut(id) {
            a.state = ResolutionState::Unresolved;
        }
    }
    entries
}

fn base_of(ctx: &ResolverContext, entry: &OidEntry) -> Base {
    let (name, qualifier) = match &entry.anchor {
        Anchor::Arc(n) => return Base::Ready(Oid::new(vec![*n])),
        Anchor::Name { name, qualifier } => (name, qualifier),
    };
    let lookup = match qualifier {
        Some(module) => ctx.symbols.resolve_qualified(module, name),
        None => ctx.symbols.resolve(entry.module, name),
    };
    match lookup {
        Lookup::Found(id) => match ctx.mib.assignment(id) {
            Some(Assignment { oid: Some(oid), .. }) => Base::Ready(oid.clone()),
            Some(a) if a.kind.has_oid() && a.state == ResolutionState::Pending => {
                Base::Waiting(id)
            }
            _ => Base::Missing,
        },
        Lookup::NotFound if qualifier.is_none() => {
            intrinsic_root(name).map_or(Base::Missing, |arc| Base::Ready(Oid::new(vec![arc])))
        }
        Lookup::NotFound | Lookup::Ambiguous(_) => Base::Missing,
    }
}

fn assign<T: Tracer>(ctx: &mut ResolverContext, id: AssignmentId, oid: Oid, tracer: &mut T) {
    if let Some(a) = ctx.mib.assignment_mut(id) {
        a.oid = Some(oid.clone());
        a.state = ResolutionState::Resolved;
    }
    crate::trace_event!(
        tracer,
        TraceLevel::Trace,
        TraceEvent::OidResolved {
            name: ctx.mib.name_of(id),
            oid: &oid,
        }
    );
}

enum Failure {
    /// The entry is one of the members of a cycle.
    Cycle,
    /// The chain runs into a cycle the entry is not part of.
    BehindCycle(AssignmentId),
    /// The chain ends at a name that does not resolve.
    Missing(AssignmentId),
}

fn classify_remaining(ctx: &mut ResolverContext, remaining: &[OidEntry]) {
    let failures: Vec<Failure> = remaining
        .iter()
        .map(|entry| classify(ctx, remaining, entry))
        .collect();

    for (entry, failure) in remaining.iter().zip(failures) {
        let name = ctx.mib.name_of(entry.id);
        let (kind, state, message) = match failure {
            Failure::Cycle => (
                ProblemKind::CircularOidReference,
                ResolutionState::Excluded,
                format!("OID value of {name} is defined in terms of itself through {}", entry.anchor),
            ),
            Failure::BehindCycle(member) => (
                ProblemKind::UnresolvedOidParent,
                ResolutionState::Unresolved,
                format!(
                    "OID value of {name} depends on {}, which is part of a cycle",
                    ctx.mib.name_of(member)
                ),
            ),
            Failure::Missing(last) if last == entry.id => (
                ProblemKind::UnresolvedOidParent,
                ResolutionState::Unresolved,
                format!("OID parent {} of {name} cannot be resolved", entry.anchor),
            ),
            Failure::Missing(last) => (
                ProblemKind::UnresolvedOidParent,
                ResolutionState::Unresolved,
                format!(
                    "OID value of {name} depends on {}, whose parent cannot be resolved",
                    ctx.mib.name_of(last)
                ),
            ),
        };

        let location = ctx.location_of(entry.id);
        ctx.mib
            .problems_mut()
            .report(kind, location)
            .message(message)
            .subject(entry.id)
            .emit();
        if let Some(a) = ctx.mib.assignment_mut(entry.id) {
            a.state = state;
        }
    }
}

/// Walk the parent chain of `entry`, bounded by the number of pending entries.
fn classify(ctx: &ResolverContext, remaining: &[OidEntry], entry: &OidEntry) -> Failure {
    let mut visited = BTreeSet::new();
    let mut current = entry;
    for _ in 0..=remaining.len() {
        visited.insert(current.id);
        let Base::Waiting(parent) = base_of(ctx, current) else {
            return Failure::Missing(current.id);
        };
        if parent == entry.id {
            return Failure::Cycle;
        }
        if visited.contains(&parent) {
            return Failure::BehindCycle(parent);
        }
        let Some(next) = remaining.iter().find(|e| e.id == parent) else {
            return Failure::Missing(parent);
        };
        current = next;
    }
    Failure::BehindCycle(current.id)
}

/// OBJECT-TYPEs with an OID are only as good as their SYNTAX.
fn settle_objects(ctx: &mut ResolverContext) {
    let updates: Vec<(AssignmentId, ResolutionState)> = ctx
        .mib
        .assignments()
        .filter(|a| a.state == ResolutionState::Resolved)
        .filter_map(|a| {
            let ty = ctx.mib.type_(a.ty?)?;
            let state = a.state.degrade_by(ty.state);
            (state != a.state).then_some((a.id, state))
        })
        .collect();
    for (id, state) in updates {
        if let Some(a) = ctx.mib.assignment_mut(id) {
            a.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::{
        HirModule, HirObjectType, HirOidAssignment, HirTypeSyntax, HirValueAssignment, Symbol,
    };
    use crate::parse::ParsedFile;
    use crate::problem::Severity;
    use crate::resolver::config::ResolverConfig;
    use crate::resolver::phases::{link_imports, register_modules, resolve_types};
    use crate::resolver::tracing::NoopTracer;
    use crate::span::Span;

    fn name(s: &str) -> HirOidComponent {
        HirOidComponent::Name(Symbol::from_name(s))
    }

    fn value(n: &str, components: Vec<HirOidComponent>) -> HirValueAssignment {
        HirValueAssignment::new(n, HirOidAssignment::new(components, Span::SYNTHETIC), Span::SYNTHETIC)
    }

    fn under(n: &str, parent: &str, arc: u32) -> HirValueAssignment {
        value(n, vec![name(parent), HirOidComponent::Number(arc)])
    }

    fn resolve(modules: Vec<HirModule>) -> ResolverContext {
        resolve_traced(modules, &mut NoopTracer)
    }

    fn resolve_traced<T: Tracer>(modules: Vec<HirModule>, tracer: &mut T) -> ResolverContext {
        let mut ctx = ResolverContext::new(ResolverConfig::default());
        register_modules(&mut ctx, vec![ParsedFile::ok("t.mib", modules)], &mut NoopTracer)
            .unwrap();
        link_imports(&mut ctx).unwrap();
        resolve_types(&mut ctx, &mut NoopTracer).unwrap();
        resolve_oids(&mut ctx, tracer);
        ctx
    }

    /// Names resolved in each sweep, with the sweep's (resolved, remaining).
    #[derive(Default)]
    struct Sweeps {
        names: Vec<Vec<String>>,
        ends: Vec<(usize, usize)>,
    }

    impl Tracer for Sweeps {
        fn level(&self) -> TraceLevel {
            TraceLevel::Trace
        }

        fn trace(&mut self, _level: TraceLevel, event: TraceEvent<'_>) {
            match event {
                TraceEvent::PassStart { phase: Phase::Oids, .. } => self.names.push(Vec::new()),
                TraceEvent::OidResolved { name, .. } => {
                    if let Some(sweep) = self.names.last_mut() {
                        sweep.push(name.into());
                    }
                }
                TraceEvent::PassEnd {
                    phase: Phase::Oids,
                    resolved,
                    remaining,
                    ..
                } => self.ends.push((resolved, remaining)),
                _ => {}
            }
        }
    }

    fn chain() -> HirModule {
        // declared root first, so only the snapshot keeps b and a waiting
        HirModule::new("A-MIB", Span::SYNTHETIC)
            .with_definition(under("c", "iso", 1))
            .with_definition(under("b", "c", 2))
            .with_definition(under("a", "b", 3))
    }

    #[test]
    fn one_link_of_a_chain_per_sweep() {
        let mut sweeps = Sweeps::default();
        let ctx = resolve_traced(vec![chain()], &mut sweeps);

        assert_eq!(oid(&ctx, "A-MIB", "a").as_deref(), Some("1.1.2.3"));
        assert_eq!(sweeps.names, [vec!["c"], vec!["b"], vec!["a"]]);
        assert_eq!(sweeps.ends, [(1, 2), (1, 1), (1, 0)]);
    }

    #[test]
    fn stuck_entry_costs_one_idle_sweep() {
        let mut sweeps = Sweeps::default();
        let ctx = resolve_traced(
            vec![chain().with_definition(under("lost", "nowhere", 1))],
            &mut sweeps,
        );

        assert_eq!(oid(&ctx, "A-MIB", "a").as_deref(), Some("1.1.2.3"));
        assert_eq!(ctx.mib.lookup("A-MIB", "lost").unwrap().state, ResolutionState::Unresolved);
        assert_eq!(sweeps.ends, [(1, 3), (1, 2), (1, 1), (0, 1)]);
        assert_eq!(sweeps.names.last(), Some(&Vec::<String>::new()));
    }

    fn oid(ctx: &ResolverContext, module: &str, n: &str) -> Option<String> {
        ctx.mib.lookup(module, n)?.oid.as_ref().map(ToString::to_string)
    }

    #[test]
    fn resolves_through_base_module() {
        let ctx = resolve(vec![
            HirModule::new("ACME-MIB", Span::SYNTHETIC)
                .with_import("SNMPv2-SMI", "enterprises")
                .with_definition(under("acme", "enterprises", 9999))
                .with_definition(under("acmeProducts", "acme", 1)),
        ]);
        assert!(ctx.mib.problems().is_empty());
        assert_eq!(oid(&ctx, "ACME-MIB", "acmeProducts").as_deref(), Some("1.3.6.1.4.1.9999.1"));
    }

    #[test]
    fn forward_reference_within_module() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC)
                .with_definition(under("leaf", "branch", 7))
                .with_definition(under("branch", "iso", 3)),
        ]);
        assert!(ctx.mib.problems().is_empty());
        assert_eq!(oid(&ctx, "A-MIB", "leaf").as_deref(), Some("1.3.7"));
    }

    #[test]
    fn rfc1155_internet_spelling() {
        let ctx = resolve(vec![
            HirModule::new("OLD-MIB", Span::SYNTHETIC)
                .with_import("RFC1155-SMI", "enterprises")
                .with_definition(under("old", "enterprises", 42)),
        ]);
        assert!(ctx.mib.problems().is_empty());
        assert_eq!(oid(&ctx, "OLD-MIB", "old").as_deref(), Some("1.3.6.1.4.1.42"));
    }

    #[test]
    fn self_reference_is_fatal_and_excluded() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC)
                .with_definition(under("loop", "loop", 1))
                .with_definition(under("child", "loop", 2)),
        ]);
        let problems = ctx.mib.problems();
        assert_eq!(problems.len(), 2);
        let circular = problems.of_kind(ProblemKind::CircularOidReference).next().unwrap();
        assert_eq!(circular.severity, Severity::Fatal);
        assert_eq!(ctx.mib.lookup("A-MIB", "loop").unwrap().state, ResolutionState::Excluded);
        assert_eq!(ctx.mib.lookup("A-MIB", "child").unwrap().state, ResolutionState::Unresolved);
        assert_eq!(problems.of_kind(ProblemKind::UnresolvedOidParent).count(), 1);
    }

    #[test]
    fn two_member_cycle() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC)
                .with_definition(under("a", "b", 1))
                .with_definition(under("b", "a", 1)),
        ]);
        assert_eq!(ctx.mib.problems().of_kind(ProblemKind::CircularOidReference).count(), 2);
    }

    #[test]
    fn missing_parent() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC).with_definition(under("orphan", "nowhere", 1)),
        ]);
        let problem = &ctx.mib.problems().as_slice()[0];
        assert_eq!(problem.kind, ProblemKind::UnresolvedOidParent);
        assert_eq!(problem.message, "OID parent nowhere of orphan cannot be resolved");
    }

    #[test]
    fn name_after_first_component_is_invalid() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC)
                .with_definition(value("odd", vec![name("iso"), name("org")])),
        ]);
        assert_eq!(ctx.mib.problems().as_slice()[0].kind, ProblemKind::InvalidOidComponent);
        assert_eq!(ctx.mib.lookup("A-MIB", "odd").unwrap().state, ResolutionState::Unresolved);
    }

    #[test]
    fn named_numbers_are_absolute() {
        let ctx = resolve(vec![HirModule::new("A-MIB", Span::SYNTHETIC).with_definition(value(
            "dod",
            vec![
                HirOidComponent::NamedNumber {
                    name: Symbol::from_name("iso"),
                    number: 1,
                },
                HirOidComponent::NamedNumber {
                    name: Symbol::from_name("org"),
                    number: 3,
                },
                HirOidComponent::Number(6),
            ],
        ))]);
        assert_eq!(oid(&ctx, "A-MIB", "dod").as_deref(), Some("1.3.6"));
    }

    #[test]
    fn object_with_broken_syntax_is_partial() {
        let object = HirObjectType::new(
            "thing",
            HirTypeSyntax::reference("Missing"),
            HirOidAssignment::new(vec![name("iso"), HirOidComponent::Number(9)], Span::SYNTHETIC),
            Span::SYNTHETIC,
        );
        let ctx = resolve(vec![HirModule::new("A-MIB", Span::SYNTHETIC).with_definition(object)]);
        let thing = ctx.mib.lookup("A-MIB", "thing").unwrap();
        assert_eq!(thing.state, ResolutionState::Partial);
        assert_eq!(thing.oid.as_ref().map(ToString::to_string).as_deref(), Some("1.9"));
    }

    #[test]
    fn qualified_parent() {
        let ctx = resolve(vec![
            HirModule::new("A-MIB", Span::SYNTHETIC).with_definition(value(
                "x",
                vec![
                    HirOidComponent::QualifiedName {
                        module: Symbol::from_name("B-MIB"),
                        name: Symbol::from_name("base"),
                    },
                    HirOidComponent::Number(5),
                ],
            )),
            HirModule::new("B-MIB", Span::SYNTHETIC).with_definition(under("base", "iso", 2)),
        ]);
        assert_eq!(oid(&ctx, "A-MIB", "x").as_deref(), Some("1.2.5"));
    }
}
