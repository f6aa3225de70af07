//! Conflict detection and OID tree construction.
//!
//! Runs once both fixpoints are done. Claimants of each OID are considered
//! in canonical order: the first becomes the node's definition, every later
//! one is recorded as shadowed and reported alongside it.

use crate::model::{AssignmentId, CapacityError, NodeId, Oid, ResolutionState};
use crate::problem::{ProblemKind, Severity};
use crate::resolver::config::CanonicalSelection;
use crate::resolver::context::ResolverContext;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::vec::Vec;

/// Claimants of one OID, canonical first.
type Claims = BTreeMap<Oid, Vec<AssignmentId>>;

/// Detect OID conflicts and build the OID tree.
pub fn finalize(ctx: &mut ResolverContext) -> Result<(), CapacityError> {
    let claims = collect_claims(ctx);
    report_conflicts(ctx, &claims);
    build_tree(ctx, &claims)?;

    debug_assert!(
        ctx.mib
            .assignments()
            .all(|a| a.state != ResolutionState::Pending),
        "assignment left pending after resolution"
    );
    Ok(())
}

fn collect_claims(ctx: &ResolverContext) -> Claims {
    let mut ordered: Vec<(AssignmentId, &Oid)> = ctx
        .mib
        .assignments()
        .filter(|a| matches!(a.state, ResolutionState::Resolved | ResolutionState::Partial))
        .filter_map(|a| Some((a.id, a.oid.as_ref()?)))
        .collect();
    if ctx.config.canonical == CanonicalSelection::LastRegistered {
        ordered.reverse();
    }

    let mut claims = Claims::new();
    for (id, oid) in ordered {
        claims.entry(oid.clone()).or_default().push(id);
    }
    claims
}

fn report_conflicts(ctx: &mut ResolverContext, claims: &Claims) {
    for (oid, claimants) in claims {
        let Some((&canonical, rest)) = claimants.split_first() else {
            continue;
        };
        for &other in rest {
            let canonical_name = qualified_name(ctx, canonical);
            let other_name = qualified_name(ctx, other);
            // the same node from two copies of a base module
            let severity = if ctx.mib.name_of(canonical) == ctx.mib.name_of(other) {
                Severity::Warning
            } else {
                Severity::Error
            };
            let location = ctx.location_of(other);
            ctx.mib
                .problems_mut()
                .report(ProblemKind::MultipleValueConflict, location)
                .severity(severity)
                .message(format!(
                    "{oid} is defined by both {canonical_name} and {other_name}; keeping {canonical_name}"
                ))
                .subject(other)
                .conflicts_with(canonical)
                .emit();
        }
    }
}

fn qualified_name(ctx: &ResolverContext, id: AssignmentId) -> alloc::string::String {
    let module = ctx
        .mib
        .assignment(id)
        .map_or("", |a| ctx.mib.module_name(a.module));
    format!("{module}::{}", ctx.mib.name_of(id))
}

/// Create a node for every prefix of every claimed OID.
///
/// Claims are visited in OID order, so children are appended in arc order.
fn build_tree(ctx: &mut ResolverContext, claims: &Claims) -> Result<(), CapacityError> {
    let mut nodes: BTreeMap<Oid, NodeId> = BTreeMap::new();

    for (oid, claimants) in claims {
        let mut parent: Option<NodeId> = None;
        let mut path = Oid::default();
        for &arc in oid.arcs() {
            path = path.child(arc);
            let id = match nodes.get(&path) {
                Some(&id) => id,
                None => {
                    let id = ctx.mib.add_node(arc, parent)?;
                    match parent {
                        Some(p) => {
                            if let Some(node) = ctx.mib.node_mut(p) {
                                node.children.push(id);
                            }
                        }
                        None => ctx.mib.add_root(id),
                    }
                    ctx.mib.register_oid(path.clone(), id);
                    nodes.insert(path.clone(), id);
                    id
                }
            };
            parent = Some(id);
        }

        if let Some(node) = parent.and_then(|p| ctx.mib.node_mut(p)) {
            node.definition = claimants.first().copied();
            node.shadowed = claimants.iter().skip(1).copied().collect();
        }
    }
    Ok(())
}
