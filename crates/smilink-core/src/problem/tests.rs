use super::*;
use crate::model::AssignmentId;

fn here() -> Location {
    Location::default()
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Fatal), @"fatal");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn severity_is_ordered() {
    assert!(Severity::Info < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
    assert!(Severity::Error < Severity::Fatal);
}

#[test]
fn report_with_fallback_message() {
    let mut problems = Problems::new();
    problems
        .report(ProblemKind::CircularOidReference, here())
        .emit();

    assert_eq!(problems.len(), 1);
    assert_eq!(problems.worst(), Some(Severity::Fatal));
    insta::assert_snapshot!(
        problems.as_slice()[0].to_string(),
        @"fatal[circular-oid-reference]: OID definition refers to itself"
    );
}

#[test]
fn report_with_overrides() {
    let mut problems = Problems::new();
    let a = AssignmentId::from_raw(1).unwrap();
    let b = AssignmentId::from_raw(2).unwrap();
    let p = problems
        .report(ProblemKind::MultipleValueConflict, here())
        .message("more than one found (internet and internet)")
        .severity(Severity::Warning)
        .subject(b)
        .conflicts_with(a)
        .emit();

    insta::assert_snapshot!(
        p.to_string(),
        @"warning[multiple-value-conflict]: more than one found (internet and internet)"
    );
    assert!(p.concerns(a));
    assert!(p.concerns(b));
    assert!(!problems.has_errors());
    assert_eq!(problems.warning_count(), 1);
}

#[test]
fn counts_and_filters() {
    let mut problems = Problems::new();
    let a = AssignmentId::from_raw(7).unwrap();
    problems.report(ProblemKind::UnresolvedType, here()).subject(a).emit();
    problems.report(ProblemKind::DuplicateImport, here()).severity(Severity::Warning).emit();
    problems.report(ProblemKind::UnresolvedType, here()).emit();

    assert_eq!(problems.error_count(), 2);
    assert_eq!(problems.count(Severity::Warning), 1);
    assert_eq!(problems.of_kind(ProblemKind::UnresolvedType).count(), 2);
    assert_eq!(problems.about(a).count(), 1);
    assert_eq!(problems.worst(), Some(Severity::Error));
}

#[test]
fn empty_has_no_worst() {
    let problems = Problems::new();
    assert!(problems.is_empty());
    assert_eq!(problems.worst(), None);
}
