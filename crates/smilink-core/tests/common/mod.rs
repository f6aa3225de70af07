//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use smilink_core::hir::{
    HirConstraint, HirModule, HirObjectType, HirOidAssignment, HirOidComponent, HirRange,
    HirTypeDef, HirTypeSyntax, HirValueAssignment, Symbol,
};
use smilink_core::model::{Mib, ResolutionState};
use smilink_core::{ParsedFile, Span};
use std::collections::BTreeSet;
use std::fmt::Write;

pub fn oid(components: &[&str]) -> HirOidAssignment {
    let components = components
        .iter()
        .map(|c| match c.parse::<u32>() {
            Ok(n) => HirOidComponent::Number(n),
            Err(_) => HirOidComponent::Name(Symbol::from_name(c)),
        })
        .collect();
    HirOidAssignment::new(components, Span::SYNTHETIC)
}

/// `name OBJECT IDENTIFIER ::= { components }`.
pub fn value(name: &str, components: &[&str]) -> HirValueAssignment {
    HirValueAssignment::new(name, oid(components), Span::SYNTHETIC)
}

pub fn object(name: &str, syntax: HirTypeSyntax, components: &[&str]) -> HirObjectType {
    HirObjectType::new(name, syntax, oid(components), Span::SYNTHETIC)
}

pub fn typedef(name: &str, syntax: HirTypeSyntax) -> HirTypeDef {
    HirTypeDef::new(name, syntax, Span::SYNTHETIC)
}

pub fn module(name: &str) -> HirModule {
    HirModule::new(name, Span::SYNTHETIC)
}

pub fn file(path: &str, modules: Vec<HirModule>) -> ParsedFile {
    ParsedFile::ok(path, modules)
}

/// A small IF-MIB lookalike plus a module extending it.
pub fn interfaces_corpus() -> Vec<ParsedFile> {
    let index_syntax = HirTypeSyntax::Constrained {
        base: Box::new(HirTypeSyntax::reference("Integer32")),
        constraint: HirConstraint::Range(vec![HirRange::range_signed(1, 2_147_483_647)]),
    };
    let entry_syntax = HirTypeSyntax::Sequence(vec![
        ("ifIndex".into(), HirTypeSyntax::reference("InterfaceIndex")),
        ("ifDescr".into(), HirTypeSyntax::reference("DisplayString")),
    ]);

    let if_mib = module("IF-MIB")
        .with_import("SNMPv2-SMI", "mib-2")
        .with_import("SNMPv2-SMI", "Integer32")
        .with_import("SNMPv2-SMI", "OBJECT-TYPE")
        .with_import("SNMPv2-TC", "DisplayString")
        .with_import("SNMPv2-TC", "TEXTUAL-CONVENTION")
        .with_definition(typedef("InterfaceIndex", index_syntax).textual_convention(Some("d")))
        .with_definition(value("interfaces", &["mib-2", "2"]))
        .with_definition(object(
            "ifTable",
            HirTypeSyntax::SequenceOf(Box::new(HirTypeSyntax::reference("IfEntry"))),
            &["interfaces", "2"],
        ))
        .with_definition(object("ifEntry", HirTypeSyntax::reference("IfEntry"), &["ifTable", "1"]))
        .with_definition(typedef("IfEntry", entry_syntax))
        .with_definition(object(
            "ifIndex",
            HirTypeSyntax::reference("InterfaceIndex"),
            &["ifEntry", "1"],
        ))
        .with_definition(object(
            "ifDescr",
            HirTypeSyntax::reference("DisplayString"),
            &["ifEntry", "2"],
        ));

    let ext_mib = module("EXT-MIB")
        .with_import("IF-MIB", "ifIndex")
        .with_import("IF-MIB", "InterfaceIndex")
        .with_definition(object(
            "extIndex",
            HirTypeSyntax::reference("InterfaceIndex"),
            &["ifIndex", "5"],
        ))
        // ifEntry is not imported
        .with_definition(value("extBroken", &["ifEntry", "99"]));

    vec![file("if.mib", vec![if_mib]), file("ext.mib", vec![ext_mib])]
}

/// Everything about the result that does not depend on arena ids.
pub fn summary(mib: &Mib) -> BTreeSet<(String, String, Option<String>, ResolutionState)> {
    mib.assignments()
        .map(|a| {
            (
                mib.module_name(a.module).to_owned(),
                mib.name_of(a.id).to_owned(),
                a.oid.as_ref().map(ToString::to_string),
                a.state,
            )
        })
        .collect()
}

pub fn problem_lines(mib: &Mib) -> Vec<String> {
    let mut lines: Vec<String> = mib.problems().iter().map(ToString::to_string).collect();
    lines.sort();
    lines
}

/// One line per tree node: OID, canonical definition, shadowed definitions.
pub fn dump_tree(mib: &Mib) -> String {
    let qualified = |id| {
        let a = mib.assignment(id).expect("assignment");
        format!("{}::{}", mib.module_name(a.module), mib.name_of(id))
    };
    let mut out = String::new();
    for root in mib.roots() {
        mib.walk(root.id, &mut |node| {
            let definition = node.definition.map_or_else(|| "-".to_owned(), qualified);
            write!(out, "{} {definition}", mib.oid_of(node)).unwrap();
            for shadowed in &node.shadowed {
                write!(out, " (shadows {})", qualified(*shadowed)).unwrap();
            }
            out.push('\n');
            true
        });
    }
    out
}

/// No assignment is left pending and every failure is explained.
pub fn assert_settled(mib: &Mib) {
    for a in mib.assignments() {
        let name = mib.name_of(a.id);
        assert_ne!(a.state, ResolutionState::Pending, "{name} left pending");
        if matches!(a.state, ResolutionState::Unresolved | ResolutionState::Excluded) {
            assert!(
                mib.problems().about(a.id).next().is_some(),
                "{name} is {} without a problem",
                a.state
            );
        }
    }
}
