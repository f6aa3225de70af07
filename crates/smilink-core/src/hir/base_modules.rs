//! Synthetic SMI base modules.
//!
//! Corpora almost always import from `SNMPv2-SMI`, `SNMPv2-TC` and friends
//! without shipping them. When such a module is missing, the pipeline can
//! generate a stand-in [`HirModule`] that is registered and resolved like any
//! other module.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::span::Span;

use super::{
    HirConstraint, HirDefinition, HirModule, HirOidAssignment, HirOidComponent, HirRange,
    HirRangeValue, HirStatus, HirTypeDef, HirTypeSyntax, HirValueAssignment, Symbol,
};

/// ASN.1 root arcs. They resolve in every module without an import.
pub const INTRINSIC_ROOTS: [(&str, u32); 3] = [("ccitt", 0), ("iso", 1), ("joint-iso-ccitt", 2)];

/// Arc number of an intrinsic root, if `name` is one.
#[must_use]
pub fn intrinsic_root(name: &str) -> Option<u32> {
    INTRINSIC_ROOTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, arc)| *arc)
}

/// SMI base modules that can be synthesized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseModule {
    /// SNMPv2-SMI (RFC 2578).
    SnmpV2Smi,
    /// SNMPv2-TC (RFC 2579).
    SnmpV2Tc,
    /// SNMPv2-CONF (RFC 2580), MACROs only.
    SnmpV2Conf,
    /// RFC1155-SMI, the `SMIv1` base.
    Rfc1155Smi,
    /// RFC-1212, OBJECT-TYPE MACRO only.
    Rfc1212,
    /// RFC-1215, TRAP-TYPE MACRO only.
    Rfc1215,
}

impl BaseModule {
    /// Get the canonical module name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SnmpV2Smi => "SNMPv2-SMI",
            Self::SnmpV2Tc => "SNMPv2-TC",
            Self::SnmpV2Conf => "SNMPv2-CONF",
            Self::Rfc1155Smi => "RFC1155-SMI",
            Self::Rfc1212 => "RFC-1212",
            Self::Rfc1215 => "RFC-1215",
        }
    }

    /// Look up a base module by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|m| m.name() == name)
    }

    /// Iterate over all base modules.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::SnmpV2Smi,
            Self::SnmpV2Tc,
            Self::SnmpV2Conf,
            Self::Rfc1155Smi,
            Self::Rfc1212,
            Self::Rfc1215,
        ]
        .into_iter()
    }

    /// Build the synthetic module.
    #[must_use]
    pub fn synthesize(self) -> HirModule {
        let mut module = HirModule::new(self.name(), Span::SYNTHETIC);
        match self {
            Self::SnmpV2Smi => {
                module.definitions.extend(oid_values(SNMPV2_SMI_NODES));
                module.definitions.push(oid_value("zeroDotZero", vec![
                    HirOidComponent::Number(0),
                    HirOidComponent::Number(0),
                ]));
                module.definitions.extend(application_types(&[
                    "Integer32",
                    "Counter32",
                    "Gauge32",
                    "Unsigned32",
                    "TimeTicks",
                    "Counter64",
                    "IpAddress",
                    "Opaque",
                ]));
            }
            Self::Rfc1155Smi => {
                // internet ::= { iso org(3) dod(6) 1 }
                module.definitions.push(oid_value("internet", vec![
                    HirOidComponent::Name(Symbol::from_name("iso")),
                    HirOidComponent::NamedNumber {
                        name: Symbol::from_name("org"),
                        number: 3,
                    },
                    HirOidComponent::NamedNumber {
                        name: Symbol::from_name("dod"),
                        number: 6,
                    },
                    HirOidComponent::Number(1),
                ]));
                module.definitions.extend(oid_values(RFC1155_SMI_NODES));
                module.definitions.extend(application_types(&[
                    "Counter",
                    "Gauge",
                    "TimeTicks",
                    "IpAddress",
                    "NetworkAddress",
                    "Opaque",
                ]));
            }
            Self::SnmpV2Tc => {
                module = module.with_import("SNMPv2-SMI", "TimeTicks");
                module.definitions.extend(textual_conventions());
            }
            Self::SnmpV2Conf | Self::Rfc1212 | Self::Rfc1215 => {}
        }
        module
    }
}

/// Check if a module name is a recognized base module.
#[must_use]
pub fn is_base_module(name: &str) -> bool {
    BaseModule::from_name(name).is_some()
}

// === OID nodes ===

/// `(name, parent, arc)`.
type NodeRow = (&'static str, &'static str, u32);

const SNMPV2_SMI_NODES: &[NodeRow] = &[
    ("org", "iso", 3),
    ("dod", "org", 6),
    ("internet", "dod", 1),
    ("directory", "internet", 1),
    ("mgmt", "internet", 2),
    ("mib-2", "mgmt", 1),
    ("transmission", "mib-2", 10),
    ("experimental", "internet", 3),
    ("private", "internet", 4),
    ("enterprises", "private", 1),
    ("security", "internet", 5),
    ("snmpV2", "internet", 6),
    ("snmpDomains", "snmpV2", 1),
    ("snmpProxys", "snmpV2", 2),
    ("snmpModules", "snmpV2", 3),
];

const RFC1155_SMI_NODES: &[NodeRow] = &[
    ("directory", "internet", 1),
    ("mgmt", "internet", 2),
    ("experimental", "internet", 3),
    ("private", "internet", 4),
    ("enterprises", "private", 1),
];

fn oid_values(rows: &[NodeRow]) -> Vec<HirDefinition> {
    rows.iter()
        .map(|&(name, parent, arc)| {
            oid_value(name, vec![
                HirOidComponent::Name(Symbol::from_name(parent)),
                HirOidComponent::Number(arc),
            ])
        })
        .collect()
}

fn oid_value(name: &str, components: Vec<HirOidComponent>) -> HirDefinition {
    HirDefinition::ValueAssignment(HirValueAssignment::new(
        name,
        HirOidAssignment::new(components, Span::SYNTHETIC),
        Span::SYNTHETIC,
    ))
}

// === Types ===

fn int_range(min: i64, max: u64) -> HirTypeSyntax {
    HirTypeSyntax::Constrained {
        base: Box::new(HirTypeSyntax::Integer),
        constraint: HirConstraint::Range(vec![HirRange {
            min: HirRangeValue::Signed(min),
            max: Some(HirRangeValue::Unsigned(max)),
        }]),
    }
}

fn octet_size(ranges: Vec<HirRange>) -> HirTypeSyntax {
    HirTypeSyntax::Constrained {
        base: Box::new(HirTypeSyntax::OctetString),
        constraint: HirConstraint::Size(ranges),
    }
}

fn fixed(size: u64) -> HirRange {
    HirRange {
        min: HirRangeValue::Unsigned(size),
        max: None,
    }
}

fn application_type(name: &str) -> HirTypeSyntax {
    let u32_max = u64::from(u32::MAX);
    match name {
        "Integer32" => int_range(i64::from(i32::MIN), u64::from(i32::MAX.unsigned_abs())),
        "Counter64" => int_range(0, u64::MAX),
        "IpAddress" | "NetworkAddress" => octet_size(vec![fixed(4)]),
        "Opaque" => HirTypeSyntax::OctetString,
        _ => int_range(0, u32_max),
    }
}

fn application_types(names: &[&str]) -> Vec<HirDefinition> {
    names
        .iter()
        .map(|name| {
            HirDefinition::TypeDef(HirTypeDef::new(
                *name,
                application_type(name),
                Span::SYNTHETIC,
            ))
        })
        .collect()
}

fn tc(name: &str, display_hint: Option<&str>, syntax: HirTypeSyntax) -> HirDefinition {
    HirDefinition::TypeDef(
        HirTypeDef::new(name, syntax, Span::SYNTHETIC).textual_convention(display_hint),
    )
}

fn enumeration(items: &[(&str, i64)]) -> HirTypeSyntax {
    HirTypeSyntax::IntegerEnum(
        items
            .iter()
            .map(|(n, v)| (Symbol::from_name(n), *v))
            .collect(),
    )
}

fn textual_conventions() -> Vec<HirDefinition> {
    let positive = || int_range(0, u64::from(i32::MAX.unsigned_abs()));
    vec![
        tc(
            "DisplayString",
            Some("255a"),
            octet_size(vec![HirRange::range_unsigned(0, 255)]),
        ),
        tc("PhysAddress", Some("1x:"), HirTypeSyntax::OctetString),
        tc("MacAddress", Some("1x:"), octet_size(vec![fixed(6)])),
        tc("TruthValue", None, enumeration(&[("true", 1), ("false", 2)])),
        tc("TestAndIncr", None, positive()),
        tc("AutonomousType", None, HirTypeSyntax::ObjectIdentifier),
        tc("VariablePointer", None, HirTypeSyntax::ObjectIdentifier),
        tc("RowPointer", None, HirTypeSyntax::ObjectIdentifier),
        tc(
            "RowStatus",
            None,
            enumeration(&[
                ("active", 1),
                ("notInService", 2),
                ("notReady", 3),
                ("createAndGo", 4),
                ("createAndWait", 5),
                ("destroy", 6),
            ]),
        ),
        tc("TimeStamp", None, HirTypeSyntax::reference("TimeTicks")),
        tc("TimeInterval", None, positive()),
        tc(
            "DateAndTime",
            Some("2d-1d-1d,1d:1d:1d.1d,1a1d:1d"),
            octet_size(vec![fixed(8), fixed(11)]),
        ),
        tc(
            "StorageType",
            None,
            enumeration(&[
                ("other", 1),
                ("volatile", 2),
                ("nonVolatile", 3),
                ("permanent", 4),
                ("readOnly", 5),
            ]),
        ),
        tc("TDomain", None, HirTypeSyntax::ObjectIdentifier),
        tc(
            "TAddress",
            None,
            octet_size(vec![HirRange::range_unsigned(1, 255)]),
        ),
        {
            let mut d = HirTypeDef::new(
                "InstancePointer",
                HirTypeSyntax::ObjectIdentifier,
                Span::SYNTHETIC,
            )
            .textual_convention(None);
            d.status = HirStatus::Obsolete;
            HirDefinition::TypeDef(d)
        },
    ]
}
