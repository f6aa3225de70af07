//! Type syntax and OID expressions as they appear in the parse tree.

use super::types::Symbol;
use crate::span::Span;
use alloc::boxed::Box;
use alloc::vec::Vec;

/// OID assignment (unresolved).
///
/// Keeps OID components as symbols; resolution happens in the resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HirOidAssignment {
    /// OID components.
    pub components: Vec<HirOidComponent>,
    /// Source span for diagnostics.
    pub span: Span,
}

impl HirOidAssignment {
    /// Create a new OID assignment.
    #[must_use]
    pub fn new(components: Vec<HirOidComponent>, span: Span) -> Self {
        Self { components, span }
    }
}

/// A component of an OID assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HirOidComponent {
    /// Just a name reference: `internet`, `ifEntry`
    Name(Symbol),
    /// Just a number: `1`, `31`
    Number(u32),
    /// Name with number: `org(3)`
    NamedNumber {
        /// The name.
        name: Symbol,
        /// The numeric value.
        number: u32,
    },
    /// Module-qualified name: `SNMPv2-SMI.enterprises`
    QualifiedName {
        /// The module the name is defined in.
        module: Symbol,
        /// The name.
        name: Symbol,
    },
}

impl HirOidComponent {
    /// Get the numeric value if this component has one.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        match self {
            Self::Name(_) | Self::QualifiedName { .. } => None,
            Self::Number(n) | Self::NamedNumber { number: n, .. } => Some(*n),
        }
    }

    /// Get the name if this component has one.
    #[must_use]
    pub fn name(&self) -> Option<&Symbol> {
        match self {
            Self::Name(s) | Self::NamedNumber { name: s, .. } | Self::QualifiedName { name: s, .. } => {
                Some(s)
            }
            Self::Number(_) => None,
        }
    }
}

/// Type syntax with symbol references (not resolved).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HirTypeSyntax {
    /// Reference to another type: `Integer32`, `DisplayString`
    TypeRef(Symbol),

    /// Module-qualified reference: `SNMPv2-TC.DisplayString`
    QualifiedTypeRef {
        /// The module the type is defined in.
        module: Symbol,
        /// The type name.
        name: Symbol,
    },

    /// Plain `INTEGER`.
    Integer,

    /// `OCTET STRING`.
    OctetString,

    /// `OBJECT IDENTIFIER`.
    ObjectIdentifier,

    /// INTEGER with enum values: `INTEGER { up(1), down(2) }`
    IntegerEnum(Vec<(Symbol, i64)>),

    /// BITS with named bits: `BITS { flag1(0), flag2(1) }`
    Bits(Vec<(Symbol, u32)>),

    /// Constrained type: `OCTET STRING (SIZE (0..255))`
    Constrained {
        /// Base type.
        base: Box<HirTypeSyntax>,
        /// Constraint.
        constraint: HirConstraint,
    },

    /// `SEQUENCE { field Type, ... }` (row types).
    Sequence(Vec<(Symbol, HirTypeSyntax)>),

    /// `SEQUENCE OF Entry` (table types).
    SequenceOf(Box<HirTypeSyntax>),

    /// `CHOICE { alt Type, ... }`
    Choice(Vec<(Symbol, HirTypeSyntax)>),
}

impl HirTypeSyntax {
    /// Shorthand for a `TypeRef` to `name`.
    #[must_use]
    pub fn reference(name: &str) -> Self {
        Self::TypeRef(Symbol::from_name(name))
    }
}

/// Type constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HirConstraint {
    /// SIZE constraint: `(SIZE (0..255))`
    Size(Vec<HirRange>),
    /// Value range constraint: `(0..65535)`
    Range(Vec<HirRange>),
}

/// A range in a constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HirRange {
    /// Minimum value.
    pub min: HirRangeValue,
    /// Maximum value (None for single value).
    pub max: Option<HirRangeValue>,
}

impl HirRange {
    /// Create a single-value range with a signed value.
    #[must_use]
    pub fn single_signed(value: i64) -> Self {
        Self {
            min: HirRangeValue::Signed(value),
            max: None,
        }
    }

    /// Create a range from min to max with signed values.
    #[must_use]
    pub fn range_signed(min: i64, max: i64) -> Self {
        Self {
            min: HirRangeValue::Signed(min),
            max: Some(HirRangeValue::Signed(max)),
        }
    }

    /// Create a range from min to max with unsigned values.
    #[must_use]
    pub fn range_unsigned(min: u64, max: u64) -> Self {
        Self {
            min: HirRangeValue::Unsigned(min),
            max: Some(HirRangeValue::Unsigned(max)),
        }
    }
}

/// A value in a range constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HirRangeValue {
    /// Signed numeric value (can be negative).
    Signed(i64),
    /// Unsigned numeric value (for Counter64 ranges).
    Unsigned(u64),
    /// MIN keyword.
    Min,
    /// MAX keyword.
    Max,
}
