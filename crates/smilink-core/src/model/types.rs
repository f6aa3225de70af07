//! Type nodes of the resolved model.

use super::assignment::ResolutionState;
use super::ids::{ModuleId, StrId, TypeId};
use alloc::vec::Vec;
use core::fmt;

/// ASN.1 primitive types. Everything else is built on these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuiltinType {
    /// INTEGER.
    Integer,
    /// OCTET STRING.
    OctetString,
    /// OBJECT IDENTIFIER.
    ObjectIdentifier,
    /// BITS.
    Bits,
}

impl BuiltinType {
    /// The ASN.1 spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::OctetString => "OCTET STRING",
            Self::ObjectIdentifier => "OBJECT IDENTIFIER",
            Self::Bits => "BITS",
        }
    }
}

/// Status of a definition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Currently in use.
    #[default]
    Current,
    /// Being phased out.
    Deprecated,
    /// No longer in use.
    Obsolete,
}

impl From<crate::hir::HirStatus> for Status {
    fn from(status: crate::hir::HirStatus) -> Self {
        use crate::hir::HirStatus;
        match status {
            HirStatus::Current => Self::Current,
            HirStatus::Deprecated => Self::Deprecated,
            HirStatus::Obsolete => Self::Obsolete,
        }
    }
}

/// MAX-ACCESS of an OBJECT-TYPE.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Access {
    /// `read-only`.
    ReadOnly,
    /// `read-write`.
    ReadWrite,
    /// `read-create`.
    ReadCreate,
    /// `not-accessible`.
    NotAccessible,
    /// `accessible-for-notify`.
    AccessibleForNotify,
    /// `write-only`.
    WriteOnly,
}

impl From<crate::hir::HirAccess> for Access {
    fn from(access: crate::hir::HirAccess) -> Self {
        use crate::hir::HirAccess;
        match access {
            HirAccess::ReadOnly => Self::ReadOnly,
            HirAccess::ReadWrite => Self::ReadWrite,
            HirAccess::ReadCreate => Self::ReadCreate,
            HirAccess::NotAccessible => Self::NotAccessible,
            HirAccess::AccessibleForNotify => Self::AccessibleForNotify,
            HirAccess::WriteOnly => Self::WriteOnly,
        }
    }
}

/// One end of a constraint range.
///
/// `Min < Value(_) < Max`, so ranges compare without knowing the base type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeBound {
    /// MIN keyword.
    Min,
    /// Literal value, wide enough for Counter64 bounds.
    Value(i128),
    /// MAX keyword.
    Max,
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => f.write_str("MIN"),
            Self::Value(v) => write!(f, "{v}"),
            Self::Max => f.write_str("MAX"),
        }
    }
}

/// An inclusive range; single values have `min == max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintRange {
    /// Lower bound.
    pub min: RangeBound,
    /// Upper bound.
    pub max: RangeBound,
}

impl ConstraintRange {
    /// Check that the lower bound does not exceed the upper bound.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

impl fmt::Display for ConstraintRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..{}", self.min, self.max)
        }
    }
}

/// Subtype constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// `(SIZE (...))`.
    Size(Vec<ConstraintRange>),
    /// `(lo..hi | ...)`.
    Value(Vec<ConstraintRange>),
}

impl Constraint {
    /// The ranges, whichever kind this is.
    #[must_use]
    pub fn ranges(&self) -> &[ConstraintRange] {
        match self {
            Self::Size(r) | Self::Value(r) => r,
        }
    }
}

/// A named number in an enumeration or BITS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedValue {
    /// Label.
    pub name: StrId,
    /// Number.
    pub value: i64,
}

/// A field of a SEQUENCE or alternative of a CHOICE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Field name.
    pub name: StrId,
    /// Field type.
    pub ty: TypeId,
}

/// Shape of a type node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    /// ASN.1 primitive.
    Builtin(BuiltinType),
    /// Named reference to another type assignment.
    Reference {
        /// Referenced name.
        symbol: StrId,
        /// Module named by a qualified reference.
        qualifier: Option<StrId>,
        /// Resolved target, once known.
        target: Option<TypeId>,
        /// Module the target was found in, when it came through an import.
        imported_from: Option<ModuleId>,
    },
    /// `INTEGER { a(1), b(2) }` or `BITS { ... }` over `base`.
    Enumeration {
        /// The builtin node (INTEGER or BITS).
        base: TypeId,
        /// Named numbers in declaration order.
        items: Vec<NamedValue>,
    },
    /// `SEQUENCE { ... }`.
    Sequence(Vec<Field>),
    /// `SEQUENCE OF elem`.
    SequenceOf(TypeId),
    /// `CHOICE { ... }`.
    Choice(Vec<Field>),
    /// TEXTUAL-CONVENTION wrapping its SYNTAX.
    TextualConvention {
        /// The SYNTAX node.
        base: TypeId,
        /// DISPLAY-HINT.
        display_hint: Option<StrId>,
        /// STATUS.
        status: Status,
    },
}

impl TypeKind {
    /// Check if this node is still waiting for its target.
    #[must_use]
    pub fn is_pending_reference(&self) -> bool {
        matches!(self, Self::Reference { target: None, .. })
    }
}

/// A type node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedType {
    /// Type identifier.
    pub id: TypeId,
    /// Name, for nodes that are the body of a type assignment.
    pub name: Option<StrId>,
    /// Owning module.
    pub module: ModuleId,
    /// Shape.
    pub kind: TypeKind,
    /// Constraint applied at this node.
    pub constraint: Option<Constraint>,
    /// Resolution state.
    pub state: ResolutionState,
}

impl ResolvedType {
    /// The type this node directly refines, if any.
    #[must_use]
    pub fn parent_type(&self) -> Option<TypeId> {
        match &self.kind {
            TypeKind::Reference { target, .. } => *target,
            TypeKind::TextualConvention { base, .. } | TypeKind::Enumeration { base, .. } => {
                Some(*base)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_order() {
        assert!(RangeBound::Min < RangeBound::Value(i128::from(i64::MIN)));
        assert!(RangeBound::Value(u64::MAX.into()) < RangeBound::Max);
        let r = ConstraintRange {
            min: RangeBound::Value(10),
            max: RangeBound::Value(1),
        };
        assert!(!r.is_ordered());
    }

    #[test]
    fn range_display() {
        let single = ConstraintRange {
            min: RangeBound::Value(4),
            max: RangeBound::Value(4),
        };
        let open = ConstraintRange {
            min: RangeBound::Value(0),
            max: RangeBound::Max,
        };
        assert_eq!(single.to_string(), "4");
        assert_eq!(open.to_string(), "0..MAX");
    }
}
