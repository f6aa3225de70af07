//! Named assignments and their resolution state.

use super::ids::{AssignmentId, ModuleId, StrId, TypeId};
use super::oid::Oid;
use super::types::{Access, Status};
use crate::span::Span;
use core::fmt;

/// What a definition declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignmentKind {
    /// Plain type assignment.
    Type,
    /// TEXTUAL-CONVENTION.
    TextualConvention,
    /// `x OBJECT IDENTIFIER ::= { ... }`.
    Value,
    /// OBJECT-TYPE.
    ObjectType,
    /// OBJECT-IDENTITY.
    ObjectIdentity,
    /// MODULE-IDENTITY.
    ModuleIdentity,
    /// NOTIFICATION-TYPE or TRAP-TYPE.
    Notification,
}

impl AssignmentKind {
    /// Check if this assignment names a type.
    #[must_use]
    pub fn is_type(self) -> bool {
        matches!(self, Self::Type | Self::TextualConvention)
    }

    /// Check if this assignment carries an OID value.
    #[must_use]
    pub fn has_oid(self) -> bool {
        !self.is_type()
    }
}

/// Resolution state of an assignment or type node.
///
/// Transitions are monotone: `Pending` moves to exactly one of the other
/// states and `Resolved` can only be downgraded to `Partial`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolutionState {
    /// Not yet decided.
    #[default]
    Pending,
    /// Fully resolved.
    Resolved,
    /// Registered, but some part depends on something broken.
    Partial,
    /// Could not be resolved.
    Unresolved,
    /// Removed from the OID tree (cycle member or rejected duplicate).
    Excluded,
}

impl ResolutionState {
    /// Check if the state is final.
    #[must_use]
    pub fn is_settled(self) -> bool {
        self != Self::Pending
    }

    /// Combine with the state of something this depends on.
    #[must_use]
    pub fn degrade_by(self, dependency: Self) -> Self {
        match (self, dependency) {
            (Self::Resolved, Self::Resolved) => Self::Resolved,
            (Self::Resolved, Self::Partial | Self::Unresolved | Self::Excluded) => Self::Partial,
            (state, _) => state,
        }
    }
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Partial => "partial",
            Self::Unresolved => "unresolved",
            Self::Excluded => "excluded",
        })
    }
}

/// A named definition in a module.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// Assignment identifier.
    pub id: AssignmentId,
    /// Defining module.
    pub module: ModuleId,
    /// Assignment name.
    pub name: StrId,
    /// What it declares.
    pub kind: AssignmentKind,
    /// Source span.
    pub span: Span,
    /// Type node: the defined type, or the SYNTAX of an OBJECT-TYPE.
    pub ty: Option<TypeId>,
    /// Resolved OID.
    pub oid: Option<Oid>,
    /// Resolution state.
    pub state: ResolutionState,
    /// STATUS clause, `Current` when the definition has none.
    pub status: Status,
    /// MAX-ACCESS, for OBJECT-TYPEs only.
    pub access: Option<Access>,
}
