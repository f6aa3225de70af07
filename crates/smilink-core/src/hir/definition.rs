//! Definition types.
//!
//! SMIv1 and SMIv2 forms are unified: TRAP-TYPE arrives as a notification,
//! ACCESS as MAX-ACCESS, `mandatory` as `current`.

use super::syntax::{HirOidAssignment, HirTypeSyntax};
use super::types::{HirAccess, HirStatus, Symbol};
use crate::span::Span;
use alloc::string::String;

/// A definition in a MIB module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HirDefinition {
    /// TEXTUAL-CONVENTION or simple type assignment.
    TypeDef(HirTypeDef),
    /// Value assignment (OID definition).
    ValueAssignment(HirValueAssignment),
    /// OBJECT-TYPE (both SMIv1 and SMIv2).
    ObjectType(HirObjectType),
    /// OBJECT-IDENTITY.
    ObjectIdentity(HirObjectIdentity),
    /// MODULE-IDENTITY.
    ModuleIdentity(HirModuleIdentity),
    /// NOTIFICATION-TYPE or TRAP-TYPE.
    Notification(HirNotification),
}

impl HirDefinition {
    /// Get the name of this definition.
    #[must_use]
    pub fn name(&self) -> &Symbol {
        match self {
            Self::TypeDef(d) => &d.name,
            Self::ValueAssignment(d) => &d.name,
            Self::ObjectType(d) => &d.name,
            Self::ObjectIdentity(d) => &d.name,
            Self::ModuleIdentity(d) => &d.name,
            Self::Notification(d) => &d.name,
        }
    }

    /// Get the span of this definition.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::TypeDef(d) => d.span,
            Self::ValueAssignment(d) => d.span,
            Self::ObjectType(d) => d.span,
            Self::ObjectIdentity(d) => d.span,
            Self::ModuleIdentity(d) => d.span,
            Self::Notification(d) => d.span,
        }
    }

    /// Get the OID assignment if this definition has one.
    #[must_use]
    pub fn oid(&self) -> Option<&HirOidAssignment> {
        match self {
            Self::TypeDef(_) => None,
            Self::ValueAssignment(d) => Some(&d.oid),
            Self::ObjectType(d) => Some(&d.oid),
            Self::ObjectIdentity(d) => Some(&d.oid),
            Self::ModuleIdentity(d) => Some(&d.oid),
            Self::Notification(d) => Some(&d.oid),
        }
    }

    /// Get the STATUS clause; definitions without one are current.
    #[must_use]
    pub fn status(&self) -> HirStatus {
        match self {
            Self::TypeDef(d) => d.status,
            Self::ObjectType(d) => d.status,
            Self::ObjectIdentity(d) => d.status,
            Self::Notification(d) => d.status,
            Self::ValueAssignment(_) | Self::ModuleIdentity(_) => HirStatus::Current,
        }
    }

    /// Get the MAX-ACCESS clause of an OBJECT-TYPE.
    #[must_use]
    pub fn access(&self) -> Option<HirAccess> {
        match self {
            Self::ObjectType(d) => Some(d.access),
            _ => None,
        }
    }

    /// Get the type syntax if this definition carries one.
    #[must_use]
    pub fn syntax(&self) -> Option<&HirTypeSyntax> {
        match self {
            Self::TypeDef(d) => Some(&d.syntax),
            Self::ObjectType(d) => Some(&d.syntax),
            _ => None,
        }
    }
}

/// Type definition.
///
/// Represents both TEXTUAL-CONVENTION and simple type assignments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HirTypeDef {
    /// Type name.
    pub name: Symbol,
    /// Base syntax.
    pub syntax: HirTypeSyntax,
    /// DISPLAY-HINT.
    pub display_hint: Option<String>,
    /// STATUS.
    pub status: HirStatus,
    /// True if this was a TEXTUAL-CONVENTION (vs simple type assignment).
    pub is_textual_convention: bool,
    /// Source span.
    pub span: Span,
}

impl HirTypeDef {
    /// A plain `Name ::= syntax` assignment.
    #[must_use]
    pub fn new(name: impl Into<Symbol>, syntax: HirTypeSyntax, span: Span) -> Self {
        Self {
            name: name.into(),
            syntax,
            display_hint: None,
            status: HirStatus::Current,
            is_textual_convention: false,
            span,
        }
    }

    /// Mark this type as a TEXTUAL-CONVENTION with an optional DISPLAY-HINT.
    #[must_use]
    pub fn textual_convention(mut self, display_hint: Option<&str>) -> Self {
        self.is_textual_convention = true;
        self.display_hint = display_hint.map(String::from);
        self
    }
}

/// Value assignment (`name OBJECT IDENTIFIER ::= { ... }`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HirValueAssignment {
    /// Value name.
    pub name: Symbol,
    /// OID assignment.
    pub oid: HirOidAssignment,
    /// Source span.
    pub span: Span,
}

impl HirValueAssignment {
    /// Create a new value assignment.
    #[must_use]
    pub fn new(name: impl Into<Symbol>, oid: HirOidAssignment, span: Span) -> Self {
        Self {
            name: name.into(),
            oid,
            span,
        }
    }
}

/// OBJECT-TYPE definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HirObjectType {
    /// Object name.
    pub name: Symbol,
    /// SYNTAX.
    pub syntax: HirTypeSyntax,
    /// MAX-ACCESS (normalized from ACCESS if SMIv1).
    pub access: HirAccess,
    /// STATUS.
    pub status: HirStatus,
    /// OID assignment.
    pub oid: HirOidAssignment,
    /// Source span.
    pub span: Span,
}

impl HirObjectType {
    /// Create a read-only current object with no optional clauses.
    #[must_use]
    pub fn new(
        name: impl Into<Symbol>,
        syntax: HirTypeSyntax,
        oid: HirOidAssignment,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            syntax,
            access: HirAccess::ReadOnly,
            status: HirStatus::Current,
            oid,
            span,
        }
    }
}

/// OBJECT-IDENTITY definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HirObjectIdentity {
    /// Identity name.
    pub name: Symbol,
    /// STATUS.
    pub status: HirStatus,
    /// OID assignment.
    pub oid: HirOidAssignment,
    /// Source span.
    pub span: Span,
}

/// MODULE-IDENTITY definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HirModuleIdentity {
    /// Identity name.
    pub name: Symbol,
    /// OID assignment.
    pub oid: HirOidAssignment,
    /// Source span.
    pub span: Span,
}

/// Unified notification definition.
///
/// For SMIv1 TRAP-TYPE the parser supplies the derived OID
/// (`enterprise 0 trap-number`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HirNotification {
    /// Notification name.
    pub name: Symbol,
    /// STATUS.
    pub status: HirStatus,
    /// OID assignment.
    pub oid: HirOidAssignment,
    /// Source span.
    pub span: Span,
}
