use core::fmt;

/// How bad a problem is. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Info,
    Warning,
    #[default]
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        })
    }
}

/// Problem kinds, grouped by the stage that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProblemKind {
    // Parsing and registration
    ParseFailure,
    DuplicateModule,
    DuplicateDefinition,

    // Linking
    MissingImportSource,
    UnresolvedImport,
    DuplicateImport,
    AmbiguousImport,

    // Types
    UnresolvedType,
    CircularTypeReference,
    RangeConstraintViolation,

    // OIDs
    UnresolvedOidParent,
    InvalidOidComponent,
    CircularOidReference,
    MultipleValueConflict,
}

impl ProblemKind {
    /// Default severity for this kind. Call sites may override it.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::ParseFailure | Self::CircularOidReference => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Message used when the call site does not provide one.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::ParseFailure => "file could not be parsed",
            Self::DuplicateModule => "module is defined more than once",
            Self::DuplicateDefinition => "name is already defined in this module",
            Self::MissingImportSource => "imported module not found",
            Self::UnresolvedImport => "imported symbol is not defined in its source module",
            Self::DuplicateImport => "symbol is imported more than once",
            Self::AmbiguousImport => "symbol is imported from more than one module",
            Self::UnresolvedType => "type reference cannot be resolved",
            Self::CircularTypeReference => "type refers to itself",
            Self::RangeConstraintViolation => "lower bound exceeds upper bound",
            Self::UnresolvedOidParent => "OID parent cannot be resolved",
            Self::InvalidOidComponent => "OID component must be a number",
            Self::CircularOidReference => "OID definition refers to itself",
            Self::MultipleValueConflict => "more than one definition for the same OID",
        }
    }

    /// Kebab-case code used in rendered output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ParseFailure => "parse-failure",
            Self::DuplicateModule => "duplicate-module",
            Self::DuplicateDefinition => "duplicate-definition",
            Self::MissingImportSource => "missing-import-source",
            Self::UnresolvedImport => "unresolved-import",
            Self::DuplicateImport => "duplicate-import",
            Self::AmbiguousImport => "ambiguous-import",
            Self::UnresolvedType => "unresolved-type",
            Self::CircularTypeReference => "circular-type-reference",
            Self::RangeConstraintViolation => "range-constraint-violation",
            Self::UnresolvedOidParent => "unresolved-oid-parent",
            Self::InvalidOidComponent => "invalid-oid-component",
            Self::CircularOidReference => "circular-oid-reference",
            Self::MultipleValueConflict => "multiple-value-conflict",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
