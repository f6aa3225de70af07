//! Module and import types.

use super::definition::HirDefinition;
use super::types::Symbol;
use crate::span::Span;
use alloc::vec::Vec;

/// A MIB module as delivered by the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HirModule {
    /// Module name.
    pub name: Symbol,
    /// Imports, flattened to one entry per symbol.
    pub imports: Vec<HirImport>,
    /// Definitions in declaration order.
    pub definitions: Vec<HirDefinition>,
    /// Source span for diagnostics.
    pub span: Span,
}

impl HirModule {
    /// Create an empty module.
    #[must_use]
    pub fn new(name: impl Into<Symbol>, span: Span) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            definitions: Vec::new(),
            span,
        }
    }

    /// Append an import of `symbol` from `module`.
    #[must_use]
    pub fn with_import(mut self, module: &str, symbol: &str) -> Self {
        self.imports.push(HirImport::new(
            Symbol::from_name(module),
            Symbol::from_name(symbol),
            Span::SYNTHETIC,
        ));
        self
    }

    /// Append a definition.
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<HirDefinition>) -> Self {
        self.definitions.push(definition.into());
        self
    }

    /// Get all definition names.
    pub fn definition_names(&self) -> impl Iterator<Item = &Symbol> {
        self.definitions.iter().map(HirDefinition::name)
    }

    /// Names of the modules this one imports from, deduplicated, in first-seen order.
    #[must_use]
    pub fn import_sources(&self) -> Vec<&Symbol> {
        let mut sources: Vec<&Symbol> = Vec::new();
        for import in &self.imports {
            if !sources.contains(&&import.module) {
                sources.push(&import.module);
            }
        }
        sources
    }
}

/// A single imported symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HirImport {
    /// Source module name.
    pub module: Symbol,
    /// Imported symbol name.
    pub symbol: Symbol,
    /// Source span.
    pub span: Span,
}

impl HirImport {
    /// Create a new import.
    #[must_use]
    pub fn new(module: Symbol, symbol: Symbol, span: Span) -> Self {
        Self {
            module,
            symbol,
            span,
        }
    }

    /// Check if this import is for a MACRO (no runtime value).
    #[must_use]
    pub fn is_macro_import(&self) -> bool {
        is_macro_name(&self.symbol.name)
    }
}

/// Check if `name` is one of the SMI MACRO names.
#[must_use]
pub fn is_macro_name(name: &str) -> bool {
    matches!(
        name,
        "MODULE-IDENTITY"
            | "OBJECT-IDENTITY"
            | "OBJECT-TYPE"
            | "NOTIFICATION-TYPE"
            | "TEXTUAL-CONVENTION"
            | "OBJECT-GROUP"
            | "NOTIFICATION-GROUP"
            | "MODULE-COMPLIANCE"
            | "AGENT-CAPABILITIES"
            | "TRAP-TYPE"
    )
}

macro_rules! impl_from_definition {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for HirDefinition {
                fn from(d: $ty) -> Self {
                    Self::$variant(d)
                }
            }
        )*
    };
}

impl_from_definition!(
    TypeDef(super::definition::HirTypeDef),
    ValueAssignment(super::definition::HirValueAssignment),
    ObjectType(super::definition::HirObjectType),
    ObjectIdentity(super::definition::HirObjectIdentity),
    ModuleIdentity(super::definition::HirModuleIdentity),
    Notification(super::definition::HirNotification),
);
