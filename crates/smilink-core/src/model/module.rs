//! Modules and source files of the resolved model.

use super::ids::{AssignmentId, FileId, ModuleId, StrId, TypeId};
use crate::span::Span;
use alloc::vec::Vec;

/// A source file that contributed modules or a parse failure.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceFile {
    /// File identifier.
    pub id: FileId,
    /// Path as supplied.
    pub path: StrId,
}

/// One imported symbol after linking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleImport {
    /// Imported symbol.
    pub symbol: StrId,
    /// Name of the source module as written.
    pub source_name: StrId,
    /// Source module, when it exists in the model.
    pub source: Option<ModuleId>,
    /// Source span of the import.
    pub span: Span,
}

/// A registered module.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedModule {
    /// Module identifier.
    pub id: ModuleId,
    /// Module name.
    pub name: StrId,
    /// Defining file; `None` for synthetic base modules.
    pub file: Option<FileId>,
    /// Linked imports in declaration order (MACRO imports omitted).
    pub imports: Vec<ModuleImport>,
    /// Assignments in declaration order, rejected duplicates omitted.
    pub assignments: Vec<AssignmentId>,
    /// Type nodes owned by this module.
    pub types: Vec<TypeId>,
    /// Generated rather than read from a file.
    pub synthetic: bool,
    /// Source span of the module definition.
    pub span: Span,
}

impl ResolvedModule {
    /// Look up the import binding for `symbol`, if any.
    pub fn imports_of(&self, symbol: StrId) -> impl Iterator<Item = &ModuleImport> {
        self.imports.iter().filter(move |i| i.symbol == symbol)
    }
}
