//! Resolution context (indices and working state during resolution).

use crate::hir::{HirDefinition, HirModule};
use crate::model::{AssignmentId, FileId, Mib, ModuleId};
use crate::problem::Location;
use crate::resolver::config::ResolverConfig;
use crate::resolver::symbols::SymbolTable;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// A registered module together with the parse tree it came from.
#[derive(Clone, Debug)]
pub struct ModuleSource {
    /// Registered module.
    pub id: ModuleId,
    /// Defining file; `None` for synthetic modules.
    pub file: Option<FileId>,
    /// The parse tree.
    pub hir: HirModule,
}

/// Resolution context holding the model being built and lookup indices.
pub struct ResolverContext {
    /// The model being built.
    pub mib: Mib,
    /// Module and symbol namespaces.
    pub symbols: SymbolTable,
    /// Registered modules in processing order.
    pub sources: Vec<ModuleSource>,
    /// Assignment -> (index in `sources`, index in its definitions).
    pub origins: BTreeMap<AssignmentId, (usize, usize)>,
    /// Run configuration.
    pub config: ResolverConfig,
}

impl ResolverContext {
    /// Create a new resolver context.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            mib: Mib::new(),
            symbols: SymbolTable::new(),
            sources: Vec::new(),
            origins: BTreeMap::new(),
            config,
        }
    }

    /// The parse-tree definition behind an assignment.
    #[must_use]
    pub fn definition(&self, id: AssignmentId) -> Option<&HirDefinition> {
        let &(source, def) = self.origins.get(&id)?;
        self.sources.get(source)?.hir.definitions.get(def)
    }

    /// The file a module was read from.
    #[must_use]
    pub fn file_of(&self, module: ModuleId) -> Option<FileId> {
        self.mib.module(module).and_then(|m| m.file)
    }

    /// Problem location of an assignment.
    #[must_use]
    pub fn location_of(&self, id: AssignmentId) -> Location {
        match self.mib.assignment(id) {
            Some(a) => Location::module(self.file_of(a.module), a.module, a.span),
            None => Location::default(),
        }
    }

    /// Assignments in registration order, paired with their definitions.
    pub fn definitions(&self) -> impl Iterator<Item = (AssignmentId, ModuleId, &HirDefinition)> {
        self.origins.iter().filter_map(|(&id, &(source, def))| {
            let src = self.sources.get(source)?;
            Some((id, src.id, src.hir.definitions.get(def)?))
        })
    }
}
