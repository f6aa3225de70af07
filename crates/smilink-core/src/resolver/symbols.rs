//! Per-module symbol table.
//!
//! Every module has its own namespace. A name defined in one module is never
//! visible in another unless imported, and imports are followed through
//! re-exporting modules the way MIB authors chain them.

use crate::model::{AssignmentId, ModuleId};
use alloc::collections::BTreeMap;
use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

/// A name that was already defined in the module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{rejected} duplicates {existing}")]
pub struct DuplicateDefinition {
    /// The assignment that keeps the name.
    pub existing: AssignmentId,
    /// The assignment that was refused.
    pub rejected: AssignmentId,
}

/// Outcome of a name lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The name resolves to this assignment.
    Found(AssignmentId),
    /// Nothing by that name is visible.
    NotFound,
    /// The name is imported from more than one module.
    Ambiguous(Vec<ModuleId>),
}

impl Lookup {
    /// The assignment, if the lookup succeeded.
    #[must_use]
    pub fn found(&self) -> Option<AssignmentId> {
        match self {
            Self::Found(id) => Some(*id),
            _ => None,
        }
    }
}

/// Symbol table: module names, per-module definitions and import bindings.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    /// Module name -> module.
    modules: BTreeMap<String, ModuleId>,
    /// (module, name) -> local definition.
    definitions: BTreeMap<(ModuleId, String), AssignmentId>,
    /// (module, name) -> import sources in declaration order.
    /// `None` is a placeholder for a source that does not exist.
    imports: BTreeMap<(ModuleId, String), Vec<Option<ModuleId>>>,
}

impl SymbolTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module name.
    ///
    /// # Errors
    ///
    /// Returns the module already registered under `name`.
    pub fn register_module(&mut self, name: &str, id: ModuleId) -> Result<(), ModuleId> {
        match self.modules.get(name) {
            Some(&existing) => Err(existing),
            None => {
                self.modules.insert(String::from(name), id);
                Ok(())
            }
        }
    }

    /// Find a module by name.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<ModuleId> {
        self.modules.get(name).copied()
    }

    /// Define `name` in `module`.
    ///
    /// # Errors
    ///
    /// Fails when the name is already defined there; the first definition stays.
    pub fn define(
        &mut self,
        module: ModuleId,
        name: &str,
        assignment: AssignmentId,
    ) -> Result<(), DuplicateDefinition> {
        let key = (module, String::from(name));
        if let Some(&existing) = self.definitions.get(&key) {
            return Err(DuplicateDefinition {
                existing,
                rejected: assignment,
            });
        }
        self.definitions.insert(key, assignment);
        Ok(())
    }

    /// Look up a definition local to `module`. Imports are not consulted.
    #[must_use]
    pub fn lookup(&self, module: ModuleId, name: &str) -> Option<AssignmentId> {
        self.definitions.get(&(module, String::from(name))).copied()
    }

    /// Bind an imported name. Binding the same source twice is a no-op.
    pub fn bind_import(&mut self, module: ModuleId, name: &str, source: Option<ModuleId>) {
        let sources = self
            .imports
            .entry((module, String::from(name)))
            .or_default();
        if !sources.contains(&source) {
            sources.push(source);
        }
    }

    /// Resolve a name through the imports of `module`.
    ///
    /// With a `hint`, only bindings to that source module are considered.
    /// Re-export chains are followed; a chain that loops ends as `NotFound`.
    #[must_use]
    pub fn lookup_imported(&self, module: ModuleId, name: &str, hint: Option<ModuleId>) -> Lookup {
        let mut visited = BTreeSet::new();
        visited.insert(module);
        self.follow_imports(module, name, hint, &mut visited)
    }

    fn follow_imports(
        &self,
        module: ModuleId,
        name: &str,
        hint: Option<ModuleId>,
        visited: &mut BTreeSet<ModuleId>,
    ) -> Lookup {
        let Some(bindings) = self.imports.get(&(module, String::from(name))) else {
            return Lookup::NotFound;
        };
        let sources: Vec<ModuleId> = bindings
            .iter()
            .flatten()
            .copied()
            .filter(|s| hint.is_none_or(|h| h == *s))
            .collect();

        match sources.as_slice() {
            [] => Lookup::NotFound,
            [source] => {
                if let Some(id) = self.lookup(*source, name) {
                    return Lookup::Found(id);
                }
                if !visited.insert(*source) {
                    return Lookup::NotFound;
                }
                self.follow_imports(*source, name, None, visited)
            }
            _ => Lookup::Ambiguous(sources),
        }
    }

    /// Resolve a name as seen from inside `module`: local definitions first,
    /// then imports.
    #[must_use]
    pub fn resolve(&self, module: ModuleId, name: &str) -> Lookup {
        match self.lookup(module, name) {
            Some(id) => Lookup::Found(id),
            None => self.lookup_imported(module, name, None),
        }
    }

    /// Resolve a `MODULE.name` reference.
    #[must_use]
    pub fn resolve_qualified(&self, module_name: &str, name: &str) -> Lookup {
        match self.module(module_name) {
            Some(module) => self.resolve(module, name),
            None => Lookup::NotFound,
        }
    }

    /// Check if `name` is bound as an import in `module`.
    #[must_use]
    pub fn is_imported(&self, module: ModuleId, name: &str) -> bool {
        self.imports.contains_key(&(module, String::from(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(raw: u32) -> ModuleId {
        ModuleId::from_raw(raw).unwrap()
    }

    fn a(raw: u32) -> AssignmentId {
        AssignmentId::from_raw(raw).unwrap()
    }

    #[test]
    fn duplicate_module_is_rejected() {
        let mut table = SymbolTable::new();
        assert_eq!(table.register_module("IF-MIB", m(1)), Ok(()));
        assert_eq!(table.register_module("IF-MIB", m(2)), Err(m(1)));
        assert_eq!(table.module("IF-MIB"), Some(m(1)));
    }

    #[test]
    fn duplicate_definition_keeps_first() {
        let mut table = SymbolTable::new();
        table.define(m(1), "ifTable", a(1)).unwrap();
        let err = table.define(m(1), "ifTable", a(2)).unwrap_err();
        assert_eq!(err, DuplicateDefinition { existing: a(1), rejected: a(2) });
        assert_eq!(table.lookup(m(1), "ifTable"), Some(a(1)));
    }

    #[test]
    fn names_are_module_local() {
        let mut table = SymbolTable::new();
        table.define(m(1), "x", a(1)).unwrap();
        table.define(m(2), "x", a(2)).unwrap();
        assert_eq!(table.lookup(m(1), "x"), Some(a(1)));
        assert_eq!(table.lookup(m(2), "x"), Some(a(2)));
        assert_eq!(table.lookup(m(3), "x"), None);
    }

    #[test]
    fn local_takes_precedence() {
        let mut table = SymbolTable::new();
        table.define(m(1), "foo", a(1)).unwrap();
        table.define(m(2), "foo", a(2)).unwrap();
        table.bind_import(m(1), "foo", Some(m(2)));
        assert_eq!(table.resolve(m(1), "foo"), Lookup::Found(a(1)));
    }

    #[test]
    fn follows_reexport_chain() {
        // A imports foo from B, B imports foo from C, C defines foo
        let mut table = SymbolTable::new();
        table.define(m(3), "foo", a(1)).unwrap();
        table.bind_import(m(1), "foo", Some(m(2)));
        table.bind_import(m(2), "foo", Some(m(3)));
        assert_eq!(table.resolve(m(1), "foo"), Lookup::Found(a(1)));
    }

    #[test]
    fn import_cycle_terminates() {
        let mut table = SymbolTable::new();
        table.bind_import(m(1), "foo", Some(m(2)));
        table.bind_import(m(2), "foo", Some(m(1)));
        assert_eq!(table.resolve(m(1), "foo"), Lookup::NotFound);
    }

    #[test]
    fn two_sources_are_ambiguous() {
        let mut table = SymbolTable::new();
        table.define(m(2), "foo", a(1)).unwrap();
        table.define(m(3), "foo", a(2)).unwrap();
        table.bind_import(m(1), "foo", Some(m(2)));
        table.bind_import(m(1), "foo", Some(m(3)));
        assert_eq!(
            table.resolve(m(1), "foo"),
            Lookup::Ambiguous(vec![m(2), m(3)])
        );
        assert_eq!(
            table.lookup_imported(m(1), "foo", Some(m(3))),
            Lookup::Found(a(2))
        );
    }

    #[test]
    fn placeholder_never_resolves() {
        let mut table = SymbolTable::new();
        table.bind_import(m(1), "foo", None);
        assert!(table.is_imported(m(1), "foo"));
        assert_eq!(table.resolve(m(1), "foo"), Lookup::NotFound);
    }

    #[test]
    fn qualified() {
        let mut table = SymbolTable::new();
        table.register_module("SNMPv2-SMI", m(1)).unwrap();
        table.define(m(1), "enterprises", a(9)).unwrap();
        assert_eq!(
            table.resolve_qualified("SNMPv2-SMI", "enterprises"),
            Lookup::Found(a(9))
        );
        assert_eq!(table.resolve_qualified("NOPE", "enterprises"), Lookup::NotFound);
    }
}
