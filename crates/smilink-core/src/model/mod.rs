//! Resolved MIB model.
//!
//! The [`Mib`] is what the pipeline hands back: every module that was
//! registered, every assignment with its resolution state, the type nodes,
//! the OID tree and the full problem list.
//!
//! # Features
//!
//! - Arena-based storage with stable index IDs
//! - Global string interner for names, paths and display hints
//! - OID tree with one canonical definition per OID and the shadowed rest
//! - Lookups by OID, by `(module, name)` and by module name
//!
//! # Usage
//!
//! ```ignore
//! let mib = pipeline.run(&parser, sources)?;
//!
//! if let Some(a) = mib.lookup_oid_str("1.3.6.1.2.1.2") {
//!     println!("{}", mib.name_of(a.id));
//! }
//!
//! for root in mib.roots() {
//!     mib.walk(root.id, &mut |node| {
//!         println!("{}", mib.oid_of(node));
//!         true
//!     });
//! }
//! ```

mod assignment;
mod ids;
mod interner;
mod module;
mod node;
mod oid;
mod types;

pub use assignment::{Assignment, AssignmentKind, ResolutionState};
pub use ids::{AssignmentId, FileId, ModuleId, NodeId, StrId, TypeId};
pub use interner::StringInterner;
pub use module::{ModuleImport, ResolvedModule, SourceFile};
pub use node::OidNode;
pub use oid::{Oid, OidParseError};
pub use types::{
    Access, BuiltinType, Constraint, ConstraintRange, Field, NamedValue, RangeBound, ResolvedType,
    Status, TypeKind,
};

use crate::problem::Problems;
use crate::span::Span;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Error returned when model storage capacity is exceeded.
///
/// The model uses `NonZeroU32` IDs, limiting each collection to `u32::MAX - 1` items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("model capacity exceeded: too many {kind}")]
pub struct CapacityError {
    /// The kind of storage that exceeded capacity.
    pub kind: CapacityErrorKind,
}

/// The kind of storage that exceeded capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacityErrorKind {
    /// Interned strings.
    Strings,
    /// Source files.
    Files,
    /// Modules.
    Modules,
    /// Assignments.
    Assignments,
    /// Type nodes.
    Types,
    /// OID tree nodes.
    Nodes,
}

impl core::fmt::Display for CapacityErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Strings => "strings",
            Self::Files => "files",
            Self::Modules => "modules",
            Self::Assignments => "assignments",
            Self::Types => "types",
            Self::Nodes => "nodes",
        })
    }
}

fn full(kind: CapacityErrorKind) -> CapacityError {
    CapacityError { kind }
}

/// Decomposed model for serialization.
///
/// Lookup indices are not part of it; [`Mib::from_parts`] rebuilds them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MibParts {
    /// String interner.
    pub strings: StringInterner,
    /// Source files.
    pub files: Vec<SourceFile>,
    /// Modules.
    pub modules: Vec<ResolvedModule>,
    /// Assignments.
    pub assignments: Vec<Assignment>,
    /// Type nodes.
    pub types: Vec<ResolvedType>,
    /// OID tree nodes.
    pub nodes: Vec<OidNode>,
    /// Root node IDs.
    pub roots: Vec<NodeId>,
    /// Problems.
    pub problems: Problems,
}

/// The resolved MIB model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mib {
    // Storage
    strings: StringInterner,
    files: Vec<SourceFile>,
    modules: Vec<ResolvedModule>,
    assignments: Vec<Assignment>,
    types: Vec<ResolvedType>,
    nodes: Vec<OidNode>,
    roots: Vec<NodeId>,
    problems: Problems,

    // Lookup indices (kept current while building, rebuilt on load)
    module_by_name: BTreeMap<StrId, ModuleId>,
    symbols: BTreeMap<(ModuleId, StrId), AssignmentId>,
    oid_to_node: BTreeMap<Oid, NodeId>,
}

impl Mib {
    /// Create a new empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Strings ===

    /// Intern a string and return its ID.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] when the interner is full.
    pub fn intern(&mut self, s: &str) -> Result<StrId, CapacityError> {
        self.strings
            .intern(s)
            .ok_or(full(CapacityErrorKind::Strings))
    }

    /// Get a string by its ID.
    #[must_use]
    pub fn str(&self, id: StrId) -> &str {
        self.strings.get(id)
    }

    /// Find the ID of an already interned string.
    #[must_use]
    pub fn find_str(&self, s: &str) -> Option<StrId> {
        self.strings.find(s)
    }

    // === Files ===

    pub(crate) fn add_file(&mut self, path: &str) -> Result<FileId, CapacityError> {
        let id = FileId::from_index(self.files.len()).ok_or(full(CapacityErrorKind::Files))?;
        let path = self.intern(path)?;
        self.files.push(SourceFile { id, path });
        Ok(id)
    }

    /// Iterate over source files in input order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    /// Get a file by ID.
    #[must_use]
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.to_index())
    }

    // === Modules ===

    pub(crate) fn add_module(
        &mut self,
        name: StrId,
        file: Option<FileId>,
        span: Span,
        synthetic: bool,
    ) -> Result<ModuleId, CapacityError> {
        let id =
            ModuleId::from_index(self.modules.len()).ok_or(full(CapacityErrorKind::Modules))?;
        self.modules.push(ResolvedModule {
            id,
            name,
            file,
            imports: Vec::new(),
            assignments: Vec::new(),
            types: Vec::new(),
            synthetic,
            span,
        });
        self.module_by_name.entry(name).or_insert(id);
        Ok(id)
    }

    /// Get a module by ID.
    #[must_use]
    pub fn module(&self, id: ModuleId) -> Option<&ResolvedModule> {
        self.modules.get(id.to_index())
    }

    pub(crate) fn module_mut(&mut self, id: ModuleId) -> Option<&mut ResolvedModule> {
        self.modules.get_mut(id.to_index())
    }

    /// Get a module by name.
    #[must_use]
    pub fn module_by_name(&self, name: &str) -> Option<&ResolvedModule> {
        let name = self.strings.find(name)?;
        let id = self.module_by_name.get(&name)?;
        self.module(*id)
    }

    /// Get a module's name.
    #[must_use]
    pub fn module_name(&self, id: ModuleId) -> &str {
        self.module(id).map_or("", |m| self.str(m.name))
    }

    /// Iterate over all modules in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &ResolvedModule> {
        self.modules.iter()
    }

    /// Get the number of modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    // === Assignments ===

    pub(crate) fn add_assignment(
        &mut self,
        module: ModuleId,
        name: StrId,
        kind: AssignmentKind,
        span: Span,
    ) -> Result<AssignmentId, CapacityError> {
        let id = AssignmentId::from_index(self.assignments.len())
            .ok_or(full(CapacityErrorKind::Assignments))?;
        self.assignments.push(Assignment {
            id,
            module,
            name,
            kind,
            span,
            ty: None,
            oid: None,
            state: ResolutionState::Pending,
            status: Status::Current,
            access: None,
        });
        Ok(id)
    }

    /// Make `id` visible as a definition of its module.
    ///
    /// The first definition of a name wins; [`Mib::lookup`] sees it from here on.
    pub(crate) fn add_definition(&mut self, id: AssignmentId) {
        let Some(a) = self.assignments.get(id.to_index()) else {
            return;
        };
        let (module, name) = (a.module, a.name);
        if let Some(m) = self.modules.get_mut(module.to_index()) {
            m.assignments.push(id);
        }
        self.symbols.entry((module, name)).or_insert(id);
    }

    /// Get an assignment by ID.
    #[must_use]
    pub fn assignment(&self, id: AssignmentId) -> Option<&Assignment> {
        self.assignments.get(id.to_index())
    }

    pub(crate) fn assignment_mut(&mut self, id: AssignmentId) -> Option<&mut Assignment> {
        self.assignments.get_mut(id.to_index())
    }

    /// Iterate over all assignments in registration order, rejected duplicates included.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter()
    }

    /// Get an assignment's name.
    #[must_use]
    pub fn name_of(&self, id: AssignmentId) -> &str {
        self.assignment(id).map_or("", |a| self.str(a.name))
    }

    /// Look up `name` as defined in the module called `module`.
    ///
    /// Only the module's own definitions are visible; imports are not followed.
    #[must_use]
    pub fn lookup(&self, module: &str, name: &str) -> Option<&Assignment> {
        let module = self.module_by_name(module)?.id;
        self.lookup_in(module, name)
    }

    /// Look up `name` among the definitions of `module`.
    #[must_use]
    pub fn lookup_in(&self, module: ModuleId, name: &str) -> Option<&Assignment> {
        let name = self.strings.find(name)?;
        let id = self.symbols.get(&(module, name))?;
        self.assignment(*id)
    }

    // === Types ===

    pub(crate) fn add_type(
        &mut self,
        module: ModuleId,
        kind: TypeKind,
    ) -> Result<TypeId, CapacityError> {
        let id = TypeId::from_index(self.types.len()).ok_or(full(CapacityErrorKind::Types))?;
        self.types.push(ResolvedType {
            id,
            name: None,
            module,
            kind,
            constraint: None,
            state: ResolutionState::Pending,
        });
        if let Some(m) = self.module_mut(module) {
            m.types.push(id);
        }
        Ok(id)
    }

    /// Get a type node by ID.
    #[must_use]
    pub fn type_(&self, id: TypeId) -> Option<&ResolvedType> {
        self.types.get(id.to_index())
    }

    pub(crate) fn type_mut(&mut self, id: TypeId) -> Option<&mut ResolvedType> {
        self.types.get_mut(id.to_index())
    }

    /// Iterate over all type nodes.
    pub fn types(&self) -> impl Iterator<Item = &ResolvedType> {
        self.types.iter()
    }

    /// The refinement chain of a type, starting at `id` and ending at a
    /// builtin, a constructed type or an unresolved reference.
    pub fn type_chain(&self, id: TypeId) -> Vec<&ResolvedType> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(type_id) = current {
            let Some(ty) = self.type_(type_id) else {
                break;
            };
            if chain.len() > self.types.len() {
                break;
            }
            chain.push(ty);
            current = ty.parent_type();
        }
        chain
    }

    /// The nearest DISPLAY-HINT along the chain of `id`.
    #[must_use]
    pub fn effective_display_hint(&self, id: TypeId) -> Option<&str> {
        self.type_chain(id).into_iter().find_map(|ty| match ty.kind {
            TypeKind::TextualConvention {
                display_hint: Some(hint),
                ..
            } => Some(self.str(hint)),
            _ => None,
        })
    }

    // === OID tree ===

    pub(crate) fn add_node(
        &mut self,
        subid: u32,
        parent: Option<NodeId>,
    ) -> Result<NodeId, CapacityError> {
        let id = NodeId::from_index(self.nodes.len()).ok_or(full(CapacityErrorKind::Nodes))?;
        self.nodes.push(OidNode::new(id, subid, parent));
        Ok(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut OidNode> {
        self.nodes.get_mut(id.to_index())
    }

    pub(crate) fn add_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    pub(crate) fn register_oid(&mut self, oid: Oid, node: NodeId) {
        self.oid_to_node.insert(oid, node);
    }

    /// Get a node by ID.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&OidNode> {
        self.nodes.get(id.to_index())
    }

    /// Get a node by OID.
    #[must_use]
    pub fn node_by_oid(&self, oid: &Oid) -> Option<&OidNode> {
        self.oid_to_node.get(oid).and_then(|id| self.node(*id))
    }

    /// The canonical assignment at `oid`.
    #[must_use]
    pub fn lookup_oid(&self, oid: &Oid) -> Option<&Assignment> {
        self.node_by_oid(oid)?
            .definition
            .and_then(|id| self.assignment(id))
    }

    /// The canonical assignment at a dotted OID.
    #[must_use]
    pub fn lookup_oid_str(&self, oid: &str) -> Option<&Assignment> {
        Oid::from_dotted(oid).ok().and_then(|o| self.lookup_oid(&o))
    }

    /// Iterate over root nodes in arc order.
    pub fn roots(&self) -> impl Iterator<Item = &OidNode> {
        self.roots.iter().filter_map(|id| self.node(*id))
    }

    /// Get children of a node.
    pub fn children<'a>(&'a self, node: &'a OidNode) -> impl Iterator<Item = &'a OidNode> {
        node.children.iter().filter_map(|id| self.node(*id))
    }

    /// Walk the tree depth-first from `start`. Stops when `visitor` returns false.
    ///
    /// Returns false if the walk was stopped early.
    pub fn walk<F>(&self, start: NodeId, visitor: &mut F) -> bool
    where
        F: FnMut(&OidNode) -> bool,
    {
        let Some(node) = self.node(start) else {
            return true;
        };
        if !visitor(node) {
            return false;
        }
        node.children.iter().all(|child| self.walk(*child, visitor))
    }

    /// Compute the full OID of a node.
    #[must_use]
    pub fn oid_of(&self, node: &OidNode) -> Oid {
        let mut arcs = Vec::new();
        let mut current = Some(node);
        while let Some(n) = current {
            arcs.push(n.subid);
            current = n.parent.and_then(|p| self.node(p));
        }
        arcs.reverse();
        Oid::new(arcs)
    }

    /// Get the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // === Problems ===

    /// All problems, in the order they were recorded.
    #[must_use]
    pub fn problems(&self) -> &Problems {
        &self.problems
    }

    pub(crate) fn problems_mut(&mut self) -> &mut Problems {
        &mut self.problems
    }

    // === Indices and serialization ===

    /// Rebuild the symbol index from module assignment lists.
    fn index_symbols(&mut self) {
        self.symbols.clear();
        for module in &self.modules {
            for id in &module.assignments {
                if let Some(a) = self.assignments.get(id.to_index()) {
                    self.symbols.entry((module.id, a.name)).or_insert(*id);
                }
            }
        }
    }

    /// Decompose the model into parts for serialization.
    #[must_use]
    pub fn into_parts(self) -> MibParts {
        MibParts {
            strings: self.strings,
            files: self.files,
            modules: self.modules,
            assignments: self.assignments,
            types: self.types,
            nodes: self.nodes,
            roots: self.roots,
            problems: self.problems,
        }
    }

    /// Reconstruct a model from serialized parts, rebuilding all lookup indices.
    #[must_use]
    pub fn from_parts(parts: MibParts) -> Self {
        let mut mib = Self {
            strings: parts.strings,
            files: parts.files,
            modules: parts.modules,
            assignments: parts.assignments,
            types: parts.types,
            nodes: parts.nodes,
            roots: parts.roots,
            problems: parts.problems,
            module_by_name: BTreeMap::new(),
            symbols: BTreeMap::new(),
            oid_to_node: BTreeMap::new(),
        };
        for module in &mib.modules {
            mib.module_by_name.entry(module.name).or_insert(module.id);
        }
        mib.index_symbols();
        let oids: Vec<(Oid, NodeId)> = mib.nodes.iter().map(|n| (mib.oid_of(n), n.id)).collect();
        mib.oid_to_node.extend(oids);
        mib
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Mib, ModuleId, AssignmentId) {
        let mut mib = Mib::new();
        let file = mib.add_file("IF-MIB.txt").unwrap();
        let name = mib.intern("IF-MIB").unwrap();
        let module = mib.add_module(name, Some(file), Span::SYNTHETIC, false).unwrap();
        let if_mib = mib.intern("ifMIB").unwrap();
        let a = mib
            .add_assignment(module, if_mib, AssignmentKind::ModuleIdentity, Span::SYNTHETIC)
            .unwrap();
        mib.add_definition(a);

        let root = mib.add_node(1, None).unwrap();
        mib.add_root(root);
        let child = mib.add_node(3, Some(root)).unwrap();
        mib.node_mut(root).unwrap().children.push(child);
        mib.node_mut(child).unwrap().definition = Some(a);
        mib.register_oid(Oid::from(&[1][..]), root);
        mib.register_oid(Oid::from(&[1, 3][..]), child);
        (mib, module, a)
    }

    #[test]
    fn lookup_by_module_and_name() {
        let (mib, module, a) = sample();
        assert_eq!(mib.lookup("IF-MIB", "ifMIB").map(|x| x.id), Some(a));
        assert_eq!(mib.lookup_in(module, "ifMIB").map(|x| x.id), Some(a));
        assert!(mib.lookup("IF-MIB", "ifTable").is_none());
        assert!(mib.lookup("IP-MIB", "ifMIB").is_none());
        assert_eq!(mib.module_name(module), "IF-MIB");
    }

    #[test]
    fn lookup_by_oid() {
        let (mib, _, a) = sample();
        assert_eq!(mib.lookup_oid_str("1.3").map(|x| x.id), Some(a));
        assert!(mib.lookup_oid_str("1").is_none());
        assert!(mib.lookup_oid_str("1.x").is_none());
    }

    #[test]
    fn walk_visits_in_order() {
        let (mib, _, _) = sample();
        let mut seen = Vec::new();
        for root in mib.roots() {
            mib.walk(root.id, &mut |n| {
                seen.push(mib.oid_of(n).to_string());
                true
            });
        }
        assert_eq!(seen, ["1", "1.3"]);
    }

    #[test]
    fn parts_roundtrip_rebuilds_indices() {
        let (mib, _, a) = sample();
        let restored = Mib::from_parts(mib.clone().into_parts());
        assert_eq!(restored, mib);
        assert_eq!(restored.lookup_oid_str("1.3").map(|x| x.id), Some(a));
    }

    #[test]
    fn capacity_error_display() {
        let err = full(CapacityErrorKind::Nodes);
        assert_eq!(err.to_string(), "model capacity exceeded: too many nodes");
    }
}
