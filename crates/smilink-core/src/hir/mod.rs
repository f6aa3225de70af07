//! Parse tree consumed by the resolver.
//!
//! The textual parser is not part of this crate. It hands over one
//! [`HirModule`] per module definition, with SMIv1 and SMIv2 forms already
//! unified. Nothing here is resolved:
//!
//! - OID components are kept as symbols
//! - type references are kept as symbols
//! - imports are listed, not looked up

pub mod base_modules;
mod definition;
mod module;
mod syntax;
mod types;

pub use base_modules::{BaseModule, INTRINSIC_ROOTS, intrinsic_root, is_base_module};
pub use definition::{
    HirDefinition, HirModuleIdentity, HirNotification, HirObjectIdentity, HirObjectType,
    HirTypeDef, HirValueAssignment,
};
pub use module::{HirImport, HirModule, is_macro_name};
pub use syntax::{
    HirConstraint, HirOidAssignment, HirOidComponent, HirRange, HirRangeValue, HirTypeSyntax,
};
pub use types::{HirAccess, HirStatus, Symbol};
