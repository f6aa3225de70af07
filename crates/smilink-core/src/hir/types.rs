//! Core parse-tree types.

use alloc::string::String;
use core::fmt;

/// Symbol identifier as written in the source.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    /// The symbol name.
    pub name: String,
}

impl Symbol {
    /// Create a new symbol.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self { name }
    }

    /// Create a symbol from a string slice.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self {
            name: String::from(name),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::from_name(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Normalized access value.
///
/// Unifies `SMIv1` `ACCESS` and `SMIv2` `MAX-ACCESS` into a single representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HirAccess {
    /// Object is read-only.
    ReadOnly,
    /// Object is read-write.
    ReadWrite,
    /// Object is read-create.
    ReadCreate,
    /// Object is not accessible (typically index columns).
    NotAccessible,
    /// Object is accessible only for notifications.
    AccessibleForNotify,
    /// Object is write-only (deprecated, but seen in the wild).
    WriteOnly,
}

impl fmt::Display for HirAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "read-only"),
            Self::ReadWrite => write!(f, "read-write"),
            Self::ReadCreate => write!(f, "read-create"),
            Self::NotAccessible => write!(f, "not-accessible"),
            Self::AccessibleForNotify => write!(f, "accessible-for-notify"),
            Self::WriteOnly => write!(f, "write-only"),
        }
    }
}

/// Normalized status value.
///
/// `SMIv1` `mandatory` maps to `Current`, `optional` to `Deprecated`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HirStatus {
    /// Current and valid.
    #[default]
    Current,
    /// Deprecated but still valid.
    Deprecated,
    /// Obsolete.
    Obsolete,
}

impl fmt::Display for HirStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Deprecated => write!(f, "deprecated"),
            Self::Obsolete => write!(f, "obsolete"),
        }
    }
}
