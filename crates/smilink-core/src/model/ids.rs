//! Index types for model storage.
//!
//! Using `NonZeroU32` enables `Option<T>` niche optimization (no extra space).

use core::fmt;
use core::num::NonZeroU32;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create from a raw index (1-based).
            #[must_use]
            pub const fn from_raw(raw: u32) -> Option<Self> {
                match NonZeroU32::new(raw) {
                    Some(n) => Some(Self(n)),
                    None => None,
                }
            }

            /// Create from a 0-based index. `None` once the arena is full.
            #[must_use]
            pub fn from_index(index: usize) -> Option<Self> {
                u32::try_from(index)
                    .ok()
                    .and_then(|i| i.checked_add(1))
                    .and_then(Self::from_raw)
            }

            /// Get the raw value (1-based).
            #[must_use]
            pub const fn to_raw(self) -> u32 {
                self.0.get()
            }

            /// Get the 0-based index.
            #[must_use]
            pub const fn to_index(self) -> usize {
                (self.0.get() - 1) as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Interned string identifier.
    StrId,
    "s"
);

define_id!(
    /// Source file identifier.
    FileId,
    "f"
);

define_id!(
    /// Module identifier.
    ModuleId,
    "m"
);

define_id!(
    /// Assignment identifier. Ids are handed out in registration order.
    AssignmentId,
    "a"
);

define_id!(
    /// Type node identifier.
    TypeId,
    "t"
);

define_id!(
    /// OID tree node identifier.
    NodeId,
    "n"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_an_id() {
        assert!(NodeId::from_raw(0).is_none());
    }

    #[test]
    fn index_is_zero_based() {
        let id = AssignmentId::from_index(99).unwrap();
        assert_eq!(id.to_raw(), 100);
        assert_eq!(id.to_index(), 99);
    }

    #[test]
    fn index_overflow() {
        assert!(TypeId::from_index(u32::MAX as usize).is_none());
    }

    #[test]
    fn option_is_niche_packed() {
        assert_eq!(
            core::mem::size_of::<Option<AssignmentId>>(),
            core::mem::size_of::<AssignmentId>()
        );
    }

    #[test]
    fn display_prefix() {
        let id = ModuleId::from_raw(3).unwrap();
        assert_eq!(id.to_string(), "m3");
    }
}
