//! Absolute numeric OIDs.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// A fully resolved numeric OID.
///
/// Ordering is lexicographic by arc, which is also tree pre-order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Oid {
    arcs: Vec<u32>,
}

/// A dotted OID string that could not be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid OID arc at position {position}")]
pub struct OidParseError {
    /// Zero-based index of the offending arc.
    pub position: usize,
}

impl Oid {
    /// Create a new OID from a vector of arcs.
    #[must_use]
    pub fn new(arcs: Vec<u32>) -> Self {
        Self { arcs }
    }

    /// Parse dotted notation (`"1.3.6.1"`). The empty string is the empty OID.
    pub fn from_dotted(s: &str) -> Result<Self, OidParseError> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        s.split('.')
            .enumerate()
            .map(|(position, arc)| arc.parse().map_err(|_| OidParseError { position }))
            .collect::<Result<Vec<u32>, _>>()
            .map(Self::new)
    }

    /// Get the parent OID. Single-arc and empty OIDs have none.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self.arcs.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self::new(rest.to_vec())),
            _ => None,
        }
    }

    /// Create a child OID by appending an arc.
    #[must_use]
    pub fn child(&self, arc: u32) -> Self {
        let mut arcs = Vec::with_capacity(self.arcs.len() + 1);
        arcs.extend_from_slice(&self.arcs);
        arcs.push(arc);
        Self::new(arcs)
    }

    /// Append further arcs in place.
    pub fn extend(&mut self, arcs: impl IntoIterator<Item = u32>) {
        self.arcs.extend(arcs);
    }

    /// Get the last arc.
    #[must_use]
    pub fn last_arc(&self) -> Option<u32> {
        self.arcs.last().copied()
    }

    /// Check if this OID is a prefix of (or equal to) another.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.arcs.starts_with(&self.arcs)
    }

    /// Get the number of arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Get the arcs as a slice.
    #[must_use]
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::new(arcs.to_vec())
    }
}

impl FromStr for Oid {
    type Err = OidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dotted(s)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut arcs = self.arcs.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{first}")?;
            for arc in arcs {
                write!(f, ".{arc}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_roundtrip() {
        let oid: Oid = "1.3.6.1.2.1".parse().unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
        assert_eq!(oid.to_string(), "1.3.6.1.2.1");
    }

    #[test]
    fn dotted_errors() {
        assert_eq!(Oid::from_dotted("1.3.x.1"), Err(OidParseError { position: 2 }));
        assert_eq!(Oid::from_dotted("1..3"), Err(OidParseError { position: 1 }));
        assert!(Oid::from_dotted("").unwrap().is_empty());
    }

    #[test]
    fn parent_and_child() {
        let oid = Oid::from(&[1, 3, 6][..]);
        assert_eq!(oid.child(1).parent(), Some(oid.clone()));
        assert_eq!(Oid::from(&[1][..]).parent(), None);
        assert_eq!(oid.last_arc(), Some(6));
    }

    #[test]
    fn prefix() {
        let internet = Oid::from(&[1, 3, 6, 1][..]);
        let mib2 = Oid::from(&[1, 3, 6, 1, 2, 1][..]);
        assert!(internet.is_prefix_of(&mib2));
        assert!(internet.is_prefix_of(&internet));
        assert!(!mib2.is_prefix_of(&internet));
    }
}
