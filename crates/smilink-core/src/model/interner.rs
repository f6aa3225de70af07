//! String interner for model storage.

use super::ids::StrId;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// Deduplicating string interner.
///
/// Every identifier, path and display hint in the model is stored once in a
/// shared buffer and referred to by [`StrId`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringInterner {
    /// Concatenated string data.
    data: String,
    /// `offsets[i]..offsets[i + 1]` is string `i`.
    offsets: Vec<u32>,
    /// Reverse index.
    index: BTreeMap<String, StrId>,
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl StringInterner {
    /// Create a new string interner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: String::new(),
            offsets: vec![0],
            index: BTreeMap::new(),
        }
    }

    /// Intern a string, returning its identifier.
    ///
    /// Returns `None` when the buffer or id space is exhausted.
    pub fn intern(&mut self, s: &str) -> Option<StrId> {
        if let Some(&id) = self.index.get(s) {
            return Some(id);
        }
        let id = StrId::from_index(self.len())?;
        let end = u32::try_from(self.data.len() + s.len()).ok()?;
        self.data.push_str(s);
        self.offsets.push(end);
        self.index.insert(String::from(s), id);
        Some(id)
    }

    /// Get a string by its identifier.
    ///
    /// Unknown ids yield the empty string.
    #[must_use]
    pub fn get(&self, id: StrId) -> &str {
        let idx = id.to_index();
        match (self.offsets.get(idx), self.offsets.get(idx + 1)) {
            (Some(&start), Some(&end)) => &self.data[start as usize..end as usize],
            _ => "",
        }
    }

    /// Find a string's ID if it has been interned.
    #[must_use]
    pub fn find(&self, s: &str) -> Option<StrId> {
        self.index.get(s).copied()
    }

    /// Get the total number of interned strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Check if the interner is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
