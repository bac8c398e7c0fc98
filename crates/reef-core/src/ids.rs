//! Declaration identifiers and the signature side-table.
//!
//! Every function, class and union produced by a parse run receives a
//! [`DeclId`]. Later phases resolve a signature for each declaration and
//! record it in a [`SignatureTable`] keyed by that id, so parsed declarations
//! never need to be mutated after construction.

use std::fmt;

use rustc_hash::FxHashMap;

/// Identifies a declaration (function, class or union) within one parse run.
///
/// Ids are assigned in program order starting at zero.
///
/// # Example
///
/// ```
/// use reef_core::DeclId;
///
/// let id = DeclId::new(3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(u32);

impl DeclId {
    /// Create a new declaration ID with the given index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the underlying index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl_{}", self.0)
    }
}

impl From<u32> for DeclId {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

impl From<DeclId> for u32 {
    fn from(id: DeclId) -> Self {
        id.0
    }
}

/// Hands out sequential [`DeclId`]s.
#[derive(Debug, Default)]
pub struct DeclIdGen {
    next: u32,
}

impl DeclIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> DeclId {
        let id = DeclId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn count(&self) -> u32 {
        self.next
    }
}

/// Signatures attached to declarations after parsing.
///
/// The parser always leaves this empty; the type checker fills it in.
#[derive(Debug, Clone)]
pub struct SignatureTable<S> {
    signatures: FxHashMap<DeclId, S>,
}

impl<S> Default for SignatureTable<S> {
    fn default() -> Self {
        Self {
            signatures: FxHashMap::default(),
        }
    }
}

impl<S> SignatureTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a signature, returning the one previously attached to `id`.
    pub fn insert(&mut self, id: DeclId, signature: S) -> Option<S> {
        self.signatures.insert(id, signature)
    }

    pub fn get(&self, id: DeclId) -> Option<&S> {
        self.signatures.get(&id)
    }

    pub fn contains(&self, id: DeclId) -> bool {
        self.signatures.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &S)> {
        self.signatures.iter().map(|(id, sig)| (*id, sig))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decl_id_conversions() {
        let id = DeclId::from(7);
        assert_eq!(u32::from(id), 7);
        assert_eq!(format!("{}", id), "decl_7");
    }

    #[test]
    fn id_gen_is_sequential() {
        let mut ids = DeclIdGen::new();
        assert_eq!(ids.next_id(), DeclId::new(0));
        assert_eq!(ids.next_id(), DeclId::new(1));
        assert_eq!(ids.count(), 2);
    }

    #[test]
    fn signature_table_insert_and_get() {
        let mut table = SignatureTable::new();
        assert!(table.is_empty());

        assert_eq!(table.insert(DeclId::new(1), "fn(int): int"), None);
        assert_eq!(table.insert(DeclId::new(1), "fn(): bool"), Some("fn(int): int"));

        assert!(table.contains(DeclId::new(1)));
        assert!(!table.contains(DeclId::new(2)));
        assert_eq!(table.get(DeclId::new(1)), Some(&"fn(): bool"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.iter().count(), 1);
    }
}
