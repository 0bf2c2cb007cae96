//! Child mappings: the associative containers that link one node to the nodes of the
//! next level.
//!
//! A mapping is chosen per trie through a backend marker ([`Ordered`] or [`Hashed`]),
//! which resolves a `(key, child)` pair into a concrete map type. Every level of a
//! trie uses the same backend.

pub mod hashed_mapping;
pub mod ordered_mapping;

/// Structural operations every child mapping supports, independent of the type used
/// to query it.
pub trait ChildMapping<K, N>: Default {
    /// Returns the child under `key`, creating a default one first if it is missing.
    fn seek_or_add_child(&mut self, key: K) -> &mut N
    where
        N: Default;
    fn num_children(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.num_children() == 0
    }
    /// Iterates children in the backend's order: sorted for [`Ordered`], unspecified
    /// (and possibly different after any mutation) for [`Hashed`].
    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a N)>
    where
        K: 'a,
        N: 'a;
    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (&'a K, &'a mut N)>
    where
        K: 'a,
        N: 'a;
    /// Keeps only the children for which `keep` returns true.
    fn retain(&mut self, keep: impl FnMut(&K, &mut N) -> bool);
    fn clear(&mut self);
}

/// Lookups by a borrowed form `Q` of the key, in the manner of `HashMap::get`.
pub trait SeekChild<K, N, Q: ?Sized = K>: ChildMapping<K, N> {
    fn seek_child(&self, key: &Q) -> Option<&N>;
    fn seek_child_mut(&mut self, key: &Q) -> Option<&mut N>;
    fn delete_child(&mut self, key: &Q) -> Option<N>;
}

/// Selects the concrete mapping used for keys `K` and children `N`.
pub trait Backend<K, N> {
    type Map: ChildMapping<K, N>;
}

/// Sorted children, backed by `BTreeMap`. Iteration follows `K: Ord`, so traversal
/// output is deterministic and trees support ordering comparisons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ordered;

/// Hashed children, backed by `HashMap`. Lookups are O(1) on average; iteration order
/// is unspecified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hashed;
