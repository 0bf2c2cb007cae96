use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use crate::mapping::{Backend, ChildMapping, Hashed, SeekChild};

impl<K: Hash + Eq, N> Backend<K, N> for Hashed {
    type Map = HashMap<K, N>;
}

impl<K, N, S> ChildMapping<K, N> for HashMap<K, N, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    #[inline]
    fn seek_or_add_child(&mut self, key: K) -> &mut N
    where
        N: Default,
    {
        self.entry(key).or_default()
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.len()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a N)>
    where
        K: 'a,
        N: 'a,
    {
        HashMap::iter(self)
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (&'a K, &'a mut N)>
    where
        K: 'a,
        N: 'a,
    {
        HashMap::iter_mut(self)
    }

    fn retain(&mut self, mut keep: impl FnMut(&K, &mut N) -> bool) {
        HashMap::retain(self, |k, n| keep(k, n))
    }

    fn clear(&mut self) {
        HashMap::clear(self)
    }
}

impl<K, N, Q, S> SeekChild<K, N, Q> for HashMap<K, N, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher + Default,
{
    #[inline]
    fn seek_child(&self, key: &Q) -> Option<&N> {
        self.get(key)
    }

    #[inline]
    fn seek_child_mut(&mut self, key: &Q) -> Option<&mut N> {
        self.get_mut(key)
    }

    fn delete_child(&mut self, key: &Q) -> Option<N> {
        self.remove(key)
    }
}
