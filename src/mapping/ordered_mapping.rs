use std::borrow::Borrow;
use std::collections::BTreeMap;

use crate::mapping::{Backend, ChildMapping, Ordered, SeekChild};

impl<K: Ord, N> Backend<K, N> for Ordered {
    type Map = BTreeMap<K, N>;
}

impl<K: Ord, N> ChildMapping<K, N> for BTreeMap<K, N> {
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
        BTreeMap::iter(self)
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (&'a K, &'a mut N)>
    where
        K: 'a,
        N: 'a,
    {
        BTreeMap::iter_mut(self)
    }

    fn retain(&mut self, mut keep: impl FnMut(&K, &mut N) -> bool) {
        BTreeMap::retain(self, |k, n| keep(k, n))
    }

    fn clear(&mut self) {
        BTreeMap::clear(self)
    }
}

impl<K, N, Q> SeekChild<K, N, Q> for BTreeMap<K, N>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
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
