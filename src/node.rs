//! Trie nodes.
//!
//! A trie of depth N is a chain of nested node types: N levels of [`Branch`] ending
//! in a [`Leaf`]. `Branch<D, K, C, M>` holds an optional `D` plus a mapping `M` from
//! keys `K` to children of type `C`; `Leaf<D>` holds only the optional `D`. Both
//! implement [`Node`], which carries the whole operation set. Use the aliases in
//! [`crate::prefixes`] rather than spelling these types out.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::mapping::ChildMapping;
use crate::path::{Path, PathInsert};
use crate::segment::Segment;
use crate::visit::{Flow, Hooks, Visitor, VisitorMut};

/// Operations shared by every level of a trie.
///
/// The required methods are object safe, so hooks can be handed any level of a trie
/// as `&dyn Node<Data = D>`. The path-addressed operations (`insert`, `find`,
/// `nearest`, `climb`, ...) are generic over the path type and only available on
/// concrete node types.
pub trait Node {
    type Data;

    /// The value held by this node itself.
    fn data(&self) -> Option<&Self::Data>;
    fn data_mut(&mut self) -> Option<&mut Self::Data>;

    /// Stores `data` in this node's own slot unless it already holds a value.
    /// Returns the held value and whether it was stored by this call.
    fn put(&mut self, data: Self::Data) -> (&mut Self::Data, bool);

    /// Removes and returns this node's own value. Children are untouched.
    fn take(&mut self) -> Option<Self::Data>;

    /// Drops this node's value and every child. The node itself stays.
    fn clear(&mut self);

    /// True if the node has no children.
    fn is_leaf(&self) -> bool;

    /// True if neither this node nor any node below it holds a value.
    fn is_empty(&self) -> bool;

    /// Number of values held in this subtree.
    fn size(&self) -> usize;

    /// Number of nodes in this subtree, including this one and nodes without values.
    fn count(&self) -> usize;

    /// Longest distance from this node down to a node without children.
    fn height(&self) -> usize;

    fn num_children(&self) -> usize;

    /// Depth-first walk of this subtree. `edge` is the key this node hangs under,
    /// passed through to the visitor.
    fn accept(&self, edge: Option<&dyn Segment>, visitor: &mut dyn Visitor<Self::Data>);

    fn accept_mut(&mut self, edge: Option<&dyn Segment>, visitor: &mut dyn VisitorMut<Self::Data>);

    /// Visits the immediate children in backend order until `visit` returns
    /// [`Flow::Stop`].
    fn traverse_level(
        &self,
        visit: &mut dyn FnMut(&dyn Node<Data = Self::Data>, &dyn Segment) -> Flow,
    );

    fn traverse_level_mut(
        &mut self,
        visit: &mut dyn FnMut(&mut dyn Node<Data = Self::Data>, &dyn Segment) -> Flow,
    );

    /// Drops every immediate child (with its subtree) for which `keep` returns false.
    fn retain_children(
        &mut self,
        keep: &mut dyn FnMut(&dyn Segment, &mut dyn Node<Data = Self::Data>) -> bool,
    );

    /// Stores `data` at `path` unless a value is already there, creating missing
    /// nodes on the way. Never overwrites.
    ///
    /// Returns the value now at `path` and whether this call stored it.
    fn insert<P>(&mut self, path: P, data: Self::Data) -> (&mut Self::Data, bool)
    where
        Self: Sized,
        P: PathInsert<Self>,
    {
        path.insert(self, data)
    }

    /// Removes the value at `path`, pruning nodes left empty below this one.
    /// Returns the number of values removed (0 or 1).
    fn erase<P: Path<Self>>(&mut self, path: P) -> usize
    where
        Self: Sized,
    {
        path.erase(self)
    }

    /// Exact lookup: the value at `path`, if every key exists and the node there
    /// holds a value.
    fn find<'a, P: Path<Self>>(&'a self, path: P) -> Option<&'a Self::Data>
    where
        Self: Sized,
        P::Target: 'a,
    {
        path.seek(self)?.data()
    }

    fn find_mut<'a, P: Path<Self>>(&'a mut self, path: P) -> Option<&'a mut Self::Data>
    where
        Self: Sized,
        P::Target: 'a,
    {
        path.seek_mut(self)?.data_mut()
    }

    /// Lookup with fallback: the value of the deepest node along `path` that holds
    /// one. Follows `path` as far as its keys exist; a missing key or a valueless
    /// node falls back to the nearest ancestor with a value.
    fn nearest<P: Path<Self>>(&self, path: P) -> Option<&Self::Data>
    where
        Self: Sized,
    {
        path.nearest(self)
    }

    fn nearest_mut<P: Path<Self>>(&mut self, path: P) -> Option<&mut Self::Data>
    where
        Self: Sized,
    {
        path.nearest_mut(self)
    }

    /// The node at `path`, if every key exists.
    fn seek<P: Path<Self>>(&self, path: P) -> Option<&P::Target>
    where
        Self: Sized,
    {
        path.seek(self)
    }

    fn seek_mut<P: Path<Self>>(&mut self, path: P) -> Option<&mut P::Target>
    where
        Self: Sized,
    {
        path.seek_mut(self)
    }

    /// Calls `visit` once on the node at `path`, or not at all if a key is missing.
    fn jump<P: Path<Self>>(&self, path: P, visit: impl FnOnce(&P::Target))
    where
        Self: Sized,
    {
        if let Some(node) = path.seek(self) {
            visit(node)
        }
    }

    fn jump_mut<P: Path<Self>>(&mut self, path: P, visit: impl FnOnce(&mut P::Target))
    where
        Self: Sized,
    {
        if let Some(node) = path.seek_mut(self) {
            visit(node)
        }
    }

    /// Walks from this node down along `path`, calling `pre` on the way down and
    /// `post` on the way back up. Descent ends at the first missing key or when
    /// `pre` returns [`Flow::Stop`]; `post` fires for every node `pre` saw.
    fn climb<P: Path<Self>>(
        &self,
        path: P,
        mut pre: impl FnMut(&dyn Node<Data = Self::Data>) -> Flow,
        mut post: impl FnMut(&dyn Node<Data = Self::Data>),
    ) where
        Self: Sized,
    {
        path.climb(self, &mut pre, &mut post)
    }

    fn climb_pre<P: Path<Self>>(&self, path: P, pre: impl FnMut(&dyn Node<Data = Self::Data>) -> Flow)
    where
        Self: Sized,
    {
        self.climb(path, pre, |_| {})
    }

    fn climb_post<P: Path<Self>>(&self, path: P, post: impl FnMut(&dyn Node<Data = Self::Data>))
    where
        Self: Sized,
    {
        self.climb(path, |_| Flow::Continue, post)
    }

    fn climb_mut<P: Path<Self>>(
        &mut self,
        path: P,
        mut pre: impl FnMut(&mut dyn Node<Data = Self::Data>) -> Flow,
        mut post: impl FnMut(&mut dyn Node<Data = Self::Data>),
    ) where
        Self: Sized,
    {
        path.climb_mut(self, &mut pre, &mut post)
    }

    fn climb_pre_mut<P: Path<Self>>(
        &mut self,
        path: P,
        pre: impl FnMut(&mut dyn Node<Data = Self::Data>) -> Flow,
    ) where
        Self: Sized,
    {
        self.climb_mut(path, pre, |_| {})
    }

    fn climb_post_mut<P: Path<Self>>(
        &mut self,
        path: P,
        post: impl FnMut(&mut dyn Node<Data = Self::Data>),
    ) where
        Self: Sized,
    {
        self.climb_mut(path, |_| Flow::Continue, post)
    }

    /// Depth-first traversal of the whole subtree. `pre` runs before a node's
    /// children and may skip them by returning [`Flow::Stop`]; `post` always runs
    /// after them. Both receive the key the node hangs under, absent for `self`.
    fn traverse_dfs(
        &self,
        pre: impl FnMut(&dyn Node<Data = Self::Data>, Option<&dyn Segment>) -> Flow,
        post: impl FnMut(&dyn Node<Data = Self::Data>, Option<&dyn Segment>),
    ) where
        Self: Sized,
    {
        self.accept(None, &mut Hooks { pre, post })
    }

    fn traverse_pre(&self, pre: impl FnMut(&dyn Node<Data = Self::Data>, Option<&dyn Segment>) -> Flow)
    where
        Self: Sized,
    {
        self.traverse_dfs(pre, |_, _| {})
    }

    fn traverse_post(&self, post: impl FnMut(&dyn Node<Data = Self::Data>, Option<&dyn Segment>))
    where
        Self: Sized,
    {
        self.traverse_dfs(|_, _| Flow::Continue, post)
    }

    fn traverse_dfs_mut(
        &mut self,
        pre: impl FnMut(&mut dyn Node<Data = Self::Data>, Option<&dyn Segment>) -> Flow,
        post: impl FnMut(&mut dyn Node<Data = Self::Data>, Option<&dyn Segment>),
    ) where
        Self: Sized,
    {
        self.accept_mut(None, &mut Hooks { pre, post })
    }

    fn traverse_pre_mut(
        &mut self,
        pre: impl FnMut(&mut dyn Node<Data = Self::Data>, Option<&dyn Segment>) -> Flow,
    ) where
        Self: Sized,
    {
        self.traverse_dfs_mut(pre, |_, _| {})
    }

    fn traverse_post_mut(
        &mut self,
        post: impl FnMut(&mut dyn Node<Data = Self::Data>, Option<&dyn Segment>),
    ) where
        Self: Sized,
    {
        self.traverse_dfs_mut(|_, _| Flow::Continue, post)
    }

    /// Runs a stateful [`Visitor`] over the whole subtree.
    fn visit<V: Visitor<Self::Data>>(&self, visitor: &mut V)
    where
        Self: Sized,
    {
        self.accept(None, visitor)
    }

    fn visit_mut<V: VisitorMut<Self::Data>>(&mut self, visitor: &mut V)
    where
        Self: Sized,
    {
        self.accept_mut(None, visitor)
    }
}

/// The deepest level of a trie: an optional value and nothing else.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Leaf<D> {
    pub(crate) data: Option<D>,
}

impl<D> Default for Leaf<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Leaf<D> {
    pub fn new() -> Self {
        Self { data: None }
    }
}

impl<D> Node for Leaf<D> {
    type Data = D;

    #[inline]
    fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    #[inline]
    fn data_mut(&mut self) -> Option<&mut D> {
        self.data.as_mut()
    }

    fn put(&mut self, data: D) -> (&mut D, bool) {
        let created = self.data.is_none();
        (self.data.get_or_insert(data), created)
    }

    fn take(&mut self) -> Option<D> {
        self.data.take()
    }

    fn clear(&mut self) {
        self.data = None;
    }

    fn is_leaf(&self) -> bool {
        true
    }

    fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    fn size(&self) -> usize {
        usize::from(self.data.is_some())
    }

    fn count(&self) -> usize {
        1
    }

    fn height(&self) -> usize {
        0
    }

    fn num_children(&self) -> usize {
        0
    }

    fn accept(&self, edge: Option<&dyn Segment>, visitor: &mut dyn Visitor<D>) {
        // Nothing below a leaf, so the pre hook's answer does not matter.
        visitor.pre(self, edge);
        visitor.post(self, edge);
    }

    fn accept_mut(&mut self, edge: Option<&dyn Segment>, visitor: &mut dyn VisitorMut<D>) {
        visitor.pre(self, edge);
        visitor.post(self, edge);
    }

    fn traverse_level(&self, _visit: &mut dyn FnMut(&dyn Node<Data = D>, &dyn Segment) -> Flow) {}

    fn traverse_level_mut(
        &mut self,
        _visit: &mut dyn FnMut(&mut dyn Node<Data = D>, &dyn Segment) -> Flow,
    ) {
    }

    fn retain_children(&mut self, _keep: &mut dyn FnMut(&dyn Segment, &mut dyn Node<Data = D>) -> bool) {}
}

/// An inner level of a trie: an optional value plus children of type `C` under
/// keys of type `K`, stored in mapping `M`.
pub struct Branch<D, K, C, M> {
    pub(crate) data: Option<D>,
    pub(crate) children: M,
    _marker: PhantomData<fn() -> (K, C)>,
}

impl<D, K, C, M: Default> Default for Branch<D, K, C, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, K, C, M: Default> Branch<D, K, C, M> {
    pub fn new() -> Self {
        Self {
            data: None,
            children: M::default(),
            _marker: PhantomData,
        }
    }
}

impl<D, K, C, M> Branch<D, K, C, M> {
    /// The child mapping, for read-only access with the backend's own API.
    pub fn children(&self) -> &M {
        &self.children
    }
}

impl<D, K, C, M> Node for Branch<D, K, C, M>
where
    K: Segment,
    C: Node<Data = D>,
    M: ChildMapping<K, C>,
{
    type Data = D;

    #[inline]
    fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    #[inline]
    fn data_mut(&mut self) -> Option<&mut D> {
        self.data.as_mut()
    }

    fn put(&mut self, data: D) -> (&mut D, bool) {
        let created = self.data.is_none();
        (self.data.get_or_insert(data), created)
    }

    fn take(&mut self) -> Option<D> {
        self.data.take()
    }

    fn clear(&mut self) {
        self.data = None;
        self.children.clear();
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn is_empty(&self) -> bool {
        self.data.is_none() && self.children.iter().all(|(_, child)| child.is_empty())
    }

    fn size(&self) -> usize {
        self.children
            .iter()
            .map(|(_, child)| child.size())
            .sum::<usize>()
            + usize::from(self.data.is_some())
    }

    fn count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|(_, child)| child.count())
            .sum::<usize>()
    }

    fn height(&self) -> usize {
        self.children
            .iter()
            .map(|(_, child)| child.height())
            .max()
            .map_or(0, |h| h + 1)
    }

    fn num_children(&self) -> usize {
        self.children.num_children()
    }

    fn accept(&self, edge: Option<&dyn Segment>, visitor: &mut dyn Visitor<D>) {
        if visitor.pre(self, edge).is_continue() {
            for (key, child) in self.children.iter() {
                child.accept(Some(key as &dyn Segment), visitor);
            }
        }
        visitor.post(self, edge);
    }

    fn accept_mut(&mut self, edge: Option<&dyn Segment>, visitor: &mut dyn VisitorMut<D>) {
        if visitor.pre(self, edge).is_continue() {
            for (key, child) in self.children.iter_mut() {
                child.accept_mut(Some(key as &dyn Segment), visitor);
            }
        }
        visitor.post(self, edge);
    }

    fn traverse_level(&self, visit: &mut dyn FnMut(&dyn Node<Data = D>, &dyn Segment) -> Flow) {
        for (key, child) in self.children.iter() {
            if visit(child, key).is_stop() {
                break;
            }
        }
    }

    fn traverse_level_mut(
        &mut self,
        visit: &mut dyn FnMut(&mut dyn Node<Data = D>, &dyn Segment) -> Flow,
    ) {
        for (key, child) in self.children.iter_mut() {
            if visit(child, key).is_stop() {
                break;
            }
        }
    }

    fn retain_children(&mut self, keep: &mut dyn FnMut(&dyn Segment, &mut dyn Node<Data = D>) -> bool) {
        self.children.retain(|key, child| keep(key, child));
    }
}

impl<D: Clone, K, C, M: Clone> Clone for Branch<D, K, C, M> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            children: self.children.clone(),
            _marker: PhantomData,
        }
    }
}

impl<D: fmt::Debug, K, C, M: fmt::Debug> fmt::Debug for Branch<D, K, C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branch")
            .field("data", &self.data)
            .field("children", &self.children)
            .finish()
    }
}

// Entrywise: `BTreeMap` compares in key order, `HashMap` by key-matched lookup.
impl<D: PartialEq, K, C, M: PartialEq> PartialEq for Branch<D, K, C, M> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.children == other.children
    }
}

impl<D: Eq, K, C, M: Eq> Eq for Branch<D, K, C, M> {}

impl<D: Hash, K, C, M: Hash> Hash for Branch<D, K, C, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
        self.children.hash(state);
    }
}

// Ordering is only defined for the ordered backend. Hashed children iterate in an
// unspecified order, so a pairwise comparison of them would not be a total order.
impl<D, K, C> PartialOrd for Branch<D, K, C, BTreeMap<K, C>>
where
    D: PartialOrd,
    K: PartialOrd,
    C: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.data.partial_cmp(&other.data) {
            Some(Ordering::Equal) => {}
            ord => return ord,
        }
        match self.children.len().cmp(&other.children.len()) {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        self.children.iter().partial_cmp(other.children.iter())
    }
}

impl<D: Ord, K: Ord, C: Ord> Ord for Branch<D, K, C, BTreeMap<K, C>> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.data
            .cmp(&other.data)
            .then_with(|| self.children.len().cmp(&other.children.len()))
            .then_with(|| self.children.iter().cmp(other.children.iter()))
    }
}

impl<D, P: PathInsert<Leaf<D>>> FromIterator<(P, D)> for Leaf<D> {
    fn from_iter<I: IntoIterator<Item = (P, D)>>(iter: I) -> Self {
        let mut leaf = Self::new();
        leaf.extend(iter);
        leaf
    }
}

impl<D, P: PathInsert<Leaf<D>>> Extend<(P, D)> for Leaf<D> {
    fn extend<I: IntoIterator<Item = (P, D)>>(&mut self, iter: I) {
        for (path, data) in iter {
            self.insert(path, data);
        }
    }
}

impl<D, K, C, M, P> FromIterator<(P, D)> for Branch<D, K, C, M>
where
    Self: Node<Data = D>,
    M: Default,
    P: PathInsert<Self>,
{
    fn from_iter<I: IntoIterator<Item = (P, D)>>(iter: I) -> Self {
        let mut branch = Self::new();
        branch.extend(iter);
        branch
    }
}

impl<D, K, C, M, P> Extend<(P, D)> for Branch<D, K, C, M>
where
    Self: Node<Data = D>,
    P: PathInsert<Self>,
{
    fn extend<I: IntoIterator<Item = (P, D)>>(&mut self, iter: I) {
        for (path, data) in iter {
            self.insert(path, data);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::{BTreeMap, HashMap};

    use crate::node::{Branch, Leaf, Node};
    use crate::visit::Flow;

    type Flat = Branch<char, String, Leaf<char>, BTreeMap<String, Leaf<char>>>;

    #[test]
    fn test_leaf_slot() {
        let mut leaf = Leaf::<u32>::new();
        assert!(leaf.is_empty() && leaf.is_leaf());
        assert_eq!((leaf.size(), leaf.count(), leaf.height()), (0, 1, 0));

        let (v, created) = leaf.put(7);
        assert_eq!((*v, created), (7, true));
        let (v, created) = leaf.put(9);
        assert_eq!((*v, created), (7, false));
        assert_eq!(leaf.size(), 1);

        *leaf.data_mut().unwrap() += 1;
        assert_eq!(leaf.take(), Some(8));
        assert_eq!(leaf.take(), None);
        assert!(leaf.is_empty());
    }

    #[test]
    fn test_leaf_visits_once() {
        let mut leaf = Leaf::new();
        leaf.put('x');
        let trace = RefCell::new(String::new());
        leaf.traverse_dfs(
            |n, edge| {
                assert!(edge.is_none());
                trace.borrow_mut().push('<');
                trace.borrow_mut().push(*n.data().unwrap());
                Flow::Stop
            },
            |_, _| trace.borrow_mut().push('>'),
        );
        assert_eq!(trace.into_inner(), "<x>");

        let mut levels = 0;
        leaf.traverse_level(&mut |_, _| {
            levels += 1;
            Flow::Continue
        });
        assert_eq!(levels, 0);
    }

    #[test]
    fn test_branch_structure() {
        let mut b = Flat::new();
        assert!(b.is_empty() && b.is_leaf());
        assert_eq!((b.size(), b.count(), b.height()), (0, 1, 0));

        b.insert(("k",), 'K');
        b.insert((), 'R');
        assert_eq!((b.size(), b.count(), b.height()), (2, 2, 1));
        assert!(!b.is_leaf());
        assert_eq!(b.num_children(), 1);

        b.clear();
        assert!(b.is_empty() && b.is_leaf());
        assert_eq!((b.size(), b.count(), b.height()), (0, 1, 0));
    }

    #[test]
    fn test_emptiness_ignores_valueless_children() {
        let mut b = Flat::new();
        b.insert(("k",), 'K');
        b.jump_mut(("k",), |leaf| {
            leaf.take();
        });
        // The child still exists physically but holds nothing.
        assert_eq!(b.count(), 2);
        assert!(b.is_empty());
        assert_eq!(b.size(), 0);
    }

    #[test]
    fn test_ordering_data_then_width_then_children() {
        let mut a = Flat::new();
        let mut b = Flat::new();
        assert_eq!(a, b);

        // Absent value sorts first.
        b.insert((), 'a');
        assert!(a < b);
        a.insert((), 'a');
        assert_eq!(a, b);

        // Same value, fewer children sorts first.
        b.insert(("x",), 'x');
        assert!(a < b);
        a.insert(("y",), 'x');
        a.insert(("z",), 'x');
        assert!(b < a);

        // Same width: pairwise by key, then child.
        b.insert(("y",), 'x');
        a.erase(("z",));
        a.insert(("x",), 'y');
        // a: x=y, y=x; b: x=x, y=x
        assert!(b < a);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Greater);
    }

    #[test]
    fn test_hashed_equality_is_entrywise() {
        type Hashed = Branch<u32, u32, Leaf<u32>, HashMap<u32, Leaf<u32>>>;
        let forward: Hashed = (0..64u32).map(|i| ((i,), i * 3)).collect();
        let backward: Hashed = (0..64u32).rev().map(|i| ((i,), i * 3)).collect();
        assert_eq!(forward, backward);

        let mut other = backward.clone();
        *other.find_mut((&5u32,)).unwrap() = 0;
        assert_ne!(forward, other);
    }

    #[test]
    fn test_from_iter_keeps_first_value() {
        let b: Flat = vec![(("a",), '1'), (("a",), '2'), (("b",), '3')]
            .into_iter()
            .collect();
        assert_eq!(b.find(("a",)), Some(&'1'));
        assert_eq!(b.size(), 2);
    }

    fn exact<'a, N: Node, P: crate::path::Path<N>>(node: &'a N, path: P) -> Option<&'a N::Data>
    where
        P::Target: 'a,
    {
        node.find(path)
    }

    #[test]
    fn test_find_through_generic_caller() {
        let mut b = Flat::new();
        b.insert(("a",), 'A');
        assert_eq!(exact(&b, ("a",)), Some(&'A'));
        assert_eq!(exact(&b, ()), None);

        *b.find_mut(("a",)).unwrap() = 'Z';
        let found = b.find(("a",));
        assert_eq!(found, Some(&'Z'));
    }

    fn assert_thread_safe<T: Send + Sync>() {}

    #[test]
    fn test_branch_marker_is_inert() {
        // Auto traits follow the stored data and mapping only.
        assert_thread_safe::<Flat>();
        assert_thread_safe::<Branch<u8, u8, Flat, HashMap<u8, Flat>>>();
        let b: Branch<u8, u8, Flat, HashMap<u8, Flat>> = Branch::default();
        assert!(b.clone().is_empty());
    }
}
