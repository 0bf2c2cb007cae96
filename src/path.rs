//! Key paths.
//!
//! A path addresses a node by the keys leading to it from the root, one key per
//! level: `()` is the root itself, `("a",)` its child under `"a"`, `("a", "c")` the
//! grandchild below that. Paths may be shorter than the trie is deep, and each
//! element may be given in any borrowed form of that level's key type (`&str` for
//! `String`, `&[u8]` for `Vec<u8>`), as with `HashMap::get`.
//!
//! Lookups take keys by reference (`(&k0, &k1)`, or plain string literals);
//! inserts take them by value, converted with `Into` (`("a", "c")` into `String`
//! keys, or owned keys directly).

use std::borrow::Borrow;

use crate::mapping::{ChildMapping, SeekChild};
use crate::node::{Branch, Node};
use crate::segment::Segment;
use crate::visit::Flow;

/// A key path that can be resolved against a node of type `N`.
pub trait Path<N: Node>: Copy {
    /// The node type at the end of the path.
    type Target: Node<Data = N::Data>;

    fn seek(self, node: &N) -> Option<&Self::Target>;

    fn seek_mut(self, node: &mut N) -> Option<&mut Self::Target>;

    /// Value of the deepest node along the path that holds one.
    fn nearest(self, node: &N) -> Option<&N::Data>;

    fn nearest_mut(self, node: &mut N) -> Option<&mut N::Data>;

    /// Removes the value at the end of the path and prunes child subtrees that end
    /// up holding no values. `node` itself is never removed.
    fn erase(self, node: &mut N) -> usize;

    fn climb(
        self,
        node: &N,
        pre: &mut dyn FnMut(&dyn Node<Data = N::Data>) -> Flow,
        post: &mut dyn FnMut(&dyn Node<Data = N::Data>),
    );

    fn climb_mut(
        self,
        node: &mut N,
        pre: &mut dyn FnMut(&mut dyn Node<Data = N::Data>) -> Flow,
        post: &mut dyn FnMut(&mut dyn Node<Data = N::Data>),
    );
}

/// A path of owned (or convertible) keys along which a value can be inserted.
pub trait PathInsert<N: Node> {
    fn insert(self, node: &mut N, data: N::Data) -> (&mut N::Data, bool);
}

impl<N: Node> Path<N> for () {
    type Target = N;

    #[inline]
    fn seek(self, node: &N) -> Option<&N> {
        Some(node)
    }

    #[inline]
    fn seek_mut(self, node: &mut N) -> Option<&mut N> {
        Some(node)
    }

    fn nearest(self, node: &N) -> Option<&N::Data> {
        node.data()
    }

    fn nearest_mut(self, node: &mut N) -> Option<&mut N::Data> {
        node.data_mut()
    }

    fn erase(self, node: &mut N) -> usize {
        usize::from(node.take().is_some())
    }

    fn climb(
        self,
        node: &N,
        pre: &mut dyn FnMut(&dyn Node<Data = N::Data>) -> Flow,
        post: &mut dyn FnMut(&dyn Node<Data = N::Data>),
    ) {
        pre(node);
        post(node);
    }

    fn climb_mut(
        self,
        node: &mut N,
        pre: &mut dyn FnMut(&mut dyn Node<Data = N::Data>) -> Flow,
        post: &mut dyn FnMut(&mut dyn Node<Data = N::Data>),
    ) {
        pre(&mut *node);
        post(node);
    }
}

impl<N: Node> PathInsert<N> for () {
    fn insert(self, node: &mut N, data: N::Data) -> (&mut N::Data, bool) {
        node.put(data)
    }
}

// One impl per path length. The head key resolves one level of the branch, the tail
// (one element shorter) is handed to the child.
macro_rules! impl_path {
    () => {};
    (($q:ident, $h:ident) $(, ($t:ident, $v:ident))*) => {
        impl<'q, D, K, C, M, $q: ?Sized $(, $t: Copy)*> Path<Branch<D, K, C, M>> for (&'q $q, $($t,)*)
        where
            K: Segment + Borrow<$q>,
            C: Node<Data = D>,
            M: SeekChild<K, C, $q>,
            ($($t,)*): Path<C>,
        {
            type Target = <($($t,)*) as Path<C>>::Target;

            fn seek(self, node: &Branch<D, K, C, M>) -> Option<&Self::Target> {
                let ($h, $($v,)*) = self;
                Path::<C>::seek(($($v,)*), node.children.seek_child($h)?)
            }

            fn seek_mut(self, node: &mut Branch<D, K, C, M>) -> Option<&mut Self::Target> {
                let ($h, $($v,)*) = self;
                Path::<C>::seek_mut(($($v,)*), node.children.seek_child_mut($h)?)
            }

            fn nearest(self, node: &Branch<D, K, C, M>) -> Option<&D> {
                let ($h, $($v,)*) = self;
                node.children
                    .seek_child($h)
                    .and_then(|child| Path::<C>::nearest(($($v,)*), child))
                    .or(node.data.as_ref())
            }

            fn nearest_mut(self, node: &mut Branch<D, K, C, M>) -> Option<&mut D> {
                let ($h, $($v,)*) = self;
                let deeper = node
                    .children
                    .seek_child($h)
                    .and_then(|child| Path::<C>::nearest(($($v,)*), child))
                    .is_some();
                if deeper {
                    node.children
                        .seek_child_mut($h)
                        .and_then(|child| Path::<C>::nearest_mut(($($v,)*), child))
                } else {
                    node.data.as_mut()
                }
            }

            fn erase(self, node: &mut Branch<D, K, C, M>) -> usize {
                let ($h, $($v,)*) = self;
                let Some(child) = node.children.seek_child_mut($h) else {
                    return 0;
                };
                let erased = Path::<C>::erase(($($v,)*), child);
                if child.is_empty() {
                    node.children.delete_child($h);
                }
                erased
            }

            fn climb(
                self,
                node: &Branch<D, K, C, M>,
                pre: &mut dyn FnMut(&dyn Node<Data = D>) -> Flow,
                post: &mut dyn FnMut(&dyn Node<Data = D>),
            ) {
                let ($h, $($v,)*) = self;
                if pre(node).is_continue() {
                    if let Some(child) = node.children.seek_child($h) {
                        Path::<C>::climb(($($v,)*), child, pre, post);
                    }
                }
                post(node);
            }

            fn climb_mut(
                self,
                node: &mut Branch<D, K, C, M>,
                pre: &mut dyn FnMut(&mut dyn Node<Data = D>) -> Flow,
                post: &mut dyn FnMut(&mut dyn Node<Data = D>),
            ) {
                let ($h, $($v,)*) = self;
                if pre(&mut *node).is_continue() {
                    if let Some(child) = node.children.seek_child_mut($h) {
                        Path::<C>::climb_mut(($($v,)*), child, pre, post);
                    }
                }
                post(node);
            }
        }

        impl_path!($(($t, $v)),*);
    };
}

macro_rules! impl_path_insert {
    () => {};
    (($h0:ident, $h:ident) $(, ($t:ident, $v:ident))*) => {
        impl<D, K, C, M, $h0 $(, $t)*> PathInsert<Branch<D, K, C, M>> for ($h0, $($t,)*)
        where
            $h0: Into<K>,
            K: Segment,
            C: Node<Data = D> + Default,
            M: ChildMapping<K, C>,
            ($($t,)*): PathInsert<C>,
        {
            fn insert(self, node: &mut Branch<D, K, C, M>, data: D) -> (&mut D, bool) {
                let ($h, $($v,)*) = self;
                PathInsert::<C>::insert(($($v,)*), node.children.seek_or_add_child($h.into()), data)
            }
        }

        impl_path_insert!($(($t, $v)),*);
    };
}

impl_path!(
    (Q0, q0),
    (Q1, q1),
    (Q2, q2),
    (Q3, q3),
    (Q4, q4),
    (Q5, q5),
    (Q6, q6),
    (Q7, q7)
);

impl_path_insert!(
    (H0, h0),
    (H1, h1),
    (H2, h2),
    (H3, h3),
    (H4, h4),
    (H5, h5),
    (H6, h6),
    (H7, h7)
);
