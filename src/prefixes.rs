//! Building trie types from a list of key types.
//!
//! `OTrieMap<D, (K0, K1)>` is a trie with two key levels: a root keyed by `K0`, whose
//! children are keyed by `K1`, whose children are leaves. With `P = ()` the trie is
//! a single leaf.

use crate::mapping::{Backend, Hashed, Ordered};
use crate::node::{Branch, Leaf, Node};
use crate::segment::Segment;

/// Maps a tuple of per-level key types and a backend `B` to the root node type.
pub trait Prefixes<D, B> {
    type Root: Node<Data = D> + Default;
}

impl<D, B> Prefixes<D, B> for () {
    type Root = Leaf<D>;
}

macro_rules! impl_prefixes {
    () => {};
    ($k:ident $(, $ks:ident)*) => {
        impl<D, B, $k $(, $ks)*> Prefixes<D, B> for ($k, $($ks,)*)
        where
            $k: Segment,
            ($($ks,)*): Prefixes<D, B>,
            B: Backend<$k, <($($ks,)*) as Prefixes<D, B>>::Root>,
        {
            type Root = Branch<
                D,
                $k,
                <($($ks,)*) as Prefixes<D, B>>::Root,
                <B as Backend<$k, <($($ks,)*) as Prefixes<D, B>>::Root>>::Map,
            >;
        }

        impl_prefixes!($($ks),*);
    };
}

impl_prefixes!(K0, K1, K2, K3, K4, K5, K6, K7);

/// A trie holding `D` under key paths typed by the tuple `P`, with backend `B`.
pub type TrieMap<D, P, B = Ordered> = <P as Prefixes<D, B>>::Root;

/// A trie with sorted children at every level.
pub type OTrieMap<D, P> = TrieMap<D, P, Ordered>;

/// A trie with hashed children at every level.
pub type UTrieMap<D, P> = TrieMap<D, P, Hashed>;

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use crate::node::{Branch, Leaf, Node};
    use crate::prefixes::{OTrieMap, UTrieMap};

    #[test]
    fn test_depth_zero_is_a_leaf() {
        let mut t: OTrieMap<i32, ()> = Default::default();
        assert_eq!(t, Leaf::new());
        t.insert((), 4);
        assert_eq!(t.find(()), Some(&4));
        assert_eq!(t.height(), 0);
    }

    #[test]
    fn test_aliases_expand_to_nested_branches() {
        let o: OTrieMap<u8, (String, char)> = Default::default();
        let _: &Branch<u8, String, Branch<u8, char, Leaf<u8>, BTreeMap<char, Leaf<u8>>>, _> = &o;

        let u: UTrieMap<u8, (u16,)> = Default::default();
        let _: &Branch<u8, u16, Leaf<u8>, HashMap<u16, Leaf<u8>>> = &u;
    }

    #[test]
    fn test_eight_levels() {
        type Deep = OTrieMap<&'static str, (u8, u8, u8, u8, u8, u8, u8, u8)>;
        let mut t: Deep = Default::default();
        t.insert((1u8, 2u8, 3u8, 4u8, 5u8, 6u8, 7u8, 8u8), "bottom");
        t.insert((1u8, 2u8, 3u8), "middle");
        assert_eq!(t.height(), 8);
        assert_eq!(t.count(), 9);
        assert_eq!(t.find((&1u8, &2u8, &3u8, &4u8, &5u8, &6u8, &7u8, &8u8)), Some(&"bottom"));
        assert_eq!(t.nearest((&1u8, &2u8, &3u8, &4u8, &9u8)), Some(&"middle"));
    }
}
