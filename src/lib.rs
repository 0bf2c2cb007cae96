//! Trie maps addressed by fixed-depth key paths.
//!
//! A trie holds values of one type `D` at nodes reached by a path of keys, one key
//! per level, with a different key type allowed at each level. Any node can hold a
//! value, not only the deepest ones, and a path may stop at any depth.
//!
//! ```
//! use triemap::{Node, OTrieMap};
//!
//! // Division, department, user.
//! let mut flags: OTrieMap<bool, (String, String, u32)> = Default::default();
//! flags.insert((), false);
//! flags.insert(("sales",), true);
//! flags.insert(("sales", "retail", 7u32), false);
//!
//! assert_eq!(flags.find(("sales", "retail")), None);
//! assert_eq!(flags.nearest(("sales", "retail", &8u32)), Some(&true));
//! assert_eq!(flags.nearest(("sales", "retail", &7u32)), Some(&false));
//! assert_eq!(flags.nearest(("ops", "support", &1u32)), Some(&false));
//! ```

pub use crate::mapping::{Hashed, Ordered};
pub use crate::node::{Branch, Leaf, Node};
pub use crate::path::{Path, PathInsert};
pub use crate::prefixes::{OTrieMap, Prefixes, TrieMap, UTrieMap};
pub use crate::segment::Segment;
pub use crate::visit::{Flow, Visitor, VisitorMut};

pub mod algo;
pub mod mapping;
pub mod node;
pub mod path;
pub mod prefixes;
pub mod render;
pub mod segment;
pub mod stats;
pub mod visit;
