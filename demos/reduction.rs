//! Compacting per-user configurations: values shared by most users of a
//! department move up to the department, and so on up to the root, without
//! changing the configuration any user resolves to.
//!
//! Run with `-v` for a small tree printed before and after.

use std::collections::BTreeMap;
use std::fmt;

use rand::{thread_rng, Rng};
use triemap::render::{Datum, Writer};
use triemap::stats::TreeStatsTrait;
use triemap::{algo, Node, OTrieMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Configuration(u8);

impl Datum for Configuration {
    const TAG: &'static str = "config";

    fn write(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", self.0)
    }
}

// Division, department and user, each a single letter.
type Key = (char, char, char);
type FlatMap = BTreeMap<Key, Configuration>;
type Configurations = OTrieMap<Configuration, Key>;

fn fill(flat: &mut FlatMap, trie: &mut Configurations, verbose: bool) {
    let (div_limit, dep_limit, usr_limit, cfg_limit) = if verbose {
        ('B', 'B', 'e', 2)
    } else {
        ('Z', 'Z', 'z', 4)
    };
    let mut rng = thread_rng();
    for div in 'A'..=div_limit {
        for dep in 'A'..=dep_limit {
            for usr in 'a'..=usr_limit {
                let config = Configuration(rng.gen_range(1..=cfg_limit));
                flat.insert((div, dep, usr), config);
                trie.insert((div, dep, usr), config);
            }
        }
    }
}

fn verify(flat: &FlatMap, trie: &Configurations) {
    for ((div, dep, usr), config) in flat {
        assert_eq!(trie.nearest((div, dep, usr)), Some(config));
    }
}

fn main() {
    let verbose = std::env::args().nth(1).as_deref() == Some("-v");

    let mut flat = FlatMap::new();
    let mut trie: Configurations = Default::default();
    fill(&mut flat, &mut trie, verbose);
    println!("Flat map size={} Trie map size={}", flat.len(), trie.size());
    if verbose {
        println!("Before reduction:\n{}", trie);
    }
    verify(&flat, &trie);

    algo::reduce(&mut trie);
    println!("Reduced trie map size={}", trie.size());
    if verbose {
        println!("After reduction:\n{}", trie);
    }
    verify(&flat, &trie);
    eprintln!("{:?}", trie.get_tree_stats());

    println!("All good.");
}
