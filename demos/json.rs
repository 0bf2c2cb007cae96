//! The same small tree, ordered and hashed, printed in every format.

use triemap::render::{self, Config, Format};
use triemap::stats::TreeStatsTrait;
use triemap::{Node, OTrieMap, UTrieMap};

fn fill<R>(r: &mut R)
where
    R: Node<Data = char> + Extend<((&'static str, &'static str), char)>,
    (&'static str,): triemap::PathInsert<R>,
{
    r.insert((), '0');
    r.insert(("a",), 'A');
    r.insert(("b",), 'B');
    r.extend([
        (("a", "c"), 'C'),
        (("a", "d"), 'D'),
        (("b", "e"), 'E'),
        (("b", "f"), 'F'),
    ]);
}

fn main() {
    let mut o: OTrieMap<char, (String, String)> = Default::default();
    let mut u: UTrieMap<char, (String, String)> = Default::default();
    fill(&mut o);
    fill(&mut u);

    /*
     *        0
     *      a/ \b
     *      /   \
     *     A     B
     *   c/ \d e/ \f
     *   /   \ /   \
     *  C    D E    F
     */
    println!("Ordered triemap.\n{}", o);
    println!("\nUnordered triemap.\n{}", u);
    println!("\nOrdered triemap as JSON.\n{:#}", o);

    let wide = Config {
        format: Format::D3,
        indent: 4,
    };
    println!("\nOrdered triemap for D3.\n{}", render::with_config(&o, wide));
    eprintln!("{:?}", o.get_tree_stats());
}
