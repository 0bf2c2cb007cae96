use std::cell::RefCell;

use triemap::{Flow, Node, OTrieMap, Path, Segment, UTrieMap, Visitor};

type ORepo = OTrieMap<char, (String, String)>;
type URepo = UTrieMap<char, (String, String)>;

/*
 *        0
 *      a/ \b
 *      /   \
 *     A     B
 *   c/ \d e/ \f
 *   /   \ /   \
 *  C    D E    F
 */
fn build<R: Node<Data = char> + Default + Extend<((&'static str, &'static str), char)>>() -> R {
    let mut r = R::default();
    r.insert((), '0');
    r.extend([
        (("a", "c"), 'C'),
        (("a", "d"), 'D'),
        (("b", "e"), 'E'),
        (("b", "f"), 'F'),
    ]);
    r
}

fn sample<R>() -> R
where
    R: Node<Data = char> + Default + Extend<((&'static str, &'static str), char)>,
    (&'static str,): triemap::PathInsert<R>,
{
    let mut r = build::<R>();
    r.insert(("a",), 'A');
    r.insert(("b",), 'B');
    r
}

fn level<R: Node<Data = char>, P: Path<R>>(r: &R, path: P) -> String {
    let mut out = String::new();
    r.jump(path, |n| {
        n.traverse_level(&mut |child, _| {
            out.extend(child.data());
            Flow::Continue
        })
    });
    out
}

fn pre_order<R: Node<Data = char>, P: Path<R>>(r: &R, path: P) -> String {
    let mut out = String::new();
    r.jump(path, |n| {
        n.traverse_pre(|node, _| {
            out.extend(node.data());
            Flow::Continue
        })
    });
    out
}

fn post_order<R: Node<Data = char>, P: Path<R>>(r: &R, path: P) -> String {
    let mut out = String::new();
    r.jump(path, |n| n.traverse_post(|node, _| out.extend(node.data())));
    out
}

fn pre_climb<R: Node<Data = char>, P: Path<R>>(r: &R, path: P) -> String {
    let mut out = String::new();
    r.climb_pre(path, |node| {
        out.extend(node.data());
        Flow::Continue
    });
    out
}

fn post_climb<R: Node<Data = char>, P: Path<R>>(r: &R, path: P) -> String {
    let mut out = String::new();
    r.climb_post(path, |node| out.extend(node.data()));
    out
}

fn sorted(s: String) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

#[test]
fn level_order() {
    let o: ORepo = sample();
    let u: URepo = sample();

    assert_eq!(level(&o, ()), "AB");
    assert_eq!(sorted(level(&u, ())), "AB");
    assert_eq!(level(&o, ("a",)), "CD");
    assert_eq!(sorted(level(&u, ("a",))), "CD");
    assert_eq!(level(&o, ("b",)), "EF");
    assert_eq!(sorted(level(&u, ("b",))), "EF");

    for r in [level(&o, ("a", "c")), level(&u, ("b", "f")), level(&o, ("x",))] {
        assert_eq!(r, "");
    }
}

#[test]
fn level_order_stops_early() {
    let o: ORepo = sample();
    let mut seen = String::new();
    o.traverse_level(&mut |child, key| {
        seen.push_str(&key.to_string());
        seen.extend(child.data());
        Flow::Stop
    });
    assert_eq!(seen, "aA");
}

#[test]
fn level_order_mut() {
    let mut o: ORepo = sample();
    o.traverse_level_mut(&mut |child, _| {
        if let Some(c) = child.data_mut() {
            *c = c.to_ascii_lowercase();
        }
        Flow::Continue
    });
    assert_eq!(level(&o, ()), "ab");
    assert_eq!(level(&o, ("a",)), "CD");
    assert_eq!(o.find(()), Some(&'0'));

    // Stop after the first child in key order.
    let mut seen = String::new();
    o.traverse_level_mut(&mut |child, key| {
        seen.push_str(&key.to_string());
        child.take().into_iter().for_each(|c| seen.push(c));
        Flow::Stop
    });
    assert_eq!(seen, "aa");
    assert_eq!(level(&o, ()), "b");
    assert_eq!(o.find(("b",)), Some(&'b'));

    let mut u: URepo = sample();
    let mut visits = 0;
    u.traverse_level_mut(&mut |child, _| {
        visits += 1;
        child.clear();
        Flow::Stop
    });
    assert_eq!(visits, 1);
    assert_eq!(u.size(), 4);
}

#[test]
fn depth_first() {
    let o: ORepo = sample();
    let u: URepo = sample();

    assert_eq!(pre_order(&o, ()), "0ACDBEF");
    assert_eq!(post_order(&o, ()), "CDAEFB0");
    assert_eq!(sorted(pre_order(&u, ())), "0ABCDEF");
    assert_eq!(sorted(post_order(&u, ())), "0ABCDEF");

    assert_eq!(pre_order(&o, ("a",)), "ACD");
    assert_eq!(post_order(&o, ("a",)), "CDA");
    assert_eq!(pre_order(&o, ("b",)), "BEF");
    assert_eq!(post_order(&o, ("b",)), "EFB");
    assert_eq!(sorted(post_order(&u, ("b",))), "BEF");

    // A node comes before its children in pre-order and after them in post-order,
    // whatever the sibling order.
    let pre = pre_order(&u, ());
    let post = post_order(&u, ());
    assert!(pre.starts_with('0') && post.ends_with('0'));
    assert!(pre.find('A') < pre.find('C') && pre.find('A') < pre.find('D'));
    assert!(post.find('E') < post.find('B') && post.find('F') < post.find('B'));

    assert_eq!(pre_order(&o, ("a", "c")), "C");
    assert_eq!(post_order(&u, ("b", "f")), "F");
    assert_eq!(pre_order(&o, ("a", "x")), "");
}

#[test]
fn depth_first_pre_can_skip_children() {
    let o: ORepo = sample();
    let trace = RefCell::new(String::new());
    o.traverse_dfs(
        |node, key| {
            trace.borrow_mut().push('<');
            trace.borrow_mut().extend(node.data());
            Flow::from(key.map_or(true, |k| k.to_string() != "a"))
        },
        |node, _| {
            trace.borrow_mut().extend(node.data());
            trace.borrow_mut().push('>');
        },
    );
    assert_eq!(trace.into_inner(), "<0<AA><B<EE><FF>B>0>");
}

#[test]
fn edge_keys_are_passed_to_hooks() {
    let o: ORepo = sample();
    let mut keys = Vec::new();
    o.traverse_pre(|_, key| {
        keys.push(key.map(|k| k.downcast_ref::<String>().cloned()));
        Flow::Continue
    });
    let names: Vec<_> = keys.into_iter().map(|k| k.flatten().unwrap_or_default()).collect();
    assert_eq!(names, ["", "a", "c", "d", "b", "e", "f"]);
}

#[test]
fn depth_first_mut() {
    let mut o: ORepo = sample();
    o.traverse_pre_mut(|node, _| {
        if let Some(c) = node.data_mut() {
            *c = c.to_ascii_lowercase();
        }
        Flow::Continue
    });
    assert_eq!(pre_order(&o, ()), "0acdbef");

    // Drop every leaf value bottom-up; inner nodes keep theirs.
    o.traverse_post_mut(|node, _| {
        if node.is_leaf() {
            node.take();
        }
    });
    assert_eq!(pre_order(&o, ()), "0ab");
}

#[test]
fn climbing() {
    let o: ORepo = sample();
    let u: URepo = sample();

    assert_eq!(pre_climb(&o, ()), "0");
    assert_eq!(pre_climb(&o, ("a",)), "0A");
    assert_eq!(pre_climb(&o, ("a", "c")), "0AC");
    assert_eq!(pre_climb(&o, ("b", "f")), "0BF");

    assert_eq!(post_climb(&o, ()), "0");
    assert_eq!(post_climb(&o, ("a",)), "A0");
    assert_eq!(post_climb(&o, ("a", "d")), "DA0");
    assert_eq!(post_climb(&o, ("b", "e")), "EB0");

    assert_eq!(pre_climb(&o, ("x",)), "0");
    assert_eq!(pre_climb(&o, ("a", "x")), "0A");
    assert_eq!(post_climb(&o, ("b", "x")), "B0");
    assert_eq!(post_climb(&o, ("x", "c")), "0");

    // Climbing does not depend on the backend.
    for path in [("a", "c"), ("a", "d"), ("b", "e"), ("b", "x"), ("x", "x")] {
        assert_eq!(pre_climb(&o, path), pre_climb(&u, path));
        assert_eq!(post_climb(&o, path), post_climb(&u, path));
    }
}

#[test]
fn climbing_mut() {
    let mut u: URepo = sample();
    let mut depth = 0;
    u.climb_mut(
        ("b", "e"),
        |node| {
            depth += 1;
            if let Some(c) = node.data_mut() {
                *c = char::from_digit(depth, 10).unwrap_or('?');
            }
            Flow::Continue
        },
        |_| {},
    );
    assert_eq!(pre_climb(&u, ("b", "e")), "123");
    assert_eq!(u.find(("b", "f")), Some(&'F'));

    let mut up = String::new();
    u.climb_post_mut(("a", "d"), |node| {
        node.take().into_iter().for_each(|c| up.push(c));
    });
    assert_eq!(up, "DA1");
    assert!(!u.is_empty());
    assert_eq!(u.find(("a", "d")), None);
    assert_eq!(u.find(("a", "c")), Some(&'C'));
}

struct Outline {
    depth: usize,
    lines: Vec<String>,
}

impl Visitor<char> for Outline {
    fn pre(&mut self, node: &dyn Node<Data = char>, edge: Option<&dyn Segment>) -> Flow {
        let key = edge.map(|k| k.to_string()).unwrap_or_else(|| "/".into());
        let data = node.data().copied().unwrap_or('-');
        self.lines.push(format!("{}{}={}", " ".repeat(self.depth), key, data));
        self.depth += 1;
        Flow::Continue
    }

    fn post(&mut self, _node: &dyn Node<Data = char>, _edge: Option<&dyn Segment>) {
        self.depth -= 1;
    }
}

#[test]
fn stateful_visitor() {
    let o: ORepo = build();
    let mut outline = Outline {
        depth: 0,
        lines: Vec::new(),
    };
    o.visit(&mut outline);
    assert_eq!(
        outline.lines,
        ["/=0", " a=-", "  c=C", "  d=D", " b=-", "  e=E", "  f=F"]
    );
    assert_eq!(outline.depth, 0);
}
