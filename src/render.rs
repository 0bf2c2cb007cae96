//! JSON-style rendering of tries.
//!
//! Three formats are available, see [`Format`]. Rendering runs a depth-first
//! traversal and writes through a [`Writer`], which carries the format, the indent
//! width and the current depth. Values stored in a trie print themselves through
//! [`Datum`]; tries stored as values in another trie render nested, through the
//! same writer.
//!
//! ```
//! use triemap::{Node, OTrieMap, render};
//!
//! let mut t: OTrieMap<char, (String,)> = Default::default();
//! t.insert((), '0');
//! t.insert(("a",), 'A');
//! assert_eq!(render::like(&t).to_string(), "{\n  data:\"0\",\n  a:{\n    data:\"A\"\n  }\n}");
//! ```

use std::fmt;

use crate::node::{Branch, Leaf, Node};
use crate::segment::Segment;
use crate::visit::{Flow, Visitor};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Nested objects with bare keys. Readable, not strictly JSON.
    #[default]
    Like,
    /// Valid JSON: keys and strings quoted and escaped.
    Proper,
    /// Valid JSON shaped for hierarchy viewers: every node is
    /// `{"type", "name", "data", "children": [...]}`, with `type` and `name`
    /// describing the key it hangs under. The root has no key and leaves no
    /// `children`.
    D3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub format: Format,
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: Format::Like,
            indent: 2,
        }
    }
}

impl Config {
    pub fn with_format(format: Format) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }
}

/// Output sink plus rendering state.
pub struct Writer<'a> {
    out: &'a mut dyn fmt::Write,
    config: Config,
    depth: usize,
}

impl<'a> Writer<'a> {
    pub fn new(out: &'a mut dyn fmt::Write, config: Config) -> Self {
        Self {
            out,
            config,
            depth: 0,
        }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.write_str(s)
    }

    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.out.write_fmt(args)
    }

    /// Writes `s` as a JSON string literal.
    pub fn quoted(&mut self, s: &str) -> fmt::Result {
        let literal = serde_json::to_string(s).map_err(|_| fmt::Error)?;
        self.out.write_str(&literal)
    }

    /// Writes an object key: bare in [`Format::Like`], quoted otherwise.
    pub fn key(&mut self, key: &str) -> fmt::Result {
        match self.config.format {
            Format::Like => self.out.write_str(key)?,
            Format::Proper | Format::D3 => self.quoted(key)?,
        }
        self.out.write_char(':')
    }

    /// Renders `node` and everything below it at the current depth.
    pub fn node<N>(&mut self, node: &N) -> fmt::Result
    where
        N: Node + ?Sized,
        N::Data: Datum,
    {
        match self.config.format {
            Format::Like | Format::Proper => {
                let mut nested = Nested {
                    w: self,
                    comma: false,
                    status: Ok(()),
                };
                node.accept(None, &mut nested);
                nested.status
            }
            Format::D3 => {
                let mut hierarchy = Hierarchy {
                    w: self,
                    sibling: false,
                    status: Ok(()),
                };
                node.accept(None, &mut hierarchy);
                hierarchy.status
            }
        }
    }

    fn newline(&mut self) -> fmt::Result {
        self.out.write_char('\n')?;
        for _ in 0..self.depth * self.config.indent {
            self.out.write_char(' ')?;
        }
        Ok(())
    }

    fn open(&mut self, bracket: char) -> fmt::Result {
        self.out.write_char(bracket)?;
        self.depth += 1;
        self.newline()
    }

    fn close(&mut self, bracket: char) -> fmt::Result {
        self.depth = self.depth.saturating_sub(1);
        self.newline()?;
        self.out.write_char(bracket)
    }

    fn separator(&mut self) -> fmt::Result {
        self.out.write_char(',')?;
        self.newline()
    }

    fn datum<D: Datum + ?Sized>(&mut self, data: &D) -> fmt::Result {
        self.key(D::TAG)?;
        data.write(self)
    }
}

/// A value that can be rendered inside a trie.
pub trait Datum {
    /// Key under which a node's value is rendered.
    const TAG: &'static str = "data";

    fn write(&self, w: &mut Writer<'_>) -> fmt::Result;
}

impl<T: Datum + ?Sized> Datum for &T {
    const TAG: &'static str = T::TAG;

    fn write(&self, w: &mut Writer<'_>) -> fmt::Result {
        (**self).write(w)
    }
}

impl Datum for str {
    fn write(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.quoted(self)
    }
}

impl Datum for String {
    fn write(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.quoted(self)
    }
}

impl Datum for char {
    fn write(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.quoted(self.encode_utf8(&mut [0; 4]))
    }
}

macro_rules! raw_datum {
    ($($t:ty),*) => {
        $(
            impl Datum for $t {
                fn write(&self, w: &mut Writer<'_>) -> fmt::Result {
                    write!(w, "{}", self)
                }
            }
        )*
    };
}

raw_datum!(bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Non-finite floats have no JSON form and come out as `null`.
macro_rules! float_datum {
    ($($t:ty),*) => {
        $(
            impl Datum for $t {
                fn write(&self, w: &mut Writer<'_>) -> fmt::Result {
                    let literal = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                    w.write_str(&literal)
                }
            }
        )*
    };
}

float_datum!(f32, f64);

impl<D: Datum> Datum for Leaf<D> {
    fn write(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.node(self)
    }
}

impl<D, K, C, M> Datum for Branch<D, K, C, M>
where
    Self: Node<Data = D>,
    D: Datum,
{
    fn write(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.node(self)
    }
}

// Like and Proper: {tag:value, key:{...}, key:{...}}
struct Nested<'w, 'a> {
    w: &'w mut Writer<'a>,
    comma: bool,
    status: fmt::Result,
}

impl Nested<'_, '_> {
    fn enter<D: Datum>(&mut self, node: &dyn Node<Data = D>, edge: Option<&dyn Segment>) -> fmt::Result {
        if self.comma {
            self.w.separator()?;
        }
        if let Some(edge) = edge {
            self.w.key(&edge.to_string())?;
        }
        self.w.open('{')?;
        self.comma = match node.data() {
            Some(data) => {
                self.w.datum(data)?;
                true
            }
            None => false,
        };
        Ok(())
    }
}

impl<D: Datum> Visitor<D> for Nested<'_, '_> {
    fn pre(&mut self, node: &dyn Node<Data = D>, edge: Option<&dyn Segment>) -> Flow {
        if self.status.is_ok() {
            self.status = self.enter(node, edge);
        }
        Flow::from(self.status.is_ok())
    }

    fn post(&mut self, _node: &dyn Node<Data = D>, _edge: Option<&dyn Segment>) {
        if self.status.is_ok() {
            self.status = self.w.close('}');
        }
        self.comma = true;
    }
}

// D3: {"type":..., "name":..., "data":..., "children":[{...}, {...}]}
struct Hierarchy<'w, 'a> {
    w: &'w mut Writer<'a>,
    sibling: bool,
    status: fmt::Result,
}

impl Hierarchy<'_, '_> {
    fn enter<D: Datum>(&mut self, node: &dyn Node<Data = D>, edge: Option<&dyn Segment>) -> fmt::Result {
        if self.sibling {
            self.w.separator()?;
        }
        self.w.open('{')?;
        let mut comma = false;
        if let Some(edge) = edge {
            self.w.key("type")?;
            self.w.quoted(edge.type_name())?;
            self.w.separator()?;
            self.w.key("name")?;
            self.w.quoted(&edge.to_string())?;
            comma = true;
        }
        if let Some(data) = node.data() {
            if comma {
                self.w.separator()?;
            }
            self.w.datum(data)?;
            comma = true;
        }
        if !node.is_leaf() {
            if comma {
                self.w.separator()?;
            }
            self.w.key("children")?;
            self.w.open('[')?;
            self.sibling = false;
        }
        Ok(())
    }

    fn leave<D>(&mut self, node: &dyn Node<Data = D>) -> fmt::Result {
        if !node.is_leaf() {
            self.w.close(']')?;
        }
        self.w.close('}')
    }
}

impl<D: Datum> Visitor<D> for Hierarchy<'_, '_> {
    fn pre(&mut self, node: &dyn Node<Data = D>, edge: Option<&dyn Segment>) -> Flow {
        if self.status.is_ok() {
            self.status = self.enter(node, edge);
        }
        Flow::from(self.status.is_ok())
    }

    fn post(&mut self, node: &dyn Node<Data = D>, _edge: Option<&dyn Segment>) {
        if self.status.is_ok() {
            self.status = self.leave(node);
        }
        self.sibling = true;
    }
}

/// A node paired with a rendering configuration, printable with `{}`.
pub struct Render<'t, N: ?Sized> {
    node: &'t N,
    config: Config,
}

impl<N> fmt::Display for Render<'_, N>
where
    N: Node + ?Sized,
    N::Data: Datum,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Writer::new(f, self.config).node(self.node)
    }
}

pub fn with_config<N: Node + ?Sized>(node: &N, config: Config) -> Render<'_, N> {
    Render { node, config }
}

pub fn like<N: Node + ?Sized>(node: &N) -> Render<'_, N> {
    with_config(node, Config::with_format(Format::Like))
}

pub fn proper<N: Node + ?Sized>(node: &N) -> Render<'_, N> {
    with_config(node, Config::with_format(Format::Proper))
}

pub fn d3<N: Node + ?Sized>(node: &N) -> Render<'_, N> {
    with_config(node, Config::with_format(Format::D3))
}

/// `{}` renders [`Format::Like`], `{:#}` renders [`Format::Proper`].
impl<D: Datum> fmt::Display for Leaf<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = if f.alternate() { Format::Proper } else { Format::Like };
        Writer::new(f, Config::with_format(format)).node(self)
    }
}

/// `{}` renders [`Format::Like`], `{:#}` renders [`Format::Proper`].
impl<D, K, C, M> fmt::Display for Branch<D, K, C, M>
where
    Self: Node<Data = D>,
    D: Datum,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = if f.alternate() { Format::Proper } else { Format::Like };
        Writer::new(f, Config::with_format(format)).node(self)
    }
}
