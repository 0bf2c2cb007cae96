//! Visitor plumbing shared by the traversal operations.

use crate::node::Node;
use crate::segment::Segment;

/// Whether a traversal should go on past the current hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flow {
    Continue,
    Stop,
}

impl Flow {
    #[inline]
    pub fn is_continue(self) -> bool {
        self == Flow::Continue
    }

    #[inline]
    pub fn is_stop(self) -> bool {
        self == Flow::Stop
    }
}

impl From<bool> for Flow {
    fn from(go_on: bool) -> Self {
        if go_on {
            Flow::Continue
        } else {
            Flow::Stop
        }
    }
}

/// A depth-first visitor with both hooks in one value, for visitors that carry
/// state across the pre and post visits (renderers, statistics).
///
/// `edge` is the key under which the node hangs below its parent, absent for the
/// node the traversal started from.
pub trait Visitor<D> {
    /// Returning [`Flow::Stop`] skips the node's children. `post` still fires.
    fn pre(&mut self, node: &dyn Node<Data = D>, edge: Option<&dyn Segment>) -> Flow {
        let _ = (node, edge);
        Flow::Continue
    }

    fn post(&mut self, node: &dyn Node<Data = D>, edge: Option<&dyn Segment>) {
        let _ = (node, edge);
    }
}

/// Mutable counterpart of [`Visitor`].
pub trait VisitorMut<D> {
    fn pre(&mut self, node: &mut dyn Node<Data = D>, edge: Option<&dyn Segment>) -> Flow {
        let _ = (node, edge);
        Flow::Continue
    }

    fn post(&mut self, node: &mut dyn Node<Data = D>, edge: Option<&dyn Segment>) {
        let _ = (node, edge);
    }
}

/// Adapts a pair of closures to [`Visitor`] / [`VisitorMut`].
pub(crate) struct Hooks<Pre, Post> {
    pub(crate) pre: Pre,
    pub(crate) post: Post,
}

impl<D, Pre, Post> Visitor<D> for Hooks<Pre, Post>
where
    Pre: FnMut(&dyn Node<Data = D>, Option<&dyn Segment>) -> Flow,
    Post: FnMut(&dyn Node<Data = D>, Option<&dyn Segment>),
{
    fn pre(&mut self, node: &dyn Node<Data = D>, edge: Option<&dyn Segment>) -> Flow {
        (self.pre)(node, edge)
    }

    fn post(&mut self, node: &dyn Node<Data = D>, edge: Option<&dyn Segment>) {
        (self.post)(node, edge)
    }
}

impl<D, Pre, Post> VisitorMut<D> for Hooks<Pre, Post>
where
    Pre: FnMut(&mut dyn Node<Data = D>, Option<&dyn Segment>) -> Flow,
    Post: FnMut(&mut dyn Node<Data = D>, Option<&dyn Segment>),
{
    fn pre(&mut self, node: &mut dyn Node<Data = D>, edge: Option<&dyn Segment>) -> Flow {
        (self.pre)(node, edge)
    }

    fn post(&mut self, node: &mut dyn Node<Data = D>, edge: Option<&dyn Segment>) {
        (self.post)(node, edge)
    }
}
