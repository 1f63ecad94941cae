use std::fmt;
use std::iter::FusedIterator;

use super::{AvlTreeSet, NodeId};

/// Depth-first visiting order of a tree traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    Preorder,
    /// Left subtree, then node, then right subtree. Yields ascending values.
    Inorder,
    /// Left subtree, then right subtree, then node.
    Postorder,
}

/// A lazy depth-first iterator over the values of an [`AvlTreeSet`].
///
/// This `struct` is created by the [`traverse`] and [`iter`] methods on [`AvlTreeSet`].
/// Each call starts a fresh traversal, so a tree can be walked any number of times.
///
/// [`traverse`]: AvlTreeSet::traverse
/// [`iter`]: AvlTreeSet::iter
pub struct Traverse<'a, T> {
    ids: NodeIds<'a, T>,
}

#[derive(Clone, Copy)]
#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

// Walks the tree by following child and parent links, so no stack is needed.
// Every node is entered three times; `order` picks which entry yields it.
pub(super) struct NodeIds<'a, T> {
    set: &'a AvlTreeSet<T>,
    order: Order,
    cursor: Option<(NodeId, Direction)>,
    remaining: usize,
}

impl<'a, T> NodeIds<'a, T> {
    pub(super) fn new(set: &'a AvlTreeSet<T>, order: Order) -> Self {
        Self {
            set,
            order,
            cursor: set.root.map(|root| (root, Direction::FromParent)),
            remaining: set.len(),
        }
    }
}

impl<T> Clone for NodeIds<'_, T> {
    fn clone(&self) -> Self {
        Self {
            set: self.set,
            order: self.order,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<T> Iterator for NodeIds<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = &self.set.nodes;
        while let Some((node, dir)) = self.cursor {
            let visit = match dir {
                Direction::FromParent => {
                    self.cursor = Some(match nodes[node].left {
                        Some(left) => (left, Direction::FromParent),
                        None => (node, Direction::FromLeft),
                    });
                    self.order == Order::Preorder
                }
                Direction::FromLeft => {
                    self.cursor = Some(match nodes[node].right {
                        Some(right) => (right, Direction::FromParent),
                        None => (node, Direction::FromRight),
                    });
                    self.order == Order::Inorder
                }
                Direction::FromRight => {
                    self.cursor = nodes[node].parent.map(|parent| {
                        if nodes[parent].left == Some(node) {
                            (parent, Direction::FromLeft)
                        } else {
                            (parent, Direction::FromRight)
                        }
                    });
                    self.order == Order::Postorder
                }
            };
            if visit {
                self.remaining -= 1;
                return Some(node);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> Traverse<'a, T> {
    pub(super) fn new(set: &'a AvlTreeSet<T>, order: Order) -> Self {
        Self {
            ids: NodeIds::new(set, order),
        }
    }

    /// Returns the order this traversal visits values in.
    pub fn order(&self) -> Order {
        self.ids.order
    }
}

// Auto derived clone seems to have an invalid type bound of T: Clone
impl<T> Clone for Traverse<'_, T> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Traverse<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.order())?;
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let set = self.ids.set;
        self.ids.next().map(|node| &set.nodes[node].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<T> ExactSizeIterator for Traverse<'_, T> {}

impl<T> FusedIterator for Traverse<'_, T> {}
