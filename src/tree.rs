//! An ordered set implemented with an AVL tree.

use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::fmt;

use tracing::trace;

use crate::set::Set;

mod traverse;
pub use traverse::{Order, Traverse};

/// An ordered set implemented with an AVL tree.
///
/// Balancing can be switched off, in which case the set is a plain binary
/// search tree that degenerates into a list under sorted insertion.
///
/// ```
/// use setwise::AvlTreeSet;
/// let mut set = AvlTreeSet::new();
/// for value in 1..=5 {
///     set.insert(value);
/// }
/// assert!(set.contains(&3));
/// assert_eq!(set.height(), 2);
///
/// let mut list = AvlTreeSet::unbalanced();
/// for value in 1..=5 {
///     list.insert(value);
/// }
/// assert_eq!(list.height(), 4);
/// ```
#[derive(Clone)]
pub struct AvlTreeSet<T> {
    nodes: Vec<Node<T>>,
    root: Link,
    balanced: bool,
}

type NodeId = usize;
type Link = Option<NodeId>;

#[derive(Clone)]
struct Node<T> {
    value: T,
    left: Link,
    right: Link,
    parent: Link,
    height: usize,
}

/// Empty link a new node gets attached to.
#[derive(Clone, Copy)]
enum Slot {
    Root,
    Left(NodeId),
    Right(NodeId),
}

impl<T: Ord> AvlTreeSet<T> {
    /// Creates an empty, self-balancing set.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self::with_balancing(true)
    }

    /// Creates an empty set that never rotates, i.e. a plain binary search tree.
    pub fn unbalanced() -> Self {
        Self::with_balancing(false)
    }

    /// Creates an empty set with balancing switched on or off.
    pub fn with_balancing(balanced: bool) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            balanced,
        }
    }

    /// Returns a reference to the value in the set that is equal to the given value.
    ///
    /// The value may be any borrowed form of the set's value type, but the ordering
    /// on the borrowed form *must* match the ordering on the value type.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).map(|node| &self.nodes[node].value)
    }

    /// Returns true if the set contains a value.
    ///
    /// The value may be any borrowed form of the set's value type, but the ordering
    /// on the borrowed form *must* match the ordering on the value type.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).is_some()
    }

    /// Inserts a value into the set.
    /// Returns false if an equal value was already present, leaving the set untouched.
    pub fn insert(&mut self, value: T) -> bool {
        let slot = match self.find_insert_pos(&value) {
            Some(slot) => slot,
            None => return false,
        };

        let node = self.nodes.len();
        let parent = match slot {
            Slot::Root => None,
            Slot::Left(parent) | Slot::Right(parent) => Some(parent),
        };
        self.nodes.push(Node::create(parent, value));
        match slot {
            Slot::Root => self.root = Some(node),
            Slot::Left(parent) => self.nodes[parent].left = Some(node),
            Slot::Right(parent) => self.nodes[parent].right = Some(node),
        }

        self.retrace(parent);
        true
    }

    /// Asserts that the internal tree structure is consistent.
    ///
    /// Heights are recomputed from scratch and compared against the stored ones.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        // Check root link
        if let Some(root) = self.root {
            assert!(self.nodes[root].parent.is_none());
        } else {
            assert!(self.nodes.is_empty());
        }

        // Check tree nodes, children before their parents
        let mut heights = vec![0usize; self.nodes.len()];
        let mut num_nodes = 0;
        for node in self.node_ids(Order::Postorder) {
            let mut height = 0;
            let mut left_height = 0;
            let mut right_height = 0;

            // Check link for left child node
            if let Some(left) = self.nodes[node].left {
                assert_eq!(self.nodes[left].parent, Some(node));
                assert!(self.nodes[left].value < self.nodes[node].value);
                left_height = heights[left] + 1;
                height = cmp::max(height, left_height);
            }

            // Check link for right child node
            if let Some(right) = self.nodes[node].right {
                assert_eq!(self.nodes[right].parent, Some(node));
                assert!(self.nodes[right].value > self.nodes[node].value);
                right_height = heights[right] + 1;
                height = cmp::max(height, right_height);
            }

            // Check height
            assert_eq!(self.nodes[node].height, height);
            heights[node] = height;

            // Check AVL condition (nearly balance)
            if self.balanced {
                assert!(left_height <= right_height + 1);
                assert!(right_height <= left_height + 1);
            }

            num_nodes += 1;
        }

        // Check in-order sequence is strictly ascending
        let mut values = self.iter();
        if let Some(mut previous) = values.next() {
            for value in values {
                assert!(previous < value);
                previous = value;
            }
        }

        // Check number of nodes
        assert_eq!(num_nodes, self.nodes.len());
    }

    fn find<Q>(&self, value: &Q) -> Link
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(node) = current {
            current = match value.cmp(self.nodes[node].value.borrow()) {
                Ordering::Equal => break,
                Ordering::Less => self.nodes[node].left,
                Ordering::Greater => self.nodes[node].right,
            }
        }
        current
    }

    fn find_insert_pos(&self, value: &T) -> Option<Slot> {
        let mut slot = Slot::Root;
        let mut current = self.root;
        while let Some(node) = current {
            match value.cmp(&self.nodes[node].value) {
                Ordering::Equal => return None,
                Ordering::Less => {
                    slot = Slot::Left(node);
                    current = self.nodes[node].left;
                }
                Ordering::Greater => {
                    slot = Slot::Right(node);
                    current = self.nodes[node].right;
                }
            }
        }
        Some(slot)
    }

    // Walks from the given node up to the root, restoring heights and, if enabled, balance.
    // Stops once a subtree ends up with the height it had before the insert,
    // since nothing above it can have changed then.
    fn retrace(&mut self, start_from: Link) {
        let mut current = start_from;
        while let Some(node) = current {
            let parent = self.nodes[node].parent;
            let old_height = self.nodes[node].height;
            let subtree = if self.balanced {
                self.rebalance_node(node)
            } else {
                self.adjust_height(node);
                node
            };
            if self.nodes[subtree].height == old_height {
                break;
            }
            current = parent;
        }
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// Resulting balance will be +1, 0 or -1 height difference between left and right subtree.
    /// Returns the node now at the top of this subtree.
    fn rebalance_node(&mut self, node: NodeId) -> NodeId {
        self.adjust_height(node);
        let factor = self.balance_factor(node);
        debug_assert!((-2..=2).contains(&factor));
        match (self.nodes[node].left, self.nodes[node].right) {
            (Some(left), _) if factor > 1 => {
                // Left-right case first straightens the left child into a left-left case
                if self.balance_factor(left) < 0 {
                    self.rotate_left(left);
                }
                self.rotate_right(node)
            }
            (_, Some(right)) if factor < -1 => {
                // Right-left case first straightens the right child into a right-right case
                if self.balance_factor(right) > 0 {
                    self.rotate_right(right);
                }
                self.rotate_left(node)
            }
            _ => node,
        }
    }
}

impl<T> AvlTreeSet<T> {
    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the height of the tree: -1 when empty, 0 for a single node.
    pub fn height(&self) -> isize {
        self.link_height(self.root)
    }

    /// Returns whether insertions rebalance the tree.
    pub fn is_balanced(&self) -> bool {
        self.balanced
    }

    /// Clears the set, deallocating all memory.
    pub fn clear(&mut self) {
        self.nodes = Vec::new();
        self.root = None;
    }

    /// Moves all values out into a new set, leaving this one empty.
    /// Both sets keep the balancing mode of `self`.
    pub fn take(&mut self) -> Self {
        std::mem::replace(
            self,
            Self {
                nodes: Vec::new(),
                root: None,
                balanced: self.balanced,
            },
        )
    }

    /// Calls `visit` for every value, each node before its subtrees (root, left, right).
    pub fn preorder<F: FnMut(&T)>(&self, visit: F) {
        self.traverse(Order::Preorder).for_each(visit);
    }

    /// Calls `visit` for every value in ascending order (left, root, right).
    pub fn inorder<F: FnMut(&T)>(&self, visit: F) {
        self.traverse(Order::Inorder).for_each(visit);
    }

    /// Calls `visit` for every value, each node after its subtrees (left, right, root).
    pub fn postorder<F: FnMut(&T)>(&self, visit: F) {
        self.traverse(Order::Postorder).for_each(visit);
    }

    /// Gets a lazy iterator over the values in the given depth-first order.
    pub fn traverse(&self, order: Order) -> Traverse<'_, T> {
        Traverse::new(self, order)
    }

    /// Gets an iterator over the values of the set in sorted order.
    pub fn iter(&self) -> Traverse<'_, T> {
        self.traverse(Order::Inorder)
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn node_ids(&self, order: Order) -> impl Iterator<Item = NodeId> + '_ {
        traverse::NodeIds::new(self, order)
    }

    fn link_height(&self, link: Link) -> isize {
        match link {
            None => -1,
            Some(node) => self.nodes[node].height as isize,
        }
    }

    fn balance_factor(&self, node: NodeId) -> isize {
        self.link_height(self.nodes[node].left) - self.link_height(self.nodes[node].right)
    }

    fn adjust_height(&mut self, node: NodeId) {
        let left = self.link_height(self.nodes[node].left);
        let right = self.link_height(self.nodes[node].right);
        self.nodes[node].height = (cmp::max(left, right) + 1) as usize;
    }

    // Points the parent link (or the root) of `old` at `new`.
    fn replace_child(&mut self, parent: Link, old: NodeId, new: NodeId) {
        match parent {
            None => self.root = Some(new),
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                if parent.left == Some(old) {
                    parent.left = Some(new);
                } else {
                    parent.right = Some(new);
                }
            }
        }
    }

    //   n            r
    //  / \          / \
    // a   r   ->   n   c
    //    / \      / \
    //   b   c    a   b
    fn rotate_left(&mut self, node: NodeId) -> NodeId {
        let Some(right) = self.nodes[node].right else {
            return node;
        };
        trace!(node, pivot = right, "rotate left");

        let right_left = self.nodes[right].left;
        self.nodes[node].right = right_left;
        if let Some(right_left) = right_left {
            self.nodes[right_left].parent = Some(node);
        }

        let parent = self.nodes[node].parent;
        self.nodes[right].parent = parent;
        self.replace_child(parent, node, right);

        self.nodes[right].left = Some(node);
        self.nodes[node].parent = Some(right);

        self.adjust_height(node);
        self.adjust_height(right);
        right
    }

    //     n        l
    //    / \      / \
    //   l   c -> a   n
    //  / \          / \
    // a   b        b   c
    fn rotate_right(&mut self, node: NodeId) -> NodeId {
        let Some(left) = self.nodes[node].left else {
            return node;
        };
        trace!(node, pivot = left, "rotate right");

        let left_right = self.nodes[left].right;
        self.nodes[node].left = left_right;
        if let Some(left_right) = left_right {
            self.nodes[left_right].parent = Some(node);
        }

        let parent = self.nodes[node].parent;
        self.nodes[left].parent = parent;
        self.replace_child(parent, node, left);

        self.nodes[left].right = Some(node);
        self.nodes[node].parent = Some(left);

        self.adjust_height(node);
        self.adjust_height(left);
        left
    }
}

impl<T: Ord> Set<T> for AvlTreeSet<T> {
    fn is_implemented(&self) -> bool {
        true
    }

    fn add(&mut self, element: T) {
        self.insert(element);
    }

    fn contains(&self, element: &T) -> bool {
        AvlTreeSet::contains(self, element)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Ord> Default for AvlTreeSet<T> {
    /// Creates an empty, self-balancing set.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for AvlTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for AvlTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |value| {
            self.insert(value);
        });
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTreeSet<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a AvlTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Traverse<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Node<T> {
    fn create(parent: Link, value: T) -> Self {
        Node {
            value,
            parent,
            left: None,
            right: None,
            height: 0,
        }
    }
}
