//! Utilities to traverse the KdTree structure.

use std::fmt;

use crate::r#type::Coordinate;

/// A node in the KdTree.
///
/// Each node exclusively owns its two children. There are no parent links, so a subtree lives
/// exactly as long as the node at its root.
///
/// Equality compares whole subtrees, shape included.
pub struct Node<N: Coordinate> {
    pub(crate) point: Vec<N>,
    pub(crate) left: Option<Box<Node<N>>>,
    pub(crate) right: Option<Box<Node<N>>>,
}

impl<N: Coordinate> Node<N> {
    pub(crate) fn new(point: Vec<N>) -> Self {
        Self {
            point,
            left: None,
            right: None,
        }
    }

    /// The point stored in this node.
    #[inline]
    pub fn point(&self) -> &[N] {
        &self.point
    }

    /// The child holding points whose coordinate on this node's splitting axis is less than or
    /// equal to this node's.
    #[inline]
    pub fn left(&self) -> Option<&Node<N>> {
        self.left.as_deref()
    }

    /// The child holding points whose coordinate on this node's splitting axis is greater than
    /// this node's.
    #[inline]
    pub fn right(&self) -> Option<&Node<N>> {
        self.right.as_deref()
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

// Two subtrees are equal when their pre-order walks visit the same points with the same children
// present.
impl<N: Coordinate> PartialEq for Node<N> {
    fn eq(&self, other: &Self) -> bool {
        PreOrder::new(Some(self))
            .map(shape)
            .eq(PreOrder::new(Some(other)).map(shape))
    }
}

fn shape<N: Coordinate>((node, _): (&Node<N>, usize)) -> (&[N], bool, bool) {
    (node.point(), node.left.is_some(), node.right.is_some())
}

impl<N: Coordinate> fmt::Debug for Node<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("point", &self.point)
            .field("left", &self.left().map(Node::point))
            .field("right", &self.right().map(Node::point))
            .finish()
    }
}

/// Debug view of a whole tree: every point with its depth, in pre-order.
pub(crate) struct PreOrderDebug<'a, N: Coordinate>(pub(crate) Option<&'a Node<N>>);

impl<N: Coordinate> fmt::Debug for PreOrderDebug<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(PreOrder::new(self.0).map(|(node, depth)| (depth, node.point())))
            .finish()
    }
}

// Sorted input produces list-shaped trees, so teardown must not recurse once per level.
impl<N: Coordinate> Drop for Node<N> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<N>>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// Pre-order iterator over the nodes of a tree, yielding each node with its depth.
///
/// Node first, then its left subtree, then its right subtree.
pub struct PreOrder<'a, N: Coordinate> {
    stack: Vec<(&'a Node<N>, usize)>,
}

impl<'a, N: Coordinate> PreOrder<'a, N> {
    pub(crate) fn new(root: Option<&'a Node<N>>) -> Self {
        Self {
            stack: root.map(|node| (node, 0)).into_iter().collect(),
        }
    }
}

impl<'a, N: Coordinate> Iterator for PreOrder<'a, N> {
    type Item = (&'a Node<N>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        // Note: pushed in backwards order to what gets popped
        if let Some(right) = node.right() {
            self.stack.push((right, depth + 1));
        }
        if let Some(left) = node.left() {
            self.stack.push((left, depth + 1));
        }
        Some((node, depth))
    }
}
