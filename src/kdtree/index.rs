use std::fmt;

use crate::error::{KdTreeError, Result};
use crate::kdtree::traversal::{Node, PreOrder, PreOrderDebug};
use crate::r#type::Coordinate;

/// An owned, insertion-ordered KdTree.
///
/// Points are never rebalanced: the shape of the tree depends only on the order in which points
/// were inserted. At depth `k` the splitting axis is `k % dimension`, and a point whose
/// coordinate on that axis is less than or equal to the node's goes left.
pub struct KdTree<N: Coordinate> {
    pub(crate) root: Option<Box<Node<N>>>,
    pub(crate) dimension: usize,
    pub(crate) num_items: usize,
}

impl<N: Coordinate> KdTree<N> {
    /// Create a new, empty tree for points with `dimension` coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "A KdTree needs at least one dimension.");
        Self {
            root: None,
            dimension,
            num_items: 0,
        }
    }

    /// The number of coordinates of every point in this tree.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The number of points stored in this tree, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_items
    }

    /// Returns `true` if the tree holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Access the root node of the KdTree for manual traversal.
    #[inline]
    pub fn root(&self) -> Option<&Node<N>> {
        self.root.as_deref()
    }

    /// The number of levels in the tree; zero when empty.
    pub fn height(&self) -> usize {
        PreOrder::new(self.root())
            .map(|(_, depth)| depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Iterate over all stored points in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &[N]> + '_ {
        PreOrder::new(self.root()).map(|(node, _)| node.point())
    }

    /// Insert a point as a new leaf.
    ///
    /// Duplicate points are kept as distinct nodes. Fails with
    /// [`KdTreeError::DimensionMismatch`] without touching the tree when the point has the wrong
    /// number of coordinates.
    pub fn insert(&mut self, point: &[N]) -> Result<()> {
        self.check_dimension(point)?;
        self.insert_unchecked(point.to_vec());
        Ok(())
    }

    /// Drop every node and reset the tree to empty.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_items = 0;
    }

    pub(crate) fn check_dimension(&self, point: &[N]) -> Result<()> {
        if point.len() != self.dimension {
            return Err(KdTreeError::dimension_mismatch(
                self.dimension,
                point.len(),
            ));
        }
        Ok(())
    }

    /// Walk down from the root, comparing on `depth % dimension`, until an empty child slot is
    /// found. Ties go left.
    pub(crate) fn insert_unchecked(&mut self, point: Vec<N>) {
        debug_assert_eq!(point.len(), self.dimension);

        let dimension = self.dimension;
        let mut slot = &mut self.root;
        let mut depth = 0;
        while let Some(node) = slot {
            let axis = depth % dimension;
            slot = if node.point[axis] >= point[axis] {
                &mut node.left
            } else {
                &mut node.right
            };
            depth += 1;
        }

        *slot = Some(Box::new(Node::new(point)));
        self.num_items += 1;
    }
}

impl<N: Coordinate> PartialEq for KdTree<N> {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && self.num_items == other.num_items
            && self.root == other.root
    }
}

impl<N: Coordinate> fmt::Debug for KdTree<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree")
            .field("dimension", &self.dimension)
            .field("num_items", &self.num_items)
            .field("nodes", &PreOrderDebug(self.root()))
            .finish()
    }
}
