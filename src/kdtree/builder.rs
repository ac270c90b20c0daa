use crate::error::{KdTreeError, Result};
use crate::kdtree::KdTree;
use crate::r#type::Coordinate;

/// A builder to create a [`KdTree`].
///
/// Points are validated as they are added and inserted in the same order when the builder is
/// finished, so the resulting shape is exactly what sequential [`KdTree::insert`] calls would
/// produce.
pub struct KdTreeBuilder<N: Coordinate> {
    dimension: usize,
    points: Vec<Vec<N>>,
}

impl<N: Coordinate> KdTreeBuilder<N> {
    /// Create a new builder for points with `dimension` coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero.
    pub fn new(dimension: usize) -> Self {
        Self::with_capacity(dimension, 0)
    }

    /// Create a new builder with room for `num_items` points.
    pub fn with_capacity(dimension: usize, num_items: usize) -> Self {
        assert!(dimension > 0, "A KdTree needs at least one dimension.");
        Self {
            dimension,
            points: Vec::with_capacity(num_items),
        }
    }

    /// Add a point to the index, returning its insertion index.
    pub fn add(&mut self, point: &[N]) -> Result<usize> {
        if point.len() != self.dimension {
            return Err(KdTreeError::dimension_mismatch(self.dimension, point.len()));
        }
        let index = self.points.len();
        self.points.push(point.to_vec());
        Ok(index)
    }

    /// Consume this builder, inserting every point in the order it was added.
    pub fn finish(self) -> KdTree<N> {
        let mut tree = KdTree::new(self.dimension);
        for point in self.points {
            tree.insert_unchecked(point);
        }
        tree
    }
}

impl<N: Coordinate> KdTree<N> {
    /// Insert a sequence of points one at a time, in the given order.
    ///
    /// Every point is checked before the first insertion, so a point with the wrong dimension
    /// leaves the tree unmodified. Returns the number of points inserted.
    pub fn build_from_points<P: AsRef<[N]>>(&mut self, points: &[P]) -> Result<usize> {
        for point in points {
            self.check_dimension(point.as_ref())?;
        }
        for point in points {
            self.insert_unchecked(point.as_ref().to_vec());
        }
        Ok(points.len())
    }

    /// Create a tree from a sequence of points, inserted in order.
    pub fn from_points<P: AsRef<[N]>>(dimension: usize, points: &[P]) -> Result<Self> {
        let mut tree = Self::new(dimension);
        tree.build_from_points(points)?;
        Ok(tree)
    }
}
