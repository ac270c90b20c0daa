#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::{KdTreeError, Result};
use crate::kdtree::distance::{DistanceMetric, EuclideanDistance};
use crate::kdtree::{KdTree, Node};
use crate::r#type::Coordinate;

/// A stored point returned by a nearest-neighbor search, with its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a, N: Coordinate> {
    /// The closest stored point.
    pub point: &'a [N],
    /// Distance from the query to `point`, in the units of the metric used.
    pub distance: N,
}

/// How the far side of a node is tested once its near side has been searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FarSidePruning {
    /// `gap <= best` when the near side is the left child, `gap < best` when it is the right.
    Asymmetric,
    /// `gap <= best` on both sides.
    #[cfg_attr(not(test), allow(dead_code))]
    Inclusive,
}

impl FarSidePruning {
    #[inline]
    fn may_contain_closer<N: Coordinate>(self, gap: N, best: N, near_is_left: bool) -> bool {
        match self {
            Self::Asymmetric if !near_is_left => gap < best,
            _ => gap <= best,
        }
    }
}

/// A unit of pending work in the nearest-neighbor traversal.
enum Frame<'a, N: Coordinate> {
    /// Evaluate a node and queue its children.
    Visit(&'a Node<N>, usize),
    /// Once the near side has been fully searched, decide whether to enter the far side.
    FarSide {
        node: &'a Node<N>,
        depth: usize,
        gap: N,
        near_is_left: bool,
    },
}

/// A trait for searching and accessing data out of a KdTree.
pub trait KdTreeIndex<N: Coordinate>: Sized {
    /// The number of coordinates of every stored point.
    fn dimension(&self) -> usize;

    /// Access the root node of the KdTree for manual traversal.
    fn root(&self) -> Option<&Node<N>>;

    /// Find the stored point closest to `query` by Euclidean distance.
    ///
    /// Ties are won by whichever point the traversal reaches first: a later point at the same
    /// distance never replaces the current champion.
    fn nearest_neighbor(&self, query: &[N]) -> Result<Neighbor<'_, N>> {
        self.nearest_neighbor_with_distance(query, &EuclideanDistance)
    }

    /// Find the stored point closest to `query` under a custom distance metric.
    fn nearest_neighbor_with_distance<M: DistanceMetric<N>>(
        &self,
        query: &[N],
        metric: &M,
    ) -> Result<Neighbor<'_, N>> {
        nearest_one(self, query, metric, FarSidePruning::Asymmetric)
    }

    /// Run an independent nearest-neighbor search for every query, in input order.
    ///
    /// The whole batch fails on the first query with the wrong dimension.
    fn nearest_neighbor_batch<Q: AsRef<[N]> + Sync>(
        &self,
        queries: &[Q],
    ) -> Result<Vec<Neighbor<'_, N>>>
    where
        Self: Sync,
    {
        let search = |query: &Q| self.nearest_neighbor(query.as_ref());

        #[cfg(feature = "rayon")]
        let results: Result<Vec<_>> = queries.par_iter().map(search).collect();
        #[cfg(not(feature = "rayon"))]
        let results: Result<Vec<_>> = queries.iter().map(search).collect();

        results
    }
}

impl<N: Coordinate> KdTreeIndex<N> for KdTree<N> {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn root(&self) -> Option<&Node<N>> {
        self.root.as_deref()
    }
}

/// Depth-first pruning search.
///
/// The stack reproduces the recursive order exactly: the far-side test for a node is queued
/// beneath its near child, so it runs only after the whole near subtree has been searched and
/// reads the best distance found by then.
pub(crate) fn nearest_one<'a, N, T, M>(
    tree: &'a T,
    query: &[N],
    metric: &M,
    pruning: FarSidePruning,
) -> Result<Neighbor<'a, N>>
where
    N: Coordinate,
    T: KdTreeIndex<N>,
    M: DistanceMetric<N>,
{
    let dimension = tree.dimension();
    if query.len() != dimension {
        return Err(KdTreeError::dimension_mismatch(dimension, query.len()));
    }
    let root = tree.root().ok_or(KdTreeError::EmptyTree)?;

    let mut champion: &'a [N] = root.point();
    let mut best = N::infinity();

    let mut stack = vec![Frame::Visit(root, 0)];
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Visit(node, depth) => {
                let point = node.point();
                let distance = metric.distance(query, point);
                if distance < best {
                    best = distance;
                    champion = point;
                }

                let axis = depth % dimension;
                let gap = metric.axis_distance(query[axis], point[axis]);
                let near_is_left = point[axis] >= query[axis];
                let (near, far) = if near_is_left {
                    (node.left(), node.right())
                } else {
                    (node.right(), node.left())
                };

                // Note: pushed in backwards order to what gets popped
                if let Some(far) = far {
                    stack.push(Frame::FarSide {
                        node: far,
                        depth: depth + 1,
                        gap,
                        near_is_left,
                    });
                }
                if let Some(near) = near {
                    stack.push(Frame::Visit(near, depth + 1));
                }
            }
            Frame::FarSide {
                node,
                depth,
                gap,
                near_is_left,
            } => {
                if pruning.may_contain_closer(gap, best, near_is_left) {
                    stack.push(Frame::Visit(node, depth));
                }
            }
        }
    }

    Ok(Neighbor {
        point: champion,
        distance: best,
    })
}
