//! Distance metrics for nearest-neighbor queries.
//!
//! A metric reports both the distance between two points and the distance from a point to a
//! splitting hyperplane, in the same units, so the search can decide whether the far side of a
//! node may still hold a closer point.

use crate::r#type::Coordinate;

/// A trait for calculating distances between points.
pub trait DistanceMetric<N: Coordinate> {
    /// Distance between two points of equal length.
    fn distance(&self, a: &[N], b: &[N]) -> N;

    /// Distance from a coordinate to a splitting hyperplane along one axis.
    fn axis_distance(&self, a: N, b: N) -> N;
}

/// Euclidean distance metric.
///
/// This is the straight-line distance and the metric used by
/// [`nearest_neighbor`][crate::kdtree::KdTreeIndex::nearest_neighbor].
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl<N: Coordinate> DistanceMetric<N> for EuclideanDistance {
    #[inline]
    fn distance(&self, a: &[N], b: &[N]) -> N {
        SquaredEuclideanDistance.distance(a, b).sqrt()
    }

    #[inline]
    fn axis_distance(&self, a: N, b: N) -> N {
        (a - b).abs()
    }
}

/// Squared Euclidean distance metric.
///
/// Returns the same neighbors as [`EuclideanDistance`] without the square root; reported
/// distances are squared.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredEuclideanDistance;

impl<N: Coordinate> DistanceMetric<N> for SquaredEuclideanDistance {
    #[inline]
    fn distance(&self, a: &[N], b: &[N]) -> N {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b).fold(N::zero(), |acc, (&x, &y)| {
            let d = x - y;
            acc + d * d
        })
    }

    #[inline]
    fn axis_distance(&self, a: N, b: N) -> N {
        let d = a - b;
        d * d
    }
}
