//! An implementation of an owned, insertion-ordered K-D Tree.

#![warn(missing_docs)]

mod builder;
pub mod distance;
mod index;
mod persistence;
mod serialize;
mod r#trait;
mod traversal;

pub use builder::KdTreeBuilder;
pub use distance::{DistanceMetric, EuclideanDistance, SquaredEuclideanDistance};
pub use index::KdTree;
pub use r#trait::{KdTreeIndex, Neighbor};
pub use serialize::Token;
pub use traversal::{Node, PreOrder};
