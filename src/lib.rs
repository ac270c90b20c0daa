#![doc = include_str!("../README.md")]

pub mod codec;
mod error;
pub mod kdtree;
pub mod store;
mod r#type;

pub use codec::{DelimitedCodec, PointCodec, NULL_TOKEN};
pub use error::{KdTreeError, Result};
pub use kdtree::{KdTree, KdTreeBuilder, KdTreeIndex, Neighbor, Token};
pub use r#type::Coordinate;
pub use store::{FileStore, LineSink, LineSource, MemoryStore};
