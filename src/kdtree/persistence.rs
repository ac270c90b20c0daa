//! Building, saving, loading and batch-querying a KdTree through line stores.

use tracing::debug;

use crate::codec::PointCodec;
use crate::error::{KdTreeError, Result};
use crate::kdtree::{KdTree, KdTreeIndex, Token};
use crate::r#type::Coordinate;
use crate::store::{LineSink, LineSource};

/// Field placed between the point and the distance on every batch result line.
const RESULT_SPACER: &str = " ";

impl<N: Coordinate> KdTree<N> {
    /// Insert one point per non-blank line of `source`, in order.
    ///
    /// Every line is decoded and checked before the first insertion, so a malformed line leaves
    /// the tree unmodified. Returns the number of points inserted.
    pub fn build_from_source<S, C>(&mut self, source: &S, codec: &C) -> Result<usize>
    where
        S: LineSource,
        C: PointCodec<N>,
    {
        let points = records(source)?
            .into_iter()
            .map(|line| codec.decode(&line))
            .collect::<Result<Vec<_>>>()?;
        let inserted = self.build_from_points(&points)?;

        debug!(
            source = %source.name(),
            inserted,
            num_items = self.num_items,
            "built tree from line source"
        );
        Ok(inserted)
    }

    /// Write the serialized tree to `sink`, one token per line. Returns the number of lines.
    pub fn save<K, C>(&self, sink: &mut K, codec: &C) -> Result<usize>
    where
        K: LineSink,
        C: PointCodec<N>,
    {
        let lines: Vec<String> = self
            .serialize()?
            .iter()
            .map(|token| token.encode(codec))
            .collect();
        sink.write_lines(&lines)?;

        debug!(
            num_items = self.num_items,
            lines = lines.len(),
            "saved tree"
        );
        Ok(lines.len())
    }

    /// Read a tree previously written by [`KdTree::save`].
    pub fn load<S, C>(dimension: usize, source: &S, codec: &C) -> Result<Self>
    where
        S: LineSource,
        C: PointCodec<N>,
    {
        let tokens = records(source)?
            .iter()
            .map(|line| Token::decode(line, codec))
            .collect::<Result<Vec<_>>>()?;
        let tree = Self::deserialize(dimension, tokens)?;

        debug!(
            source = %source.name(),
            dimension,
            num_items = tree.num_items,
            coordinate = N::TYPE_NAME,
            "loaded tree"
        );
        Ok(tree)
    }

    /// Answer one nearest-neighbor query per non-blank line of `queries`, writing one result line
    /// per query to `results`.
    ///
    /// Each result line is the closest point, an empty spacer field, and the Euclidean distance:
    /// `1,2,3, ,0.5`. Any malformed query fails the whole batch before anything is written.
    /// Returns the number of queries answered.
    pub fn nearest_neighbor_lines<S, K, C>(
        &self,
        queries: &S,
        results: &mut K,
        codec: &C,
    ) -> Result<usize>
    where
        S: LineSource,
        K: LineSink,
        C: PointCodec<N>,
    {
        let points = records(queries)?
            .into_iter()
            .map(|line| codec.decode(&line))
            .collect::<Result<Vec<_>>>()?;

        let lines: Vec<String> = self
            .nearest_neighbor_batch(&points)?
            .into_iter()
            .map(|neighbor| {
                format!(
                    "{},{},{}",
                    codec.encode(neighbor.point),
                    RESULT_SPACER,
                    codec.encode(&[neighbor.distance])
                )
            })
            .collect();
        results.write_lines(&lines)?;

        debug!(
            source = %queries.name(),
            queries = lines.len(),
            "answered nearest-neighbor batch"
        );
        Ok(lines.len())
    }
}

/// The non-blank lines of a source; a source with none is unavailable.
fn records<S: LineSource>(source: &S) -> Result<Vec<String>> {
    let lines: Vec<String> = source
        .read_lines()?
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return Err(KdTreeError::SourceUnavailable {
            name: source.name(),
            source: None,
        });
    }
    Ok(lines)
}
