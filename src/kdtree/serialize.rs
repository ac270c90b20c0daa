//! Shape-preserving token encoding of a KdTree.
//!
//! A tree is written in pre-order: every node emits one [`Token::Point`] and every absent child
//! emits one [`Token::Null`]. A tree with `n` nodes therefore encodes to `n` point tokens and
//! `n + 1` null tokens, and the stream alone determines the shape.

use tracing::{trace, warn};

use crate::codec::{PointCodec, NULL_TOKEN};
use crate::error::{KdTreeError, Result};
use crate::kdtree::{KdTree, Node};
use crate::r#type::Coordinate;

/// One entry of a serialized tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<N: Coordinate> {
    /// A node holding this point.
    Point(Vec<N>),
    /// No subtree in this position.
    Null,
}

impl<N: Coordinate> Token<N> {
    /// Render this token as one line of text.
    pub fn encode<C: PointCodec<N>>(&self, codec: &C) -> String {
        match self {
            Self::Point(point) => codec.encode(point),
            Self::Null => NULL_TOKEN.to_string(),
        }
    }

    /// Parse one line of text into a token.
    pub fn decode<C: PointCodec<N>>(line: &str, codec: &C) -> Result<Self> {
        if line.trim() == NULL_TOKEN {
            Ok(Self::Null)
        } else {
            codec.decode(line).map(Self::Point)
        }
    }
}

/// A node whose subtrees are still being read.
struct Pending<N: Coordinate> {
    node: Box<Node<N>>,
    left_done: bool,
}

impl<N: Coordinate> KdTree<N> {
    /// Encode this tree as a pre-order token stream.
    ///
    /// Fails with [`KdTreeError::EmptyTree`] when there is nothing to encode.
    pub fn serialize(&self) -> Result<Vec<Token<N>>> {
        let root = self.root.as_deref().ok_or(KdTreeError::EmptyTree)?;

        let mut tokens = Vec::with_capacity(2 * self.num_items + 1);
        let mut stack: Vec<Option<&Node<N>>> = vec![Some(root)];
        while let Some(slot) = stack.pop() {
            match slot {
                Some(node) => {
                    tokens.push(Token::Point(node.point.clone()));
                    // Note: pushed in backwards order to what gets popped
                    stack.push(node.right());
                    stack.push(node.left());
                }
                None => tokens.push(Token::Null),
            }
        }

        Ok(tokens)
    }

    /// Rebuild a tree from a token stream produced by [`KdTree::serialize`].
    ///
    /// Tokens are consumed with a single forward cursor. A point is followed by the encoding of
    /// its left subtree and then its right subtree. Running out of tokens before the structure is
    /// complete is a [`KdTreeError::TruncatedStream`]; tokens left after it is complete are
    /// ignored. A stream holding a single null token decodes to an empty tree.
    pub fn deserialize<I>(dimension: usize, tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = Token<N>>,
    {
        let mut tree = Self::new(dimension);
        let mut tokens = tokens.into_iter();
        let mut consumed = 0;
        let mut stack: Vec<Pending<N>> = Vec::new();

        let root = 'decode: loop {
            let token = tokens
                .next()
                .ok_or(KdTreeError::TruncatedStream { consumed })?;
            consumed += 1;

            let mut subtree = match token {
                Token::Point(point) => {
                    tree.check_dimension(&point)?;
                    tree.num_items += 1;
                    stack.push(Pending {
                        node: Box::new(Node::new(point)),
                        left_done: false,
                    });
                    continue;
                }
                Token::Null => None,
            };

            // Hand the finished subtree to the innermost pending node. A node whose right side is
            // now complete is itself a finished subtree for its parent.
            loop {
                let Some(mut parent) = stack.pop() else {
                    break 'decode subtree;
                };
                if !parent.left_done {
                    parent.node.left = subtree;
                    parent.left_done = true;
                    stack.push(parent);
                    continue 'decode;
                }
                parent.node.right = subtree;
                subtree = Some(parent.node);
            }
        };
        tree.root = root;

        let trailing = tokens.count();
        if trailing > 0 {
            warn!(consumed, trailing, "ignoring tokens after the end of the tree");
        }
        trace!(
            dimension,
            num_items = tree.num_items,
            consumed,
            "deserialized tree"
        );

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DelimitedCodec;

    #[test]
    fn tokens_round_trip_through_text() {
        let codec = DelimitedCodec::default();
        let point = Token::Point(vec![1.5f64, -2.0, 0.1]);
        let line = point.encode(&codec);
        assert_eq!(line, "1.5,-2,0.1");
        assert_eq!(Token::decode(&line, &codec).unwrap(), point);

        let null: Token<f64> = Token::Null;
        assert_eq!(null.encode(&codec), "nullptr");
        assert_eq!(Token::<f64>::decode(" nullptr ", &codec).unwrap(), Token::Null);
    }

    #[test]
    fn lone_null_token_is_an_empty_tree() {
        let tree = KdTree::<f64>::deserialize(2, vec![Token::Null]).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn empty_stream_is_truncated() {
        let err = KdTree::<f64>::deserialize(2, Vec::new()).unwrap_err();
        assert!(matches!(err, KdTreeError::TruncatedStream { consumed: 0 }));
    }

    #[test]
    fn wrong_dimension_token_is_rejected() {
        let tokens = vec![Token::Point(vec![1.0f64, 2.0, 3.0]), Token::Null, Token::Null];
        let err = KdTree::deserialize(2, tokens).unwrap_err();
        assert!(matches!(
            err,
            KdTreeError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let tokens = vec![
            Token::Point(vec![1.0f64]),
            Token::Null,
            Token::Null,
            Token::Point(vec![9.0]),
        ];
        let tree = KdTree::deserialize(1, tokens).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&[1.0][..]]);
    }
}
