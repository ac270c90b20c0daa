//! Conversion between points and delimited text.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{KdTreeError, Result};
use crate::r#type::Coordinate;

/// The line that stands for an absent subtree in a serialized tree.
pub const NULL_TOKEN: &str = "nullptr";

/// Converts a point to and from one token of text.
pub trait PointCodec<N: Coordinate> {
    /// Render a point as text.
    fn encode(&self, point: &[N]) -> String;

    /// Parse a point from text.
    fn decode(&self, token: &str) -> Result<Vec<N>>;
}

/// Coordinates joined by a single ASCII delimiter character, without a trailing delimiter.
///
/// Every coordinate is written with the shortest decimal text that parses back to the identical
/// value, so whole numbers have no fractional part (`5`, not `5.0`). When decoding, whitespace
/// around each field is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedCodec {
    delimiter: u8,
}

impl DelimitedCodec {
    /// Create a codec splitting fields on `delimiter`.
    ///
    /// # Panics
    ///
    /// Panics if `delimiter` is not an ASCII character.
    pub fn new(delimiter: char) -> Self {
        assert!(delimiter.is_ascii(), "The delimiter must be an ASCII character.");
        Self {
            delimiter: delimiter as u8,
        }
    }

    /// The field delimiter.
    pub fn delimiter(&self) -> char {
        char::from(self.delimiter)
    }
}

impl Default for DelimitedCodec {
    fn default() -> Self {
        Self::new(',')
    }
}

impl<N: Coordinate> PointCodec<N> for DelimitedCodec {
    fn encode(&self, point: &[N]) -> String {
        let mut output = String::new();
        for (i, value) in point.iter().enumerate() {
            if i > 0 {
                output.push(char::from(self.delimiter));
            }
            output.push_str(&value.to_string());
        }
        output
    }

    fn decode(&self, token: &str) -> Result<Vec<N>> {
        let malformed = |reason: String| KdTreeError::PointCodec {
            token: token.to_string(),
            reason,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .quoting(false)
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .from_reader(token.as_bytes());
        let mut record = StringRecord::new();
        if !reader
            .read_record(&mut record)
            .map_err(|err| malformed(err.to_string()))?
        {
            return Err(malformed("no fields".to_string()));
        }

        record
            .iter()
            .map(|field| {
                field
                    .parse::<N>()
                    .map_err(|err| malformed(format!("field {:?}: {}", field, err)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_without_trailing_delimiter() {
        let codec = DelimitedCodec::default();
        assert_eq!(codec.encode(&[5.0f64]), "5");
        assert_eq!(codec.encode(&[1.0f64, 2.5, -3.25]), "1,2.5,-3.25");
        assert_eq!(DelimitedCodec::new(';').encode(&[1.0f32, 2.0]), "1;2");
    }

    #[test]
    fn decodes_with_surrounding_whitespace() {
        let codec = DelimitedCodec::default();
        let point: Vec<f64> = codec.decode(" 1.5 , 2,-3e2").unwrap();
        assert_eq!(point, vec![1.5, 2.0, -300.0]);
    }

    #[test]
    fn encoding_is_exact_for_both_widths() {
        let codec = DelimitedCodec::default();

        let values = [0.1f64, 1.0 / 3.0, f64::MIN_POSITIVE, 1e300, -123456.789e-10];
        let decoded: Vec<f64> = codec.decode(&codec.encode(&values)).unwrap();
        assert_eq!(decoded, values);

        let values = [0.1f32, 1.0 / 3.0, f32::MAX, 7.006492e-45];
        let decoded: Vec<f32> = codec.decode(&codec.encode(&values)).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let codec = DelimitedCodec::default();
        let err = PointCodec::<f64>::decode(&codec, "1,abc,3").unwrap_err();
        match err {
            KdTreeError::PointCodec { token, reason } => {
                assert_eq!(token, "1,abc,3");
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error {other:?}"),
        }

        assert!(PointCodec::<f64>::decode(&codec, "1,,3").is_err());
        assert!(PointCodec::<f64>::decode(&codec, "").is_err());
    }

    #[test]
    fn keeps_every_field_of_a_custom_delimiter() {
        let codec = DelimitedCodec::new(';');
        assert_eq!(codec.delimiter(), ';');
        let point: Vec<f32> = codec.decode("1.5; 2 ;-3").unwrap();
        assert_eq!(point, vec![1.5, 2.0, -3.0]);
        assert!(PointCodec::<f32>::decode(&codec, "1.5,2").is_err());
    }

    #[test]
    #[should_panic]
    fn rejects_non_ascii_delimiter() {
        DelimitedCodec::new('→');
    }
}
