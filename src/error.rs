use thiserror::Error;

/// Fatal decode failures.
///
/// These are the only two conditions that abort a decode call. Every
/// recoverable problem — length mismatches, truncated input, leaves
/// replaced by the anomaly placeholder — travels inside the returned
/// [`Decoded`](crate::Decoded) instead, so batch callers can keep
/// draining rows and tally the damage per record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A character in tag position that is neither a known type tag nor
    /// a closing brace. Offset counts characters from the start of the
    /// input.
    #[error("unknown tag {tag:?} at offset {offset}")]
    UnknownTag { tag: char, offset: usize },

    /// The outermost element of the input was not an array.
    #[error("root element is not an array")]
    RootNotArray,
}
