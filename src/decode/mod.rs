mod builder;
mod flatten;
mod scanner;
mod token;
mod tree;

use crate::options::DecodeOptions;
use crate::value::{Decoded, Map, Value};
use crate::Result;

/// Decodes one serialized blob into an ordered map, recovering what it
/// can from corrupted input.
///
/// Every recoverable problem — declared lengths out of step with the
/// real terminators, input cut off mid-structure, leaves replaced by the
/// anomaly placeholder — is reported inside the returned [`Decoded`].
/// Only an unrecognized tag or a non-array root fails the call.
///
/// # Examples
/// ```
/// let decoded = phpser::decode("a:2:{s:3:\"foo\";s:3:\"bar\";}")?;
/// assert_eq!(
///     decoded.value.get("foo").and_then(|v| v.as_str()),
///     Some("bar"),
/// );
/// assert!(!decoded.truncated);
/// # Ok::<(), phpser::Error>(())
/// ```
pub fn decode(input: &str) -> Result<Decoded> {
    decode_with_options(input, &DecodeOptions::default())
}

pub fn decode_with_options(input: &str, options: &DecodeOptions) -> Result<Decoded> {
    let outcome = builder::build(input, options)?;
    let value = match outcome.root {
        Some(root) => Value::Map(flatten::flatten(&outcome.tree, root)),
        // Empty input decodes to an empty map.
        None => Value::Map(Map::new()),
    };
    Ok(Decoded {
        value,
        truncated: outcome.truncated,
        notes: outcome.notes,
    })
}

/// Decodes a blob straight to a [`serde_json::Value`], in insertion
/// order. Truncation and recovery notes are dropped; use
/// [`decode`] when the caller needs to tally them.
pub fn decode_to_json(input: &str) -> Result<serde_json::Value> {
    decode_to_json_with_options(input, &DecodeOptions::default())
}

pub fn decode_to_json_with_options(
    input: &str,
    options: &DecodeOptions,
) -> Result<serde_json::Value> {
    Ok(decode_with_options(input, options)?.value.to_json())
}
