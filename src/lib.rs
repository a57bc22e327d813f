//! Recovery-oriented decoder for a legacy, length-prefixed text
//! serialization format.
//!
//! Blobs in this format were persisted through lossy re-encoding and
//! column truncation, so declared lengths routinely disagree with the
//! real content. [`decode`] extracts a best-effort ordered map anyway,
//! carrying every non-fatal problem inside the returned [`Decoded`]
//! instead of failing the call.

mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod value;

pub use crate::decode::{
    decode, decode_to_json, decode_to_json_with_options, decode_with_options,
};
pub use crate::encode::encode;
pub use crate::error::Error;
pub use crate::options::DecodeOptions;
pub use crate::value::{Decoded, Map, RecoveryNote, Resync, Value};

pub type Result<T> = std::result::Result<T, Error>;
