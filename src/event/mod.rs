//! Key events and the byte decoder that produces them

mod decoder;
mod key;

pub use decoder::{KeyDecoder, MAX_SEQUENCE_LEN};
pub use key::Key;
