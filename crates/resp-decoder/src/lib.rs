#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod streaming;

mod source;

pub use config::{DEFAULT_BUFFER_CAPACITY, DecoderConfig, DecoderLimits};
pub use decoder::{Frames, RespDecoder, decode_bytes, decode_one, decode_pipeline};
pub use error::DecodeError;
pub use streaming::StreamingDecoder;
