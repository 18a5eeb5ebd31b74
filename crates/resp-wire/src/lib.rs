#![warn(clippy::pedantic)]

pub mod error;
pub mod line;
pub mod tag;

pub use error::WireError;
pub use line::{CRLF, parse_count, simple_payload, validate_line};
pub use tag::Tag;
