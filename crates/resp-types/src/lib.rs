#![warn(clippy::pedantic)]

pub mod frame;

pub use frame::{Frame, NULL_BULK, SimpleKind};
