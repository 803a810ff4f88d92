//! The scanner and its read-ahead buffer.

mod buffer;
mod core;

pub use self::core::Scanner;
