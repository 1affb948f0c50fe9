//! Bounds-checked views over contiguous memory, plus the two byte-level
//! algorithms most systems code wants on top of them: a hex codec
//! (compact string and classic 16-byte-per-line dump) and an
//! overflow-safe numeric text parser (bases 2–36 and 62, prefixes,
//! underscore grouping, strict and prefix-accepting modes).
//!
//! The central type is [`Span`], a fixed-length handle over a run of
//! elements. Every access is range-checked, a span constructed as
//! read-only rejects mutation at runtime, and sub-spans alias their
//! parent's storage without owning it. The codec and parser are pure
//! functions over byte spans.
//!
//! ```rust
//! use bytespan::Span;
//!
//! let span = Span::from_slice(b"12345");
//! assert_eq!(span.parse_number::<i32>(), Ok(12345));
//! assert_eq!(span.to_hex_string(), "3132333435");
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod hex;
mod num;
mod span;

#[cfg(test)]
mod tests;

pub use error::{FromHexError, ParseNumberError, SpanError};
pub use hex::from_hex;
pub use num::{ParseOptions, ToNumber};
pub use span::Span;
