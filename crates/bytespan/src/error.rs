use thiserror::Error;

/// Failures raised by [`Span`](crate::Span) accessors and bulk operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanError {
    /// An index or sub-range argument fell outside `[0, len)`.
    ///
    /// `index` is the value after negative-index normalization, so a caller
    /// passing `-1` to an empty span sees `index: -1` unchanged only when
    /// normalization could not bring it in range.
    #[error("index {index} out of range for span of length {len}")]
    OutOfRange {
        /// Normalized index (or requested length for bulk operations).
        index: isize,
        /// Length of the span the access was attempted on.
        len: usize,
    },
    /// A mutating operation was attempted on a read-only span.
    #[error("span is read-only")]
    ReadOnly,
}

/// Failures raised by the numeric text parser.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseNumberError {
    /// The requested base is outside `2..=36` and is not `62`.
    #[error("invalid base {0}, expected 2..=36 or 62")]
    InvalidBase(u32),
    /// No digits were found, trailing content remained in strict mode, or
    /// the value overflowed the accumulator or the target width.
    #[error("invalid number")]
    InvalidNumber,
}

/// Failures raised when decoding a hex string back into bytes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FromHexError {
    /// The input length is odd; hex encodes each byte as exactly two digits.
    #[error("hex string has odd length {0}")]
    OddLength(usize),
    /// A byte outside `0-9a-fA-F` was encountered.
    #[error("invalid hex digit {byte:#04x} at index {index}")]
    InvalidDigit {
        /// The offending input byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },
}
