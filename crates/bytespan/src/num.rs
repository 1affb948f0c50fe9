//! Overflow-safe parsing of numeric text held in byte spans.
//!
//! Overview
//! - The integer path is a single cursor-driven scan shared by every target
//!   width: it accumulates an unsigned 64-bit magnitude with checked
//!   arithmetic, tracks sign and validity, and only afterwards converts to
//!   the requested width through the [`ToNumber`] bound table. Overflow of
//!   the accumulator or of the target width is an error, never a wrap.
//! - The float path owns the surrounding policy (whitespace, strict
//!   trailing content, leading-character rules) but delegates the actual
//!   digit-to-binary conversion to the standard library's `str::parse`,
//!   handing it exactly the longest strtod-shaped prefix it measured.
//! - Callers pick their failure mode per call: propagate with `?`, turn an
//!   invalid parse into an absent value with `ok()`, or substitute a
//!   default with `unwrap_or`.
#![allow(clippy::struct_excessive_bools)]

use bstr::ByteSlice;

use crate::{error::ParseNumberError, span::Span};

/// Policy knobs for numeric text parsing.
///
/// # Examples
///
/// ```rust
/// use bytespan::{ParseOptions, Span};
///
/// let options = ParseOptions {
///     allow_prefix: true,
///     ..ParseOptions::default()
/// };
/// let span = Span::from_slice(&b"0x123abc"[..]);
/// assert_eq!(span.parse_number_with::<u32>(&options), Ok(0x0012_3abc));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Numeric base for integer parsing: `2..=36`, or `62`.
    ///
    /// Base 62 uses the alphabet `0-9`, `a-z` (10..=35), `A-Z` (36..=61);
    /// every other base treats upper- and lowercase letters alike.
    ///
    /// # Default
    ///
    /// `10`
    pub base: u32,

    /// Whether ASCII whitespace may surround the number.
    ///
    /// When `true`, leading and trailing whitespace is skipped. When
    /// `false`, input starting with whitespace is invalid.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_whitespace: bool,

    /// Whether `_` may group digits, as in `1_000_000`.
    ///
    /// An underscore is only accepted after a digit and never doubled; it
    /// contributes nothing to the value.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_underscore: bool,

    /// Whether a `0b`/`0x` prefix overrides the base (and a bare leading
    /// `0` selects base 8).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_prefix: bool,

    /// Whether the entire (whitespace-trimmed) input must be consumed.
    ///
    /// When `false`, a valid leading prefix is accepted and the remainder
    /// ignored.
    ///
    /// # Default
    ///
    /// `true`
    pub strict: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            base: 10,
            allow_whitespace: true,
            allow_underscore: false,
            allow_prefix: false,
            strict: true,
        }
    }
}

/// Integer widths the parser can produce.
///
/// One generic scan does all the digit work; this trait only supplies the
/// per-width magnitude bounds and the final sign application. Implemented
/// for `i8`/`i16`/`i32`/`i64` and `u8`/`u16`/`u32`/`u64`.
pub trait ToNumber: Sized + Copy {
    /// Largest magnitude representable as a non-negative value.
    const MAX_POSITIVE: u64;
    /// Largest magnitude representable as a negative value; `0` for
    /// unsigned targets.
    const MAX_NEGATIVE: u64;

    /// Builds the value from a magnitude already checked against the
    /// bounds above.
    #[doc(hidden)]
    fn from_magnitude(magnitude: u64, negative: bool) -> Self;
}

macro_rules! to_number_signed {
    ($($t:ty)*) => {$(
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        impl ToNumber for $t {
            const MAX_POSITIVE: u64 = <$t>::MAX as u64;
            const MAX_NEGATIVE: u64 = <$t>::MAX as u64 + 1;

            fn from_magnitude(magnitude: u64, negative: bool) -> Self {
                if negative {
                    (magnitude.wrapping_neg() as i64) as $t
                } else {
                    magnitude as $t
                }
            }
        }
    )*};
}

macro_rules! to_number_unsigned {
    ($($t:ty)*) => {$(
        #[allow(clippy::cast_possible_truncation)]
        impl ToNumber for $t {
            const MAX_POSITIVE: u64 = <$t>::MAX as u64;
            const MAX_NEGATIVE: u64 = 0;

            fn from_magnitude(magnitude: u64, _negative: bool) -> Self {
                magnitude as $t
            }
        }
    )*};
}

to_number_signed! { i8 i16 i32 i64 }
to_number_unsigned! { u8 u16 u32 u64 }

impl Span<'_, u8> {
    /// Parses the span as an integer of width `T` with default options.
    ///
    /// ```rust
    /// use bytespan::Span;
    ///
    /// assert_eq!(Span::from_slice(&b"-42"[..]).parse_number::<i8>(), Ok(-42));
    /// ```
    pub fn parse_number<T: ToNumber>(&self) -> Result<T, ParseNumberError> {
        self.parse_number_with(&ParseOptions::default())
    }

    /// Parses the span as an integer of width `T`.
    ///
    /// Fails with [`ParseNumberError::InvalidBase`] for an unsupported base
    /// and [`ParseNumberError::InvalidNumber`] when no digits are found,
    /// trailing content remains in strict mode, or the value does not fit
    /// `T`.
    pub fn parse_number_with<T: ToNumber>(
        &self,
        options: &ParseOptions,
    ) -> Result<T, ParseNumberError> {
        let state = scan_integer(self.as_slice(), options)?;
        if state.invalid {
            return Err(ParseNumberError::InvalidNumber);
        }
        let bound = if state.negative {
            T::MAX_NEGATIVE
        } else {
            T::MAX_POSITIVE
        };
        if state.magnitude > bound {
            return Err(ParseNumberError::InvalidNumber);
        }
        Ok(T::from_magnitude(state.magnitude, state.negative))
    }

    /// Parses the span as an `f64` with default options.
    pub fn parse_f64(&self) -> Result<f64, ParseNumberError> {
        self.parse_f64_with(&ParseOptions::default())
    }

    /// Parses the span as an `f64`.
    ///
    /// Only `allow_whitespace` and `strict` apply here; base, underscores
    /// and prefixes are integer-only concerns. The digit-to-binary
    /// conversion itself is delegated to `str::parse::<f64>` over the
    /// measured numeric prefix.
    pub fn parse_f64_with(&self, options: &ParseOptions) -> Result<f64, ParseNumberError> {
        float_lexeme(self.as_slice(), options)?
            .parse::<f64>()
            .map_err(|_| ParseNumberError::InvalidNumber)
    }

    /// Parses the span as an `f32` with default options.
    pub fn parse_f32(&self) -> Result<f32, ParseNumberError> {
        self.parse_f32_with(&ParseOptions::default())
    }

    /// Parses the span as an `f32`; see [`parse_f64_with`].
    ///
    /// [`parse_f64_with`]: Span::parse_f64_with
    pub fn parse_f32_with(&self, options: &ParseOptions) -> Result<f32, ParseNumberError> {
        float_lexeme(self.as_slice(), options)?
            .parse::<f32>()
            .map_err(|_| ParseNumberError::InvalidNumber)
    }
}

/// Transient accumulator for one integer scan. Once `invalid` is set the
/// state is terminal; no further accumulation happens.
struct ParseState {
    magnitude: u64,
    negative: bool,
    invalid: bool,
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.bump();
        }
    }
}

fn scan_integer(bytes: &[u8], options: &ParseOptions) -> Result<ParseState, ParseNumberError> {
    if !matches!(options.base, 2..=36 | 62) {
        return Err(ParseNumberError::InvalidBase(options.base));
    }

    let mut cursor = Cursor::new(bytes);
    if options.allow_whitespace {
        cursor.skip_whitespace();
    }

    let mut state = ParseState {
        magnitude: 0,
        negative: false,
        invalid: false,
    };
    match cursor.peek() {
        Some(b'+') => cursor.bump(),
        Some(b'-') => {
            state.negative = true;
            cursor.bump();
        }
        _ => {}
    }

    let mut base = u64::from(options.base);
    let mut found_digit = false;
    if cursor.peek() == Some(b'0') {
        cursor.bump();
        if options.allow_prefix {
            match cursor.peek() {
                Some(b'b' | b'B') => {
                    base = 2;
                    cursor.bump();
                }
                Some(b'x' | b'X') => {
                    base = 16;
                    cursor.bump();
                }
                // Bare leading zero selects octal; the next byte is left in
                // place and no digit has been counted yet.
                _ => base = 8,
            }
        } else {
            found_digit = true;
        }
    }

    let mut prev_underscore = false;
    loop {
        match cursor.peek() {
            Some(b'_') => {
                // Only between digits: never leading, never doubled.
                if !options.allow_underscore || !found_digit || prev_underscore {
                    break;
                }
                prev_underscore = true;
                cursor.bump();
            }
            Some(byte) => {
                let Some(digit) = digit_value(byte, base) else {
                    break;
                };
                let Some(next) = state
                    .magnitude
                    .checked_mul(base)
                    .and_then(|m| m.checked_add(digit))
                else {
                    state.invalid = true;
                    break;
                };
                state.magnitude = next;
                found_digit = true;
                prev_underscore = false;
                cursor.bump();
            }
            None => break,
        }
    }

    if state.invalid {
        return Ok(state);
    }
    if !found_digit {
        state.invalid = true;
        return Ok(state);
    }
    if !cursor.at_end() {
        if options.allow_whitespace {
            cursor.skip_whitespace();
        }
        if options.strict && !cursor.at_end() {
            state.invalid = true;
        }
    }
    Ok(state)
}

fn digit_value(byte: u8, base: u64) -> Option<u64> {
    let value = match byte {
        b'0'..=b'9' => u64::from(byte - b'0'),
        b'a'..=b'z' => u64::from(byte - b'a') + 10,
        b'A'..=b'Z' if base == 62 => u64::from(byte - b'A') + 36,
        b'A'..=b'Z' => u64::from(byte - b'A') + 10,
        _ => return None,
    };
    (value < base).then_some(value)
}

/// Applies the whitespace and strict-trailing policy, then returns the
/// longest strtod-shaped numeric prefix for the delegate to convert.
fn float_lexeme<'a>(
    bytes: &'a [u8],
    options: &ParseOptions,
) -> Result<&'a str, ParseNumberError> {
    let mut cursor = Cursor::new(bytes);
    if options.allow_whitespace {
        cursor.skip_whitespace();
    } else if matches!(cursor.peek(), Some(b) if !b.is_ascii_digit() && b != b'+' && b != b'-' && b != b'.')
    {
        return Err(ParseNumberError::InvalidNumber);
    }

    let start = cursor.pos;
    let consumed = measure_float(&bytes[start..]);
    if consumed == 0 {
        return Err(ParseNumberError::InvalidNumber);
    }
    cursor.pos = start + consumed;
    if !cursor.at_end() {
        if options.allow_whitespace {
            cursor.skip_whitespace();
        }
        if options.strict && !cursor.at_end() {
            return Err(ParseNumberError::InvalidNumber);
        }
    }

    // The measured prefix is pure ASCII.
    bytes[start..start + consumed]
        .to_str()
        .map_err(|_| ParseNumberError::InvalidNumber)
}

/// Number of leading bytes forming a valid float lexeme: optional sign,
/// decimal digits with optional fraction and exponent, or one of the
/// `inf`/`infinity`/`nan` forms. Zero means no numeric prefix at all.
fn measure_float(bytes: &[u8]) -> usize {
    let mut pos = 0;
    if matches!(bytes.first().copied(), Some(b'+' | b'-')) {
        pos += 1;
    }
    if let Some(named) = measure_named_float(&bytes[pos..]) {
        return pos + named;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;
    if bytes.get(pos) == Some(&b'.') {
        let frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits == 0 && frac_digits == 0 {
            return 0;
        }
        pos += 1 + frac_digits;
    } else if int_digits == 0 {
        return 0;
    }

    // An exponent counts only when at least one digit follows it;
    // otherwise the delegate would reject the whole lexeme.
    if matches!(bytes.get(pos).copied(), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(bytes.get(exp_pos).copied(), Some(b'+' | b'-')) {
            exp_pos += 1;
        }
        let exp_digits = count_digits(&bytes[exp_pos..]);
        if exp_digits > 0 {
            pos = exp_pos + exp_digits;
        }
    }
    pos
}

fn measure_named_float(bytes: &[u8]) -> Option<usize> {
    for name in [b"infinity".as_slice(), b"inf".as_slice(), b"nan".as_slice()] {
        if bytes.len() >= name.len() && bytes[..name.len()].eq_ignore_ascii_case(name) {
            return Some(name.len());
        }
    }
    None
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
