//! Binary-to-text rendering for byte spans.
//!
//! Two renderings are provided: a compact lowercase hex string (two digits
//! per byte, no separators) and the classic 16-bytes-per-line hex dump with
//! an offset column and an ASCII gutter. Both allocate their exact output
//! size up front and never fail for a valid span. [`from_hex`] is the strict
//! inverse of [`Span::to_hex_string`].

use alloc::{string::String, vec::Vec};

use crate::{error::FromHexError, span::Span};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

const BYTES_PER_LINE: usize = 16;

// offset(8) + 2 spaces + hex column(16 pairs, one space each, plus the
// mid-group space after the 8th pair = 49) + 1 space + ascii + newline.
const LINE_OVERHEAD: usize = 8 + 2 + 3 * BYTES_PER_LINE + 1 + 1 + 1;

impl Span<'_, u8> {
    /// Renders the span as `2 * len` lowercase hex characters, high nibble
    /// first.
    ///
    /// ```rust
    /// use bytespan::Span;
    ///
    /// assert_eq!(Span::from_slice(&[0xde, 0xad][..]).to_hex_string(), "dead");
    /// ```
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        let mut out = Vec::with_capacity(self.len() * 2);
        for &byte in self {
            out.push(HEX_DIGITS[usize::from(byte >> 4)]);
            out.push(HEX_DIGITS[usize::from(byte & 0x0f)]);
        }
        // Only ASCII hex digits were pushed.
        unsafe { String::from_utf8_unchecked(out) }
    }

    /// Renders the span as a multi-line hex dump, 16 bytes per line.
    ///
    /// Each line holds an 8-digit hex offset, the 16 byte pairs separated by
    /// single spaces with an extra space after the 8th, and an ASCII column
    /// where bytes in the printable range 33..=126 appear as themselves and
    /// everything else (including space) appears as `.`. A final partial
    /// line pads the hex column so the ASCII column stays aligned. An empty
    /// span renders as the empty string; every emitted line ends in `\n`.
    #[must_use]
    pub fn to_hex_dump(&self) -> String {
        let bytes = self.as_slice();
        if bytes.is_empty() {
            return String::new();
        }

        let full_lines = bytes.len() / BYTES_PER_LINE;
        let tail = bytes.len() % BYTES_PER_LINE;
        let mut size = full_lines * (LINE_OVERHEAD + BYTES_PER_LINE);
        if tail > 0 {
            size += LINE_OVERHEAD + tail;
        }

        let mut out = Vec::with_capacity(size);
        for (line, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
            push_offset(&mut out, line * BYTES_PER_LINE);
            out.push(b' ');
            out.push(b' ');
            for i in 0..BYTES_PER_LINE {
                match chunk.get(i) {
                    Some(&byte) => {
                        out.push(HEX_DIGITS[usize::from(byte >> 4)]);
                        out.push(HEX_DIGITS[usize::from(byte & 0x0f)]);
                    }
                    None => {
                        out.push(b' ');
                        out.push(b' ');
                    }
                }
                out.push(b' ');
                if i == BYTES_PER_LINE / 2 - 1 {
                    out.push(b' ');
                }
            }
            out.push(b' ');
            for &byte in chunk {
                out.push(if (33..=126).contains(&byte) { byte } else { b'.' });
            }
            out.push(b'\n');
        }
        debug_assert_eq!(out.len(), size);
        // Only ASCII was pushed.
        unsafe { String::from_utf8_unchecked(out) }
    }
}

// Fixed-width offset column; dumps past 4 GiB wrap in the display only.
fn push_offset(out: &mut Vec<u8>, offset: usize) {
    for shift in (0..8).rev() {
        out.push(HEX_DIGITS[(offset >> (shift * 4)) & 0x0f]);
    }
}

/// Decodes a hex string (as produced by [`Span::to_hex_string`], either
/// nibble case accepted) back into an owned byte span.
///
/// Fails with [`FromHexError::OddLength`] if the input does not pair up and
/// [`FromHexError::InvalidDigit`] at the first byte outside `0-9a-fA-F`.
pub fn from_hex(input: &str) -> Result<Span<'static, u8>, FromHexError> {
    let bytes = input.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(FromHexError::OddLength(bytes.len()));
    }
    let mut out = Vec::with_capacity(bytes.len() / 2);
    for (pair_index, pair) in bytes.chunks_exact(2).enumerate() {
        let hi = nibble(pair[0]).ok_or(FromHexError::InvalidDigit {
            byte: pair[0],
            index: pair_index * 2,
        })?;
        let lo = nibble(pair[1]).ok_or(FromHexError::InvalidDigit {
            byte: pair[1],
            index: pair_index * 2 + 1,
        })?;
        out.push(hi << 4 | lo);
    }
    Ok(Span::from_vec(out))
}

fn nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
