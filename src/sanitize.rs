//! Sanitization of raw export bytes.
//!
//! Real-world exports carry stray control characters pasted into guide
//! content from word processors and OCR tools. Strict XML parsers reject
//! them, so [`clean`] strips the known offenders before decoding.

use std::borrow::Cow;

use memchr::memchr3;

/// Control characters stripped from raw exports: SOH, ETX, VT, FF, DC2, DC3.
///
/// Tab, newline, and carriage return are legal XML whitespace and pass
/// through untouched.
const STRIPPED: [u8; 6] = [0x01, 0x03, 0x0B, 0x0C, 0x12, 0x13];

/// Remove blacklisted control characters from a raw export.
///
/// Returns the input borrowed, without allocating, when none of the six
/// codes occur. Total over arbitrary byte sequences (including empty input)
/// and idempotent. All six codes are below 0x80 while UTF-8 continuation
/// bytes are 0x80 and above, so byte-level scanning can never split a
/// multi-byte character.
///
/// # Examples
///
/// ```
/// use lgx::clean;
///
/// assert_eq!(clean(b"a\x01b\x13c").as_ref(), b"abc");
/// assert_eq!(clean("caf\u{e9}\ttab".as_bytes()).as_ref(), "caf\u{e9}\ttab".as_bytes());
/// ```
pub fn clean(src: &[u8]) -> Cow<'_, [u8]> {
    let Some(first) = find_stripped(src) else {
        return Cow::Borrowed(src);
    };

    let mut out = Vec::with_capacity(src.len() - 1);
    out.extend_from_slice(&src[..first]);
    let mut rest = &src[first + 1..];
    while let Some(i) = find_stripped(rest) {
        out.extend_from_slice(&rest[..i]);
        rest = &rest[i + 1..];
    }
    out.extend_from_slice(rest);
    Cow::Owned(out)
}

/// Position of the first blacklisted byte, if any.
///
/// memchr scans for at most three needles at a time, so the six-byte
/// blacklist takes two passes.
fn find_stripped(src: &[u8]) -> Option<usize> {
    let low = memchr3(STRIPPED[0], STRIPPED[1], STRIPPED[2], src);
    let high = memchr3(STRIPPED[3], STRIPPED[4], STRIPPED[5], src);
    match (low, high) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
