//! Fitting comment text into the cell byte budget.

use std::fmt;

/// How text longer than the budget is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncationMode {
    /// Cut at the last UTF-8 character boundary that fits.
    #[default]
    CodePoint,
    /// Cut at the raw byte limit, possibly inside a multi-byte character.
    ///
    /// Matches wallets that slice the encoded bytes directly.
    Bytes,
}

impl fmt::Display for TruncationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruncationMode::CodePoint => write!(f, "code-point"),
            TruncationMode::Bytes => write!(f, "bytes"),
        }
    }
}

/// Text bytes after fitting them to a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncated<'a> {
    /// The bytes that fit.
    pub bytes: &'a [u8],
    /// Whether anything was dropped.
    pub truncated: bool,
}

/// Fit `text` into at most `max` bytes of UTF-8.
///
/// # Example
///
/// ```
/// use ton_memo::{truncate_utf8, TruncationMode};
///
/// // "é" is two bytes; a 4-byte budget cannot hold "aéé" whole
/// let cut = truncate_utf8("aéé", 4, TruncationMode::CodePoint);
/// assert_eq!(cut.bytes, "aé".as_bytes());
/// assert!(cut.truncated);
///
/// let raw = truncate_utf8("aéé", 4, TruncationMode::Bytes);
/// assert_eq!(raw.bytes.len(), 4);
/// ```
pub fn truncate_utf8(text: &str, max: usize, mode: TruncationMode) -> Truncated<'_> {
    let bytes = text.as_bytes();
    if bytes.len() <= max {
        return Truncated {
            bytes,
            truncated: false,
        };
    }

    let end = match mode {
        TruncationMode::Bytes => max,
        // Index 0 is always a boundary, so this cannot fall through
        TruncationMode::CodePoint => (0..=max)
            .rev()
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(0),
    };

    Truncated {
        bytes: &bytes[..end],
        truncated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        let cut = truncate_utf8("hello", 123, TruncationMode::CodePoint);
        assert_eq!(cut.bytes, b"hello");
        assert!(!cut.truncated);
    }

    #[test]
    fn test_exact_budget_not_truncated() {
        let text = "a".repeat(123);
        let cut = truncate_utf8(&text, 123, TruncationMode::CodePoint);
        assert_eq!(cut.bytes.len(), 123);
        assert!(!cut.truncated);
    }

    #[test]
    fn test_ascii_overflow_cut_at_budget() {
        let text = "b".repeat(124);
        for mode in [TruncationMode::CodePoint, TruncationMode::Bytes] {
            let cut = truncate_utf8(&text, 123, mode);
            assert_eq!(cut.bytes.len(), 123);
            assert!(cut.truncated);
        }
    }

    #[test]
    fn test_code_point_boundary_respected() {
        // 122 ASCII bytes followed by a 4-byte emoji straddling the limit
        let text = format!("{}{}", "a".repeat(122), "\u{1F600}");
        let cut = truncate_utf8(&text, 123, TruncationMode::CodePoint);
        assert_eq!(cut.bytes.len(), 122);
        assert!(std::str::from_utf8(cut.bytes).is_ok());
        assert!(cut.truncated);
    }

    #[test]
    fn test_byte_mode_splits_code_point() {
        let text = format!("{}{}", "a".repeat(122), "\u{1F600}");
        let cut = truncate_utf8(&text, 123, TruncationMode::Bytes);
        assert_eq!(cut.bytes.len(), 123);
        assert!(std::str::from_utf8(cut.bytes).is_err());
    }

    #[test]
    fn test_multibyte_text_cut_to_whole_chars() {
        // Cyrillic letters are 2 bytes each; 62 of them need 124 bytes
        let text = "ж".repeat(62);
        let cut = truncate_utf8(&text, 123, TruncationMode::CodePoint);
        assert_eq!(cut.bytes.len(), 122);
        assert_eq!(std::str::from_utf8(cut.bytes).unwrap(), "ж".repeat(61));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(TruncationMode::CodePoint.to_string(), "code-point");
        assert_eq!(TruncationMode::Bytes.to_string(), "bytes");
        assert_eq!(TruncationMode::default(), TruncationMode::CodePoint);
    }
}
