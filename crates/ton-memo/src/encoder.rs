//! Memo to BoC payload encoding.

use tracing::debug;

use crate::boc::{BocLayout, SingleCellBoc};
use crate::cell::CommentCell;
use crate::truncate::TruncationMode;

/// Options for turning a memo into a payload.
///
/// The default encodes with code-point truncation, the compact header and no
/// checksum.
///
/// # Example
///
/// ```
/// use ton_memo::{BocLayout, CommentEncoder, TruncationMode};
///
/// let encoder = CommentEncoder::new()
///     .with_truncation(TruncationMode::Bytes)
///     .with_layout(BocLayout::Generic)
///     .with_crc(true);
///
/// let comment = encoder.encode("thanks for lunch");
/// assert!(!comment.truncated);
/// assert!(comment.to_base64().starts_with("te6cck"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentEncoder {
    truncation: TruncationMode,
    layout: BocLayout,
    with_crc: bool,
}

impl CommentEncoder {
    /// Create an encoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how over-long memos are cut.
    pub fn with_truncation(mut self, truncation: TruncationMode) -> Self {
        self.truncation = truncation;
        self
    }

    /// Set the BoC header layout.
    pub fn with_layout(mut self, layout: BocLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Enable or disable the CRC32-C trailer.
    pub fn with_crc(mut self, with_crc: bool) -> Self {
        self.with_crc = with_crc;
        self
    }

    /// Encode a memo.
    ///
    /// Never fails. Text beyond the 123-byte budget is dropped and reported
    /// through [`EncodedComment::truncated`].
    pub fn encode(&self, memo: &str) -> EncodedComment {
        let (cell, truncated) = CommentCell::from_text(memo, self.truncation);
        let text_len = cell.text_bytes().len();

        if truncated {
            debug!(
                "Comment truncated from {} to {} bytes ({} mode)",
                memo.len(),
                text_len,
                self.truncation
            );
        }

        let bytes = SingleCellBoc::from_root(cell)
            .with_layout(self.layout)
            .with_crc(self.with_crc)
            .serialize();

        EncodedComment {
            bytes,
            truncated,
            text_len,
        }
    }
}

/// A memo serialized as a single-cell BoC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedComment {
    /// Serialized BoC bytes.
    pub bytes: Vec<u8>,
    /// Whether the memo was cut to fit.
    pub truncated: bool,
    /// Number of memo bytes stored in the cell.
    pub text_len: usize,
}

impl EncodedComment {
    /// Base64 form handed to wallets as the message payload.
    pub fn to_base64(&self) -> String {
        base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &self.bytes)
    }
}

/// Encode a memo as a base64 single-cell BoC with default options.
///
/// Callers sending a transfer without a memo should not call this at all;
/// an empty memo still produces a (useless) comment cell.
pub fn encode(memo: &str) -> String {
    encode_comment(memo).to_base64()
}

/// Encode a memo with default options, keeping the truncation flag.
pub fn encode_comment(memo: &str) -> EncodedComment {
    CommentEncoder::new().encode(memo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_hello() {
        let comment = encode_comment("hello");
        assert_eq!(
            hex::encode(&comment.bytes),
            "b5ee9c72010101000b0000120000000068656c6c6f"
        );
        assert_eq!(comment.text_len, 5);
        assert!(!comment.truncated);
        assert_eq!(encode("hello"), comment.to_base64());
    }

    #[test]
    fn test_encode_is_deterministic() {
        let memo = "invoice #42 / café";
        assert_eq!(encode(memo), encode(memo));
    }

    #[test]
    fn test_encode_truncates_long_memo() {
        let memo = "m".repeat(500);
        let comment = encode_comment(&memo);
        assert!(comment.truncated);
        assert_eq!(comment.text_len, 123);
        // header (10) + descriptors (2) + opcode (4) + text (123)
        assert_eq!(comment.bytes.len(), 139);
    }

    #[test]
    fn test_truncation_mode_changes_output() {
        let memo = format!("{}é", "a".repeat(122));

        let safe = CommentEncoder::new().encode(&memo);
        let legacy = CommentEncoder::new()
            .with_truncation(TruncationMode::Bytes)
            .encode(&memo);

        assert_eq!(safe.text_len, 122);
        assert_eq!(legacy.text_len, 123);
        assert!(safe.truncated && legacy.truncated);
        assert_ne!(safe.bytes, legacy.bytes);
    }

    #[test]
    fn test_layout_option_applied() {
        let compact = CommentEncoder::new().encode("x");
        let generic = CommentEncoder::new()
            .with_layout(BocLayout::Generic)
            .encode("x");
        assert_eq!(generic.bytes.len(), compact.bytes.len() + 1);
    }

    #[test]
    fn test_encoder_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<CommentEncoder>();
    }
}
