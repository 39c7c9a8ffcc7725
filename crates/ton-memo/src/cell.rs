//! Text comment cell.
//!
//! A comment cell is an ordinary TON cell with no references whose data is
//! the 32-bit comment opcode followed by the comment bytes. Because both
//! parts are whole bytes the cell is always byte-aligned.
//!
//! Reference: ton-blockchain/ton/crypto/vm/cells/DataCell.cpp

use crate::truncate::{truncate_utf8, TruncationMode};
use crate::{
    COMMENT_OPCODE, MAX_CELL_DATA_BYTES, MAX_COMMENT_BYTES, MemoError, MemoResult, OPCODE_BYTES,
};

/// A single comment cell.
///
/// ## Layout
///
/// - Data: `opcode (4 bytes) ++ text (0..=123 bytes)`
/// - References: none
/// - Type: ordinary, level 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCell {
    /// Raw data bytes, opcode included.
    data: Vec<u8>,
}

impl CommentCell {
    /// Build a comment cell, fitting `text` into the byte budget.
    ///
    /// Returns the cell and whether the text had to be cut.
    pub fn from_text(text: &str, mode: TruncationMode) -> (Self, bool) {
        let fitted = truncate_utf8(text, MAX_COMMENT_BYTES, mode);
        (Self::with_text_bytes(fitted.bytes), fitted.truncated)
    }

    /// Build a comment cell from already-encoded text bytes.
    ///
    /// Fails if the bytes do not fit next to the opcode.
    pub fn from_text_bytes(text: &[u8]) -> MemoResult<Self> {
        if text.len() > MAX_COMMENT_BYTES {
            return Err(MemoError::DataTooLong {
                len: OPCODE_BYTES + text.len(),
                max: MAX_CELL_DATA_BYTES,
            });
        }
        Ok(Self::with_text_bytes(text))
    }

    fn with_text_bytes(text: &[u8]) -> Self {
        debug_assert!(text.len() <= MAX_COMMENT_BYTES);

        let mut data = Vec::with_capacity(OPCODE_BYTES + text.len());
        data.extend_from_slice(&COMMENT_OPCODE.to_be_bytes());
        data.extend_from_slice(text);
        CommentCell { data }
    }

    /// Get the raw data bytes (opcode + text).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the comment bytes after the opcode.
    pub fn text_bytes(&self) -> &[u8] {
        &self.data[OPCODE_BYTES..]
    }

    /// Get the data length in bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Get the data length in bits.
    pub fn bit_len(&self) -> usize {
        self.data.len() * 8
    }

    /// Number of child references. Always zero for a comment.
    pub fn reference_count(&self) -> usize {
        0
    }

    /// Get the descriptor bytes (d1, d2).
    ///
    /// According to official TON code:
    /// d1 = refs_count + 8*is_exotic + 32*level_mask
    /// d2 = ceil(bit_len / 8) + floor(bit_len / 8)
    ///
    /// A comment cell is ordinary with no references and level 0, so d1 is
    /// zero. Its data is byte-aligned, so d2 is twice the byte length and
    /// even, which tells a reader there is no completion tag to strip. A
    /// cell whose bit length is not a multiple of 8 would instead get an odd
    /// d2 and a trailing `1` bit padded with zeros; comment cells never
    /// need one.
    pub fn descriptors(&self) -> (u8, u8) {
        let refs_count = self.reference_count() as u8;
        let bit_len = self.bit_len();

        let d1 = refs_count;
        let d2 = (bit_len.div_ceil(8) + bit_len / 8) as u8;

        (d1, d2)
    }

    /// Serialize the cell as it appears inside a BoC: `d1 ++ d2 ++ data`.
    pub fn serialize(&self) -> Vec<u8> {
        let (d1, d2) = self.descriptors();

        let mut result = Vec::with_capacity(2 + self.data.len());
        result.push(d1);
        result.push(d2);
        result.extend_from_slice(&self.data);
        result
    }
}
