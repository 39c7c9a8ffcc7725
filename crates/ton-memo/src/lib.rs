//! TON Text Comment Encoder
//!
//! This crate turns a UTF-8 memo into the payload a wallet attaches to a
//! transfer message: a Bag of Cells (BoC) holding exactly one cell.
//!
//! - **CommentCell**: An ordinary cell with no references carrying the comment
//! - **SingleCellBoc**: The BoC container around that one cell
//! - **CommentEncoder**: Truncation and container options in one value
//!
//! # Overview
//!
//! A text comment cell stores a 32-bit zero opcode followed by the comment
//! bytes. The opcode marks the body as a human-readable memo:
//!
//! ```text
//! +----------+----------------------------+
//! | 00000000 | UTF-8 text (<= 123 bytes)  |
//! +----------+----------------------------+
//! ```
//!
//! The cell is serialized with its two descriptor bytes and wrapped in the
//! BoC header, then base64-encoded for transport.
//!
//! # Example
//!
//! ```
//! use ton_memo::{encode, encode_comment};
//!
//! assert_eq!(encode("hello"), "te6ccgEBAQALAAASAAAAAGhlbGxv");
//!
//! let long = "x".repeat(200);
//! let comment = encode_comment(&long);
//! assert!(comment.truncated);
//! assert_eq!(comment.text_len, 123);
//! ```

use thiserror::Error;

mod boc;
mod cell;
mod encoder;
mod truncate;

pub use boc::{BocLayout, SingleCellBoc};
pub use cell::CommentCell;
pub use encoder::{encode, encode_comment, CommentEncoder, EncodedComment};
pub use truncate::{truncate_utf8, Truncated, TruncationMode};

/// Errors that can occur while building comment cells.
#[derive(Debug, Error)]
pub enum MemoError {
    /// The cell data exceeds the single-cell comment capacity.
    #[error("Cell data too long: {len} bytes (max {max})")]
    DataTooLong { len: usize, max: usize },
}

/// Result type for comment operations.
pub type MemoResult<T> = Result<T, MemoError>;

/// Opcode tagging a cell body as a simple text comment.
pub const COMMENT_OPCODE: u32 = 0x0000_0000;

/// Size of the opcode prefix in bytes.
pub const OPCODE_BYTES: usize = 4;

/// Maximum number of text bytes carried by one comment cell.
pub const MAX_COMMENT_BYTES: usize = 123;

/// Maximum number of data bytes in a comment cell (opcode + text).
pub const MAX_CELL_DATA_BYTES: usize = OPCODE_BYTES + MAX_COMMENT_BYTES;

/// Maximum number of bits in any TON cell's data.
pub const MAX_CELL_BITS: usize = 1023;

/// BoC magic number for generic BoC.
pub const BOC_GENERIC_MAGIC: u32 = 0xb5ee9c72;

/// Compute CRC32-C checksum (Castagnoli polynomial).
fn crc32c(data: &[u8]) -> u32 {
    const CRC32C: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISCSI);
    CRC32C.checksum(data)
}
