//! Bag of Cells (BoC) container for a single comment cell.
//!
//! The container holds exactly one root cell with no references, so the
//! cell count, root count and root index all fit in one byte and there is
//! never an index table.

use crate::{crc32c, CommentCell, BOC_GENERIC_MAGIC};

/// Header layout of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BocLayout {
    /// Compact header used by browser wallet integrations.
    ///
    /// `magic, flags, cells, roots, absent, tot_cells_size, root_idx` with
    /// every field one byte wide. There is no `off_bytes` field; the total
    /// cells size is always written as a single byte.
    #[default]
    Compact,
    /// Standard `serialized_boc` header.
    ///
    /// Same as [`BocLayout::Compact`] with an `off_bytes` byte after the
    /// flags giving the width of `tot_cells_size`.
    Generic,
}

/// A serialized-ready BoC wrapping one comment cell.
#[derive(Debug, Clone)]
pub struct SingleCellBoc {
    /// The only (root) cell.
    root: CommentCell,
    /// Header layout.
    layout: BocLayout,
    /// Append a CRC32-C trailer.
    with_crc: bool,
}

impl SingleCellBoc {
    /// Create a BoC with a single root cell, compact layout, no checksum.
    pub fn from_root(root: CommentCell) -> Self {
        SingleCellBoc {
            root,
            layout: BocLayout::Compact,
            with_crc: false,
        }
    }

    /// Set the header layout.
    pub fn with_layout(mut self, layout: BocLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Enable or disable the CRC32-C trailer.
    pub fn with_crc(mut self, with_crc: bool) -> Self {
        self.with_crc = with_crc;
        self
    }

    /// Get the root cell.
    pub fn root(&self) -> &CommentCell {
        &self.root
    }

    /// Get the header layout.
    pub fn layout(&self) -> BocLayout {
        self.layout
    }

    /// Serialize the BoC to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let cell_data = self.root.serialize();
        let total_cells_size = cell_data.len();

        // One cell, one root: every count and index fits in a byte
        let size_bytes = 1usize;
        let off_bytes = Self::bytes_needed(total_cells_size);

        let mut result = Vec::with_capacity(16 + total_cells_size);

        // Magic number (4 bytes)
        result.extend_from_slice(&BOC_GENERIC_MAGIC.to_be_bytes());

        // Flags byte: has_idx (bit 7) | has_crc (bit 6) | has_cache_bits (bit 5)
        //             | flags (bits 4-3) | size_bytes (bits 2-0)
        let flags: u8 = (if self.with_crc { 1 << 6 } else { 0 }) | (size_bytes as u8);
        result.push(flags);

        let tot_width = match self.layout {
            BocLayout::Compact => 1,
            BocLayout::Generic => {
                result.push(off_bytes as u8);
                off_bytes
            }
        };

        // Cells count
        Self::write_uint(&mut result, 1, size_bytes);

        // Roots count
        Self::write_uint(&mut result, 1, size_bytes);

        // Absent count
        Self::write_uint(&mut result, 0, size_bytes);

        // Total cells size
        Self::write_uint(&mut result, total_cells_size as u64, tot_width);

        // Root index
        Self::write_uint(&mut result, 0, size_bytes);

        // Cell data
        result.extend_from_slice(&cell_data);

        if self.with_crc {
            let crc = crc32c(&result);
            result.extend_from_slice(&crc.to_le_bytes());
        }

        result
    }

    /// Serialize to base64 string.
    pub fn serialize_to_base64(&self) -> String {
        base64::Engine::encode(&base64::engine::general_purpose::STANDARD, self.serialize())
    }

    /// Calculate bytes needed to represent a number.
    fn bytes_needed(n: usize) -> usize {
        if n == 0 {
            1
        } else {
            ((64 - (n as u64).leading_zeros()) + 7) as usize / 8
        }
    }

    /// Write an unsigned integer with specified byte width.
    fn write_uint(buf: &mut Vec<u8>, value: u64, bytes: usize) {
        for i in (0..bytes).rev() {
            buf.push((value >> (i * 8)) as u8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TruncationMode;

    fn hello_boc() -> SingleCellBoc {
        let (cell, _) = CommentCell::from_text("hello", TruncationMode::CodePoint);
        SingleCellBoc::from_root(cell)
    }

    #[test]
    fn test_compact_header() {
        let bytes = hello_boc().serialize();
        assert_eq!(
            hex::encode(&bytes),
            "b5ee9c72010101000b0000120000000068656c6c6f"
        );
        assert_eq!(bytes.len(), 21);
    }

    #[test]
    fn test_generic_header_has_off_bytes() {
        let bytes = hello_boc().with_layout(BocLayout::Generic).serialize();
        assert_eq!(
            hex::encode(&bytes),
            "b5ee9c7201010101000b0000120000000068656c6c6f"
        );
    }

    #[test]
    fn test_crc_trailer() {
        let bytes = hello_boc()
            .with_layout(BocLayout::Generic)
            .with_crc(true)
            .serialize();
        assert_eq!(bytes[4], 0x41);

        let (body, trailer) = bytes.split_at(bytes.len() - 4);
        assert_eq!(trailer, crc32c(body).to_le_bytes());
        assert_eq!(
            hex::encode(&bytes),
            "b5ee9c7241010101000b0000120000000068656c6c6f9a0d6a79"
        );
    }

    #[test]
    fn test_base64_output() {
        assert_eq!(hello_boc().serialize_to_base64(), "te6ccgEBAQALAAASAAAAAGhlbGxv");
        assert_eq!(
            hello_boc()
                .with_layout(BocLayout::Generic)
                .with_crc(true)
                .serialize_to_base64(),
            "te6cckEBAQEACwAAEgAAAABoZWxsb5oNank="
        );
    }

    #[test]
    fn test_tot_cells_size_fits_one_byte_at_budget() {
        let text = "q".repeat(crate::MAX_COMMENT_BYTES);
        let (cell, _) = CommentCell::from_text(&text, TruncationMode::CodePoint);
        let bytes = SingleCellBoc::from_root(cell).serialize();
        assert_eq!(bytes[8], 129);
        assert_eq!(bytes.len(), 10 + 129);
    }

    #[test]
    fn test_bytes_needed() {
        assert_eq!(SingleCellBoc::bytes_needed(0), 1);
        assert_eq!(SingleCellBoc::bytes_needed(129), 1);
        assert_eq!(SingleCellBoc::bytes_needed(255), 1);
        assert_eq!(SingleCellBoc::bytes_needed(256), 2);
    }
}
