/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::BitStreamError;

/// Objects with a seekable bit position.
pub trait BitSeek {
    /// Return the index of the next bit that will be read.
    #[must_use]
    fn bit_pos(&self) -> u64;

    /// Move the stream cursor so that if we call `read_bits(1)` we will read
    /// the `bit_index`-th bit in the stream.
    ///
    /// Positions past the end of the stream are clamped to
    /// [`len_bits`](BitSeek::len_bits).
    ///
    /// # Errors
    /// This function fails only if the underlying stream cannot seek.
    fn set_bit_pos(&mut self, bit_index: u64) -> Result<(), BitStreamError>;

    /// Return the number of bits in the stream.
    #[must_use]
    fn len_bits(&self) -> u64;

    /// Return the number of bits between the current position and the end
    /// of the stream.
    #[must_use]
    fn bits_left(&self) -> u64 {
        self.len_bits() - self.bit_pos()
    }
}

/// Objects that can read bits from a stream, least significant bit of each
/// byte first.
///
/// Multi-bit reads are returned as little-endian byte buffers: the first
/// bit read is the least significant bit of the first byte. All the typed
/// reads are provided on top of [`read_bits`](BitRead::read_bits).
pub trait BitRead {
    /// Read a single bit.
    fn read_bit(&mut self) -> Result<bool, BitStreamError>;

    /// Read `n_bits` bits into `n_bits.div_ceil(8)` bytes.
    ///
    /// The high bits of the last byte that exceed `n_bits` are zero.
    fn read_bits(&mut self, n_bits: usize) -> Result<Vec<u8>, BitStreamError>;

    /// Read eight bits.
    #[inline]
    fn read_byte(&mut self) -> Result<u8, BitStreamError> {
        Ok(self.read_bits(8)?[0])
    }

    /// Read at most eight bits into the lowest bits of a byte.
    ///
    /// # Errors
    /// [`BitStreamError::Range`] if `n_bits` is greater than eight.
    #[inline]
    fn read_byte_bits(&mut self, n_bits: usize) -> Result<u8, BitStreamError> {
        BitStreamError::check_bits(8, n_bits)?;
        Ok(self.read_bits(n_bits)?.first().copied().unwrap_or(0))
    }

    /// Read `n_bytes` bytes, not necessarily aligned.
    #[inline]
    fn read_bytes(&mut self, n_bytes: usize) -> Result<Vec<u8>, BitStreamError> {
        self.read_bits(n_bytes * 8)
    }

    /// Read an IEEE-754 single precision float.
    #[inline]
    fn read_float(&mut self) -> Result<f32, BitStreamError> {
        Ok(f32::from_le_bytes(self.read_word(32)?))
    }

    /// Read at most 32 bits as an unsigned integer.
    ///
    /// # Errors
    /// [`BitStreamError::Range`] if `n_bits` is greater than 32.
    #[inline]
    fn read_uint(&mut self, n_bits: usize) -> Result<u32, BitStreamError> {
        Ok(u32::from_le_bytes(self.read_word(n_bits)?))
    }

    /// Read at most 32 bits as a signed integer.
    ///
    /// The bits are zero-extended, not sign-extended: the result is negative
    /// only if `n_bits` is 32 and the last bit read is set. For example,
    /// reading 8 bits all set yields 255.
    ///
    /// # Errors
    /// [`BitStreamError::Range`] if `n_bits` is greater than 32.
    #[inline]
    fn read_sint(&mut self, n_bits: usize) -> Result<i32, BitStreamError> {
        Ok(i32::from_le_bytes(self.read_word(n_bits)?))
    }

    /// Read at most 32 bits into the low bytes of a zero-filled
    /// little-endian word.
    #[doc(hidden)]
    #[inline]
    fn read_word(&mut self, n_bits: usize) -> Result<[u8; 4], BitStreamError> {
        BitStreamError::check_bits(32, n_bits)?;
        let mut word = [0; 4];
        let bytes = self.read_bits(n_bits)?;
        word[..bytes.len()].copy_from_slice(&bytes);
        Ok(word)
    }
}

/// Objects that can bound nested regions of a stream.
///
/// A chunk is a region whose length the caller knows in advance, even if it
/// does not know how to parse it. Whatever is read inside the chunk,
/// [`end_chunk`](ChunkRead::end_chunk) moves the stream exactly at its end.
pub trait ChunkRead: BitSeek {
    /// Open a chunk of `n_bits` bits starting at the current position.
    ///
    /// Chunks can nest arbitrarily, and a chunk is not required to end
    /// within the chunk containing it. An end past the stream, however
    /// large, is reached as the end of the stream.
    fn begin_chunk(&mut self, n_bits: u64);

    /// Close the innermost chunk, moving the position to its end, both if
    /// the chunk was not read completely and if it was overread.
    ///
    /// # Errors
    /// [`BitStreamError::StackUnderflow`] if no chunk is open.
    fn end_chunk(&mut self) -> Result<(), BitStreamError>;

    /// Return whether the position reached the end of the innermost chunk.
    ///
    /// # Errors
    /// [`BitStreamError::StackUnderflow`] if no chunk is open.
    fn chunk_finished(&self) -> Result<bool, BitStreamError>;

    /// Return the number of open chunks.
    #[must_use]
    fn chunk_depth(&self) -> usize;
}
