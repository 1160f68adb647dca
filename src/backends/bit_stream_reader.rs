/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::BitStreamError;
use crate::traits::*;
use crate::utils::{get_lowest_bits, SINGULAR_MASKS, SUFFIX_MASKS};
use log::{debug, trace};

/// An implementation of [`BitRead`], [`BitSeek`] and [`ChunkRead`] on a
/// seekable [`ByteStream`].
///
/// Bits are read from the least significant to the most significant of each
/// byte. The byte cursor of the backend is kept in sync with the bit
/// position: after every operation the backend is positioned at the byte
/// containing the next bit to read.
///
/// Reads past the end of the backend return zero bits and leave the
/// position at the end of the stream.
///
/// ### Example
/// ```
/// use bitchunk::prelude::*;
///
/// let data = [0b1010_1101_u8, 0b0000_0011];
/// let mut reader = BitStreamReader::new(MemByteStream::new(&data)).unwrap();
///
/// assert!(reader.read_bit().unwrap());
/// assert_eq!(reader.read_uint(3).unwrap(), 0b110);
/// // this read spans two bytes
/// assert_eq!(reader.read_uint(6).unwrap(), 0b11_1010);
///
/// reader.begin_chunk(4);
/// assert!(!reader.chunk_finished().unwrap());
/// reader.end_chunk().unwrap();
/// assert_eq!(reader.bit_pos(), 14);
/// ```
#[derive(Debug)]
pub struct BitStreamReader<B: ByteStream> {
    /// The stream which we will read bytes from
    backend: B,
    /// The index of the next bit to read
    bit_index: u64,
    /// The length of the backend, in bits
    len_bits: u64,
    /// The targets of the open chunks, innermost last
    chunk_targets: Vec<u64>,
    /// The last byte read by [`BitRead::read_bit`] and its index
    current: Option<(u64, u8)>,
}

impl<B: ByteStream> BitStreamReader<B> {
    /// Create a new [`BitStreamReader`] starting at the current position of
    /// the backend.
    pub fn new(backend: B) -> Result<Self, BitStreamError> {
        let bit_index = backend.get_position() * 8;
        let len_bits = backend.len() * 8;
        debug!(
            "New BitStreamReader at bit {} of {} bits",
            bit_index, len_bits
        );
        Ok(Self {
            backend,
            bit_index: bit_index.min(len_bits),
            len_bits,
            chunk_targets: Vec::new(),
            current: None,
        })
    }

    /// Return the backend, consuming the reader.
    ///
    /// The backend is positioned at the byte containing the next bit that
    /// would have been read.
    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Return a reference to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Move to `bit_index` (clamped) and resynchronize the backend.
    #[inline]
    fn move_to(&mut self, bit_index: u64) -> Result<(), BitStreamError> {
        self.bit_index = bit_index.min(self.len_bits);
        self.backend.set_position(self.bit_index / 8)?;
        Ok(())
    }

    /// Fill `buffer` from the current byte of the backend, zero-filling
    /// what the backend cannot provide.
    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), BitStreamError> {
        let mut n_bytes = 0;
        while n_bytes < buffer.len() {
            let n = self.backend.read(&mut buffer[n_bytes..])?;
            if n == 0 {
                break;
            }
            n_bytes += n;
        }
        if n_bytes < buffer.len() {
            trace!(
                "Short read at bit {}: {} of {} bytes, zero-filling",
                self.bit_index,
                n_bytes,
                buffer.len()
            );
            buffer[n_bytes..].fill(0);
        }
        Ok(())
    }
}

impl<B: ByteStream> BitSeek for BitStreamReader<B> {
    #[inline(always)]
    fn bit_pos(&self) -> u64 {
        self.bit_index
    }

    fn set_bit_pos(&mut self, bit_index: u64) -> Result<(), BitStreamError> {
        self.current = None;
        self.move_to(bit_index)
    }

    #[inline(always)]
    fn len_bits(&self) -> u64 {
        self.len_bits
    }
}

impl<B: ByteStream> BitRead for BitStreamReader<B> {
    fn read_bit(&mut self) -> Result<bool, BitStreamError> {
        let byte_index = self.bit_index / 8;
        let byte = match self.current {
            Some((index, byte)) if index == byte_index => byte,
            _ => {
                let mut byte = [0];
                self.fill(&mut byte)?;
                self.current = Some((byte_index, byte[0]));
                byte[0]
            }
        };
        let mask = SINGULAR_MASKS[(self.bit_index % 8) as usize];
        self.move_to(self.bit_index + 1)?;
        Ok(byte & mask != 0)
    }

    fn read_bits(&mut self, n_bits: usize) -> Result<Vec<u8>, BitStreamError> {
        let mut res = vec![0_u8; n_bits.div_ceil(8)];
        let bit_offset = (self.bit_index % 8) as usize;
        // one more byte, as unaligned reads span one byte more than the result
        let mut data = vec![0_u8; res.len() + 1];
        self.fill(&mut data)?;
        trace!(
            "Reading {} bits at bit {} from {:02x?}",
            n_bits,
            self.bit_index,
            data
        );

        let mut bits_read = 0;
        for (i, out) in res.iter_mut().enumerate() {
            // the bits left in the current byte
            *out |= (data[i] & SUFFIX_MASKS[bit_offset]) >> bit_offset;
            bits_read += 8 - bit_offset;

            // complete the byte with the lowest bits of the next one
            if bits_read < n_bits && bit_offset > 0 {
                *out |= get_lowest_bits(data[i + 1], bit_offset) << (8 - bit_offset);
                bits_read += bit_offset;
            }

            // trim the bits past the requested ones
            if bits_read > n_bits {
                *out = get_lowest_bits(*out, n_bits % 8);
            }
        }

        self.move_to(self.bit_index.saturating_add(n_bits as u64))?;
        Ok(res)
    }
}

impl<B: ByteStream> ChunkRead for BitStreamReader<B> {
    fn begin_chunk(&mut self, n_bits: u64) {
        let target = self.bit_index.saturating_add(n_bits);
        debug!(
            "Begin chunk of {} bits at bit {} (depth {})",
            n_bits,
            self.bit_index,
            self.chunk_targets.len() + 1
        );
        self.chunk_targets.push(target);
    }

    fn end_chunk(&mut self) -> Result<(), BitStreamError> {
        let target = self
            .chunk_targets
            .pop()
            .ok_or(BitStreamError::StackUnderflow)?;
        debug!(
            "End chunk at bit {}, skipping {} bits",
            self.bit_index,
            target as i128 - self.bit_index as i128
        );
        self.move_to(target)
    }

    fn chunk_finished(&self) -> Result<bool, BitStreamError> {
        let target = self
            .chunk_targets
            .last()
            .ok_or(BitStreamError::StackUnderflow)?;
        Ok(self.bit_index >= *target)
    }

    #[inline(always)]
    fn chunk_depth(&self) -> usize {
        self.chunk_targets.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backends::MemByteStream;

    fn reader(data: &[u8]) -> BitStreamReader<MemByteStream<&[u8]>> {
        BitStreamReader::new(MemByteStream::new(data)).unwrap()
    }

    #[test]
    fn test_aligned() -> Result<(), BitStreamError> {
        let mut reader = reader(&[0x12, 0x34, 0x56]);
        assert_eq!(reader.read_bits(16)?, vec![0x12, 0x34]);
        assert_eq!(reader.bit_pos(), 16);
        assert_eq!(reader.backend().get_position(), 2);
        assert_eq!(reader.read_bits(8)?, vec![0x56]);
        assert_eq!(reader.bit_pos(), 24);
        Ok(())
    }

    #[test]
    fn test_unaligned() -> Result<(), BitStreamError> {
        let mut reader = reader(&[0b1011_0001, 0b0110_1110]);
        reader.set_bit_pos(3)?;
        // the top five bits of the first byte, then the low three of the second
        assert_eq!(reader.read_bits(8)?, vec![0b110_10110]);
        assert_eq!(reader.backend().get_position(), 1);
        assert_eq!(reader.read_bits(5)?, vec![0b0_1101]);
        assert_eq!(reader.bit_pos(), 16);
        Ok(())
    }

    #[test]
    fn test_partial_byte_is_trimmed() -> Result<(), BitStreamError> {
        let mut reader = reader(&[0xff, 0xff]);
        reader.set_bit_pos(2)?;
        assert_eq!(reader.read_bits(3)?, vec![0b111]);
        assert_eq!(reader.read_bits(10)?, vec![0xff, 0b11]);
        Ok(())
    }

    #[test]
    fn test_read_bit_cache() -> Result<(), BitStreamError> {
        let mut reader = reader(&[0b0000_0101, 0b1000_0000]);
        let bits = (0..16)
            .map(|_| reader.read_bit())
            .collect::<Result<Vec<_>, _>>()?;
        let expected = [
            true, false, true, false, false, false, false, false, false, false, false, false,
            false, false, false, true,
        ];
        assert_eq!(bits, expected);
        reader.set_bit_pos(2)?;
        assert!(reader.read_bit()?);
        assert_eq!(reader.backend().get_position(), 0);
        Ok(())
    }

    #[test]
    fn test_end_of_stream() -> Result<(), BitStreamError> {
        let mut reader = reader(&[0xff]);
        reader.set_bit_pos(4)?;
        // the missing bits are zero
        assert_eq!(reader.read_bits(12)?, vec![0x0f, 0x00]);
        assert_eq!(reader.bit_pos(), 8);
        assert!(!reader.read_bit()?);
        assert_eq!(reader.bit_pos(), 8);
        Ok(())
    }

    #[test]
    fn test_clamp() -> Result<(), BitStreamError> {
        let mut reader = reader(&[0, 0]);
        reader.set_bit_pos(1000)?;
        assert_eq!(reader.bit_pos(), 16);
        assert_eq!(reader.bits_left(), 0);
        assert_eq!(reader.backend().get_position(), 2);
        Ok(())
    }

    #[test]
    fn test_underflow() {
        let mut reader = reader(&[0]);
        assert!(matches!(
            reader.chunk_finished(),
            Err(BitStreamError::StackUnderflow)
        ));
        assert!(matches!(
            reader.end_chunk(),
            Err(BitStreamError::StackUnderflow)
        ));
    }
}
