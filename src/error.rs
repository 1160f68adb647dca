/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Errors raised while decoding a bit stream.

/// The errors of [`BitRead`](crate::traits::BitRead),
/// [`ChunkRead`](crate::traits::ChunkRead) and of the codes built on them.
///
/// None of them is recoverable: once a read fails, the position of the
/// stream is not meaningful anymore for the current parse.
#[derive(thiserror::Error, Debug)]
pub enum BitStreamError {
    /// A fixed-width read was asked for more bits than it can hold.
    #[error("Cannot read {got} bits, at most {max} are allowed")]
    Range { max: usize, got: usize },

    /// [`end_chunk`](crate::traits::ChunkRead::end_chunk) or
    /// [`chunk_finished`](crate::traits::ChunkRead::chunk_finished) was
    /// called without an open chunk.
    #[error("No chunk is open")]
    StackUnderflow,

    #[error("The varint does not fit in 32 bits")]
    VarIntOverflow,

    /// Propagated verbatim from the [`ByteStream`](crate::traits::ByteStream).
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl BitStreamError {
    /// Check that `got` bits fit a read of at most `max` bits.
    #[inline(always)]
    pub fn check_bits(max: usize, got: usize) -> Result<(), Self> {
        if got > max {
            return Err(Self::Range { max, got });
        }
        Ok(())
    }
}
