/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # UBit integers
//! A compact code for unsigned integers that are usually small. A six-bit
//! head is read first: its lowest four bits are the lowest four bits of the
//! value, and its two highest bits select how many more bits follow:
//!
//! | head bits 4-5 | following bits |
//! |---------------|----------------|
//! | `00`          | 0              |
//! | `01`          | 4              |
//! | `10`          | 8              |
//! | `11`          | 28             |

use crate::error::BitStreamError;
use crate::traits::BitRead;

/// Trait for objects that can read UBit integers
pub trait UBitIntRead: BitRead {
    /// Read a UBit integer from the stream.
    ///
    /// # Errors
    /// This function fails only if the [`BitRead`] backend fails.
    fn read_ubit_int(&mut self) -> Result<u32, BitStreamError>;
}

impl<B: BitRead + ?Sized> UBitIntRead for B {
    #[inline]
    fn read_ubit_int(&mut self) -> Result<u32, BitStreamError> {
        let head = self.read_uint(6)?;
        let n_bits = match head & 0x30 {
            0x10 => 4,
            0x20 => 8,
            0x30 => 28,
            _ => return Ok(head),
        };
        Ok((head & 0x0f) | (self.read_uint(n_bits)? << 4))
    }
}
