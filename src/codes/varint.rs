/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Base-128 varints
//! A value is split in groups of seven bits, least significant group first.
//! Each group is stored in the low bits of a byte whose highest bit is set
//! if another group follows.
//!
//! Values are 32-bit signed integers with the protocol buffers convention:
//! negative values are sign-extended to 64 bits and thus always take ten
//! bytes.

use crate::error::BitStreamError;
use crate::traits::BitRead;

/// The maximum number of bytes of a varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Trait for objects that can read varints
pub trait VarIntRead: BitRead {
    /// Read a varint from the stream. The bytes of the varint need not be
    /// aligned.
    ///
    /// # Errors
    /// [`BitStreamError::VarIntOverflow`] if the value does not fit in 32
    /// bits, and the errors of the [`BitRead`] backend. The last of the
    /// [`MAX_VARINT_LEN`] bytes must be exactly `0x01`, so a continuation
    /// bit there is an overflow too.
    fn read_varint(&mut self) -> Result<i32, BitStreamError>;
}

impl<B: BitRead + ?Sized> VarIntRead for B {
    fn read_varint(&mut self) -> Result<i32, BitStreamError> {
        let mut res = 0_u32;
        for count in 0..MAX_VARINT_LEN {
            let byte = self.read_byte()?;
            let high_bits = byte & 0xf8;
            if count < 4 || (count == 4 && (high_bits == 0 || high_bits == 0xf8)) {
                // bits past the 32nd one are the sign extension and are lost
                res |= ((byte & 0x7f) as u32) << (7 * count);
            } else if count == MAX_VARINT_LEN - 1 {
                if byte != 0x01 {
                    return Err(BitStreamError::VarIntOverflow);
                }
            } else if byte & 0x7f != 0x7f {
                return Err(BitStreamError::VarIntOverflow);
            }

            if byte & 0x80 == 0 {
                return Ok(res as i32);
            }
        }
        unreachable!("the last byte of a varint has no continuation bit")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::*;

    fn read(data: &[u8]) -> Result<i32, BitStreamError> {
        BitStreamReader::new(MemByteStream::new(data))?.read_varint()
    }

    #[test]
    fn test_varint() -> Result<(), BitStreamError> {
        assert_eq!(read(&[0x00])?, 0);
        assert_eq!(read(&[0x01])?, 1);
        assert_eq!(read(&[0x7f])?, 127);
        assert_eq!(read(&[0x96, 0x01])?, 150);
        assert_eq!(read(&[0xac, 0x02])?, 300);
        assert_eq!(read(&[0xff, 0xff, 0xff, 0xff, 0x07])?, i32::MAX);
        assert_eq!(
            read(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01])?,
            -1
        );
        assert_eq!(
            read(&[0x80, 0x80, 0x80, 0x80, 0xf8, 0xff, 0xff, 0xff, 0xff, 0x01])?,
            i32::MIN
        );
        Ok(())
    }

    #[test]
    fn test_varint_errors() {
        // 2^35 does not fit
        assert!(matches!(
            read(&[0x80, 0x80, 0x80, 0x80, 0x10]),
            Err(BitStreamError::VarIntOverflow)
        ));
        // the tenth byte has a continuation bit
        assert!(matches!(
            read(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x81]),
            Err(BitStreamError::VarIntOverflow)
        ));
        assert!(matches!(
            read(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x03]),
            Err(BitStreamError::VarIntOverflow)
        ));
    }
}
