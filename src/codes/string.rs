/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::BitStreamError;
use crate::traits::BitRead;

/// Trait for objects that can read strings made of (possibly unaligned)
/// bytes. Invalid UTF-8 sequences are replaced with `U+FFFD`.
pub trait StringRead: BitRead {
    /// Read a NUL-terminated string of at most `limit` bytes.
    ///
    /// The terminator is consumed but not returned; if no terminator is
    /// found, exactly `limit` bytes are consumed.
    fn read_string(&mut self, limit: usize) -> Result<String, BitStreamError>;

    /// Read a string stored in exactly `len` bytes, padded with NULs.
    fn read_cstring(&mut self, len: usize) -> Result<String, BitStreamError>;
}

impl<B: BitRead + ?Sized> StringRead for B {
    fn read_string(&mut self, limit: usize) -> Result<String, BitStreamError> {
        let mut bytes = Vec::new();
        while bytes.len() < limit {
            match self.read_byte()? {
                0 => break,
                byte => bytes.push(byte),
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_cstring(&mut self, len: usize) -> Result<String, BitStreamError> {
        let bytes = self.read_bytes(len)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }
}
