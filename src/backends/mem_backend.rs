/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;
use anyhow::{bail, Result};

/// An Implementation of [`ByteStream`] for anything that can be seen as a
/// slice of memory `&[u8]`: slices, vectors, memory maps.
///
/// # Example
/// ```
/// use bitchunk::prelude::*;
///
/// let data = [0x77_u8, 0x60, 0xf1];
///
/// let mut stream = MemByteStream::new(&data);
///
/// // the stream is read sequentially
/// assert_eq!(stream.len(), 3);
/// assert_eq!(stream.get_position(), 0);
/// let mut buffer = [0; 2];
/// assert_eq!(stream.read(&mut buffer).unwrap(), 2);
/// assert_eq!(buffer, [0x77, 0x60]);
/// assert_eq!(stream.get_position(), 2);
///
/// // reads at the end are short
/// assert_eq!(stream.read(&mut buffer).unwrap(), 1);
/// assert_eq!(buffer[0], 0xf1);
/// assert_eq!(stream.read(&mut buffer).unwrap(), 0);
///
/// // you can change position
/// assert!(stream.set_position(1).is_ok());
/// assert_eq!(stream.get_position(), 1);
///
/// // errored set position doesn't change the current position
/// assert!(stream.set_position(100).is_err());
/// assert_eq!(stream.get_position(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemByteStream<B> {
    data: B,
    byte_index: usize,
}

impl<B: AsRef<[u8]>> MemByteStream<B> {
    /// Create a new [`MemByteStream`] from a slice of data
    #[must_use]
    pub fn new(data: B) -> Self {
        Self {
            data,
            byte_index: 0,
        }
    }

    /// Return the backend, consuming the stream.
    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u8]>> ByteStream for MemByteStream<B> {
    #[inline(always)]
    fn len(&self) -> u64 {
        self.data.as_ref().len() as u64
    }

    #[inline(always)]
    fn get_position(&self) -> u64 {
        self.byte_index as u64
    }

    #[inline(always)]
    fn set_position(&mut self, byte_index: u64) -> Result<()> {
        if byte_index > self.len() {
            bail!(
                "Index {} is out of bound on a MemByteStream of length {}",
                byte_index,
                self.len()
            );
        }
        self.byte_index = byte_index as usize;
        Ok(())
    }

    #[inline]
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let data = &self.data.as_ref()[self.byte_index..];
        let n_bytes = buffer.len().min(data.len());
        buffer[..n_bytes].copy_from_slice(&data[..n_bytes]);
        self.byte_index += n_bytes;
        Ok(n_bytes)
    }
}
