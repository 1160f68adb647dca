/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;

/// A seekable stream of bytes the bit readers are built upon.
///
/// This trait is used to abstract the logic and allow homogeneous use of
/// files, memory-mapped files, memory, sockets, and other sources.
///
/// While it shares many similarities with [`std::io::Read`] and
/// [`std::io::Seek`], it also requires the total length of the stream to
/// be known in advance, as bit readers clamp their position against it.
///
/// ### Short reads
/// [`ByteStream::read`] returns the number of bytes actually read, and
/// returning zero means that the stream ended. Readers never treat a short
/// read as an error: the bytes that the stream could not provide are
/// considered zero, as it is the default `mmap` behaviour on `linux`:
/// > The system shall always zero-fill any partial page at the end of an object.
/// [Source](https://manned.org/mmap.3p)
pub trait ByteStream {
    /// Return the number of bytes readable from the start of the stream.
    #[must_use]
    fn len(&self) -> u64;

    #[must_use]
    /// Return if the stream has any bytes or it's empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the index of the **next** byte that will be
    /// read on the next [`ByteStream::read`] call.
    #[must_use]
    fn get_position(&self) -> u64;

    /// Set the position in the stream so that the `byte_index`-th byte will be
    /// read on the next [`ByteStream::read`] call.
    ///
    /// # Errors
    /// This function fails if the underlying source cannot be repositioned.
    /// Implementations accept every `byte_index` in `[0, self.len()]`.
    fn set_position(&mut self, byte_index: u64) -> Result<()>;

    /// Read at most `buffer.len()` bytes from the current position and
    /// advance the position by the number of bytes read, which is returned.
    ///
    /// # Errors
    /// This function fails if the underlying source fails; reaching the
    /// end of the stream is not an error.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;
}

/// Forward everything so that readers can borrow a stream they do not own.
impl<S: ByteStream + ?Sized> ByteStream for &mut S {
    #[inline(always)]
    fn len(&self) -> u64 {
        (**self).len()
    }

    #[inline(always)]
    fn get_position(&self) -> u64 {
        (**self).get_position()
    }

    #[inline(always)]
    fn set_position(&mut self, byte_index: u64) -> Result<()> {
        (**self).set_position(byte_index)
    }

    #[inline(always)]
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        (**self).read(buffer)
    }
}
