/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;
use anyhow::{Context, Result};
use std::io::{Read, Seek, SeekFrom};

/// A byte backend implementation of [`ByteStream`] for a generic file, this
/// could transparently handle [`std::fs::File`], [`std::io::BufReader`],
/// [`std::io::Cursor`], and sockets wrapped in something seekable.
///
/// The length of the file is measured once, when the backend is created, so
/// the file must not grow or shrink while it is being read.
pub struct FileBackend<F> {
    file: F,
    len: u64,
    position: u64,
}

impl<F: Read + Seek> FileBackend<F> {
    /// Create a new [`FileBackend`] starting at the current position of `file`.
    pub fn new(mut file: F) -> Result<Self> {
        let position = file
            .stream_position()
            .context("Cannot get the position of the file")?;
        let len = file
            .seek(SeekFrom::End(0))
            .context("Cannot seek to the end of the file")?;
        file.seek(SeekFrom::Start(position))
            .with_context(|| format!("Cannot seek back to byte {}", position))?;
        Ok(Self {
            file,
            len,
            position,
        })
    }

    /// Return the file, consuming the backend.
    pub fn into_inner(self) -> F {
        self.file
    }
}

/// forward [`core::fmt::Debug`] if the backend supports it
impl<F: core::fmt::Debug> core::fmt::Debug for FileBackend<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBackend")
            .field("file", &self.file)
            .field("len", &self.len)
            .field("position", &self.position)
            .finish()
    }
}

/// Convert [`std::io::Read`] and [`std::io::Seek`] to [`ByteStream`]
impl<F: Read + Seek> ByteStream for FileBackend<F> {
    #[inline]
    fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    fn get_position(&self) -> u64 {
        self.position
    }

    #[inline]
    fn set_position(&mut self, byte_index: u64) -> Result<()> {
        // a seek drops the buffer of a BufReader
        if byte_index == self.position {
            return Ok(());
        }
        self.position = self
            .file
            .seek(SeekFrom::Start(byte_index))
            .with_context(|| format!("Cannot seek to byte {}", byte_index))?;
        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        // a single read might return less than what is available
        let mut n_bytes = 0;
        while n_bytes < buffer.len() {
            match self.file.read(&mut buffer[n_bytes..]) {
                Ok(0) => break,
                Ok(n) => n_bytes += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Cannot read {} bytes at byte {}", buffer.len(), self.position)
                    })
                }
            }
        }
        self.position += n_bytes as u64;
        Ok(n_bytes)
    }
}
