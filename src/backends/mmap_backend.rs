/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::MemByteStream;
use anyhow::{ensure, Context, Result};
use mmap_rs::{Mmap, MmapFlags, MmapOptions};
use std::path::Path;

/// A [`ByteStream`](crate::traits::ByteStream) over a read-only memory map.
pub type MmapByteStream = MemByteStream<Mmap>;

/// Memory map the file at `path` and return a stream over its bytes.
///
/// Empty files cannot be memory mapped and are rejected.
pub fn mmap_file(path: impl AsRef<Path>, flags: MmapFlags) -> Result<MmapByteStream> {
    let path = path.as_ref();
    let file_len = path
        .metadata()
        .with_context(|| format!("Cannot stat {}", path.display()))?
        .len();
    ensure!(file_len > 0, "Cannot mmap the empty file {}", path.display());
    let file = std::fs::File::open(path)
        .with_context(|| format!("Cannot open {} for MmapByteStream", path.display()))?;
    let mmap = unsafe {
        MmapOptions::new(file_len as _)
            .with_context(|| format!("Cannot initialize mmap of size {}", file_len))?
            .with_flags(flags)
            .with_file(&file, 0)
            .map()
            .with_context(|| format!("Cannot mmap {} (size {})", path.display(), file_len))?
    };
    log::debug!("Mapped {} ({} bytes)", path.display(), file_len);
    Ok(MemByteStream::new(mmap))
}
