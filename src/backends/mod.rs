/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Implementations of byte streams and of the bit reader built on them.

mod mem_backend;
pub use mem_backend::*;

mod file_backend;
pub use file_backend::*;

mod mmap_backend;
pub use mmap_backend::*;

mod bit_stream_reader;
pub use bit_stream_reader::BitStreamReader;
