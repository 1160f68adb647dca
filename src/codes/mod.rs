/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! This modules contains the codes that are built on top of [`BitRead`]:
//! each one is a trait with a blanket implementation, so any bit reader can
//! read them.
//!
//! **The convention is to read bits from the LSB to the MSB of each byte.**
//!
//! #### Example:
//! The following stream of bytes
//! ```text
//! 96 01 4a
//! ```
//! is equivalent to the following stream of bits, to be read from left to
//! right:
//! ```text
//! 01101001 10000000 01010010
//! ```
//! In code:
//! ```
//! use bitchunk::prelude::*;
//!
//! let data = [0x96_u8, 0x01, 0x4a];
//! let mut reader = BitStreamReader::new(MemByteStream::new(&data)).unwrap();
//!
//! assert_eq!(reader.read_varint().unwrap(), 150);
//! // 0x4a = 0b01_001010: a head with no extension
//! assert_eq!(reader.read_ubit_int().unwrap(), 0b00_1010);
//! assert_eq!(reader.read_uint(2).unwrap(), 0b01);
//!
//! reader.set_bit_pos(4).unwrap(); // the stream is seekable
//! assert_eq!(reader.read_byte().unwrap(), 0x19);
//! ```
//!
//! [`BitRead`]: crate::traits::BitRead

mod varint;
pub use varint::{VarIntRead, MAX_VARINT_LEN};

mod ubit;
pub use ubit::UBitIntRead;

mod string;
pub use string::StringRead;
