/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Collection of common functions and tables we use throughout the codebase

/// `SINGULAR_MASKS[i]` isolates the `i`-th bit of a byte, where the 0-th bit
/// is the least significant one.
pub const SINGULAR_MASKS: [u8; 8] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80];

/// `SUFFIX_MASKS[i]` isolates the bits of a byte from the `i`-th upwards,
/// that is, the bits that are still to be read when `i` bits of the byte
/// have already been consumed. Its complement isolates the lowest `i` bits.
pub const SUFFIX_MASKS: [u8; 8] = [0xff, 0xfe, 0xfc, 0xf8, 0xf0, 0xe0, 0xc0, 0x80];

/// Return the lowest `n_bits` of `value`; `n_bits` must be in `[0, 8)`.
///
/// ### Example
/// ```
/// use bitchunk::utils::get_lowest_bits;
///
/// assert_eq!(get_lowest_bits(0b1011_0110, 0), 0);
/// assert_eq!(get_lowest_bits(0b1011_0110, 1), 0b0);
/// assert_eq!(get_lowest_bits(0b1011_0110, 3), 0b110);
/// assert_eq!(get_lowest_bits(0b1011_0110, 7), 0b011_0110);
/// ```
#[inline(always)]
#[must_use]
pub fn get_lowest_bits(value: u8, n_bits: usize) -> u8 {
    debug_assert!(n_bits < 8);
    value & !SUFFIX_MASKS[n_bits]
}

/// Format `bytes` as the sequence of bits they contain, in reading order,
/// grouping them by byte.
///
/// ### Example
/// ```
/// use bitchunk::utils::fmt_bits;
///
/// assert_eq!(fmt_bits(&[0b0000_0001, 0b1000_0000], 16), "10000000 00000001");
/// assert_eq!(fmt_bits(&[0b0000_0110], 3), "011");
/// ```
#[must_use]
pub fn fmt_bits(bytes: &[u8], n_bits: usize) -> String {
    let mut res = String::with_capacity(n_bits + n_bits / 8);
    for bit_index in 0..n_bits.min(bytes.len() * 8) {
        if bit_index != 0 && bit_index % 8 == 0 {
            res.push(' ');
        }
        let byte = bytes[bit_index / 8];
        res.push(if byte & SINGULAR_MASKS[bit_index % 8] != 0 {
            '1'
        } else {
            '0'
        });
    }
    res
}
