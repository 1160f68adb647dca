/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Traits
//! This modules contains the traits that are used throughout the crate.
//! They are collected into a module so you can do `use bitchunk::traits::*;`
//! for ease of use.

mod byte_stream;
pub use byte_stream::*;

mod bit_stream;
pub use bit_stream::*;
