/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
pub struct FuzzCase {
    pub data: Vec<u8>,
    pub start: u8,
    pub commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug, Clone, Copy)]
pub enum RandomCommand {
    SetBitPos(u16),
    ReadBit,
    ReadBits(u8),
    ReadUInt(u8),
    ReadSInt(u8),
    BeginChunk(u16),
    EndChunk,
    ChunkFinished,
}

/// A reader that extracts bits one at a time, to check the real one.
#[derive(Debug)]
struct Oracle<'a> {
    data: &'a [u8],
    bit_index: u64,
    chunk_targets: Vec<u64>,
}

impl Oracle<'_> {
    fn len_bits(&self) -> u64 {
        self.data.len() as u64 * 8
    }

    fn bit(&self, bit_index: u64) -> bool {
        self.data
            .get((bit_index / 8) as usize)
            .is_some_and(|byte| byte >> (bit_index % 8) & 1 != 0)
    }

    fn set_bit_pos(&mut self, bit_index: u64) {
        self.bit_index = bit_index.min(self.len_bits());
    }

    fn read_bits(&mut self, n_bits: usize) -> Vec<u8> {
        let mut res = vec![0_u8; n_bits.div_ceil(8)];
        for i in 0..n_bits {
            if self.bit(self.bit_index + i as u64) {
                res[i / 8] |= 1 << (i % 8);
            }
        }
        self.set_bit_pos(self.bit_index + n_bits as u64);
        res
    }

    fn read_word(&mut self, n_bits: usize) -> Option<[u8; 4]> {
        if n_bits > 32 {
            return None;
        }
        let mut word = [0; 4];
        let bytes = self.read_bits(n_bits);
        word[..bytes.len()].copy_from_slice(&bytes);
        Some(word)
    }
}

pub fn harness(data: FuzzCase) {
    let start = (data.start as u64).min(data.data.len() as u64);
    let mut stream = MemByteStream::new(data.data.as_slice());
    stream.set_position(start).unwrap();
    let mut reader = BitStreamReader::new(&mut stream).unwrap();
    let mut oracle = Oracle {
        data: &data.data,
        bit_index: start * 8,
        chunk_targets: Vec::new(),
    };

    for command in data.commands {
        match command {
            RandomCommand::SetBitPos(bit_index) => {
                reader.set_bit_pos(bit_index as u64).unwrap();
                oracle.set_bit_pos(bit_index as u64);
            }
            RandomCommand::ReadBit => {
                let b = reader.read_bit().unwrap();
                assert_eq!(b, oracle.read_bits(1)[0] != 0);
            }
            RandomCommand::ReadBits(n_bits) => {
                let bytes = reader.read_bits(n_bits as usize).unwrap();
                assert_eq!(bytes, oracle.read_bits(n_bits as usize));
            }
            RandomCommand::ReadUInt(n_bits) => {
                let value = reader.read_uint(n_bits as usize).ok();
                let expected = oracle.read_word(n_bits as usize).map(u32::from_le_bytes);
                assert_eq!(value, expected);
            }
            RandomCommand::ReadSInt(n_bits) => {
                let value = reader.read_sint(n_bits as usize).ok();
                let expected = oracle.read_word(n_bits as usize).map(i32::from_le_bytes);
                assert_eq!(value, expected);
            }
            RandomCommand::BeginChunk(n_bits) => {
                reader.begin_chunk(n_bits as u64);
                oracle.chunk_targets.push(oracle.bit_index + n_bits as u64);
            }
            RandomCommand::EndChunk => {
                let res = reader.end_chunk();
                match oracle.chunk_targets.pop() {
                    Some(target) => {
                        assert!(res.is_ok());
                        oracle.set_bit_pos(target);
                    }
                    None => assert!(matches!(res, Err(BitStreamError::StackUnderflow))),
                }
            }
            RandomCommand::ChunkFinished => {
                let res = reader.chunk_finished().ok();
                let expected = oracle.chunk_targets.last().map(|t| oracle.bit_index >= *t);
                assert_eq!(res, expected);
            }
        }
        assert_eq!(reader.bit_pos(), oracle.bit_index);
        assert_eq!(reader.chunk_depth(), oracle.chunk_targets.len());
        assert_eq!(reader.backend().get_position(), oracle.bit_index / 8);
    }

    // the borrowed stream is left at the byte of the next bit
    let bit_index = reader.bit_pos();
    drop(reader);
    assert_eq!(stream.get_position(), bit_index / 8);
}
