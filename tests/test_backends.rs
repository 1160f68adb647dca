/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use bitchunk::prelude::*;
use mmap_rs::MmapFlags;
use std::io::{BufReader, Write};

const DATA: [u8; 6] = [0x96, 0x01, 0b1010_1100, 0xff, 0x00, 0x5a];

/// Read the same fields from any backend.
fn check<B: ByteStream>(backend: B) -> Result<B> {
    let mut reader = BitStreamReader::new(backend)?;
    assert_eq!(reader.len_bits(), 48);
    assert_eq!(reader.read_varint()?, 150);
    assert_eq!(reader.read_uint(2)?, 0b00);
    reader.begin_chunk(10);
    assert_eq!(reader.read_uint(6)?, 0b10_1011);
    reader.end_chunk()?;
    assert_eq!(reader.read_uint(12)?, 0x00f);
    assert_eq!(reader.read_bits(16)?, vec![0x5a, 0]);
    assert_eq!(reader.bits_left(), 0);
    Ok(reader.into_inner())
}

#[test]
fn test_mem() -> Result<()> {
    let stream = check(MemByteStream::new(DATA.to_vec()))?;
    assert_eq!(stream.get_position(), 6);
    assert_eq!(stream.into_inner(), DATA.to_vec());
    Ok(())
}

#[test]
fn test_file() -> Result<()> {
    let tmp = tempfile::NamedTempFile::new()?;
    tmp.as_file().write_all(&DATA)?;

    let file = std::fs::File::open(tmp.path())?;
    let backend = check(FileBackend::new(file)?)?;
    assert_eq!(backend.get_position(), 6);

    let file = BufReader::new(std::fs::File::open(tmp.path())?);
    let backend = check(FileBackend::new(file)?)?;
    assert_eq!(backend.len(), 6);
    Ok(())
}

#[test]
fn test_mmap() -> Result<()> {
    let tmp = tempfile::NamedTempFile::new()?;
    tmp.as_file().write_all(&DATA)?;
    let stream = check(mmap_file(tmp.path(), MmapFlags::empty())?)?;
    assert_eq!(stream.len(), 6);

    let empty = tempfile::NamedTempFile::new()?;
    assert!(mmap_file(empty.path(), MmapFlags::empty()).is_err());
    assert!(mmap_file(empty.path().with_extension("missing"), MmapFlags::empty()).is_err());
    Ok(())
}

#[test]
fn test_borrowed() -> Result<()> {
    let mut stream = MemByteStream::new(&DATA);
    stream.set_position(2)?;
    {
        // the reader starts at the current position of the stream
        let mut reader = BitStreamReader::new(&mut stream)?;
        assert_eq!(reader.bit_pos(), 16);
        assert_eq!(reader.read_byte()?, 0b1010_1100);
        reader.set_bit_pos(28)?;
    }
    // and leaves it at the byte containing the next bit
    assert_eq!(stream.get_position(), 3);

    let mut reader = BitStreamReader::new(&mut stream)?;
    assert_eq!(reader.bit_pos(), 24);
    assert_eq!(reader.read_byte()?, 0xff);

    // trait objects can be borrowed too
    let mut boxed: Box<dyn ByteStream> = Box::new(MemByteStream::new(DATA));
    let mut reader = BitStreamReader::new(boxed.as_mut())?;
    assert_eq!(reader.read_varint()?, 150);
    drop(reader);
    assert_eq!(boxed.get_position(), 2);
    Ok(())
}

/// A stream whose reads or seeks fail on request.
struct BrokenStream {
    position: u64,
    fail_read: bool,
    fail_seek: bool,
}

impl ByteStream for BrokenStream {
    fn len(&self) -> u64 {
        16
    }

    fn get_position(&self) -> u64 {
        self.position
    }

    fn set_position(&mut self, byte_index: u64) -> Result<()> {
        anyhow::ensure!(!self.fail_seek, "cannot seek to byte {}", byte_index);
        self.position = byte_index;
        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        anyhow::ensure!(!self.fail_read, "device unplugged at byte {}", self.position);
        buffer.fill(0xaa);
        self.position += buffer.len() as u64;
        Ok(buffer.len())
    }
}

#[test]
fn test_backend_errors() -> Result<()> {
    let mut stream = BrokenStream {
        position: 3,
        fail_read: true,
        fail_seek: false,
    };
    let mut reader = BitStreamReader::new(&mut stream)?;
    match reader.read_bits(12) {
        Err(BitStreamError::Backend(e)) => {
            assert_eq!(e.to_string(), "device unplugged at byte 3")
        }
        res => panic!("unexpected {:?}", res),
    }
    match reader.read_bit() {
        Err(err @ BitStreamError::Backend(_)) => {
            assert_eq!(err.to_string(), "device unplugged at byte 3")
        }
        res => panic!("unexpected {:?}", res),
    }
    assert!(matches!(
        reader.read_varint(),
        Err(BitStreamError::Backend(_))
    ));
    assert_eq!(reader.bit_pos(), 24);
    drop(reader);

    // seek failures surface from every move
    stream.fail_read = false;
    stream.fail_seek = true;
    let mut reader = BitStreamReader::new(&mut stream)?;
    reader.begin_chunk(5);
    match reader.end_chunk() {
        Err(BitStreamError::Backend(e)) => assert_eq!(e.to_string(), "cannot seek to byte 3"),
        res => panic!("unexpected {:?}", res),
    }
    assert!(matches!(
        reader.read_bits(8),
        Err(BitStreamError::Backend(_))
    ));
    assert!(matches!(
        reader.set_bit_pos(0),
        Err(BitStreamError::Backend(_))
    ));
    Ok(())
}
