/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::InputArgs;
use crate::prelude::*;
use anyhow::{Context, Result};
use clap::{ArgMatches, Args, Command, FromArgMatches};
use log::warn;
use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

pub const COMMAND_NAME: &str = "fields";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseFieldError {
    #[error("Unknown field '{0}'")]
    Unknown(String),
    #[error("Invalid width in field '{0}'")]
    InvalidWidth(String),
    #[error("Field '{token}' is wider than {max} bits")]
    TooWide { token: String, max: usize },
}

/// A field of a layout, that is, a single operation on the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `bit`
    Bit,
    /// `byte`
    Byte,
    /// `u<K>`, at most 32 bits
    UInt(usize),
    /// `s<K>`, at most 32 bits
    SInt(usize),
    /// `f32`
    Float,
    /// `varint`
    VarInt,
    /// `ubit`
    UBitInt,
    /// `str`, NUL-terminated
    Str,
    /// `cstr<K>`, exactly `K` bytes
    CStr(usize),
    /// `skip<K>`
    Skip(u64),
    /// `chunk<K>`
    Chunk(u64),
    /// `end`, closing the innermost chunk
    End,
}

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let width = |prefix: &str| {
            s[prefix.len()..]
                .parse::<usize>()
                .map_err(|_| ParseFieldError::InvalidWidth(s.to_owned()))
        };
        let at_most = |n_bits: usize, max: usize| {
            if n_bits > max {
                return Err(ParseFieldError::TooWide {
                    token: s.to_owned(),
                    max,
                });
            }
            Ok(n_bits)
        };
        Ok(match s {
            "bit" => Field::Bit,
            "byte" => Field::Byte,
            "f32" => Field::Float,
            "varint" => Field::VarInt,
            "ubit" => Field::UBitInt,
            "str" => Field::Str,
            "end" => Field::End,
            _ if s.starts_with("cstr") => Field::CStr(width("cstr")?),
            _ if s.starts_with("skip") => Field::Skip(width("skip")? as u64),
            _ if s.starts_with("chunk") => Field::Chunk(width("chunk")? as u64),
            _ if s.starts_with('u') => Field::UInt(at_most(width("u")?, 32)?),
            _ if s.starts_with('s') => Field::SInt(at_most(width("s")?, 32)?),
            _ => return Err(ParseFieldError::Unknown(s.to_owned())),
        })
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Bit => write!(f, "bit"),
            Field::Byte => write!(f, "byte"),
            Field::UInt(n_bits) => write!(f, "u{}", n_bits),
            Field::SInt(n_bits) => write!(f, "s{}", n_bits),
            Field::Float => write!(f, "f32"),
            Field::VarInt => write!(f, "varint"),
            Field::UBitInt => write!(f, "ubit"),
            Field::Str => write!(f, "str"),
            Field::CStr(len) => write!(f, "cstr{}", len),
            Field::Skip(n_bits) => write!(f, "skip{}", n_bits),
            Field::Chunk(n_bits) => write!(f, "chunk{}", n_bits),
            Field::End => write!(f, "end"),
        }
    }
}

#[derive(Args, Debug)]
#[command(about = "Decode a sequence of fields", long_about = None)]
struct CliArgs {
    #[clap(flatten)]
    input: InputArgs,

    #[arg(required = true)]
    /// The fields to decode, in order: bit, byte, u<K>, s<K>, f32, varint,
    /// ubit, str, cstr<K>, skip<K>, chunk<K>, and end.
    layout: Vec<Field>,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;
    let mut stream = args.input.open()?;
    let mut reader = args.input.reader(stream.as_mut())?;
    let mut stdout = std::io::stdout().lock();
    decode(&mut reader, &args.layout, &mut stdout)
}

/// Decode `layout`, writing a line with the starting bit, the field and its
/// value for each field that has a value.
pub fn decode<R: BitRead + ChunkRead>(
    reader: &mut R,
    layout: &[Field],
    out: &mut impl Write,
) -> Result<()> {
    for field in layout {
        let bit_pos = reader.bit_pos();
        let value = match *field {
            Field::Bit => (reader.read_bit()? as u8).to_string(),
            Field::Byte => format!("{:#04x}", reader.read_byte()?),
            Field::UInt(n_bits) => reader.read_uint(n_bits)?.to_string(),
            Field::SInt(n_bits) => reader.read_sint(n_bits)?.to_string(),
            Field::Float => reader.read_float()?.to_string(),
            Field::VarInt => reader.read_varint()?.to_string(),
            Field::UBitInt => reader.read_ubit_int()?.to_string(),
            Field::Str => format!("{:?}", reader.read_string(usize::MAX)?),
            Field::CStr(len) => format!("{:?}", reader.read_cstring(len)?),
            Field::Skip(n_bits) => {
                reader.set_bit_pos(bit_pos.saturating_add(n_bits))?;
                continue;
            }
            Field::Chunk(n_bits) => {
                reader.begin_chunk(n_bits);
                continue;
            }
            Field::End => {
                reader
                    .end_chunk()
                    .with_context(|| format!("Unbalanced 'end' at bit {}", bit_pos))?;
                continue;
            }
        };
        writeln!(out, "{}\t{}\t{}", bit_pos, field, value)?;
    }
    if reader.chunk_depth() != 0 {
        warn!("{} chunks were left open", reader.chunk_depth());
    }
    Ok(())
}
