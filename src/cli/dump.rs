/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::InputArgs;
use crate::prelude::*;
use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches};
use log::info;
use std::io::Write;

pub const COMMAND_NAME: &str = "dump";

/// The number of bits printed on each line.
const LINE_BITS: usize = 64;

#[derive(Args, Debug)]
#[command(about = "Print the bits of a file as hex bytes and as bit strings", long_about = None)]
struct CliArgs {
    #[clap(flatten)]
    input: InputArgs,

    #[arg(short, long, default_value_t = 256)]
    /// How many bits to print.
    bits: u64,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;
    let mut stream = args.input.open()?;
    let mut reader = args.input.reader(stream.as_mut())?;
    let mut stdout = std::io::stdout().lock();
    dump(&mut reader, args.bits, &mut stdout)
}

/// Write `n_bits` bits from the current position, [`LINE_BITS`] per line,
/// stopping early at the end of the stream.
pub fn dump<R: BitRead + BitSeek>(
    reader: &mut R,
    n_bits: u64,
    out: &mut impl Write,
) -> Result<()> {
    let end = reader.bit_pos().saturating_add(n_bits).min(reader.len_bits());
    if end - reader.bit_pos() < n_bits {
        info!("Stopping at the end of the stream, bit {}", end);
    }
    while reader.bit_pos() < end {
        let bit_pos = reader.bit_pos();
        let line_bits = ((end - bit_pos) as usize).min(LINE_BITS);
        let bytes = reader.read_bits(line_bits)?;
        let hex = bytes
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            out,
            "{:>12}  {:<23}  {}",
            bit_pos,
            hex,
            fmt_bits(&bytes, line_bits)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_dump() -> Result<()> {
        let data = [0x01_u8, 0x80, 0xff];
        let mut reader = BitStreamReader::new(MemByteStream::new(&data))?;
        reader.set_bit_pos(4)?;
        let mut out = Vec::new();
        dump(&mut reader, 1000, &mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            format!("{:>12}  {:<23}  {}\n", 4, "00 f8 0f", "00000000 00011111 1111")
        );
        assert_eq!(reader.bit_pos(), 24);
        Ok(())
    }
}
