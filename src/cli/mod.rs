/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Command-line interface structs, functions, and methods.
//!
//! Each command is implemented as a submodule.

use crate::prelude::*;
use anyhow::{Context, Result};
use clap::{Args, Command};
use log::{info, warn};
use mmap_rs::MmapFlags;
use std::io::Write;
use std::path::PathBuf;
use std::time::SystemTime;

pub mod dump;
pub mod fields;

/// Shared CLI arguments for commands that read a file.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// The file to read.
    pub path: PathBuf,

    #[arg(short, long, default_value_t = 0)]
    /// The bit to start reading from.
    pub offset: u64,

    #[arg(long, default_value_t = false)]
    /// Memory map the file instead of reading it through a buffer.
    pub mmap: bool,
}

impl InputArgs {
    /// Open the file as a [`ByteStream`] trait object.
    pub fn open(&self) -> Result<Box<dyn ByteStream>> {
        if self.mmap {
            return Ok(Box::new(mmap_file(&self.path, MmapFlags::empty())?));
        }
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("Cannot open {}", self.path.display()))?;
        // unbuffered, as the reader seeks after every read
        Ok(Box::new(FileBackend::new(file).with_context(|| {
            format!("Cannot read {}", self.path.display())
        })?))
    }

    /// Build a reader on `stream` positioned at the requested offset.
    pub fn reader<B: ByteStream>(&self, stream: B) -> Result<BitStreamReader<B>> {
        let mut reader = BitStreamReader::new(stream)?;
        if self.offset > reader.len_bits() {
            warn!(
                "Offset {} is past the end of {} ({} bits)",
                self.offset,
                self.path.display(),
                reader.len_bits()
            );
        }
        reader.set_bit_pos(self.offset)?;
        info!(
            "Reading {} from bit {} of {}",
            self.path.display(),
            reader.bit_pos(),
            reader.len_bits()
        );
        Ok(reader)
    }
}

/// Initialize env_logger with a timestamped format; the default level is
/// `info` and can be changed with the `RUST_LOG` environment variable.
pub fn init_env_logger() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    let start = std::time::Instant::now();
    builder.format(move |buf, record| {
        use jiff::fmt::friendly::{Designator, Spacing, SpanPrinter};
        let Ok(ts) = jiff::Timestamp::try_from(SystemTime::now()) else {
            return Err(std::io::Error::other("Failed to get timestamp"));
        };
        let style = buf.default_level_style(record.level());
        let elapsed = start.elapsed();
        let span = jiff::Span::new()
            .seconds(elapsed.as_secs() as i64)
            .milliseconds(elapsed.subsec_millis() as i64);
        let printer = SpanPrinter::new()
            .spacing(Spacing::None)
            .designator(Designator::Compact);
        writeln!(
            buf,
            "{} {} {style}{}{style:#} [{:?}] {} - {}",
            ts.strftime("%F %T%.3f"),
            printer.span_to_string(&span),
            record.level(),
            std::thread::current().id(),
            record.target(),
            record.args()
        )
    });
    builder.try_init()?;
    Ok(())
}

/// The entry point of the command-line interface.
pub fn main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let command = Command::new("bitchunk")
        .about("Inspect binary files bit by bit.")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .after_help(
            "Environment (noteworthy environment variables used):
RUST_LOG: configuration for env_logger, pass `debug` to see chunk boundaries
  and `trace` to see every raw read. You can also use `RUST_LOG=bitchunk=debug`
  to see only the bitchunk logs.
",
        );
    let command = dump::cli(command);
    let command = fields::cli(command);
    let matches = command.get_matches_from(args);

    match matches.subcommand() {
        Some((dump::COMMAND_NAME, sub_m)) => dump::main(sub_m),
        Some((fields::COMMAND_NAME, sub_m)) => fields::main(sub_m),
        // clap catches unknown and missing subcommands
        _ => unreachable!(),
    }
}
