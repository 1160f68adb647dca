/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "fuzz")]
use anyhow::Result;

macro_rules! impl_fuzz_repr {
    ($func_name:ident, $func_random_name:ident, $fuzz_name:ident) => {
        #[cfg(feature = "fuzz")]
        #[test]
        fn $func_name() -> Result<()> {
            use arbitrary::Arbitrary;
            let dir = format!("fuzz/corpus/{}", stringify!($fuzz_name));
            if !std::path::Path::new(&dir).exists() {
                eprintln!("The corpus directory {} does not exist", dir);
                return Ok(());
            }
            for file in std::fs::read_dir(&dir)? {
                let file = file?;

                if file.file_type()?.is_dir() {
                    continue;
                }

                let file_bytes = std::fs::read(file.path())?;
                let mut unstructured = arbitrary::Unstructured::new(&file_bytes);
                let data = bitchunk::fuzz::$fuzz_name::FuzzCase::arbitrary(&mut unstructured)?;
                bitchunk::fuzz::$fuzz_name::harness(data);
            }

            Ok(())
        }

        #[cfg(feature = "fuzz")]
        #[test]
        fn $func_random_name() -> Result<()> {
            use arbitrary::Arbitrary;
            use rand::rngs::SmallRng;
            use rand::{Rng, SeedableRng};

            let mut rng = SmallRng::seed_from_u64(0);
            for _ in 0..1000 {
                let len = rng.random_range(0..4096);
                let bytes = (0..len).map(|_| rng.random::<u8>()).collect::<Vec<_>>();
                let mut unstructured = arbitrary::Unstructured::new(&bytes);
                let data = bitchunk::fuzz::$fuzz_name::FuzzCase::arbitrary(&mut unstructured)?;
                bitchunk::fuzz::$fuzz_name::harness(data);
            }

            Ok(())
        }
    };
}

impl_fuzz_repr!(
    fuzz_bit_stream_reader,
    fuzz_bit_stream_reader_random,
    bit_stream_reader
);
