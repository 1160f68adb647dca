#![no_main]

use bitchunk::fuzz::bit_stream_reader::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzCase| harness(data));
