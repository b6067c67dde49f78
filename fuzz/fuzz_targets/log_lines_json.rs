#![no_main]

use completion_stats_replay::partition_log;
use libfuzzer_sys::fuzz_target;

const MAX_INPUT_BYTES: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_BYTES {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let partition = partition_log(text);
    let bucketed = partition.valid.len() + partition.invalid.len() + partition.malformed.len();
    assert!(bucketed <= text.lines().count());
});
