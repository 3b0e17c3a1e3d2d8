#![no_main]

use ftui_hyphen::load_table;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = load_table(data);
});
