#![no_main]

use libfuzzer_sys::fuzz_target;
use tagfinder::{DecomposeConfig, Decomposer};

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let mut decomposer = Decomposer::new(DecomposeConfig {
        strip_comments: false,
    });
    let result = decomposer.decompose(&input);
    assert_eq!(result.contents.len(), 1 + 3 * result.tags.len());
    assert_eq!(result.contents.concat(), input);
});
