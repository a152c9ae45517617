#![no_main]

use libfuzzer_sys::fuzz_target;
use tagfinder::{decompose, find_tag};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let result = decompose(input);
    assert_eq!(result.contents.len(), 1 + 3 * result.tags.len());
    for (k, tag) in result.tags.iter().enumerate() {
        assert_eq!(tag.index, 1 + 3 * k);
        assert!(!tag.attributes.contains_key("class"));
        let markup = result.tag_markup(tag);
        let matched = find_tag(markup, 0).expect("tag markup re-matches");
        assert_eq!(matched.markup, markup);
        assert_eq!(matched.self_closing, tag.void_element);
    }
});
