//! Character classes and token scanners for the opening-tag grammar.
//!
//! All scanners work on bytes. Every delimiter the grammar cares about is ASCII, and
//! bytes >= 0x80 (UTF-8 lead and continuation bytes) belong to both the attribute-name
//! and the unquoted-value classes, so every offset a scanner returns is a char boundary.

use memchr::memchr;
use std::ops::Range;

/// HTML space characters: space, tab, line feed, form feed, carriage return.
pub const fn is_html_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0c | b'\r')
}

pub fn is_html_space_char(c: char) -> bool {
    c.is_ascii() && is_html_space(c as u8)
}

/// Tag names are ASCII letters and digits only.
pub const fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Anything except spaces, control characters, DEL, quotes, `=`, angle brackets and `/`.
pub const fn is_attribute_name_byte(b: u8) -> bool {
    !(b < 0x20 || b == 0x7f || matches!(b, b' ' | b'"' | b'\'' | b'=' | b'<' | b'>' | b'/'))
}

/// Anything except spaces, quotes, `=`, angle brackets and backtick.
pub const fn is_unquoted_value_byte(b: u8) -> bool {
    !(is_html_space(b) || matches!(b, b'"' | b'\'' | b'=' | b'<' | b'>' | b'`'))
}

pub(crate) fn scan_while(bytes: &[u8], mut pos: usize, pred: impl Fn(u8) -> bool) -> usize {
    while pos < bytes.len() && pred(bytes[pos]) {
        pos += 1;
    }
    pos
}

pub(crate) fn skip_spaces(bytes: &[u8], pos: usize) -> usize {
    scan_while(bytes, pos, is_html_space)
}

/// One attribute token located inside a byte buffer.
///
/// `value` is the raw value span, quotes included; `None` for a bare attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AttributeToken {
    pub name: Range<usize>,
    pub value: Option<Range<usize>>,
    pub end: usize,
}

fn scan_name(bytes: &[u8], pos: usize) -> Option<Range<usize>> {
    let end = scan_while(bytes, pos, is_attribute_name_byte);
    (end > pos).then_some(pos..end)
}

/// Scans one value token: `'...'`, `"..."` (no escapes, anything up to the matching
/// quote) or a non-empty unquoted run. Returns the end offset of the value.
pub(crate) fn scan_value(bytes: &[u8], pos: usize) -> Option<usize> {
    match bytes.get(pos)? {
        quote @ (b'"' | b'\'') => {
            let rel = memchr(*quote, &bytes[pos + 1..])?;
            Some(pos + 1 + rel + 1)
        }
        _ => {
            let end = scan_while(bytes, pos, is_unquoted_value_byte);
            (end > pos).then_some(end)
        }
    }
}

/// `spaces* name spaces* '=' spaces* value`, anchored at `pos`.
pub(crate) fn scan_name_value(bytes: &[u8], pos: usize) -> Option<AttributeToken> {
    let name = scan_name(bytes, skip_spaces(bytes, pos))?;
    let eq = skip_spaces(bytes, name.end);
    if bytes.get(eq) != Some(&b'=') {
        return None;
    }
    let value_start = skip_spaces(bytes, eq + 1);
    let end = scan_value(bytes, value_start)?;
    Some(AttributeToken {
        name,
        value: Some(value_start..end),
        end,
    })
}

/// `spaces* name`, anchored at `pos`.
pub(crate) fn scan_bare_name(bytes: &[u8], pos: usize) -> Option<AttributeToken> {
    let name = scan_name(bytes, skip_spaces(bytes, pos))?;
    let end = name.end;
    Some(AttributeToken {
        name,
        value: None,
        end,
    })
}

/// Attribute as it appears inside an opening tag: a name, optionally followed by a
/// value. A `=` that is not followed by a valid value makes the whole token invalid.
pub(crate) fn scan_tag_attribute(bytes: &[u8], pos: usize) -> Option<AttributeToken> {
    let name = scan_name(bytes, pos)?;
    let eq = skip_spaces(bytes, name.end);
    if bytes.get(eq) != Some(&b'=') {
        let end = name.end;
        return Some(AttributeToken {
            name,
            value: None,
            end,
        });
    }
    let value_start = skip_spaces(bytes, eq + 1);
    let end = scan_value(bytes, value_start)?;
    Some(AttributeToken {
        name,
        value: Some(value_start..end),
        end,
    })
}

/// Byte-level substring search starting at `from`. Returns an absolute offset.
pub(crate) fn find_from(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    memchr::memmem::find(&haystack[from..], needle).map(|rel| from + rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_space_set_is_exactly_five_characters() {
        let spaces: Vec<u8> = (0u8..=0x7f).filter(|b| is_html_space(*b)).collect();
        assert_eq!(spaces, vec![b'\t', b'\n', 0x0c, b'\r', b' ']);
        assert!(!is_html_space(0x0b), "vertical tab is not an HTML space");
        assert!(is_html_space_char('\u{c}'));
        assert!(!is_html_space_char('\u{a0}'));
    }

    #[test]
    fn attribute_names_exclude_structural_bytes() {
        for b in [b' ', b'\t', 0x00, 0x1f, 0x7f, b'"', b'\'', b'=', b'<', b'>', b'/'] {
            assert!(!is_attribute_name_byte(b), "byte {b:#04x} must not be a name byte");
        }
        for b in [b'a', b'-', b':', b'`', b'&', 0xc3, 0xa9] {
            assert!(is_attribute_name_byte(b), "byte {b:#04x} must be a name byte");
        }
    }

    #[test]
    fn unquoted_values_allow_slash_but_not_backtick() {
        assert!(is_unquoted_value_byte(b'/'));
        assert!(is_unquoted_value_byte(0x01));
        assert!(!is_unquoted_value_byte(b'`'));
        assert!(!is_unquoted_value_byte(b'='));
    }

    #[test]
    fn scan_value_handles_each_value_form() {
        assert_eq!(scan_value(b"'a b'x", 0), Some(5));
        assert_eq!(scan_value(b"\"a'b\"", 0), Some(5));
        assert_eq!(scan_value(b"abc def", 0), Some(3));
        assert_eq!(scan_value(b"'unterminated", 0), None);
        assert_eq!(scan_value(b"=x", 0), None);
        assert_eq!(scan_value(b"", 0), None);
    }

    #[test]
    fn scan_name_value_allows_spaces_around_equals() {
        let token = scan_name_value(b"  class = \"b c \"", 0).expect("token");
        assert_eq!(token.name, 2..7);
        assert_eq!(token.value, Some(10..16));
        assert_eq!(token.end, 16);
    }

    #[test]
    fn scan_name_value_requires_a_value() {
        assert_eq!(scan_name_value(b" disabled", 0), None);
        assert_eq!(scan_name_value(b" a=", 0), None);
        let bare = scan_bare_name(b" disabled", 0).expect("bare");
        assert_eq!(bare.name, 1..9);
        assert_eq!(bare.value, None);
    }

    #[test]
    fn tag_attribute_with_dangling_equals_is_invalid() {
        assert_eq!(scan_tag_attribute(b"a= >", 0), None);
        let bare = scan_tag_attribute(b"a >", 0).expect("bare attribute");
        assert_eq!(bare.end, 1);
    }

    #[test]
    fn find_from_is_absolute_and_bounds_checked() {
        assert_eq!(find_from(b"--> -->", b"-->", 1), Some(4));
        assert_eq!(find_from(b"abc", b"-->", 4), None);
        assert_eq!(find_from(b"abc", b"c", 3), None);
    }
}
