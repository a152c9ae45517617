//! Opening-tag matcher.
//!
//! Grammar: `<` name (spaces+ attribute)* spaces* `/`? `>` where name is `[A-Za-z0-9]+`
//! and an attribute is a name optionally followed by `spaces* = spaces* value`.
//!
//! The grammar is unambiguous for a forward scan: tag and attribute names are maximal
//! runs, and a failed attribute can never be recovered by a shorter alternative, so a
//! single pass per candidate `<` decides the match.

use crate::grammar::{is_tag_name_byte, scan_tag_attribute, scan_while, skip_spaces};
use memchr::memchr;

/// A matched opening tag, borrowed from the searched text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagMatch<'a> {
    /// Byte offset of the `<` within the searched text.
    pub offset: usize,
    /// The whole tag, `<` through `>`.
    pub markup: &'a str,
    pub name: &'a str,
    /// Attribute tokens as written, without the spaces around them. Empty when the tag
    /// has no attributes.
    pub attributes: &'a str,
    pub self_closing: bool,
}

impl TagMatch<'_> {
    pub fn len(&self) -> usize {
        self.markup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }

    pub fn end(&self) -> usize {
        self.offset + self.markup.len()
    }
}

/// Matches an opening tag starting exactly at `pos`.
pub fn match_tag_at(input: &str, pos: usize) -> Option<TagMatch<'_>> {
    let bytes = input.as_bytes();
    if bytes.get(pos) != Some(&b'<') {
        return None;
    }
    let name_start = pos + 1;
    let name_end = scan_while(bytes, name_start, is_tag_name_byte);
    if name_end == name_start {
        return None;
    }

    let mut attributes_start = None;
    let mut attributes_end = name_end;
    let mut cursor = name_end;
    loop {
        let after_spaces = skip_spaces(bytes, cursor);
        let (end, self_closing) = match bytes.get(after_spaces) {
            None => return None,
            Some(b'>') => (after_spaces + 1, false),
            Some(b'/') if bytes.get(after_spaces + 1) == Some(&b'>') => (after_spaces + 2, true),
            Some(_) => {
                // Every attribute needs at least one space before it.
                if after_spaces == cursor {
                    return None;
                }
                let token = scan_tag_attribute(bytes, after_spaces)?;
                attributes_start.get_or_insert(after_spaces);
                attributes_end = token.end;
                cursor = token.end;
                continue;
            }
        };
        let attributes = attributes_start.map_or("", |start| &input[start..attributes_end]);
        return Some(TagMatch {
            offset: pos,
            markup: &input[pos..end],
            name: &input[name_start..name_end],
            attributes,
            self_closing,
        });
    }
}

/// Finds the leftmost opening tag at or after `from`.
///
/// Offsets in the returned match are relative to `input`, not to `from`.
pub fn find_tag(input: &str, from: usize) -> Option<TagMatch<'_>> {
    let bytes = input.as_bytes();
    let mut pos = from;
    while pos < bytes.len() {
        pos += memchr(b'<', &bytes[pos..])?;
        if let Some(found) = match_tag_at(input, pos) {
            return Some(found);
        }
        pos += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(input: &str) -> TagMatch<'_> {
        match_tag_at(input, 0).unwrap_or_else(|| panic!("expected a tag match for {input:?}"))
    }

    #[test]
    fn matches_plain_and_self_closing_tags() {
        let tag = matched("<tag1></tag1>");
        assert_eq!(tag.markup, "<tag1>");
        assert_eq!(tag.name, "tag1");
        assert_eq!(tag.attributes, "");
        assert!(!tag.self_closing);

        assert!(matched("<tag2 >").markup == "<tag2 >");
        assert!(matched("<tag3/>").self_closing);
        assert!(matched("<tag4 \t/>").self_closing);
    }

    #[test]
    fn attribute_span_excludes_surrounding_spaces() {
        let tag = matched("<tag a1='a' class = \"b c \"  >rest");
        assert_eq!(tag.name, "tag");
        assert_eq!(tag.attributes, "a1='a' class = \"b c \"");
        assert_eq!(tag.markup, "<tag a1='a' class = \"b c \"  >");
        assert_eq!(tag.end(), tag.markup.len());
    }

    #[test]
    fn quoted_values_may_contain_angle_brackets_and_newlines() {
        let tag = matched("<a title=\"x > y\nz\">");
        assert_eq!(tag.attributes, "title=\"x > y\nz\"");
    }

    #[test]
    fn unquoted_value_swallows_trailing_slash() {
        let tag = matched("<a href=x/>");
        assert!(!tag.self_closing);
        assert_eq!(tag.attributes, "href=x/");
        assert!(matched("<a href=x />").self_closing);
    }

    #[test]
    fn rejects_non_tags() {
        for input in [
            "</p>",
            "<!doctype html>",
            "< p>",
            "<>",
            "<p",
            "<p a=>",
            "<p a='x>",
            "<p a=\"x\"b>",
            "<p/ >",
            "<p-x>",
            "<p a=`x`>",
            "<é>",
        ] {
            assert_eq!(match_tag_at(input, 0), None, "{input:?} must not match");
        }
    }

    #[test]
    fn attribute_names_may_be_non_ascii() {
        let tag = matched("<p données=1 naïve>");
        assert_eq!(tag.attributes, "données=1 naïve");
    }

    #[test]
    fn find_tag_reports_leftmost_offset() {
        let input = "a < b </x> <!x> <em class=c>t</em>";
        let tag = find_tag(input, 0).expect("tag");
        assert_eq!(tag.offset, 16);
        assert_eq!(tag.markup, "<em class=c>");
        assert_eq!(find_tag(input, tag.end()), None);
    }

    #[test]
    fn find_tag_handles_many_bare_angle_brackets() {
        let input = "<".repeat(100_000);
        assert_eq!(find_tag(&input, 0), None);
    }
}
