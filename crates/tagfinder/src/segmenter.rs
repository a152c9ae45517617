//! Content segmentation over an explicit cursor.
//!
//! Normal mode copies text, passes CDATA sections through verbatim and drops comments.
//! Raw-text mode copies everything up to the element's literal closing tag.
//!
//! Invariant: the cursor only ever rests on a char boundary. It moves either to a `<`,
//! past an ASCII delimiter, or to the end of input.

use crate::decompose::{DecomposeConfig, DecomposeStats};
use crate::grammar::find_from;
use crate::matcher::{TagMatch, match_tag_at};
use crate::types::RawTextElement;
use memchr::memchr;

const COMMENT_START: &[u8] = b"<!--";
const COMMENT_END: &[u8] = b"-->";
const CDATA_START: &[u8] = b"<![CDATA[";
const CDATA_END: &[u8] = b"]]>";

/// Where a normal-mode segment stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Stop at the first `<` that does not open a comment or CDATA section.
    AnyMarkup,
    /// Stop only where the opening-tag grammar matches; other `<` are copied.
    OpeningTag,
}

pub struct Segmenter<'a> {
    input: &'a str,
    pos: usize,
    strip_comments: bool,
    stats: DecomposeStats,
}

impl<'a> Segmenter<'a> {
    pub fn new(input: &'a str, config: &DecomposeConfig) -> Self {
        Self {
            input,
            pos: 0,
            strip_comments: config.strip_comments,
            stats: DecomposeStats::default(),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Counters for the work done by this segmenter so far. Tag counts are left to
    /// the caller.
    pub fn stats(&self) -> DecomposeStats {
        self.stats
    }

    /// The opening tag starting exactly at the cursor, if any.
    pub fn opening_tag(&self) -> Option<TagMatch<'a>> {
        match_tag_at(self.input, self.pos)
    }

    /// Moves the cursor past `tag` and returns its markup.
    pub fn consume_tag(&mut self, tag: &TagMatch<'a>) -> &'a str {
        debug_assert_eq!(tag.offset, self.pos, "tag must start at the cursor");
        self.pos = tag.end();
        tag.markup
    }

    /// Captures one normal-mode segment, stopping before `boundary` or at end of input.
    pub fn normal(&mut self, boundary: Boundary) -> String {
        let input = self.input;
        let bytes = input.as_bytes();
        let len = bytes.len();
        let mut out = String::new();
        let mut copy_from = self.pos;
        let mut pos = self.pos;

        while pos < len {
            let Some(rel) = memchr(b'<', &bytes[pos..]) else {
                pos = len;
                break;
            };
            let lt = pos + rel;
            let rest = &bytes[lt..];

            if rest.starts_with(CDATA_START) {
                pos = self.skip_delimited(lt, CDATA_START, CDATA_END);
                self.stats.cdata_sections = self.stats.cdata_sections.saturating_add(1);
                continue;
            }

            if rest.starts_with(COMMENT_START) {
                let end = self.skip_delimited(lt, COMMENT_START, COMMENT_END);
                if self.strip_comments {
                    out.push_str(&input[copy_from..lt]);
                    copy_from = end;
                }
                pos = end;
                self.stats.comments = self.stats.comments.saturating_add(1);
                continue;
            }

            let stop = match boundary {
                Boundary::AnyMarkup => true,
                Boundary::OpeningTag => match_tag_at(input, lt).is_some(),
            };
            if stop {
                pos = lt;
                break;
            }
            self.stats.literal_angle_brackets = self.stats.literal_angle_brackets.saturating_add(1);
            pos = lt + 1;
        }

        out.push_str(&input[copy_from..pos]);
        self.pos = pos;
        out
    }

    /// Captures raw text for `element` up to (not including) its closing tag, or to
    /// end of input when the closing tag never appears.
    pub fn raw_text(&mut self, element: RawTextElement) -> String {
        let bytes = self.input.as_bytes();
        let close_tag = element.close_tag();
        let end = if element.honors_escaping() {
            self.find_escaped_close(close_tag)
        } else {
            find_from(bytes, close_tag, self.pos)
        };
        let end = end.unwrap_or_else(|| {
            #[cfg(any(test, feature = "debug-stats"))]
            log::trace!(
                target: "tagfinder.segmenter",
                "unterminated {} raw text @{}",
                element.name(),
                self.pos
            );
            bytes.len()
        });
        self.stats.raw_text_captures = self.stats.raw_text_captures.saturating_add(1);
        let text = self.input[self.pos..end].to_string();
        self.pos = end;
        text
    }

    /// Closing-tag search that skips over `<!-- ... -->` escaping spans. The comment
    /// terminator may share hyphens with the opener, so `<!-->` is a complete span.
    fn find_escaped_close(&self, close_tag: &[u8]) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let mut from = self.pos;
        loop {
            let close = find_from(bytes, close_tag, from);
            let escape = find_from(bytes, COMMENT_START, from);
            match (close, escape) {
                (Some(close), Some(escape)) if close < escape => return Some(close),
                (Some(close), None) => return Some(close),
                (_, Some(escape)) => from = find_from(bytes, COMMENT_END, escape + 1)?,
                (None, None) => return None,
            }
        }
    }

    /// Returns the offset just past `end`, searching after `start`, or end of input.
    fn skip_delimited(&self, at: usize, start: &[u8], end: &[u8]) -> usize {
        let bytes = self.input.as_bytes();
        match find_from(bytes, end, at + start.len()) {
            Some(found) => found + end.len(),
            None => {
                #[cfg(any(test, feature = "debug-stats"))]
                log::trace!(
                    target: "tagfinder.segmenter",
                    "unterminated {} @{at}",
                    String::from_utf8_lossy(start)
                );
                bytes.len()
            }
        }
    }
}
