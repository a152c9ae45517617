//! Deterministic line formatting of a [`Decomposition`] for golden tests and CLI output.
//!
//! One line per content element, in order. A tag's `TAG` line is written directly
//! before the `CONTENT` line holding its markup:
//!
//! ```text
//! CONTENT 0 " "
//! TAG name=p index=1 void=false attrs=[id="a"] classes=["x" "y"]
//! CONTENT 1 "<p id=a class='x y'>"
//! ```

use crate::types::{Decomposition, TagDescriptor};
use std::fmt::Write;

pub const SNAPSHOT_FORMAT_V1: &str = "tagfinder-decompose-v1";

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => {
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

pub fn format_tag(tag: &TagDescriptor) -> String {
    let mut out = String::new();
    let _ = write!(
        &mut out,
        "TAG name={} index={} void={} attrs=[",
        tag.tag, tag.index, tag.void_element
    );
    for (i, (name, value)) in tag.attributes.iter().enumerate() {
        if i != 0 {
            out.push(' ');
        }
        let _ = write!(&mut out, "{}=\"{}\"", escape_text(name), escape_text(value));
    }
    out.push_str("] classes=[");
    for (i, class) in tag.classes.iter().enumerate() {
        if i != 0 {
            out.push(' ');
        }
        let _ = write!(&mut out, "\"{}\"", escape_text(class));
    }
    out.push(']');
    out
}

pub fn format_decomposition(decomposition: &Decomposition) -> Vec<String> {
    let mut lines = Vec::with_capacity(decomposition.contents.len() + decomposition.tags.len());
    let mut tags = decomposition.tags.iter().peekable();
    for (index, content) in decomposition.contents.iter().enumerate() {
        while let Some(tag) = tags.next_if(|tag| tag.index == index) {
            lines.push(format_tag(tag));
        }
        lines.push(format!("CONTENT {index} \"{}\"", escape_text(content)));
    }
    lines
}
