//! Single-pass decomposition of HTML markup into content segments and opening-tag
//! descriptors, without building a DOM.
//!
//! This is a lexical decomposer, not a validating parser:
//! - character references are left as written;
//! - tag names are `[A-Za-z0-9]+` and keep their casing;
//! - malformed markup never fails, it degrades into literal text;
//! - comments are removed from normal content, CDATA sections pass through verbatim;
//! - `script`, `style`, `title` and `textarea` content is captured up to the literal
//!   closing tag, with `<!-- -->` escaping honored for `script` and `style` only.
//!
//! ```
//! let result = tagfinder::decompose(" <p id=a class='x y'>hi</p>");
//! assert_eq!(result.contents, [" ", "<p id=a class='x y'>", "hi", "</p>"]);
//! assert_eq!(result.tags[0].attribute("id"), Some("a"));
//! assert_eq!(result.tags[0].classes, ["x", "y"]);
//! ```

pub mod attributes;
pub mod decompose;
pub mod grammar;
pub mod matcher;
pub mod perf_fixtures;
pub mod segmenter;
pub mod snapshot;
mod types;

pub use crate::attributes::{AttributeTokenizer, extract_classes, parse_attributes};
pub use crate::decompose::{
    DecomposeConfig, DecomposeStats, Decomposer, SegmenterState, decompose, decompose_optional,
};
pub use crate::matcher::{TagMatch, find_tag, match_tag_at};
pub use crate::segmenter::{Boundary, Segmenter};
pub use crate::types::{Decomposition, RawTextElement, TagDescriptor};
