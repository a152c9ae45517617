//! Attribute tokenizer and class-list extraction for a matched tag.

use crate::grammar::{is_html_space_char, scan_bare_name, scan_name_value};
use std::collections::BTreeMap;

/// Yields `(name, value)` pairs from an attribute span in document order.
///
/// Each step tries `name = value` first and falls back to a bare name. Quoted values
/// lose their surrounding quotes; bare attributes yield an empty value. Iteration stops
/// at the first position where neither form matches.
pub struct AttributeTokenizer<'a> {
    span: &'a str,
    pos: usize,
}

impl<'a> AttributeTokenizer<'a> {
    pub fn new(span: &'a str) -> Self {
        Self { span, pos: 0 }
    }
}

impl<'a> Iterator for AttributeTokenizer<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.span.as_bytes();
        if self.pos >= bytes.len() {
            return None;
        }
        let token = scan_name_value(bytes, self.pos).or_else(|| scan_bare_name(bytes, self.pos));
        let Some(token) = token else {
            self.pos = bytes.len();
            return None;
        };
        self.pos = token.end;
        let name = &self.span[token.name];
        let value = token
            .value
            .map_or("", |range| strip_quotes(&self.span[range]));
        Some((name, value))
    }
}

fn strip_quotes(value: &str) -> &str {
    match value.as_bytes().first() {
        Some(b'"' | b'\'') if value.len() >= 2 => &value[1..value.len() - 1],
        _ => value,
    }
}

/// Collects an attribute span into a map. A repeated name keeps its last value.
pub fn parse_attributes(span: &str) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    for (name, value) in AttributeTokenizer::new(span) {
        attributes.insert(name.to_string(), value.to_string());
    }
    attributes
}

/// Removes `class` from `attributes` and splits its value on HTML space runs.
pub fn extract_classes(attributes: &mut BTreeMap<String, String>) -> Vec<String> {
    let Some(value) = attributes.remove("class") else {
        return Vec::new();
    };
    value
        .split(is_html_space_char)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(span: &str) -> Vec<(&str, &str)> {
        AttributeTokenizer::new(span).collect()
    }

    #[test]
    fn tokenizes_every_value_form() {
        assert_eq!(
            pairs("a1=a b = 'x y' c=\"z\" disabled d='' e=\"\""),
            vec![
                ("a1", "a"),
                ("b", "x y"),
                ("c", "z"),
                ("disabled", ""),
                ("d", ""),
                ("e", ""),
            ]
        );
    }

    #[test]
    fn quoted_values_keep_inner_whitespace_and_other_quote() {
        assert_eq!(pairs("title=\" it's \""), vec![("title", " it's ")]);
        assert_eq!(pairs("data-x='say \"hi\"'"), vec![("data-x", "say \"hi\"")]);
    }

    #[test]
    fn stops_at_unparseable_remainder() {
        assert_eq!(pairs("a=1 =oops b=2"), vec![("a", "1")]);
        assert_eq!(pairs("a="), vec![("a", "")]);
        assert!(pairs("").is_empty());
        assert!(pairs("   ").is_empty());
    }

    #[test]
    fn last_occurrence_wins() {
        let attributes = parse_attributes("id=first x id='second'");
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes["id"], "second");
        assert_eq!(attributes["x"], "");
    }

    #[test]
    fn class_is_promoted_and_split() {
        let mut attributes = parse_attributes("a1='a' class = \"b c \"");
        let classes = extract_classes(&mut attributes);
        assert_eq!(classes, vec!["b", "c"]);
        assert!(!attributes.contains_key("class"));
        assert_eq!(attributes["a1"], "a");
    }

    #[test]
    fn class_split_uses_only_html_spaces() {
        let mut attributes = parse_attributes("class=\"\tone\n\ntwo\u{c}three\u{a0}four \r\"");
        assert_eq!(
            extract_classes(&mut attributes),
            vec!["one", "two", "three\u{a0}four"]
        );
    }

    #[test]
    fn empty_or_missing_class_yields_no_tokens() {
        let mut bare = parse_attributes("a1 class");
        assert!(extract_classes(&mut bare).is_empty());
        assert!(!bare.contains_key("class"));
        assert_eq!(bare["a1"], "");

        let mut spaces = parse_attributes("class='  '");
        assert!(extract_classes(&mut spaces).is_empty());

        let mut none = parse_attributes("id=x");
        assert!(extract_classes(&mut none).is_empty());
        assert_eq!(none.len(), 1);
    }
}
