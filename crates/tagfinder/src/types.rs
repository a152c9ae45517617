use std::collections::BTreeMap;

/// Elements whose content is captured verbatim up to their closing tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawTextElement {
    Script,
    Style,
    Title,
    Textarea,
}

impl RawTextElement {
    /// Exact-case lookup; `SCRIPT` is an ordinary element.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "script" => Some(Self::Script),
            "style" => Some(Self::Style),
            "title" => Some(Self::Title),
            "textarea" => Some(Self::Textarea),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Style => "style",
            Self::Title => "title",
            Self::Textarea => "textarea",
        }
    }

    pub fn close_tag(self) -> &'static [u8] {
        match self {
            Self::Script => b"</script",
            Self::Style => b"</style",
            Self::Title => b"</title",
            Self::Textarea => b"</textarea",
        }
    }

    /// `script` and `style` let `<!-- ... -->` hide a closing-tag lookalike.
    pub fn honors_escaping(self) -> bool {
        matches!(self, Self::Script | Self::Style)
    }
}

/// One opening tag found in the document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TagDescriptor {
    /// Tag name with its original casing.
    pub tag: String,
    /// Index of the tag markup in [`Decomposition::contents`]; always `1 + 3 * k`.
    pub index: usize,
    /// Set when the tag ends in `/>`.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "voidElement", skip_serializing_if = "is_false")
    )]
    pub void_element: bool,
    /// Attribute values with surrounding quotes removed. Never contains `class`.
    pub attributes: BTreeMap<String, String>,
    pub classes: Vec<String>,
}

#[cfg(feature = "serde")]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Result of one decomposition call.
///
/// `contents[0]` is the markup before the first opening tag. Each tag `k` then owns
/// `contents[1 + 3k]` (the tag markup), `contents[2 + 3k]` (its initial content) and
/// `contents[3 + 3k]` (the markup up to the next opening tag).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decomposition {
    pub contents: Vec<String>,
    pub tags: Vec<TagDescriptor>,
}

impl Decomposition {
    /// Markup preceding the first opening tag.
    pub fn leading(&self) -> &str {
        self.contents.first().map_or("", String::as_str)
    }

    pub fn tag_markup(&self, tag: &TagDescriptor) -> &str {
        self.content_at(tag.index)
    }

    pub fn initial_content(&self, tag: &TagDescriptor) -> &str {
        self.content_at(tag.index + 1)
    }

    pub fn trailing_markup(&self, tag: &TagDescriptor) -> &str {
        self.content_at(tag.index + 2)
    }

    /// Tags named `name`, compared exactly.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TagDescriptor> {
        self.tags.iter().filter(move |tag| tag.tag == name)
    }

    fn content_at(&self, index: usize) -> &str {
        self.contents.get(index).map_or("", String::as_str)
    }
}

impl TagDescriptor {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
