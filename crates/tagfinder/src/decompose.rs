//! Decomposition driver.
//!
//! Alternates content capture and opening-tag matching in a single forward pass:
//!
//! 1. after a tag, capture its initial content (raw text for `script`, `style`,
//!    `title` and `textarea`, otherwise normal text up to the next markup);
//! 2. capture markup up to the next opening tag (or end of input);
//! 3. record the tag and pick the segmentation state for the next round.
//!
//! Every round that finds a tag consumes at least its `<x>` markup, so the loop always
//! terminates, and every round appends exactly three contents per tag.

use crate::attributes::{extract_classes, parse_attributes};
use crate::segmenter::{Boundary, Segmenter};
use crate::types::{Decomposition, RawTextElement, TagDescriptor};

/// Configuration for [`Decomposer`].
#[derive(Clone, Debug)]
pub struct DecomposeConfig {
    /// Drop `<!-- ... -->` from normal-mode content. With `false`, comments are kept
    /// verbatim and the contents concatenate back to the input.
    pub strip_comments: bool,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            strip_comments: true,
        }
    }
}

/// Instrumentation counters, accumulated across calls on one [`Decomposer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecomposeStats {
    pub decompositions: u64,
    pub tags: u64,
    pub raw_text_captures: u64,
    pub comments: u64,
    pub cdata_sections: u64,
    pub literal_angle_brackets: u64,
    pub state_transitions: u64,
}

impl DecomposeStats {
    fn absorb(&mut self, other: DecomposeStats) {
        self.decompositions = self.decompositions.saturating_add(other.decompositions);
        self.tags = self.tags.saturating_add(other.tags);
        self.raw_text_captures = self.raw_text_captures.saturating_add(other.raw_text_captures);
        self.comments = self.comments.saturating_add(other.comments);
        self.cdata_sections = self.cdata_sections.saturating_add(other.cdata_sections);
        self.literal_angle_brackets = self
            .literal_angle_brackets
            .saturating_add(other.literal_angle_brackets);
        self.state_transitions = self.state_transitions.saturating_add(other.state_transitions);
    }
}

/// Which segmentation governs the content right after the last tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmenterState {
    Normal,
    RawText(RawTextElement),
}

impl SegmenterState {
    /// State selected by a freshly matched tag.
    pub fn after_tag(name: &str, self_closing: bool) -> Self {
        match RawTextElement::from_name(name) {
            Some(element) if !self_closing => Self::RawText(element),
            _ => Self::Normal,
        }
    }
}

pub struct Decomposer {
    config: DecomposeConfig,
    stats: DecomposeStats,
}

impl Default for Decomposer {
    fn default() -> Self {
        Self::new(DecomposeConfig::default())
    }
}

impl Decomposer {
    pub fn new(config: DecomposeConfig) -> Self {
        Self {
            config,
            stats: DecomposeStats::default(),
        }
    }

    pub fn config(&self) -> &DecomposeConfig {
        &self.config
    }

    pub fn stats(&self) -> DecomposeStats {
        self.stats
    }

    pub fn decompose(&mut self, document: &str) -> Decomposition {
        let mut segmenter = Segmenter::new(document, &self.config);
        let mut contents = Vec::new();
        let mut tags: Vec<TagDescriptor> = Vec::new();
        let mut state = SegmenterState::Normal;
        let mut run = DecomposeStats {
            decompositions: 1,
            ..DecomposeStats::default()
        };

        loop {
            if !tags.is_empty() {
                let initial = match state {
                    SegmenterState::Normal => segmenter.normal(Boundary::AnyMarkup),
                    SegmenterState::RawText(element) => segmenter.raw_text(element),
                };
                contents.push(initial);
                state = transition(state, SegmenterState::Normal, &segmenter, &mut run);
            }

            contents.push(segmenter.normal(Boundary::OpeningTag));

            let Some(found) = segmenter.opening_tag() else {
                debug_assert!(segmenter.is_at_end());
                break;
            };

            let index = contents.len();
            contents.push(segmenter.consume_tag(&found).to_string());
            let mut attributes = parse_attributes(found.attributes);
            let classes = extract_classes(&mut attributes);
            #[cfg(any(test, feature = "debug-stats"))]
            log::trace!(
                target: "tagfinder.decompose",
                "tag {} @{} index={index} void={}",
                found.name,
                found.offset,
                found.self_closing
            );
            tags.push(TagDescriptor {
                tag: found.name.to_string(),
                index,
                void_element: found.self_closing,
                attributes,
                classes,
            });
            run.tags = run.tags.saturating_add(1);

            let next = SegmenterState::after_tag(found.name, found.self_closing);
            state = transition(state, next, &segmenter, &mut run);
        }

        debug_assert_eq!(contents.len(), 1 + 3 * tags.len());
        run.absorb(segmenter.stats());
        self.stats.absorb(run);
        Decomposition { contents, tags }
    }
}

fn transition(
    from: SegmenterState,
    to: SegmenterState,
    segmenter: &Segmenter<'_>,
    run: &mut DecomposeStats,
) -> SegmenterState {
    if from != to {
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "tagfinder.decompose",
            "state {from:?} -> {to:?} @{}",
            segmenter.position()
        );
        #[cfg(not(any(test, feature = "debug-stats")))]
        let _ = segmenter;
        run.state_transitions = run.state_transitions.saturating_add(1);
    }
    to
}

/// Decomposes `document` with the default configuration.
pub fn decompose(document: &str) -> Decomposition {
    Decomposer::default().decompose(document)
}

/// Decomposes a possibly absent document. An absent document is the empty document:
/// one empty content element and no tags.
pub fn decompose_optional(document: Option<&str>) -> Decomposition {
    decompose(document.unwrap_or_default())
}
