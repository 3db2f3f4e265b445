//! Turn lightweight heading-delimited text into sections and an outline.
//!
//! The pipeline has two passes. [`segment`] walks the text line by line and
//! emits one [`Section`] per `#`-style heading (plus a synthesized
//! "Introduction" for leading prose). [`build_outline`] folds those sections
//! into a forest of [`OutlineNode`]s following heading depth. Both are pure and
//! total: any string is accepted and nothing is cached between calls.

mod fence;
mod heading;
mod line;
mod outline;
mod page;
mod state;

pub use fence::{split_fences, ContentBlock, FENCE_MARKER};
pub use heading::{detect_heading, Heading, MAX_HEADING_LEVEL};
pub use outline::{build_outline, count_nodes, walk_preorder, OutlineNode};
pub use page::{DocPage, Document};
pub use state::section_id;

use line::split_lines;
use serde::{Deserialize, Serialize};
use state::State;

/// Title given to leading prose that appears before the first heading.
pub const INTRODUCTION_TITLE: &str = "Introduction";

/// One heading-delimited block of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// `section-<n>` where `n` is the zero-based emission position.
    pub id: String,
    pub title: String,
    /// Number of `#` markers, or 1 for the synthesized introduction.
    pub level: u8,
    /// Lines between this heading and the next, newline-joined.
    pub content: String,
}

impl Section {
    /// Body split into prose and code blocks.
    pub fn blocks(&self) -> Vec<ContentBlock> {
        split_fences(&self.content)
    }
}

/// Segment `text` into sections in input order.
///
/// Blank lines before any heading or prose are discarded. The first non-blank
/// line before any heading opens a level-1 [`INTRODUCTION_TITLE`] section.
pub fn segment(text: &str) -> Vec<Section> {
    let mut state = State::new();

    for line in split_lines(text) {
        if let Some(heading) = detect_heading(line.text) {
            state.enter_section(heading);
            continue;
        }

        if !state.is_within_section() {
            if line.is_blank() {
                continue;
            }
            state.enter_section(Heading {
                level: 1,
                title: INTRODUCTION_TITLE.to_string(),
            });
        }

        state.append_line(&line);
    }

    state.finalize()
}
