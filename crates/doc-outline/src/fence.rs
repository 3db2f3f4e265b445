use serde::{Deserialize, Serialize};

/// Marker that toggles between prose and code inside a section body.
pub const FENCE_MARKER: &str = "```";

/// One renderable slice of a section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Prose { paragraphs: Vec<String> },
    Code { code: String },
}

impl ContentBlock {
    pub fn is_code(&self) -> bool {
        matches!(self, ContentBlock::Code { .. })
    }
}

/// Split a section body on fence markers by parity: even segments are prose,
/// odd segments are code.
///
/// Markers are not paired, so an odd number of markers leaves the tail of the
/// body rendered as code. Prose paragraphs are the non-empty lines of their
/// segment; code keeps its segment verbatim, info string included.
pub fn split_fences(content: &str) -> Vec<ContentBlock> {
    content
        .split(FENCE_MARKER)
        .enumerate()
        .map(|(index, segment)| {
            if index % 2 == 0 {
                ContentBlock::Prose {
                    paragraphs: segment
                        .split('\n')
                        .filter(|line| !line.is_empty())
                        .map(str::to_string)
                        .collect(),
                }
            } else {
                ContentBlock::Code {
                    code: segment.to_string(),
                }
            }
        })
        .collect()
}
