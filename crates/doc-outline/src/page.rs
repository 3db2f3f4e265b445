use serde::{Deserialize, Serialize};

use crate::{build_outline, segment, OutlineNode, Section};

/// Sections and outline produced by one run of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub sections: Vec<Section>,
    pub outline: Vec<OutlineNode>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        let sections = segment(text);
        let outline = build_outline(&sections);
        Self { sections, outline }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by id, as a navigation callback would.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }
}

/// A titled documentation page with optional attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocPage {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub document: Document,
}

impl DocPage {
    pub fn new(title: impl Into<String>, text: &str) -> Self {
        Self {
            title: title.into(),
            author: None,
            updated_at: None,
            document: Document::parse(text),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = Some(updated_at.into());
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.document.sections
    }

    pub fn outline(&self) -> &[OutlineNode] {
        &self.document.outline
    }

    /// Id of the outline entry highlighted before any navigation happens.
    pub fn initial_active_id(&self) -> Option<&str> {
        self.outline().first().map(|node| node.id.as_str())
    }

    pub fn has_attribution(&self) -> bool {
        self.author.is_some() || self.updated_at.is_some()
    }
}
