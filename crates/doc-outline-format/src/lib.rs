//! Output formatters for doc-outline sections, outlines, and pages.

mod html;
mod json;
mod markdown;
mod plain;

use doc_outline::{DocPage, OutlineNode, Section};
pub use doc_outline_config::{OutputFormat, RenderSettings};

/// Shown in place of an outline that has no entries.
pub const EMPTY_OUTLINE_MESSAGE: &str = "No sections available";

/// Renders pipeline output in the configured format.
pub struct Renderer {
    settings: RenderSettings,
}

impl Renderer {
    /// Build a renderer from resolved render settings.
    pub fn from_settings(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Same settings, different output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.settings.format = format;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.settings.format
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn render_sections(&self, sections: &[Section]) -> String {
        let rendered = match self.settings.format {
            OutputFormat::Plain => plain::sections(sections),
            OutputFormat::Markdown => markdown::sections(sections),
            OutputFormat::Json => json::to_pretty(&sections),
            OutputFormat::Html => html::sections(sections, &self.settings),
        };
        tracing::debug!(
            format = %self.settings.format,
            sections = sections.len(),
            bytes = rendered.len(),
            "rendered sections"
        );
        rendered
    }

    pub fn render_outline(&self, outline: &[OutlineNode]) -> String {
        let rendered = match self.settings.format {
            OutputFormat::Plain => plain::outline(outline, &self.settings),
            OutputFormat::Markdown => markdown::outline(outline, &self.settings),
            OutputFormat::Json => json::to_pretty(&outline),
            OutputFormat::Html => html::outline(outline, outline.first().map(|node| node.id.as_str())),
        };
        tracing::debug!(
            format = %self.settings.format,
            roots = outline.len(),
            bytes = rendered.len(),
            "rendered outline"
        );
        rendered
    }

    pub fn render_page(&self, page: &DocPage) -> String {
        let rendered = match self.settings.format {
            OutputFormat::Plain => plain::page(page, &self.settings),
            OutputFormat::Markdown => markdown::page(page, &self.settings),
            OutputFormat::Json => json::page(page, self.settings.timestamp),
            OutputFormat::Html => html::page(page, &self.settings),
        };
        tracing::debug!(
            format = %self.settings.format,
            title = %page.title,
            bytes = rendered.len(),
            "rendered page"
        );
        rendered
    }
}

fn indent(depth: usize, settings: &RenderSettings) -> String {
    " ".repeat(depth * usize::from(settings.indent))
}
