use crate::heading::Heading;
use crate::line::LineRecord;
use crate::Section;

/// Accumulates sections while the segmenter walks the input.
#[derive(Default)]
pub struct State {
    emitted: Vec<Section>,
    current: Option<SectionBuilder>,
}

impl State {
    pub fn new() -> Self {
        Self {
            emitted: Vec::new(),
            current: None,
        }
    }

    pub fn is_within_section(&self) -> bool {
        self.current.is_some()
    }

    /// Close any open section, then open a new one for `heading`.
    pub fn enter_section(&mut self, heading: Heading) {
        self.exit_section();
        self.current = Some(SectionBuilder::new(heading));
    }

    pub fn append_line(&mut self, line: &LineRecord<'_>) {
        if let Some(current) = &mut self.current {
            current.push_line(line);
        }
    }

    pub fn exit_section(&mut self) {
        if let Some(current) = self.current.take() {
            let ordinal = self.emitted.len();
            self.emitted.push(current.into_section(ordinal));
        }
    }

    pub fn finalize(mut self) -> Vec<Section> {
        self.exit_section();
        self.emitted
    }
}

struct SectionBuilder {
    heading: Heading,
    lines: Vec<String>,
}

impl SectionBuilder {
    fn new(heading: Heading) -> Self {
        Self {
            heading,
            lines: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &LineRecord<'_>) {
        self.lines.push(line.text.to_string());
    }

    fn into_section(self, ordinal: usize) -> Section {
        Section {
            id: section_id(ordinal),
            title: self.heading.title,
            level: self.heading.level,
            content: self.lines.join("\n"),
        }
    }
}

/// Identifier for the section emitted at zero-based position `ordinal`.
pub fn section_id(ordinal: usize) -> String {
    format!("section-{ordinal}")
}
