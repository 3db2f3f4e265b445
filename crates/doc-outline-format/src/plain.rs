use doc_outline::{DocPage, OutlineNode, Section};
use doc_outline_config::RenderSettings;

use crate::{indent, EMPTY_OUTLINE_MESSAGE};

/// One tab-separated `id level title` row per section.
pub(crate) fn sections(sections: &[Section]) -> String {
    let mut output = String::new();
    for section in sections {
        output.push_str(&format!(
            "{}\t{}\t{}\n",
            section.id, section.level, section.title
        ));
    }
    output
}

pub(crate) fn outline(outline: &[OutlineNode], settings: &RenderSettings) -> String {
    if outline.is_empty() {
        return format!("{EMPTY_OUTLINE_MESSAGE}\n");
    }

    let mut output = String::new();
    push_nodes(&mut output, outline, 0, settings);
    output
}

fn push_nodes(output: &mut String, nodes: &[OutlineNode], depth: usize, settings: &RenderSettings) {
    for node in nodes {
        output.push_str(&format!(
            "{}{} ({})\n",
            indent(depth, settings),
            node.title,
            node.id
        ));
        push_nodes(output, &node.children, depth + 1, settings);
    }
}

pub(crate) fn page(page: &DocPage, settings: &RenderSettings) -> String {
    let mut output = underlined(&page.title, '=');

    if let Some(author) = &page.author {
        output.push_str(&format!("Author: {author}\n"));
    }
    if let Some(updated_at) = &page.updated_at {
        output.push_str(&format!("Updated: {updated_at}\n"));
    }

    output.push_str("\nContents\n");
    output.push_str(&outline(page.outline(), settings));

    for section in page.sections() {
        output.push('\n');
        output.push_str(&underlined(&section.title, '-'));
        if !section.content.is_empty() {
            output.push_str(&section.content);
            output.push('\n');
        }
    }

    output
}

fn underlined(text: &str, rule: char) -> String {
    let width = text.chars().count().max(1);
    format!("{text}\n{}\n", rule.to_string().repeat(width))
}
