use doc_outline::{DocPage, OutlineNode, Section};
use doc_outline_config::RenderSettings;

use crate::{indent, EMPTY_OUTLINE_MESSAGE};

/// Re-emit sections as `#` headings followed by their bodies.
pub(crate) fn sections(sections: &[Section]) -> String {
    let mut output = String::new();
    for section in sections {
        output.push_str(&format!(
            "{} {}\n",
            "#".repeat(usize::from(section.level.max(1))),
            section.title
        ));
        if !section.content.is_empty() {
            output.push_str(&section.content);
            output.push('\n');
        }
    }
    output
}

/// Bullet list of `[title](#id)` links nested by tree depth.
pub(crate) fn outline(outline: &[OutlineNode], settings: &RenderSettings) -> String {
    if outline.is_empty() {
        return format!("{EMPTY_OUTLINE_MESSAGE}\n");
    }

    let mut output = String::new();
    push_items(&mut output, outline, 0, settings);
    output
}

fn push_items(output: &mut String, nodes: &[OutlineNode], depth: usize, settings: &RenderSettings) {
    for node in nodes {
        output.push_str(&format!(
            "{}- [{}](#{})\n",
            indent(depth, settings),
            node.title,
            node.id
        ));
        push_items(output, &node.children, depth + 1, settings);
    }
}

pub(crate) fn page(page: &DocPage, settings: &RenderSettings) -> String {
    let mut output = format!("# {}\n\n", page.title);

    let attribution: Vec<String> = [
        page.author.as_ref().map(|author| format!("Author: {author}")),
        page.updated_at
            .as_ref()
            .map(|updated_at| format!("Updated: {updated_at}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !attribution.is_empty() {
        output.push_str(&format!("_{}_\n\n", attribution.join(" · ")));
    }

    if !page.outline().is_empty() {
        output.push_str("## Contents\n\n");
        output.push_str(&outline(page.outline(), settings));
        output.push('\n');
    }

    output.push_str(&sections(page.sections()));
    output
}
