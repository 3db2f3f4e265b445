//! Static HTML fragments: section blocks, the table-of-contents nav, and a
//! page wrapper combining both.

use doc_outline::{split_fences, ContentBlock, DocPage, OutlineNode, Section};
use doc_outline_config::RenderSettings;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::EMPTY_OUTLINE_MESSAGE;

const TOC_HEADING: &str = "Table of Contents";

/// Heading element for a section level; everything below level 3 shares `h4`.
pub(crate) fn heading_tag(level: u8) -> &'static str {
    match level {
        0 | 1 => "h1",
        2 => "h2",
        3 => "h3",
        _ => "h4",
    }
}

/// Left padding in pixels for an outline entry at `level`.
pub(crate) fn toc_padding(level: u8) -> u32 {
    u32::from(level.saturating_sub(1)) * 12 + 8
}

pub(crate) fn sections(sections: &[Section], settings: &RenderSettings) -> String {
    let mut output = String::new();
    for section in sections {
        push_section(&mut output, section, settings);
    }
    output
}

fn push_section(output: &mut String, section: &Section, settings: &RenderSettings) {
    let tag = heading_tag(section.level);
    output.push_str(&format!(
        "<section id=\"{}\" class=\"doc-section\">\n<{tag}>{}</{tag}>\n",
        encode_double_quoted_attribute(&section.id),
        encode_text(&section.title)
    ));
    if section.level <= 2 {
        output.push_str("<hr>\n");
    }

    for block in split_fences(&section.content) {
        match block {
            ContentBlock::Prose { paragraphs } => {
                output.push_str("<div class=\"prose\">\n");
                for paragraph in paragraphs {
                    output.push_str(&format!("<p>{}</p>\n", encode_text(&paragraph)));
                }
                output.push_str("</div>\n");
            }
            ContentBlock::Code { code } => {
                output.push_str(&format!(
                    "<figure class=\"code-snippet\">\n<figcaption>{}</figcaption>\n<pre><code>{}</code></pre>\n</figure>\n",
                    encode_text(&settings.code_label),
                    encode_text(&code)
                ));
            }
        }
    }

    output.push_str("</section>\n");
}

pub(crate) fn outline(outline: &[OutlineNode], active_id: Option<&str>) -> String {
    let mut output = format!("<nav class=\"toc\" data-toc>\n<p class=\"toc-heading\">{TOC_HEADING}</p>\n");
    if outline.is_empty() {
        output.push_str(&format!("<p class=\"toc-empty\">{EMPTY_OUTLINE_MESSAGE}</p>\n"));
    } else {
        push_list(&mut output, outline, active_id);
    }
    output.push_str("</nav>\n");
    output
}

fn push_list(output: &mut String, nodes: &[OutlineNode], active_id: Option<&str>) {
    output.push_str("<ul>\n");
    for node in nodes {
        let class = if Some(node.id.as_str()) == active_id {
            " class=\"active\""
        } else {
            ""
        };
        output.push_str(&format!(
            "<li><a href=\"#{}\" style=\"padding-left: {}px\"{class}>{}</a>",
            encode_double_quoted_attribute(&node.id),
            toc_padding(node.level),
            encode_text(&node.title)
        ));
        if node.has_children() {
            output.push('\n');
            push_list(output, &node.children, active_id);
        }
        output.push_str("</li>\n");
    }
    output.push_str("</ul>\n");
}

pub(crate) fn page(page: &DocPage, settings: &RenderSettings) -> String {
    let title = encode_text(&page.title);
    let mut output = String::from("<article class=\"doc-page\">\n<aside class=\"doc-sidebar\">\n");
    output.push_str(&format!("<h1 class=\"doc-title\">{title}</h1>\n"));
    output.push_str(&outline(page.outline(), page.initial_active_id()));

    if page.has_attribution() {
        output.push_str("<footer class=\"doc-meta\">\n");
        if let Some(author) = &page.author {
            output.push_str(&format!("<div>Author: {}</div>\n", encode_text(author)));
        }
        if let Some(updated_at) = &page.updated_at {
            output.push_str(&format!("<div>Updated: {}</div>\n", encode_text(updated_at)));
        }
        output.push_str("</footer>\n");
    }

    output.push_str("</aside>\n<main class=\"doc-main\">\n");
    output.push_str(&format!("<header><h1>{title}</h1></header>\n"));
    output.push_str(&sections(page.sections(), settings));
    output.push_str("</main>\n</article>\n");
    output
}
