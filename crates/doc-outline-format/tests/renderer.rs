use doc_outline::{DocPage, Document};
use doc_outline_format::{OutputFormat, RenderSettings, Renderer};
use pretty_assertions::assert_eq;

const SAMPLE: &str = "Welcome text\n# Guide\nIntro\n## Install\n```\nmake\n```\n## Use\n### Flags";

fn renderer(format: OutputFormat) -> Renderer {
    Renderer::from_settings(RenderSettings::default()).with_format(format)
}

#[test]
fn plain_outline_lists_every_section() {
    let document = Document::parse(SAMPLE);

    let rendered = renderer(OutputFormat::Plain).render_outline(&document.outline);

    assert_eq!(
        rendered,
        "Introduction (section-0)\n\
         Guide (section-1)\n  \
         Install (section-2)\n  \
         Use (section-3)\n    \
         Flags (section-4)\n"
    );
}

#[test]
fn json_sections_round_trip() {
    let document = Document::parse(SAMPLE);

    let rendered = renderer(OutputFormat::Json).render_sections(&document.sections);
    let parsed: Vec<doc_outline::Section> = serde_json::from_str(&rendered).expect("valid json");

    assert_eq!(parsed, document.sections);
}

#[test]
fn json_outline_omits_empty_children() {
    let document = Document::parse("# Solo");

    let rendered = renderer(OutputFormat::Json).render_outline(&document.outline);

    assert!(!rendered.contains("children"));
}

#[test]
fn html_page_uses_custom_code_label() {
    let settings = RenderSettings {
        format: OutputFormat::Html,
        code_label: "Example".to_string(),
        ..RenderSettings::default()
    };
    let page = DocPage::new("Guide", SAMPLE).with_updated_at("April 28, 2025");

    let rendered = Renderer::from_settings(settings).render_page(&page);

    assert!(rendered.starts_with("<article class=\"doc-page\">"));
    assert!(rendered.contains("<figcaption>Example</figcaption>"));
    assert!(rendered.contains("<pre><code>\nmake\n</code></pre>"));
    assert!(rendered.contains("<div>Updated: April 28, 2025</div>"));
    assert!(rendered.contains("<h3>Flags</h3>"));
}

#[test]
fn every_format_handles_empty_input() {
    let page = DocPage::new("Empty", "");

    for format in OutputFormat::ALL {
        let renderer = renderer(*format);
        let _ = renderer.render_page(&page);
        let outline = renderer.render_outline(page.outline());
        match format {
            OutputFormat::Plain => assert_eq!(outline, "No sections available\n"),
            OutputFormat::Markdown => assert_eq!(outline, "No sections available\n"),
            OutputFormat::Json => assert_eq!(outline, "[]\n"),
            OutputFormat::Html => assert!(outline.contains("No sections available")),
        }
        assert_eq!(renderer.format(), *format);
    }
}
