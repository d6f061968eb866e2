//! HTML rendering of the input form and highlighted text.

use drugner_domain::{AnnotatedSequence, TextBlock};

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; line-height: 1.6; }
textarea { width: 100%; height: 10rem; font: inherit; }
.annotated { border: 1px solid #ccc; padding: 1rem; white-space: pre-wrap; }
mark.entity { padding: 0.1rem 0.3rem; border-radius: 0.3rem; background: #eee; }
.entity-label { font-size: 0.65rem; font-weight: bold; margin-left: 0.3rem; text-transform: uppercase; }
.adversereaction { background: #f8c5c5; }
.drugclass { background: #c5daf8; }
.severity { background: #f8e3c5; }
.factor { background: #d3f0c9; }
"#;

/// Escape text for safe inclusion in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render a single block
fn render_block(block: &TextBlock) -> String {
    match (&block.label, &block.class) {
        (Some(label), Some(class)) => format!(
            r#"<mark class="entity {class}" title="{label}">{text}<span class="entity-label">{label}</span></mark>"#,
            class = escape_html(class),
            label = escape_html(label),
            text = escape_html(&block.text),
        ),
        _ => escape_html(&block.text),
    }
}

/// Render annotated blocks as inline HTML
pub fn render_blocks(sequence: &AnnotatedSequence) -> String {
    sequence.blocks().iter().map(render_block).collect()
}

/// Render the full page
///
/// `input` pre-fills the form. When `annotated` is present, the highlighted
/// text is shown below the form.
pub fn render_page(input: &str, annotated: Option<&AnnotatedSequence>) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n<title>Drug Label NER</title>\n");
    page.push_str(&format!("<style>{}</style>\n", STYLE));
    page.push_str("</head>\n<body>\n<h1>Drug Label NER</h1>\n");
    page.push_str("<form method=\"post\" action=\"/ner/drug\">\n");
    page.push_str(&format!(
        "<textarea name=\"text\">{}</textarea>\n",
        escape_html(input)
    ));
    page.push_str("<button type=\"submit\">Identify entities</button>\n</form>\n");

    if let Some(sequence) = annotated {
        page.push_str(&format!(
            "<h2>Entities ({})</h2>\n<div class=\"annotated\">{}</div>\n",
            sequence.labeled().count(),
            render_blocks(sequence)
        ));
    }

    page.push_str("</body>\n</html>\n");
    page
}
