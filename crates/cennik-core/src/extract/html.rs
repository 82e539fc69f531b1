//! HTML text extraction using the scraper crate.

use scraper::{ElementRef, Html, Selector};

use super::Result;
use crate::error::ExtractError;

/// Extract visible text from an HTML document as a single blob.
///
/// Walks the body's text nodes in document order, skipping script and
/// style content, and joins them with newlines so row-like markup ends
/// up as line-like text for the rule tables.
pub fn extract_html_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let body_selector = Selector::parse("body").unwrap();

    let body = document
        .select(&body_selector)
        .next()
        .ok_or(ExtractError::NoBody)?;

    let mut lines: Vec<String> = Vec::new();
    collect_text(body, &mut lines);

    if lines.is_empty() {
        return Err(ExtractError::EmptyText);
    }

    Ok(lines.join("\n"))
}

fn collect_text(root: ElementRef, lines: &mut Vec<String>) {
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| matches!(el.value().name(), "script" | "style" | "noscript"));
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_table_rows_as_lines() {
        let html = r#"<html><body>
            <table>
              <tr><td>AC</td><td>1,95 PLN/kWh</td></tr>
              <tr><td>DC ≤ 50 kW</td><td>2,69 PLN/kWh</td></tr>
            </table>
        </body></html>"#;

        let text = extract_html_text(html).unwrap();
        assert!(text.contains("AC"));
        assert!(text.contains("1,95 PLN/kWh"));
        assert!(text.contains("2,69 PLN/kWh"));
    }

    #[test]
    fn skips_script_and_style_content() {
        let html = r#"<html><head><style>.x { color: red }</style></head>
            <body><script>var price = "9,99";</script><p>AC 1,95</p></body></html>"#;

        let text = extract_html_text(html).unwrap();
        assert!(!text.contains("9,99"));
        assert!(!text.contains("color"));
        assert_eq!(text, "AC 1,95");
    }

    #[test]
    fn body_with_no_text_is_an_error() {
        let result = extract_html_text("<html><body><div></div></body></html>");
        assert!(matches!(result, Err(ExtractError::EmptyText)));
    }
}
