//! Splits generated proposal text into headings and paragraphs.

use serde::Serialize;

/// One classified unit of proposal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum DocumentBlock {
    Heading1(String),
    Heading2(String),
    Paragraph(String),
}

const BLOCK_SEPARATOR: &str = "\n\n";

/// Classifies a single raw block. Returns `None` for blank blocks.
///
/// `"## "` is checked before `"# "`. Deeper markers such as `"### "` match
/// neither prefix and stay in the paragraph text unchanged.
pub fn classify_block(raw: &str) -> Option<DocumentBlock> {
    let text = raw.trim();
    if let Some(rest) = text.strip_prefix("## ") {
        Some(DocumentBlock::Heading2(rest.to_string()))
    } else if let Some(rest) = text.strip_prefix("# ") {
        Some(DocumentBlock::Heading1(rest.to_string()))
    } else if text.is_empty() {
        None
    } else {
        Some(DocumentBlock::Paragraph(text.to_string()))
    }
}

/// Classifies every blank-line-separated block, preserving order.
pub fn parse_blocks(text: &str) -> Vec<DocumentBlock> {
    text.split(BLOCK_SEPARATOR).filter_map(classify_block).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_paragraphs_keep_order() {
        let blocks = parse_blocks("# Summary\n\nBody text here.\n\n## Details\n\nMore body.");
        assert_eq!(
            blocks,
            vec![
                DocumentBlock::Heading1("Summary".to_string()),
                DocumentBlock::Paragraph("Body text here.".to_string()),
                DocumentBlock::Heading2("Details".to_string()),
                DocumentBlock::Paragraph("More body.".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_blocks_are_dropped() {
        let blocks = parse_blocks("First.\n\n\n\nSecond.\n\n   \n\n");
        assert_eq!(
            blocks,
            vec![
                DocumentBlock::Paragraph("First.".to_string()),
                DocumentBlock::Paragraph("Second.".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_without_blank_lines_is_one_paragraph() {
        let blocks = parse_blocks("Line one\nLine two\nLine three");
        assert_eq!(
            blocks,
            vec![DocumentBlock::Paragraph(
                "Line one\nLine two\nLine three".to_string()
            )]
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed_before_classifying() {
        assert_eq!(
            classify_block("  \n# Executive Summary  \n"),
            Some(DocumentBlock::Heading1("Executive Summary".to_string()))
        );
        assert_eq!(
            classify_block("\n## Budget\n"),
            Some(DocumentBlock::Heading2("Budget".to_string()))
        );
    }

    #[test]
    fn test_deeper_heading_markers_stay_paragraphs() {
        assert_eq!(
            classify_block("### Year One"),
            Some(DocumentBlock::Paragraph("### Year One".to_string()))
        );
    }

    #[test]
    fn test_hash_without_space_is_paragraph() {
        assert_eq!(
            classify_block("#1 priority"),
            Some(DocumentBlock::Paragraph("#1 priority".to_string()))
        );
    }

    #[test]
    fn test_blank_block_is_none() {
        assert_eq!(classify_block(""), None);
        assert_eq!(classify_block(" \t\n"), None);
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let text = "# A\n\nbody\n\n## B\n\n\n\nmore";
        assert_eq!(parse_blocks(text), parse_blocks(text));
    }

    #[test]
    fn test_block_serializes_with_kind_tag() {
        let json = serde_json::to_value(DocumentBlock::Heading2("Details".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "heading2", "text": "Details"}));
    }
}
