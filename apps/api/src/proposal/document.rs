//! Proposal Document Builder — turns generated text into a `.docx` file.
//!
//! Layout: title heading, "Generated on" line, page break, then every
//! classified block in the order the model produced it.

use std::io::Cursor;

use chrono::NaiveDate;
use docx_rs::{BreakType, Docx, Paragraph, Run, Style, StyleType};
use thiserror::Error;

use crate::proposal::blocks::{parse_blocks, DocumentBlock};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const TITLE_STYLE: &str = "Title";
const HEADING1_STYLE: &str = "Heading1";
const HEADING2_STYLE: &str = "Heading2";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to serialize document: {0}")]
    Pack(String),
}

/// In-memory proposal, built fresh for each submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub title: String,
    pub generated_on: String,
    pub blocks: Vec<DocumentBlock>,
}

/// Builds the document for `project_name` from the model's proposal text.
pub fn build_document(
    project_name: &str,
    proposal_text: &str,
    generated_on: NaiveDate,
) -> OutputDocument {
    OutputDocument {
        title: format!("Grant Proposal: {project_name}"),
        generated_on: format!("Generated on {}", generated_on.format("%B %d, %Y")),
        blocks: parse_blocks(proposal_text),
    }
}

impl OutputDocument {
    /// Serializes to `.docx` bytes.
    pub fn to_docx(&self) -> Result<Vec<u8>, DocumentError> {
        let mut docx = Docx::new()
            .add_style(
                Style::new(TITLE_STYLE, StyleType::Paragraph)
                    .name("Title")
                    .size(52),
            )
            .add_style(
                Style::new(HEADING1_STYLE, StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold(),
            )
            .add_style(
                Style::new(HEADING2_STYLE, StyleType::Paragraph)
                    .name("Heading 2")
                    .size(26)
                    .bold(),
            )
            .add_paragraph(styled(&self.title, TITLE_STYLE))
            .add_paragraph(plain(&self.generated_on))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));

        for block in &self.blocks {
            let paragraph = match block {
                DocumentBlock::Heading1(text) => styled(text, HEADING1_STYLE),
                DocumentBlock::Heading2(text) => styled(text, HEADING2_STYLE),
                DocumentBlock::Paragraph(text) => plain(text),
            };
            docx = docx.add_paragraph(paragraph);
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| DocumentError::Pack(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

fn plain(text: &str) -> Paragraph {
    Paragraph::new().add_run(text_run(text))
}

fn styled(text: &str, style_id: &str) -> Paragraph {
    plain(text).style(style_id)
}

/// Single-newlines inside a block become line breaks within the paragraph.
fn text_run(text: &str) -> Run {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    run
}

/// Download name: `"<funder> - <project>.docx"` with spaces as underscores
/// and slashes as hyphens.
pub fn proposal_filename(funder_name: &str, project_name: &str) -> String {
    format!("{funder_name} - {project_name}.docx")
        .replace(' ', "_")
        .replace('/', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
    }

    #[test]
    fn test_build_document_adds_title_and_date() {
        let doc = build_document("Youth STEM", "# Summary\n\nBody text here.", date());
        assert_eq!(doc.title, "Grant Proposal: Youth STEM");
        assert_eq!(doc.generated_on, "Generated on March 05, 2026");
        assert_eq!(doc.blocks.len(), 2);
    }

    #[test]
    fn test_build_document_keeps_block_order() {
        let doc = build_document(
            "Youth STEM",
            "# Summary\n\nBody text here.\n\n## Details\n\nMore body.",
            date(),
        );
        assert_eq!(
            doc.blocks,
            vec![
                DocumentBlock::Heading1("Summary".to_string()),
                DocumentBlock::Paragraph("Body text here.".to_string()),
                DocumentBlock::Heading2("Details".to_string()),
                DocumentBlock::Paragraph("More body.".to_string()),
            ]
        );
    }

    #[test]
    fn test_single_block_text_yields_one_paragraph() {
        let doc = build_document("P", "Just one paragraph of text.", date());
        assert_eq!(
            doc.blocks,
            vec![DocumentBlock::Paragraph("Just one paragraph of text.".to_string())]
        );
    }

    #[test]
    fn test_same_input_builds_same_document() {
        let text = "# A\n\nbody\n\n\n\n## B\n\nmore";
        assert_eq!(
            build_document("P", text, date()),
            build_document("P", text, date())
        );
    }

    #[test]
    fn test_to_docx_produces_zip_container() {
        let doc = build_document(
            "Youth STEM",
            "# Summary\n\nLine one\nLine two\n\n## Details\n\nMore body.",
            date(),
        );
        let bytes = doc.to_docx().unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_to_docx_handles_empty_body() {
        let doc = build_document("Youth STEM", "", date());
        assert!(doc.blocks.is_empty());
        assert_eq!(&doc.to_docx().unwrap()[..2], b"PK");
    }

    #[test]
    fn test_filename_replaces_spaces_and_slashes() {
        assert_eq!(
            proposal_filename("A/B Foundation", "Test Run"),
            "A-B_Foundation_-_Test_Run.docx"
        );
    }

    #[test]
    fn test_filename_keeps_other_characters() {
        assert_eq!(
            proposal_filename("Fundación Niños", "STEM & Arts"),
            "Fundación_Niños_-_STEM_&_Arts.docx"
        );
    }
}
