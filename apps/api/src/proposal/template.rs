//! Prompt template parsing and substitution.
//!
//! Templates use `{field_name}` placeholders; `{{` and `}}` produce literal
//! braces. Placeholders are checked against `FIELD_KEYS` when the template is
//! parsed, so a schema mismatch stops the service at startup instead of
//! failing individual requests.

use std::path::Path;

use thiserror::Error;

use crate::proposal::fields::{TemplateValues, FIELD_KEYS};

/// Template shipped with the binary, used when no override path is configured.
pub const BUNDLED_TEMPLATE: &str = include_str!("../../prompts/grant_template.txt");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template placeholder '{{{name}}}' has no matching field")]
    UnknownPlaceholder { name: String },

    #[error("Unbalanced '{brace}' at byte {offset} in template")]
    UnbalancedBrace { brace: char, offset: usize },

    #[error("Failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(&'static str),
}

/// A parsed, schema-checked prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, nc) in chars.by_ref() {
                        if nc == '}' {
                            closed = true;
                            break;
                        }
                        if nc == '{' {
                            break;
                        }
                        name.push(nc);
                    }
                    if !closed {
                        return Err(TemplateError::UnbalancedBrace { brace: '{', offset });
                    }
                    let key = FIELD_KEYS
                        .iter()
                        .copied()
                        .find(|k| *k == name)
                        .ok_or(TemplateError::UnknownPlaceholder { name })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(key));
                }
                '}' => return Err(TemplateError::UnbalancedBrace { brace: '}', offset }),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Reads and parses a template file.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let text = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn bundled() -> Result<Self, TemplateError> {
        Self::parse(BUNDLED_TEMPLATE)
    }

    /// Distinct placeholder names, in first-use order.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(name) = segment {
                if !names.contains(name) {
                    names.push(*name);
                }
            }
        }
        names
    }

    /// Substitutes values verbatim. `values` comes from `FieldSet::template_values`,
    /// which covers every name the parser accepts.
    pub fn render(&self, values: &TemplateValues) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    if let Some(value) = values.get(name) {
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }
}
