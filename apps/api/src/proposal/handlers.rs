//! Axum route handlers for the proposal form and API.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use chrono::Local;
use serde::Serialize;

use crate::errors::AppError;
use crate::proposal::blocks::DocumentBlock;
use crate::proposal::document::DOCX_MIME;
use crate::proposal::fields::{FieldSet, FIELD_KEYS};
use crate::proposal::generator::{generate_proposal, GeneratedProposal};
use crate::state::AppState;

const FORM_PAGE: &str = include_str!("../../static/index.html");
/// Marker in the form page where a failed submission's message is shown.
const FORM_ERROR_SLOT: &str = "<!-- form-error -->";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub submission_id: String,
    pub filename: String,
    pub proposal_text: String,
    pub blocks: Vec<DocumentBlock>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_form_page() -> Html<&'static str> {
    Html(FORM_PAGE)
}

/// POST /proposals
///
/// Form-encoded submission from the HTML page. Responds with the `.docx` download,
/// or on failure with the form again, showing the error and keeping what was typed.
pub async fn handle_form_submit(
    State(state): State<AppState>,
    Form(fields): Form<FieldSet>,
) -> Response {
    let result = run(&state, &fields)
        .await
        .and_then(|proposal| download_response(&proposal));

    match result {
        Ok(response) => response,
        Err(err) => {
            let (status, _, message) = err.parts();
            (status, Html(render_form_page(&message, &fields))).into_response()
        }
    }
}

/// POST /api/v1/proposals
///
/// JSON submission. Responds with the `.docx` download.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(fields): Json<FieldSet>,
) -> Result<Response, AppError> {
    let proposal = run(&state, &fields).await?;
    download_response(&proposal)
}

/// POST /api/v1/proposals/preview
///
/// Returns the generated text and its classified blocks instead of a file.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(fields): Json<FieldSet>,
) -> Result<Json<PreviewResponse>, AppError> {
    let proposal = run(&state, &fields).await?;
    Ok(Json(PreviewResponse {
        submission_id: proposal.submission_id.to_string(),
        filename: proposal.filename,
        proposal_text: proposal.proposal_text,
        blocks: proposal.document.blocks,
    }))
}

async fn run(state: &AppState, fields: &FieldSet) -> Result<GeneratedProposal, AppError> {
    generate_proposal(
        &state.template,
        state.generator.as_ref(),
        fields,
        Local::now().date_naive(),
    )
    .await
}

fn download_response(proposal: &GeneratedProposal) -> Result<Response, AppError> {
    let bytes = proposal.docx_bytes()?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(DOCX_MIME));
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(&proposal.filename)?,
    );

    Ok((headers, bytes).into_response())
}

/// The form page with `error` shown above the form and every submitted value refilled.
fn render_form_page(error: &str, fields: &FieldSet) -> String {
    let mut page = FORM_PAGE.replacen(
        FORM_ERROR_SLOT,
        &format!("<p class=\"error\" role=\"alert\">{}</p>", escape_html(error)),
        1,
    );

    for &key in FIELD_KEYS {
        let value = fields.raw(key).unwrap_or_default();
        if value.is_empty() {
            continue;
        }
        let attr = format!("name=\"{key}\"");
        let Some(at) = page.find(&attr) else {
            continue;
        };
        let Some(tag_len) = page[at..].find('>') else {
            continue;
        };
        let tag_start = page[..at].rfind('<').unwrap_or(at);
        let escaped = escape_html(value);
        if page[tag_start..].starts_with("<textarea") {
            page.insert_str(at + tag_len + 1, &escaped);
        } else {
            // Placed before any default `value`; the first attribute wins.
            page.insert_str(at + attr.len(), &format!(" value=\"{escaped}\""));
        }
    }

    page
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `attachment` disposition with an ASCII `filename` and an RFC 5987 `filename*`
/// so non-ASCII funder and project names survive.
fn content_disposition(filename: &str) -> Result<HeaderValue, AppError> {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut encoded = String::with_capacity(filename.len());
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    HeaderValue::from_str(&format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}"
    ))
    .map_err(|e| AppError::Internal(e.into()))
}
