//! Form-fill endpoint
//!
//! `POST /` accepts a JSON body naming a blank PDF template URL and a
//! field-name to value mapping, and responds with the filled PDF as a
//! binary attachment. Every validation or download failure produces a
//! plain-text 4xx; nothing on this path panics.

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    routing::post,
    Router,
};

use crate::error::{AppError, Result};
use crate::fill::FillRequest;
use crate::forms;
use crate::state::AppState;

/// Create the fill router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(fill_pdf))
}

/// Fill a blank PDF template with the supplied form values
async fn fill_pdf(State(state): State<AppState>, body: String) -> Result<Response> {
    tracing::info!("Processing PDF form-fill request");

    let request = FillRequest::parse(&body)?;

    tracing::debug!(
        "Filling template {} with {} field values",
        request.template_url,
        request.form_data.len()
    );

    let template = state.fetcher().download(&request.template_url).await?;
    let filled = forms::fill_form(&template, &request.form_data)?;

    tracing::info!("Returning filled PDF ({} bytes)", filled.len());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=filledPdf.pdf",
        )
        .body(Body::from(filled))
        .map_err(|e| AppError::Internal(e.to_string()))
}
