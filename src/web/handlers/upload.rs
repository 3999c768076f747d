// POST /upload: extract fields from a bill image and score it for fraud.
//
// Multipart form:
//   file    the bill image (required)
//   mobile  policy holder's mobile number (optional; selects the reference
//           profile, defaults to the demo user)
//
// Returns the extracted fields with a "fraud_detection" object merged in.
// 400 for a missing or unusable file, 500 if the model call or its output
// fails. Failure details go to the log, not the client.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::pipeline::document::{analyze_document, DocumentImage};
use crate::web::{api_error, AppState};

/// Fields pulled out of the multipart body.
#[derive(Default)]
struct UploadForm {
    file: Option<(Vec<u8>, Option<String>)>,
    mobile: Option<String>,
}

pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            warn!(error = %e, "Rejected non-multipart upload");
            return api_error(StatusCode::BAD_REQUEST, "Expected a multipart form upload");
        }
    };

    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            warn!(error = %e, "Malformed multipart body");
            return api_error(StatusCode::BAD_REQUEST, "Malformed multipart body");
        }
    };

    let Some((bytes, content_type)) = form.file else {
        return api_error(StatusCode::BAD_REQUEST, "No file uploaded");
    };

    let image = match DocumentImage::new(bytes, content_type.as_deref()) {
        Ok(image) => image,
        Err(e) => return api_error(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    match analyze_document(
        state.generator.as_ref(),
        state.profiles.as_ref(),
        image,
        form.mobile.as_deref(),
    )
    .await
    {
        Ok(analysis) => Json(analysis).into_response(),
        Err(e) => {
            error!(error = %format!("{e:#}"), "Document analysis failed");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process document",
            )
        }
    }
}

async fn read_form(mut multipart: Multipart) -> anyhow::Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                form.file = Some((bytes.to_vec(), content_type));
            }
            Some("mobile") => {
                let text = field.text().await?;
                form.mobile = Some(text).filter(|m| !m.trim().is_empty());
            }
            _ => {}
        }
    }

    Ok(form)
}
