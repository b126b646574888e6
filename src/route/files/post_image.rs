use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::{
    error::{ApiError, ErrorVerbosityProvider, MultipartError, ValidationError},
    extractor::multipart::ApiMultipart,
    state::ApiState,
    utils::kibibytes,
};

/// Name of the multipart field holding the file.
const IMAGE_FIELD: &str = "image";

/// Multipart body accepted by [`post_image`].
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUpload {
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedImage {
    #[serde(rename = "Filename")]
    #[schema(example = "cat.png")]
    pub filename: Option<String>,
    #[serde(rename = "Format")]
    #[schema(example = "image/png")]
    pub format: Option<String>,
    #[serde(rename = "Size(Kb)")]
    #[schema(example = 2.0)]
    pub size_kb: f64,
}

impl IntoResponse for UploadedImage {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Upload an image
///
/// Reads the uploaded file and returns its name, content type and size in kibibytes.
#[utoipa::path(
    post,
    path = "/post-image",
    tag = "Files",
    request_body(content = ImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File received", body = UploadedImage),
        (status = 413, description = "The upload exceeds `max_upload_bytes`"),
        (status = 422, description = "The `image` field is missing or the body is malformed"),
    )
)]
pub async fn post_image(
    State(state): State<ApiState>,
    ApiMultipart(mut multipart): ApiMultipart,
) -> Result<UploadedImage, ApiError> {
    let verbosity = state.error_verbosity();

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        tracing::warn!(%err, "Failed to read multipart field");

        MultipartError::new(verbosity, err.body_text(), err.status())
    })? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_owned);
        let format = field.content_type().map(str::to_owned);

        let bytes = field.bytes().await.map_err(|err| {
            tracing::warn!(%err, "Failed to read image");

            MultipartError::new(verbosity, err.body_text(), err.status())
        })?;

        tracing::debug!(?filename, ?format, len = bytes.len(), "Image received");

        return Ok(UploadedImage {
            filename,
            format,
            size_kb: kibibytes(bytes.len()),
        });
    }

    tracing::warn!("Image field missing");

    let mut errors = ValidationErrors::new();
    errors.add(IMAGE_FIELD, validator::ValidationError::new("required"));

    Err(ValidationError::from_validation_errors(verbosity, errors).into())
}
