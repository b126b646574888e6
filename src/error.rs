use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use derive_more::From;
use serde::{Deserialize, Serialize};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::extractor::decode::{rejection_status, DecodeFailure};

/// Fields whose values must never be echoed back in an error response.
const SECRET_FIELDS: &[&str] = &["password"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ErrorVerbosity {
    /// Server returns an empty response with [`StatusCode::NO_CONTENT`] for all errors.
    None,
    /// Server returns only the appropriate status code.
    StatusCode,
    /// Server returns only the message with the appropriate status code.
    Message,
    /// Server returns the message, the error type with cleared error content and the appropriate status code.
    Type,
    /// Server returns the message, the error type with the error content and the appropriate status code.
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_error_reason(&self) -> bool {
        matches!(self, ErrorVerbosity::Full)
    }
}

pub trait ErrorVerbosityProvider {
    /// Returns the error verbosity.
    fn error_verbosity(&self) -> ErrorVerbosity;
}

#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    #[serde(flatten)]
    error: ApiError,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiErrorMessage {
    message: &'static str,
}

impl From<ApiErrorResponse> for ApiErrorMessage {
    fn from(response: ApiErrorResponse) -> Self {
        ApiErrorMessage {
            message: response.message,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status_code = self.error.status_code();

        match self.error.verbosity() {
            ErrorVerbosity::None => StatusCode::NO_CONTENT.into_response(),
            ErrorVerbosity::StatusCode => status_code.into_response(),
            ErrorVerbosity::Message => {
                (status_code, Json(ApiErrorMessage::from(self))).into_response()
            }
            ErrorVerbosity::Type | ErrorVerbosity::Full => {
                (status_code, Json(self)).into_response()
            }
        }
    }
}

#[derive(Debug, From, Serialize)]
#[serde(tag = "error_type", content = "error")]
/// API error
pub enum ApiError {
    /// Internal server error
    ///
    /// This error is returned when an internal server error occurs.
    InternalServerError(InternalServerError),
    /// Query error
    ///
    /// This error is returned when the query parameters are not as expected.
    Query(QueryError),
    /// Body error
    ///
    /// This error is returned when the JSON body is not as expected.
    Body(BodyError),
    /// Path error
    ///
    /// This error is returned when the path is not as expected.
    Path(PathError),
    /// Form error
    ///
    /// This error is returned when the form fields are not as expected.
    Form(FormError),
    /// Multipart error
    ///
    /// This error is returned when a multipart body can not be read.
    Multipart(MultipartError),
    /// Validation error
    ///
    /// This error is returned when the extracted data violates a field constraint.
    Validation(ValidationError),
    /// Method not allowed
    ///
    /// This error is returned when the method is not allowed.
    MethodNotAllowed(MethodNotAllowedError),
    /// Not found error
    ///
    /// This error is returned when the requested resource is not found.
    NotFound(NotFoundError),
}

impl ApiError {
    fn verbosity(&self) -> ErrorVerbosity {
        match self {
            ApiError::InternalServerError(err) => err.verbosity,
            ApiError::Query(err) => err.verbosity,
            ApiError::Body(err) => err.verbosity,
            ApiError::Path(err) => err.verbosity,
            ApiError::Form(err) => err.verbosity,
            ApiError::Multipart(err) => err.verbosity,
            ApiError::Validation(err) => err.verbosity,
            ApiError::MethodNotAllowed(err) => err.verbosity,
            ApiError::NotFound(err) => err.verbosity,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(_) => "An internal server error has occurred",
            ApiError::Query(_) => "Failed to parse query parameters",
            ApiError::Body(_) => "Failed to parse request body",
            ApiError::Path(_) => "Failed to parse path parameters",
            ApiError::Form(_) => "Failed to parse form fields",
            ApiError::Multipart(_) => "Failed to read multipart body",
            ApiError::Validation(_) => "Validation failed",
            ApiError::MethodNotAllowed(_) => "Method not allowed",
            ApiError::NotFound(_) => "The requested resource was not found",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Query(err) => err.status,
            ApiError::Body(err) => err.status,
            ApiError::Form(err) => err.status,
            ApiError::Multipart(err) => err.status,
            ApiError::Path(_) | ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        let message = match error.verbosity() {
            ErrorVerbosity::None => "",
            _ => error.message(),
        };

        ApiErrorResponse { error, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiErrorResponse::from(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct InternalServerError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    internal_server_error: Option<String>,
}

impl InternalServerError {
    pub fn from_generic_error<E: Into<anyhow::Error>>(verbosity: ErrorVerbosity, err: E) -> Self {
        let err: anyhow::Error = err.into();
        let err = format!("{err:#}");
        tracing::error!(%err, "Internal server error");

        let internal_server_error = verbosity.should_generate_error_reason().then_some(err);

        InternalServerError {
            verbosity,
            internal_server_error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QueryError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    #[serde(skip)]
    status: StatusCode,
    query_error_field: Option<String>,
    query_error_reason: Option<String>,
    query_expected_schema: Option<String>,
}

impl QueryError {
    pub fn new(
        verbosity: ErrorVerbosity,
        failure: DecodeFailure,
        query_expected_schema: String,
    ) -> Self {
        let (query_error_field, query_error_reason, query_expected_schema) =
            match verbosity.should_generate_error_reason() {
                true => (failure.field, Some(failure.reason), Some(query_expected_schema)),
                false => (None, None, None),
            };

        QueryError {
            verbosity,
            status: failure.status,
            query_error_field,
            query_error_reason,
            query_expected_schema,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BodyError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    #[serde(skip)]
    status: StatusCode,
    body_error_field: Option<String>,
    body_error_reason: Option<String>,
    body_expected_schema: Option<String>,
}

impl BodyError {
    pub fn new(
        verbosity: ErrorVerbosity,
        failure: DecodeFailure,
        body_expected_schema: String,
    ) -> Self {
        let (body_error_field, body_error_reason, body_expected_schema) =
            match verbosity.should_generate_error_reason() {
                true => (failure.field, Some(failure.reason), Some(body_expected_schema)),
                false => (None, None, None),
            };

        BodyError {
            verbosity,
            status: failure.status,
            body_error_field,
            body_error_reason,
            body_expected_schema,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PathError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    path_error_reason: Option<String>,
}

impl PathError {
    pub fn new(verbosity: ErrorVerbosity, path_error_reason: String) -> Self {
        let path_error_reason = verbosity
            .should_generate_error_reason()
            .then_some(path_error_reason);

        PathError {
            verbosity,
            path_error_reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FormError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    #[serde(skip)]
    status: StatusCode,
    form_error_field: Option<String>,
    form_error_reason: Option<String>,
    form_expected_schema: Option<String>,
}

impl FormError {
    pub fn new(
        verbosity: ErrorVerbosity,
        failure: DecodeFailure,
        form_expected_schema: String,
    ) -> Self {
        let (form_error_field, form_error_reason, form_expected_schema) =
            match verbosity.should_generate_error_reason() {
                true => (failure.field, Some(failure.reason), Some(form_expected_schema)),
                false => (None, None, None),
            };

        FormError {
            verbosity,
            status: failure.status,
            form_error_field,
            form_error_reason,
            form_expected_schema,
        }
    }
}

/// A multipart body that could not be read. Keeps the status axum chose, e.g. `413` for an
/// upload over the body limit.
#[derive(Debug, Serialize)]
pub struct MultipartError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    #[serde(skip)]
    status: StatusCode,
    multipart_error_reason: Option<String>,
}

impl MultipartError {
    pub fn new(
        verbosity: ErrorVerbosity,
        multipart_error_reason: String,
        status: StatusCode,
    ) -> Self {
        let multipart_error_reason = verbosity
            .should_generate_error_reason()
            .then_some(multipart_error_reason);

        MultipartError {
            verbosity,
            status: rejection_status(status),
            multipart_error_reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    validation_errors: Option<ValidationErrors>,
}

impl ValidationError {
    pub fn from_validation_errors(verbosity: ErrorVerbosity, mut errors: ValidationErrors) -> Self {
        redact_secrets(&mut errors);

        let validation_errors = verbosity.should_generate_error_reason().then_some(errors);

        ValidationError {
            verbosity,
            validation_errors,
        }
    }
}

/// Removes the offending value of secret fields, nested structs and lists included.
fn redact_secrets(errors: &mut ValidationErrors) {
    for (field, kind) in errors.errors_mut().iter_mut() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if SECRET_FIELDS.contains(field) {
                    for field_error in field_errors.iter_mut() {
                        field_error.params.remove("value");
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => redact_secrets(nested),
            ValidationErrorsKind::List(items) => {
                for nested in items.values_mut() {
                    redact_secrets(nested);
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MethodNotAllowedError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl MethodNotAllowedError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        MethodNotAllowedError { verbosity }
    }
}

#[derive(Debug, Serialize)]
pub struct NotFoundError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    not_found_reason: Option<String>,
}

impl NotFoundError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        NotFoundError {
            verbosity,
            not_found_reason: None,
        }
    }

    pub fn with_reason(verbosity: ErrorVerbosity, not_found_reason: String) -> Self {
        let not_found_reason = verbosity
            .should_generate_error_reason()
            .then_some(not_found_reason);

        NotFoundError {
            verbosity,
            not_found_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Debug, Validate)]
    struct Credentials {
        #[validate(length(min = 3))]
        username: String,
        #[validate(length(min = 8))]
        password: String,
    }

    #[derive(Debug, Validate)]
    struct Envelope {
        #[validate(nested)]
        credentials: Credentials,
    }

    fn field_params(errors: &ValidationErrors, field: &str) -> Vec<String> {
        errors.field_errors()[field][0]
            .params
            .keys()
            .map(|key| key.to_string())
            .collect()
    }

    #[test]
    fn secret_values_are_redacted() {
        let credentials = Credentials {
            username: "ab".into(),
            password: "short".into(),
        };

        let mut errors = credentials.validate().unwrap_err();
        redact_secrets(&mut errors);

        assert!(field_params(&errors, "username").contains(&"value".to_string()));
        assert!(!field_params(&errors, "password").contains(&"value".to_string()));
    }

    #[test]
    fn nested_secret_values_are_redacted() {
        let envelope = Envelope {
            credentials: Credentials {
                username: "abc".into(),
                password: "short".into(),
            },
        };

        let mut errors = envelope.validate().unwrap_err();
        redact_secrets(&mut errors);

        let ValidationErrorsKind::Struct(nested) = &errors.errors()["credentials"] else {
            panic!("Expected nested errors");
        };

        assert!(!field_params(nested, "password").contains(&"value".to_string()));
    }

    #[test]
    fn reasons_are_hidden_below_full_verbosity() {
        let error = PathError::new(ErrorVerbosity::Type, "invalid digit".into());

        assert!(error.path_error_reason.is_none());
    }

    #[test]
    fn validation_errors_are_unprocessable() {
        let error: ApiError = ValidationError::from_validation_errors(
            ErrorVerbosity::Full,
            ValidationErrors::new(),
        )
        .into();

        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn multipart_errors_keep_their_status() {
        let error: ApiError = MultipartError::new(
            ErrorVerbosity::Full,
            "length limit exceeded".into(),
            StatusCode::PAYLOAD_TOO_LARGE,
        )
        .into();

        assert_eq!(error.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn decode_fields_follow_the_verbosity() {
        let failure = DecodeFailure {
            field: Some("hair_color".into()),
            reason: "unknown variant `blonde`".into(),
            status: StatusCode::UNPROCESSABLE_ENTITY,
        };

        let full = BodyError::new(ErrorVerbosity::Full, failure.clone(), String::new());
        assert_eq!(full.body_error_field.as_deref(), Some("hair_color"));

        let terse = BodyError::new(ErrorVerbosity::Message, failure, String::new());
        assert!(terse.body_error_field.is_none());
        assert_eq!(terse.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
