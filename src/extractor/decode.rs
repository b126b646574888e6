use std::fmt::Display;

use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

use crate::error::{
    ApiError, BodyError, ErrorVerbosity, FormError, InternalServerError, QueryError,
};

/// Root of a `serde_path_to_error` path.
const ROOT: &str = ".";

/// Where a payload that failed to decode came from.
#[derive(Debug, Clone, Copy)]
pub enum Source {
    Body,
    Query,
    Form,
}

/// A payload that could not be deserialized into its target type.
#[derive(Debug, Clone)]
pub struct DecodeFailure {
    /// Dotted path of the offending field. `None` when the payload as a whole is malformed.
    pub field: Option<String>,
    pub reason: String,
    pub status: StatusCode,
}

/// Status of a request whose payload could not be read or decoded.
///
/// Only `413` survives from the underlying rejection. Everything else is a `422`.
pub fn rejection_status(status: StatusCode) -> StatusCode {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => status,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl DecodeFailure {
    pub fn whole(reason: impl Into<String>, status: StatusCode) -> Self {
        DecodeFailure {
            field: None,
            reason: reason.into(),
            status: rejection_status(status),
        }
    }

    fn from_path_error<E: Display>(err: serde_path_to_error::Error<E>) -> Self {
        let path = err.path().to_string();
        let inner = err.into_inner().to_string();

        let missing = inner
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
            .map(str::to_owned);

        let (parent, reason) = match path == ROOT {
            true => (None, inner),
            false => {
                let reason = format!("{path}: {inner}");
                (Some(path), reason)
            }
        };

        let field = match (parent, missing) {
            (Some(parent), Some(missing)) => Some(format!("{parent}.{missing}")),
            (None, Some(missing)) => Some(missing),
            (parent, None) => parent,
        };

        DecodeFailure {
            field,
            reason,
            status: StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Turns the failure into the [`ApiError`] of its source, attaching the schema of `T`.
    pub fn into_api_error<T: JsonSchema>(
        self,
        source: Source,
        verbosity: ErrorVerbosity,
    ) -> ApiError {
        tracing::warn!(?source, field = ?self.field, reason = %self.reason, "Rejection");

        let expected_schema = match serde_yaml::to_string(&schema_for!(T)) {
            Ok(expected_schema) => expected_schema,
            Err(err) => return InternalServerError::from_generic_error(verbosity, err).into(),
        };

        match source {
            Source::Body => BodyError::new(verbosity, self, expected_schema).into(),
            Source::Query => QueryError::new(verbosity, self, expected_schema).into(),
            Source::Form => FormError::new(verbosity, self, expected_schema).into(),
        }
    }
}

/// Deserializes a JSON document, tracking the path of the offending field.
pub fn json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeFailure> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);

    let value = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(DecodeFailure::from_path_error)?;

    deserializer
        .end()
        .map_err(|err| DecodeFailure::whole(err.to_string(), StatusCode::UNPROCESSABLE_ENTITY))?;

    Ok(value)
}

/// Deserializes `application/x-www-form-urlencoded` data, tracking the path of the offending field.
pub fn urlencoded<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeFailure> {
    let deserializer = serde_urlencoded::Deserializer::new(form_urlencoded::parse(bytes));

    serde_path_to_error::deserialize(deserializer).map_err(DecodeFailure::from_path_error)
}

fn mime_essence(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let essence = value.split(';').next()?.trim().to_ascii_lowercase();

    Some(essence)
}

pub fn is_json(headers: &HeaderMap) -> bool {
    match mime_essence(headers) {
        Some(essence) => {
            essence == "application/json"
                || (essence.starts_with("application/") && essence.ends_with("+json"))
        }
        None => false,
    }
}

pub fn is_urlencoded(headers: &HeaderMap) -> bool {
    mime_essence(headers).as_deref() == Some("application/x-www-form-urlencoded")
}

pub fn is_multipart(headers: &HeaderMap) -> bool {
    mime_essence(headers).as_deref() == Some("multipart/form-data")
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "lowercase")]
    #[allow(dead_code)]
    enum Color {
        White,
        Black,
    }

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Inner {
        age: i64,
        color: Option<Color>,
    }

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Outer {
        inner: Inner,
    }

    #[test]
    fn unknown_variants_name_their_field() {
        let failure = json::<Inner>(br#"{"age": 3, "color": "blonde"}"#).unwrap_err();

        assert_eq!(failure.field.as_deref(), Some("color"));
        assert!(failure.reason.contains("unknown variant"));
    }

    #[test]
    fn missing_fields_are_named() {
        let failure = json::<Inner>(br#"{"color": "white"}"#).unwrap_err();
        assert_eq!(failure.field.as_deref(), Some("age"));

        let failure = json::<Outer>(br#"{"inner": {"color": "black"}}"#).unwrap_err();
        assert_eq!(failure.field.as_deref(), Some("inner.age"));
    }

    #[test]
    fn malformed_documents_have_no_field() {
        let failure = json::<Inner>(b"{not json").unwrap_err();

        assert_eq!(failure.field, None);
    }

    #[test]
    fn urlencoded_type_errors_name_their_field() {
        let failure = urlencoded::<Inner>(b"age=young").unwrap_err();
        assert_eq!(failure.field.as_deref(), Some("age"));

        let failure = urlencoded::<Inner>(b"color=white").unwrap_err();
        assert_eq!(failure.field.as_deref(), Some("age"));
    }

    #[test]
    fn only_payload_too_large_survives() {
        assert_eq!(
            rejection_status(StatusCode::PAYLOAD_TOO_LARGE),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            rejection_status(StatusCode::BAD_REQUEST),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            rejection_status(StatusCode::UNSUPPORTED_MEDIA_TYPE),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn content_types_are_matched_on_their_essence() {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(is_json(&headers));

        headers.insert(CONTENT_TYPE, "application/problem+json".parse().unwrap());
        assert!(is_json(&headers));

        headers.insert(CONTENT_TYPE, "multipart/form-data; boundary=x".parse().unwrap());
        assert!(is_multipart(&headers));
        assert!(!is_json(&headers));
        assert!(!is_urlencoded(&headers));
    }
}
