use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::StatusCode,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::error::{ApiError, ErrorVerbosity, ErrorVerbosityProvider, MultipartError};

use super::{
    decode::{self, DecodeFailure, Source},
    Extractor,
};

/// Extracts form fields, rejecting with an [`ApiError`] that names the offending field.
///
/// Accepts `application/x-www-form-urlencoded` bodies as well as the text fields of
/// `multipart/form-data` bodies.
pub struct ApiForm<T>(pub T);

#[derive(Debug, thiserror::Error)]
enum FormFailure {
    #[error("Failed to read multipart body: {reason}")]
    Read { reason: String, status: StatusCode },
    #[error("Failed to re-encode multipart fields: {0}")]
    Encode(#[source] serde_urlencoded::ser::Error),
    #[error("{}", .0.reason)]
    Decode(DecodeFailure),
}

impl From<DecodeFailure> for FormFailure {
    fn from(failure: DecodeFailure) -> Self {
        FormFailure::Decode(failure)
    }
}

impl FormFailure {
    fn read(reason: String, status: StatusCode) -> Self {
        FormFailure::Read { reason, status }
    }

    fn into_api_error<T: JsonSchema>(self, verbosity: ErrorVerbosity) -> ApiError {
        match self {
            FormFailure::Decode(failure) => failure.into_api_error::<T>(Source::Form, verbosity),
            FormFailure::Read { ref reason, status } => {
                tracing::warn!(%reason, %status, "Rejection");

                MultipartError::new(verbosity, self.to_string(), status).into()
            }
            FormFailure::Encode(_) => {
                tracing::warn!(err = %self, "Rejection");

                MultipartError::new(verbosity, self.to_string(), StatusCode::UNPROCESSABLE_ENTITY)
                    .into()
            }
        }
    }
}

async fn from_multipart<T, S>(req: Request, state: &S) -> Result<T, FormFailure>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    let mut multipart = Multipart::from_request(req, state)
        .await
        .map_err(|rejection| FormFailure::read(rejection.body_text(), rejection.status()))?;

    let mut fields = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| FormFailure::read(err.body_text(), err.status()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        let value = field
            .text()
            .await
            .map_err(|err| FormFailure::read(err.body_text(), err.status()))?;

        fields.push((name, value));
    }

    let encoded = serde_urlencoded::to_string(&fields).map_err(FormFailure::Encode)?;

    Ok(decode::urlencoded(encoded.as_bytes())?)
}

async fn from_urlencoded<T, S>(req: Request, state: &S) -> Result<T, FormFailure>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    if !decode::is_urlencoded(req.headers()) {
        return Err(DecodeFailure::whole(
            "Form requests must have `Content-Type: application/x-www-form-urlencoded`",
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
        )
        .into());
    }

    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|rejection| DecodeFailure::whole(rejection.body_text(), rejection.status()))?;

    Ok(decode::urlencoded(&bytes)?)
}

#[async_trait]
impl<T, S> FromRequest<S> for ApiForm<T>
where
    T: DeserializeOwned + JsonSchema + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "form_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let form = match decode::is_multipart(req.headers()) {
            true => from_multipart::<T, S>(req, state).await,
            false => from_urlencoded::<T, S>(req, state).await,
        }
        .map_err(|failure| failure.into_api_error::<T>(state.error_verbosity()))?;

        tracing::trace!(?form, "Extracted");

        Ok(ApiForm(form))
    }
}

impl<T> Extractor for ApiForm<T> {
    type Extracted = T;

    fn extracted(&self) -> &Self::Extracted {
        &self.0
    }
}
