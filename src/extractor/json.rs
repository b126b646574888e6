use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::error::{ApiError, ErrorVerbosityProvider};

use super::{
    decode::{self, DecodeFailure, Source},
    Extractor,
};

/// Extracts the request body as JSON, rejecting with an [`ApiError`] that names the
/// offending field.
///
/// Consumes the request.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + JsonSchema + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "json_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let verbosity = state.error_verbosity();

        if !decode::is_json(req.headers()) {
            return Err(DecodeFailure::whole(
                "Expected request with `Content-Type: application/json`",
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            )
            .into_api_error::<T>(Source::Body, verbosity));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            DecodeFailure::whole(rejection.body_text(), rejection.status())
                .into_api_error::<T>(Source::Body, verbosity)
        })?;

        let json = decode::json::<T>(&bytes)
            .map_err(|failure| failure.into_api_error::<T>(Source::Body, verbosity))?;

        tracing::trace!(?json, "Extracted");

        Ok(ApiJson(json))
    }
}

impl<T> Extractor for ApiJson<T> {
    type Extracted = T;

    fn extracted(&self) -> &Self::Extracted {
        &self.0
    }
}
