use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::error::{ApiError, ErrorVerbosityProvider};

use super::{
    decode::{self, Source},
    Extractor,
};

/// Extracts query parameters from the request, rejecting with an [`ApiError`] that names the
/// offending parameter.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + JsonSchema + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "query_extractor", skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.uri.query().unwrap_or_default();

        let query = decode::urlencoded::<T>(raw.as_bytes()).map_err(|failure| {
            failure.into_api_error::<T>(Source::Query, state.error_verbosity())
        })?;

        tracing::trace!(?query, "Extracted");

        Ok(ApiQuery(query))
    }
}

impl<T> Extractor for ApiQuery<T> {
    type Extracted = T;

    fn extracted(&self) -> &Self::Extracted {
        &self.0
    }
}
