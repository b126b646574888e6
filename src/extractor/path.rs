use axum::{
    async_trait,
    extract::{FromRequestParts, Path as AxumPath},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::error::{ApiError, ErrorVerbosityProvider, PathError};

use super::Extractor;

/// Path parameters that reject with an [`ApiError`] instead of axum's plain-text rejection.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "path_extractor", skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumPath(path) = AxumPath::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(?rejection, "Rejection");

                PathError::new(state.error_verbosity(), rejection.body_text())
            })?;

        tracing::trace!(?path, "Extracted");

        Ok(ApiPath(path))
    }
}

impl<T> Extractor for ApiPath<T> {
    type Extracted = T;

    fn extracted(&self) -> &Self::Extracted {
        &self.0
    }
}
