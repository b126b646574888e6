use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};

use crate::error::{ApiError, ErrorVerbosityProvider, MultipartError};

/// A Wrapper around [`axum::extract::Multipart`] that rejects with an [`ApiError`].
pub struct ApiMultipart(pub Multipart);

#[async_trait]
impl<S> FromRequest<S> for ApiMultipart
where
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "multipart_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Multipart::from_request(req, state).await {
            Ok(multipart) => {
                tracing::trace!("Extracted");

                Ok(ApiMultipart(multipart))
            }
            Err(multipart_rejection) => {
                tracing::warn!(rejection=?multipart_rejection, "Rejection");

                let verbosity = state.error_verbosity();

                Err(MultipartError::new(
                    verbosity,
                    multipart_rejection.body_text(),
                    multipart_rejection.status(),
                )
                .into())
            }
        }
    }
}
