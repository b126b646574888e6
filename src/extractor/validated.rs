use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use validator::{Validate, ValidationErrors};

use crate::error::{ApiError, ErrorVerbosityProvider, ValidationError};

use super::Extractor;

fn validate<T: Validate>(extracted: &T, state: &impl ErrorVerbosityProvider) -> Result<(), ApiError> {
    match extracted.validate() {
        Ok(_) => {
            tracing::trace!("Validated");

            Ok(())
        }
        Err(errors) => {
            tracing::warn!(fields = ?field_names(&errors), "Validation errors");

            let verbosity = state.error_verbosity();

            Err(ValidationError::from_validation_errors(verbosity, errors).into())
        }
    }
}

fn field_names(errors: &ValidationErrors) -> Vec<&'static str> {
    errors.errors().keys().copied().collect()
}

/// An extractor that validates the data extracted from the request parts by another extractor.
pub struct ValidatedFromRequestParts<X>(pub X);

#[async_trait]
impl<X, S> FromRequestParts<S> for ValidatedFromRequestParts<X>
where
    X: FromRequestParts<S, Rejection = ApiError> + Extractor,
    <X as Extractor>::Extracted: Validate,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "validated_extractor", skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let inner = X::from_request_parts(parts, state).await?;

        validate(inner.extracted(), state)?;

        Ok(ValidatedFromRequestParts(inner))
    }
}

/// An extractor that validates the data extracted from the request by another extractor.
pub struct ValidatedFromRequest<X>(pub X);

#[async_trait]
impl<X, S> FromRequest<S> for ValidatedFromRequest<X>
where
    X: FromRequest<S, Rejection = ApiError> + Extractor,
    <X as Extractor>::Extracted: Validate,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "validated_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let inner = X::from_request(req, state).await?;

        validate(inner.extracted(), state)?;

        Ok(ValidatedFromRequest(inner))
    }
}
