use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    error::{ApiError, ErrorVerbosityProvider, MethodNotAllowedError, NotFoundError},
    state::ApiState,
};

/// Fallback for routes that do not exist.
pub async fn not_found(State(state): State<ApiState>, req: Request) -> ApiError {
    tracing::debug!(method = %req.method(), path = %req.uri().path(), "Route not found");

    NotFoundError::new(state.error_verbosity()).into()
}

/// Replaces axum's empty `405` response with an [`ApiError`].
pub async fn method_not_allowed(
    State(state): State<ApiState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let res = next.run(req).await;

    if res.status() != StatusCode::METHOD_NOT_ALLOWED {
        return res;
    }

    tracing::debug!(%method, %path, "Method not allowed");

    let allow = res.headers().get(axum::http::header::ALLOW).cloned();
    let mut res = ApiError::from(MethodNotAllowedError::new(state.error_verbosity())).into_response();

    if let Some(allow) = allow {
        res.headers_mut().insert(axum::http::header::ALLOW, allow);
    }

    res
}
