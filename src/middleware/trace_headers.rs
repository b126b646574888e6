use std::borrow::Cow;

use axum::{
    extract::Request,
    http::{
        header::{AUTHORIZATION, COOKIE, SET_COOKIE},
        HeaderMap, HeaderName,
    },
    middleware::Next,
    response::Response,
};

/// Headers whose values are replaced by `...` before tracing.
const REDACTED: [HeaderName; 3] = [AUTHORIZATION, COOKIE, SET_COOKIE];

fn redacted(headers: &HeaderMap) -> Vec<(&str, Cow<'_, str>)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = match REDACTED.contains(name) {
                true => Cow::Borrowed("..."),
                false => String::from_utf8_lossy(value.as_bytes()),
            };

            (name.as_str(), value)
        })
        .collect()
}

/// Middleware to trace incoming and outgoing headers, with credentials redacted.
pub async fn trace_headers(req: Request, next: Next) -> Response {
    tracing::trace!(incoming_headers = ?redacted(req.headers()), "Headers");

    let res = next.run(req).await;

    tracing::trace!(outgoing_headers = ?redacted(res.headers()), "Headers");

    res
}
