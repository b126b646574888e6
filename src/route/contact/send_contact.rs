use axum::{
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use schemars::JsonSchema;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::extractor::{form::ApiForm, validated::ValidatedFromRequest};

/// Name of the advertising cookie read by [`contact`].
const ADS_COOKIE: &str = "ads";

#[derive(Debug, Deserialize, JsonSchema, ToSchema, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 20))]
    #[schema(min_length = 1, max_length = 20, example = "Andres")]
    pub first_name: String,
    #[validate(length(min = 1, max = 20))]
    #[schema(min_length = 1, max_length = 20, example = "Maya")]
    pub last_name: String,
    #[validate(email, custom(function = "crate::types::email::email_domain_has_dot"))]
    #[schema(example = "andresmaya737@gmail.com")]
    pub email: String,
    #[validate(length(min = 20))]
    #[schema(min_length = 20)]
    pub message: String,
}

/// The `User-Agent` of the sender, if any.
#[derive(Debug)]
pub struct ContactResponse(pub Option<String>);

impl IntoResponse for ContactResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Contact
///
/// Receives a contact message and answers with the `User-Agent` of the sender.
#[utoipa::path(
    post,
    path = "/contact",
    tag = "Contact",
    request_body(content = ContactForm, content_type = "application/x-www-form-urlencoded"),
    params(
        ("user-agent" = Option<String>, Header, description = "User agent of the sender"),
        ("ads" = Option<String>, Cookie, description = "Advertising cookie"),
    ),
    responses(
        (status = 200, description = "User agent of the sender", body = String),
        (status = 422, description = "Missing or invalid form fields"),
    )
)]
pub async fn contact(
    headers: HeaderMap,
    cookies: CookieJar,
    ValidatedFromRequest(ApiForm(form)): ValidatedFromRequest<ApiForm<ContactForm>>,
) -> ContactResponse {
    let ads = cookies.get(ADS_COOKIE).map(|cookie| cookie.value().to_owned());

    tracing::debug!(email = %form.email, ?ads, "Contact message received");

    // Bytes outside visible ASCII are replaced rather than dropping the whole header.
    let user_agent = headers
        .get(USER_AGENT)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    ContactResponse(user_agent)
}
