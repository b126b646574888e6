use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use derivative::Derivative;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::extractor::{form::ApiForm, validated::ValidatedFromRequest};

#[derive(Derivative, Deserialize, JsonSchema, ToSchema, Validate)]
#[derivative(Debug)]
pub struct LoginForm {
    #[validate(length(min = 1, max = 20))]
    #[schema(min_length = 1, max_length = 20, example = "andresmaya737")]
    pub username: String,
    #[validate(length(min = 1))]
    #[derivative(Debug(format_with = "crate::utils::mask_fmt"))]
    #[schema(min_length = 1, format = Password)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginOut {
    #[schema(max_length = 20, example = "andresmaya737")]
    pub username: String,
}

impl IntoResponse for LoginOut {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Login
///
/// Accepts the credentials and echoes the username back. The password is never returned.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Logged in", body = LoginOut),
        (status = 422, description = "Missing or invalid form fields"),
    )
)]
pub async fn login(
    ValidatedFromRequest(ApiForm(LoginForm { username, .. })): ValidatedFromRequest<
        ApiForm<LoginForm>,
    >,
) -> LoginOut {
    tracing::debug!(%username, "Login");

    LoginOut { username }
}
