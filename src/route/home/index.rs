use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    #[serde(rename = "Hello")]
    #[schema(example = "world")]
    hello: String,
}

impl IntoResponse for HomeResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Home
#[utoipa::path(
    get,
    path = "/",
    tag = "Home",
    responses((status = 200, description = "Greeting", body = HomeResponse))
)]
pub async fn home() -> HomeResponse {
    HomeResponse {
        hello: String::from("world"),
    }
}
