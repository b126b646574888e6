use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    extractor::{json::ApiJson, validated::ValidatedFromRequest},
    types::person::{Person, PersonOut},
};

#[derive(Debug)]
pub struct CreatePersonResponse(pub PersonOut);

impl IntoResponse for CreatePersonResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Create Person in the app
///
/// Validates a person and returns it without its password.
#[utoipa::path(
    post,
    path = "/person",
    tag = "Persons",
    request_body = Person,
    responses(
        (status = 201, description = "Person created", body = PersonOut),
        (status = 422, description = "A field violates its constraints"),
    )
)]
pub async fn create_person(
    ValidatedFromRequest(ApiJson(person)): ValidatedFromRequest<ApiJson<Person>>,
) -> CreatePersonResponse {
    tracing::debug!(?person, "Creating person");

    CreatePersonResponse(PersonOut::from(person))
}
