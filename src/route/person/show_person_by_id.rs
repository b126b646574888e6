use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ErrorVerbosityProvider, NotFoundError},
    extractor::{path::ApiPath, validated::ValidatedFromRequestParts},
    state::ApiState,
    types::person::PersonId,
};

use super::PersonIdPath;

#[derive(Debug, Serialize, ToSchema)]
pub struct ShowPersonByIdResponse {
    #[schema(example = 3)]
    pub created: PersonId,
}

impl IntoResponse for ShowPersonByIdResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Find a person by id created in the app
#[utoipa::path(
    get,
    path = "/person/detail/{person_id}",
    tag = "Persons",
    params(PersonIdPath),
    responses(
        (status = 200, description = "The person exists", body = ShowPersonByIdResponse),
        (status = 404, description = "This person doesn't exist!"),
        (status = 422, description = "The id is not an integer greater than or equal to 1"),
    )
)]
pub async fn show_person_by_id(
    State(state): State<ApiState>,
    ValidatedFromRequestParts(ApiPath(PersonIdPath { person_id })): ValidatedFromRequestParts<
        ApiPath<PersonIdPath>,
    >,
) -> Result<ShowPersonByIdResponse, ApiError> {
    if !state.persons().contains(person_id) {
        tracing::warn!(person_id, "Person not found");

        return Err(NotFoundError::with_reason(
            state.error_verbosity(),
            String::from("This person doesn't exist!"),
        )
        .into());
    }

    Ok(ShowPersonByIdResponse { created: person_id })
}
