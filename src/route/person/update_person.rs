use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    extractor::{
        json::ApiJson,
        path::ApiPath,
        validated::{ValidatedFromRequest, ValidatedFromRequestParts},
    },
    types::{
        location::Location,
        person::{Person, PersonOut},
    },
};

use super::PersonIdPath;

#[derive(Debug, Deserialize, JsonSchema, ToSchema, Validate)]
pub struct UpdatePersonBody {
    #[validate(nested)]
    pub person: Person,
    #[validate(nested)]
    pub location: Location,
}

/// The person fields merged with the location fields.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedPerson {
    #[serde(flatten)]
    pub person: PersonOut,
    #[serde(flatten)]
    pub location: Location,
}

impl IntoResponse for UpdatedPerson {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Update a person
///
/// Validates a person and its location and returns both merged into one object.
#[utoipa::path(
    put,
    path = "/person/{person_id}",
    tag = "Persons",
    params(PersonIdPath),
    request_body = UpdatePersonBody,
    responses(
        (status = 201, description = "Person updated", body = UpdatedPerson),
        (status = 422, description = "A field violates its constraints"),
    )
)]
pub async fn update_person(
    ValidatedFromRequestParts(ApiPath(PersonIdPath { person_id })): ValidatedFromRequestParts<
        ApiPath<PersonIdPath>,
    >,
    ValidatedFromRequest(ApiJson(UpdatePersonBody { person, location })): ValidatedFromRequest<
        ApiJson<UpdatePersonBody>,
    >,
) -> UpdatedPerson {
    tracing::debug!(person_id, ?location, "Updating person");

    UpdatedPerson {
        person: PersonOut::from(person),
        location,
    }
}
