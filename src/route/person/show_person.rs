use std::collections::BTreeMap;

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::extractor::{query::ApiQuery, validated::ValidatedFromRequestParts};

const DEPRECATION: HeaderName = HeaderName::from_static("deprecation");

/// Key used when no name is given.
const NULL_NAME: &str = "null";

#[derive(Debug, Deserialize, JsonSchema, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShowPersonQuery {
    /// Name of the person to filter
    #[validate(length(min = 1, max = 50))]
    #[param(min_length = 1, max_length = 50, example = "Andres")]
    pub name: Option<String>,
    /// Age of the person to filter, greater than 18
    #[validate(range(min = 19))]
    #[param(minimum = 19, example = 23)]
    pub age: Option<i64>,
}

/// A single entry mapping the requested name to the requested age.
#[derive(Debug)]
pub struct ShowPersonResponse(pub BTreeMap<String, Option<i64>>);

impl IntoResponse for ShowPersonResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(DEPRECATION, HeaderValue::from_static("true"))],
            Json(self.0),
        )
            .into_response()
    }
}

/// Show all persons created in the app
///
/// Deprecated. Filters persons by the optional name and age and returns the name mapped to the age.
#[utoipa::path(
    get,
    path = "/person/detail",
    tag = "Persons",
    params(ShowPersonQuery),
    responses(
        (status = 200, description = "Requested name mapped to the requested age"),
        (status = 422, description = "A query parameter violates its constraints"),
    )
)]
pub async fn show_person(
    ValidatedFromRequestParts(ApiQuery(query)): ValidatedFromRequestParts<
        ApiQuery<ShowPersonQuery>,
    >,
) -> ShowPersonResponse {
    tracing::warn!("Deprecated route called");

    let name = query.name.unwrap_or_else(|| NULL_NAME.to_string());

    ShowPersonResponse(BTreeMap::from([(name, query.age)]))
}
