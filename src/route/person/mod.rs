use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::types::person::PersonId;

pub mod app;
pub mod create_person;
pub mod show_person;
pub mod show_person_by_id;
pub mod update_person;

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct PersonIdPath {
    /// Identifier of the person
    #[validate(range(min = 1))]
    #[param(minimum = 1, example = 117)]
    pub person_id: PersonId,
}
