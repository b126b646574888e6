use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema, Validate)]
pub struct Location {
    #[schema(example = "Medellin")]
    pub city: String,
    #[schema(example = "Colombia")]
    pub country: String,
}
