use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new()
        .route("/person", post(super::create_person::create_person))
        .route("/person/detail", get(super::show_person::show_person))
        .route(
            "/person/detail/:person_id",
            get(super::show_person_by_id::show_person_by_id),
        )
        .route(
            "/person/:person_id",
            put(super::update_person::update_person),
        )
}
