use utoipa::OpenApi;

use crate::{
    route::{
        contact::send_contact::ContactForm,
        files::post_image::{ImageUpload, UploadedImage},
        home::index::HomeResponse,
        login::login_user::{LoginForm, LoginOut},
        person::{
            show_person_by_id::ShowPersonByIdResponse,
            update_person::{UpdatePersonBody, UpdatedPerson},
        },
    },
    types::{
        location::Location,
        person::{HairColor, Person, PersonOut},
    },
};

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::route::home::index::home,
        crate::route::person::create_person::create_person,
        crate::route::person::show_person::show_person,
        crate::route::person::show_person_by_id::show_person_by_id,
        crate::route::person::update_person::update_person,
        crate::route::login::login_user::login,
        crate::route::contact::send_contact::contact,
        crate::route::files::post_image::post_image,
    ),
    components(schemas(
        HomeResponse,
        HairColor,
        Person,
        PersonOut,
        Location,
        ShowPersonByIdResponse,
        UpdatePersonBody,
        UpdatedPerson,
        LoginForm,
        LoginOut,
        ContactForm,
        ImageUpload,
        UploadedImage,
    )),
    tags(
        (name = "Home"),
        (name = "Persons", description = "Create, find and update persons"),
        (name = "Login"),
        (name = "Contact"),
        (name = "Files"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;

        for path in [
            "/",
            "/person",
            "/person/detail",
            "/person/detail/{person_id}",
            "/person/{person_id}",
            "/login",
            "/contact",
            "/post-image",
        ] {
            assert!(paths.contains_key(path), "{path} is not documented");
        }
    }
}
