use derivative::Derivative;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Identifier of a person as used in path parameters.
pub type PersonId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HairColor {
    White,
    Black,
}

/// A person as submitted by a client, including the password.
///
/// The password never leaves the server, see [`PersonOut`].
#[derive(Derivative, Clone, Deserialize, JsonSchema, ToSchema, Validate)]
#[derivative(Debug)]
pub struct Person {
    #[validate(length(min = 1, max = 50))]
    #[schema(min_length = 1, max_length = 50, example = "Andres")]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    #[schema(min_length = 1, max_length = 50, example = "Maya")]
    pub last_name: String,
    #[validate(range(min = 18, max = 100))]
    #[schema(minimum = 18, maximum = 100, example = 24)]
    pub age: i64,
    #[schema(example = "black")]
    pub hair_color: Option<HairColor>,
    #[schema(example = false)]
    pub is_married: Option<bool>,
    #[validate(email, custom(function = "crate::types::email::email_domain_has_dot"))]
    #[schema(example = "andresmaya737@gmail.com")]
    pub email: String,
    #[validate(length(min = 8))]
    #[derivative(Debug(format_with = "crate::utils::mask_fmt"))]
    #[schema(min_length = 8, format = Password)]
    pub password: String,
}

/// A person as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PersonOut {
    #[schema(example = "Andres")]
    pub first_name: String,
    #[schema(example = "Maya")]
    pub last_name: String,
    #[schema(example = 24)]
    pub age: i64,
    pub hair_color: Option<HairColor>,
    pub is_married: Option<bool>,
    #[schema(example = "andresmaya737@gmail.com")]
    pub email: String,
}

impl From<Person> for PersonOut {
    fn from(person: Person) -> Self {
        PersonOut {
            first_name: person.first_name,
            last_name: person.last_name,
            age: person.age,
            hair_color: person.hair_color,
            is_married: person.is_married,
            email: person.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> Person {
        Person {
            first_name: "Andres".into(),
            last_name: "Maya".into(),
            age: 24,
            hair_color: Some(HairColor::Black),
            is_married: Some(false),
            email: "andresmaya737@gmail.com".into(),
            password: "whatever123".into(),
        }
    }

    fn has_field_error(person: &Person, field: &str) -> bool {
        person
            .validate()
            .err()
            .map(|errors| errors.field_errors().contains_key(field))
            .unwrap_or(false)
    }

    #[test]
    fn valid_person_passes() {
        assert!(person().validate().is_ok());
    }

    #[test]
    fn age_is_bounded_inclusively() {
        for age in [18, 50, 100] {
            let person = Person { age, ..person() };
            assert!(person.validate().is_ok(), "age {age} should pass");
        }

        for age in [-1, 0, 17, 101, 1000] {
            let person = Person { age, ..person() };
            assert!(has_field_error(&person, "age"), "age {age} should fail");
        }
    }

    #[test]
    fn names_must_have_between_1_and_50_chars() {
        let empty = Person {
            first_name: String::new(),
            ..person()
        };
        assert!(has_field_error(&empty, "first_name"));

        let too_long = Person {
            last_name: "a".repeat(51),
            ..person()
        };
        assert!(has_field_error(&too_long, "last_name"));

        let longest = Person {
            first_name: "a".repeat(50),
            last_name: "b".repeat(50),
            ..person()
        };
        assert!(longest.validate().is_ok());
    }

    #[test]
    fn email_must_have_an_email_shape() {
        let invalid = Person {
            email: "not-an-email".into(),
            ..person()
        };
        assert!(has_field_error(&invalid, "email"));

        let dotless = Person {
            email: "a@b".into(),
            ..person()
        };
        assert!(has_field_error(&dotless, "email"));

        let valid = Person {
            email: "a@b.com".into(),
            ..person()
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn password_needs_at_least_8_chars() {
        let short = Person {
            password: "1234567".into(),
            ..person()
        };
        assert!(has_field_error(&short, "password"));
    }

    #[test]
    fn hair_color_accepts_only_known_colors() {
        assert_eq!(
            serde_yaml::from_str::<HairColor>("white").unwrap(),
            HairColor::White
        );
        assert_eq!(
            serde_yaml::from_str::<HairColor>("black").unwrap(),
            HairColor::Black
        );
        assert!(serde_yaml::from_str::<HairColor>("blonde").is_err());
        assert!(serde_yaml::from_str::<HairColor>("Black").is_err());
    }

    #[test]
    fn debug_output_masks_the_password() {
        let debug = format!("{:?}", person());

        assert!(!debug.contains("whatever123"));
        assert!(debug.contains("Andres"));
    }

    #[test]
    fn output_drops_the_password() {
        let out = PersonOut::from(person());

        assert_eq!(out.first_name, "Andres");
        assert_eq!(out.email, "andresmaya737@gmail.com");
    }
}
