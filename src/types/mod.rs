pub mod email;
pub mod location;
pub mod person;
