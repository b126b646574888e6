pub mod contact;
pub mod files;
pub mod home;
pub mod login;
pub mod person;
