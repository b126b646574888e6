pub mod app;
pub mod send_contact;
