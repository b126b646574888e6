pub mod app;
pub mod login_user;
