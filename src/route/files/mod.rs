pub mod app;
pub mod post_image;
