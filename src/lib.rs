pub mod cli_args;
mod error;
mod extractor;
mod middleware;
mod openapi;
mod route;
pub mod server;
mod state;
mod types;
mod utils;
