use std::{net::SocketAddr, path::Path, sync::Arc};

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, middleware, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::ErrorVerbosity,
    middleware::{
        fallback::{method_not_allowed, not_found},
        trace_headers::trace_headers,
        trace_response_body::trace_response_body,
    },
    openapi::{ApiDoc, OPENAPI_JSON_PATH},
    route,
    state::{person_directory::InMemoryPersonDirectory, ApiState},
    types::person::PersonId,
};

fn default_person_ids() -> Vec<PersonId> {
    vec![1, 2, 3, 4, 5]
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub socket_address: SocketAddr,
    pub error_verbosity: ErrorVerbosity,
    /// Ids of the persons that exist.
    #[serde(default = "default_person_ids")]
    pub person_ids: Vec<PersonId>,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Trace every JSON response body.
    #[serde(default)]
    pub trace_response_body: bool,
}

impl ServerConfig {
    pub fn new(socket_address: SocketAddr, error_verbosity: ErrorVerbosity) -> Self {
        Self {
            socket_address,
            error_verbosity,
            person_ids: default_person_ids(),
            max_upload_bytes: default_max_upload_bytes(),
            trace_response_body: false,
        }
    }

    pub async fn from_config_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Builds the application with all routes, documentation and layers.
    pub fn router(&self) -> Router {
        let persons = InMemoryPersonDirectory::new(self.config.person_ids.iter().copied());
        let state = ApiState::new(self.config.error_verbosity, Arc::new(persons));

        let mut api = Router::<ApiState>::new()
            .merge(route::home::app::app())
            .merge(route::person::app::app())
            .merge(route::login::app::app())
            .merge(route::contact::app::app())
            .merge(route::files::app::app())
            .fallback(not_found)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                method_not_allowed,
            ))
            .layer(DefaultBodyLimit::max(self.config.max_upload_bytes));

        if self.config.trace_response_body {
            api = api.layer(middleware::from_fn_with_state(
                state.clone(),
                trace_response_body,
            ));
        }

        api.with_state(state)
            .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
            .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
            .merge(RapiDoc::new(OPENAPI_JSON_PATH).path("/rapidoc"))
            .layer(middleware::from_fn(trace_headers))
            .layer(
                ServiceBuilder::new()
                    .layer(
                        TraceLayer::new_for_http()
                            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                            .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                            .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                    )
                    .layer(RequestDecompressionLayer::new())
                    .layer(CompressionLayer::new())
                    .layer(CorsLayer::permissive()),
            )
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router();

        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");

        tracing::info!("CTRL+C received");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;

        tracing::info!("SIGTERM received");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
