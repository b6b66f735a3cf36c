mod auth;
mod config;
mod doc;
mod dtos;
mod routes;
mod state;
mod utils;

use crate::{
    auth::{CourseClaims, require_user},
    config::Config,
    doc::ApiDoc,
    state::AppState,
    utils::shutdown::shutdown_signal,
};
use axum::{Router, middleware};
use database::{db::create_connection, services::CourseService};
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let db = create_connection(&config.database_url)
        .await
        .expect("Failed to connect to the course database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("Failed to run database migrations");
        info!("Database migrations are up to date");
    }

    let oauth2_resource_server = <OAuth2ResourceServer<CourseClaims>>::builder()
        .issuer_url(&config.oidc_issuer_url)
        .build()
        .await
        .expect("Failed to build OAuth2ResourceServer");

    let state = AppState::new(Arc::new(CourseService::new(db)), config.limits);

    let protected = routes::protected_routes().layer(
        ServiceBuilder::new()
            .layer(oauth2_resource_server.into_layer())
            .layer(middleware::from_fn(require_user)),
    );

    let app = Router::new()
        .merge(routes::public_routes())
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
