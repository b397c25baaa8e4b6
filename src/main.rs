use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use todo_api::data::memory::InMemoryStore;
use todo_api::infrastructure::config::Config;
use todo_api::infrastructure::logging::init_logging;
use todo_api::presentation::handlers::AppState;
use todo_api::presentation::middleware::RequestTracing;
use todo_api::presentation::routes::configure;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_logging(&config.log_level);
    info!(
        algorithm = ?config.jwt.algorithm,
        expire_minutes = config.jwt.expire_minutes,
        "Configuration loaded"
    );

    let store = Arc::new(InMemoryStore::new());
    let state = web::Data::new(AppState::new(store, config.jwt.clone()));
    info!("Application state initialized");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(RequestTracing)
            .configure(configure)
    });

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let server = server.bind((config.server.host.as_str(), config.server.port))?;
    info!(
        address = %bind_addr,
        routes = %"GET /, GET /health, POST /token, GET|POST /users/, PUT|DELETE /users/{id}, GET|POST /todos/",
        "Starting HTTP server"
    );
    server.run().await?;

    Ok(())
}
