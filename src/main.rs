use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
mod routes;
pub mod services;
pub mod state;

use config::{Config, StoreBackend};
use repositories::dynamo_store::DynamoStore;
use repositories::file_store::FileStore;
use repositories::store::Store;
use services::admin_service::AdminService;
use services::queue_service::QueueService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    // Set up services
    let store: Arc<dyn Store + Send + Sync> = match &config.backend {
        StoreBackend::File { data_dir } => {
            info!("using file store in {}", data_dir.display());
            Arc::new(FileStore::new(data_dir.clone()))
        }
        StoreBackend::DynamoDb { table_name } => {
            info!("using DynamoDB store, table {}", table_name);
            let aws_config = aws_config::load_from_env().await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);
            Arc::new(DynamoStore::new(client, table_name.clone()))
        }
    };

    let queue_service = Arc::new(QueueService::new(store, config.queue_config()));
    let admin_service = Arc::new(AdminService::new(
        queue_service.clone(),
        config.admin_password.clone(),
    ));
    let app_state = state::AppState {
        queue_service,
        admin_service,
    };

    // Configure CORS
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Merge routes
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::queue::routes())
        .merge(routes::wings::routes())
        .merge(routes::admin::routes())
        .layer(cors)
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
