mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod messaging;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use config::Config;
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use crate::db::db::DBClient;
use crate::messaging::whatsapp::WhatsAppClient;
use crate::service::{
    reminder_service::ReminderService, verification_service::VerificationService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub verification_service: Arc<VerificationService>,
    pub reminder_service: Arc<ReminderService>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config) -> Self {
        let db_client = Arc::new(db_client);
        let whatsapp = Arc::new(WhatsAppClient::new(config.whatsapp.clone()));

        let verification_service =
            Arc::new(VerificationService::new(db_client.clone(), whatsapp.clone()));
        let reminder_service = Arc::new(ReminderService::new(db_client.clone(), whatsapp));

        Self {
            env: config,
            db_client,
            verification_service,
            reminder_service,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            println!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            println!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST]);

    let app_state = Arc::new(AppState::new(DBClient::new(pool), config.clone()));

    // Expired, never-verified codes are swept hourly.
    let verification_service = app_state.verification_service.clone();
    tokio::spawn(async move {
        verification_service.start_cleanup_task().await;
    });

    let app = create_router(app_state).layer(cors);

    println!("🚀 Server is running on http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}
