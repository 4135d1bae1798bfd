// src/main.rs - server bootstrap
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Result;
use log::{error, info};

use blog_be::AppState;
use blog_be::config::{AppConfig, Storage};
use blog_be::repositories::{InMemoryPostRepository, PgPostRepository, PostRepository};

async fn build_repository(storage: &Storage) -> Result<Arc<dyn PostRepository>> {
    match storage {
        Storage::Postgres(pg) => {
            info!("Using postgres storage at {}/{}", pg.host, pg.dbname);
            let repo = PgPostRepository::new(pg.create_pool()?);
            repo.ensure_schema().await?;
            Ok(Arc::new(repo))
        }
        Storage::Memory => {
            info!("Using in-memory storage");
            Ok(Arc::new(InMemoryPostRepository::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let repo = match build_repository(&config.storage).await {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to set up storage: {:#}", e);
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState::new(repo));
    let allowed_origins = config.allowed_origins.clone();
    let bind_address = config.bind_address();

    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["content-type", "accept", "x-requested-with"])
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(blog_be::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
