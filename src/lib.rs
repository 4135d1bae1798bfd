pub mod config;
pub mod dtos;
pub mod handlers;
pub mod logging;
pub mod mappers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

use std::sync::Arc;

use actix_web::web;

use crate::handlers::error_handlers::{json_config, path_config};
use crate::handlers::post_handlers::{create_post, delete_post, get_post, list_posts, update_post};
use crate::logging::Logger;
use crate::repositories::PostRepository;
use crate::services::PostService;

#[derive(Clone)]
pub struct AppState {
    pub post_service: PostService,
    /// used by extractor error handlers at the HTTP boundary
    pub log: Logger,
}

impl AppState {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self::with_loggers(
            repo,
            Logger::process("blog_be::services::post"),
            Logger::process("blog_be::http"),
        )
    }

    pub fn with_loggers(repo: Arc<dyn PostRepository>, service_log: Logger, http_log: Logger) -> Self {
        Self {
            post_service: PostService::new(repo, service_log),
            log: http_log,
        }
    }
}

/// Mounts the post routes under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(path_config())
            .service(create_post) // POST /api/posts
            .service(list_posts) // GET /api/posts
            .service(get_post) // GET /api/posts/{id}
            .service(update_post) // PUT /api/posts/{id}
            .service(delete_post), // DELETE /api/posts/{id}
    );
}
