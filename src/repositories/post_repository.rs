// src/repositories/post_repository.rs - storage contract for posts

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;
use tokio_postgres::error::SqlState;

use crate::models::page::{Page, PageRequest};
use crate::models::post::Post;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("database error: {0}")]
    Database(#[source] tokio_postgres::Error),
    #[error("duplicate value '{value}'")]
    UniqueViolation { value: String },
    #[error("no post with id {0}")]
    Missing(i64),
}

impl From<tokio_postgres::Error> for RepoError {
    fn from(err: tokio_postgres::Error) -> Self {
        if err.code() != Some(&SqlState::UNIQUE_VIOLATION) {
            return RepoError::Database(err);
        }
        let value = err.as_db_error().and_then(|db| {
            db.detail()
                .and_then(duplicate_value)
                .or_else(|| duplicate_value(db.message()))
        });
        match value {
            Some(value) => RepoError::UniqueViolation { value },
            None => RepoError::Database(err),
        }
    }
}

static PG_DUPLICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Key \([^)]*\)=\((?P<value>.*)\) already exists").expect("valid regex")
});

static MYSQL_DUPLICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Duplicate entry '(?P<value>.*)' for key").expect("valid regex")
});

/// Pulls the offending value out of a driver's uniqueness-violation text.
/// Understands the Postgres detail line and the MySQL message.
pub fn duplicate_value(text: &str) -> Option<String> {
    [&*PG_DUPLICATE, &*MYSQL_DUPLICATE]
        .into_iter()
        .find_map(|re| re.captures(text))
        .map(|caps| caps["value"].to_string())
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// One page ordered ascending by `request.sort`, ties broken by id.
    async fn find_all(&self, request: PageRequest) -> Result<Page<Post>, RepoError>;

    /// Inserts when `post.id` is `None`, otherwise overwrites the existing row.
    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    /// Deleting an id that is not stored is a no-op.
    async fn delete_by_id(&self, id: i64) -> Result<(), RepoError>;
}
