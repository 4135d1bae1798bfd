// src/repositories/pg_post_repo.rs - posts table over deadpool-postgres

use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::models::page::{Page, PageRequest};
use crate::models::post::Post;
use crate::repositories::post_repository::{PostRepository, RepoError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS posts (
    id          BIGSERIAL PRIMARY KEY,
    title       TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL,
    content     TEXT NOT NULL
)";

const COLUMNS: &str = "id, title, description, content";

#[derive(Clone)]
pub struct PgPostRepository {
    pool: Pool,
}

impl PgPostRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Creates the `posts` table if it is missing.
    pub async fn ensure_schema(&self) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        client.batch_execute(SCHEMA).await?;
        Ok(())
    }
}

fn row_to_post(row: &Row) -> Result<Post, tokio_postgres::Error> {
    Ok(Post {
        id: Some(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        content: row.try_get("content")?,
    })
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        let row = client.query_opt(sql.as_str(), &[&id]).await?;
        Ok(row.as_ref().map(row_to_post).transpose()?)
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<Post>, RepoError> {
        let client = self.pool.get().await?;

        // sort column comes from the SortField whitelist, never from raw input
        let sql = format!(
            "SELECT {COLUMNS} FROM posts ORDER BY {} ASC, id ASC LIMIT $1 OFFSET $2",
            request.sort.column()
        );
        let limit = i64::from(request.size);
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        let rows = client.query(sql.as_str(), &[&limit, &offset]).await?;
        let content = rows.iter().map(row_to_post).collect::<Result<Vec<_>, _>>()?;

        let total: i64 = client
            .query_one("SELECT COUNT(*) FROM posts", &[])
            .await?
            .try_get(0)?;

        Ok(Page::new(content, &request, total.max(0) as u64))
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let client = self.pool.get().await?;
        match post.id {
            None => {
                let sql = format!(
                    "INSERT INTO posts (title, description, content) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
                );
                let row = client
                    .query_one(sql.as_str(), &[&post.title, &post.description, &post.content])
                    .await?;
                Ok(row_to_post(&row)?)
            }
            Some(id) => {
                let sql = format!(
                    "UPDATE posts SET title = $1, description = $2, content = $3 WHERE id = $4 RETURNING {COLUMNS}"
                );
                let row = client
                    .query_opt(
                        sql.as_str(),
                        &[&post.title, &post.description, &post.content, &id],
                    )
                    .await?
                    .ok_or(RepoError::Missing(id))?;
                Ok(row_to_post(&row)?)
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        client.execute("DELETE FROM posts WHERE id = $1", &[&id]).await?;
        Ok(())
    }
}
