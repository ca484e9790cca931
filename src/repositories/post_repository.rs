use async_trait::async_trait;
use deadpool_postgres::Pool;
use thiserror::Error;
use tokio_postgres::Row;

use crate::models::post::Post;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("sql error: {0}")]
    Sql(#[from] tokio_postgres::Error),
}

/// Storage contract for posts. The store owns id assignment and all post
/// state; callers never cache rows between requests.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Inserts a new post and returns the store-assigned id.
    async fn insert(&self, title: &str, content: &str) -> Result<i64, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, StoreError>;

    /// Range scan in descending-id order, newest posts first.
    async fn scan_desc(&self, limit: i64, offset: i64) -> Result<Vec<Post>, StoreError>;

    /// Overwrites the row matching `post.id`. Returns false when the row no
    /// longer exists.
    async fn update(&self, post: &Post) -> Result<bool, StoreError>;

    /// Returns false when there was no row to delete.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;

    /// Removes every post. Test teardown between scenarios.
    async fn clear(&self) -> Result<(), StoreError>;
}

pub struct PgPostRepository {
    pool: Pool,
}

fn row_to_post(row: &Row) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
    }
}

impl PgPostRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Creates the posts table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS posts (
                    id BIGSERIAL PRIMARY KEY,
                    title TEXT NOT NULL,
                    content TEXT NOT NULL
                )",
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn insert(&self, title: &str, content: &str) -> Result<i64, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO posts (title, content) VALUES ($1, $2) RETURNING id",
                &[&title, &content],
            )
            .await?;
        Ok(row.get(0))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt("SELECT id, title, content FROM posts WHERE id = $1", &[&id])
            .await?;
        Ok(row.as_ref().map(row_to_post))
    }

    async fn scan_desc(&self, limit: i64, offset: i64) -> Result<Vec<Post>, StoreError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT id, title, content FROM posts
                 ORDER BY id DESC LIMIT $1 OFFSET $2",
                &[&limit, &offset],
            )
            .await?;
        Ok(rows.iter().map(row_to_post).collect())
    }

    async fn update(&self, post: &Post) -> Result<bool, StoreError> {
        let client = self.pool.get().await?;
        let updated = client
            .execute(
                "UPDATE posts SET title = $1, content = $2 WHERE id = $3",
                &[&post.title, &post.content, &post.id],
            )
            .await?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute("DELETE FROM posts WHERE id = $1", &[&id])
            .await?;
        Ok(deleted > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let client = self.pool.get().await?;
        let row = client.query_one("SELECT COUNT(*) FROM posts", &[]).await?;
        Ok(row.get(0))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        client.execute("DELETE FROM posts", &[]).await?;
        Ok(())
    }
}
