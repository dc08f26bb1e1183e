use anyhow::Context;
use async_trait::async_trait;

use crate::comments::repo_types::Comment;
use crate::db::PgRepo;
use crate::error::StoreError;

#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<Comment>, StoreError>;
    async fn insert(&self, comment: &Comment) -> Result<(), StoreError>;
}

#[async_trait]
impl CommentRepo for PgRepo {
    async fn list(&self) -> Result<Vec<Comment>, StoreError> {
        let rows = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, username, content, date
            FROM comments
            ORDER BY date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("list comments")?;
        Ok(rows)
    }

    async fn insert(&self, comment: &Comment) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, username, content, date)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(comment.id)
        .bind(&comment.username)
        .bind(&comment.content)
        .bind(comment.date)
        .execute(&self.pool)
        .await
        .context("insert comment")?;
        Ok(())
    }
}
