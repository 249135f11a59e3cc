use crate::application::repos::RepoError;
use crate::domain::posts::Post;

use super::super::{PostgresRepositories, map_sqlx_error};
use super::POST_COLUMNS;
use super::types::PostRow;

impl PostgresRepositories {
    pub(crate) async fn select_posts(&self) -> Result<Vec<Post>, RepoError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at ASC, slug ASC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    pub(crate) async fn select_post(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Post::from))
    }
}
