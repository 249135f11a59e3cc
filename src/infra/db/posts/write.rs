use crate::application::repos::{CreatePostParams, RepoError, UpdatePostParams};
use crate::domain::posts::Post;

use super::super::{PostgresRepositories, map_sqlx_error};
use super::POST_COLUMNS;
use super::types::PostRow;

impl PostgresRepositories {
    pub(crate) async fn insert_post(&self, params: CreatePostParams) -> Result<Post, RepoError> {
        let CreatePostParams {
            slug,
            title,
            markdown,
        } = params;

        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts (slug, title, markdown)
            VALUES ($1, $2, $3)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(slug)
        .bind(title)
        .bind(markdown)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(Post::from(row))
    }

    pub(crate) async fn replace_post(&self, params: UpdatePostParams) -> Result<Post, RepoError> {
        let UpdatePostParams {
            current_slug,
            slug,
            title,
            markdown,
        } = params;

        // An unknown current slug surfaces as RowNotFound, i.e. RepoError::NotFound.
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            UPDATE posts
            SET slug = $2, title = $3, markdown = $4, updated_at = now()
            WHERE slug = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(current_slug)
        .bind(slug)
        .bind(title)
        .bind(markdown)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(Post::from(row))
    }

    pub(crate) async fn remove_post(&self, slug: &str) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM posts WHERE slug = $1")
            .bind(slug)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
