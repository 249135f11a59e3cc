mod read;
mod types;
mod write;

use async_trait::async_trait;

use crate::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};
use crate::domain::posts::Post;

use super::{PostgresRepositories, map_sqlx_error};

const POST_COLUMNS: &str = "slug, title, markdown";

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        self.select_posts().await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        self.select_post(slug).await
    }

    async fn create_post(&self, params: CreatePostParams) -> Result<Post, RepoError> {
        self.insert_post(params).await
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<Post, RepoError> {
        self.replace_post(params).await
    }

    async fn delete_post(&self, slug: &str) -> Result<(), RepoError> {
        self.remove_post(slug).await
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        self.ping().await.map_err(map_sqlx_error)
    }
}
