//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::posts::Post;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub slug: String,
    pub title: String,
    pub markdown: String,
}

/// Replace the post currently stored under `current_slug`. `slug` may differ, which renames it.
#[derive(Debug, Clone)]
pub struct UpdatePostParams {
    pub current_slug: String,
    pub slug: String,
    pub title: String,
    pub markdown: String,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// All posts in the repository's natural order.
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    async fn create_post(&self, params: CreatePostParams) -> Result<Post, RepoError>;

    /// Fails with `NotFound` when `current_slug` does not exist and `Duplicate` when the new
    /// slug belongs to another post.
    async fn update_post(&self, params: UpdatePostParams) -> Result<Post, RepoError>;

    /// Deleting a slug that does not exist succeeds.
    async fn delete_post(&self, slug: &str) -> Result<(), RepoError>;

    async fn health_check(&self) -> Result<(), RepoError>;
}
