//! Process-local post storage, used when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};
use crate::domain::posts::Post;

const SLUG_CONSTRAINT: &str = "posts_pkey";

/// Posts kept in insertion order. Renaming a post keeps its position.
#[derive(Debug, Default)]
pub struct InMemoryPosts {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPosts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }
}

fn duplicate() -> RepoError {
    RepoError::Duplicate {
        constraint: SLUG_CONSTRAINT.to_string(),
    }
}

#[async_trait]
impl PostsRepo for InMemoryPosts {
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.slug == slug).cloned())
    }

    async fn create_post(&self, params: CreatePostParams) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|post| post.slug == params.slug) {
            return Err(duplicate());
        }

        let post = Post {
            slug: params.slug,
            title: params.title,
            markdown: params.markdown,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|post| post.slug == params.current_slug)
            .ok_or(RepoError::NotFound)?;

        let collides = posts
            .iter()
            .enumerate()
            .any(|(other, post)| other != index && post.slug == params.slug);
        if collides {
            return Err(duplicate());
        }

        let post = Post {
            slug: params.slug,
            title: params.title,
            markdown: params.markdown,
        };
        posts[index] = post.clone();
        Ok(post)
    }

    async fn delete_post(&self, slug: &str) -> Result<(), RepoError> {
        self.posts.write().await.retain(|post| post.slug != slug);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(slug: &str) -> CreatePostParams {
        CreatePostParams {
            slug: slug.into(),
            title: slug.to_uppercase(),
            markdown: String::new(),
        }
    }

    #[tokio::test]
    async fn preserves_insertion_order() {
        let repo = InMemoryPosts::new();
        for slug in ["b", "a", "c"] {
            repo.create_post(params(slug)).await.unwrap();
        }

        let slugs: Vec<_> = repo
            .list_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|post| post.slug)
            .collect();
        assert_eq!(slugs, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn rejects_duplicate_slugs() {
        let repo = InMemoryPosts::new();
        repo.create_post(params("a")).await.unwrap();
        repo.create_post(params("b")).await.unwrap();

        assert!(matches!(
            repo.create_post(params("a")).await,
            Err(RepoError::Duplicate { .. })
        ));

        let rename_onto_existing = UpdatePostParams {
            current_slug: "b".into(),
            slug: "a".into(),
            title: "B".into(),
            markdown: String::new(),
        };
        assert!(matches!(
            repo.update_post(rename_onto_existing).await,
            Err(RepoError::Duplicate { .. })
        ));
    }

    #[tokio::test]
    async fn rename_keeps_position() {
        let repo = InMemoryPosts::new();
        for slug in ["a", "b", "c"] {
            repo.create_post(params(slug)).await.unwrap();
        }

        repo.update_post(UpdatePostParams {
            current_slug: "b".into(),
            slug: "bee".into(),
            title: "Bee".into(),
            markdown: "buzz".into(),
        })
        .await
        .unwrap();

        let posts = repo.list_posts().await.unwrap();
        assert_eq!(posts[1].slug, "bee");
        assert!(repo.find_by_slug("b").await.unwrap().is_none());
    }
}
