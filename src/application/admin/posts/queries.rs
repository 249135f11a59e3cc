use crate::application::optimistic::{PendingSubmission, project_posts};
use crate::domain::error::require_param;
use crate::domain::posts::Post;

use super::service::AdminPostService;
use super::types::{AdminPostError, EditorLoad};

impl AdminPostService {
    pub async fn list(&self) -> Result<Vec<Post>, AdminPostError> {
        self.repo.list_posts().await.map_err(AdminPostError::from)
    }

    /// The list as it will look once `pending` has been applied by the server.
    pub async fn list_projected(
        &self,
        pending: Option<&PendingSubmission>,
    ) -> Result<Vec<Post>, AdminPostError> {
        let posts = self.list().await?;
        Ok(project_posts(pending, posts))
    }

    pub async fn load_editor(&self, slug: Option<&str>) -> Result<EditorLoad, AdminPostError> {
        let slug = require_param(slug, "slug")?;
        let post = self.repo.find_by_slug(slug).await?;
        Ok(EditorLoad {
            slug: slug.to_string(),
            post,
        })
    }
}
