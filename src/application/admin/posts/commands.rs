use metrics::counter;
use tracing::{debug, info};

use crate::application::repos::{CreatePostParams, UpdatePostParams};
use crate::application::session::SessionCredentials;
use crate::domain::error::require_param;

use super::service::AdminPostService;
use super::types::{AdminPostError, CreatorAction, EditorAction, SubmissionOutcome};

impl AdminPostService {
    /// Handle a submission of the editor form for the post stored under `slug`.
    ///
    /// `delete` skips field validation. Every other action validates the
    /// fields and updates the post, which may rename it.
    pub async fn submit_editor(
        &self,
        slug: Option<&str>,
        action: EditorAction,
    ) -> Result<SubmissionOutcome, AdminPostError> {
        let slug = require_param(slug, "slug")?;
        self.simulate_latency().await;

        match action {
            EditorAction::Delete => {
                self.repo.delete_post(slug).await?;
                counter!("postdesk_posts_deleted_total").increment(1);
                info!(target = "postdesk::admin::posts", slug, "post deleted");
                Ok(SubmissionOutcome::to_index())
            }
            EditorAction::Edit(fields) => {
                let post = match fields.validate() {
                    Ok(post) => post,
                    Err(errors) => {
                        counter!("postdesk_post_validation_failures_total", "operation" => "update")
                            .increment(1);
                        debug!(
                            target = "postdesk::admin::posts",
                            slug,
                            fields = ?errors.failed_fields(),
                            "post update rejected"
                        );
                        return Ok(SubmissionOutcome::Invalid(errors));
                    }
                };

                let updated = self
                    .repo
                    .update_post(UpdatePostParams {
                        current_slug: slug.to_string(),
                        slug: post.slug,
                        title: post.title,
                        markdown: post.markdown,
                    })
                    .await?;
                counter!("postdesk_posts_updated_total").increment(1);
                info!(
                    target = "postdesk::admin::posts",
                    previous_slug = slug,
                    slug = %updated.slug,
                    "post updated"
                );
                Ok(SubmissionOutcome::to_index())
            }
        }
    }

    /// Handle a submission of the creator form.
    ///
    /// `close` returns to the index without touching the session. Creation
    /// requires an authenticated user before any field is looked at.
    pub async fn submit_creator(
        &self,
        credentials: &SessionCredentials,
        action: CreatorAction,
    ) -> Result<SubmissionOutcome, AdminPostError> {
        let fields = match action {
            CreatorAction::Close => return Ok(SubmissionOutcome::to_index()),
            CreatorAction::Create(fields) => fields,
        };

        let user = match self.session.require_user_id(credentials).await {
            Ok(user) => user,
            Err(err) => {
                counter!("postdesk_session_rejections_total").increment(1);
                return Err(err.into());
            }
        };

        let post = match fields.validate() {
            Ok(post) => post,
            Err(errors) => {
                counter!("postdesk_post_validation_failures_total", "operation" => "create")
                    .increment(1);
                debug!(
                    target = "postdesk::admin::posts",
                    actor = %user,
                    fields = ?errors.failed_fields(),
                    "post creation rejected"
                );
                return Ok(SubmissionOutcome::Invalid(errors));
            }
        };

        let created = self
            .repo
            .create_post(CreatePostParams {
                slug: post.slug,
                title: post.title,
                markdown: post.markdown,
            })
            .await?;
        counter!("postdesk_posts_created_total").increment(1);
        info!(
            target = "postdesk::admin::posts",
            actor = %user,
            slug = %created.slug,
            "post created"
        );
        Ok(SubmissionOutcome::to_index())
    }
}
