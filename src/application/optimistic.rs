//! Optimistic projection of an in-flight submission onto the fetched post list.
//!
//! While a form submission is outstanding the client already knows what the
//! server is about to do, so the list view shows that predicted result instead
//! of the stale one. The projection is a pure function of the pending
//! submission and the list the repository returned.

use crate::domain::posts::{Post, PostFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Create,
    Edit,
    Delete,
    /// Any other `_action` value, including `close`. Projects to nothing.
    Other,
}

impl PendingAction {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("create") => Self::Create,
            Some("edit") => Self::Edit,
            Some("delete") => Self::Delete,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Other => "other",
        }
    }
}

/// A form submission that has been sent but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub action: PendingAction,
    pub fields: PostFields,
}

impl PendingSubmission {
    pub fn new(action: PendingAction, fields: PostFields) -> Self {
        Self { action, fields }
    }

    pub fn from_form(action: Option<&str>, fields: PostFields) -> Self {
        Self::new(PendingAction::parse(action), fields)
    }
}

/// Apply the predicted effect of `pending` to `posts`.
///
/// Matching is done on the pending form's `slug` field. When nothing matches,
/// the list is returned unchanged.
pub fn project_posts(pending: Option<&PendingSubmission>, posts: Vec<Post>) -> Vec<Post> {
    let Some(pending) = pending else {
        return posts;
    };

    let slug = pending.fields.slug.as_deref();
    match pending.action {
        PendingAction::Delete => posts
            .into_iter()
            .filter(|post| Some(post.slug.as_str()) != slug)
            .collect(),
        PendingAction::Edit => posts
            .into_iter()
            .map(|post| {
                if Some(post.slug.as_str()) == slug {
                    pending.fields.to_post_lossy()
                } else {
                    post
                }
            })
            .collect(),
        PendingAction::Create => {
            let mut posts = posts;
            posts.push(pending.fields.to_post_lossy());
            posts
        }
        PendingAction::Other => posts,
    }
}
