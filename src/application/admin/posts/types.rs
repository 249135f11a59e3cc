use thiserror::Error;

use crate::{
    application::{repos::RepoError, session::SessionError},
    domain::{
        error::DomainError,
        posts::{Post, PostFieldErrors, PostFields},
    },
};

/// Where every successful or cancelled submission lands.
pub const ADMIN_INDEX_PATH: &str = "/posts/admin";

#[derive(Debug, Error)]
pub enum AdminPostError {
    #[error(transparent)]
    Precondition(#[from] DomainError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Editor submission, dispatched on the form's `_action` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    Delete,
    Edit(PostFields),
}

impl EditorAction {
    /// Anything other than `delete` is an edit, including a missing or unknown `_action`.
    pub fn from_form(action: Option<&str>, fields: PostFields) -> Self {
        match action {
            Some("delete") => Self::Delete,
            _ => Self::Edit(fields),
        }
    }
}

/// Creator submission, dispatched on the form's `_action` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatorAction {
    Close,
    Create(PostFields),
}

impl CreatorAction {
    /// Anything other than `close` is a creation attempt.
    pub fn from_form(action: Option<&str>, fields: PostFields) -> Self {
        match action {
            Some("close") => Self::Close,
            _ => Self::Create(fields),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Redirect(&'static str),
    Invalid(PostFieldErrors),
}

impl SubmissionOutcome {
    pub(crate) fn to_index() -> Self {
        Self::Redirect(ADMIN_INDEX_PATH)
    }
}

/// What the editor shows for a slug: the post, or blank fields when it does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorLoad {
    pub slug: String,
    pub post: Option<Post>,
}
