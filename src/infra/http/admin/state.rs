use std::sync::Arc;

use crate::application::{admin::posts::AdminPostService, repos::PostsRepo};

#[derive(Clone)]
pub struct AdminState {
    pub posts: Arc<AdminPostService>,
    pub repo: Arc<dyn PostsRepo>,
    /// Name of the cookie carrying the session token.
    pub session_cookie: Arc<str>,
}
