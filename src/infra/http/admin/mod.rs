mod health;
mod posts;
mod state;

pub use state::AdminState;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/posts/admin", get(posts::admin_posts))
        .route("/_pending/posts", post(posts::admin_posts_pending))
        .route(
            "/posts/admin/new",
            get(posts::admin_post_new).post(posts::admin_post_create),
        )
        .route(
            "/posts/admin/{slug}",
            get(posts::admin_post_edit).post(posts::admin_post_update),
        )
        .route("/_health/db", get(health::admin_health))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}
