//! Response helpers shared by the post handlers.

use axum::{
    Json,
    http::{
        HeaderMap, StatusCode,
        header::{ACCEPT, AUTHORIZATION},
    },
    response::{IntoResponse, Response},
};

use crate::{
    application::{error::ErrorReport, session::SessionCredentials},
    domain::posts::PostFieldErrors,
    infra::http::admin::AdminState,
    presentation::admin::views::AdminPostListView,
};

use super::errors::admin_post_error;

pub(super) async fn load_list_view(
    state: &AdminState,
    source: &'static str,
) -> Result<AdminPostListView, Response> {
    state
        .posts
        .list()
        .await
        .map(AdminPostListView::new)
        .map_err(|err| admin_post_error(source, err))
}

pub(super) fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains("application/json"))
}

pub(super) fn validation_json(source: &'static str, errors: &PostFieldErrors) -> Response {
    let mut response = (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response();
    ErrorReport::invalid_submission(source, errors).attach(&mut response);
    response
}

pub(super) fn credentials_from(
    headers: &HeaderMap,
    cookie: Option<String>,
) -> SessionCredentials {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);

    SessionCredentials { bearer, cookie }
}
