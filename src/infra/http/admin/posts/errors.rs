use axum::{
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};

use crate::{
    application::{admin::posts::AdminPostError, error::AppError, error::HttpError},
    infra::http::repo_error_to_http,
};

pub(super) fn admin_post_error(source: &'static str, err: AdminPostError) -> Response {
    match err {
        AdminPostError::Precondition(err) => AppError::from(err).into_response(),
        AdminPostError::Session(err) => {
            let mut response = HttpError::from_error(
                source,
                StatusCode::UNAUTHORIZED,
                "Authentication required",
                &err,
            )
            .into_response();
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
            response
        }
        AdminPostError::Repo(err) => repo_error_to_http(source, err).into_response(),
    }
}
