//! Turning askama templates into HTTP responses.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    application::error::{ErrorReport, HttpError},
    domain::posts::PostFieldErrors,
};

/// Render `template` as an HTML response with `status`.
///
/// A render failure becomes a 500 whose report names `source`.
pub fn render_html<T: Template>(source: &'static str, template: &T, status: StatusCode) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Page could not be rendered",
            &err,
        )
        .into_response(),
    }
}

/// Render a post form that failed validation as a 422 naming the failing fields.
pub fn render_rejected<T: Template>(
    source: &'static str,
    template: &T,
    errors: &PostFieldErrors,
) -> Response {
    let mut response = render_html(source, template, StatusCode::UNPROCESSABLE_ENTITY);
    if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
        ErrorReport::invalid_submission(source, errors).attach(&mut response);
    }
    response
}
