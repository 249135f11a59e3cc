use axum::{
    extract::{Form, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::{
    application::{
        admin::posts::{CreatorAction, EditorAction, SubmissionOutcome},
        optimistic::PendingSubmission,
    },
    domain::posts::{PostFieldErrors, PostFields},
    infra::http::admin::AdminState,
    presentation::{
        admin::views::{
            ADMIN_TITLE, AdminLayout, AdminPostCreatorPage, AdminPostCreatorView,
            AdminPostEditTemplate, AdminPostEditorPage, AdminPostEditorView, AdminPostListView,
            AdminPostNewTemplate, AdminPostsPendingTemplate, AdminPostsTemplate, CreatorControls,
            EditorControls,
        },
        views::{render_html, render_rejected},
    },
};

use super::{
    errors::admin_post_error,
    forms::{AdminPostForm, PendingForm, PendingQuery},
    response::{credentials_from, load_list_view, validation_json, wants_json},
};

pub(crate) async fn admin_posts(State(state): State<AdminState>) -> Response {
    const SOURCE: &str = "infra::http::admin_posts";

    let list = match load_list_view(&state, SOURCE).await {
        Ok(list) => list,
        Err(response) => return response,
    };

    render_html(
        SOURCE,
        &AdminPostsTemplate {
            view: AdminLayout::new(ADMIN_TITLE, list),
        },
        StatusCode::OK,
    )
}

/// The list panel as it will look once the submitted form has been processed,
/// followed by the submitting form's buttons in their pending state.
pub(crate) async fn admin_posts_pending(
    State(state): State<AdminState>,
    Query(query): Query<PendingQuery>,
    Form(form): Form<AdminPostForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_posts_pending";

    let (action, fields) = form.into_parts();
    let pending = PendingSubmission::from_form(action.as_deref(), fields);

    let posts = match state.posts.list_projected(Some(&pending)).await {
        Ok(posts) => posts,
        Err(err) => return admin_post_error(SOURCE, err),
    };

    let in_flight = Some(pending.action);
    let template = AdminPostsPendingTemplate {
        list: AdminPostListView::projected(posts, pending.action),
        editor_controls: (query.form == Some(PendingForm::Editor))
            .then(|| EditorControls::from_pending(in_flight)),
        creator_controls: (query.form == Some(PendingForm::Creator))
            .then(|| CreatorControls::from_pending(in_flight)),
    };

    render_html(SOURCE, &template, StatusCode::OK)
}

pub(crate) async fn admin_post_new(State(state): State<AdminState>) -> Response {
    const SOURCE: &str = "infra::http::admin_post_new";

    let list = match load_list_view(&state, SOURCE).await {
        Ok(list) => list,
        Err(response) => return response,
    };

    render_html(
        SOURCE,
        &creator_page(list, AdminPostCreatorView::blank()),
        StatusCode::OK,
    )
}

pub(crate) async fn admin_post_create(
    State(state): State<AdminState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<AdminPostForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_post_create";

    let cookie = jar
        .get(&state.session_cookie)
        .map(|cookie| cookie.value().to_string());
    let credentials = credentials_from(&headers, cookie);

    let (action, fields) = form.into_parts();
    let submitted = fields.clone();
    let outcome = match state
        .posts
        .submit_creator(&credentials, CreatorAction::from_form(action.as_deref(), fields))
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => return admin_post_error(SOURCE, err),
    };

    let errors = match outcome {
        SubmissionOutcome::Redirect(path) => return Redirect::to(path).into_response(),
        SubmissionOutcome::Invalid(errors) => errors,
    };
    if wants_json(&headers) {
        return validation_json(SOURCE, &errors);
    }

    let list = match load_list_view(&state, SOURCE).await {
        Ok(list) => list,
        Err(response) => return response,
    };
    render_rejected(
        SOURCE,
        &creator_page(list, AdminPostCreatorView::resubmitted(submitted, errors)),
        &errors,
    )
}

pub(crate) async fn admin_post_edit(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_post_edit";

    let loaded = match state.posts.load_editor(Some(slug.as_str())).await {
        Ok(loaded) => loaded,
        Err(err) => return admin_post_error(SOURCE, err),
    };
    if loaded.post.is_none() {
        debug!(
            target = "postdesk::http::admin::posts",
            slug = %loaded.slug,
            "no post stored under slug, rendering blank editor"
        );
    }

    let list = match load_list_view(&state, SOURCE).await {
        Ok(list) => list,
        Err(response) => return response,
    };

    render_html(
        SOURCE,
        &editor_page(list, AdminPostEditorView::for_post(&loaded.slug, loaded.post)),
        StatusCode::OK,
    )
}

pub(crate) async fn admin_post_update(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Form(form): Form<AdminPostForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_post_update";

    let (action, fields) = form.into_parts();
    if let Some(other) = action
        .as_deref()
        .filter(|value| !matches!(*value, "edit" | "delete"))
    {
        debug!(
            target = "postdesk::http::admin::posts",
            slug = %slug,
            action = other,
            "unrecognised editor action, treating as edit"
        );
    }

    let submitted = fields.clone();
    let outcome = match state
        .posts
        .submit_editor(
            Some(slug.as_str()),
            EditorAction::from_form(action.as_deref(), fields),
        )
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => return admin_post_error(SOURCE, err),
    };

    let errors = match outcome {
        SubmissionOutcome::Redirect(path) => return Redirect::to(path).into_response(),
        SubmissionOutcome::Invalid(errors) => errors,
    };
    if wants_json(&headers) {
        return validation_json(SOURCE, &errors);
    }

    invalid_editor(&state, &slug, submitted, errors, SOURCE).await
}

async fn invalid_editor(
    state: &AdminState,
    slug: &str,
    submitted: PostFields,
    errors: PostFieldErrors,
    source: &'static str,
) -> Response {
    let list = match load_list_view(state, source).await {
        Ok(list) => list,
        Err(response) => return response,
    };
    render_rejected(
        source,
        &editor_page(list, AdminPostEditorView::resubmitted(slug, submitted, errors)),
        &errors,
    )
}

fn editor_page(list: AdminPostListView, editor: AdminPostEditorView) -> AdminPostEditTemplate {
    AdminPostEditTemplate {
        view: AdminLayout::new(ADMIN_TITLE, AdminPostEditorPage { list, editor }),
    }
}

fn creator_page(list: AdminPostListView, creator: AdminPostCreatorView) -> AdminPostNewTemplate {
    AdminPostNewTemplate {
        view: AdminLayout::new(ADMIN_TITLE, AdminPostCreatorPage { list, creator }),
    }
}
