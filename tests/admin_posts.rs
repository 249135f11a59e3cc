use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Method, Request, StatusCode,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION},
    },
    response::Response,
};
use insta::assert_json_snapshot;
use postdesk::{
    application::{admin::posts::AdminPostService, repos::PostsRepo},
    config::SessionUser,
    domain::posts::Post,
    infra::{
        http::{AdminState, REQUEST_ID_HEADER, build_admin_router},
        memory::InMemoryPosts,
        session::TokenSessionGuard,
    },
};
use tower::ServiceExt;

const TOKEN: &str = "letmein";
const COOKIE_NAME: &str = "__session";

struct Harness {
    router: Router,
    repo: Arc<InMemoryPosts>,
}

impl Harness {
    fn new(posts: Vec<Post>) -> Self {
        let repo = Arc::new(InMemoryPosts::with_posts(posts));
        let dyn_repo: Arc<dyn PostsRepo> = repo.clone();
        let session = Arc::new(TokenSessionGuard::new(vec![SessionUser {
            id: "alice".into(),
            token_sha256: TokenSessionGuard::hash_token(TOKEN),
        }]));
        let state = AdminState {
            posts: Arc::new(AdminPostService::new(dyn_repo.clone(), session)),
            repo: dyn_repo,
            session_cookie: Arc::from(COOKIE_NAME),
        };

        Self {
            router: build_admin_router(state),
            repo,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router should respond")
    }

    async fn stored(&self, slug: &str) -> Option<Post> {
        self.repo
            .find_by_slug(slug)
            .await
            .expect("in-memory lookup succeeds")
    }
}

fn post(slug: &str, title: &str) -> Post {
    Post {
        slug: slug.to_string(),
        title: title.to_string(),
        markdown: format!("# {title}"),
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

fn form(uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    form(uri)
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

#[tokio::test]
async fn list_links_every_post_to_its_editor() {
    let harness = Harness::new(vec![post("hello", "Hello"), post("second", "Second")]);

    let response = harness.send(get("/posts/admin")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"href="/posts/admin/hello""#));
    assert!(html.contains(r#"href="/posts/admin/second""#));
    assert!(html.find("Hello") < html.find("Second"));
}

#[tokio::test]
async fn editor_prefills_stored_post() {
    let harness = Harness::new(vec![post("hello", "Hello")]);

    let response = harness.send(get("/posts/admin/hello")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"name="title" value="Hello""#));
    assert!(html.contains(r#"name="slug" value="hello""#));
    assert!(html.contains("Delete Post"));
    assert!(html.contains("Edit Post"));
}

#[tokio::test]
async fn editor_for_unknown_slug_renders_blank_form() {
    let harness = Harness::new(Vec::new());

    let response = harness.send(get("/posts/admin/ghost")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"name="title" value="""#));
    assert!(html.contains(r#"name="slug" value="""#));
}

#[tokio::test]
async fn creator_close_redirects_without_session() {
    let harness = Harness::new(Vec::new());

    let response = harness
        .send(post_form("/posts/admin/new", "_action=close"))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/posts/admin"));
    assert!(harness.repo.list_posts().await.expect("list").is_empty());
}

#[tokio::test]
async fn create_without_session_is_unauthorized() {
    let harness = Harness::new(Vec::new());

    let response = harness
        .send(post_form(
            "/posts/admin/new",
            "_action=create&title=Hello&slug=hello&markdown=%23+Hello",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(harness.stored("hello").await.is_none());
}

#[tokio::test]
async fn create_with_wrong_token_is_unauthorized_before_validation() {
    let harness = Harness::new(Vec::new());

    let request = form("/posts/admin/new")
        .header(AUTHORIZATION, "Bearer nope")
        .header(ACCEPT, "application/json")
        .body(Body::from("_action=create"))
        .expect("request should build");
    let response = harness.send(request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_with_bearer_token_persists_and_redirects() {
    let harness = Harness::new(vec![post("first", "First")]);

    let request = form("/posts/admin/new")
        .header(AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::from(
            "_action=create&title=Hello&slug=hello&markdown=%23+Hello",
        ))
        .expect("request should build");
    let response = harness.send(request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/posts/admin"));
    assert_eq!(harness.stored("hello").await, Some(post("hello", "Hello")));

    let slugs: Vec<String> = harness
        .repo
        .list_posts()
        .await
        .expect("list")
        .into_iter()
        .map(|post| post.slug)
        .collect();
    assert_eq!(slugs, ["first", "hello"]);
}

#[tokio::test]
async fn create_accepts_session_cookie() {
    let harness = Harness::new(Vec::new());

    let request = form("/posts/admin/new")
        .header(COOKIE, format!("{COOKIE_NAME}={TOKEN}"))
        .body(Body::from("title=Hello&slug=hello&markdown=body"))
        .expect("request should build");
    let response = harness.send(request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(harness.stored("hello").await.is_some());
}

#[tokio::test]
async fn create_with_missing_fields_reports_json_errors() {
    let harness = Harness::new(Vec::new());

    let request = form("/posts/admin/new")
        .header(AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(ACCEPT, "application/json")
        .body(Body::from("_action=create&title=Hello&slug="))
        .expect("request should build");
    let response = harness.send(request).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("json body");
    assert_json_snapshot!(body, @r#"
    {
      "markdown": "Markdown is required",
      "slug": "Slug is required",
      "title": null
    }
    "#);
    assert!(harness.repo.list_posts().await.expect("list").is_empty());
}

#[tokio::test]
async fn create_with_missing_fields_rerenders_form() {
    let harness = Harness::new(Vec::new());

    let request = form("/posts/admin/new")
        .header(AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::from("_action=create&slug=kept"))
        .expect("request should build");
    let response = harness.send(request).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Title is required"));
    assert!(html.contains("Markdown is required"));
    assert!(!html.contains("Slug is required"));
    assert!(html.contains(r#"name="slug" value="kept""#));
}

#[tokio::test]
async fn create_with_taken_slug_conflicts() {
    let harness = Harness::new(vec![post("hello", "Hello")]);

    let request = form("/posts/admin/new")
        .header(AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::from("_action=create&title=Again&slug=hello&markdown=x"))
        .expect("request should build");
    let response = harness.send(request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(harness.stored("hello").await, Some(post("hello", "Hello")));
}

#[tokio::test]
async fn delete_bypasses_validation() {
    let harness = Harness::new(vec![post("hello", "Hello")]);

    let response = harness
        .send(post_form("/posts/admin/hello", "_action=delete"))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/posts/admin"));
    assert!(harness.stored("hello").await.is_none());
}

#[tokio::test]
async fn delete_targets_the_url_slug_not_the_form_slug() {
    let harness = Harness::new(vec![post("hello", "Hello"), post("other", "Other")]);

    let response = harness
        .send(post_form("/posts/admin/hello", "_action=delete&slug=other"))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(harness.stored("hello").await.is_none());
    assert!(harness.stored("other").await.is_some());
}

#[tokio::test]
async fn edit_with_new_slug_relocates_post() {
    let harness = Harness::new(vec![post("hello", "Hello")]);

    let response = harness
        .send(post_form(
            "/posts/admin/hello",
            "_action=edit&title=Renamed&slug=renamed&markdown=body",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(harness.stored("hello").await.is_none());
    let renamed = harness.stored("renamed").await.expect("renamed post");
    assert_eq!(renamed.title, "Renamed");
    assert_eq!(renamed.markdown, "body");
}

#[tokio::test]
async fn unknown_editor_action_is_an_edit() {
    let harness = Harness::new(vec![post("hello", "Hello")]);

    let response = harness
        .send(post_form(
            "/posts/admin/hello",
            "_action=update&title=Changed&slug=hello&markdown=body",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let stored = harness.stored("hello").await.expect("post kept");
    assert_eq!(stored.title, "Changed");
}

#[tokio::test]
async fn edit_with_blank_fields_leaves_post_untouched() {
    let harness = Harness::new(vec![post("hello", "Hello")]);

    let request = form("/posts/admin/hello")
        .header(ACCEPT, "application/json")
        .body(Body::from("_action=edit&title=&slug=hello&markdown="))
        .expect("request should build");
    let response = harness.send(request).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("json body");
    assert_eq!(body["title"], "Title is required");
    assert_eq!(body["slug"], serde_json::Value::Null);
    assert_eq!(body["markdown"], "Markdown is required");
    assert_eq!(harness.stored("hello").await, Some(post("hello", "Hello")));
}

#[tokio::test]
async fn edit_of_missing_post_is_not_found() {
    let harness = Harness::new(Vec::new());

    let response = harness
        .send(post_form(
            "/posts/admin/ghost",
            "_action=edit&title=T&slug=ghost&markdown=m",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pending_delete_hides_post_from_list() {
    let harness = Harness::new(vec![post("hello", "Hello"), post("other", "Other")]);

    let response = harness
        .send(post_form("/_pending/posts", "_action=delete&slug=hello"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(!html.contains(r#"href="/posts/admin/hello""#));
    assert!(html.contains(r#"href="/posts/admin/other""#));
    assert!(html.contains(r#"data-pending-action="delete""#));
    assert!(harness.stored("hello").await.is_some());
}

#[tokio::test]
async fn pending_create_appends_to_list() {
    let harness = Harness::new(vec![post("hello", "Hello")]);

    let response = harness
        .send(post_form(
            "/_pending/posts",
            "_action=create&title=Draft&slug=draft&markdown=x",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    let hello = html.find(r#"href="/posts/admin/hello""#).expect("hello");
    let draft = html.find(r#"href="/posts/admin/draft""#).expect("draft");
    assert!(hello < draft);
    assert!(harness.stored("draft").await.is_none());
}

#[tokio::test]
async fn pending_edit_shows_new_title() {
    let harness = Harness::new(vec![post("hello", "Hello")]);

    let response = harness
        .send(post_form(
            "/_pending/posts",
            "_action=edit&title=Retitled&slug=hello&markdown=x",
        ))
        .await;

    let html = body_text(response).await;
    assert!(html.contains("Retitled"));
    assert!(!html.contains(">Hello<"));
}

#[tokio::test]
async fn health_reports_reachable_repository() {
    let harness = Harness::new(Vec::new());

    let response = harness.send(get("/_health/db")).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn whitespace_fields_are_accepted_verbatim() {
    let harness = Harness::new(Vec::new());

    let request = form("/posts/admin/new")
        .header(AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(ACCEPT, "application/json")
        .body(Body::from("_action=create&title=+&slug=spaced&markdown=+"))
        .expect("request should build");
    let response = harness.send(request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let stored = harness.stored("spaced").await.expect("post stored");
    assert_eq!(stored.title, " ");
    assert_eq!(stored.markdown, " ");
}

#[tokio::test]
async fn editor_form_for_reserved_characters_targets_its_own_post() {
    let harness = Harness::new(vec![post("a", "A"), post("a?b", "Question")]);

    let response = harness.send(get("/posts/admin/a%3Fb")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"action="/posts/admin/a%3Fb""#));
    assert!(html.contains(r#"name="title" value="Question""#));

    let list = body_text(harness.send(get("/posts/admin")).await).await;
    assert!(list.contains(r#"href="/posts/admin/a%3Fb""#));

    let response = harness
        .send(post_form(
            "/posts/admin/a%3Fb",
            "_action=edit&title=Renamed&slug=a%3Fb&markdown=x",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(harness.stored("a").await, Some(post("a", "A")));
    let edited = harness.stored("a?b").await.expect("edited post");
    assert_eq!(edited.title, "Renamed");
}

#[tokio::test]
async fn post_named_like_the_pending_endpoint_is_still_editable() {
    let harness = Harness::new(vec![post("_pending", "Pending")]);

    let response = harness.send(get("/posts/admin/_pending")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"name="title" value="Pending""#));

    let response = harness
        .send(post_form("/posts/admin/_pending", "_action=delete"))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(harness.stored("_pending").await.is_none());
}

#[tokio::test]
async fn pending_editor_submission_locks_its_buttons() {
    let harness = Harness::new(vec![post("hello", "Hello")]);

    let response = harness
        .send(post_form(
            "/_pending/posts?form=editor",
            "_action=delete&slug=hello",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"id="form-actions""#));
    assert!(html.contains(">Deleting...</button>"));
    assert!(html.contains(">Edit Post</button>"));
    assert_eq!(html.matches(" disabled>").count(), 2);
}

#[tokio::test]
async fn pending_creator_submission_shows_creating() {
    let harness = Harness::new(Vec::new());

    let response = harness
        .send(post_form(
            "/_pending/posts?form=creator",
            "_action=create&title=Draft&slug=draft&markdown=x",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(">Creating...</button>"));
    assert_eq!(html.matches(" disabled>").count(), 2);
    assert!(html.contains(r#"href="/posts/admin/draft""#));
}

#[tokio::test]
async fn pending_fragment_without_form_omits_buttons() {
    let harness = Harness::new(vec![post("hello", "Hello")]);

    let response = harness
        .send(post_form("/_pending/posts", "_action=close"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"href="/posts/admin/hello""#));
    assert!(!html.contains("form-actions"));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let harness = Harness::new(Vec::new());

    let ok = harness.send(get("/posts/admin")).await;
    assert!(ok.headers().contains_key(&REQUEST_ID_HEADER));

    let rejected = harness
        .send(post_form("/posts/admin/new", "_action=create"))
        .await;
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
    assert!(rejected.headers().contains_key(&REQUEST_ID_HEADER));
}
