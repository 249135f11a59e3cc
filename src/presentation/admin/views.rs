use askama::Template;

use crate::{
    application::optimistic::PendingAction,
    domain::posts::{Post, PostFieldErrors, PostFields},
};

pub const ADMIN_TITLE: &str = "Posts";
pub const NEW_POST_HREF: &str = "/posts/admin/new";
/// Kept outside `/posts/admin/` so that no slug can shadow it.
pub const PENDING_HREF: &str = "/_pending/posts";

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub title: String,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(title: impl Into<String>, content: T) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }
}

#[derive(Clone)]
pub struct AdminPostLinkView {
    pub slug: String,
    pub title: String,
    pub href: String,
}

impl From<Post> for AdminPostLinkView {
    fn from(post: Post) -> Self {
        Self {
            href: editor_href(&post.slug),
            slug: post.slug,
            title: post.title,
        }
    }
}

/// Editor URL for `slug`, encoded as a single path segment.
pub fn editor_href(slug: &str) -> String {
    format!("/posts/admin/{}", urlencoding::encode(slug))
}

#[derive(Clone)]
pub struct AdminPostListView {
    pub posts: Vec<AdminPostLinkView>,
    pub new_post_href: &'static str,
    pub pending_href: &'static str,
    /// Set when the list reflects a submission that is still in flight.
    pub pending_action: Option<&'static str>,
}

impl AdminPostListView {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: posts.into_iter().map(AdminPostLinkView::from).collect(),
            new_post_href: NEW_POST_HREF,
            pending_href: PENDING_HREF,
            pending_action: None,
        }
    }

    pub fn projected(posts: Vec<Post>, action: PendingAction) -> Self {
        Self {
            pending_action: Some(action.as_str()),
            ..Self::new(posts)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Button state for the editor form.
///
/// Both buttons are disabled while either submission is pending.
#[derive(Clone, Copy)]
pub struct EditorControls {
    pub is_deleting: bool,
    pub is_editing: bool,
}

impl EditorControls {
    pub fn from_pending(pending: Option<PendingAction>) -> Self {
        Self {
            is_deleting: pending == Some(PendingAction::Delete),
            is_editing: pending == Some(PendingAction::Edit),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.is_deleting || self.is_editing
    }

    pub fn delete_label(&self) -> &'static str {
        if self.is_deleting {
            "Deleting..."
        } else {
            "Delete Post"
        }
    }

    pub fn edit_label(&self) -> &'static str {
        if self.is_editing {
            "Editing..."
        } else {
            "Edit Post"
        }
    }
}

#[derive(Clone)]
pub struct AdminPostEditorView {
    pub action: String,
    pub title: String,
    pub slug: String,
    pub markdown: String,
    pub errors: PostFieldErrors,
    pub controls: EditorControls,
}

impl AdminPostEditorView {
    /// Editor populated from the stored post, or blank when it does not exist.
    pub fn for_post(slug: &str, post: Option<Post>) -> Self {
        let (title, slug_value, markdown) = match post {
            Some(post) => (post.title, post.slug, post.markdown),
            None => (String::new(), String::new(), String::new()),
        };

        Self {
            action: editor_href(slug),
            title,
            slug: slug_value,
            markdown,
            errors: PostFieldErrors::default(),
            controls: EditorControls::from_pending(None),
        }
    }

    /// Editor echoing a rejected submission along with its field errors.
    pub fn resubmitted(slug: &str, fields: PostFields, errors: PostFieldErrors) -> Self {
        Self {
            action: editor_href(slug),
            title: fields.title.unwrap_or_default(),
            slug: fields.slug.unwrap_or_default(),
            markdown: fields.markdown.unwrap_or_default(),
            errors,
            controls: EditorControls::from_pending(None),
        }
    }
}

/// Button state for the creator form.
///
/// Any in-flight submission of the form locks both of its buttons.
#[derive(Clone, Copy)]
pub struct CreatorControls {
    pub is_creating: bool,
}

impl CreatorControls {
    pub fn from_pending(pending: Option<PendingAction>) -> Self {
        Self {
            is_creating: pending.is_some(),
        }
    }

    pub fn create_label(&self) -> &'static str {
        if self.is_creating {
            "Creating..."
        } else {
            "Create Post"
        }
    }
}

#[derive(Clone)]
pub struct AdminPostCreatorView {
    pub action: &'static str,
    pub title: String,
    pub slug: String,
    pub markdown: String,
    pub errors: PostFieldErrors,
    pub controls: CreatorControls,
}

impl AdminPostCreatorView {
    pub fn blank() -> Self {
        Self::resubmitted(PostFields::default(), PostFieldErrors::default())
    }

    pub fn resubmitted(fields: PostFields, errors: PostFieldErrors) -> Self {
        Self {
            action: NEW_POST_HREF,
            title: fields.title.unwrap_or_default(),
            slug: fields.slug.unwrap_or_default(),
            markdown: fields.markdown.unwrap_or_default(),
            errors,
            controls: CreatorControls::from_pending(None),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/posts.html")]
pub struct AdminPostsTemplate {
    pub view: AdminLayout<AdminPostListView>,
}

/// Fragment returned while a form submission is in flight: the projected list,
/// plus the submitting form's buttons in their pending state.
#[derive(Template)]
#[template(path = "admin/posts_pending.html")]
pub struct AdminPostsPendingTemplate {
    pub list: AdminPostListView,
    pub editor_controls: Option<EditorControls>,
    pub creator_controls: Option<CreatorControls>,
}

#[derive(Clone)]
pub struct AdminPostEditorPage {
    pub list: AdminPostListView,
    pub editor: AdminPostEditorView,
}

#[derive(Template)]
#[template(path = "admin/post_edit.html")]
pub struct AdminPostEditTemplate {
    pub view: AdminLayout<AdminPostEditorPage>,
}

#[derive(Clone)]
pub struct AdminPostCreatorPage {
    pub list: AdminPostListView,
    pub creator: AdminPostCreatorView,
}

#[derive(Template)]
#[template(path = "admin/post_new.html")]
pub struct AdminPostNewTemplate {
    pub view: AdminLayout<AdminPostCreatorPage>,
}
