//! The post entity and the field checks applied when a form is submitted.
//!
//! Posts are only validated at submission time. Once persisted, the
//! repository is trusted to keep slugs unique.

use serde::{Deserialize, Serialize};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const SLUG_REQUIRED: &str = "Slug is required";
pub const MARKDOWN_REQUIRED: &str = "Markdown is required";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub markdown: String,
}

/// Fields as they arrive from a form body. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFields {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub markdown: Option<String>,
}

/// Per-field validation messages; `None` marks a field that passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PostFieldErrors {
    pub title: Option<&'static str>,
    pub slug: Option<&'static str>,
    pub markdown: Option<&'static str>,
}

impl PostFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.slug.is_none() && self.markdown.is_none()
    }

    /// Names of the fields that failed, in form order.
    pub fn failed_fields(&self) -> Vec<&'static str> {
        [
            ("title", self.title),
            ("slug", self.slug),
            ("markdown", self.markdown),
        ]
        .into_iter()
        .filter_map(|(name, message)| message.map(|_| name))
        .collect()
    }
}

impl PostFields {
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        markdown: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            slug: Some(slug.into()),
            markdown: Some(markdown.into()),
        }
    }

    /// Turn submitted fields into a post, or report every field that is absent or empty.
    pub fn validate(self) -> Result<Post, PostFieldErrors> {
        let title = present(self.title);
        let slug = present(self.slug);
        let markdown = present(self.markdown);

        match (title, slug, markdown) {
            (Some(title), Some(slug), Some(markdown)) => Ok(Post {
                slug,
                title,
                markdown,
            }),
            (title, slug, markdown) => Err(PostFieldErrors {
                title: title.is_none().then_some(TITLE_REQUIRED),
                slug: slug.is_none().then_some(SLUG_REQUIRED),
                markdown: markdown.is_none().then_some(MARKDOWN_REQUIRED),
            }),
        }
    }

    /// Build a post without validation, substituting empty strings for absent fields.
    pub fn to_post_lossy(&self) -> Post {
        Post {
            slug: self.slug.clone().unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            markdown: self.markdown.clone().unwrap_or_default(),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
