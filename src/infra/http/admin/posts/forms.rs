use serde::Deserialize;

use crate::domain::posts::PostFields;

/// Body shared by the editor, creator and pending-list forms.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AdminPostForm {
    #[serde(rename = "_action")]
    pub(crate) action: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) markdown: Option<String>,
}

impl AdminPostForm {
    pub(crate) fn into_parts(self) -> (Option<String>, PostFields) {
        let fields = PostFields {
            title: self.title,
            slug: self.slug,
            markdown: self.markdown,
        };
        (self.action, fields)
    }
}

/// Which form is asking for the pending fragment, so its buttons can be rendered too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PendingForm {
    Editor,
    Creator,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PendingQuery {
    pub(crate) form: Option<PendingForm>,
}
