mod commands;
mod queries;
mod service;
pub mod types;

pub use service::*;
pub use types::{
    ADMIN_INDEX_PATH, AdminPostError, CreatorAction, EditorAction, EditorLoad,
    SubmissionOutcome,
};
