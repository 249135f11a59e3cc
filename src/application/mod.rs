//! Application services layer.

pub mod admin;
pub mod error;
pub mod optimistic;
pub mod repos;
pub mod session;
