//! Blog administration service: post listing, editing and optimistic list projection.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
