//! Infrastructure adapters: persistence, sessions, HTTP, telemetry.

pub mod db;
pub mod error;
pub mod http;
pub mod memory;
pub mod session;
pub mod telemetry;
