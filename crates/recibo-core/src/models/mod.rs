//! Data models: pipeline configuration and the advisory receipt schemas.

pub mod config;
pub mod receipt;
