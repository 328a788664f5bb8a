//! HTTP 处理器

pub mod auth;
pub mod docs;
pub mod exercises;
pub mod health;
pub mod users;
