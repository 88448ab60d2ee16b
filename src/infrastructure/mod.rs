//! Infrastructure layer - storage, credentials, sessions and observability

pub mod admin;
pub mod auth;
pub mod logging;
pub mod observability;
pub mod storage;
pub mod team;
