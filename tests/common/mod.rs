//! Common test utilities and helpers
//!
//! - **`app`** - `TestApp`: the full router over an in-memory database
//! - **`auth_helpers`** - creating users and admins through the API
//! - **`database`** - PostgreSQL connection and record fixtures

#![allow(dead_code)]

pub mod app;
pub mod auth_helpers;
pub mod database;

pub use app::*;
pub use auth_helpers::*;
