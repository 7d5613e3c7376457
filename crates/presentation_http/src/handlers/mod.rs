//! HTTP request handlers

pub mod categories;
pub mod health;
pub mod profiles;
pub mod text;
pub mod tiles;
pub mod users;
