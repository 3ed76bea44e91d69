pub mod auth;
pub mod shelf;
pub mod user;
