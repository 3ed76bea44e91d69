pub mod auth;
pub mod health;
pub mod shelf;
pub mod user;
