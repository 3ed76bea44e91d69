mod auth;
mod common;
mod users;
