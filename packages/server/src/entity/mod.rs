pub mod shelf;
pub mod user;
