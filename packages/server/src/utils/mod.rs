pub mod branch;
pub mod filename;
pub mod hash;
