//! SeaORM entities backing the repositories.

pub mod slang;
pub mod user;
