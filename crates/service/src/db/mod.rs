//! Query functions over a caller-owned `DatabaseConnection`.
//! Each write is a single statement committed on its own.

pub mod contact_queries;
