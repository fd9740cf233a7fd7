//! Entity and schema definitions for the contact book.
//! - `contact`: SeaORM entity plus the create/update input schemas.
//! - `db`: connection helpers driven by `configs::DatabaseConfig`.

pub mod errors;
pub mod db;
pub mod contact;

#[cfg(test)]
mod tests;
