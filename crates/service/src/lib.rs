//! Service layer providing contact CRUD and queries on top of `models`.
//! - `contact::repository`: data-access contract and its SeaORM implementation.
//! - `contact::service`: caller-facing pass-through facade.
//! - `db`: query construction and execution against a `DatabaseConnection`.

pub mod errors;
pub mod db;
pub mod contact;
#[cfg(test)]
pub mod test_support;

pub use contact::repository::{ContactRepository, SeaOrmContactRepository};
pub use contact::service::ContactService;
pub use errors::ServiceError;
