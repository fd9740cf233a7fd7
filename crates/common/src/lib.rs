//! Shared runtime helpers for the contact book binaries and tests.
//! - `utils::logging`: tracing subscriber setup.
//! - `env`: `.env` loading.

pub mod env;
pub mod utils;

/// Filter used when neither `RUST_LOG` nor the config file specifies one.
pub const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn,sea_orm_migration=info";
