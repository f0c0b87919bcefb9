//! lightbnb-db: PostgreSQL access for LightBnB
//!
//! # Design Principles
//!
//! - One pool per process, built once and borrowed by every repository
//! - One round trip per operation, no transactions across calls
//! - Failures are logged where the query runs and returned as [`DbError`],
//!   never folded into "not found"

pub mod bind;
pub mod error;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{connect_options, create_pool, create_pool_with_options, pool_from_env};
pub use repos::*;
pub use sqlx::PgPool;
