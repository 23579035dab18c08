//! Read-only access to the government services catalogue.
//!
//! The assistant never sends free-form SQL to the store. It goes through the
//! five structured calls on [`ServiceStore`], each with a row cap:
//! - [`RestStore`]: PostgREST (Supabase) over HTTP.
//! - [`PgStore`]: PostgreSQL via `sqlx`, fixed parameterized SELECTs.
//! - [`MockStore`]: in-memory sample catalogue for tests and offline runs.

pub mod error;
pub mod mock;
pub mod postgres;
pub mod rest;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use mock::MockStore;
pub use postgres::PgStore;
pub use rest::{RestStore, RestStoreConfig};
pub use schema::DATABASE_SCHEMA;
pub use store::ServiceStore;
