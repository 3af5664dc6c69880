//! Database module: forwarding of scraped records to Postgres.
//!
//! The `merge_beer_log` procedure lives in the target database; this crate only
//! supplies its arguments.

pub mod postgres;

pub use postgres::{BeerLogStorage, MERGE_BEER_LOG, PgPool};
