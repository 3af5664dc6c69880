pub mod browser;
pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod session;
pub mod types;

pub use error::ScrapeError;
pub use types::{CheckinRecord, ScrapeResult};
