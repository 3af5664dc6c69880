pub mod cookie;
pub mod record;

pub use cookie::{Session, StoredCookie};
pub use record::{CheckinRecord, ItemSelectors, ItemSnapshot, NOT_AVAILABLE, ScrapeResult};
