//! Browser automation seam.
//!
//! Everything above this module talks to a `PageDriver`; `ChromeSession` is the
//! production implementation backed by `chromiumoxide`.

pub mod chrome;

pub use chrome::ChromeSession;

use crate::error::ScrapeError;
use crate::types::{ItemSelectors, ItemSnapshot, StoredCookie};

/// Operations the scraper needs from one live page. Used strictly sequentially.
#[allow(async_fn_in_trait)]
pub trait PageDriver {
    async fn goto(&self, url: &str) -> Result<(), ScrapeError>;

    /// Whether at least one element matches `selector`.
    async fn has_element(&self, selector: &str) -> Result<bool, ScrapeError>;

    async fn scroll_to_bottom(&self) -> Result<(), ScrapeError>;

    /// Visible text of every anchor on the page, in document order.
    async fn anchor_texts(&self) -> Result<Vec<String>, ScrapeError>;

    /// `index` refers to the list last returned by `anchor_texts`.
    async fn scroll_anchor_into_view(&self, index: usize) -> Result<(), ScrapeError>;

    async fn click_anchor(&self, index: usize) -> Result<(), ScrapeError>;

    async fn count(&self, selector: &str) -> Result<usize, ScrapeError>;

    async fn item_snapshots(
        &self,
        item_selector: &str,
        fields: &ItemSelectors,
    ) -> Result<Vec<ItemSnapshot>, ScrapeError>;

    async fn cookies(&self) -> Result<Vec<StoredCookie>, ScrapeError>;

    async fn set_cookies(&self, cookies: &[StoredCookie]) -> Result<(), ScrapeError>;
}
