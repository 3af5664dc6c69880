use crate::browser::PageDriver;
use crate::error::ScrapeError;

use std::time::Duration;
use tracing::{debug, info};

/// Index of the first anchor whose visible text contains `needle`.
pub fn find_expansion_control(anchor_texts: &[String], needle: &str) -> Option<usize> {
    anchor_texts.iter().position(|text| text.contains(needle))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No expansion control left on the page.
    NoControl,
    /// A control was activated but the item count did not change.
    Stalled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationOutcome {
    /// Number of times the page was searched for an expansion control.
    pub checks: usize,
    pub expansions: usize,
    pub items: usize,
    pub stop: StopReason,
}

/// Expands lazily loaded content until it stops growing.
pub struct PaginationDriver<'a> {
    item_selector: &'a str,
    control_text: &'a str,
    settle: Duration,
}

impl<'a> PaginationDriver<'a> {
    pub fn new(item_selector: &'a str, control_text: &'a str, settle: Duration) -> Self {
        Self {
            item_selector,
            control_text,
            settle,
        }
    }

    pub async fn expand_all<P: PageDriver>(&self, page: &P) -> Result<PaginationOutcome, ScrapeError> {
        let mut previous = 0usize;
        let mut checks = 0usize;
        let mut expansions = 0usize;

        let stop = loop {
            page.scroll_to_bottom().await?;
            self.settle().await;

            checks += 1;
            let anchors = page.anchor_texts().await?;
            let Some(index) = find_expansion_control(&anchors, self.control_text) else {
                info!("No more beers to load.");
                break StopReason::NoControl;
            };

            info!("Clicking '{}' button...", self.control_text);
            page.scroll_anchor_into_view(index).await?;
            self.settle().await;
            page.click_anchor(index).await?;
            self.settle().await;
            expansions += 1;

            let current = page.count(self.item_selector).await?;
            debug!(previous, current, "item count after expansion");
            if current == previous {
                info!(items = current, "item count unchanged; stopping expansion");
                break StopReason::Stalled;
            }
            previous = current;
        };

        let items = page.count(self.item_selector).await?;
        Ok(PaginationOutcome {
            checks,
            expansions,
            items,
            stop,
        })
    }

    async fn settle(&self) {
        if !self.settle.is_zero() {
            tokio::time::sleep(self.settle).await;
        }
    }
}
