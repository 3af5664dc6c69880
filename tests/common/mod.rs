#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use untappd_sync::ScrapeError;
use untappd_sync::browser::PageDriver;
use untappd_sync::types::{ItemSelectors, ItemSnapshot, StoredCookie};

pub const CONTROL: &str = "Show More Beers";

/// Scripted page: each click appends the next batch from `growth`.
#[derive(Default)]
pub struct FakePage {
    state: Mutex<FakeState>,
}

#[derive(Default)]
pub struct FakeState {
    pub login_link: bool,
    pub items: usize,
    pub growth: VecDeque<usize>,
    /// Number of upcoming checks that still show the control; `None` means always.
    pub control_checks: Option<usize>,
    pub snapshots: Vec<ItemSnapshot>,
    pub browser_cookies: Vec<StoredCookie>,

    pub visited: Vec<String>,
    pub applied_cookies: Vec<StoredCookie>,
    /// Number of navigations already made when cookies were applied.
    pub cookies_set_after_visits: Option<usize>,
    pub checks: usize,
    pub clicks: usize,
    pub scrolls_into_view: usize,
    pub cookie_reads: usize,
}

impl FakePage {
    pub fn new(state: FakeState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn with_growth(initial: usize, growth: &[usize], control_checks: Option<usize>) -> Self {
        Self::new(FakeState {
            items: initial,
            growth: growth.iter().copied().collect(),
            control_checks,
            ..FakeState::default()
        })
    }

    pub fn inspect<T>(&self, f: impl FnOnce(&FakeState) -> T) -> T {
        f(&self.state.lock().unwrap())
    }

    fn control_present(state: &FakeState) -> bool {
        state.control_checks.is_none_or(|n| n > 0)
    }
}

impl PageDriver for FakePage {
    async fn goto(&self, url: &str) -> Result<(), ScrapeError> {
        self.state.lock().unwrap().visited.push(url.to_string());
        Ok(())
    }

    async fn has_element(&self, selector: &str) -> Result<bool, ScrapeError> {
        let state = self.state.lock().unwrap();
        Ok(selector.contains("login") && state.login_link)
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScrapeError> {
        Ok(())
    }

    async fn anchor_texts(&self) -> Result<Vec<String>, ScrapeError> {
        let mut state = self.state.lock().unwrap();
        state.checks += 1;
        let mut anchors = vec!["Home".to_string(), "Beers".to_string()];
        if Self::control_present(&state) {
            anchors.push(CONTROL.to_string());
        }
        if let Some(n) = state.control_checks.as_mut() {
            *n = n.saturating_sub(1);
        }
        Ok(anchors)
    }

    async fn scroll_anchor_into_view(&self, index: usize) -> Result<(), ScrapeError> {
        assert_eq!(index, 2, "only the control is scrolled into view");
        self.state.lock().unwrap().scrolls_into_view += 1;
        Ok(())
    }

    async fn click_anchor(&self, index: usize) -> Result<(), ScrapeError> {
        assert_eq!(index, 2, "only the control is clicked");
        let mut state = self.state.lock().unwrap();
        state.clicks += 1;
        let added = state.growth.pop_front().unwrap_or(0);
        state.items += added;
        Ok(())
    }

    async fn count(&self, _selector: &str) -> Result<usize, ScrapeError> {
        Ok(self.state.lock().unwrap().items)
    }

    async fn item_snapshots(
        &self,
        _item_selector: &str,
        _fields: &ItemSelectors,
    ) -> Result<Vec<ItemSnapshot>, ScrapeError> {
        Ok(self.state.lock().unwrap().snapshots.clone())
    }

    async fn cookies(&self) -> Result<Vec<StoredCookie>, ScrapeError> {
        let mut state = self.state.lock().unwrap();
        state.cookie_reads += 1;
        Ok(state.browser_cookies.clone())
    }

    async fn set_cookies(&self, cookies: &[StoredCookie]) -> Result<(), ScrapeError> {
        let mut state = self.state.lock().unwrap();
        // Like a real browser tab, a blank page cannot hold cookies.
        if state.visited.is_empty() {
            return Err(ScrapeError::Io(std::io::Error::other(
                "Blank page can not have cookie",
            )));
        }
        state.cookies_set_after_visits = Some(state.visited.len());
        state.applied_cookies.extend_from_slice(cookies);
        Ok(())
    }
}

pub fn snapshot(name: &str, rating: Option<&str>, checkins: Option<&str>) -> ItemSnapshot {
    ItemSnapshot {
        name: Some(name.to_string()),
        brewery: Some("Tree House Brewing Company".to_string()),
        rating: rating.map(str::to_string),
        style: Some("IPA - New England / Hazy".to_string()),
        abv: Some("8.2% ABV".to_string()),
        checkins: checkins.map(str::to_string),
    }
}
