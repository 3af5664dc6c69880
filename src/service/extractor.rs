use crate::types::{CheckinRecord, ItemSnapshot, NOT_AVAILABLE, ScrapeResult};

use regex::Regex;
use std::sync::LazyLock;

static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+(\.\d+)?)\)").expect("RATING_RE should compile"));
static FIRST_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("FIRST_DIGITS_RE should compile"));
static GROUPED_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:,\d{3})*").expect("GROUPED_DIGITS_RE should compile"));

/// How the check-in count is read out of text like "1,204 check-ins".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckinCount {
    /// Whole number with thousands separators removed: "1204".
    #[default]
    Grouped,
    /// First run of digits only: "1".
    FirstDigitRun,
}

impl CheckinCount {
    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy {
            Self::FirstDigitRun
        } else {
            Self::Grouped
        }
    }
}

/// Maps item snapshots to records, one per item, in document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    checkin_count: CheckinCount,
}

impl Extractor {
    pub fn new(checkin_count: CheckinCount) -> Self {
        Self { checkin_count }
    }

    pub fn extract(&self, snapshots: &[ItemSnapshot]) -> ScrapeResult {
        ScrapeResult::new(snapshots.iter().map(|s| self.record(s)).collect())
    }

    pub fn record(&self, snapshot: &ItemSnapshot) -> CheckinRecord {
        CheckinRecord {
            name: plain_text(snapshot.name.as_deref()),
            brewery: plain_text(snapshot.brewery.as_deref()),
            rating: parse_rating(snapshot.rating.as_deref()),
            style: plain_text(snapshot.style.as_deref()),
            abv: plain_text(snapshot.abv.as_deref()),
            total_checkins: parse_total_checkins(snapshot.checkins.as_deref(), self.checkin_count),
        }
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

pub fn plain_text(raw: Option<&str>) -> String {
    present(raw).map_or_else(not_available, str::to_string)
}

/// The user's own rating, e.g. "(4.25)" -> "4.25".
pub fn parse_rating(raw: Option<&str>) -> String {
    present(raw)
        .and_then(|text| RATING_RE.captures(text))
        .and_then(|caps| caps.get(1))
        .map_or_else(not_available, |m| m.as_str().to_string())
}

pub fn parse_total_checkins(raw: Option<&str>, mode: CheckinCount) -> String {
    let Some(text) = present(raw) else {
        return not_available();
    };
    match mode {
        CheckinCount::FirstDigitRun => FIRST_DIGITS_RE
            .find(text)
            .map_or_else(not_available, |m| m.as_str().to_string()),
        CheckinCount::Grouped => GROUPED_DIGITS_RE
            .find(text)
            .map_or_else(not_available, |m| m.as_str().replace(',', "")),
    }
}
