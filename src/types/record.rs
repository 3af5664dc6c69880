use serde::{Deserialize, Serialize};

/// Placeholder for any field whose element is absent or empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// One beer from the checkin list. Every field is always present; missing data
/// is `NOT_AVAILABLE`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckinRecord {
    pub name: String,
    pub brewery: String,
    pub rating: String,
    pub style: String,
    pub abv: String,
    pub total_checkins: String,
}

/// Ordered records of one run, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ScrapeResult(Vec<CheckinRecord>);

impl ScrapeResult {
    pub fn new(records: Vec<CheckinRecord>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[CheckinRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw inner text of an item's sub-elements, `None` when the element is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub name: Option<String>,
    pub brewery: Option<String>,
    pub rating: Option<String>,
    pub style: Option<String>,
    pub abv: Option<String>,
    pub checkins: Option<String>,
}

/// Selectors resolved relative to each item element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemSelectors {
    pub name: String,
    pub brewery: String,
    pub rating: String,
    pub style: String,
    pub abv: String,
    pub checkins: String,
}

impl Default for ItemSelectors {
    fn default() -> Self {
        Self {
            name: ".name".to_string(),
            brewery: ".brewery".to_string(),
            rating: ".ratings .you".to_string(),
            style: ".style".to_string(),
            abv: ".abv".to_string(),
            checkins: ".details .check-ins".to_string(),
        }
    }
}
