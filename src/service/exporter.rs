use crate::error::ScrapeError;
use crate::types::{CheckinRecord, ScrapeResult};

use futures::stream::{self, StreamExt};
use std::path::Path;
use tracing::{debug, info, warn};

/// Destination accepting one record at a time (upsert semantics owned by the sink).
#[allow(async_fn_in_trait)]
pub trait RecordSink {
    async fn merge(&self, record: &CheckinRecord) -> Result<(), ScrapeError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Position of the record in the scrape result.
    pub index: usize,
    pub name: String,
    pub error: String,
}

/// Outcome of forwarding a whole scrape result. Failures are sorted by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub merged: usize,
    pub failures: Vec<RecordFailure>,
}

impl ExportReport {
    pub fn attempted(&self) -> usize {
        self.merged + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Write the records as a pretty-printed JSON array, replacing any previous file.
pub async fn write_records(path: &Path, result: &ScrapeResult) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(result)?;
    tokio::fs::write(path, payload).await?;
    info!(path = %path.display(), records = result.len(), "Beers saved");
    Ok(())
}

/// Merge every record into `sink` with at most `concurrency` calls in flight.
///
/// Returns once every call has finished. A failing record never stops the others.
pub async fn forward_records<S: RecordSink>(
    sink: &S,
    result: &ScrapeResult,
    concurrency: usize,
) -> ExportReport {
    let outcomes: Vec<(usize, &CheckinRecord, Result<(), ScrapeError>)> =
        stream::iter(result.records().iter().enumerate())
            .map(|(index, record)| async move { (index, record, sink.merge(record).await) })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

    let mut report = ExportReport::default();
    for (index, record, outcome) in outcomes {
        match outcome {
            Ok(()) => {
                debug!(index, name = %record.name, "record merged");
                report.merged += 1;
            }
            Err(e) => {
                warn!(index, name = %record.name, error = %e, "record merge failed");
                report.failures.push(RecordFailure {
                    index,
                    name: record.name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    report.failures.sort_by_key(|f| f.index);

    info!(
        merged = report.merged,
        failed = report.failures.len(),
        "Data Import Complete!"
    );
    report
}
