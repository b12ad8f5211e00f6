//! Pull loop that feeds a transaction source through the classifier.

use std::collections::VecDeque;

use tix_domain::{NetworkParams, TransactionBatch};

use crate::{Classification, Classifier, CoreError, SourceError};

/// Paged feed of a wallet's mined transactions.
///
/// `next_batch` returning `Ok(None)` marks the normal end of the stream.
pub trait TransactionSource {
    /// Height of the current chain tip.
    fn current_height(&mut self) -> Result<i64, SourceError>;

    fn next_batch(&mut self) -> Result<Option<TransactionBatch>, SourceError>;
}

/// Result of a scan, complete or cut short by the source.
#[derive(Debug)]
pub struct ScanReport {
    pub classification: Classification,
    pub batches: usize,
    /// Set when the source failed before the end of the stream.
    pub interrupted: Option<SourceError>,
}

impl ScanReport {
    pub fn is_complete(&self) -> bool {
        self.interrupted.is_none()
    }
}

/// Classifies every batch at or above `starting_height` until the stream ends.
///
/// Failing to read the tip height aborts. A failure while paging stops the scan and
/// keeps whatever was classified so far in the returned report.
pub fn scan<S>(
    source: &mut S,
    params: NetworkParams,
    starting_height: i64,
) -> Result<ScanReport, CoreError>
where
    S: TransactionSource + ?Sized,
{
    let current_height = source.current_height()?;
    tracing::info!(current_height, starting_height, "scanning wallet transactions");

    let mut classifier = Classifier::new(current_height, params);
    let mut batches = 0usize;
    let mut interrupted = None;

    loop {
        match source.next_batch() {
            Ok(Some(batch)) => {
                if batch.height < starting_height {
                    tracing::trace!(height = batch.height, "batch below starting height");
                    continue;
                }
                classifier.ingest_batch(&batch);
                batches += 1;
            }
            Ok(None) => break,
            Err(err) => {
                tracing::error!(%err, batches, "transaction stream failed");
                interrupted = Some(err);
                break;
            }
        }
    }

    Ok(ScanReport {
        classification: classifier.finish(),
        batches,
        interrupted,
    })
}

/// In-memory source, mostly for tests and replaying captured histories.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    current_height: i64,
    batches: VecDeque<TransactionBatch>,
}

impl MemorySource {
    pub fn new(current_height: i64, batches: impl IntoIterator<Item = TransactionBatch>) -> Self {
        Self {
            current_height,
            batches: batches.into_iter().collect(),
        }
    }
}

impl TransactionSource for MemorySource {
    fn current_height(&mut self) -> Result<i64, SourceError> {
        Ok(self.current_height)
    }

    fn next_batch(&mut self) -> Result<Option<TransactionBatch>, SourceError> {
        Ok(self.batches.pop_front())
    }
}
