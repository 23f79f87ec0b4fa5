use anyhow::Result;

use crate::models::ScanRecord;

/// Destination for extracted scan records.
///
/// The bridge owns exactly one sink for the life of the process and calls it
/// synchronously, one record at a time. A `store` failure is reported to the
/// caller but must leave the sink usable for the next record.
pub trait ScanSink {
    fn store(&self, record: &ScanRecord) -> impl std::future::Future<Output = Result<()>> + Send;
}
