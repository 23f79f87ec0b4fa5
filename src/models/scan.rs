use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scanned code, timestamped by the bridge at extraction time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub id: Option<i64>,
    pub barcode: String,
    pub scanned_at: DateTime<Utc>,
}

impl ScanRecord {
    /// Builds a record for a just-extracted code, stamped with the current
    /// wall-clock time. The sender carries no clock of its own.
    pub fn captured_now(barcode: impl Into<String>) -> Self {
        Self {
            id: None,
            barcode: barcode.into(),
            scanned_at: Utc::now(),
        }
    }
}
