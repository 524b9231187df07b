//! Append-only session logs on top of a whole-blob result store.

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::errors::{DomainResult, StudyError};
use crate::domain::models::VoteRecord;
use crate::domain::ports::ResultStore;

/// Header row of every session log.
pub const LOG_HEADER: [&str; 3] = ["Caption", "Baseline_Method", "Chosen_Method"];

/// Appends vote records to per-session CSV logs.
///
/// Each append is an optimistic read-modify-write: fetch the whole log, add
/// one row, write the whole log back. Two appends racing on the same key can
/// lose a row; the session code prevents that by never submitting the same
/// task twice.
#[derive(Clone)]
pub struct ResultRecorder {
    store: Arc<dyn ResultStore>,
}

impl ResultRecorder {
    pub fn new(store: Arc<dyn ResultStore>) -> Self {
        Self { store }
    }

    /// Appends `record` to the log stored under `log_key`.
    ///
    /// A missing or unreadable log counts as empty, so a read problem never
    /// costs the current vote. Returns the number of rows now in the log.
    ///
    /// # Errors
    /// Returns `StorageWrite` if the updated log could not be stored.
    #[instrument(skip(self, record), fields(caption = %record.caption, chosen = %record.chosen_method), err)]
    pub async fn append(&self, log_key: &str, record: VoteRecord) -> DomainResult<usize> {
        let mut records = self.read_log(log_key).await;
        records.push(record);

        let bytes = encode(&records).map_err(|e| StudyError::write(log_key, e))?;
        self.store.write(log_key, &bytes).await?;

        debug!(log_key, rows = records.len(), "vote appended");
        Ok(records.len())
    }

    /// Current rows of a log; empty when the log is absent or unreadable.
    pub async fn read_log(&self, log_key: &str) -> Vec<VoteRecord> {
        let bytes = match self.store.read(log_key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(log_key, error = %err, "result log unreadable, starting a fresh one");
                return Vec::new();
            }
        };

        decode(&bytes).unwrap_or_else(|err| {
            warn!(log_key, error = %err, "result log malformed, starting a fresh one");
            Vec::new()
        })
    }
}

/// Serializes records as CSV with the log header.
pub fn encode(records: &[VoteRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(LOG_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Parses a CSV log. Empty input is an empty log.
pub fn decode(bytes: &[u8]) -> Result<Vec<VoteRecord>, csv::Error> {
    csv::Reader::from_reader(bytes).deserialize().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryResultStore;

    fn recorder() -> (ResultRecorder, Arc<InMemoryResultStore>) {
        let store = Arc::new(InMemoryResultStore::new());
        (ResultRecorder::new(store.clone()), store)
    }

    #[test]
    fn test_encode_layout_and_quoting() {
        let bytes = encode(&[
            VoteRecord::new("bear", "no_prune", "prune0.149"),
            VoteRecord::new("car, red", "no_prune", "draw"),
        ])
        .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Caption,Baseline_Method,Chosen_Method\n\
             bear,no_prune,prune0.149\n\
             \"car, red\",no_prune,draw\n"
        );
    }

    #[test]
    fn test_decode_empty_and_header_only() {
        assert!(decode(b"").unwrap().is_empty());
        assert!(decode(b"Caption,Baseline_Method,Chosen_Method\n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_wrong_columns() {
        assert!(decode(b"a,b\n1,2\n").is_err());
    }

    #[tokio::test]
    async fn test_append_to_missing_log() {
        let (recorder, store) = recorder();

        let rows = recorder
            .append("testID1_s.csv", VoteRecord::new("bear", "no_prune", "draw"))
            .await
            .unwrap();

        assert_eq!(rows, 1);
        assert_eq!(
            store.contents("testID1_s.csv").await.unwrap(),
            "Caption,Baseline_Method,Chosen_Method\nbear,no_prune,draw\n"
        );
    }

    #[tokio::test]
    async fn test_append_merges_existing_rows() {
        let (recorder, store) = recorder();
        store
            .put(
                "k.csv",
                "Caption,Baseline_Method,Chosen_Method\nbear,no_prune,draw\n",
            )
            .await;

        recorder
            .append("k.csv", VoteRecord::new("car", "no_prune", "no_prune"))
            .await
            .unwrap();

        let rows = recorder.read_log("k.csv").await;
        assert_eq!(
            rows,
            vec![
                VoteRecord::new("bear", "no_prune", "draw"),
                VoteRecord::new("car", "no_prune", "no_prune"),
            ]
        );
    }

    #[tokio::test]
    async fn test_read_failure_starts_fresh_log() {
        let (recorder, store) = recorder();
        store
            .put("k.csv", "Caption,Baseline_Method,Chosen_Method\nbear,no_prune,draw\n")
            .await;
        store.fail_next_reads(1);

        let rows = recorder
            .append("k.csv", VoteRecord::new("car", "no_prune", "draw"))
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_malformed_log_starts_fresh_log() {
        let (recorder, store) = recorder();
        store.put("k.csv", "garbage\n\"unterminated").await;

        let rows = recorder
            .append("k.csv", VoteRecord::new("car", "no_prune", "draw"))
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let (recorder, store) = recorder();
        store.fail_next_writes(1);

        let err = recorder
            .append("k.csv", VoteRecord::new("car", "no_prune", "draw"))
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::StorageWrite { .. }));
        assert!(store.contents("k.csv").await.is_none());
    }
}
