// Session state: one owned dataset per process, replaced wholesale on each
// load and discarded on clear. Everything downstream reads through an
// explicit handle to this store; there is no ambient global table.

use chrono::{DateTime, Utc};
use shared::models::{DataSummary, MineRecord};
use uuid::Uuid;

use crate::data::schema;

const DERIVED_COLUMN_COUNT: usize = 2; // valor_anual_mapeado, status_mapeamento

/// One committed upload: canonical records plus identity and provenance.
/// Records are never mutated after commit; views clone out of them.
pub struct Dataset {
    pub version: Uuid,
    pub loaded_at: DateTime<Utc>,
    pub records: Vec<MineRecord>,
    /// Passthrough column names, in upload order.
    pub extra_columns: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<MineRecord>, extra_columns: Vec<String>) -> Self {
        Dataset {
            version: Uuid::new_v4(),
            loaded_at: Utc::now(),
            records,
            extra_columns,
        }
    }

    pub fn column_count(&self) -> usize {
        schema::REQUIRED_COLUMNS.len() + DERIVED_COLUMN_COUNT + self.extra_columns.len()
    }

    pub fn summary(&self) -> DataSummary {
        DataSummary {
            version: self.version.to_string(),
            row_count: self.records.len(),
            column_count: self.column_count(),
            loaded_at: self.loaded_at,
        }
    }
}

#[derive(Default)]
pub struct DashboardStore {
    dataset: Option<Dataset>,
}

impl DashboardStore {
    pub fn new() -> Self {
        DashboardStore { dataset: None }
    }

    /// Replaces the session dataset and returns the new version id.
    pub fn commit(&mut self, dataset: Dataset) -> Uuid {
        let version = dataset.version;
        self.dataset = Some(dataset);
        version
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn records(&self) -> Option<&[MineRecord]> {
        self.dataset.as_ref().map(|dataset| dataset.records.as_slice())
    }

    pub fn summary(&self) -> Option<DataSummary> {
        self.dataset.as_ref().map(Dataset::summary)
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    /// Discards the session dataset. Returns whether anything was held.
    pub fn clear(&mut self) -> bool {
        self.dataset.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_replaces_wholesale() {
        let mut store = DashboardStore::new();
        assert!(!store.is_loaded());
        assert!(store.records().is_none());

        let first = store.commit(Dataset::new(Vec::new(), Vec::new()));
        let second = store.commit(Dataset::new(Vec::new(), vec!["obs".to_string()]));
        assert_ne!(first, second);
        assert_eq!(store.dataset().unwrap().version, second);
    }

    #[test]
    fn clear_discards_everything() {
        let mut store = DashboardStore::new();
        store.commit(Dataset::new(Vec::new(), Vec::new()));
        assert!(store.clear());
        assert!(!store.is_loaded());
        assert!(store.summary().is_none());
        // Clearing an empty store is a no-op, not an error.
        assert!(!store.clear());
    }

    #[test]
    fn summary_counts_known_derived_and_extra_columns() {
        let dataset = Dataset::new(Vec::new(), vec!["a".to_string(), "b".to_string()]);
        let summary = dataset.summary();
        assert_eq!(summary.row_count, 0);
        assert_eq!(summary.column_count, 17 + 2 + 2);
    }
}
