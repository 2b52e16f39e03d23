use crate::logging::{log, LogLevel};
use crate::model::output::PokemonRecord;

/// Upper bound on the up-front allocation; larger runs grow on demand.
const MAX_PRESIZE: usize = 2048;

/// Append-only buffer of assembled records, kept in strictly ascending `idx`.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<PokemonRecord>,
}

impl RecordStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Sized for a run over `total_ids` ids, however wide the range.
    pub fn for_range(total_ids: usize) -> Self {
        Self::with_capacity(total_ids.min(MAX_PRESIZE))
    }

    /// Returns `false` (and drops the record) if it would break the ordering.
    pub fn push(&mut self, record: PokemonRecord) -> bool {
        if let Some(last) = self.records.last() {
            if record.idx <= last.idx {
                log(
                    LogLevel::Warning,
                    &format!(
                        "Dropping record #{} ('{}'): idx not after previous #{}.",
                        record.idx, record.slug, last.idx
                    ),
                );
                return false;
            }
        }
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PokemonRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PokemonRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::output::LocalizedName;

    fn record(idx: i64) -> PokemonRecord {
        PokemonRecord {
            idx,
            slug: format!("mon-{}", idx),
            gen: 1,
            name: LocalizedName::default(),
            desc: Default::default(),
            stats: None,
            forms: Vec::new(),
        }
    }

    #[test]
    fn keeps_ascending_records() {
        let mut store = RecordStore::default();
        assert!(store.push(record(1)));
        assert!(store.push(record(3)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn rejects_duplicate_and_out_of_order_ids() {
        let mut store = RecordStore::with_capacity(4);
        assert!(store.push(record(5)));
        assert!(!store.push(record(5)));
        assert!(!store.push(record(4)));
        assert_eq!(
            store.records().iter().map(|r| r.idx).collect::<Vec<_>>(),
            vec![5]
        );
    }

    #[test]
    fn huge_range_does_not_presize_huge_buffer() {
        let store = RecordStore::for_range(usize::MAX);
        assert!(store.records.capacity() <= MAX_PRESIZE);
        assert!(RecordStore::for_range(3).records.capacity() >= 3);
    }
}
