//! Record slots shared by the repositories
//!
//! Every array element read from a store file gets a slot, in file order.
//! Elements that cannot be ingested stay in place as raw JSON and are
//! written back untouched. A readable record is written back as it was read
//! until it is modified, so ingestion-time normalization never reaches disk
//! on its own.

use serde_json::Value;

use crate::error::ClaimsResult;

use super::file_io::overlay_document;

#[derive(Debug, Clone)]
pub(crate) struct StoredRecord<T> {
    pub record: T,
    /// Document the record was read from; `None` for records added this session
    original: Option<Value>,
    dirty: bool,
}

#[derive(Debug, Clone)]
pub(crate) enum Slot<T> {
    Readable(StoredRecord<T>),
    Unreadable(Value),
}

impl<T> Slot<T> {
    pub fn loaded(record: T, original: Value) -> Self {
        Self::Readable(StoredRecord {
            record,
            original: Some(original),
            dirty: false,
        })
    }

    pub fn added(record: T) -> Self {
        Self::Readable(StoredRecord {
            record,
            original: None,
            dirty: true,
        })
    }

    pub fn record(&self) -> Option<&T> {
        match self {
            Self::Readable(stored) => Some(&stored.record),
            Self::Unreadable(_) => None,
        }
    }

    /// Swap in a modified record
    pub fn replace(&mut self, record: T) {
        if let Self::Readable(stored) = self {
            stored.record = record;
            stored.dirty = true;
        }
    }

    /// Document to write for this slot
    ///
    /// `render` produces the canonical document of a readable record. For a
    /// modified record that was read from disk, it is laid over the original
    /// with [`overlay_document`].
    pub fn to_value<F>(&self, replaced: &[&str], kept: &[&str], render: F) -> ClaimsResult<Value>
    where
        F: FnOnce(&T) -> ClaimsResult<Value>,
    {
        match self {
            Self::Unreadable(raw) => Ok(raw.clone()),
            Self::Readable(stored) => match (&stored.original, stored.dirty) {
                (Some(original), false) => Ok(original.clone()),
                (Some(original), true) => Ok(overlay_document(
                    original,
                    render(&stored.record)?,
                    replaced,
                    kept,
                )),
                (None, _) => render(&stored.record),
            },
        }
    }
}

/// Readable records in slot order
pub(crate) fn records<T>(slots: &[Slot<T>]) -> impl Iterator<Item = &T> {
    slots.iter().filter_map(Slot::record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(n: &i64) -> ClaimsResult<Value> {
        Ok(json!({ "n": n }))
    }

    #[test]
    fn test_unmodified_record_is_written_verbatim() {
        let slot = Slot::loaded(1, json!({"n": "1", "extra": true}));
        assert_eq!(
            slot.to_value(&["n"], &[], render).unwrap(),
            json!({"n": "1", "extra": true})
        );
    }

    #[test]
    fn test_replaced_record_keeps_unknown_fields() {
        let mut slot = Slot::loaded(1, json!({"n": "1", "extra": true}));
        slot.replace(2);
        assert_eq!(slot.record(), Some(&2));
        assert_eq!(
            slot.to_value(&["n"], &[], render).unwrap(),
            json!({"n": 2, "extra": true})
        );
    }

    #[test]
    fn test_unreadable_slot_round_trips() {
        let mut slot: Slot<i64> = Slot::Unreadable(json!([1, 2]));
        slot.replace(5);
        assert!(slot.record().is_none());
        assert_eq!(slot.to_value(&[], &[], render).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_records_skips_unreadable() {
        let slots = vec![Slot::added(1), Slot::Unreadable(json!(null)), Slot::added(3)];
        assert_eq!(records(&slots).copied().collect::<Vec<_>>(), vec![1, 3]);
    }
}
