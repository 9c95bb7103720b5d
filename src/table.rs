//! Active-note bookkeeping.
//!
//! One entry per key identity, from the moment a Down is accepted until the
//! matching Up (explicit or inferred) removes it. The table never sends
//! messages itself; the controller decides what each transition means.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A note currently sounding for one key.
#[derive(Debug, Clone, Copy)]
pub struct ActiveNote {
    pub note: u8,
    pub last_seen: Instant,
}

/// Map from key identity to the note sounding for it.
#[derive(Debug, Default)]
pub struct ActiveNoteTable {
    entries: HashMap<String, ActiveNote>,
}

impl ActiveNoteTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn contains(&self, key_id: &str) -> bool {
        self.entries.contains_key(key_id)
    }

    /// Record a newly sounding note for `key_id`.
    pub fn insert(&mut self, key_id: &str, note: u8, now: Instant) {
        self.entries.insert(
            key_id.to_string(),
            ActiveNote {
                note,
                last_seen: now,
            },
        );
    }

    /// Remove the entry for `key_id`, returning its note if one was sounding.
    pub fn remove(&mut self, key_id: &str) -> Option<u8> {
        self.entries.remove(key_id).map(|entry| entry.note)
    }

    /// Refresh the idle timestamp without re-deriving the note. Used when
    /// the input channel auto-repeats a held key.
    pub fn touch(&mut self, key_id: &str, now: Instant) {
        if let Some(entry) = self.entries.get_mut(key_id) {
            entry.last_seen = now;
        }
    }

    /// Keys idle strictly longer than `timeout`. Entries stay in place; the
    /// caller is expected to `remove` (via note-off) each returned key.
    pub fn scan_expired(&self, now: Instant, timeout: Duration) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.last_seen) > timeout)
            .map(|(key_id, _)| key_id.clone())
            .collect()
    }

    /// All keys currently sounding.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_pairing() {
        let mut table = ActiveNoteTable::new();
        let now = Instant::now();

        assert!(!table.contains("30"));
        table.insert("30", 64, now);
        assert!(table.contains("30"));
        assert_eq!(table.len(), 1);

        assert_eq!(table.remove("30"), Some(64));
        assert_eq!(table.remove("30"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn scan_expired_boundaries() {
        let mut table = ActiveNoteTable::new();
        let t0 = Instant::now();
        table.insert("a", 60, t0);

        let timeout = Duration::from_millis(600);
        assert!(table
            .scan_expired(t0 + Duration::from_millis(590), timeout)
            .is_empty());
        assert_eq!(
            table.scan_expired(t0 + Duration::from_millis(610), timeout),
            vec!["a".to_string()]
        );
        // Scanning does not remove.
        assert!(table.contains("a"));
    }

    #[test]
    fn touch_defers_expiry() {
        let mut table = ActiveNoteTable::new();
        let t0 = Instant::now();
        table.insert("a", 60, t0);

        let timeout = Duration::from_millis(600);
        table.touch("a", t0 + Duration::from_millis(500));
        assert!(table
            .scan_expired(t0 + Duration::from_millis(700), timeout)
            .is_empty());
        assert_eq!(
            table
                .scan_expired(t0 + Duration::from_millis(1200), timeout)
                .len(),
            1
        );
    }

    #[test]
    fn touch_on_missing_key_is_a_no_op() {
        let mut table = ActiveNoteTable::new();
        table.touch("ghost", Instant::now());
        assert!(table.is_empty());
    }
}
