//! Generic JSON collection
//!
//! One collection per entity type, stored as a JSON array in its own file.
//! Records keep their insertion order, which is the store's enumeration
//! order.

use std::path::PathBuf;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::VaultError;
use crate::models::{EntityKind, Record};

use super::file_io::{read_json, write_json_atomic};
use super::migrate::{add_missing_fields, Migrate, MigrationOutcome};

/// Keyed access to one entity collection
///
/// What the engines consume; they never see how records are laid out on disk.
pub trait Collection<T: Record> {
    /// Every record, in store order
    fn find_all(&self) -> Result<Vec<T>, VaultError>;

    /// Insert or update a batch of records, all or nothing
    fn save_all(&self, records: Vec<T>) -> Result<Vec<Uuid>, VaultError>;

    /// Count records
    fn count(&self) -> Result<usize, VaultError>;

    /// Insert or update one record
    fn save(&self, record: T) -> Result<Uuid, VaultError> {
        let mut ids = self.save_all(vec![record])?;
        ids.pop()
            .ok_or_else(|| VaultError::Storage("save returned no id".into()))
    }
}

/// Repository for one entity collection
pub struct JsonCollection<T: Record> {
    path: PathBuf,
    data: RwLock<Vec<T>>,
}

impl<T: Record> JsonCollection<T> {
    /// Create a new collection backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// File backing this collection
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load records from disk
    pub fn load(&self) -> Result<(), VaultError> {
        let records: Vec<T> = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = records;

        Ok(())
    }

}

impl<T: Record> Collection<T> for JsonCollection<T> {
    /// Every record, in store order
    fn find_all(&self) -> Result<Vec<T>, VaultError> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    /// Insert or update a batch of records and persist once
    ///
    /// If writing the file fails, the in-memory state is put back as it was,
    /// so the batch is applied entirely or not at all.
    fn save_all(&self, records: Vec<T>) -> Result<Vec<Uuid>, VaultError> {
        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let previous = data.clone();
        let mut ids = Vec::with_capacity(records.len());

        for record in records {
            let id = record.record_id();
            match data.iter_mut().find(|r| r.record_id() == id) {
                Some(existing) => *existing = record,
                None => data.push(record),
            }
            ids.push(id);
        }

        if let Err(e) = write_json_atomic(&self.path, &*data) {
            *data = previous;
            return Err(e);
        }

        Ok(ids)
    }

    /// Count records
    fn count(&self) -> Result<usize, VaultError> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

impl<T: Record> Migrate for JsonCollection<T> {
    fn kind(&self) -> EntityKind {
        T::KIND
    }

    fn migrate(&self) -> Result<MigrationOutcome, VaultError> {
        add_missing_fields::<T>(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Note;
    use tempfile::TempDir;

    fn create_test_collection() -> (TempDir, JsonCollection<Note>) {
        let temp_dir = TempDir::new().unwrap();
        let collection = JsonCollection::new(temp_dir.path().join("notes.json"));
        (temp_dir, collection)
    }

    fn note(title: &str) -> Note {
        Note {
            title: title.into(),
            ..Note::default()
        }
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, collection) = create_test_collection();
        collection.load().unwrap();
        assert_eq!(collection.count().unwrap(), 0);
    }

    #[test]
    fn test_save_returns_record_id() {
        let (_temp_dir, collection) = create_test_collection();

        let record = note("groceries");
        let id = collection.save(record.clone()).unwrap();

        assert_eq!(id, *record.id.as_uuid());
        assert_eq!(collection.find_all().unwrap()[0].title, "groceries");
    }

    #[test]
    fn test_save_existing_updates_in_place() {
        let (_temp_dir, collection) = create_test_collection();

        let mut record = note("first");
        collection.save(record.clone()).unwrap();
        record.title = "second".into();
        collection.save(record).unwrap();

        let all = collection.find_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "second");
    }

    #[test]
    fn test_insertion_order_kept_across_reload() {
        let (temp_dir, collection) = create_test_collection();

        collection
            .save_all(vec![note("a"), note("b"), note("c")])
            .unwrap();

        let reloaded: JsonCollection<Note> =
            JsonCollection::new(temp_dir.path().join("notes.json"));
        reloaded.load().unwrap();

        let titles: Vec<_> = reloaded
            .find_all()
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_failed_batch_leaves_memory_untouched() {
        let temp_dir = TempDir::new().unwrap();
        // Path whose parent is a regular file cannot be written
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let collection: JsonCollection<Note> = JsonCollection::new(blocker.join("notes.json"));

        assert!(collection.save_all(vec![note("x")]).is_err());
        assert_eq!(collection.count().unwrap(), 0);
    }
}
