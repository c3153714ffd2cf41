use crate::domain::model::{EntryId, IntakeEntry, NewEntry, ProfileDocument};
use crate::domain::ports::{EntryStore, ProfileStore};
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    documents: Arc<RwLock<HashMap<String, ProfileDocument>>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    async fn load(&self, user_id: &str) -> Result<Option<ProfileDocument>> {
        let documents = self.documents.read().await;
        Ok(documents.get(user_id).cloned())
    }

    async fn modify<F>(&self, user_id: &str, apply: F) -> Result<ProfileDocument>
    where
        F: FnOnce(&mut ProfileDocument) + Send,
    {
        let mut documents = self.documents.write().await;
        let document = documents.entry(user_id.to_string()).or_default();
        apply(document);
        Ok(document.clone())
    }
}

#[derive(Debug, Default)]
struct EntryTable {
    next_id: u64,
    rows: BTreeMap<EntryId, IntakeEntry>,
}

/// In-process entry store; ids are assigned sequentially from 1.
#[derive(Debug, Clone, Default)]
pub struct MemoryEntryStore {
    table: Arc<Mutex<EntryTable>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn insert(&self, entry: NewEntry) -> Result<IntakeEntry> {
        let mut table = self.table.lock().await;
        table.next_id += 1;
        let id = EntryId(table.next_id);
        let stored = IntakeEntry::from_new(id, entry);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: EntryId, amount: f64, label: String) -> Result<IntakeEntry> {
        let mut table = self.table.lock().await;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or(IntakeError::EntryNotFound { id: id.0 })?;
        row.amount = amount;
        row.label = label;
        Ok(row.clone())
    }

    async fn remove(&self, id: EntryId) -> Result<()> {
        let mut table = self.table.lock().await;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(IntakeError::EntryNotFound { id: id.0 })
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<IntakeEntry>> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .values()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }
}
