use crate::domain::model::{EntryId, IntakeEntry, NewEntry, ProfileDocument};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 個人檔案存放處。所有寫入都走 `modify`，在同一把寫鎖內讀、改、寫整份文件。
pub trait ProfileStore: Send + Sync {
    fn load(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<ProfileDocument>>> + Send;

    /// Applies `apply` to the stored document (the default one if the user has
    /// none yet) atomically and returns the result.
    fn modify<F>(
        &self,
        user_id: &str,
        apply: F,
    ) -> impl std::future::Future<Output = Result<ProfileDocument>> + Send
    where
        F: FnOnce(&mut ProfileDocument) + Send;
}

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Persists the entry and returns the identity assigned by the store.
    async fn insert(&self, entry: NewEntry) -> Result<IntakeEntry>;
    async fn update(&self, id: EntryId, amount: f64, label: String) -> Result<IntakeEntry>;
    async fn remove(&self, id: EntryId) -> Result<()>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<IntakeEntry>>;
}
