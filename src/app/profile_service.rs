use crate::core::goal;
use crate::domain::model::{ProfileDocument, ProfileUpdate};
use crate::domain::ports::ProfileStore;
use crate::utils::error::Result;
use crate::utils::validation::{validate_not_after, Validate};
use chrono::NaiveDate;

/// 個人檔案流程：讀取時檢查年齡是否過期，編輯時一律重算目標
pub struct ProfileService<S: ProfileStore> {
    store: S,
}

fn needs_refresh(document: &ProfileDocument, now: NaiveDate) -> bool {
    document.profile.is_complete()
        && goal::is_stale(document.goal.last_computed_age, &document.profile, now)
}

impl<S: ProfileStore> ProfileService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the user's document, creating the base one on first use.
    ///
    /// A complete profile whose cached age has drifted gets its goal
    /// recomputed before it is returned.
    pub async fn load_or_create(&self, user_id: &str, now: NaiveDate) -> Result<ProfileDocument> {
        match self.store.load(user_id).await? {
            Some(document) if !needs_refresh(&document, now) => return Ok(document),
            Some(_) => {}
            None => tracing::info!("🆕 Creating base profile for user {}", user_id),
        }

        // 寫鎖內重新判斷，期間若有其他編輯已更新目標就不覆蓋
        self.store
            .modify(user_id, |document| {
                if !needs_refresh(document, now) {
                    return;
                }
                if let Some(fresh) = goal::recompute(&document.profile, now) {
                    tracing::info!(
                        "🎂 Age changed for user {} ({:?} -> {:?}), goal {}g -> {}g",
                        user_id,
                        document.goal.last_computed_age,
                        fresh.last_computed_age,
                        document.goal.target_grams,
                        fresh.target_grams
                    );
                    document.goal = fresh;
                }
            })
            .await
    }

    /// Applies a profile edit. Any edit to a complete profile recomputes the
    /// goal unconditionally.
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
        now: NaiveDate,
    ) -> Result<ProfileDocument> {
        update.validate()?;
        if let Some(dob) = update.date_of_birth {
            validate_not_after("date_of_birth", dob, now)?;
        }

        let document = self
            .store
            .modify(user_id, |document| {
                document.profile.apply(update);
                if let Some(fresh) = goal::recompute(&document.profile, now) {
                    document.goal = fresh;
                }
            })
            .await?;

        if document.profile.is_complete() {
            tracing::debug!(
                "Recomputed goal for user {}: {}g at age {:?}",
                user_id,
                document.goal.target_grams,
                document.goal.last_computed_age
            );
        } else {
            tracing::debug!("Profile for user {} still incomplete, keeping goal", user_id);
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryProfileStore;
    use crate::domain::model::{BiologicalSex, BiometricProfile, GoalRecord};
    use crate::utils::error::IntakeError;
    use tokio::sync::Notify;

    /// Holds every `load` open until `release` is notified, so another
    /// writer can run between a read and the write that follows it.
    struct HeldReadStore {
        inner: MemoryProfileStore,
        release: Notify,
    }

    impl ProfileStore for HeldReadStore {
        async fn load(&self, user_id: &str) -> Result<Option<ProfileDocument>> {
            let document = self.inner.load(user_id).await?;
            self.release.notified().await;
            Ok(document)
        }

        async fn modify<F>(&self, user_id: &str, apply: F) -> Result<ProfileDocument>
        where
            F: FnOnce(&mut ProfileDocument) + Send,
        {
            self.inner.modify(user_id, apply).await
        }
    }

    async fn seed(store: &MemoryProfileStore, document: ProfileDocument) {
        store.modify("u1", |doc| *doc = document).await.unwrap();
    }

    fn turning_fifty() -> ProfileDocument {
        ProfileDocument {
            profile: BiometricProfile::new(date(1976, 10, 16), 175.0, 70.0, BiologicalSex::Male),
            goal: GoalRecord {
                target_grams: 151,
                last_computed_age: Some(49),
            },
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn complete_update() -> ProfileUpdate {
        ProfileUpdate {
            date_of_birth: Some(date(2001, 10, 16)),
            height_cm: Some(175.0),
            weight_kg: Some(70.0),
            sex: Some(BiologicalSex::Male),
        }
    }

    #[tokio::test]
    async fn test_first_load_creates_base_profile() {
        let service = ProfileService::new(MemoryProfileStore::new());
        let doc = service.load_or_create("u1", date(2026, 10, 16)).await.unwrap();

        assert_eq!(doc.goal, GoalRecord::default());
        assert_eq!(doc.profile.sex, BiologicalSex::Male);
        assert!(service.store().load("u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_default_goal() {
        let service = ProfileService::new(MemoryProfileStore::new());
        let doc = service
            .update_profile(
                "u1",
                &ProfileUpdate {
                    height_cm: Some(180.0),
                    ..Default::default()
                },
                date(2026, 10, 16),
            )
            .await
            .unwrap();

        assert_eq!(doc.goal.target_grams, 120);
        assert_eq!(doc.goal.last_computed_age, None);
        assert_eq!(doc.profile.height_cm, Some(180.0));
    }

    #[tokio::test]
    async fn test_completing_profile_computes_goal() {
        let service = ProfileService::new(MemoryProfileStore::new());
        let doc = service
            .update_profile("u1", &complete_update(), date(2026, 10, 16))
            .await
            .unwrap();

        assert_eq!(doc.goal.target_grams, 162);
        assert_eq!(doc.goal.last_computed_age, Some(25));
    }

    #[tokio::test]
    async fn test_weight_edit_recomputes_even_when_age_unchanged() {
        let service = ProfileService::new(MemoryProfileStore::new());
        let today = date(2026, 10, 16);
        service.update_profile("u1", &complete_update(), today).await.unwrap();

        let doc = service
            .update_profile(
                "u1",
                &ProfileUpdate {
                    weight_kg: Some(90.0),
                    ..Default::default()
                },
                today,
            )
            .await
            .unwrap();

        assert!(doc.goal.target_grams > 162);
        assert_eq!(doc.goal.last_computed_age, Some(25));
    }

    #[tokio::test]
    async fn test_load_recomputes_after_birthday() {
        let store = MemoryProfileStore::new();
        seed(&store, turning_fifty()).await;

        let service = ProfileService::new(store);
        let doc = service.load_or_create("u1", date(2026, 10, 16)).await.unwrap();

        assert_eq!(doc.goal.last_computed_age, Some(50));
        assert_eq!(doc.goal.target_grams, 180);
        assert_eq!(service.store().load("u1").await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_load_leaves_fresh_goal_alone() {
        let store = MemoryProfileStore::new();
        // 手動設定的目標在年齡未變時不應被覆蓋
        let fresh = ProfileDocument {
            profile: BiometricProfile::new(date(2001, 10, 16), 175.0, 70.0, BiologicalSex::Male),
            goal: GoalRecord {
                target_grams: 140,
                last_computed_age: Some(25),
            },
        };
        seed(&store, fresh.clone()).await;

        let service = ProfileService::new(store);
        let doc = service.load_or_create("u1", date(2026, 10, 16)).await.unwrap();
        assert_eq!(doc, fresh);
    }

    #[tokio::test]
    async fn test_birthday_refresh_does_not_overwrite_concurrent_edit() {
        let inner = MemoryProfileStore::new();
        seed(&inner, turning_fifty()).await;
        let service = ProfileService::new(HeldReadStore {
            inner,
            release: Notify::new(),
        });
        let today = date(2026, 10, 16);

        // 讀取端拿到舊文件後停住，期間體重被改成 95
        let refresh = service.load_or_create("u1", today);
        let edit = async {
            let doc = service
                .update_profile(
                    "u1",
                    &ProfileUpdate {
                        weight_kg: Some(95.0),
                        ..Default::default()
                    },
                    today,
                )
                .await;
            service.store().release.notify_one();
            doc
        };
        let (refreshed, edited) = tokio::join!(refresh, edit);
        let (refreshed, edited) = (refreshed.unwrap(), edited.unwrap());

        assert_eq!(edited.goal.target_grams, 209);
        assert_eq!(refreshed, edited);

        let stored = service.store().inner.load("u1").await.unwrap().unwrap();
        assert_eq!(stored.profile.weight_kg, Some(95.0));
        assert_eq!(stored.goal.target_grams, 209);
        assert_eq!(stored.goal.last_computed_age, Some(50));
    }

    #[tokio::test]
    async fn test_invalid_update_is_rejected_before_write() {
        let service = ProfileService::new(MemoryProfileStore::new());
        let today = date(2026, 10, 16);
        service.update_profile("u1", &complete_update(), today).await.unwrap();

        for weight in [f64::NAN, -70.0] {
            let result = service
                .update_profile(
                    "u1",
                    &ProfileUpdate {
                        weight_kg: Some(weight),
                        ..Default::default()
                    },
                    today,
                )
                .await;
            assert!(matches!(
                result,
                Err(IntakeError::InvalidConfigValueError { .. })
            ));
        }

        let future_dob = ProfileUpdate {
            date_of_birth: Some(date(2027, 1, 1)),
            ..Default::default()
        };
        assert!(service.update_profile("u1", &future_dob, today).await.is_err());

        let stored = service.store().load("u1").await.unwrap().unwrap();
        assert_eq!(stored.profile.weight_kg, Some(70.0));
        assert_eq!(stored.goal.target_grams, 162);
    }
}
