use crate::core::extractor;
use crate::domain::model::{EntryId, IntakeEntry, NewEntry};
use crate::domain::ports::EntryStore;
use crate::utils::error::Result;
use crate::utils::validation::validate_amount;
use chrono::{Days, NaiveDate, NaiveDateTime};
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};
use serde::Serialize;
use std::collections::HashMap;

/// Label for entries added without one.
pub const QUICK_ADD_LABEL: &str = "Quick Add";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LogOutcome {
    Logged {
        entry: IntakeEntry,
        /// This entry moved the day's total from below the goal to at or above it.
        goal_reached: bool,
    },
    NoMatch {
        transcript: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTotal {
    pub day: NaiveDate,
    pub total: f64,
}

/// 歷史紀錄篩選條件；日期區間含頭尾
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub search: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Share of the goal reached, capped at 1.
pub fn progress(total: f64, goal_grams: u32) -> f64 {
    if goal_grams == 0 {
        return if total > 0.0 { 1.0 } else { 0.0 };
    }
    (total / f64::from(goal_grams)).clamp(0.0, 1.0)
}

/// Daily intake log on top of an [`EntryStore`].
pub struct IntakeLog<E: EntryStore> {
    store: E,
}

impl<E: EntryStore> IntakeLog<E> {
    pub fn new(store: E) -> Self {
        Self { store }
    }

    pub async fn add_entry(
        &self,
        user_id: &str,
        amount: f64,
        label: Option<&str>,
        at: NaiveDateTime,
    ) -> Result<IntakeEntry> {
        validate_amount("amount", amount)?;

        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(QUICK_ADD_LABEL);

        let entry = self
            .store
            .insert(NewEntry {
                user_id: user_id.to_string(),
                amount,
                label: label.to_string(),
                logged_at: at,
                day: at.date(),
            })
            .await?;

        tracing::info!(
            "📝 Logged {}g '{}' for {} on {}",
            entry.amount,
            entry.label,
            user_id,
            entry.day
        );
        Ok(entry)
    }

    /// Runs the extractor over a voice transcript and logs the result.
    pub async fn log_transcript(
        &self,
        user_id: &str,
        transcript: &str,
        goal_grams: u32,
        at: NaiveDateTime,
    ) -> Result<LogOutcome> {
        let Some(parsed) = extractor::extract(transcript) else {
            tracing::warn!("🎤 No amount found in transcript: {:?}", transcript);
            return Ok(LogOutcome::NoMatch {
                transcript: transcript.to_string(),
            });
        };

        let before = self.total_for_day(user_id, at.date()).await?;
        let entry = self
            .add_entry(user_id, parsed.amount, Some(parsed.label.as_str()), at)
            .await?;

        let goal = f64::from(goal_grams);
        let goal_reached = before < goal && before + entry.amount >= goal;
        if goal_reached {
            tracing::info!("🎉 {} reached the daily goal of {}g", user_id, goal_grams);
        }

        Ok(LogOutcome::Logged {
            entry,
            goal_reached,
        })
    }

    pub async fn edit_entry(&self, id: EntryId, amount: f64, label: &str) -> Result<IntakeEntry> {
        validate_amount("amount", amount)?;
        self.store.update(id, amount, label.trim().to_string()).await
    }

    pub async fn remove_entry(&self, id: EntryId) -> Result<()> {
        self.store.remove(id).await?;
        tracing::debug!("Removed entry {}", id);
        Ok(())
    }

    /// Entries bucketed on `day`, newest first.
    pub async fn entries_for_day(&self, user_id: &str, day: NaiveDate) -> Result<Vec<IntakeEntry>> {
        let mut entries: Vec<IntakeEntry> = self
            .store
            .list_for_user(user_id)
            .await?
            .into_iter()
            .filter(|entry| entry.day == day)
            .collect();
        entries.sort_by(|a, b| b.logged_at.cmp(&a.logged_at).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    pub async fn total_for_day(&self, user_id: &str, day: NaiveDate) -> Result<f64> {
        Ok(self
            .entries_for_day(user_id, day)
            .await?
            .iter()
            .map(|entry| entry.amount)
            .sum())
    }

    /// One total per day for the `days` days ending at `end_day`, oldest
    /// first. Days without entries report 0.
    pub async fn daily_totals(
        &self,
        user_id: &str,
        end_day: NaiveDate,
        days: u32,
    ) -> Result<Vec<DailyTotal>> {
        let mut sums: HashMap<NaiveDate, f64> = HashMap::new();
        for entry in self.store.list_for_user(user_id).await? {
            *sums.entry(entry.day).or_default() += entry.amount;
        }

        Ok((0..days)
            .rev()
            .filter_map(|back| end_day.checked_sub_days(Days::new(u64::from(back))))
            .map(|day| DailyTotal {
                day,
                total: sums.get(&day).copied().unwrap_or(0.0),
            })
            .collect())
    }

    /// Every entry inside the date range, newest first. With a search term
    /// only fuzzy label matches are kept, best match first.
    pub async fn history(&self, user_id: &str, query: &HistoryQuery) -> Result<Vec<IntakeEntry>> {
        let mut entries: Vec<IntakeEntry> = self
            .store
            .list_for_user(user_id)
            .await?
            .into_iter()
            .filter(|entry| query.from.map_or(true, |from| entry.day >= from))
            .filter(|entry| query.to.map_or(true, |to| entry.day <= to))
            .collect();
        entries.sort_by(|a, b| b.logged_at.cmp(&a.logged_at).then(b.id.cmp(&a.id)));

        let search = query.search.as_deref().map(str::trim).unwrap_or_default();
        if search.is_empty() {
            return Ok(entries);
        }

        let pattern = Pattern::parse(search, CaseMatching::Ignore, Normalization::Smart);
        let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);
        let mut scored: Vec<(u32, IntakeEntry)> = entries
            .into_iter()
            .filter_map(|entry| {
                let haystack = Utf32String::from(entry.label.as_str());
                let score = pattern.score(haystack.slice(..), &mut matcher)?;
                Some((score, entry))
            })
            .collect();
        // 穩定排序，同分時保留新到舊
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        tracing::debug!("🔍 History search {:?} matched {} entries", search, scored.len());
        Ok(scored.into_iter().map(|(_, entry)| entry).collect())
    }
}
