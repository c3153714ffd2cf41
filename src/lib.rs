pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{MemoryEntryStore, MemoryProfileStore};
pub use app::{DailyTotal, HistoryQuery, IntakeLog, LogOutcome, ProfileService};
pub use config::ProfileConfig;
pub use crate::core::extractor::extract;
pub use crate::core::goal::{compute_target, is_stale};
pub use domain::model::{
    BiologicalSex, BiometricProfile, GoalRecord, IntakeEntry, IntakeMatch, ProfileDocument,
    ProfileUpdate,
};
pub use utils::error::{IntakeError, Result};
