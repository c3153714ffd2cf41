pub mod extractor;
pub mod goal;
pub mod vocabulary;

pub use crate::domain::model::{BiologicalSex, BiometricProfile, GoalRecord, IntakeMatch};
pub use crate::domain::ports::{EntryStore, ProfileStore};
pub use crate::utils::error::Result;
