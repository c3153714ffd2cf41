// Application services: orchestration of the engines against the store ports.

pub mod intake_log;
pub mod profile_service;

pub use intake_log::{progress, DailyTotal, HistoryQuery, IntakeLog, LogOutcome};
pub use profile_service::ProfileService;
