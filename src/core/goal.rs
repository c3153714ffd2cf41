//! Daily protein target from a biometric profile.
//!
//! Mifflin-St Jeor BMR, a fixed moderate-activity multiplier, a fixed 25%
//! protein share and a boost for older adults. The caller always supplies
//! "now"; nothing here reads a clock.

use crate::domain::model::{BiologicalSex, BiometricProfile, GoalRecord};
use chrono::NaiveDate;

/// Returned whenever the profile is missing dob, height or weight.
pub const DEFAULT_TARGET_GRAMS: u32 = 120;
pub const MIN_TARGET_GRAMS: u32 = 60;
/// Inclusive.
pub const SENIOR_AGE: u32 = 50;

const SENIOR_BOOST: f64 = 1.2;
const ACTIVITY_MULTIPLIER: f64 = 1.55;
const PROTEIN_SHARE: f64 = 0.25;
const KCAL_PER_GRAM: f64 = 4.0;

fn sex_offset(sex: BiologicalSex) -> f64 {
    match sex {
        BiologicalSex::Male => 5.0,
        BiologicalSex::Female => -161.0,
    }
}

/// Whole years between `dob` and `now`. A birth date after `now` counts as 0.
pub fn age_in_years(dob: NaiveDate, now: NaiveDate) -> u32 {
    now.years_since(dob).unwrap_or(0)
}

pub fn daily_protein_grams(weight_kg: f64, height_cm: f64, age: u32, sex: BiologicalSex) -> f64 {
    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + sex_offset(sex);
    let tdee = bmr * ACTIVITY_MULTIPLIER;
    let grams = tdee * PROTEIN_SHARE / KCAL_PER_GRAM;

    if age >= SENIOR_AGE {
        grams * SENIOR_BOOST
    } else {
        grams
    }
}

/// Integer target in grams. Incomplete profiles get [`DEFAULT_TARGET_GRAMS`];
/// complete ones never go below [`MIN_TARGET_GRAMS`].
pub fn compute_target(profile: &BiometricProfile, now: NaiveDate) -> u32 {
    let Some((dob, height_cm, weight_kg)) = profile.measurements() else {
        return DEFAULT_TARGET_GRAMS;
    };

    let age = age_in_years(dob, now);
    let grams = daily_protein_grams(weight_kg, height_cm, age, profile.sex).round();

    if grams <= f64::from(MIN_TARGET_GRAMS) {
        MIN_TARGET_GRAMS
    } else if grams >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        grams as u32
    }
}

/// Without a birth date nothing can be stale.
pub fn is_stale(cached_age: Option<u32>, profile: &BiometricProfile, now: NaiveDate) -> bool {
    match profile.date_of_birth {
        Some(dob) => cached_age != Some(age_in_years(dob, now)),
        None => false,
    }
}

pub fn recompute(profile: &BiometricProfile, now: NaiveDate) -> Option<GoalRecord> {
    let (dob, _, _) = profile.measurements()?;
    Some(GoalRecord {
        target_grams: compute_target(profile, now),
        last_computed_age: Some(age_in_years(dob, now)),
    })
}
