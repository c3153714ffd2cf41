use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const HEIGHT_RANGE_CM: (f64, f64) = (30.0, 300.0);
pub const WEIGHT_RANGE_KG: (f64, f64) = (2.0, 650.0);

/// 從語音逐字稿擷取出的結果：份量（克）與顯示用標籤
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeMatch {
    pub amount: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    #[default]
    Male,
    Female,
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiologicalSex::Male => write!(f, "male"),
            BiologicalSex::Female => write!(f, "female"),
        }
    }
}

impl FromStr for BiologicalSex {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            other => Err(format!("unknown biological sex '{}', expected male or female", other)),
        }
    }
}

/// 計算目標用的身體資料，由個人檔案流程擁有；計算器只讀取
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiometricProfile {
    pub date_of_birth: Option<NaiveDate>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub sex: BiologicalSex,
}

impl BiometricProfile {
    pub fn new(date_of_birth: NaiveDate, height_cm: f64, weight_kg: f64, sex: BiologicalSex) -> Self {
        Self {
            date_of_birth: Some(date_of_birth),
            height_cm: Some(height_cm),
            weight_kg: Some(weight_kg),
            sex,
        }
    }

    /// Height and weight only count when they are positive, finite numbers.
    pub fn measurements(&self) -> Option<(NaiveDate, f64, f64)> {
        let usable = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);
        Some((
            self.date_of_birth?,
            usable(self.height_cm)?,
            usable(self.weight_kg)?,
        ))
    }

    pub fn is_complete(&self) -> bool {
        self.measurements().is_some()
    }

    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(dob) = update.date_of_birth {
            self.date_of_birth = Some(dob);
        }
        if let Some(height) = update.height_cm {
            self.height_cm = Some(height);
        }
        if let Some(weight) = update.weight_kg {
            self.weight_kg = Some(weight);
        }
        if let Some(sex) = update.sex {
            self.sex = sex;
        }
    }
}

/// 部分欄位的個人檔案修改
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub date_of_birth: Option<NaiveDate>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub sex: Option<BiologicalSex>,
}

impl Validate for ProfileUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(height) = self.height_cm {
            let (min, max) = HEIGHT_RANGE_CM;
            validate_range("height_cm", height, min, max)?;
        }
        if let Some(weight) = self.weight_kg {
            let (min, max) = WEIGHT_RANGE_KG;
            validate_range("weight_kg", weight, min, max)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub target_grams: u32,
    pub last_computed_age: Option<u32>,
}

impl Default for GoalRecord {
    fn default() -> Self {
        Self {
            target_grams: crate::core::goal::DEFAULT_TARGET_GRAMS,
            last_computed_age: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub profile: BiometricProfile,
    pub goal: GoalRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub user_id: String,
    pub amount: f64,
    pub label: String,
    pub logged_at: NaiveDateTime,
    pub day: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeEntry {
    pub id: EntryId,
    pub user_id: String,
    pub amount: f64,
    pub label: String,
    pub logged_at: NaiveDateTime,
    pub day: NaiveDate,
}

impl IntakeEntry {
    pub fn from_new(id: EntryId, entry: NewEntry) -> Self {
        Self {
            id,
            user_id: entry.user_id,
            amount: entry.amount,
            label: entry.label,
            logged_at: entry.logged_at,
            day: entry.day,
        }
    }
}
