use crate::domain::model::{
    BiologicalSex, BiometricProfile, GoalRecord, HEIGHT_RANGE_CM, WEIGHT_RANGE_KG,
};
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is static"));

/// Profile file read by the CLI, e.g.
///
/// ```toml
/// [profile]
/// date_of_birth = "1990-04-12"
/// height_cm = 175.0
/// weight_kg = 70.0
/// sex = "male"
///
/// [goal]
/// target_grams = 162
/// last_computed_age = 35
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub profile: ProfileSection,
    pub goal: Option<GoalSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSection {
    pub date_of_birth: Option<NaiveDate>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub sex: Option<BiologicalSex>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSection {
    pub target_grams: Option<u32>,
    pub last_computed_age: Option<u32>,
}

impl ProfileConfig {
    /// 從 TOML 檔案載入
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IntakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析，支援 ${VAR} 環境變數
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| IntakeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn biometric_profile(&self) -> BiometricProfile {
        BiometricProfile {
            date_of_birth: self.profile.date_of_birth,
            height_cm: self.profile.height_cm,
            weight_kg: self.profile.weight_kg,
            sex: self.profile.sex.unwrap_or_default(),
        }
    }

    pub fn cached_goal(&self) -> GoalRecord {
        let defaults = GoalRecord::default();
        match &self.goal {
            Some(goal) => GoalRecord {
                target_grams: goal.target_grams.unwrap_or(defaults.target_grams),
                last_computed_age: goal.last_computed_age,
            },
            None => defaults,
        }
    }
}

impl Validate for ProfileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(height) = self.profile.height_cm {
            let (min, max) = HEIGHT_RANGE_CM;
            validation::validate_range("profile.height_cm", height, min, max)?;
        }
        if let Some(weight) = self.profile.weight_kg {
            let (min, max) = WEIGHT_RANGE_KG;
            validation::validate_range("profile.weight_kg", weight, min, max)?;
        }
        if let Some(goal) = &self.goal {
            if let Some(target) = goal.target_grams {
                validation::validate_range("goal.target_grams", target, 1, 1000)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_profile() {
        let toml_content = r#"
[profile]
date_of_birth = "1990-04-12"
height_cm = 175.0
weight_kg = 70.5
sex = "female"

[goal]
target_grams = 140
last_computed_age = 36
"#;

        let config = ProfileConfig::from_toml_str(toml_content).unwrap();
        let profile = config.biometric_profile();

        assert_eq!(profile.date_of_birth, NaiveDate::from_ymd_opt(1990, 4, 12));
        assert_eq!(profile.weight_kg, Some(70.5));
        assert_eq!(profile.sex, BiologicalSex::Female);
        assert_eq!(config.cached_goal().last_computed_age, Some(36));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_incomplete_profile() {
        let config = ProfileConfig::from_toml_str("").unwrap();
        assert!(!config.biometric_profile().is_complete());
        assert_eq!(config.cached_goal(), GoalRecord::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PROTEIN_INTAKE_TEST_WEIGHT", "82.0");

        let toml_content = r#"
[profile]
weight_kg = ${PROTEIN_INTAKE_TEST_WEIGHT}
"#;

        let config = ProfileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.profile.weight_kg, Some(82.0));

        std::env::remove_var("PROTEIN_INTAKE_TEST_WEIGHT");
    }

    #[test]
    fn test_out_of_range_height_rejected() {
        let config = ProfileConfig::from_toml_str("[profile]\nheight_cm = 1750.0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(IntakeError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_reports_parse_error() {
        let result = ProfileConfig::from_toml_str("[profile\nheight_cm = ");
        assert!(matches!(
            result,
            Err(IntakeError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[profile]\ndate_of_birth = \"2001-10-16\"\nsex = \"male\"\n")
            .unwrap();

        let config = ProfileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.profile.sex, Some(BiologicalSex::Male));
    }
}
