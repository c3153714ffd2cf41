use crate::config::toml_config::ProfileConfig;
use crate::domain::model::BiologicalSex;
use crate::utils::error::Result;
use crate::utils::validation::{self, parse_date, Validate};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "protein-intake")]
#[command(about = "Parse spoken protein entries and compute daily protein goals")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Extract an amount and label from a transcript
    Parse {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Compute the daily protein goal for a profile
    Goal(GoalArgs),
    /// Check whether the goal cached in a profile file is out of date
    Check {
        #[arg(short, long)]
        config: PathBuf,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct GoalArgs {
    /// Profile TOML file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub dob: Option<NaiveDate>,

    #[arg(long)]
    pub height: Option<f64>,

    #[arg(long)]
    pub weight: Option<f64>,

    /// male or female
    #[arg(long)]
    pub sex: Option<BiologicalSex>,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,
}

impl GoalArgs {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn resolve(&self, today: NaiveDate) -> Result<ProfileConfig> {
        let mut config = match &self.config {
            Some(path) => ProfileConfig::from_file(path)?,
            None => ProfileConfig::default(),
        };

        if self.dob.is_some() {
            config.profile.date_of_birth = self.dob;
        }
        if self.height.is_some() {
            config.profile.height_cm = self.height;
        }
        if self.weight.is_some() {
            config.profile.weight_kg = self.weight;
        }
        if self.sex.is_some() {
            config.profile.sex = self.sex;
        }

        config.validate()?;
        if let Some(dob) = config.profile.date_of_birth {
            validation::validate_not_after("profile.date_of_birth", dob, today)?;
        }
        Ok(config)
    }
}
