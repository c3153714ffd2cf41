use clap::Parser;
use protein_intake::config::cli::{Command, GoalArgs};
use protein_intake::core::goal;
use protein_intake::utils::error::{ErrorSeverity, IntakeError, Result};
use protein_intake::utils::logger::{self, LogFormat};
use protein_intake::utils::validation::Validate;
use protein_intake::{extract, CliConfig, ProfileConfig};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let format = if config.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(config.verbose, format);

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 依嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run(config: &CliConfig) -> Result<()> {
    match &config.command {
        Command::Parse { words } => run_parse(&words.join(" "), config.json),
        Command::Goal(args) => run_goal(args, config.json),
        Command::Check { config: path, today } => {
            run_check(path, today.unwrap_or_else(local_today), config.json)
        }
    }
}

fn local_today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn run_parse(transcript: &str, json: bool) -> Result<()> {
    let parsed = extract(transcript).ok_or_else(|| IntakeError::NoExtractableAmount {
        transcript: transcript.to_string(),
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        println!("🍗 {}g {}", parsed.amount, parsed.label);
    }
    Ok(())
}

fn run_goal(args: &GoalArgs, json: bool) -> Result<()> {
    let today = args.today.unwrap_or_else(local_today);
    let profile = args.resolve(today)?.biometric_profile();

    let target = goal::compute_target(&profile, today);
    let age = profile
        .date_of_birth
        .map(|dob| goal::age_in_years(dob, today));

    if !profile.is_complete() {
        tracing::warn!("⚠️ Profile incomplete, using the default goal");
    }

    if json {
        let output = serde_json::json!({
            "target_grams": target,
            "age": age,
            "complete": profile.is_complete(),
            "sex": profile.sex,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match age {
            Some(age) if profile.is_complete() => {
                println!("🎯 Daily goal: {}g (age {}, {})", target, age, profile.sex)
            }
            _ => println!("🎯 Daily goal: {}g (default, profile incomplete)", target),
        }
    }
    Ok(())
}

fn run_check(path: &Path, today: chrono::NaiveDate, json: bool) -> Result<()> {
    tracing::info!("📁 Loading profile from: {}", path.display());
    let config = ProfileConfig::from_file(path)?;
    config.validate()?;

    let profile = config.biometric_profile();
    let cached = config.cached_goal();
    let stale = profile.is_complete()
        && goal::is_stale(cached.last_computed_age, &profile, today);
    let fresh = goal::recompute(&profile, today).unwrap_or(cached);

    if json {
        let output = serde_json::json!({
            "stale": stale,
            "cached": cached,
            "current": fresh,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if stale {
        println!(
            "🔄 Goal is out of date: cached {}g at age {:?}, now {}g at age {:?}",
            cached.target_grams,
            cached.last_computed_age,
            fresh.target_grams,
            fresh.last_computed_age
        );
    } else {
        println!("✅ Goal is up to date: {}g", cached.target_grams);
    }
    Ok(())
}
