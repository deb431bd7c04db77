//! Life Spent CLI
//!
//! Command-line interface for life calculations, share links and batch runs

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use life_spent::{
    batch::BatchRunner,
    calculate, project,
    format::{format_age, format_band, format_date},
    person::{load_people, BirthInfo, Gender},
    settings::Settings,
    share::{build_share_url, parse_share_params, ShareParams},
    validation::validate_birth_info,
    ImpactData, LifeCalculation, Locale,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "life_spent", version, about = "How much of your expected lifespan have you used?")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate and print a summary
    Calc {
        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of a text summary
        #[arg(long)]
        json: bool,

        /// Settings file used for anything omitted [default: life-spent-settings.json]
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Remember this input in the settings file
        #[arg(long)]
        save: bool,

        /// Display locale tag, e.g. en, zh-CN, fr [default: saved, then $LANG]
        #[arg(long)]
        locale: Option<String>,
    },
    /// Show or change saved display preferences
    Prefs {
        /// Settings file [default: life-spent-settings.json]
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Switch between dark and light theme
        #[arg(long)]
        toggle_theme: bool,

        /// Store a display locale tag
        #[arg(long)]
        locale: Option<String>,
    },
    /// Print a share link for the given input
    Share {
        #[command(flatten)]
        input: InputArgs,

        /// Base URL for the link
        #[arg(long, default_value = "https://lifespent.app/")]
        base: String,
    },
    /// Open a share link (full URL or query string) and print its summary
    Open {
        link: String,

        #[arg(long)]
        json: bool,

        #[arg(long)]
        locale: Option<String>,
    },
    /// Calculate for every person in a CSV file
    Batch {
        input: PathBuf,
        output: PathBuf,
    },
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Birth date as YYYY-MM-DD or YYYYMMDD
    #[arg(long, value_parser = parse_birth)]
    birth: Option<NaiveDate>,

    /// male or female
    #[arg(long)]
    gender: Option<Gender>,

    /// Custom life expectancy (years)
    #[arg(long)]
    life_expectancy: Option<f64>,

    /// Custom population median age (years)
    #[arg(long)]
    median_age: Option<f64>,
}

impl InputArgs {
    /// Build input from flags, falling back to saved settings for anything omitted
    fn birth_info(&self, fallback: Option<&Settings>) -> Result<BirthInfo> {
        let saved = fallback.and_then(Settings::birth_info);

        let birth_date = match (self.birth, &saved) {
            (Some(date), _) => date,
            (None, Some(info)) => info.birth_date,
            (None, None) => bail!("--birth is required"),
        };
        let gender = self
            .gender
            .or(saved.as_ref().map(|info| info.gender))
            .unwrap_or(Gender::Male);

        Ok(BirthInfo {
            birth_date,
            gender,
            life_expectancy: self
                .life_expectancy
                .or(saved.as_ref().and_then(|info| info.life_expectancy)),
            population_median_age: self
                .median_age
                .or(saved.as_ref().and_then(|info| info.population_median_age)),
        })
    }
}

fn parse_birth(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| life_spent::share::birth_string_to_date(s))
        .ok_or_else(|| format!("invalid birth date '{}', expected YYYY-MM-DD or YYYYMMDD", s))
}

/// Calculation plus impact data, as printed with --json
#[derive(Debug, Serialize)]
struct Report {
    calculation: LifeCalculation,
    impact: ImpactData,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let now = Utc::now();

    match cli.command {
        Command::Calc { input, json, settings, save, locale } => {
            let path = settings.unwrap_or_else(Settings::default_path);
            let saved = Settings::load_existing(&path)
                .with_context(|| format!("loading settings from {}", path.display()))?;
            let info = input.birth_info(saved.as_ref())?;
            validate_birth_info(&info, now)?;
            let locale = resolve_locale(locale.as_deref(), saved.as_ref());

            if save {
                let mut settings = saved.unwrap_or_default();
                settings.remember(&info);
                settings.locale = locale;
                settings
                    .save(&path)
                    .with_context(|| format!("saving settings to {}", path.display()))?;
            }

            run_report(&info, now, json, locale)
        }
        Command::Prefs { settings, toggle_theme, locale } => {
            let path = settings.unwrap_or_else(Settings::default_path);
            let mut prefs = Settings::load(&path)
                .with_context(|| format!("loading settings from {}", path.display()))?;

            if toggle_theme {
                prefs.theme = prefs.theme.toggle();
            }
            let changed = toggle_theme || locale.is_some();
            if let Some(tag) = locale {
                prefs.locale = Locale::resolve(&tag);
            }
            if changed {
                prefs
                    .save(&path)
                    .with_context(|| format!("saving settings to {}", path.display()))?;
            }

            println!("Settings: {}", path.display());
            println!("  Theme:  {:?}", prefs.theme);
            println!("  Locale: {} ({})", prefs.locale, prefs.locale.display_name());
            Ok(())
        }
        Command::Share { input, base } => {
            let info = input.birth_info(None)?;
            validate_birth_info(&info, now)?;
            println!("{}", build_share_url(&base, &ShareParams::from_birth_info(&info)));
            Ok(())
        }
        Command::Open { link, json, locale } => {
            let params = parse_share_params(&link, now)
                .ok_or_else(|| anyhow!("share link is missing or has invalid parameters"))?;
            let info = params
                .to_birth_info()
                .ok_or_else(|| anyhow!("share link has an invalid birth date"))?;
            run_report(&info, now, json, resolve_locale(locale.as_deref(), None))
        }
        Command::Batch { input, output } => run_batch(&input, &output, now),
    }
}

/// Locale from the flag, else the saved settings, else `$LANG`
fn resolve_locale(flag: Option<&str>, saved: Option<&Settings>) -> Locale {
    if let Some(tag) = flag {
        return Locale::resolve(tag);
    }
    if let Some(settings) = saved {
        return settings.locale;
    }
    std::env::var("LANG")
        .map(|tag| Locale::resolve(&tag))
        .unwrap_or_default()
}

fn run_report(info: &BirthInfo, now: DateTime<Utc>, json: bool, locale: Locale) -> Result<()> {
    let calculation = calculate(info, now);
    let impact = project(&calculation);

    if json {
        let report = Report { calculation, impact };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&calculation, &impact, locale);
    }
    Ok(())
}

fn print_summary(calc: &LifeCalculation, impact: &ImpactData, locale: Locale) {
    println!("Life Spent");
    println!("==========\n");
    println!("  Born:             {} ({})", format_date(calc.birth_date, locale), calc.gender);
    println!("  Current Age:      {}", format_age(calc.current_age));
    println!("  Life Expectancy:  {} years", calc.life_expectancy);
    println!("  Percent Spent:    {:.2}%", calc.percent_spent);
    println!("  Years Remaining:  {:.2}", calc.years_remaining);
    println!();

    println!("Relative to population median age {}:", calc.population_median_age);
    println!("  Older than about {:.1}% of people", calc.relative_age_percent.min(100.0));
    if calc.is_past_median() {
        println!("  {:.2} years past the median", -calc.years_to_median_age);
    } else {
        println!("  {:.2} years until the median", calc.years_to_median_age);
    }
    println!();

    println!("Weeks: {} of {} lived, {} left",
        impact.weeks_spent, impact.total_weeks, impact.weeks_remaining());
    println!();

    println!("Strata ({} of {} lived):", impact.strata_spent(), impact.strata.len());
    for stratum in &impact.strata {
        let mark = if stratum.spent { "x" } else { " " };
        println!("  [{}] {}", mark, format_band(stratum.start, stratum.end));
    }
    println!();

    let passed: Vec<String> = impact
        .thresholds
        .iter()
        .map(|t| format!("{}{}", t.age, if t.passed { "*" } else { "" }))
        .collect();
    println!("Thresholds ({} passed, * = passed): {}", impact.thresholds_passed(), passed.join(" "));
    println!();

    println!("Year grid: {} of {} cells", impact.grid_cells_spent, impact.grid_total_cells);
    println!("{:>12} {:>6} {:>8} {:>8}", "Band", "Px", "Spent", "Total");
    println!("{}", "-".repeat(38));
    for band in &impact.grid_bands {
        println!("{:>12} {:>6} {:>8} {:>8.2}",
            format!("{}-{}", band.start_age, band.end_age),
            band.size_px,
            band.cells_spent,
            band.cells_total,
        );
    }
}

fn run_batch(input: &Path, output: &Path, now: DateTime<Utc>) -> Result<()> {
    let start = Instant::now();
    println!("Loading people from {}...", input.display());

    let people = load_people(input).map_err(|e| anyhow!("loading {}: {}", input.display(), e))?;
    println!("Loaded {} people in {:?}", people.len(), start.elapsed());

    let rows = BatchRunner::default().run_batch(&people, now);

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("creating {}", output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let rejected = rows.iter().filter(|r| r.is_rejected()).count();
    println!("Output written to {} ({} rows, {} rejected) in {:?}",
        output.display(), rows.len(), rejected, start.elapsed());
    Ok(())
}
