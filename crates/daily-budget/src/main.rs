use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use daily_budget_core::prelude::*;
use daily_budget_core::{RecordLoader, DATE_FORMAT};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "~/.config/daily-budget/config.json";
const DEFAULT_LIMIT: f64 = 1000.0;
const DEFAULT_CURRENCY: &str = "rub";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    #[default]
    Cash,
    Calories,
}

#[derive(Parser, Debug)]
#[clap(author = "Red", version, about)]
struct Args {
    #[arg(short = 'v')]
    verbose: bool,

    /// What is being tracked
    #[arg(short = 'k', long = "kind", value_enum)]
    kind: Option<Kind>,

    /// Daily limit, in rubles or kcal
    #[arg(short = 'l', long = "limit")]
    limit: Option<f64>,

    /// Currency for the cash report: rub, usd or eur
    #[arg(short = 'c', long = "currency")]
    currency: Option<String>,

    /// Inline record as AMOUNT|COMMENT[|DD.MM.YYYY], may be repeated
    #[arg(short = 'r', long = "record")]
    records: Vec<String>,

    /// JSON-lines file with one record per line
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    #[arg(long = "config")]
    config: Option<String>,

    /// Store the effective kind, limit and currency in the config file
    #[arg(long = "save-config")]
    save_config: bool,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
struct BudgetConfig {
    kind: Option<Kind>,
    limit: Option<f64>,
    currency: Option<String>,
}

fn get_config_path(explicit: Option<&str>) -> PathBuf {
    let path = explicit.unwrap_or(DEFAULT_CONFIG_PATH);
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn load_config(path: &Path) -> Result<BudgetConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(BudgetConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

fn save_config(path: &Path, config: &BudgetConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}

/// Parses `AMOUNT|COMMENT[|DD.MM.YYYY]`. Only the amount is mandatory.
fn parse_record_arg(arg: &str, clock: &dyn Clock) -> Result<Record> {
    let mut parts = arg.splitn(3, '|');

    let amount_str = parts.next().unwrap_or_default().trim();
    let amount: f64 = amount_str
        .parse()
        .with_context(|| format!("Invalid amount '{}' in record '{}'", amount_str, arg))?;
    let comment = parts.next().unwrap_or_default().trim();
    let date = parts.next().map(str::trim);

    Record::with_clock(amount, comment, date, clock)
        .with_context(|| format!("Invalid record '{}'", arg))
}

enum Budget {
    Cash(CashCalculator),
    Calories(CaloriesCalculator),
}

impl Budget {
    fn new(kind: Kind, limit: f64) -> Self {
        match kind {
            Kind::Cash => Budget::Cash(CashCalculator::new(limit)),
            Kind::Calories => Budget::Calories(CaloriesCalculator::new(limit)),
        }
    }

    fn tracker(&self) -> &dyn Tracker {
        match self {
            Budget::Cash(calculator) => calculator,
            Budget::Calories(calculator) => calculator,
        }
    }

    fn tracker_mut(&mut self) -> &mut dyn Tracker {
        match self {
            Budget::Cash(calculator) => calculator,
            Budget::Calories(calculator) => calculator,
        }
    }

    fn advice(&self, currency: &str) -> String {
        match self {
            Budget::Cash(calculator) => calculator.get_today_cash_remained(currency),
            Budget::Calories(calculator) => calculator.get_calories_remained(),
        }
    }
}

fn render_report(tracker: &dyn Tracker, advice: &str) -> Result<String, fmt::Error> {
    let calculator = tracker.calculator();
    let mut report = String::new();

    writeln!(
        report,
        "Today ({}): {} of {}",
        calculator.today().format(DATE_FORMAT),
        tracker.get_today_stats(),
        calculator.limit()
    )?;
    writeln!(report, "Remaining: {}", tracker.get_rest())?;
    writeln!(report, "Last 7 days: {}", tracker.get_week_stats())?;
    for (day, total) in calculator.get_week_breakdown() {
        writeln!(report, "  {}  {}", day.format(DATE_FORMAT), total)?;
    }
    writeln!(report)?;
    write!(report, "{}", advice)?;

    Ok(report)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config_path = get_config_path(args.config.as_deref());
    let config = load_config(&config_path).unwrap_or_else(|e| {
        tracing::warn!("Could not load config, using defaults: {:#}", e);
        BudgetConfig::default()
    });

    let kind = args.kind.or(config.kind).unwrap_or_default();
    let limit = args.limit.or(config.limit).unwrap_or(DEFAULT_LIMIT);
    let currency = args
        .currency
        .or(config.currency)
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    if args.save_config {
        let effective = BudgetConfig {
            kind: Some(kind),
            limit: Some(limit),
            currency: Some(currency.clone()),
        };
        save_config(&config_path, &effective)?;
        tracing::info!(path = %config_path.display(), "saved config");
    }

    let mut budget = Budget::new(kind, limit);

    if let Some(file) = &args.file {
        for record in RecordLoader::new().load_from_file(file)? {
            budget.tracker_mut().add_record(record);
        }
    }

    for arg in &args.records {
        let record = parse_record_arg(arg, &SystemClock)?;
        budget.tracker_mut().add_record(record);
    }

    let report = render_report(budget.tracker(), &budget.advice(&currency))?;
    println!("{}", report);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use daily_budget_core::Duration;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 20).unwrap()
    }

    #[test]
    fn test_parse_record_without_date() {
        let record = parse_record_arg("300|coffee", &FixedClock::new(today())).unwrap();

        assert_eq!(record.amount(), 300.0);
        assert_eq!(record.comment(), "coffee");
        assert_eq!(record.date(), today());
    }

    #[test]
    fn test_parse_record_with_date() {
        let record =
            parse_record_arg("1000 | birthday bar | 19.11.2023", &FixedClock::new(today()))
                .unwrap();

        assert_eq!(record.comment(), "birthday bar");
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2023, 11, 19).unwrap());
    }

    #[test]
    fn test_parse_record_amount_only() {
        let record = parse_record_arg("42.5", &FixedClock::new(today())).unwrap();

        assert_eq!(record.amount(), 42.5);
        assert_eq!(record.comment(), "");
    }

    #[test]
    fn test_parse_record_rejects_garbage() {
        let clock = FixedClock::new(today());

        assert!(parse_record_arg("lots|coffee", &clock).is_err());
        assert!(parse_record_arg("10|coffee|2023-11-19", &clock).is_err());
    }

    #[test]
    fn test_config_round_trip_through_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"{"kind": "calories", "limit": 2000}"#)
            .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(
            config,
            BudgetConfig {
                kind: Some(Kind::Calories),
                limit: Some(2000.0),
                currency: None,
            }
        );
    }

    #[test]
    fn test_missing_config_is_default() {
        let config = load_config(Path::new("/definitely/not/here.json")).unwrap();

        assert_eq!(config, BudgetConfig::default());
    }

    #[test]
    fn test_save_config_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = BudgetConfig {
            kind: Some(Kind::Cash),
            limit: Some(500.0),
            currency: Some("usd".to_string()),
        };

        save_config(&path, &config).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_save_config_failure_is_returned() {
        let not_a_dir = NamedTempFile::new().unwrap();
        let path = not_a_dir.path().join("config.json");

        let err = save_config(&path, &BudgetConfig::default()).unwrap_err();

        assert!(err.to_string().starts_with("Failed to create directory"));
    }

    #[test]
    fn test_render_report() {
        let mut calculator = CashCalculator::with_clock(1000.0, FixedClock::new(today()));
        calculator.add_record(Record::on(600.0, "groceries", today()));
        calculator.add_record(Record::on(50.0, "bus", today() - Duration::days(2)));

        let advice = calculator.get_today_cash_remained("rub");
        let report = render_report(&calculator, &advice).unwrap();

        assert!(report.starts_with(
            "Today (20.11.2023): 600 of 1000\nRemaining: 400\nLast 7 days: 650\n"
        ));
        assert!(report.contains("  18.11.2023  50\n"));
        assert!(report.ends_with("\n\nRemaining for today: 400.00 RUB"));
    }
}
