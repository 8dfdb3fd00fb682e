mod commands;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{CommandFactory, Parser, ValueEnum};
use dialoguer::Password;
use itc_adapters::{ItcAnalyticsGateway, UreqSession};
use itc_core::{AppId, Config, Credentials, ReportWindow};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const USAGE_EXIT_CODE: i32 = -1;
const REPORT_FAILED_EXIT_CODE: i32 = -2;

#[derive(Parser)]
#[command(name = "itc-analytics", version)]
#[command(about = "Export iTunes Connect app analytics as CSV", long_about = None)]
struct Cli {
    /// Report to generate
    #[arg(value_enum)]
    report: ReportKind,

    /// Apple ID used to sign in to iTunes Connect
    login: String,

    /// Numeric App Store identifier of the app
    app_id: String,

    /// Last day of the report (defaults to today, UTC)
    #[arg(long, value_name = "YYYY-MM-DD")]
    end_date: Option<NaiveDate>,

    /// First day of the measures report
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,

    /// HTTP proxy, overrides ITC_PROXY and the config file
    #[arg(long)]
    proxy: Option<String>,

    /// Log requests and responses to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportKind {
    Measures,
    AllTime,
    Retention,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) if error.use_stderr() => {
            error.print().ok();
            std::process::exit(USAGE_EXIT_CODE);
        }
        Err(error) => error.exit(),
    };

    if let Err(error) = init_tracing(cli.verbose) {
        eprintln!("failed to initialise logging: {}", error);
    }

    std::process::exit(run(cli));
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    let mut filter = EnvFilter::from_default_env();
    for target in ["itc_analytics", "itc_adapters"] {
        filter = filter.add_directive(format!("{}={}", target, level).parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn run(cli: Cli) -> i32 {
    let app_id = match AppId::parse(&cli.app_id) {
        Ok(app_id) => app_id,
        Err(error) => return usage_error(&format!("Invalid App ID: {}", error)),
    };

    let end_date = cli.end_date.unwrap_or_else(|| Utc::now().date_naive());
    if let Some(start_date) = cli.start_date {
        if start_date > end_date {
            return usage_error("--start-date must not be after --end-date");
        }
        if cli.report != ReportKind::Measures {
            warn!("--start-date only applies to the measures report, ignoring it");
        }
    }

    let password = match prompt_password() {
        Ok(password) => password,
        Err(error) => {
            eprintln!("Could not read password: {:#}", error);
            return USAGE_EXIT_CODE;
        }
    };
    let credentials = Credentials::new(cli.login.clone(), password);

    match generate_report(&cli, &app_id, end_date, credentials) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Report failed: {:#}", error);
            eprintln!("{:?}", error);
            REPORT_FAILED_EXIT_CODE
        }
    }
}

fn usage_error(message: &str) -> i32 {
    eprintln!("{}", message);
    eprintln!("{}", Cli::command().render_usage());
    USAGE_EXIT_CODE
}

fn prompt_password() -> Result<String> {
    Password::new()
        .with_prompt("iTunes Connect Password")
        .interact()
        .context("password prompt failed")
}

fn generate_report(
    cli: &Cli,
    app_id: &AppId,
    end_date: NaiveDate,
    credentials: Credentials,
) -> Result<()> {
    let config = Config::load().unwrap_or_else(|error| {
        warn!(%error, "failed to load config, using defaults");
        Config::default()
    });

    let endpoints = config
        .endpoints()
        .context("invalid endpoint configuration")?;
    let proxy = config.resolve_proxy(cli.proxy.clone());
    let session =
        UreqSession::new(proxy.as_deref()).context("failed to set up the HTTP session")?;
    let mut gateway = ItcAnalyticsGateway::new(session, credentials, endpoints);

    let output = std::io::stdout().lock();

    match cli.report {
        ReportKind::Measures => {
            let window = match cli.start_date {
                Some(start_date) => ReportWindow::between(start_date, end_date),
                None => ReportWindow::ending(end_date),
            };
            commands::measures(
                &mut gateway,
                app_id,
                window,
                &config.measure_names(),
                output,
            )
        }
        ReportKind::AllTime => commands::all_time(&mut gateway, app_id, output),
        ReportKind::Retention => commands::retention(&mut gateway, app_id, end_date, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_arguments() {
        let cli = Cli::try_parse_from(["itc-analytics", "all-time", "dev@example.com", "12345"])
            .unwrap();

        assert_eq!(cli.report, ReportKind::AllTime);
        assert_eq!(cli.login, "dev@example.com");
        assert_eq!(cli.app_id, "12345");
        assert_eq!(cli.end_date, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_report_dates() {
        let cli = Cli::try_parse_from([
            "itc-analytics",
            "measures",
            "dev@example.com",
            "12345",
            "--start-date",
            "2015-04-01",
            "--end-date",
            "2015-04-29",
        ])
        .unwrap();

        assert_eq!(cli.start_date, NaiveDate::from_ymd_opt(2015, 4, 1));
        assert_eq!(cli.end_date, NaiveDate::from_ymd_opt(2015, 4, 29));
    }

    #[test]
    fn rejects_unknown_report() {
        let result = Cli::try_parse_from(["itc-analytics", "sales", "dev@example.com", "12345"]);

        assert!(result.is_err());
    }

    #[test]
    fn missing_app_id_is_a_usage_error() {
        let error = Cli::try_parse_from(["itc-analytics", "retention", "dev@example.com"])
            .err()
            .unwrap();

        assert!(error.use_stderr());
    }

    #[test]
    fn invalid_app_id_exits_before_prompting() {
        let cli =
            Cli::try_parse_from(["itc-analytics", "measures", "dev@example.com", "abc"]).unwrap();

        assert_eq!(run(cli), USAGE_EXIT_CODE);
    }

    #[test]
    fn start_after_end_is_a_usage_error() {
        let cli = Cli::try_parse_from([
            "itc-analytics",
            "measures",
            "dev@example.com",
            "12345",
            "--start-date",
            "2015-05-01",
            "--end-date",
            "2015-04-29",
        ])
        .unwrap();

        assert_eq!(run(cli), USAGE_EXIT_CODE);
    }
}
