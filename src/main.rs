use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use courtwatch::{
    AvailabilityChecker, CheckerConfig, NotifyMode,
    availability::TimeFormat,
    config::{DEFAULT_CONFIG_DIR, LoadFromEnv, NotificationEnv},
    notifier::PushoverCredentials,
    requests::{DEFAULT_TIMEOUT, RequestClient},
    state::StateLayout,
    utils::{DATE_FORMAT, format_date},
};
use log::{LevelFilter, info, warn};

/// Check tennis court availability across multiple venues.
#[derive(Parser)]
#[command(name = "courtwatch", version)]
struct Cli {
    /// Date(s) to check (YYYY-MM-DD). Defaults to today.
    #[arg(long = "date", num_args = 1.., value_parser = parse_date)]
    dates: Vec<String>,

    /// Venue ids to check. Defaults to every enabled venue.
    #[arg(long, num_args = 1..)]
    venues: Vec<String>,

    /// Notify whenever courts are available, not just for new slots.
    #[arg(long)]
    notify_always: bool,

    /// Pushover user key (falls back to PUSHOVER_USER).
    #[arg(long)]
    pushover_user: Option<String>,

    /// Pushover API token (falls back to PUSHOVER_TOKEN).
    #[arg(long)]
    pushover_token: Option<String>,

    /// Disable notifications and just log results.
    #[arg(long)]
    no_notify: bool,

    /// Directory holding venues.json and saved state.
    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    config_dir: PathBuf,

    /// Keep a single availability_state.json instead of one file per date.
    #[arg(long)]
    single_state_file: bool,

    #[arg(long, value_enum, default_value_t = TimeFormatArg::TwelveHour)]
    time_format: TimeFormatArg,

    /// Per-request timeout for venue and notification calls.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TimeFormatArg {
    /// 7am, 2pm
    #[value(name = "12h")]
    TwelveHour,
    /// 07:00, 14:00
    #[value(name = "24h")]
    TwentyFourHour,
}

impl From<TimeFormatArg> for TimeFormat {
    fn from(arg: TimeFormatArg) -> Self {
        match arg {
            TimeFormatArg::TwelveHour => TimeFormat::TwelveHour,
            TimeFormatArg::TwentyFourHour => TimeFormat::TwentyFourHour,
        }
    }
}

fn parse_date(raw: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn credentials(cli: &Cli, env: NotificationEnv) -> Option<PushoverCredentials> {
    PushoverCredentials::from_parts(
        cli.pushover_user.clone().or(env.pushover_user),
        cli.pushover_token.clone().or(env.pushover_token),
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Also pulls in .env, so RUST_LOG from there reaches the logger.
    let env = NotificationEnv::load_from_env();
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let env = env.unwrap_or_else(|e| {
        warn!("{e:#}");
        NotificationEnv::default()
    });

    let layout = if cli.single_state_file {
        StateLayout::SingleFile
    } else {
        StateLayout::PerDate
    };
    let mut config = CheckerConfig::from_dir(&cli.config_dir, layout);
    config.notify_mode = if cli.notify_always {
        NotifyMode::Always
    } else {
        NotifyMode::OnChanges
    };
    config.time_format = cli.time_format.into();
    config.credentials = if cli.no_notify {
        None
    } else {
        credentials(&cli, env)
    };
    if !cli.no_notify && config.credentials.is_none() {
        warn!("Pushover credentials not set. Notifications are disabled.");
    }

    let request_client = RequestClient::new(Duration::from_secs(cli.timeout_secs))
        .context("couldn't set up the http client")?;

    let dates = if cli.dates.is_empty() {
        vec![Local::now().format(DATE_FORMAT).to_string()]
    } else {
        cli.dates.clone()
    };
    if dates.len() > 1 && layout == StateLayout::SingleFile {
        warn!("Checking several dates with a single state file: later dates overwrite earlier baselines");
    }

    let checker = AvailabilityChecker::from_config(config, request_client);

    let mut success = false;
    for date in &dates {
        info!("Checking availability for {}...", format_date(date));
        let result = checker.check_all_venues(date, &cli.venues).await;
        success |= result.is_success();
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
