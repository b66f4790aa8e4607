use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::Parser;
use otp_entry_types::OtpBuffer;
use otp_entry_tui::{OtpEntryConfig, TuiOptions};
use otp_entry_util::{PreferencesPayload, UserPreferences, expand_tilde};
use serde::Serialize;
use tracing::{info, warn};

/// Collect a six-digit one-time passcode in the terminal.
#[derive(Debug, Parser)]
#[command(name = "otp-entry", version, about)]
struct Cli {
    /// Theme id or alias (dracula, nord, ansi256)
    #[arg(long)]
    theme: Option<String>,

    /// Submit as soon as all six digits are entered
    #[arg(long)]
    auto_submit: bool,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,

    /// Print the submitted code as JSON
    #[arg(long)]
    json: bool,

    /// Persist --theme and --auto-submit as the new defaults
    #[arg(long)]
    save: bool,
}

#[derive(Debug, Serialize)]
struct SubmittedCode {
    code: OtpBuffer,
}

/// Settings after layering CLI flags over persisted preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    theme: Option<String>,
    auto_submit: bool,
}

fn resolve_settings(cli: &Cli, preferences: &PreferencesPayload) -> Settings {
    Settings {
        theme: cli.theme.clone().or_else(|| preferences.preferred_theme.clone()),
        auto_submit: cli.auto_submit || preferences.auto_submit,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref().map(expand_tilde))?;

    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        warn!(error = %error, "preferences unavailable; using in-memory defaults");
        UserPreferences::ephemeral()
    });
    let settings = resolve_settings(&cli, &preferences.snapshot());
    if cli.save {
        preferences.set_preferred_theme(cli.theme.clone())?;
        preferences.set_auto_submit(cli.auto_submit)?;
        info!(path = %preferences.path().display(), "preferences saved");
    }

    let options = TuiOptions {
        preferred_theme: settings.theme,
        auto_submit: settings.auto_submit,
        entry: OtpEntryConfig::new(|code| info!(digits = code.len(), "verification code complete")),
    };

    let Some(code) = otp_entry_tui::run(options).await? else {
        bail!("passcode entry cancelled");
    };

    if cli.json {
        let code = OtpBuffer::try_from(code).context("submitted code is not a valid passcode")?;
        println!("{}", serde_json::to_string(&SubmittedCode { code })?);
    } else {
        println!("{code}");
    }
    Ok(())
}

fn init_tracing(log_file: Option<PathBuf>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
