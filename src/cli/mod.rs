//! Command-line interface for the online catalog.
//!
//! Every command reads a catalog JSON file (the configured catalog unless
//! `--input` is given), prepares it, and reports on it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::adapters::{CachingSizeResolver, HttpSizeResolver};
use crate::catalog::{
    codec, filter_series_by_ministry, sort_series_by_name, sort_series_newest_to_oldest,
    sort_series_oldest_to_newest, Catalog, CatalogSeries, DateOnly, Ministry, View,
};
use crate::config;
use crate::util::ReportSink;
use crate::validator::{self, ValidationOptions};

/// online - Word of Life catalog tools
#[derive(Parser, Debug)]
#[command(name = "online")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a catalog and write it back out as JSON
    Dump {
        /// Catalog file (defaults to the configured catalog)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout if not provided or "-")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a catalog for problems; exits with status 1 when invalid
    Validate {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where findings are written (defaults to the configured level)
        #[arg(short, long, value_enum)]
        level: Option<LevelArg>,

        /// Also require unique message names
        #[arg(long)]
        strict_names: bool,
    },

    /// List the series visible in a view
    Series {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "public")]
        view: ViewArg,

        /// Only series of this ministry (e.g. wol, core, tbo)
        #[arg(short, long)]
        ministry: Option<String>,

        #[arg(short, long, value_enum, default_value = "name")]
        sort: SortArg,
    },

    /// Show one series as seen in a view
    Show {
        /// Series name (exact)
        name: String,

        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "public")]
        view: ViewArg,
    },

    /// Print podcast items for recent public messages as JSON
    Podcast {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long, default_value = "wol")]
        ministry: String,

        /// How many days back to include
        #[arg(short, long, default_value = "90")]
        days: i64,

        /// Include messages on or after this date (YYYY-MM-DD) instead of --days
        #[arg(long)]
        since: Option<String>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Report level for CLI (maps to ReportSink)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LevelArg {
    Silent,
    Log,
    Stderr,
    Stdout,
}

impl From<LevelArg> for ReportSink {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Silent => ReportSink::Silent,
            LevelArg::Log => ReportSink::Log,
            LevelArg::Stderr => ReportSink::Stderr,
            LevelArg::Stdout => ReportSink::Stdout,
        }
    }
}

/// Published view for CLI (maps to View)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ViewArg {
    Public,
    Partner,
    Private,
    Raw,
}

impl From<ViewArg> for View {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Public => View::Public,
            ViewArg::Partner => View::Partner,
            ViewArg::Private => View::Private,
            ViewArg::Raw => View::Raw,
        }
    }
}

/// Series ordering for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Name,
    Oldest,
    Newest,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Dump { input, output } => dump_catalog(input, output).await,
            Commands::Validate {
                input,
                level,
                strict_names,
            } => validate_catalog(input, level, strict_names).await,
            Commands::Series {
                input,
                view,
                ministry,
                sort,
            } => list_series(input, view.into(), ministry, sort).await,
            Commands::Show { name, input, view } => show_series(&name, input, view.into()).await,
            Commands::Podcast {
                input,
                ministry,
                days,
                since,
            } => podcast_items(input, &ministry, days, since).await,
            Commands::Config => show_config().await,
        }
    }
}

/// Load the given catalog, or the configured one
async fn load_catalog(input: Option<PathBuf>) -> Result<Catalog> {
    let path = match input {
        Some(path) => path,
        None => config::catalog_path()?,
    };

    codec::load(&path)
        .await
        .with_context(|| format!("Failed to load catalog: {}", path.display()))
}

fn parse_ministry(text: &str) -> Result<Ministry> {
    match Ministry::parse(text) {
        Ministry::Unknown => anyhow::bail!("Unknown ministry: {}", text),
        ministry => Ok(ministry),
    }
}

/// Write the raw catalog as JSON
async fn dump_catalog(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(input).await?;

    match output {
        Some(path) if path.as_os_str() != "-" => {
            codec::save(&path, &catalog)
                .await
                .with_context(|| format!("Failed to write catalog: {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        _ => println!("{}", codec::to_json(&catalog)?),
    }

    Ok(())
}

/// Run the validator and summarize
async fn validate_catalog(
    input: Option<PathBuf>,
    level: Option<LevelArg>,
    strict_names: bool,
) -> Result<()> {
    let catalog = load_catalog(input).await?;

    let sink = match level {
        Some(level) => level.into(),
        None => config::config()?.report_sink,
    };
    let options = ValidationOptions { sink, strict_names };

    let (valid, report) = validator::validate(&catalog, options);

    if valid {
        eprintln!(
            "Catalog is valid ({} series, {} messages)",
            catalog.series.len(),
            catalog.messages.len()
        );
        Ok(())
    } else {
        if sink == ReportSink::Silent {
            eprint!("{}", report);
        }
        eprintln!("Catalog is invalid: {} problem(s)", report.size());
        std::process::exit(1);
    }
}

/// Print a table of series in a view
async fn list_series(
    input: Option<PathBuf>,
    view: View,
    ministry: Option<String>,
    sort: SortArg,
) -> Result<()> {
    let catalog = load_catalog(input).await?;
    let mut series = catalog.view_of(view);

    if let Some(text) = ministry {
        series = filter_series_by_ministry(&series, parse_ministry(&text)?);
    }

    match sort {
        SortArg::Name => sort_series_by_name(&mut series),
        SortArg::Oldest => sort_series_oldest_to_newest(&mut series),
        SortArg::Newest => sort_series_newest_to_oldest(&mut series),
    }

    if series.is_empty() {
        println!("No series visible in the {} view", view);
        return Ok(());
    }

    println!("{:<26} {:<40} {:>5} {:<28}", "ID", "NAME", "MSGS", "DATES");
    println!("{}", "-".repeat(102));

    for seri in &mut series {
        let id = seri.view_id(view);
        println!(
            "{:<26} {:<40} {:>5} {:<28}",
            id,
            truncate(&seri.name, 40),
            seri.messages_in_view().len(),
            seri.date_string()
        );
    }

    println!();
    println!("{} series", series.len());

    Ok(())
}

/// Print one series with its messages
async fn show_series(name: &str, input: Option<PathBuf>, view: View) -> Result<()> {
    let catalog = load_catalog(input).await?;

    let mut seri: CatalogSeries = catalog
        .find_series_by_name(name)
        .ok_or_else(|| anyhow::anyhow!("Series not found: {}", name))?
        .view_of(view);

    if !seri.visibility.is_visible_in(view) {
        anyhow::bail!("Series '{}' is not visible in the {} view", name, view);
    }

    println!("  ID: {}", seri.view_id(view));
    println!("  Name: {}", seri.name);
    println!("  Ministry: {}", seri.ministry().description());
    println!("  Dates: {}", seri.date_string());
    println!("  Visibility: {}", seri.visibility);
    if !seri.speakers().is_empty() {
        println!("  Speakers: {}", seri.speaker_string());
    }
    if !seri.description.is_empty() {
        println!("  Description: {}", seri.description);
    }

    println!();
    println!("{:<5} {:<12} {:<40} {:<30}", "#", "DATE", "MESSAGE", "SPEAKERS");
    for msg in seri.messages_in_view() {
        let index = match seri.index_of(msg) {
            index if index > 0 => index.to_string(),
            _ => "-".to_string(),
        };
        println!(
            "{:<5} {:<12} {:<40} {:<30}",
            index,
            msg.date,
            truncate(&msg.name, 40),
            msg.speaker_string()
        );
    }

    if !seri.merged_resources().is_empty() {
        println!();
        println!("Resources:");
        for resource in seri.merged_resources() {
            println!(
                "  {} ({}): {}",
                resource.display_name(),
                resource.classifier(),
                resource.url
            );
        }
    }

    Ok(())
}

/// One podcast entry
#[derive(Debug, Serialize)]
struct PodcastItem {
    title: String,
    date: DateOnly,
    date_string: String,
    speakers: String,
    description: String,
    audio: String,
    /// Bytes; -1 when the size could not be determined
    size: i64,
    transcript: String,
}

/// Print JSON podcast items for recent public messages with audio
async fn podcast_items(
    input: Option<PathBuf>,
    ministry: &str,
    days: i64,
    since: Option<String>,
) -> Result<()> {
    let catalog = load_catalog(input).await?;
    let ministry = parse_ministry(ministry)?;
    let today = DateOnly::today();

    let since = match since {
        Some(text) => codec::parse_date(&text)?,
        None => days_before(chrono::Local::now(), days)?,
    };

    let http = HttpSizeResolver::new(config::config()?.http_timeout)?;
    let resolver = CachingSizeResolver::new(http);

    let mut items = Vec::new();
    for msg in catalog.recent_messages(ministry, since) {
        if !msg.is_visible_in(View::Public) || !msg.has_audio() {
            continue;
        }

        items.push(PodcastItem {
            title: msg.name.clone(),
            date: msg.date,
            date_string: msg.date_string(today),
            speakers: msg.speaker_string(),
            description: msg.description.clone(),
            audio: msg.audio_url().to_string(),
            size: msg.audio_size(&resolver).await,
            transcript: msg.transcript_url("text"),
        });
    }

    println!("{}", serde_json::to_string_pretty(&items)?);
    eprintln!("{} podcast item(s) since {}", items.len(), since);

    Ok(())
}

/// The date `days` days before `now`
fn days_before<Tz: TimeZone>(now: DateTime<Tz>, days: i64) -> Result<DateOnly> {
    let start = Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .with_context(|| format!("--days {} is out of range", days))?;
    Ok(DateOnly::from_datetime(&start))
}

/// Show the resolved configuration (for debugging)
async fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("Online Catalog Configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    println!("  Catalog: {}", cfg.catalog.display());
    println!();
    println!("HTTP timeout: {}s", cfg.http_timeout.as_secs());
    println!("Report level: {}", cfg.report_sink);

    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
