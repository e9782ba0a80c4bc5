use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use derive_more::{Display, Error};
use error_stack::{Report, ResultExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chart_signals::analysis::Analyzer;
use chart_signals::config::{self, AppConfig};
use chart_signals::feed::replay::ReplayFeed;
use chart_signals::feed::{PriceFeed, Tick, load_series};
use chart_signals::report::Reporter;
use chart_signals::report::json::JsonReporter;
use chart_signals::report::terminal::TerminalReporter;
use chart_signals::watch::analysis_loop;

#[derive(Debug, Display, Error)]
pub enum AppError {
    #[display("configuration error")]
    Config,
    #[display("feed error")]
    Feed,
    #[display("runtime error")]
    Runtime,
}

#[derive(Parser)]
#[command(
    name = "chart-signals",
    about = "Technical indicators and chart patterns for price series"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a recorded series once
    Analyze {
        /// JSON file holding `[{"time": ..., "value": ...}]`
        #[arg(short, long)]
        input: PathBuf,
        /// Optional TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Symbol label used in the report
        #[arg(short, long, default_value = "series")]
        symbol: String,
        /// Print the analysis as JSON instead of log lines
        #[arg(long)]
        json: bool,
    },
    /// Replay every configured symbol feed, recomputing on each tick
    Watch {
        /// Path to the TOML configuration file
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,
        /// Print analyses as JSON instead of log lines
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(report) = run().await {
        eprintln!("{report:?}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Report<AppError>> {
    match Cli::parse().command {
        Command::Analyze {
            input,
            config,
            symbol,
            json,
        } => {
            let config = match config {
                Some(path) => config::load(&path).change_context(AppError::Config)?,
                None => AppConfig::default(),
            };
            init_tracing(&config);
            analyze(&config, &input, &symbol, build_reporter(json))
        }
        Command::Watch { config, json } => {
            let config = config::load(&config).change_context(AppError::Config)?;
            init_tracing(&config);
            watch(&config, build_reporter(json)).await
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::new(&config.general.log_level);
    match config.general.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}

fn build_reporter(json: bool) -> Arc<dyn Reporter> {
    if json {
        Arc::new(JsonReporter::stdout())
    } else {
        Arc::new(TerminalReporter)
    }
}

fn analyze(
    config: &AppConfig,
    input: &Path,
    symbol: &str,
    reporter: Arc<dyn Reporter>,
) -> Result<(), Report<AppError>> {
    let analyzer = Analyzer::from_config(config).change_context(AppError::Config)?;
    let series = load_series(input).change_context(AppError::Feed)?;
    info!(symbol, points = series.len(), "analyzing series");

    reporter.report(symbol, &analyzer.analyze(&series));
    Ok(())
}

async fn watch(config: &AppConfig, reporter: Arc<dyn Reporter>) -> Result<(), Report<AppError>> {
    let analyzer = Analyzer::from_config(config).change_context(AppError::Config)?;
    let feeds = build_feeds(config);

    if feeds.is_empty() {
        tracing::warn!("no symbol feeds available; nothing to do");
        return Ok(());
    }

    // ── Feeds ─────────────────────────────────────────────────────────────────
    let cancel = CancellationToken::new();
    let (tick_tx, tick_rx) = mpsc::channel::<Tick>(1024);

    let mut feed_handles = Vec::new();
    for feed in feeds {
        let tx = tick_tx.clone();
        let cancel_clone = cancel.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = feed.run(tx, cancel_clone).await {
                tracing::error!(symbol = feed.symbol(), error = ?e, "feed failed");
            }
        });
        feed_handles.push(handle);
    }

    // Drop the original sender so the receiver closes when all feeds finish
    drop(tick_tx);

    // ── Analysis loop ─────────────────────────────────────────────────────────
    let history_limit = config.general.history_limit;
    let mut analysis_handle = tokio::spawn(async move {
        analysis_loop(tick_rx, &analyzer, history_limit, reporter.as_ref()).await
    });

    // ── Shutdown ──────────────────────────────────────────────────────────────
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.change_context(AppError::Runtime)?;
            info!("ctrl+c received, shutting down");
        }
        result = &mut analysis_handle => {
            let latest = result.change_context(AppError::Runtime)?;
            info!(symbols = latest.len(), "all feeds finished");
            return Ok(());
        }
    }

    cancel.cancel();

    for handle in feed_handles {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    let _ = tokio::time::timeout(Duration::from_secs(5), analysis_handle).await;

    info!("shutdown complete");
    Ok(())
}

fn build_feeds(config: &AppConfig) -> Vec<Box<dyn PriceFeed>> {
    config
        .symbols
        .iter()
        .filter_map(|s| match load_series(&s.path) {
            Ok(points) => Some(Box::new(ReplayFeed::new(
                s.symbol.clone(),
                points,
                Duration::from_millis(s.interval_ms),
            )) as Box<dyn PriceFeed>),
            Err(e) => {
                tracing::warn!(symbol = %s.symbol, error = ?e, "failed to load series, skipping");
                None
            }
        })
        .collect()
}
