//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sqlite_adapter::SqliteAdapter;
use crate::adapters::treasury_feed_adapter::TreasuryFeedAdapter;
use crate::adapters::web::{AppState, build_router};
use crate::domain::error::DeskError;
use crate::domain::feed::fetch_latest_curve;
use crate::domain::maturity::Maturity;
use crate::domain::order::Order;
use crate::domain::settings::{self, FeedSettings, WebSettings};
use crate::domain::yield_curve::YieldSeries;
use crate::ports::config_port::ConfigPort;
use crate::ports::order_port::OrderPort;

#[derive(Parser, Debug)]
#[command(name = "treasury-desk", about = "Treasury yield curve and order desk")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Fetch and print the latest yield curve
    Curve {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print only the rate for this term, e.g. "10 Years" or "20_Year"
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List recorded orders, newest first
    Orders {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the terms orders can be placed at
    Terms,
}

pub fn run(cli: Cli) -> ExitCode {
    match run_command(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_command(command: Command) -> Result<(), DeskError> {
    match command {
        Command::Serve { config } => run_serve(&config),
        Command::Curve { config, term, json } => run_curve(config.as_ref(), term.as_deref(), json),
        Command::Orders { config } => run_orders(&config),
        Command::Terms => {
            print!("{}", render_terms());
            Ok(())
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, DeskError> {
    FileConfigAdapter::from_file(path)
}

/// Installs the fmt subscriber. `RUST_LOG` takes precedence over `level`.
/// Later calls are no-ops so tests can drive several commands.
pub fn init_tracing(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn runtime() -> Result<tokio::runtime::Runtime, DeskError> {
    Ok(tokio::runtime::Runtime::new()?)
}

fn run_serve(config_path: &PathBuf) -> Result<(), DeskError> {
    let config = load_config(config_path)?;
    init_tracing(&settings::log_level(Some(&config)));
    tracing::info!(config = %config_path.display(), "configuration loaded");

    settings::validate_server_config(&config)?;
    let web = WebSettings::from_config(&config)?;

    let store = SqliteAdapter::from_config(&config)?;
    store.initialize_schema()?;
    let feed = TreasuryFeedAdapter::from_config(&config)?;

    let state = AppState {
        feed: Arc::new(feed),
        orders: Arc::new(store),
    };
    let router = build_router(state);

    runtime()?.block_on(async move {
        let listener = tokio::net::TcpListener::bind(web.listen).await?;
        tracing::info!(address = %web.listen, "web server listening");
        axum::serve(listener, router).await?;
        Ok::<(), DeskError>(())
    })
}

fn run_curve(
    config_path: Option<&PathBuf>,
    term: Option<&str>,
    json: bool,
) -> Result<(), DeskError> {
    let config = config_path.map(load_config).transpose()?;
    let config_ref = config.as_ref().map(|c| c as &dyn ConfigPort);
    init_tracing(&settings::log_level(config_ref));

    let maturity = term
        .map(|t| {
            t.parse::<Maturity>().map_err(|e| DeskError::ConfigInvalid {
                section: "cli".into(),
                key: "term".into(),
                reason: e.to_string(),
            })
        })
        .transpose()?;

    let feed_settings = match config_ref {
        Some(c) => FeedSettings::from_config(c)?,
        None => FeedSettings::default(),
    };
    let feed = TreasuryFeedAdapter::new(&feed_settings)?;
    let series = runtime()?.block_on(fetch_latest_curve(&feed))?;

    match maturity {
        Some(m) => println!("{}", series.rate_for(m).unwrap_or("n/a")),
        None if json => println!("{}", render_series_json(&series)?),
        None => print!("{}", render_series(&series)),
    }
    Ok(())
}

fn run_orders(config_path: &PathBuf) -> Result<(), DeskError> {
    let config = load_config(config_path)?;
    init_tracing(&settings::log_level(Some(&config)));

    let store = SqliteAdapter::from_config(&config)?;
    store.initialize_schema()?;
    let orders = store.list_orders()?;

    if orders.is_empty() {
        eprintln!("No orders recorded");
    } else {
        print!("{}", render_orders(&orders));
    }
    Ok(())
}

/// One `label<TAB>value` line per point.
pub fn render_series(series: &YieldSeries) -> String {
    series
        .points()
        .iter()
        .map(|p| format!("{}\t{}\n", p.label, p.value))
        .collect()
}

pub fn render_series_json(series: &YieldSeries) -> Result<String, DeskError> {
    serde_json::to_string_pretty(series).map_err(|e| DeskError::Io(std::io::Error::other(e)))
}

pub fn render_orders(orders: &[Order]) -> String {
    let mut out = String::from("id\tcreated_at\tterm\tamount\trate\n");
    for order in orders {
        let rate = order.rate.map(|r| r.to_string()).unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M:%S"),
            order.term,
            order.amount,
            rate
        ));
    }
    out
}

pub fn render_terms() -> String {
    Maturity::orderable()
        .map(|m| format!("{}\t{}\n", m.term(), m.label()))
        .collect()
}
