//! Market risk dashboard CLI.
//!
//! # Usage
//!
//! ```bash
//! # Fetch, score and write today's report
//! mahler-dashboard run
//!
//! # Custom config, report directory and run date
//! mahler-dashboard run --config config/dashboard.toml --output-dir reports --date 2024-06-03
//!
//! # JSON on stdout, no HTML file
//! mahler-dashboard run --json --no-html
//!
//! # Print the effective configuration
//! mahler-dashboard show-config
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use mahler_dashboard::{
    ConsoleSink, Dashboard, DashboardConfig, HtmlSink, JsonSink, ReportSink, YahooClient,
};

#[derive(Parser)]
#[command(name = "mahler-dashboard")]
#[command(about = "Risk-on/risk-off dashboard from rates, vol, options and futures")]
#[command(version)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch market data, score it and emit reports
    Run {
        /// Directory for the HTML report (overrides config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Run date (YYYY-MM-DD), defaults to today (UTC)
        #[arg(long)]
        date: Option<String>,

        /// Print the report as JSON instead of the console transcript
        #[arg(long)]
        json: bool,

        /// Skip writing the HTML report
        #[arg(long)]
        no_html: bool,
    },

    /// Print the effective configuration as TOML
    ShowConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<DashboardConfig> {
    match path {
        Some(p) => DashboardConfig::load(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(DashboardConfig::default()),
    }
}

async fn cmd_run(
    mut config: DashboardConfig,
    output_dir: Option<PathBuf>,
    date: Option<String>,
    json: bool,
    no_html: bool,
) -> Result<()> {
    if let Some(dir) = output_dir {
        config.report.output_dir = dir;
    }

    let today = match date {
        Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d").context("Invalid date format")?,
        None => Utc::now().date_naive(),
    };

    let client = YahooClient::new(&config).context("Failed to build HTTP client")?;
    let dashboard = Dashboard::new(client, &config);
    let report = dashboard.run(today).await;

    if json {
        JsonSink.emit(&report)?;
    } else {
        ConsoleSink.emit(&report)?;
    }

    if !no_html {
        let sink = HtmlSink::new(&config.report.output_dir);
        let path = sink.write(&report).context("Failed to write HTML report")?;
        if !json {
            println!("\nReport written to {}", path.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mahler_dashboard=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Run {
            output_dir,
            date,
            json,
            no_html,
        } => {
            cmd_run(config, output_dir, date, json, no_html).await?;
        }
        Commands::ShowConfig => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
