//! assetline CLI - Hardware Contract Timeline
//!
//! Loads a decoded asset export and prints the contract timeline as JSON
//! or as an indented text tree.

mod config;
mod text;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use assetline_parser::RowSet;
use assetline_render::ZoomLevel;
use assetline_timeline::{load_with, ViewFilter};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "assetline")]
#[command(author, version, about = "Hardware contract timeline", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an export and print its timeline
    Load {
        /// Row set JSON: {"headers": [...], "rows": [{...}]}
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Zoom preset label (5-year, Year, Quarter, Month)
        #[arg(short, long)]
        zoom: Option<String>,

        /// Reference date for days remaining (YYYY-MM-DD, default: today)
        #[arg(long, env = "ASSETLINE_TODAY")]
        today: Option<NaiveDate>,

        /// Bottom-row column width in pixels (1-10000)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10_000))]
        cell_width: Option<u32>,

        /// Only show assets whose label contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only show these location ids (repeatable)
        #[arg(short, long = "location", value_name = "ID")]
        locations: Vec<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// List zoom presets
    Presets {
        /// Configuration file
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

struct LoadArgs {
    file: PathBuf,
    format: OutputFormat,
    zoom: Option<String>,
    today: Option<NaiveDate>,
    cell_width: Option<u32>,
    filter: ViewFilter,
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Some(Commands::Load {
            file,
            format,
            zoom,
            today,
            cell_width,
            search,
            locations,
            output,
            config,
        }) => read_config(config.as_deref()).and_then(|config| {
            let filter = ViewFilter {
                location_ids: locations,
                search: search.unwrap_or_default(),
            };
            cmd_load(
                &config,
                LoadArgs {
                    file,
                    format,
                    zoom,
                    today,
                    cell_width,
                    filter,
                    output,
                },
            )
        }),
        Some(Commands::Presets { config }) => {
            read_config(config.as_deref()).and_then(|config| cmd_presets(&config))
        }
        None => {
            println!("assetline - Hardware Contract Timeline");
            println!("Run with --help for usage information");
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from warn
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn cmd_load(config: &Config, args: LoadArgs) -> Result<ExitCode> {
    let tables = config.locale_tables()?;
    let zoom = config.zoom_level(args.zoom.as_deref())?;
    let today = args
        .today
        .or(config.today)
        .unwrap_or_else(|| Local::now().date_naive());
    let cell_width = args
        .cell_width
        .or(config.cell_width)
        .unwrap_or(assetline_render::DEFAULT_CELL_WIDTH);

    let input = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let rows = RowSet::from_json(&input)?;
    let timeline = load_with(&rows, today, &tables)?;

    if timeline.summary.is_empty() {
        warn!(rows = rows.len(), "no assets admitted");
        eprintln!("{}", timeline.summary.message());
        return Ok(ExitCode::FAILURE);
    }
    info!("{}", timeline.summary.message());

    let preset = zoom.current();
    let doc = timeline.document(&args.filter, &preset.scales, cell_width);
    let rendered = match args.format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&doc)?;
            json.push('\n');
            json
        }
        OutputFormat::Text => text::render(&doc, &preset.label),
    };

    match args.output {
        Some(path) => std::fs::write(&path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(rendered.as_bytes())
            .context("Failed to write output")?,
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_presets(config: &Config) -> Result<ExitCode> {
    let zoom: ZoomLevel = config.zoom_level(None)?;
    for (index, preset) in zoom.presets().iter().enumerate() {
        let marker = if index == zoom.index() { "*" } else { " " };
        let scales: Vec<String> = preset
            .scales
            .iter()
            .map(|s| format!("{}/{} {}", s.unit, s.step, s.format))
            .collect();
        println!("{} {:<8} {}", marker, preset.label, scales.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}
