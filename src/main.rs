//! tabview - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tabview::format::DecimalFormat;
use tabview::model::AppError;
use tabview::state::{SortDirection, TableStateController};
use tabview::view::{ColorConfig, TableStyles};
use tracing::info;

/// tabview - searchable, sortable, paginated country table
#[derive(Parser, Debug)]
#[command(name = "tabview")]
#[command(version)]
#[command(about = "Searchable, sortable, paginated terminal table over a static country dataset")]
pub struct Args {
    /// JSON array of records to show instead of the built-in countries
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Rows per page (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Start with this search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort by a record field (name, area, population)
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort direction for --sort (asc, desc)
    #[arg(long, value_parser = parse_direction, default_value = "asc")]
    pub direction: SortDirection,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn parse_direction(raw: &str) -> Result<SortDirection, String> {
    SortDirection::parse(raw).ok_or_else(|| format!("expected 'asc' or 'desc', got '{raw}'"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args).await?;
    Ok(())
}

async fn run(args: Args) -> Result<(), AppError> {
    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = tabview::config::load_config_with_precedence(args.config.clone())?;
        let merged = tabview::config::merge_config(config_file)?;
        let with_env = tabview::config::apply_env_overrides(merged);
        tabview::config::apply_cli_overrides(
            with_env,
            args.page_size.map(|n| n as usize),
            args.data.clone(),
        )
    };

    // Held until exit so buffered log lines are flushed.
    let _log_guard = tabview::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let dataset = tabview::dataset::resolve(config.data_file.clone())?;
    let format = DecimalFormat::with_separator(config.thousands_separator.clone()).shared();

    let controller = TableStateController::new(dataset, format.clone(), config.pipeline());
    if let Some(term) = args.search {
        controller.set_search_term(term);
    }
    if let Some(field) = &args.sort {
        controller.set_sort_field(field, args.direction);
    }

    let styles = TableStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));
    tabview::view::run(controller, format, styles).await?;

    info!("Exiting");
    Ok(())
}
