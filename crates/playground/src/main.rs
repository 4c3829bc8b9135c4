use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use graphql_editor::{Dimensions, MarkerData, MarkerSeverity, Page};
use graphql_playground::defaults::{QUERY_CONTAINER, RESULTS_CONTAINER, VARIABLES_CONTAINER};
use graphql_playground::{ConfigSource, Pane, Playground, PlaygroundOptions};
use graphql_types::EditorPosition;

#[derive(Parser)]
#[command(name = "graphql-playground")]
#[command(about = "Headless GraphQL playground: check, run and inspect operations", long_about = None)]
#[command(version)]
struct Cli {
    /// GraphQL endpoint to introspect and run against
    #[arg(short, long, value_name = "URL", global = true, conflicts_with = "config")]
    endpoint: Option<String>,

    /// Path to a playground config file (YAML or JSON)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Operation file (defaults to the example operation)
    #[arg(short, long, value_name = "FILE", global = true)]
    query: Option<PathBuf>,

    /// Variables file (defaults to the example variables)
    #[arg(long, value_name = "FILE", global = true)]
    variables: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the operation and variables against the endpoint's schema
    Check,

    /// Execute the operation and print the result
    Run,

    /// Print the formatted operation
    Format,

    /// Show hover information at a 1-based line and column
    Hover {
        #[command(flatten)]
        at: Cursor,
    },

    /// List completions at a 1-based line and column
    Complete {
        #[command(flatten)]
        at: Cursor,
    },
}

#[derive(clap::Args)]
struct Cursor {
    /// 1-based line number
    #[arg(long)]
    line: u32,

    /// 1-based column
    #[arg(long)]
    column: u32,

    /// Buffer the position refers to
    #[arg(long, value_enum, default_value = "query")]
    pane: PaneArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaneArg {
    Query,
    Variables,
}

impl From<PaneArg> for Pane {
    fn from(pane: PaneArg) -> Self {
        match pane {
            PaneArg::Query => Self::Query,
            PaneArg::Variables => Self::Variables,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let playground = Playground::new(&page(), options(&cli)?)?;

    match cli.command {
        Commands::Check => {
            playground
                .load_schema()
                .await
                .context("Failed to load schema")?;
            let query_path = display_path(cli.query.as_deref(), "<example query>");
            let variables_path = display_path(cli.variables.as_deref(), "<example variables>");
            let mut errors = 0;
            for (pane, path) in [(Pane::Query, query_path), (Pane::Variables, variables_path)] {
                let Some(result) = playground.diagnose(pane) else {
                    continue;
                };
                for marker in &result.formatted_diagnostics {
                    print_marker(&path, marker);
                    if marker.severity == MarkerSeverity::Error {
                        errors += 1;
                    }
                }
            }
            if errors > 0 {
                eprintln!("{} {errors} error(s)", "✗".red());
                std::process::exit(1);
            }
            println!("{} No errors", "✓".green());
        }
        Commands::Run => {
            playground.run_operation().await?;
            println!("{}", playground.results_model().value());
        }
        Commands::Format => {
            playground
                .load_schema()
                .await
                .context("Failed to load schema")?;
            if !playground.format_query()? {
                anyhow::bail!("Operation could not be formatted");
            }
            print!("{}", playground.query_model().value());
        }
        Commands::Hover { at } => {
            playground
                .load_schema()
                .await
                .context("Failed to load schema")?;
            let position = EditorPosition::new(at.line, at.column);
            for hover in playground.hover(at.pane.into(), position) {
                for block in hover.contents {
                    println!("{}", block.value);
                }
            }
        }
        Commands::Complete { at } => {
            playground
                .load_schema()
                .await
                .context("Failed to load schema")?;
            let position = EditorPosition::new(at.line, at.column);
            for item in playground.completions(at.pane.into(), position) {
                let detail = item.detail.unwrap_or_default();
                println!("{}\t{:?}\t{}", item.label.bold(), item.kind, detail.dimmed());
            }
        }
    }

    Ok(())
}

/// Initialize tracing from `RUST_LOG`, logging nothing by default.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn page() -> Page {
    Page::with_containers(
        Dimensions {
            width: 120,
            height: 40,
        },
        [QUERY_CONTAINER, VARIABLES_CONTAINER, RESULTS_CONTAINER],
    )
}

fn options(cli: &Cli) -> Result<PlaygroundOptions> {
    let mut options = PlaygroundOptions::default();
    if let Some(endpoint) = &cli.endpoint {
        options = options.with_endpoint(endpoint);
    }
    if let Some(path) = &cli.config {
        options = options.with_config(ConfigSource::File(path.clone()));
    }
    if let Some(path) = &cli.query {
        options = options.with_query(read(path)?);
    }
    if let Some(path) = &cli.variables {
        options = options.with_variables(read(path)?);
    }
    Ok(options)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn display_path(path: Option<&Path>, fallback: &str) -> String {
    path.map_or_else(|| fallback.to_string(), |p| p.display().to_string())
}

fn print_marker(path: &str, marker: &MarkerData) {
    let severity = match marker.severity {
        MarkerSeverity::Error => "error".red().bold(),
        MarkerSeverity::Warning => "warning".yellow().bold(),
        MarkerSeverity::Info | MarkerSeverity::Hint => "info".blue().bold(),
    };
    println!(
        "{path}:{}:{}: {severity}: {}",
        marker.start_line_number, marker.start_column, marker.message
    );
}
