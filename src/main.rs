use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use insight_scout::config::{find_config_file, load_config, Config};
use insight_scout::render;
use insight_scout::ui;
use insight_scout::Pipeline;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Placeholder query used when none is given.
const DEFAULT_QUERY: &str = "quantum computing";

/// Insight Scout - aggregate papers, patents and search trends for a topic
#[derive(Parser, Debug)]
#[command(name = "insight-scout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Discover research insights & trends for a topic", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Directory the CSV export is written into
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    /// Skip writing the CSV export
    #[arg(long, global = true, default_value_t = false)]
    no_export: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full cycle: papers, patents, trends, analysis and CSV export
    #[command(alias = "s")]
    Scan {
        /// Topic to search for
        query: Option<String>,
    },

    /// Fetch only academic papers
    Papers {
        /// Topic to search for
        query: Option<String>,
    },

    /// Fetch only patents
    Patents {
        /// Topic to search for
        query: Option<String>,
    },

    /// Fetch only the 12-month search trend
    Trends {
        /// Topic to search for
        query: Option<String>,
    },
}

/// Resolve the query argument: absent means the placeholder, explicitly empty
/// means the pipeline must not trigger.
fn resolve_query(query: Option<String>) -> Option<String> {
    match query {
        None => Some(DEFAULT_QUERY.to_string()),
        Some(q) => {
            let trimmed = q.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
    }
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("insight_scout={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        Config::default()
    };

    // CLI flags override file/env configuration
    if let Some(timeout) = cli.timeout {
        config.fetch.timeout_secs = timeout;
    }
    if let Some(export_dir) = &cli.export_dir {
        config.export.directory = export_dir.clone();
    }

    let pipeline = Pipeline::new(&config).map_err(|e| anyhow::anyhow!(e))?;
    let format = resolve_format(cli.output);

    match cli.command {
        Some(Commands::Scan { query }) => {
            let Some(query) = resolve_query(query) else {
                ui::print_idle_prompt();
                return Ok(());
            };

            let spinner = (!cli.quiet && format == OutputFormat::Table && ui::is_terminal())
                .then(|| ui::fetch_spinner("Gathering treasures..."));

            let report = pipeline.run(&query).await;

            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            match format {
                OutputFormat::Json => render::render_json(&report)?,
                _ => render::render_report(&report),
            }

            if !cli.no_export {
                let path = insight_scout::export::write_csv(&report, &config.export.directory)?;
                if !cli.quiet {
                    eprintln!("Exported {} rows to {}", report.total_insights(), path.display());
                }
            }
        }

        Some(Commands::Papers { query }) => {
            let Some(query) = resolve_query(query) else {
                ui::print_idle_prompt();
                return Ok(());
            };
            let outcome = pipeline.papers(&query).await;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                _ => {
                    ui::print_section("📚 Academic Papers (arXiv)");
                    match outcome.fetched() {
                        Some(papers) if !papers.is_empty() => {
                            println!("{}", render::paper_table(papers))
                        }
                        Some(_) => println!("0 results."),
                        None => ui::notice(outcome.notice().unwrap_or_default()),
                    }
                }
            }
        }

        Some(Commands::Patents { query }) => {
            let Some(query) = resolve_query(query) else {
                ui::print_idle_prompt();
                return Ok(());
            };
            let outcome = pipeline.patents(&query).await;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                _ => {
                    ui::print_section("🔬 Patents");
                    match outcome.fetched() {
                        Some(patents) if !patents.is_empty() => {
                            println!("{}", render::patent_table(patents))
                        }
                        Some(_) => println!("0 results."),
                        None => ui::notice(outcome.notice().unwrap_or_default()),
                    }
                }
            }
        }

        Some(Commands::Trends { query }) => {
            let Some(query) = resolve_query(query) else {
                ui::print_idle_prompt();
                return Ok(());
            };
            let outcome = pipeline.trends(&query).await;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                _ => {
                    ui::print_section("📈 Market Trends");
                    match outcome.fetched() {
                        Some(series) if !series.is_empty() => {
                            println!("{}", render::trend_chart(series))
                        }
                        Some(_) => println!("No trend data."),
                        None => ui::notice(outcome.notice().unwrap_or_default()),
                    }
                }
            }
        }

        None => {
            // No command provided - show a short usage summary
            println!("No command provided. Use --help for usage information.");
            println!("Common commands:");
            println!("  scan [query]     - Papers + patents + trends + CSV export");
            println!("  papers [query]   - Academic papers only");
            println!("  patents [query]  - Patents only");
            println!("  trends [query]   - Search trend only");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["insight-scout"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Auto);
        assert!(cli.timeout.is_none());
        assert!(!cli.no_export);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_scan_command() {
        let cli = Cli::parse_from(["insight-scout", "scan", "AI robots"]);
        match &cli.command {
            Some(Commands::Scan { query }) => {
                assert_eq!(query.as_deref(), Some("AI robots"));
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_cli_scan_alias() {
        let cli = Cli::parse_from(["insight-scout", "s"]);
        assert!(matches!(cli.command, Some(Commands::Scan { query: None })));
    }

    #[test]
    fn test_cli_output_format() {
        let cli = Cli::parse_from(["insight-scout", "-o", "json", "scan"]);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_cli_export_flags() {
        let cli = Cli::parse_from(["insight-scout", "--no-export", "--export-dir", "/tmp", "scan"]);
        assert!(cli.no_export);
        assert_eq!(cli.export_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_resolve_query_default() {
        assert_eq!(resolve_query(None).as_deref(), Some(DEFAULT_QUERY));
    }

    #[test]
    fn test_resolve_query_empty_never_triggers() {
        assert!(resolve_query(Some(String::new())).is_none());
        assert!(resolve_query(Some("   ".to_string())).is_none());
    }

    #[test]
    fn test_resolve_query_passthrough() {
        assert_eq!(
            resolve_query(Some("AI robots".to_string())).as_deref(),
            Some("AI robots")
        );
    }
}
