mod config;
mod generate_cmd;
mod section_cmd;
mod taxonomy_cmd;
#[cfg(test)]
mod test_util;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};

use waypoint_core::protocol::Section;

use config::{CliOverrides, OutputFormat, WaypointConfig};

#[derive(Parser)]
#[command(
    name = "waypoint",
    version,
    about = "Coordination protocol generator for families, teams and organizations in transition"
)]
struct Cli {
    /// Custom taxonomy TOML file (overrides WAYPOINT_TAXONOMY env var)
    #[arg(long, global = true)]
    taxonomy: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a waypoint config file
    Init {
        /// Default output format: markdown or json
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Default directory generated protocols are written into
        #[arg(long)]
        output_dir: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a full coordination protocol from an input file
    Generate {
        /// Path to the input file (.toml or .json)
        input: String,
        /// Output file path (defaults to the output directory, else stdout)
        #[arg(long)]
        output: Option<String>,
        /// Output format: markdown or json (overrides WAYPOINT_FORMAT)
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Directory to write into (overrides WAYPOINT_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<String>,
        /// Anchor date for milestones, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Delay before generating, in milliseconds (overrides WAYPOINT_PACING_MS)
        #[arg(long)]
        pace_ms: Option<u64>,
    },
    /// Render one section: overview, individuals, stakeholders, timeline, metrics, contingency
    Section {
        /// Section name
        section: Section,
        /// Path to the input file (.toml or .json)
        input: String,
        /// Anchor date for milestones, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// List the personas and structures the generator knows about
    Taxonomy {
        /// Show every profile's full text
        #[arg(long)]
        verbose: bool,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

/// Execute the `waypoint init` command: write config file.
fn cmd_init(
    format: Option<OutputFormat>,
    output_dir: Option<&str>,
    taxonomy: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let format = format.unwrap_or_default();
    let cfg = config::ConfigFile {
        output: config::OutputSection {
            format: Some(format.to_string()),
            directory: output_dir.map(str::to_string),
        },
        generation: config::GenerationSection {
            pacing_ms: None,
            taxonomy: taxonomy.map(str::to_string),
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  output.format = {format}");
    if let Some(dir) = output_dir {
        println!("  output.directory = {dir}");
    }
    if let Some(taxonomy) = taxonomy {
        println!("  generation.taxonomy = {taxonomy}");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let taxonomy = cli.taxonomy.as_deref();

    match cli.command {
        Commands::Init {
            format,
            output_dir,
            force,
        } => {
            cmd_init(format, output_dir.as_deref(), taxonomy, force)?;
        }
        Commands::Generate {
            input,
            output,
            format,
            output_dir,
            today,
            pace_ms,
        } => {
            let resolved = WaypointConfig::resolve(&CliOverrides {
                format,
                output_dir: output_dir.as_deref(),
                pacing_ms: pace_ms,
                taxonomy,
            })?;
            generate_cmd::run_generate(&input, output.as_deref(), today, &resolved).await?;
        }
        Commands::Section {
            section,
            input,
            today,
        } => {
            let resolved = WaypointConfig::resolve(&CliOverrides {
                taxonomy,
                ..Default::default()
            })?;
            section_cmd::run_section(section, &input, today, &resolved)?;
        }
        Commands::Taxonomy { verbose } => {
            let resolved = WaypointConfig::resolve(&CliOverrides {
                taxonomy,
                ..Default::default()
            })?;
            taxonomy_cmd::run_taxonomy(&resolved, verbose)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "waypoint",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "waypoint",
            "generate",
            "family.toml",
            "--format",
            "json",
            "--today",
            "2025-03-03",
            "--pace-ms",
            "0",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                input,
                format,
                today,
                pace_ms,
                ..
            } => {
                assert_eq!(input, "family.toml");
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(today, NaiveDate::from_ymd_opt(2025, 3, 3));
                assert_eq!(pace_ms, Some(0));
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn rejects_unknown_section() {
        assert!(Cli::try_parse_from(["waypoint", "section", "appendix", "in.toml"]).is_err());
    }

    #[test]
    fn rejects_malformed_today() {
        assert!(
            Cli::try_parse_from(["waypoint", "generate", "in.toml", "--today", "03/03/2025"])
                .is_err()
        );
    }
}
