//! `waypoint generate` command: build a full protocol and write it out.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use waypoint_core::input::{ProtocolInput, load_input};
use waypoint_core::pacing::{PacingError, generate_paced};
use waypoint_core::protocol::GeneratedProtocol;

use crate::config::{OutputFormat, WaypointConfig};

/// Load and validate an input file before any generation happens.
pub fn read_input(path: &Path) -> Result<ProtocolInput> {
    load_input(path).with_context(|| format!("invalid input {}", path.display()))
}

/// The date milestones are anchored to: `--today` if given, else the local date.
pub fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// File name used when writing into an output directory.
pub fn default_file_name(structure: &str, today: NaiveDate, format: OutputFormat) -> String {
    let slug: String = structure
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "protocol" } else { slug };
    format!(
        "protocol-{slug}-{}.{}",
        today.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Render a generated protocol in the requested format.
pub fn render_output(protocol: &GeneratedProtocol, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(protocol.full_document.clone()),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(protocol).context("failed to serialize protocol")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Run the generate command.
pub async fn run_generate(
    input_path: &str,
    output: Option<&str>,
    today: Option<NaiveDate>,
    config: &WaypointConfig,
) -> Result<()> {
    let input = read_input(Path::new(input_path))?;
    let today = resolve_today(today);
    let taxonomy = config.load_taxonomy()?;

    // First signal cancels the pacing delay, second force-exits.
    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    let got_first_signal = Arc::new(AtomicBool::new(false));
    let got_first_clone = Arc::clone(&got_first_signal);

    tokio::spawn(async move {
        loop {
            tokio::signal::ctrl_c().await.ok();
            if got_first_clone.swap(true, Ordering::SeqCst) {
                eprintln!("\nForce exit.");
                std::process::exit(130);
            }
            cancel_clone.cancel();
        }
    });

    let protocol = match generate_paced(&taxonomy, &input, today, config.pacing, &cancel).await {
        Ok(protocol) => protocol,
        Err(PacingError::Cancelled) => {
            eprintln!("Generation cancelled.");
            std::process::exit(130);
        }
    };

    let rendered = render_output(&protocol, config.format)?;

    let destination = match (output, &config.output_dir) {
        (Some(path), _) => Some(PathBuf::from(path)),
        (None, Some(dir)) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create output directory {}", dir.display()))?;
            Some(dir.join(default_file_name(&input.structure, today, config.format)))
        }
        (None, None) => None,
    };

    match destination {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("cannot write output file {}", path.display()))?;
            println!(
                "Protocol written to {} ({} participants, {} milestones)",
                path.display(),
                protocol.individual_protocols.len(),
                protocol.timeline.len()
            );
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_file_name_slugs_structure() {
        assert_eq!(
            default_file_name("family-divorce", date(2025, 3, 3), OutputFormat::Markdown),
            "protocol-family-divorce-2025-03-03.md"
        );
        assert_eq!(
            default_file_name("Work Team / East", date(2025, 3, 3), OutputFormat::Json),
            "protocol-work-team---east-2025-03-03.json"
        );
    }

    #[test]
    fn default_file_name_handles_blank_structure() {
        assert_eq!(
            default_file_name("  ", date(2025, 1, 9), OutputFormat::Markdown),
            "protocol-protocol-2025-01-09.md"
        );
    }

    #[test]
    fn resolve_today_prefers_explicit_date() {
        assert_eq!(resolve_today(Some(date(2030, 7, 4))), date(2030, 7, 4));
    }

    #[test]
    fn read_input_rejects_empty_nodes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(
            &path,
            r#"{"structure":"self","nodes":[],"currentState":"x",
               "timeline":{"days":10,"targetDate":"2025-01-01"},"stakeholders":[]}"#,
        )
        .unwrap();

        let msg = format!("{:#}", read_input(&path).unwrap_err());
        assert!(msg.contains("invalid input"), "unexpected error: {msg}");
        assert!(msg.contains("at least one node"), "unexpected error: {msg}");
    }
}
