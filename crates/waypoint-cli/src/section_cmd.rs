//! `waypoint section` command: render a single protocol section.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use waypoint_core::protocol::{Section, render_section};

use crate::config::WaypointConfig;
use crate::generate_cmd::{read_input, resolve_today};

/// Run the section command, printing the rendered markdown to stdout.
pub fn run_section(
    section: Section,
    input_path: &str,
    today: Option<NaiveDate>,
    config: &WaypointConfig,
) -> Result<()> {
    let input = read_input(Path::new(input_path))?;
    let taxonomy = config.load_taxonomy()?;
    let rendered = render_section(section, &taxonomy, &input, resolve_today(today));
    println!("{}", rendered.trim_end());
    Ok(())
}
