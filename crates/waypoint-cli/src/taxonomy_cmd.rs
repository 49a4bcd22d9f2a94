//! `waypoint taxonomy` command: list the personas and structures in use.

use anyhow::Result;

use waypoint_core::taxonomy::FALLBACK_PERSONA;

use crate::config::WaypointConfig;

pub fn run_taxonomy(config: &WaypointConfig, verbose: bool) -> Result<()> {
    let taxonomy = config.load_taxonomy()?;

    match &config.taxonomy_path {
        Some(path) => println!("Taxonomy: {}", path.display()),
        None => println!("Taxonomy: built-in"),
    }
    println!();

    println!("Personas:");
    for (key, profile) in taxonomy.personas() {
        let marker = if key == FALLBACK_PERSONA { " (fallback)" } else { "" };
        println!("  {key}{marker}");
        if verbose {
            println!("    approach: {}", profile.approach);
            println!("    delivery: {}", profile.delivery_method);
            if !profile.key_strengths.is_empty() {
                println!("    strengths: {}", profile.key_strengths.join(", "));
            }
        }
    }
    println!();

    println!("Structures:");
    for (key, profile) in taxonomy.structures() {
        println!("  {key}");
        if verbose {
            println!("    focus: {}", profile.focus);
            for challenge in &profile.challenges {
                println!("    challenge: {challenge}");
            }
            for priority in &profile.priorities {
                println!("    priority: {priority}");
            }
        }
    }
    if verbose {
        println!("  (other): {}", taxonomy.fallback_structure().focus);
    }

    Ok(())
}
