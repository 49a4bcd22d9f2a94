//! Master overview: the structure profile and the input context at a glance.

use crate::input::ProtocolInput;
use crate::taxonomy::Taxonomy;

/// Render the master overview section.
pub fn generate_master_overview(input: &ProtocolInput, taxonomy: &Taxonomy) -> String {
    let profile = taxonomy.structure_profile(&input.structure);
    let mut out = String::with_capacity(1024);

    out.push_str("## Master Overview\n\n");
    out.push_str(&format!("- **Structure:** {}\n", input.structure));
    out.push_str(&format!("- **Focus:** {}\n", profile.focus));
    if !input.current_state.trim().is_empty() {
        out.push_str(&format!("- **Current state:** {}\n", input.current_state));
    }
    out.push_str(&format!(
        "- **Participants ({}):** {}\n",
        input.nodes.len(),
        input.node_names().join(", ")
    ));
    out.push_str(&format!(
        "- **Timeline:** {} days (target date {})\n",
        input.timeline.days, input.timeline.target_date
    ));
    out.push_str(&format!(
        "- **Stakeholders:** {}\n",
        if input.stakeholders.is_empty() {
            "none listed".to_string()
        } else {
            input.stakeholders.join(", ")
        }
    ));

    if !profile.challenges.is_empty() {
        out.push_str("\n### Key Challenges\n\n");
        for c in &profile.challenges {
            out.push_str(&format!("- {c}\n"));
        }
    }

    if !profile.priorities.is_empty() {
        out.push_str("\n### Priorities\n\n");
        for (i, p) in profile.priorities.iter().enumerate() {
            out.push_str(&format!("{}. {p}\n", i + 1));
        }
    }

    if !input.constraints.is_empty() {
        out.push_str("\n### Constraints\n\n");
        for c in &input.constraints {
            out.push_str(&format!("- {c}\n"));
        }
    }

    if let Some(notes) = input.notes() {
        out.push_str("\n### Protocol Notes\n\n");
        out.push_str(notes);
        out.push('\n');
    }

    out.push('\n');
    out
}
