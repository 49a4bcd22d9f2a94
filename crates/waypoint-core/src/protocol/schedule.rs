//! Milestone scheduling.
//!
//! Every protocol has exactly five checkpoints spread proportionally over the
//! timeline. Day 1 is "today". The first four milestones compute their date
//! as `today + (day - 1)`; the final milestone uses the caller's
//! `targetDate` verbatim, even if that disagrees with the computed date.
//! Short timelines may put several milestones on the same day; they are kept.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::input::ProtocolInput;

/// Label used when every participant is responsible.
pub const ALL_NODES: &str = "All Nodes";
/// Label used for the early checkpoint, not resolved to names.
pub const PRIMARY_NODES: &str = "Primary Nodes";
/// Label used when stakeholders share responsibility.
pub const ALL_STAKEHOLDERS: &str = "All Stakeholders";

/// A scheduled checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Milestone {
    pub day: i64,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub title: String,
    pub description: String,
    pub responsible: Vec<String>,
    pub deliverables: Vec<String>,
}

/// Who owns a checkpoint.
enum Responsible {
    AllNodesLabel,
    PrimaryNodesLabel,
    NodeNames,
    NodesAndStakeholders,
}

/// Where a checkpoint falls and how its date is derived.
enum Placement {
    FirstDay,
    Fraction(f64),
    TargetDate,
}

struct Checkpoint {
    placement: Placement,
    title: &'static str,
    description: &'static str,
    responsible: Responsible,
    deliverables: &'static [&'static str],
}

const CHECKPOINTS: [Checkpoint; 5] = [
    Checkpoint {
        placement: Placement::FirstDay,
        title: "Initial Assessment & Kickoff",
        description: "Review this protocol together, confirm roles, and agree on communication channels.",
        responsible: Responsible::AllNodesLabel,
        deliverables: &[
            "Shared understanding of the protocol",
            "Agreed communication schedule",
            "Baseline wellbeing check for every participant",
        ],
    },
    Checkpoint {
        placement: Placement::Fraction(0.25),
        title: "Early Phase Checkpoint",
        description: "Confirm that routines and communication agreements are holding, and adjust what is not working.",
        responsible: Responsible::PrimaryNodesLabel,
        deliverables: &[
            "Routine stability review",
            "Adjustments to the communication plan",
        ],
    },
    Checkpoint {
        placement: Placement::Fraction(0.5),
        title: "Mid-Point Review",
        description: "Assess progress against the success metrics and revisit priorities for the second half.",
        responsible: Responsible::NodeNames,
        deliverables: &[
            "Success metrics review",
            "Updated priorities for the remaining timeline",
        ],
    },
    Checkpoint {
        placement: Placement::Fraction(0.75),
        title: "Late Phase Checkpoint",
        description: "Close remaining gaps and confirm readiness for the target state.",
        responsible: Responsible::NodeNames,
        deliverables: &[
            "List of outstanding issues with owners",
            "Plan for sustaining new routines",
        ],
    },
    Checkpoint {
        placement: Placement::TargetDate,
        title: "Final Assessment & Target Achievement",
        description: "Evaluate outcomes against the target state and agree on ongoing maintenance.",
        responsible: Responsible::NodesAndStakeholders,
        deliverables: &[
            "Final outcomes assessment",
            "Ongoing maintenance agreement",
            "Closing update for stakeholders",
        ],
    },
];

/// Day number for a proportional checkpoint: `floor(days * fraction)`.
pub fn checkpoint_day(days: i64, fraction: f64) -> i64 {
    (days as f64 * fraction).floor() as i64
}

/// Calendar date of `day`, where day 1 is `today`. Saturates at the
/// representable calendar range.
pub fn milestone_date(today: NaiveDate, day: i64) -> NaiveDate {
    let offset = day.saturating_sub(1);
    if offset >= 0 {
        today
            .checked_add_days(Days::new(offset.unsigned_abs()))
            .unwrap_or(NaiveDate::MAX)
    } else {
        today
            .checked_sub_days(Days::new(offset.unsigned_abs()))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Compute the five milestones for `input`, anchored at `today`.
pub fn generate_timeline(input: &ProtocolInput, today: NaiveDate) -> Vec<Milestone> {
    let days = input.timeline.days;
    let names = input.node_names();

    CHECKPOINTS
        .iter()
        .map(|cp| {
            let (day, date) = match cp.placement {
                Placement::FirstDay => (1, format_date(milestone_date(today, 1))),
                Placement::Fraction(f) => {
                    let day = checkpoint_day(days, f);
                    (day, format_date(milestone_date(today, day)))
                }
                Placement::TargetDate => (days, input.timeline.target_date.clone()),
            };
            let responsible = match cp.responsible {
                Responsible::AllNodesLabel => vec![ALL_NODES.to_string()],
                Responsible::PrimaryNodesLabel => vec![PRIMARY_NODES.to_string()],
                Responsible::NodeNames => names.clone(),
                Responsible::NodesAndStakeholders => {
                    vec![ALL_NODES.to_string(), ALL_STAKEHOLDERS.to_string()]
                }
            };
            Milestone {
                day,
                date,
                title: cp.title.to_string(),
                description: cp.description.to_string(),
                responsible,
                deliverables: cp.deliverables.iter().map(|d| d.to_string()).collect(),
            }
        })
        .collect()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Render the timeline section.
pub fn format_timeline(milestones: &[Milestone]) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str("## Timeline & Milestones\n\n");

    for (i, m) in milestones.iter().enumerate() {
        out.push_str(&format!(
            "### {}. Day {} ({}): {}\n\n",
            i + 1,
            m.day,
            m.date,
            m.title
        ));
        out.push_str(&format!("{}\n\n", m.description));
        out.push_str(&format!("- **Responsible:** {}\n", m.responsible.join(", ")));
        out.push_str("- **Deliverables:**\n");
        for d in &m.deliverables {
            out.push_str(&format!("  - {d}\n"));
        }
        out.push('\n');
    }

    out
}
