//! Contingency plans: conditional risk responses gated on input shape.
//!
//! "Communication Breakdown" and "Timeline Pressure / Milestone Delay" are
//! always present. "Child/Dependent Distress" is added when any node is a
//! dependent, and "Stakeholder Conflict or Misalignment" when there is at
//! least one stakeholder. The result therefore has two to four plans.

use serde::{Deserialize, Serialize};

use crate::input::ProtocolInput;

use super::classify::is_dependent;

/// A triggered response plan for one risk scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContingencyPlan {
    pub scenario: String,
    pub triggers: Vec<String>,
    pub response: Vec<String>,
    pub escalation: String,
}

pub const COMMUNICATION_BREAKDOWN: &str = "Communication Breakdown";
pub const DEPENDENT_DISTRESS: &str = "Child/Dependent Distress";
pub const STAKEHOLDER_CONFLICT: &str = "Stakeholder Conflict or Misalignment";
pub const TIMELINE_PRESSURE: &str = "Timeline Pressure / Milestone Delay";

fn plan(scenario: &str, triggers: &[&str], response: &[&str], escalation: &str) -> ContingencyPlan {
    ContingencyPlan {
        scenario: scenario.to_string(),
        triggers: triggers.iter().map(|s| s.to_string()).collect(),
        response: response.iter().map(|s| s.to_string()).collect(),
        escalation: escalation.to_string(),
    }
}

fn communication_breakdown() -> ContingencyPlan {
    plan(
        COMMUNICATION_BREAKDOWN,
        &[
            "Two or more scheduled check-ins missed in a row",
            "Messages left unanswered for more than 48 hours",
            "Conversations repeatedly escalating into conflict",
        ],
        &[
            "Pause direct discussion and switch to written communication only",
            "Restate the agreed communication schedule and channel",
            "Hold a short, structured reset conversation with a fixed agenda",
        ],
        "Bring in a neutral facilitator or mediator if the reset does not hold within one week",
    )
}

fn dependent_distress() -> ContingencyPlan {
    plan(
        DEPENDENT_DISTRESS,
        &[
            "Any red flag from a dependent's individual protocol persisting for more than a week",
            "Concerns raised by school, caregivers, or other trusted adults",
            "The dependent asking to avoid a parent, household, or routine",
        ],
        &[
            "Increase one-on-one time and keep daily routines as stable as possible",
            "Agree on a single, consistent explanation shared by all caregivers",
            "Check in with the school or care provider about what they are observing",
        ],
        "Arrange an assessment with a child therapist or pediatrician if distress continues past two weeks",
    )
}

fn stakeholder_conflict() -> ContingencyPlan {
    plan(
        STAKEHOLDER_CONFLICT,
        &[
            "A stakeholder receiving or repeating inconsistent information",
            "A stakeholder taking sides or undermining agreed decisions",
            "Conflicting advice from professional stakeholders",
        ],
        &[
            "Identify a single point of contact for the affected stakeholder",
            "Send a consistent written summary of the current agreements",
            "Clarify the boundaries of the stakeholder's role",
        ],
        "Limit the stakeholder's involvement to essential updates until alignment is restored",
    )
}

fn timeline_pressure() -> ContingencyPlan {
    plan(
        TIMELINE_PRESSURE,
        &[
            "A milestone missed by more than one week",
            "Participants reporting that the pace is unsustainable",
            "New constraints that make the target date unrealistic",
        ],
        &[
            "Review which deliverables are essential and defer the rest",
            "Re-plan the remaining checkpoints with all participants",
            "Communicate any change of target date to stakeholders promptly",
        ],
        "Formally revise the target date at the next checkpoint rather than compressing the remaining work",
    )
}

/// Build the contingency plans for `input`.
pub fn generate_contingency_plans(input: &ProtocolInput) -> Vec<ContingencyPlan> {
    let mut plans = vec![communication_breakdown()];

    if input.nodes.iter().any(is_dependent) {
        plans.push(dependent_distress());
    }

    if !input.stakeholders.is_empty() {
        plans.push(stakeholder_conflict());
    }

    plans.push(timeline_pressure());
    plans
}

/// Render the contingency plans section.
pub fn format_contingency_plans(plans: &[ContingencyPlan]) -> String {
    let mut out = String::with_capacity(768 * plans.len().max(1));
    out.push_str("## Contingency Plans\n\n");

    for p in plans {
        out.push_str(&format!("### {}\n\n", p.scenario));
        out.push_str("**Triggers:**\n");
        for t in &p.triggers {
            out.push_str(&format!("- {t}\n"));
        }
        out.push_str("\n**Response:**\n");
        for (i, step) in p.response.iter().enumerate() {
            out.push_str(&format!("{}. {step}\n", i + 1));
        }
        out.push_str(&format!("\n**Escalation:** {}\n\n", p.escalation));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ProtocolNode, Timeline};

    fn input(nodes: Vec<ProtocolNode>, stakeholders: &[&str]) -> ProtocolInput {
        ProtocolInput {
            structure: "family-intact".to_string(),
            nodes,
            current_state: "stress".to_string(),
            timeline: Timeline {
                days: 30,
                target_date: "2025-02-01".to_string(),
            },
            stakeholders: stakeholders.iter().map(|s| s.to_string()).collect(),
            constraints: vec![],
            protocol_notes: None,
        }
    }

    fn adult(name: &str) -> ProtocolNode {
        ProtocolNode {
            name: name.to_string(),
            age: Some(40),
            role: "Parent".to_string(),
            os: "practical".to_string(),
        }
    }

    fn scenarios(plans: &[ContingencyPlan]) -> Vec<&str> {
        plans.iter().map(|p| p.scenario.as_str()).collect()
    }

    #[test]
    fn minimum_two_plans() {
        let plans = generate_contingency_plans(&input(vec![adult("A")], &[]));
        assert_eq!(scenarios(&plans), vec![COMMUNICATION_BREAKDOWN, TIMELINE_PRESSURE]);
    }

    #[test]
    fn minor_by_age_adds_distress_plan() {
        let teen = ProtocolNode {
            name: "T".to_string(),
            age: Some(15),
            role: "Teen".to_string(),
            os: "emotional".to_string(),
        };
        let plans = generate_contingency_plans(&input(vec![adult("A"), teen], &[]));
        assert_eq!(
            scenarios(&plans),
            vec![COMMUNICATION_BREAKDOWN, DEPENDENT_DISTRESS, TIMELINE_PRESSURE]
        );
    }

    #[test]
    fn maximum_four_plans_in_fixed_order() {
        let child = ProtocolNode {
            name: "C".to_string(),
            age: None,
            role: "child".to_string(),
            os: "practical".to_string(),
        };
        let plans = generate_contingency_plans(&input(vec![child], &["Neighbors"]));
        assert_eq!(
            scenarios(&plans),
            vec![
                COMMUNICATION_BREAKDOWN,
                DEPENDENT_DISTRESS,
                STAKEHOLDER_CONFLICT,
                TIMELINE_PRESSURE
            ]
        );
    }

    #[test]
    fn format_numbers_response_steps() {
        let plans = generate_contingency_plans(&input(vec![adult("A")], &[]));
        let text = format_contingency_plans(&plans);
        assert!(text.starts_with("## Contingency Plans\n"));
        assert!(text.contains("### Communication Breakdown"));
        assert!(text.contains("1. Pause direct discussion"));
        assert!(text.contains("**Escalation:**"));
    }
}
