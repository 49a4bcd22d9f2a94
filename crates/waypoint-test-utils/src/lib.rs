//! Shared fixtures for waypoint integration tests.
//!
//! Provides a frozen "today", node builders, and the reference scenarios the
//! engine is tested against.

use chrono::NaiveDate;

use waypoint_core::input::{ProtocolInput, ProtocolNode, Timeline};

/// The fixed date every test anchors milestones to.
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid fixed date")
}

/// Build a node.
pub fn node(name: &str, role: &str, age: Option<u32>, os: &str) -> ProtocolNode {
    ProtocolNode {
        name: name.to_string(),
        age,
        role: role.to_string(),
        os: os.to_string(),
    }
}

/// Minimal valid input: one adult, no stakeholders, a 30-day timeline.
pub fn minimal_input() -> ProtocolInput {
    ProtocolInput {
        structure: "self".to_string(),
        nodes: vec![node("Jordan", "Self", Some(34), "analytical")],
        current_state: "burnout recovery".to_string(),
        timeline: Timeline {
            days: 30,
            target_date: "2025-04-01".to_string(),
        },
        stakeholders: vec![],
        constraints: vec![],
        protocol_notes: None,
    }
}

/// The divorcing-family reference scenario: a parent and a young child over
/// 90 days, with a school counselor as the only stakeholder.
pub fn divorce_scenario() -> ProtocolInput {
    ProtocolInput {
        structure: "family-divorce".to_string(),
        nodes: vec![
            node("Alex", "Parent", None, "emotional"),
            node("Sam", "Child", Some(8), "practical"),
        ],
        current_state: "transition".to_string(),
        timeline: Timeline {
            days: 90,
            target_date: "2025-06-01".to_string(),
        },
        stakeholders: vec!["School Counselor".to_string()],
        constraints: vec![],
        protocol_notes: Some(String::new()),
    }
}

/// A work team with no minors and a mix of matched and unmatched
/// stakeholders.
pub fn team_scenario() -> ProtocolInput {
    ProtocolInput {
        structure: "work-team".to_string(),
        nodes: vec![
            node("Priya", "Team Lead", Some(41), "analytical"),
            node("Marco", "Engineer", Some(29), "technical"),
            node("Lena", "Designer", None, "unknown-os-xyz"),
        ],
        current_state: "reorganization".to_string(),
        timeline: Timeline {
            days: 60,
            target_date: "2025-05-01".to_string(),
        },
        stakeholders: vec!["Executive Sponsor".to_string(), "HR".to_string()],
        constraints: vec!["No overtime".to_string()],
        protocol_notes: Some("Quarterly planning lands mid-way.".to_string()),
    }
}

/// The reference scenario as TOML, for file-based tests.
pub const DIVORCE_SCENARIO_TOML: &str = r#"
structure = "family-divorce"
currentState = "transition"
stakeholders = ["School Counselor"]
constraints = []
protocolNotes = ""

[timeline]
days = 90
targetDate = "2025-06-01"

[[nodes]]
name = "Alex"
role = "Parent"
os = "emotional"

[[nodes]]
name = "Sam"
role = "Child"
age = 8
os = "practical"
"#;
