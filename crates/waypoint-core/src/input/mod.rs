//! Protocol input: the participants, timeline, and context a protocol is
//! generated from.
//!
//! These types map directly to the input file format (TOML or JSON) and are
//! deserialized via `serde`. Multi-word fields use camelCase on the wire and
//! also accept their snake_case spelling.

pub mod parser;

use serde::{Deserialize, Deserializer, Serialize};

pub use parser::{
    InputParseError, load_input, parse_input_json, parse_input_toml, validate_input,
};

/// Everything the engine needs to generate a protocol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolInput {
    /// Structure key (e.g. `family-divorce`, `work-team`).
    pub structure: String,
    /// Participants, in display order.
    pub nodes: Vec<ProtocolNode>,
    /// Descriptive label of the current system state. Carried for display.
    #[serde(default, alias = "current_state")]
    pub current_state: String,
    pub timeline: Timeline,
    /// Free-text stakeholder labels. Order is preserved, duplicates allowed.
    #[serde(default)]
    pub stakeholders: Vec<String>,
    /// Known constraints. Accepts a single string or a list.
    #[serde(default, deserialize_with = "string_or_list")]
    pub constraints: Vec<String>,
    #[serde(default, alias = "protocol_notes", skip_serializing_if = "Option::is_none")]
    pub protocol_notes: Option<String>,
}

/// A single participant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProtocolNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default)]
    pub role: String,
    /// Operating-system persona, matched case-insensitively.
    #[serde(default)]
    pub os: String,
}

/// Duration of the protocol and its target completion date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Length in days. Expected to be positive.
    pub days: i64,
    /// ISO `YYYY-MM-DD` date, passed through verbatim to the final milestone.
    #[serde(alias = "target_date")]
    pub target_date: String,
}

impl ProtocolInput {
    /// Participant names in input order.
    pub fn node_names(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.name.clone()).collect()
    }

    /// Protocol notes, if any non-blank text was supplied.
    pub fn notes(&self) -> Option<&str> {
        self.protocol_notes
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accept `constraints = "text"` as well as `constraints = ["a", "b"]`.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<OneOrMany>::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(OneOrMany::One(s)) if s.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(items)) => items,
    })
}
