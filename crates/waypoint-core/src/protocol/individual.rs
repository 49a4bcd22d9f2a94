//! Individual protocols: one guidance block per participant.

use serde::{Deserialize, Serialize};

use crate::input::ProtocolInput;
use crate::taxonomy::Taxonomy;

use super::classify::RoleCategory;
use super::guidance::resolve_node;

/// Guidance for a single participant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IndividualProtocol {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Persona key actually used, after fallback.
    pub os_persona: String,
    pub role_category: RoleCategory,
    pub approach: String,
    pub delivery_method: String,
    pub key_strengths: Vec<String>,
    pub communication_approach: String,
    pub support_needs: Vec<String>,
    pub red_flags: Vec<String>,
}

/// Build one protocol per node, in input order.
pub fn generate_individual_protocols(
    input: &ProtocolInput,
    taxonomy: &Taxonomy,
) -> Vec<IndividualProtocol> {
    input
        .nodes
        .iter()
        .map(|node| {
            let guidance = resolve_node(taxonomy, node);
            let profile = guidance.persona.profile;
            IndividualProtocol {
                name: node.name.clone(),
                role: node.role.clone(),
                age: node.age,
                os_persona: guidance.persona.key.to_string(),
                role_category: guidance.category,
                approach: profile.approach.clone(),
                delivery_method: profile.delivery_method.clone(),
                key_strengths: profile.key_strengths.clone(),
                communication_approach: guidance.role.communication_approach.to_string(),
                support_needs: to_owned_list(guidance.role.support_needs),
                red_flags: to_owned_list(guidance.role.red_flags),
            }
        })
        .collect()
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Render the individual protocols section.
pub fn format_individual_protocols(protocols: &[IndividualProtocol]) -> String {
    let mut out = String::with_capacity(1024 * protocols.len().max(1));
    out.push_str("## Individual Protocols\n\n");

    if protocols.is_empty() {
        out.push_str("_No participants were provided._\n");
        return out;
    }

    for p in protocols {
        match p.age {
            Some(age) => out.push_str(&format!("### {} ({}, age {age})\n\n", p.name, p.role)),
            None => out.push_str(&format!("### {} ({})\n\n", p.name, p.role)),
        }
        out.push_str(&format!("- **Operating style:** {}\n", p.os_persona));
        out.push_str(&format!("- **Approach:** {}\n", p.approach));
        out.push_str(&format!("- **Delivery method:** {}\n", p.delivery_method));
        if !p.key_strengths.is_empty() {
            out.push_str(&format!("- **Key strengths:** {}\n", p.key_strengths.join(", ")));
        }
        out.push_str(&format!(
            "- **Communication approach:** {}\n\n",
            p.communication_approach
        ));

        out.push_str("**Support needs:**\n");
        for need in &p.support_needs {
            out.push_str(&format!("- {need}\n"));
        }
        out.push('\n');

        out.push_str("**Red flags to watch for:**\n");
        for flag in &p.red_flags {
            out.push_str(&format!("- {flag}\n"));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ProtocolNode, Timeline};

    fn input_with(nodes: Vec<ProtocolNode>) -> ProtocolInput {
        ProtocolInput {
            structure: "family-divorce".to_string(),
            nodes,
            current_state: "transition".to_string(),
            timeline: Timeline {
                days: 30,
                target_date: "2025-02-01".to_string(),
            },
            stakeholders: vec![],
            constraints: vec![],
            protocol_notes: None,
        }
    }

    fn node(name: &str, role: &str, age: Option<u32>, os: &str) -> ProtocolNode {
        ProtocolNode {
            name: name.to_string(),
            age,
            role: role.to_string(),
            os: os.to_string(),
        }
    }

    #[test]
    fn one_protocol_per_node_in_order() {
        let input = input_with(vec![
            node("Alex", "Parent", None, "emotional"),
            node("Sam", "Child", Some(8), "practical"),
            node("Kim", "Grandparent", Some(70), "ANALYTICAL"),
        ]);
        let protocols = generate_individual_protocols(&input, Taxonomy::builtin());
        let names: Vec<&str> = protocols.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alex", "Sam", "Kim"]);
        assert_eq!(protocols[2].os_persona, "analytical");
        assert_eq!(protocols[2].role_category, RoleCategory::Parent);
    }

    #[test]
    fn format_includes_age_when_known() {
        let input = input_with(vec![node("Sam", "Child", Some(8), "practical")]);
        let text = format_individual_protocols(&generate_individual_protocols(
            &input,
            Taxonomy::builtin(),
        ));
        assert!(text.starts_with("## Individual Protocols\n"));
        assert!(text.contains("### Sam (Child, age 8)"));
        assert!(text.contains("**Red flags to watch for:**"));
        assert!(!text.contains("---"));
    }

    #[test]
    fn format_handles_no_participants() {
        let text = format_individual_protocols(&[]);
        assert!(text.contains("No participants"));
    }
}
