//! Ordered classification rules for participants and stakeholders.
//!
//! Both classifiers are priority lists evaluated top to bottom; the first
//! matching rule wins. Keeping the rules as data makes the order explicit and
//! lets each list be tested on its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::ProtocolNode;

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

/// Which guidance bundle a participant receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    /// A child or other minor.
    Dependent,
    Parent,
    General,
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dependent => "dependent",
            Self::Parent => "parent",
            Self::General => "general",
        };
        f.write_str(s)
    }
}

/// Predicate over a single participant.
pub type NodePredicate = fn(&ProtocolNode) -> bool;

/// True if the node is a child or minor: the role mentions "child"
/// (case-insensitive) or the age is known and under 18.
///
/// This is the only definition of "dependent". Guidance resolution, success
/// metrics, and contingency planning all call it.
pub fn is_dependent(node: &ProtocolNode) -> bool {
    node.role.to_lowercase().contains("child") || node.age.is_some_and(|age| age < 18)
}

/// True if the role mentions "parent" anywhere (case-insensitive).
pub fn is_parent(node: &ProtocolNode) -> bool {
    node.role.to_lowercase().contains("parent")
}

/// Participant rules in priority order. Unmatched nodes are
/// [`RoleCategory::General`].
pub const ROLE_RULES: &[(NodePredicate, RoleCategory)] = &[
    (is_dependent as NodePredicate, RoleCategory::Dependent),
    (is_parent as NodePredicate, RoleCategory::Parent),
];

/// Classify a participant using [`ROLE_RULES`].
pub fn classify_role(node: &ProtocolNode) -> RoleCategory {
    ROLE_RULES
        .iter()
        .find(|(matches, _)| matches(node))
        .map(|(_, category)| *category)
        .unwrap_or(RoleCategory::General)
}

// ---------------------------------------------------------------------------
// Stakeholders
// ---------------------------------------------------------------------------

/// Known stakeholder groups, each with its own communication template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeholderCategory {
    Legal,
    ExtendedFamily,
    School,
    Therapeutic,
    /// Used only for the fallback template when nothing else matched.
    General,
}

impl StakeholderCategory {
    /// Heading shown on the template.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Legal => "Legal Representatives",
            Self::ExtendedFamily => "Extended Family",
            Self::School => "School/Educational",
            Self::Therapeutic => "Therapeutic Support",
            Self::General => "General Stakeholders",
        }
    }
}

impl fmt::Display for StakeholderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Stakeholder rules in priority order: a lowercased label matching any
/// keyword of an earlier entry never reaches a later one.
pub const STAKEHOLDER_RULES: &[(StakeholderCategory, &[&str])] = &[
    (StakeholderCategory::Legal, &["legal", "lawyer", "attorney"]),
    (StakeholderCategory::ExtendedFamily, &["extended", "family"]),
    (StakeholderCategory::School, &["school", "education"]),
    (StakeholderCategory::Therapeutic, &["therapist", "counselor"]),
];

/// Classify a free-text stakeholder label. Returns `None` when no rule
/// matches.
pub fn classify_stakeholder(label: &str) -> Option<StakeholderCategory> {
    let lower = label.to_lowercase();
    STAKEHOLDER_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn node(role: &str, age: Option<u32>) -> ProtocolNode {
        ProtocolNode {
            name: "N".to_string(),
            age,
            role: role.to_string(),
            os: "practical".to_string(),
        }
    }

    #[test]
    fn child_role_is_dependent() {
        assert!(is_dependent(&node("Child", None)));
        assert!(is_dependent(&node("eldest CHILD", Some(30))));
    }

    #[test]
    fn minor_age_is_dependent_regardless_of_role() {
        assert!(is_dependent(&node("Teen", Some(17))));
        assert!(!is_dependent(&node("Teen", Some(18))));
        assert!(!is_dependent(&node("Adult", None)));
    }

    #[test]
    fn dependent_outranks_parent() {
        // A minor who is also a parent still gets dependent guidance.
        assert_eq!(
            classify_role(&node("Young parent", Some(16))),
            RoleCategory::Dependent
        );
        assert_eq!(
            classify_role(&node("Parent of child", None)),
            RoleCategory::Dependent
        );
    }

    #[test]
    fn parent_substring_matches_anywhere() {
        assert_eq!(classify_role(&node("Step-Parent", None)), RoleCategory::Parent);
        assert_eq!(classify_role(&node("Transparent lead", None)), RoleCategory::Parent);
    }

    #[test]
    fn other_roles_are_general() {
        assert_eq!(classify_role(&node("Manager", Some(45))), RoleCategory::General);
        assert_eq!(classify_role(&node("", None)), RoleCategory::General);
    }

    #[test]
    fn stakeholder_legal_outranks_family() {
        assert_eq!(
            classify_stakeholder("Family Lawyer"),
            Some(StakeholderCategory::Legal)
        );
        assert_eq!(
            classify_stakeholder("Legal aid for extended family"),
            Some(StakeholderCategory::Legal)
        );
    }

    #[test]
    fn stakeholder_school_outranks_counselor() {
        assert_eq!(
            classify_stakeholder("School Counselor"),
            Some(StakeholderCategory::School)
        );
        assert_eq!(
            classify_stakeholder("Family therapist"),
            Some(StakeholderCategory::ExtendedFamily)
        );
        assert_eq!(
            classify_stakeholder("THERAPIST"),
            Some(StakeholderCategory::Therapeutic)
        );
    }

    #[test]
    fn unmatched_stakeholder_is_none() {
        assert_eq!(classify_stakeholder("Neighbors"), None);
        assert_eq!(classify_stakeholder(""), None);
    }

    #[test]
    fn rules_never_emit_general() {
        assert!(
            STAKEHOLDER_RULES
                .iter()
                .all(|(c, _)| *c != StakeholderCategory::General)
        );
    }
}
