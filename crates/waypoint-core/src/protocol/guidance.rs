//! Per-participant guidance: the role bundle plus the persona profile.

use crate::input::ProtocolNode;
use crate::taxonomy::{ResolvedPersona, Taxonomy};

use super::classify::{RoleCategory, classify_role};

/// Role-specific communication guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGuidance {
    pub communication_approach: &'static str,
    pub support_needs: &'static [&'static str],
    pub red_flags: &'static [&'static str],
}

const DEPENDENT_GUIDANCE: RoleGuidance = RoleGuidance {
    communication_approach: "Age-appropriate messaging: short, honest explanations delivered by trusted adults together, \
         with repeated reassurance that the changes are not their fault",
    support_needs: &[
        "Consistent daily routines and rules across every setting",
        "A predictable schedule shared with them in advance",
        "A safe space to express feelings without having to take sides",
        "Regular one-on-one time with each primary caregiver",
    ],
    red_flags: &[
        "Regression in sleep, eating, or toileting",
        "Withdrawal from friends or favorite activities",
        "A sudden drop in school performance",
        "Expressing guilt or responsibility for the changes",
    ],
};

const PARENT_GUIDANCE: RoleGuidance = RoleGuidance {
    communication_approach: "Co-parenting consistency: agree on shared messages before speaking with the children, \
         and keep adult disagreements out of their hearing",
    support_needs: &[
        "Support in setting and holding boundaries",
        "A structured co-parenting communication channel",
        "A personal support network or counseling outside the family",
        "A clear division of logistics and handoffs",
    ],
    red_flags: &[
        "Using children as messengers or confidants (triangulation)",
        "Criticizing the other parent in front of the children",
        "Escalating conflict during handoffs",
        "Neglecting their own rest and self-care",
    ],
};

const GENERAL_GUIDANCE: RoleGuidance = RoleGuidance {
    communication_approach: "Clear, respectful communication adapted to the individual's operating style, \
         with expectations stated explicitly",
    support_needs: &[
        "A defined role and responsibilities during the transition",
        "Regular check-ins with a named point of contact",
        "Access to support resources when stress rises",
    ],
    red_flags: &[
        "Disengaging from check-ins or shared channels",
        "Rising irritability or conflict",
        "Repeatedly missed commitments",
    ],
};

/// The guidance bundle for a role category.
pub fn guidance_for(category: RoleCategory) -> &'static RoleGuidance {
    match category {
        RoleCategory::Dependent => &DEPENDENT_GUIDANCE,
        RoleCategory::Parent => &PARENT_GUIDANCE,
        RoleCategory::General => &GENERAL_GUIDANCE,
    }
}

/// Everything resolved for one participant.
#[derive(Debug, Clone, Copy)]
pub struct NodeGuidance<'a> {
    pub persona: ResolvedPersona<'a>,
    pub category: RoleCategory,
    pub role: &'static RoleGuidance,
}

/// Resolve a participant's persona profile and role guidance.
///
/// Never fails: unknown personas fall back through the taxonomy, and roles
/// that match no rule get the general bundle.
pub fn resolve_node<'a>(taxonomy: &'a Taxonomy, node: &ProtocolNode) -> NodeGuidance<'a> {
    let category = classify_role(node);
    NodeGuidance {
        persona: taxonomy.os_profile(&node.os),
        category,
        role: guidance_for(category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(role: &str, age: Option<u32>, os: &str) -> ProtocolNode {
        ProtocolNode {
            name: "N".to_string(),
            age,
            role: role.to_string(),
            os: os.to_string(),
        }
    }

    #[test]
    fn child_gets_age_appropriate_messaging() {
        let g = resolve_node(Taxonomy::builtin(), &node("Child", Some(8), "practical"));
        assert_eq!(g.category, RoleCategory::Dependent);
        assert!(g.role.communication_approach.starts_with("Age-appropriate messaging"));
        assert!(g.role.support_needs.iter().any(|s| s.contains("routines")));
    }

    #[test]
    fn parent_gets_triangulation_red_flag() {
        let g = resolve_node(Taxonomy::builtin(), &node("Parent", None, "emotional"));
        assert_eq!(g.category, RoleCategory::Parent);
        assert_eq!(g.persona.key, "emotional");
        assert!(g.role.red_flags.iter().any(|f| f.contains("triangulation")));
    }

    #[test]
    fn unknown_persona_resolves_to_practical() {
        let tax = Taxonomy::builtin();
        let g = resolve_node(tax, &node("Coach", None, "unknown-os-xyz"));
        assert_eq!(g.category, RoleCategory::General);
        assert!(g.persona.fell_back);
        assert_eq!(g.persona.profile, tax.os_profile("practical").profile);
    }

    #[test]
    fn bundles_are_distinct() {
        assert_ne!(
            guidance_for(RoleCategory::Dependent),
            guidance_for(RoleCategory::Parent)
        );
        assert_ne!(
            guidance_for(RoleCategory::Parent),
            guidance_for(RoleCategory::General)
        );
    }
}
