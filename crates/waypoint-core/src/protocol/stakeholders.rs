//! Stakeholder communication templates.
//!
//! Each stakeholder label is classified against the ordered rules in
//! [`super::classify::STAKEHOLDER_RULES`]; a matching label yields one
//! template for its category, an unmatched label yields nothing. If no label
//! matched at all, a single general template is emitted so the section is
//! never empty. `[Placeholder]` tokens are left for the reader to fill in.

use serde::{Deserialize, Serialize};

use crate::input::ProtocolInput;

use super::classify::{StakeholderCategory, classify_stakeholder};

/// A ready-to-edit message for one stakeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StakeholderTemplate {
    /// Display name of the category (e.g. "School/Educational").
    pub stakeholder_type: String,
    pub category: StakeholderCategory,
    /// The input label that produced this template. `None` for the fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
    pub purpose: String,
    pub frequency: String,
    pub template: String,
}

struct TemplateText {
    purpose: &'static str,
    frequency: &'static str,
    body: &'static str,
}

fn template_text(category: StakeholderCategory) -> TemplateText {
    match category {
        StakeholderCategory::Legal => TemplateText {
            purpose: "Keep legal counsel informed of agreements, changes, and upcoming milestones",
            frequency: "At each milestone, and whenever an agreement changes",
            body: "Dear [Attorney Name],\n\n\
                   We are writing with an update on the coordination protocol for [Matter/Case]. \
                   The following agreements are currently in place:\n\n\
                   [Summary of Agreements]\n\n\
                   Our next milestone is [Next Milestone] on [Date]. Please let us know if there is \
                   anything we should address before then.\n\n\
                   Regards,\n\
                   [Your Name]",
        },
        StakeholderCategory::ExtendedFamily => TemplateText {
            purpose: "Share a consistent, neutral account and ask for specific, non-partisan support",
            frequency: "Once at the start, then monthly or as needed",
            body: "Hi [Name],\n\n\
                   We wanted you to hear directly from us that our family is going through a period of change. \
                   [Brief, Neutral Summary]\n\n\
                   The most helpful thing you can do right now is [Specific Support Request]. \
                   We ask that you avoid discussing [Topics to Avoid] around the children.\n\n\
                   Thank you for your support,\n\
                   [Your Names]",
        },
        StakeholderCategory::School => TemplateText {
            purpose: "Help educators support the child's routine and flag concerns early",
            frequency: "At the start of the transition, then once per term",
            body: "Dear [Teacher/Counselor Name],\n\n\
                   We would like to let you know that [Child Name] is going through a family transition. \
                   [Brief Context]\n\n\
                   Please contact [Primary Contact] at [Contact Details] if you notice changes in mood, \
                   behavior, or schoolwork. Both caregivers should continue to receive school \
                   communications at [Email Addresses].\n\n\
                   Thank you,\n\
                   [Caregiver Names]",
        },
        StakeholderCategory::Therapeutic => TemplateText {
            purpose: "Give the therapist context on the protocol and the progress being tracked",
            frequency: "Before each scheduled session, or when a red flag appears",
            body: "Dear [Therapist Name],\n\n\
                   As background for upcoming sessions, we are following a coordination protocol focused on \
                   [Protocol Focus]. Recent observations:\n\n\
                   [Observations Since Last Session]\n\n\
                   We would value your guidance on [Specific Question].\n\n\
                   Best regards,\n\
                   [Your Name]",
        },
        StakeholderCategory::General => TemplateText {
            purpose: "Keep people outside the core group informed with a consistent message",
            frequency: "At kickoff and at the final assessment",
            body: "Hello [Name],\n\n\
                   We are currently working through a planned transition and have put a coordination \
                   protocol in place. [Brief Summary]\n\n\
                   What this means for you: [Relevant Changes]. The best point of contact is \
                   [Contact Name] at [Contact Details].\n\n\
                   Thank you,\n\
                   [Your Name]",
        },
    }
}

fn build_template(category: StakeholderCategory, source_label: Option<&str>) -> StakeholderTemplate {
    let text = template_text(category);
    StakeholderTemplate {
        stakeholder_type: category.display_name().to_string(),
        category,
        source_label: source_label.map(str::to_string),
        purpose: text.purpose.to_string(),
        frequency: text.frequency.to_string(),
        template: text.body.to_string(),
    }
}

/// One template per recognized stakeholder label, in input order, or the
/// single general template when none were recognized.
pub fn generate_stakeholder_templates(input: &ProtocolInput) -> Vec<StakeholderTemplate> {
    let mut templates: Vec<StakeholderTemplate> = input
        .stakeholders
        .iter()
        .filter_map(|label| {
            let category = classify_stakeholder(label);
            if category.is_none() {
                tracing::debug!(stakeholder = %label, "stakeholder matched no template category");
            }
            category.map(|c| build_template(c, Some(label)))
        })
        .collect();

    if templates.is_empty() {
        templates.push(build_template(StakeholderCategory::General, None));
    }

    templates
}

/// Render the stakeholder communication section.
pub fn format_stakeholder_templates(templates: &[StakeholderTemplate]) -> String {
    let mut out = String::with_capacity(1024 * templates.len().max(1));
    out.push_str("## Stakeholder Communication\n\n");

    for t in templates {
        match &t.source_label {
            Some(label) => out.push_str(&format!("### {} ({label})\n\n", t.stakeholder_type)),
            None => out.push_str(&format!("### {}\n\n", t.stakeholder_type)),
        }
        out.push_str(&format!("- **Purpose:** {}\n", t.purpose));
        out.push_str(&format!("- **Frequency:** {}\n\n", t.frequency));
        out.push_str("**Template:**\n\n");
        for line in t.template.lines() {
            if line.is_empty() {
                out.push_str(">\n");
            } else {
                out.push_str(&format!("> {line}\n"));
            }
        }
        out.push('\n');
    }

    out
}
