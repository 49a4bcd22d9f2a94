//! Document assembly: run every section generator once and concatenate the
//! rendered sections into the final markdown document.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::input::ProtocolInput;
use crate::taxonomy::Taxonomy;

use super::contingency::{ContingencyPlan, format_contingency_plans, generate_contingency_plans};
use super::individual::{
    IndividualProtocol, format_individual_protocols, generate_individual_protocols,
};
use super::metrics::{SuccessMetric, format_success_metrics, generate_success_metrics};
use super::overview::generate_master_overview;
use super::schedule::{Milestone, format_timeline, generate_timeline};
use super::stakeholders::{
    StakeholderTemplate, format_stakeholder_templates, generate_stakeholder_templates,
};

/// Separator placed after every section except the last.
const SECTION_BREAK: &str = "\n\n---\n\n";

/// The complete generated protocol: structured sections plus the assembled
/// markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProtocol {
    pub master_overview: String,
    pub individual_protocols: Vec<IndividualProtocol>,
    pub stakeholder_templates: Vec<StakeholderTemplate>,
    pub timeline: Vec<Milestone>,
    pub success_metrics: Vec<SuccessMetric>,
    pub contingency_plans: Vec<ContingencyPlan>,
    pub full_document: String,
}

/// Generate a protocol with the built-in taxonomy.
pub fn generate_protocol(input: &ProtocolInput, today: NaiveDate) -> GeneratedProtocol {
    generate_protocol_with(Taxonomy::builtin(), input, today)
}

/// Generate a protocol anchored at the local calendar date, read once.
pub fn generate_protocol_now(input: &ProtocolInput) -> GeneratedProtocol {
    let today = chrono::Local::now().date_naive();
    generate_protocol(input, today)
}

/// Generate a protocol with an explicit taxonomy.
///
/// This is a total function: any input produces a protocol. Inputs that skip
/// validation (no nodes, non-positive days) give degenerate sections rather
/// than an error.
pub fn generate_protocol_with(
    taxonomy: &Taxonomy,
    input: &ProtocolInput,
    today: NaiveDate,
) -> GeneratedProtocol {
    let master_overview = generate_master_overview(input, taxonomy);
    let individual_protocols = generate_individual_protocols(input, taxonomy);
    let stakeholder_templates = generate_stakeholder_templates(input);
    let timeline = generate_timeline(input, today);
    let success_metrics = generate_success_metrics(input, taxonomy);
    let contingency_plans = generate_contingency_plans(input);

    let sections = [
        master_overview.clone(),
        format_individual_protocols(&individual_protocols),
        format_stakeholder_templates(&stakeholder_templates),
        format_timeline(&timeline),
        format_success_metrics(&success_metrics),
        format_contingency_plans(&contingency_plans),
    ];
    let full_document = assemble_document(input, today, &sections);

    tracing::info!(
        structure = %input.structure,
        nodes = individual_protocols.len(),
        stakeholder_templates = stakeholder_templates.len(),
        metrics = success_metrics.len(),
        contingency_plans = contingency_plans.len(),
        "protocol generated"
    );

    GeneratedProtocol {
        master_overview,
        individual_protocols,
        stakeholder_templates,
        timeline,
        success_metrics,
        contingency_plans,
        full_document,
    }
}

/// Title block shown above the first section.
pub fn document_header(input: &ProtocolInput, today: NaiveDate) -> String {
    format!(
        "# Coordination Protocol: {}\n\n_Generated {} for {} participant(s) over {} days._\n\n",
        input.structure,
        today.format("%Y-%m-%d"),
        input.nodes.len(),
        input.timeline.days,
    )
}

/// Join rendered sections under the title block, with `---` after every
/// section except the last.
pub fn assemble_document(input: &ProtocolInput, today: NaiveDate, sections: &[String]) -> String {
    let body = sections
        .iter()
        .map(|s| s.trim_end())
        .collect::<Vec<_>>()
        .join(SECTION_BREAK);

    let mut doc = document_header(input, today);
    doc.push_str(&body);
    doc.push('\n');
    doc
}

// ---------------------------------------------------------------------------
// Partial rendering
// ---------------------------------------------------------------------------

/// A single renderable section of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Individuals,
    Stakeholders,
    Timeline,
    Metrics,
    Contingency,
}

impl Section {
    /// Every section, in document order.
    pub const ALL: [Section; 6] = [
        Self::Overview,
        Self::Individuals,
        Self::Stakeholders,
        Self::Timeline,
        Self::Metrics,
        Self::Contingency,
    ];
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Overview => "overview",
            Self::Individuals => "individuals",
            Self::Stakeholders => "stakeholders",
            Self::Timeline => "timeline",
            Self::Metrics => "metrics",
            Self::Contingency => "contingency",
        };
        f.write_str(s)
    }
}

impl FromStr for Section {
    type Err = SectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overview" => Ok(Self::Overview),
            "individuals" => Ok(Self::Individuals),
            "stakeholders" => Ok(Self::Stakeholders),
            "timeline" => Ok(Self::Timeline),
            "metrics" => Ok(Self::Metrics),
            "contingency" => Ok(Self::Contingency),
            other => Err(SectionParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Section`] string.
#[derive(Debug, Clone)]
pub struct SectionParseError(pub String);

impl fmt::Display for SectionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid section: {:?} (expected overview, individuals, stakeholders, timeline, metrics, or contingency)",
            self.0
        )
    }
}

impl std::error::Error for SectionParseError {}

/// Generate and render one section on its own.
pub fn render_section(
    section: Section,
    taxonomy: &Taxonomy,
    input: &ProtocolInput,
    today: NaiveDate,
) -> String {
    match section {
        Section::Overview => generate_master_overview(input, taxonomy),
        Section::Individuals => {
            format_individual_protocols(&generate_individual_protocols(input, taxonomy))
        }
        Section::Stakeholders => format_stakeholder_templates(&generate_stakeholder_templates(input)),
        Section::Timeline => format_timeline(&generate_timeline(input, today)),
        Section::Metrics => format_success_metrics(&generate_success_metrics(input, taxonomy)),
        Section::Contingency => format_contingency_plans(&generate_contingency_plans(input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ProtocolNode, Timeline};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    fn input() -> ProtocolInput {
        ProtocolInput {
            structure: "work-team".to_string(),
            nodes: vec![ProtocolNode {
                name: "Ada".to_string(),
                age: None,
                role: "Lead".to_string(),
                os: "technical".to_string(),
            }],
            current_state: "reorg".to_string(),
            timeline: Timeline {
                days: 28,
                target_date: "2025-03-30".to_string(),
            },
            stakeholders: vec![],
            constraints: vec![],
            protocol_notes: None,
        }
    }

    #[test]
    fn section_names_round_trip() {
        for section in Section::ALL {
            assert_eq!(section.to_string().parse::<Section>().unwrap(), section);
        }
        assert!("appendix".parse::<Section>().is_err());
    }

    #[test]
    fn document_sections_appear_in_fixed_order() {
        let doc = generate_protocol(&input(), today()).full_document;
        let headings = [
            "## Master Overview",
            "## Individual Protocols",
            "## Stakeholder Communication",
            "## Timeline & Milestones",
            "## Success Metrics",
            "## Contingency Plans",
        ];
        let positions: Vec<usize> = headings.iter().map(|h| doc.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn every_section_but_the_last_is_terminated() {
        let doc = generate_protocol(&input(), today()).full_document;
        assert_eq!(doc.matches("\n---\n").count(), 5);
        let last = doc.rfind("\n---\n").unwrap();
        let contingency = doc.find("## Contingency Plans").unwrap();
        assert!(last < contingency);
        assert!(doc.ends_with('\n'));
        assert!(!doc.trim_end().ends_with("---"));
    }

    #[test]
    fn header_uses_injected_date() {
        let doc = generate_protocol(&input(), today()).full_document;
        assert!(doc.starts_with("# Coordination Protocol: work-team\n"));
        assert!(doc.contains("_Generated 2025-03-03 for 1 participant(s) over 28 days._"));
    }

    #[test]
    fn partial_render_matches_full_document_section() {
        let tax = Taxonomy::builtin();
        let doc = generate_protocol_with(tax, &input(), today()).full_document;
        for section in Section::ALL {
            let rendered = render_section(section, tax, &input(), today());
            assert!(
                doc.contains(rendered.trim_end()),
                "section {section} not found verbatim in document"
            );
        }
    }
}
