//! Protocol generation: classification, per-section generators and
//! formatters, and document assembly.
//!
//! Data flows one way: `ProtocolInput -> resolvers -> section generators ->
//! formatters -> assembler`. No stage holds state between calls.

pub mod assemble;
pub mod classify;
pub mod contingency;
pub mod guidance;
pub mod individual;
pub mod metrics;
pub mod overview;
pub mod schedule;
pub mod stakeholders;

pub use assemble::{
    GeneratedProtocol, Section, SectionParseError, assemble_document, generate_protocol,
    generate_protocol_now, generate_protocol_with, render_section,
};
pub use classify::{RoleCategory, StakeholderCategory, is_dependent};
pub use contingency::{ContingencyPlan, format_contingency_plans, generate_contingency_plans};
pub use guidance::{NodeGuidance, RoleGuidance, resolve_node};
pub use individual::{IndividualProtocol, format_individual_protocols, generate_individual_protocols};
pub use metrics::{MetricCategory, SuccessMetric, format_success_metrics, generate_success_metrics};
pub use overview::generate_master_overview;
pub use schedule::{Milestone, format_timeline, generate_timeline};
pub use stakeholders::{
    StakeholderTemplate, format_stakeholder_templates, generate_stakeholder_templates,
};
