//! Success metrics, grouped into five fixed categories.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::ProtocolInput;
use crate::taxonomy::Taxonomy;

use super::classify::is_dependent;

/// Metric grouping. Rendering always follows [`MetricCategory::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Communication,
    Wellbeing,
    Progress,
    SystemHealth,
    RiskManagement,
}

impl MetricCategory {
    /// Every category, in display order.
    pub const ALL: [MetricCategory; 5] = [
        Self::Communication,
        Self::Wellbeing,
        Self::Progress,
        Self::SystemHealth,
        Self::RiskManagement,
    ];
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Communication => "Communication",
            Self::Wellbeing => "Wellbeing",
            Self::Progress => "Progress",
            Self::SystemHealth => "System Health",
            Self::RiskManagement => "Risk Management",
        };
        f.write_str(s)
    }
}

/// A single measurable outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessMetric {
    pub category: MetricCategory,
    pub metric: String,
    pub target: String,
    pub measurement: String,
}

impl SuccessMetric {
    fn new(
        category: MetricCategory,
        metric: impl Into<String>,
        target: impl Into<String>,
        measurement: impl Into<String>,
    ) -> Self {
        Self {
            category,
            metric: metric.into(),
            target: target.into(),
            measurement: measurement.into(),
        }
    }
}

/// Build the flat metric list for `input`, ordered by category.
///
/// Wellbeing has one entry per node; System Health has one entry per
/// priority of the resolved structure profile; Risk Management gains a
/// stakeholder alignment metric when stakeholders are present.
pub fn generate_success_metrics(input: &ProtocolInput, taxonomy: &Taxonomy) -> Vec<SuccessMetric> {
    use MetricCategory::*;

    let mut metrics = vec![
        SuccessMetric::new(
            Communication,
            "Response time to coordination messages",
            "Within 24 hours",
            "Message log reviewed at each checkpoint",
        ),
        SuccessMetric::new(
            Communication,
            "Scheduled check-ins completed",
            "At least 90% of planned check-ins",
            "Check-in attendance record",
        ),
    ];

    for node in &input.nodes {
        let metric = if is_dependent(node) {
            SuccessMetric::new(
                Wellbeing,
                format!("{}: emotional adjustment and routine stability", node.name),
                "Stable or improving mood and a consistent daily routine",
                "Weekly caregiver observations and behavior notes",
            )
        } else {
            SuccessMetric::new(
                Wellbeing,
                format!("{}: stress level and self-care", node.name),
                "Self-reported stress at or below 5/10",
                "Weekly self-assessment on a 1-10 scale",
            )
        };
        metrics.push(metric);
    }

    metrics.push(SuccessMetric::new(
        Progress,
        "Milestones completed on schedule",
        format!("All 5 milestones reached by {}", input.timeline.target_date),
        "Timeline review at each checkpoint",
    ));
    metrics.push(SuccessMetric::new(
        Progress,
        "Agreed action items closed",
        "At least 80% closed within their agreed window",
        "Shared action list",
    ));

    let profile = taxonomy.structure_profile(&input.structure);
    for priority in &profile.priorities {
        metrics.push(SuccessMetric::new(
            SystemHealth,
            format!("Priority: {priority}"),
            "Visible, agreed progress by the Mid-Point Review",
            "Joint rating (1-5) at each checkpoint",
        ));
    }

    metrics.push(SuccessMetric::new(
        RiskManagement,
        "Escalations handled within protocol",
        "Every escalation addressed within 72 hours",
        "Contingency log",
    ));
    if !input.stakeholders.is_empty() {
        metrics.push(SuccessMetric::new(
            RiskManagement,
            "Stakeholder alignment",
            "No unresolved stakeholder conflicts at the Late Phase Checkpoint",
            "Stakeholder feedback gathered before each checkpoint",
        ));
    }

    metrics
}

/// Render the metrics section. Categories with no entries are skipped;
/// the others appear in [`MetricCategory::ALL`] order.
pub fn format_success_metrics(metrics: &[SuccessMetric]) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str("## Success Metrics\n\n");

    for category in MetricCategory::ALL {
        let entries: Vec<&SuccessMetric> =
            metrics.iter().filter(|m| m.category == category).collect();
        if entries.is_empty() {
            continue;
        }

        out.push_str(&format!("### {category}\n\n"));
        for m in entries {
            out.push_str(&format!("- **{}**\n", m.metric));
            out.push_str(&format!("  - Target: {}\n", m.target));
            out.push_str(&format!("  - Measured by: {}\n", m.measurement));
        }
        out.push('\n');
    }

    out
}
