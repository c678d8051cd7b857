use crate::inventory::Level;
use crate::planner::types::{ProjectPlan, TimelineEntry};

/// Human-readable roadmap report
pub fn build_markdown(plan: &ProjectPlan) -> String {
    let mut md = String::new();
    let summary = &plan.summary;

    md.push_str("# Migration Roadmap\n\n");
    md.push_str(&format!("**Start:** {}\n", summary.duration.start_date));
    md.push_str(&format!("**End:** {}\n", summary.duration.end_date));
    md.push_str(&format!(
        "**Duration:** {} days\n\n",
        summary.duration.total_days
    ));

    // Overview
    md.push_str("## Overview\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Servers | {} |\n", summary.servers.total));
    md.push_str(&format!(
        "| Critical path servers | {} |\n",
        summary.critical_path.count
    ));
    md.push_str(&format!("| Total cost | {:.2} |\n", summary.costs.total));
    md.push_str(&format!("| Risks | {} |\n", summary.risks.total));
    for level in [Level::High, Level::Medium, Level::Low] {
        md.push_str(&format!(
            "| {} severity | {} |\n",
            level,
            summary.risks.by_level.get(&level).unwrap_or(&0)
        ));
    }
    md.push('\n');

    // Timeline
    md.push_str("## Timeline\n\n");
    md.push_str("| # | Server | Strategy | Complexity | Start | End | Days | Cost | Critical |\n");
    md.push_str("|---|--------|----------|------------|-------|-----|------|------|----------|\n");
    for (idx, entry) in plan.timeline.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
            idx + 1,
            display_name(entry),
            entry.server.strategy,
            entry.server.complexity,
            entry.start_date,
            entry.end_date,
            entry.span_days(),
            format_cost(entry),
            if entry.critical_path { "yes" } else { "" }
        ));
    }
    md.push('\n');

    // Milestones
    md.push_str("## Milestones\n\n");
    for milestone in &plan.milestones {
        md.push_str(&format!(
            "- **{}** ({}): {}\n",
            milestone.date, milestone.name, milestone.description
        ));
    }
    md.push('\n');

    if !summary.risks.top_risks.is_empty() {
        md.push_str("## Top Risks\n\n");
        md.push_str("| Server | Category | Severity | Probability | Description |\n");
        md.push_str("|--------|----------|----------|-------------|-------------|\n");
        for top in &summary.risks.top_risks {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                top.server_id,
                top.risk.category,
                top.risk.severity,
                top.risk.probability,
                top.risk.description
            ));
        }
        md.push('\n');
    }

    let dependencies = &summary.dependencies;
    if !dependencies.ordering_conflicts.is_empty() || !dependencies.unresolved.is_empty() {
        md.push_str("## Dependency Findings\n\n");
        for conflict in &dependencies.ordering_conflicts {
            md.push_str(&format!(
                "- `{}` is scheduled before its dependency `{}`\n",
                conflict.server_id, conflict.depends_on
            ));
        }
        for id in &dependencies.unresolved {
            md.push_str(&format!("- `{}` is not part of this roadmap\n", id));
        }
        md.push('\n');
    }

    if !plan.recommendations.is_empty() {
        md.push_str("## Recommendations\n\n");
        for rec in &plan.recommendations {
            md.push_str(&format!(
                "- **[{}] {}:** {}\n",
                rec.priority, rec.category, rec.description
            ));
        }
        md.push('\n');
    }

    // Per-server phase breakdown
    md.push_str("## Server Details\n\n");
    for entry in &plan.timeline {
        md.push_str(&format!("### {}\n\n", display_name(entry)));
        md.push_str("| Phase | Start | End | Days | Risks |\n");
        md.push_str("|-------|-------|-----|------|-------|\n");
        for phase in &entry.phases {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                phase.name,
                phase.start_date,
                phase.end_date,
                phase.duration,
                phase.risks.len()
            ));
        }
        if !entry.risks.is_empty() {
            md.push('\n');
            for risk in &entry.risks {
                md.push_str(&format!(
                    "- [{}] {}: {}\n",
                    risk.severity, risk.category, risk.description
                ));
            }
        }
        md.push('\n');
    }

    md
}

fn display_name(entry: &TimelineEntry) -> String {
    if entry.server.name.is_empty() || entry.server.name == entry.server.id {
        entry.server.id.clone()
    } else {
        format!("{} ({})", entry.server.name, entry.server.id)
    }
}

fn format_cost(entry: &TimelineEntry) -> String {
    match entry.cost_estimate.error {
        Some(_) => "n/a".to_string(),
        None => format!("{:.2}", entry.cost_estimate.total),
    }
}
