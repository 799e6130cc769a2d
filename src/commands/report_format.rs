use pipeline_forecast::services::simulation_types::{DealImpact, SimulationResult};
use pipeline_forecast::services::validation::ValidationIssue;

pub fn format_simulation_report(result: &SimulationResult) -> String {
    let summary = &result.summary;
    let metadata = &result.metadata;

    let mut lines = Vec::new();
    lines.push("Simulation Report".to_string());
    lines.push(format!("Run id: {}", metadata.run_id));
    lines.push(format!("Seed: {}", metadata.seed));
    lines.push(format!("Iterations: {}", metadata.iterations));
    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.push(format!("Mean: {:.2}", summary.mean));
    lines.push(format!("Median: {:.2}", summary.median));
    lines.push(format!("Standard deviation: {:.2}", summary.standard_deviation));
    lines.push(format!("Min: {:.2}", summary.min));
    lines.push(format!("Max: {:.2}", summary.max));
    lines.push(format!("P10: {:.2}", summary.percentile10));
    lines.push(format!("P90: {:.2}", summary.percentile90));

    lines.push(String::new());
    lines.push("Confidence intervals:".to_string());
    lines.push("Level | Lower | Upper".to_string());
    lines.push("------|-------|------".to_string());
    for interval in &result.confidence_intervals {
        lines.push(format!(
            "{} | {:.2} | {:.2}",
            format_percentage(interval.level),
            interval.lower,
            interval.upper
        ));
    }

    if !result.target_probabilities.is_empty() {
        lines.push(String::new());
        lines.push("Target probabilities:".to_string());
        lines.push("Target | Probability".to_string());
        lines.push("-------|------------".to_string());
        for target in &result.target_probabilities {
            lines.push(format!(
                "{:.2} | {}",
                target.target,
                format_percentage(target.probability)
            ));
        }
    }

    if !result.deal_impacts.is_empty() {
        lines.push(String::new());
        lines.push("Deal impacts:".to_string());
        lines.push("Deal | Expected value | Variance contribution | Sensitivity".to_string());
        lines.push("-----|----------------|-----------------------|------------".to_string());
        lines.extend(result.deal_impacts.iter().map(format_deal_impact_row));
    }

    lines.join("\n")
}

fn format_deal_impact_row(impact: &DealImpact) -> String {
    format!(
        "{deal} | {expected:.2} | {variance:.2} | {sensitivity}",
        deal = impact.deal_id,
        expected = impact.expected_value,
        variance = impact.variance_contribution,
        sensitivity = format_percentage(impact.sensitivity)
    )
}

fn format_percentage(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn format_validation_issues(message: &str, issues: &[ValidationIssue]) -> String {
    let mut lines = vec![message.to_string()];
    lines.extend(issues.iter().map(|issue| {
        let path = if issue.path.is_empty() {
            "(root)"
        } else {
            issue.path.as_str()
        };
        format!("  {path} [{}]: {}", issue.code.as_str(), issue.message)
    }));
    lines.join("\n")
}
