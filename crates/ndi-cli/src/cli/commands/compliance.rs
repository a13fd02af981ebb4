//! `ndi compliance` - Compliance analysis report for one snapshot of a fabric.

use anyhow::{Context as _, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use ndi::{AnalysisOutcome, AnalysisRequest, ComplianceAnalysis, ResponseShape, Scope};
use serde_json::Value;
use std::time::Duration;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::cli::args::ComplianceArgs;
use crate::education::Explain;
use crate::output::{self, describe};

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Shape")]
    shape: &'static str,
    #[tabled(rename = "Contents")]
    contents: String,
}

pub async fn execute(ctx: Context, args: ComplianceArgs) -> Result<()> {
    let scope = scope(&ctx, &args);

    if ctx.explain {
        Explain::compliance(&scope, args.snapshot_id.as_deref()).print();
    }

    let client = ctx.client()?;

    let mut request = AnalysisRequest::new(scope.clone()).check_mode(args.check);
    if let Some(snapshot_id) = args.snapshot_id {
        request = request.snapshot(snapshot_id);
    }

    let spinner = output::is_pretty(ctx.output_format).then(|| spinner(&scope));

    let result = ComplianceAnalysis::new(&client).run_detailed(&request).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let outcome = result.with_context(|| format!("Compliance analysis of {scope} failed"))?;

    match output::render(&outcome.report, ctx.output_format)? {
        Some(rendered) => println!("{rendered}"),
        None => print_pretty(&scope, &outcome),
    }

    Ok(())
}

/// The scope named on the command line, falling back to the configured insights group.
fn scope(ctx: &Context, args: &ComplianceArgs) -> Scope {
    let insights_group = args
        .insights_group
        .clone()
        .or_else(|| ctx.settings.insights_group.clone())
        .unwrap_or_default();

    Scope::new(insights_group, args.fabric.clone())
}

fn spinner(scope: &Scope) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Analysing {scope}..."));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_pretty(scope: &Scope, outcome: &AnalysisOutcome) {
    let report = &outcome.report;

    println!("{} {}", "Fabric:".bold(), scope.fabric.cyan().bold());
    println!("  {} {}", "Insights group:".bold(), scope.insights_group);
    println!("  {} {}", "Snapshot:".bold(), outcome.snapshot);
    println!();

    println!("  {} {}", "Score:".bold(), headline(&report.compliance_score, "score"));
    println!("  {} {}", "Events:".bold(), headline(&report.count, "count"));
    println!();

    let rows: Vec<SectionRow> = report
        .iter()
        .map(|(query, payload)| SectionRow {
            key: query.key(),
            shape: match query.shape() {
                ResponseShape::Enveloped => "list",
                ResponseShape::Raw => "object",
            },
            contents: describe(payload),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
}

/// The named field of a raw payload, or a short description of the whole.
fn headline(payload: &Value, field: &str) -> String {
    match payload.get(field) {
        Some(Value::Number(n)) => n.to_string().green().bold().to_string(),
        Some(other) => other.to_string(),
        None => describe(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn headline_prefers_the_named_field() {
        colored::control::set_override(false);
        assert_eq!(headline(&json!({ "score": 92 }), "score"), "92");
        assert_eq!(headline(&json!({ "total": 3 }), "count"), "1 field(s)");
        assert_eq!(headline(&Value::Null, "count"), "-");
    }
}
