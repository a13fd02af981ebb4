//! Explanations of what a command is about to do.

use colored::Colorize;
use ndi::{AnalyticQuery, Scope, ScopedRequest, SnapshotId, TELEMETRY_PREFIX};

/// Command explanation builder.
///
/// Explanations go to stderr so they never mix with JSON or YAML on stdout.
#[derive(Debug, Clone, Default)]
pub struct Explain {
    description: String,
    what_happens: Vec<String>,
    api_calls: Vec<String>,
    note: Option<String>,
}

impl Explain {
    fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..Self::default()
        }
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn api(mut self, request: &ScopedRequest) -> Self {
        self.api_calls.push(format!("GET /{TELEMETRY_PREFIX}/{request}"));
        self
    }

    fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    /// The requests this explanation lists, in order
    pub fn api_calls(&self) -> &[String] {
        &self.api_calls
    }

    /// Print the explanation to stderr.
    pub fn print(&self) {
        eprintln!();
        eprintln!("{}", "=== What This Does ===".bold().cyan());
        eprintln!("{}", self.description);
        eprintln!();

        if !self.what_happens.is_empty() {
            eprintln!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, step);
            }
            eprintln!();
        }

        if !self.api_calls.is_empty() {
            eprintln!("{}", "API Calls:".bold());
            for call in &self.api_calls {
                eprintln!("  {}", call.dimmed());
            }
        }

        if let Some(note) = &self.note {
            eprintln!();
            eprintln!("{} {}", "Note:".bold(), note);
        }

        eprintln!();
        eprintln!("{}", "=== Results ===".bold().cyan());
        eprintln!();
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn compliance(scope: &Scope, snapshot_id: Option<&str>) -> Self {
        let mut explanation = Self::new(&format!(
            "Collects the compliance analysis of fabric {} in insights group {}.",
            scope.fabric, scope.insights_group
        ));

        let snapshot = match snapshot_id.filter(|id| !id.is_empty()) {
            Some(id) => {
                explanation = explanation.step(&format!("Uses snapshot {id} as given"));
                SnapshotId::new(id)
            }
            None => {
                explanation = explanation
                    .step("Looks up the most recent finished snapshot")
                    .api(&ScopedRequest::latest_epoch(scope));
                SnapshotId::new("<latest>")
            }
        };

        explanation = explanation
            .step("Runs six read-only queries against that snapshot, concurrently")
            .step("Fails as a whole if any query fails; no partial report is printed")
            .step("Prints one report with six keys");

        for query in AnalyticQuery::ALL {
            explanation = explanation.api(&query.request(scope, &snapshot));
        }

        explanation.note("Nothing on the fabric is changed; --check returns the same report.")
    }

    pub fn config_show() -> Self {
        Self::new("Shows the CLI configuration file contents, with secrets masked.")
            .step("Reads the TOML config file; a missing file means built-in defaults")
    }
}
