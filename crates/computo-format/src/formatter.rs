//! Result formatting: JSON, Table, Markdown, and Summary output.

use computo_core::{ChainConfig, ChainMode, ComputationResult, View};
use computo_solver::{AllocationProposal, DistributionMode, TargetOutcome};

use crate::dates::{format_dmy, format_dmy_opt};

/// Output format for computation results and proposals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
    Markdown,
    /// Plain-text report meant to be pasted into a document.
    Summary,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            "markdown" | "md" => Ok(Self::Markdown),
            "summary" => Ok(Self::Summary),
            other => Err(format!(
                "unknown output format '{other}' (expected json, table, markdown, or summary)"
            )),
        }
    }
}

/// Rows of cells under a header, rendered as an aligned table or Markdown.
struct Table {
    header: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(header: Vec<&'static str>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn render_plain(&self) -> String {
        if self.rows.is_empty() {
            return "(no rows)\n".to_string();
        }

        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let mut output = String::new();

        let header: Vec<String> = self
            .header
            .iter()
            .enumerate()
            .map(|(i, h)| pad(h, widths[i]))
            .collect();
        output.push_str(header.join(" | ").trim_end());
        output.push('\n');

        let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        output.push_str(&sep.join("-+-"));
        output.push('\n');

        for row in &self.rows {
            let vals: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| pad(cell, widths.get(i).copied().unwrap_or(0)))
                .collect();
            output.push_str(vals.join(" | ").trim_end());
            output.push('\n');
        }

        output
    }

    fn render_markdown(&self) -> String {
        if self.rows.is_empty() {
            return "*No rows*\n".to_string();
        }

        let mut output = String::new();
        output.push_str("| ");
        output.push_str(&self.header.join(" | "));
        output.push_str(" |\n");

        output.push_str("| ");
        let seps: Vec<&str> = self.header.iter().map(|_| "---").collect();
        output.push_str(&seps.join(" | "));
        output.push_str(" |\n");

        for row in &self.rows {
            output.push_str("| ");
            output.push_str(&row.join(" | "));
            output.push_str(" |\n");
        }

        output
    }
}

// Width in chars, not bytes: dates fall back to "—".
fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
}

fn chain_mode_label(mode: ChainMode) -> &'static str {
    match mode {
        ChainMode::NextDay => "next day",
        ChainMode::SameDay => "same day",
    }
}

fn view_label(view: View) -> &'static str {
    match view {
        View::Official => "official (exclusive)",
        View::Doctrinal => "doctrinal (inclusive)",
    }
}

fn mode_label(mode: DistributionMode) -> &'static str {
    match mode {
        DistributionMode::MostSevereFirst => "most severe first",
        DistributionMode::Proportional => "proportional",
    }
}

fn outcome_label(outcome: &TargetOutcome) -> String {
    match outcome {
        TargetOutcome::Exact { completion } => format!("exact ({})", format_dmy(*completion)),
        TargetOutcome::Adjusted { completion, delta } => {
            format!("adjusted by {delta:+} ({})", format_dmy(*completion))
        }
        TargetOutcome::BestEffort { completion } => {
            format!("best effort ({})", format_dmy_opt(*completion))
        }
    }
}

fn adjustments_label(config: &ChainConfig) -> String {
    let adj = config.adjustments;
    if adj.tm_days == 0 && adj.cet_days == 0 {
        "—".to_string()
    } else {
        format!("TM {:+}, CET {:+}", adj.tm_days, adj.cet_days)
    }
}

// === Computation results ===

/// Formats a computation result. `config` supplies the policy labels that
/// the result itself does not carry.
#[must_use]
pub fn format_computation(
    result: &ComputationResult,
    config: &ChainConfig,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => {
            let mut out = milestone_table(result).render_plain();
            out.push('\n');
            out.push_str(&span_table(result).render_plain());
            push_warnings(&mut out, result, "");
            out
        }
        OutputFormat::Markdown => {
            let mut out = String::from("## Milestones\n\n");
            out.push_str(&milestone_table(result).render_markdown());
            out.push_str("\n## Causes\n\n");
            out.push_str(&span_table(result).render_markdown());
            if !result.warnings.is_empty() {
                out.push_str("\n## Warnings\n\n");
                push_warnings(&mut out, result, "- ");
            }
            out
        }
        OutputFormat::Summary => summary(result, config),
    }
}

fn milestone_table(result: &ComputationResult) -> Table {
    let mut table = Table::new(vec!["milestone", "date", "days"]);
    let mut row = |name: &str, date: String, days: String| {
        table.push(vec![name.to_string(), date, days]);
    };
    row("start", format_dmy(result.start), String::new());
    row(
        "completion",
        format_dmy_opt(result.completion_date),
        result.termination_base_days.to_string(),
    );
    row(
        "TM",
        format_dmy_opt(result.tm_display_date),
        result.tm_days.to_string(),
    );
    row(
        "TMBI",
        format_dmy_opt(result.tmbi_date),
        result.start_to_tmbi_days.to_string(),
    );
    row(
        "CET",
        format_dmy_opt(result.cet_display_date),
        result.cet_days.to_string(),
    );
    table
}

fn span_table(result: &ComputationResult) -> Table {
    let mut table = Table::new(vec![
        "cause",
        "gross start",
        "gross end",
        "gross days",
        "credit",
        "credited end",
        "credited days",
    ]);
    for span in &result.spans {
        table.push(vec![
            format!("#{}", span.index + 1),
            format_dmy(span.gross_start),
            format_dmy(span.gross_end),
            span.gross_days.to_string(),
            span.applied_credit.to_string(),
            if span.credited_days > 0 {
                format_dmy(span.credited_end)
            } else {
                "—".to_string()
            },
            span.credited_days.to_string(),
        ]);
    }
    table
}

fn push_warnings(out: &mut String, result: &ComputationResult, bullet: &str) {
    for warning in &result.warnings {
        out.push_str(bullet);
        if bullet.is_empty() {
            out.push_str("warning: ");
        }
        out.push_str(&warning.to_string());
        out.push('\n');
    }
}

fn summary(result: &ComputationResult, config: &ChainConfig) -> String {
    let total_credit = result.per_cause_credit_days + result.global_credit_days;
    let mut text = String::from("Computation summary\n");
    text.push_str(&format!("Start: {}\n", format_dmy(result.start)));
    text.push_str(&format!(
        "Completion: {}  [gross {} · termination base {}]\n",
        format_dmy_opt(result.completion_date),
        result.gross_total_days,
        result.termination_base_days
    ));
    text.push_str(&format!("TM: {}\n", format_dmy_opt(result.tm_display_date)));
    text.push_str(&format!(
        "TMBI: {}  [inclusive span {} days]\n",
        format_dmy_opt(result.tmbi_date),
        result.start_to_tmbi_days
    ));
    text.push_str(&format!(
        "CET: {}  [computed {} days]\n",
        format_dmy_opt(result.cet_display_date),
        result.cet_days
    ));
    text.push_str(&format!(
        "Regime: {} (suggested by causes: {})\n",
        result.regime, result.suggested_regime
    ));
    text.push_str(&format!("Chaining: {}\n", chain_mode_label(config.chain_mode)));
    text.push_str(&format!("Minimums view: {}\n", view_label(config.view)));
    text.push_str(&format!("Adjustments: {}\n", adjustments_label(config)));
    text.push_str(&format!(
        "Credit: per cause {} · global {} · total {}\n",
        result.per_cause_credit_days, result.global_credit_days, total_credit
    ));
    if !result.valid {
        text.push_str("Status: invalid (no causes or nothing left to serve)\n");
    }
    for warning in &result.warnings {
        text.push_str(&format!("Warning: {warning}\n"));
    }
    text
}

// === Proposals ===

/// Formats a credit proposal.
#[must_use]
pub fn format_proposal(proposal: &AllocationProposal, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(proposal).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => {
            let mut out = item_table(proposal).render_plain();
            out.push('\n');
            out.push_str(&totals_line(proposal));
            out
        }
        OutputFormat::Markdown => {
            let mut out = String::from("## Proposed credit\n\n");
            out.push_str(&item_table(proposal).render_markdown());
            out.push('\n');
            out.push_str(&totals_line(proposal));
            out
        }
        OutputFormat::Summary => {
            let mut text = format!("Credit proposal ({})\n", mode_label(proposal.mode));
            for item in &proposal.items {
                text.push_str(&format!(
                    "Cause {}: +{} days (capacity {}{})\n",
                    item.cause,
                    item.proposed,
                    item.capacity,
                    if item.capped { ", full" } else { "" }
                ));
            }
            text.push_str(&totals_line(proposal));
            text
        }
    }
}

fn item_table(proposal: &AllocationProposal) -> Table {
    let mut table = Table::new(vec!["cause", "proposed", "capacity", "capped"]);
    for item in &proposal.items {
        table.push(vec![
            item.cause.to_string(),
            item.proposed.to_string(),
            item.capacity.to_string(),
            if item.capped { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}

fn totals_line(proposal: &AllocationProposal) -> String {
    let mut line = format!(
        "Allocated {} of {} (remaining {})\n",
        proposal.allocated, proposal.requested, proposal.remaining
    );
    if let Some(target) = proposal.target {
        line.push_str(&format!("Target: {}\n", format_dmy(target)));
    }
    if let Some(outcome) = &proposal.outcome {
        line.push_str(&format!("Outcome: {}\n", outcome_label(outcome)));
    }
    line
}
