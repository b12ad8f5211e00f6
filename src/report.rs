//! Human-readable ticket report built from a finished classification.

use std::fmt::{self, Write as _};

use colored::Colorize;
use serde::Serialize;
use tix_core::{Aggregator, Classification, TicketAge, TicketSummary};
use tix_domain::{TicketId, TicketState};

const NOT_AVAILABLE: &str = "not available";

/// One line of the report, in purchase order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub index: usize,
    pub id: TicketId,
    pub state: TicketState,
    pub status: &'static str,
    pub purchase_height: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<TicketAge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketReport {
    pub current_height: i64,
    pub rows: Vec<ReportRow>,
    pub summary: TicketSummary,
    pub inconsistencies: Vec<String>,
    /// Present when the transaction stream stopped early.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interrupted: Option<String>,
}

impl TicketReport {
    /// Builds the report as of the Unix timestamp `now`.
    pub fn build(classification: &Classification, now: i64) -> Self {
        let rows = classification
            .registry
            .records()
            .enumerate()
            .map(|(position, record)| ReportRow {
                index: position + 1,
                id: record.id.clone(),
                state: record.state,
                status: record.state.label(),
                purchase_height: record.purchase_height,
                vote_height: record.is_voted().then_some(record.vote_height),
                age: Aggregator::ticket_age(record, now),
            })
            .collect();

        Self {
            current_height: classification.current_height,
            rows,
            summary: Aggregator::summarize(&classification.registry, now),
            inconsistencies: classification
                .inconsistencies
                .iter()
                .map(|inconsistency| inconsistency.describe())
                .collect(),
            interrupted: None,
        }
    }

    pub fn with_interruption(mut self, reason: impl Into<String>) -> Self {
        self.interrupted = Some(reason.into());
        self
    }

    /// Renders the plain-text report, optionally colouring ticket statuses.
    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, color);
        out
    }

    fn write_to(&self, out: &mut String, color: bool) -> fmt::Result {
        writeln!(
            out,
            "You have {} tickets. {} of them have voted.",
            self.summary.ticket_count, self.summary.vote_count
        )?;
        for row in &self.rows {
            writeln!(out)?;
            writeln!(out, "Ticket #{} {}", row.index, row.id)?;
            writeln!(out, "\tStatus:          {}", paint(row.state, color))?;
            writeln!(out, "\tTicket Height :  {}", row.purchase_height)?;
            if let Some(vote_height) = row.vote_height {
                writeln!(out, "\tVote Height :    {vote_height}")?;
            }
            match row.age {
                Some(TicketAge::ToVote(days)) => {
                    writeln!(out, "\tAge when voted : {days:.1} days")?
                }
                Some(TicketAge::Waiting(days)) => {
                    writeln!(out, "\tAge :            {days:.1} days")?
                }
                None => {}
            }
        }
        writeln!(out)?;
        writeln!(
            out,
            "Mean time in the pool for voted tickets: {}.",
            format_days(self.summary.mean_days_to_vote)
        )?;
        writeln!(
            out,
            "Mean time in the pool for live and immature tickets: {}.",
            format_days(self.summary.mean_days_waiting)
        )?;
        if !self.inconsistencies.is_empty() {
            writeln!(out)?;
            writeln!(out, "Inconsistencies ({}):", self.inconsistencies.len())?;
            for message in &self.inconsistencies {
                writeln!(out, "\t{message}")?;
            }
        }
        if let Some(reason) = &self.interrupted {
            writeln!(out)?;
            writeln!(out, "Partial results: {reason}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TicketReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Formats a mean duration, or the "not available" marker.
pub fn format_days(days: Option<f64>) -> String {
    match days {
        Some(days) if days.is_finite() => format!("{days:.1} days"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn paint(state: TicketState, color: bool) -> String {
    let label = state.label();
    if !color {
        return label.to_string();
    }
    match state {
        TicketState::Immature => label.yellow().to_string(),
        TicketState::Live => label.cyan().to_string(),
        TicketState::VotedPendingMaturity => label.blue().to_string(),
        TicketState::Voted => label.green().to_string(),
        TicketState::Expired => label.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_means_render_as_not_available() {
        assert_eq!(format_days(None), "not available");
        assert_eq!(format_days(Some(f64::NAN)), "not available");
        assert_eq!(format_days(Some(2.5)), "2.5 days");
    }

    #[test]
    fn plain_paint_keeps_label() {
        assert_eq!(paint(TicketState::Expired, false), "Expired");
    }
}
