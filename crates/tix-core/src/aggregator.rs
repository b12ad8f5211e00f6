//! Duration statistics over a finished registry.

use serde::Serialize;
use tix_domain::TicketRecord;

use crate::Registry;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// How long a ticket has spent in the pool, in days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum TicketAge {
    /// Purchase to vote.
    ToVote(f64),
    /// Purchase to now, for tickets still waiting.
    Waiting(f64),
}

impl TicketAge {
    pub fn days(self) -> f64 {
        match self {
            TicketAge::ToVote(days) | TicketAge::Waiting(days) => days,
        }
    }
}

/// Counters and means derived from one pass over the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketSummary {
    pub ticket_count: usize,
    pub vote_count: usize,
    pub expired_count: usize,
    pub total_days_voted: f64,
    pub total_days_waiting: f64,
    /// `None` when no ticket has voted.
    pub mean_days_to_vote: Option<f64>,
    /// `None` when every ticket has voted or expired.
    pub mean_days_waiting: Option<f64>,
}

impl TicketSummary {
    /// Tickets that are neither voted nor expired.
    pub fn waiting_count(&self) -> usize {
        self.ticket_count
            .saturating_sub(self.vote_count)
            .saturating_sub(self.expired_count)
    }
}

pub struct Aggregator;

impl Aggregator {
    /// Age of a single ticket at `now`. Expired tickets that never voted have none.
    pub fn ticket_age(record: &TicketRecord, now: i64) -> Option<TicketAge> {
        if record.is_voted() {
            Some(TicketAge::ToVote(days_between(
                record.purchase_timestamp,
                record.vote_timestamp,
            )))
        } else if record.is_expired() {
            None
        } else {
            Some(TicketAge::Waiting(days_between(record.purchase_timestamp, now)))
        }
    }

    /// Summarizes `registry` as of the Unix timestamp `now`.
    pub fn summarize(registry: &Registry, now: i64) -> TicketSummary {
        let mut summary = TicketSummary {
            ticket_count: 0,
            vote_count: 0,
            expired_count: 0,
            total_days_voted: 0.0,
            total_days_waiting: 0.0,
            mean_days_to_vote: None,
            mean_days_waiting: None,
        };

        for record in registry.records() {
            summary.ticket_count += 1;
            if record.is_expired() && !record.is_voted() {
                summary.expired_count += 1;
            }
            match Self::ticket_age(record, now) {
                Some(TicketAge::ToVote(days)) => {
                    summary.vote_count += 1;
                    summary.total_days_voted += days;
                }
                Some(TicketAge::Waiting(days)) => summary.total_days_waiting += days,
                None => {}
            }
        }

        summary.mean_days_to_vote = mean(summary.total_days_voted, summary.vote_count);
        summary.mean_days_waiting = mean(summary.total_days_waiting, summary.waiting_count());
        summary
    }
}

fn days_between(from: i64, to: i64) -> f64 {
    to.saturating_sub(from) as f64 / SECONDS_PER_DAY
}

fn mean(total: f64, count: usize) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tix_domain::{TicketId, TicketState};

    const DAY: i64 = 86_400;

    fn record(hex: &str, purchase_ts: i64, state: TicketState) -> TicketRecord {
        TicketRecord::new(TicketId::from_display_hex(hex), purchase_ts, 1, state)
    }

    #[test]
    fn empty_registry_has_no_means() {
        let summary = Aggregator::summarize(&Registry::new(), 0);
        assert_eq!(summary.ticket_count, 0);
        assert_eq!(summary.mean_days_to_vote, None);
        assert_eq!(summary.mean_days_waiting, None);
    }

    #[test]
    fn voted_and_waiting_durations_are_split() {
        let mut registry = Registry::new();
        let mut voted = record("01", 0, TicketState::Live);
        voted.record_vote(10 * DAY, 500, TicketState::Voted);
        registry.upsert_purchase(voted);
        registry.upsert_purchase(record("02", 20 * DAY, TicketState::Live));
        registry.upsert_purchase(record("03", 26 * DAY, TicketState::Immature));
        registry.upsert_purchase(record("04", 0, TicketState::Expired));

        let summary = Aggregator::summarize(&registry, 30 * DAY);
        assert_eq!(summary.ticket_count, 4);
        assert_eq!(summary.vote_count, 1);
        assert_eq!(summary.expired_count, 1);
        assert_eq!(summary.waiting_count(), 2);
        assert_eq!(summary.total_days_voted, 10.0);
        assert_eq!(summary.total_days_waiting, 14.0);
        assert_eq!(summary.mean_days_to_vote, Some(10.0));
        assert_eq!(summary.mean_days_waiting, Some(7.0));
    }

    #[test]
    fn waiting_mean_unavailable_when_all_voted_or_expired() {
        let mut registry = Registry::new();
        let mut voted = record("01", 0, TicketState::Live);
        voted.record_vote(DAY / 2, 500, TicketState::VotedPendingMaturity);
        registry.upsert_purchase(voted);
        registry.upsert_purchase(record("02", 0, TicketState::Expired));

        let summary = Aggregator::summarize(&registry, 100 * DAY);
        assert_eq!(summary.mean_days_to_vote, Some(0.5));
        assert_eq!(summary.mean_days_waiting, None);
        assert_eq!(summary.total_days_waiting, 0.0);
    }

    #[test]
    fn vote_mean_unavailable_without_votes() {
        let mut registry = Registry::new();
        registry.upsert_purchase(record("01", 0, TicketState::Live));
        let summary = Aggregator::summarize(&registry, 3 * DAY);
        assert_eq!(summary.mean_days_to_vote, None);
        assert_eq!(summary.mean_days_waiting, Some(3.0));
    }

    #[test]
    fn expired_ticket_has_no_age() {
        let expired = record("01", 0, TicketState::Expired);
        assert_eq!(Aggregator::ticket_age(&expired, 5 * DAY), None);
        let live = record("02", DAY, TicketState::Live);
        assert_eq!(Aggregator::ticket_age(&live, 5 * DAY), Some(TicketAge::Waiting(4.0)));
    }

    #[test]
    fn extreme_now_saturates_instead_of_overflowing() {
        let live = record("01", DAY, TicketState::Live);
        let age = Aggregator::ticket_age(&live, i64::MIN).map(|age| age.days());
        assert_eq!(age, Some(i64::MIN as f64 / SECONDS_PER_DAY));
    }
}
