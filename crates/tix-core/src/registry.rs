//! Ordered ticket registry built by the classifier.

use std::collections::HashMap;

use tix_domain::{TicketId, TicketRecord, TicketState};

use crate::{CoreError, DecodeError};

/// Data-inconsistency conditions met while classifying. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// A vote spends a ticket that is not in the registry.
    UnknownTicket {
        ticket: TicketId,
        vote: TicketId,
        height: i64,
    },
    /// A second vote for a ticket that already has one.
    DuplicateVote {
        ticket: TicketId,
        vote: TicketId,
        height: i64,
    },
    /// The vote payload could not be decoded.
    MalformedVote {
        vote: TicketId,
        height: i64,
        reason: DecodeError,
    },
}

impl Inconsistency {
    pub fn describe(&self) -> String {
        match self {
            Inconsistency::UnknownTicket { ticket, vote, height } => format!(
                "vote {vote} at height {height} references unknown ticket {ticket}"
            ),
            Inconsistency::DuplicateVote { ticket, vote, height } => format!(
                "vote {vote} at height {height} repeats a vote for ticket {ticket}"
            ),
            Inconsistency::MalformedVote { vote, height, reason } => {
                format!("vote {vote} at height {height} is malformed: {reason}")
            }
        }
    }
}

/// Ticket records keyed by purchase id, iterated in first-observation order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: HashMap<TicketId, TicketRecord>,
    order: Vec<TicketId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for a purchase.
    ///
    /// A replaced record keeps its original position. Returns `true` when the id is new.
    pub fn upsert_purchase(&mut self, record: TicketRecord) -> bool {
        let id = record.id.clone();
        let is_new = self.records.insert(id.clone(), record).is_none();
        if is_new {
            self.order.push(id);
        } else {
            tracing::debug!(ticket = %id, "purchase observed again, record replaced");
        }
        is_new
    }

    /// Merges a vote into the record it spends.
    pub fn apply_vote(
        &mut self,
        id: &TicketId,
        timestamp: i64,
        height: i64,
        state: TicketState,
    ) -> Result<&TicketRecord, CoreError> {
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| CoreError::TicketNotFound(id.clone()))?;
        if !record.record_vote(timestamp, height, state) {
            return Err(CoreError::VoteAlreadyRecorded(id.clone()));
        }
        Ok(&*record)
    }

    /// Reports a vote that references a ticket missing from the registry.
    pub fn inconsistent_vote(
        &self,
        ticket: TicketId,
        vote: TicketId,
        height: i64,
    ) -> Inconsistency {
        tracing::warn!(
            ticket = %ticket,
            vote = %vote,
            height,
            "incoherent ticket found in vote transaction"
        );
        Inconsistency::UnknownTicket {
            ticket,
            vote,
            height,
        }
    }

    pub fn get(&self, id: &TicketId) -> Option<&TicketRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &TicketId) -> bool {
        self.records.contains_key(id)
    }

    /// Records in the order their purchases were first observed.
    pub fn records(&self) -> impl Iterator<Item = &TicketRecord> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn snapshot(&self) -> Vec<TicketRecord> {
        self.records().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hex: &str, height: i64) -> TicketRecord {
        TicketRecord::new(TicketId::from_display_hex(hex), 1_000, height, TicketState::Live)
    }

    #[test]
    fn iteration_follows_first_observation_not_key_order() {
        let mut registry = Registry::new();
        registry.upsert_purchase(record("ff", 1));
        registry.upsert_purchase(record("00", 2));
        registry.upsert_purchase(record("80", 3));

        let ids: Vec<_> = registry.records().map(|r| r.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["ff", "00", "80"]);
    }

    #[test]
    fn repeated_purchase_overwrites_without_duplicating() {
        let mut registry = Registry::new();
        assert!(registry.upsert_purchase(record("aa", 10)));
        registry.upsert_purchase(record("bb", 11));
        assert!(!registry.upsert_purchase(record("aa", 12)));

        assert_eq!(registry.len(), 2);
        let first = registry.records().next().expect("first record");
        assert_eq!(first.id.as_str(), "aa");
        assert_eq!(first.purchase_height, 12);
    }

    #[test]
    fn vote_for_missing_ticket_is_an_error() {
        let mut registry = Registry::new();
        let id = TicketId::from_display_hex("cc");
        let err = registry
            .apply_vote(&id, 5, 6, TicketState::Voted)
            .expect_err("missing ticket");
        assert!(matches!(err, CoreError::TicketNotFound(missing) if missing == id));
        assert!(registry.is_empty());
    }

    #[test]
    fn second_vote_is_rejected() {
        let mut registry = Registry::new();
        registry.upsert_purchase(record("aa", 10));
        let id = TicketId::from_display_hex("aa");
        registry
            .apply_vote(&id, 2_000, 300, TicketState::Voted)
            .expect("first vote");
        let err = registry
            .apply_vote(&id, 3_000, 400, TicketState::Voted)
            .expect_err("second vote");
        assert!(matches!(err, CoreError::VoteAlreadyRecorded(_)));
        assert_eq!(registry.get(&id).map(|r| r.vote_height), Some(300));
    }
}
