//! Correlates ticket purchases with votes and places each ticket in its lifecycle.

use tix_domain::{
    MinedTransaction, NetworkParams, TicketId, TicketRecord, TicketState, TransactionBatch,
    TransactionKind,
};

use crate::{decode_voted_ticket, CoreError, Inconsistency, Registry};

/// State of a freshly observed purchase, `current_height - purchase_height` blocks deep.
///
/// Both bounds are exclusive: a ticket exactly `ticket_maturity` blocks deep is live,
/// and one exactly `ticket_expiry` blocks deep has not expired yet.
pub fn purchase_state(
    current_height: i64,
    purchase_height: i64,
    params: &NetworkParams,
) -> TicketState {
    let delta = current_height.saturating_sub(purchase_height);
    if delta < params.ticket_maturity {
        TicketState::Immature
    } else if delta > params.ticket_expiry {
        TicketState::Expired
    } else {
        TicketState::Live
    }
}

/// State of a voted ticket whose vote is `current_height - vote_height` blocks deep.
pub fn vote_state(current_height: i64, vote_height: i64, params: &NetworkParams) -> TicketState {
    if current_height.saturating_sub(vote_height) < params.vote_maturity {
        TicketState::VotedPendingMaturity
    } else {
        TicketState::Voted
    }
}

/// Outcome of one classification run.
#[derive(Debug, Clone)]
pub struct Classification {
    pub current_height: i64,
    pub params: NetworkParams,
    pub registry: Registry,
    pub inconsistencies: Vec<Inconsistency>,
    /// Every vote transaction seen, matched or not.
    pub votes_observed: usize,
}

/// Single-writer classifier that owns the registry for the duration of a run.
#[derive(Debug, Clone)]
pub struct Classifier {
    current_height: i64,
    params: NetworkParams,
    registry: Registry,
    inconsistencies: Vec<Inconsistency>,
    votes_observed: usize,
}

impl Classifier {
    pub fn new(current_height: i64, params: NetworkParams) -> Self {
        Self {
            current_height,
            params,
            registry: Registry::new(),
            inconsistencies: Vec::new(),
            votes_observed: 0,
        }
    }

    /// Classifies every transaction of one mined block.
    pub fn ingest_batch(&mut self, batch: &TransactionBatch) {
        for transaction in &batch.transactions {
            self.ingest(transaction, batch.height, batch.timestamp);
        }
    }

    /// Classifies one transaction mined at `block_height` / `block_timestamp`.
    pub fn ingest(
        &mut self,
        transaction: &MinedTransaction,
        block_height: i64,
        block_timestamp: i64,
    ) {
        match transaction.kind {
            TransactionKind::TicketPurchase => {
                self.observe_purchase(transaction, block_height, block_timestamp)
            }
            TransactionKind::Vote => self.observe_vote(transaction, block_height, block_timestamp),
            TransactionKind::Other(tag) => {
                tracing::trace!(tag, height = block_height, "skipping unrelated transaction");
            }
        }
    }

    pub fn finish(self) -> Classification {
        tracing::info!(
            tickets = self.registry.len(),
            votes = self.votes_observed,
            inconsistencies = self.inconsistencies.len(),
            "classification finished"
        );
        Classification {
            current_height: self.current_height,
            params: self.params,
            registry: self.registry,
            inconsistencies: self.inconsistencies,
            votes_observed: self.votes_observed,
        }
    }

    fn observe_purchase(&mut self, transaction: &MinedTransaction, height: i64, timestamp: i64) {
        let id = TicketId::from_raw_hash(&transaction.hash);
        let state = purchase_state(self.current_height, height, &self.params);
        tracing::debug!(ticket = %id, height, ?state, "ticket purchase");
        self.registry
            .upsert_purchase(TicketRecord::new(id, timestamp, height, state));
    }

    fn observe_vote(&mut self, transaction: &MinedTransaction, height: i64, timestamp: i64) {
        self.votes_observed += 1;
        let vote = TicketId::from_raw_hash(&transaction.hash);
        let ticket = match decode_voted_ticket(&transaction.raw) {
            Ok(ticket) => ticket,
            Err(reason) => {
                tracing::warn!(vote = %vote, height, %reason, "undecodable vote transaction");
                self.inconsistencies.push(Inconsistency::MalformedVote {
                    vote,
                    height,
                    reason,
                });
                return;
            }
        };

        let state = vote_state(self.current_height, height, &self.params);
        let applied = self
            .registry
            .apply_vote(&ticket, timestamp, height, state)
            .map(|_| ());
        match applied {
            Ok(()) => {
                tracing::debug!(ticket = %ticket, vote = %vote, height, ?state, "vote matched")
            }
            Err(CoreError::TicketNotFound(_)) => {
                let inconsistency = self.registry.inconsistent_vote(ticket, vote, height);
                self.inconsistencies.push(inconsistency);
            }
            Err(err) => {
                tracing::warn!(vote = %vote, height, %err, "vote ignored");
                self.inconsistencies.push(Inconsistency::DuplicateVote {
                    ticket,
                    vote,
                    height,
                });
            }
        }
    }
}
