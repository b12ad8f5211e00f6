//! Ticket identity, lifecycle states, and the per-purchase record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Transaction hash in display order (byte-reversed, lowercase hex).
///
/// Hashes travel little-endian on the wire but are shown big-endian, and vote
/// payloads reference tickets in wire order, so every id must pass through
/// [`TicketId::from_raw_hash`] before it is used as a registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Builds an id from raw wire-order hash bytes.
    pub fn from_raw_hash(raw: &[u8]) -> Self {
        let mut bytes = raw.to_vec();
        bytes.reverse();
        Self(hex::encode(bytes))
    }

    /// Wraps an already display-ordered hex string.
    pub fn from_display_hex(hex: impl Into<String>) -> Self {
        Self(hex.into().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle position of a ticket relative to the current chain tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketState {
    /// Mined, but not yet old enough to be selected.
    Immature,
    /// In the pool and eligible to vote.
    Live,
    /// Voted; the vote reward has not matured yet.
    VotedPendingMaturity,
    /// Voted and paid.
    Voted,
    /// Never selected before the expiry window closed.
    Expired,
}

impl TicketState {
    pub fn label(self) -> &'static str {
        match self {
            TicketState::Immature => "Immature after inclusion in a block",
            TicketState::Live => "Live",
            TicketState::VotedPendingMaturity => "Immature after vote",
            TicketState::Voted => "Voted and paid",
            TicketState::Expired => "Expired",
        }
    }

    pub fn is_voted(self) -> bool {
        matches!(self, TicketState::VotedPendingMaturity | TicketState::Voted)
    }
}

impl fmt::Display for TicketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One record per ticket purchase transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub id: TicketId,
    pub purchase_timestamp: i64,
    pub purchase_height: i64,
    pub state: TicketState,
    /// Zero until a matching vote is observed.
    #[serde(default)]
    pub vote_timestamp: i64,
    /// Zero until a matching vote is observed.
    #[serde(default)]
    pub vote_height: i64,
}

impl TicketRecord {
    pub fn new(
        id: TicketId,
        purchase_timestamp: i64,
        purchase_height: i64,
        state: TicketState,
    ) -> Self {
        Self {
            id,
            purchase_timestamp,
            purchase_height,
            state,
            vote_timestamp: 0,
            vote_height: 0,
        }
    }

    pub fn is_voted(&self) -> bool {
        self.vote_height != 0
    }

    pub fn is_expired(&self) -> bool {
        self.state == TicketState::Expired
    }

    /// Records the matching vote. Returns `false` when a vote was already applied.
    pub fn record_vote(&mut self, timestamp: i64, height: i64, state: TicketState) -> bool {
        if self.is_voted() {
            return false;
        }
        self.vote_timestamp = timestamp;
        self.vote_height = height;
        self.state = state;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_hash_is_reversed_before_encoding() {
        let id = TicketId::from_raw_hash(&[0x01, 0x02, 0xab]);
        assert_eq!(id.as_str(), "ab0201");
    }

    #[test]
    fn display_hex_is_normalised_to_lowercase() {
        let id = TicketId::from_display_hex("ABCDEF");
        assert_eq!(id, TicketId::from_raw_hash(&[0xef, 0xcd, 0xab]));
    }

    #[test]
    fn record_vote_applies_only_once() {
        let id = TicketId::from_display_hex("aa");
        let mut record = TicketRecord::new(id, 1_000, 90_000, TicketState::Live);
        assert!(record.record_vote(2_000, 99_900, TicketState::VotedPendingMaturity));
        assert!(!record.record_vote(3_000, 99_950, TicketState::Voted));
        assert_eq!(record.vote_height, 99_900);
        assert_eq!(record.vote_timestamp, 2_000);
        assert_eq!(record.state, TicketState::VotedPendingMaturity);
    }

    #[test]
    fn states_render_human_readable_labels() {
        assert_eq!(TicketState::Voted.to_string(), "Voted and paid");
        assert_eq!(TicketState::VotedPendingMaturity.to_string(), "Immature after vote");
        assert!(TicketState::Voted.is_voted());
        assert!(!TicketState::Expired.is_voted());
    }

    #[test]
    fn record_serializes_id_as_plain_string() {
        let id = TicketId::from_display_hex("0f");
        let record = TicketRecord::new(id, 5, 6, TicketState::Immature);
        let json = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(json["id"], "0f");
        assert_eq!(json["state"], "Immature");
    }
}
