//! Extraction of the voted ticket reference from a serialized vote transaction.
//!
//! A vote spends the ticket it was cast with, and in the serialized vote the
//! outpoint hash of that spent ticket sits at a fixed position:
//!
//! | bytes      | content                               |
//! |------------|---------------------------------------|
//! | `[0, 46)`  | version, input count, stakebase input |
//! | `[46, 78)` | ticket hash, wire (little-endian) order |
//!
//! The hash is reversed into display order before it is used as a [`TicketId`].

use thiserror::Error;
use tix_domain::TicketId;

/// Offset of the spent ticket hash inside a serialized vote.
pub const VOTE_TICKET_HASH_OFFSET: usize = 46;
/// Length of a transaction hash.
pub const VOTE_TICKET_HASH_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("vote payload is {actual} bytes, need at least {required}")]
    PayloadTooShort { actual: usize, required: usize },
}

/// Returns the id of the ticket a serialized vote spends.
pub fn decode_voted_ticket(raw: &[u8]) -> Result<TicketId, DecodeError> {
    let end = VOTE_TICKET_HASH_OFFSET + VOTE_TICKET_HASH_LEN;
    let hash = raw
        .get(VOTE_TICKET_HASH_OFFSET..end)
        .ok_or(DecodeError::PayloadTooShort {
            actual: raw.len(),
            required: end,
        })?;
    Ok(TicketId::from_raw_hash(hash))
}

/// Builds a minimal serialized vote referencing `ticket_hash` (wire order).
///
/// Only the bytes [`decode_voted_ticket`] reads are meaningful.
pub fn encode_vote_payload(ticket_hash: &[u8]) -> Vec<u8> {
    let mut raw = vec![0u8; VOTE_TICKET_HASH_OFFSET];
    raw.extend(ticket_hash.iter().take(VOTE_TICKET_HASH_LEN));
    raw.resize(VOTE_TICKET_HASH_OFFSET + VOTE_TICKET_HASH_LEN, 0);
    raw
}
