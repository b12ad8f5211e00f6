use std::io;

use thiserror::Error;
use tix_domain::TicketId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Ticket not found: {0}")]
    TicketNotFound(TicketId),
    #[error("Vote already recorded for ticket {0}")]
    VoteAlreadyRecorded(TicketId),
    #[error("Transaction source failed: {0}")]
    Source(#[from] SourceError),
}

/// Failures raised by a [`crate::TransactionSource`] other than the end of the stream.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed data: {0}")]
    Malformed(String),
    #[error("Stream interrupted: {0}")]
    Interrupted(String),
}
