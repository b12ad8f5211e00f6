//! tix-domain
//!
//! Pure domain models for stake tickets (records, states, mined transactions, network params).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod network;
pub mod ticket;
pub mod transaction;

pub use network::*;
pub use ticket::*;
pub use transaction::*;
