//! tix-core
//!
//! Ticket classification and aggregation for a wallet's mined transaction history.
//! Depends on tix-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod aggregator;
pub mod classifier;
pub mod decode;
pub mod error;
pub mod registry;
pub mod scan;
pub mod time;

pub use aggregator::*;
pub use classifier::*;
pub use decode::*;
pub use error::{CoreError, SourceError};
pub use registry::*;
pub use scan::*;
pub use time::*;
