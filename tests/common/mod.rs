#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tix_core::encode_vote_payload;
use tix_domain::{MinedTransaction, TransactionBatch, TransactionKind};
use tix_source_json::Snapshot;

pub const DAY: i64 = 86_400;
pub const T0: i64 = 1_600_000_000;

/// Wire-order hash whose display id starts with `seed` as two hex digits.
pub fn hash(seed: u8) -> Vec<u8> {
    let mut bytes = vec![0u8; 32];
    bytes[31] = seed;
    bytes
}

pub fn purchase(seed: u8) -> MinedTransaction {
    MinedTransaction::new(TransactionKind::TicketPurchase, hash(seed), 0, Vec::new())
}

pub fn vote(seed: u8, ticket_seed: u8) -> MinedTransaction {
    MinedTransaction::new(
        TransactionKind::Vote,
        hash(seed),
        0,
        encode_vote_payload(&hash(ticket_seed)),
    )
}

pub fn block(height: i64, timestamp: i64, transactions: Vec<MinedTransaction>) -> TransactionBatch {
    TransactionBatch {
        height,
        timestamp,
        transactions,
    }
}

/// Mainnet-shaped history at tip 100000: one ticket per lifecycle state plus a stray vote.
///
/// | ticket | purchased | outcome                               |
/// |--------|-----------|---------------------------------------|
/// | 01     | 50000     | expired                               |
/// | 02     | 90000     | voted at 95000, 10 days later         |
/// | 03     | 90000     | voted at 99900, 22 days later, pending |
/// | 04     | 99800     | immature                              |
/// | 05     | 90000     | live                                  |
pub fn mixed_history() -> Snapshot {
    Snapshot {
        current_height: 100_000,
        batches: vec![
            block(50_000, T0, vec![purchase(0x01)]),
            block(90_000, T0, vec![purchase(0x02), purchase(0x03), purchase(0x05)]),
            block(95_000, T0 + 10 * DAY, vec![vote(0xa1, 0x02)]),
            block(99_800, T0 + 20 * DAY, vec![purchase(0x04)]),
            block(
                99_900,
                T0 + 22 * DAY,
                vec![vote(0xa2, 0x03), vote(0xa3, 0x7f)],
            ),
        ],
    }
}

/// Keeps the temp dir alive alongside the snapshot written into it.
pub struct SnapshotFile {
    dir: TempDir,
    path: PathBuf,
}

impl SnapshotFile {
    pub fn write(snapshot: &Snapshot) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("history.json");
        snapshot.save(&path).expect("save snapshot");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Config path inside the same temp dir, so tests never touch the user's config.
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }
}
