//! Mined wallet transactions as delivered by the transaction feed.

use serde::{Deserialize, Serialize};

/// Wire tag the wallet uses for ticket purchases.
pub const TICKET_PURCHASE_TAG: u8 = 1;
/// Wire tag the wallet uses for votes.
pub const VOTE_TAG: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum TransactionKind {
    TicketPurchase,
    Vote,
    /// Regular, revocation, coinbase, ... Not relevant to ticket tracking.
    Other(u8),
}

impl TransactionKind {
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            TICKET_PURCHASE_TAG => TransactionKind::TicketPurchase,
            VOTE_TAG => TransactionKind::Vote,
            other => TransactionKind::Other(other),
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            TransactionKind::TicketPurchase => TICKET_PURCHASE_TAG,
            TransactionKind::Vote => VOTE_TAG,
            TransactionKind::Other(tag) => tag,
        }
    }
}

impl From<u8> for TransactionKind {
    fn from(tag: u8) -> Self {
        Self::from_tag(tag)
    }
}

impl From<TransactionKind> for u8 {
    fn from(kind: TransactionKind) -> Self {
        kind.tag()
    }
}

/// A wallet transaction that has been included in a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinedTransaction {
    pub kind: TransactionKind,
    /// Transaction hash in wire (little-endian) order.
    #[serde(with = "hex_bytes")]
    pub hash: Vec<u8>,
    pub timestamp: i64,
    /// Serialized transaction. Only votes are decoded.
    #[serde(with = "hex_bytes", default)]
    pub raw: Vec<u8>,
}

impl MinedTransaction {
    pub fn new(kind: TransactionKind, hash: Vec<u8>, timestamp: i64, raw: Vec<u8>) -> Self {
        Self {
            kind,
            hash,
            timestamp,
            raw,
        }
    }
}

/// Transactions mined in a single block, with that block's height and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBatch {
    pub height: i64,
    pub timestamp: i64,
    #[serde(default)]
    pub transactions: Vec<MinedTransaction>,
}

impl TransactionBatch {
    pub fn new(height: i64, timestamp: i64) -> Self {
        Self {
            height,
            timestamp,
            transactions: Vec::new(),
        }
    }

    pub fn with_transaction(mut self, transaction: MinedTransaction) -> Self {
        self.transactions.push(transaction);
        self
    }
}

/// Serde adapter encoding byte buffers as hex strings.
pub mod hex_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        hex::decode(raw.trim()).map_err(D::Error::custom)
    }
}
