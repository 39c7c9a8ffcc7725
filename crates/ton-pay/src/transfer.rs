//! Transfer request structures
//!
//! These mirror the JSON a wallet connector expects:
//!
//! ```text
//! {
//!   "validUntil": 1718000000,
//!   "messages": [
//!     { "address": "EQ...", "amount": "1500000000", "payload": "te6cc..." }
//!   ]
//! }
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::debug;

use crate::address::TonAddress;
use crate::amount::Nanotons;

/// One outgoing message in a transfer request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferMessage {
    /// Destination address, as entered
    pub address: String,
    /// Amount in nanotons, as a decimal string
    pub amount: String,
    /// Base64 BoC body; absent for transfers without a memo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl TransferMessage {
    /// Create a message without payload
    pub fn new(to: &TonAddress, amount: Nanotons) -> Self {
        Self {
            address: to.as_str().to_string(),
            amount: amount.as_u128().to_string(),
            payload: None,
        }
    }

    /// Attach a text comment.
    ///
    /// Empty or whitespace-only memos leave the message without a payload
    /// and the encoder is never run. Returns whether the memo was truncated.
    pub fn set_memo(&mut self, memo: &str) -> bool {
        let memo = memo.trim();
        if memo.is_empty() {
            return false;
        }

        let comment = ton_memo::encode_comment(memo);
        debug!(
            "Attached {}-byte comment payload (truncated: {})",
            comment.text_len, comment.truncated
        );
        self.payload = Some(comment.to_base64());
        comment.truncated
    }
}

/// A transfer request handed to the wallet for signing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Unix time after which the wallet must refuse the request
    pub valid_until: u64,
    /// Messages to send
    pub messages: Vec<TransferMessage>,
}

impl TransferRequest {
    /// Build a single-message request valid for `validity` after `now`
    /// (unix seconds), encoding the memo if present
    pub fn single(
        to: &TonAddress,
        amount: Nanotons,
        memo: &str,
        now: u64,
        validity: Duration,
    ) -> PreparedTransfer {
        let mut message = TransferMessage::new(to, amount);
        let memo_truncated = message.set_memo(memo);

        PreparedTransfer {
            request: TransferRequest {
                valid_until: deadline(now, validity),
                messages: vec![message],
            },
            memo_truncated,
        }
    }

    /// Serialize to the connector JSON shape
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A request together with what happened to its memo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransfer {
    pub request: TransferRequest,
    /// The memo did not fit and was cut
    pub memo_truncated: bool,
}

/// Current unix time in seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Unix deadline `validity` after `now`, saturating at `u64::MAX`
pub fn deadline(now: u64, validity: Duration) -> u64 {
    now.saturating_add(validity.as_secs())
}
