//! Wallet connector seam.
//!
//! A connector owns the link to the user's wallet app: it knows which
//! account is connected and forwards transfer requests for the user to
//! approve. Signing happens inside the wallet; this crate only sees the
//! outcome.
//!
//! This trait allows different implementations for:
//! - A bridge to a browser or mobile wallet
//! - Mock/test wallets

use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::address;
use crate::transfer::TransferRequest;

/// Error code wallets use when the user declines a request.
pub const USER_REJECTS_ERROR_CODE: u32 = 300;

/// The account a connected wallet exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAccount {
    /// Wallet address (raw or user-friendly).
    pub address: String,
    /// Name of the wallet app, if the wallet reports one.
    pub app_name: Option<String>,
}

impl WalletAccount {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            app_name: None,
        }
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// App name, or "TON Wallet" when unknown.
    pub fn display_name(&self) -> &str {
        self.app_name.as_deref().unwrap_or("TON Wallet")
    }

    /// Address shortened for display.
    pub fn short_address(&self) -> String {
        address::short(&self.address)
    }
}

/// What the wallet returns after the user approves a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Base64 BoC of the signed external message.
    pub boc: String,
}

/// Failure reported by a wallet connector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConnectorError {
    /// Wallet-specific error code, if any.
    pub code: Option<u32>,
    pub message: String,
}

impl ConnectorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: u32, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    /// Whether the user declined the request in the wallet.
    ///
    /// Wallets are inconsistent here: some send code 300, others only a
    /// message mentioning cancel or reject.
    pub fn is_user_rejection(&self) -> bool {
        if self.code == Some(USER_REJECTS_ERROR_CODE) {
            return true;
        }
        let message = self.message.to_lowercase();
        message.contains("cancel") || message.contains("reject")
    }
}

/// Common wallet connector interface
pub trait WalletConnector: Send + Sync {
    /// Currently connected account, if any.
    fn account(&self) -> Option<WalletAccount>;

    /// Whether a wallet is connected.
    fn is_connected(&self) -> bool {
        self.account().is_some()
    }

    /// Ask the wallet to sign and send a transfer.
    fn send_transaction(
        &self,
        request: &TransferRequest,
    ) -> impl Future<Output = Result<SendReceipt, ConnectorError>> + Send;

    /// Drop the wallet connection.
    fn disconnect(&self) -> impl Future<Output = ()> + Send;
}

/// Scripted outcome for [`MockConnector::send_transaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOutcome {
    /// Approve and return this external message BoC.
    Approve(String),
    /// Fail with this error.
    Fail(ConnectorError),
}

/// In-memory connector for tests and demos.
///
/// Records every request it receives and answers with a scripted outcome.
#[derive(Debug)]
pub struct MockConnector {
    account: Mutex<Option<WalletAccount>>,
    outcome: Mutex<MockOutcome>,
    sent: Mutex<Vec<TransferRequest>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            account: Mutex::new(None),
            outcome: Mutex::new(MockOutcome::Approve(String::new())),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl MockConnector {
    /// Create a disconnected mock that approves everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock already connected to `account`.
    pub fn connected(account: WalletAccount) -> Self {
        let mock = Self::default();
        mock.connect(account);
        mock
    }

    /// Simulate the user connecting a wallet.
    pub fn connect(&self, account: WalletAccount) {
        *lock(&self.account) = Some(account);
    }

    /// Set how the next sends are answered.
    pub fn set_outcome(&self, outcome: MockOutcome) {
        *lock(&self.outcome) = outcome;
    }

    /// Requests received so far.
    pub fn sent(&self) -> Vec<TransferRequest> {
        lock(&self.sent).clone()
    }
}

impl WalletConnector for MockConnector {
    fn account(&self) -> Option<WalletAccount> {
        lock(&self.account).clone()
    }

    fn send_transaction(
        &self,
        request: &TransferRequest,
    ) -> impl Future<Output = Result<SendReceipt, ConnectorError>> + Send {
        lock(&self.sent).push(request.clone());
        let outcome = lock(&self.outcome).clone();

        async move {
            match outcome {
                MockOutcome::Approve(boc) => Ok(SendReceipt { boc }),
                MockOutcome::Fail(err) => Err(err),
            }
        }
    }

    fn disconnect(&self) -> impl Future<Output = ()> + Send {
        *lock(&self.account) = None;
        async {}
    }
}

/// Lock a mutex, recovering the data if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
