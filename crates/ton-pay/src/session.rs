//! Payment session and send flow.
//!
//! A [`PaymentSession`] owns the wallet connector, the hash lookup and the
//! configuration for one user. Every operation goes through it; there is no
//! global connector handle.
//!
//! # Send Flow
//!
//! ```text
//! PaymentForm --validate--> ValidPayment --is_connected?--> TransferRequest
//!      |                                                        |
//!      +--> deep_link() (no wallet needed)          connector.send_transaction
//!                                                               |
//!                                               lookup_hash (best effort)
//!                                                               |
//!                                                        PaymentReceipt
//! ```

use tracing::{debug, warn};

use crate::address::TonAddress;
use crate::amount::{Nanotons, PaymentSummary};
use crate::config::PayConfig;
use crate::connector::{WalletAccount, WalletConnector};
use crate::deeplink;
use crate::error::{Field, FieldError, PayError, PayResult};
use crate::lookup::{HashLookup, NoLookup};
use crate::transfer::{self, TransferRequest};

/// Raw payment input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    /// Recipient address.
    pub to: String,
    /// Amount in TON, decimal.
    pub amount: String,
    /// Optional comment.
    pub memo: String,
}

impl PaymentForm {
    pub fn new(to: impl Into<String>, amount: impl Into<String>, memo: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            amount: amount.into(),
            memo: memo.into(),
        }
    }

    /// Check every field, reporting all problems at once.
    pub fn validate(&self, min_amount: Nanotons) -> Result<ValidPayment, Vec<FieldError>> {
        let mut errors = Vec::new();

        let to = TonAddress::parse(&self.to);
        if to.is_none() {
            errors.push(FieldError::new(Field::Address, "Invalid TON address format"));
        }

        let amount = Nanotons::parse_ton(&self.amount).filter(|a| !a.is_zero() && *a >= min_amount);
        if amount.is_none() {
            errors.push(FieldError::new(
                Field::Amount,
                format!("Minimum {} TON required", trim_zeros(&min_amount.format_ton())),
            ));
        }

        match (to, amount) {
            (Some(to), Some(amount)) => Ok(ValidPayment {
                to,
                amount,
                memo: self.memo.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// A payment whose fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPayment {
    pub to: TonAddress,
    pub amount: Nanotons,
    /// Trimmed comment; empty means no comment.
    pub memo: String,
}

/// Outcome of an approved payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub amount: Nanotons,
    /// Comment as entered, if any.
    pub memo: Option<String>,
    /// The on-chain comment is shorter than `memo`.
    pub memo_truncated: bool,
    /// Message hash, when the lookup service returned one.
    pub tx_hash: Option<String>,
    /// Explorer page for the transaction (or the explorer home).
    pub explorer_url: String,
}

/// A user's payment session.
///
/// # Example
///
/// ```
/// use ton_pay::{MockConnector, PaymentForm, PaymentSession, WalletAccount};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let wallet = MockConnector::connected(WalletAccount::new("0:00").with_app_name("Tonkeeper"));
/// let session = PaymentSession::new(wallet);
///
/// let form = PaymentForm::new(
///     "EQBvW8Z5huBkMJYdnfAEM5JqTNkuWX3diqYENkWsIL0XggGG",
///     "0.5",
///     "hello",
/// );
/// let receipt = session.send(&form).await.unwrap();
/// assert_eq!(receipt.memo.as_deref(), Some("hello"));
/// # }
/// ```
pub struct PaymentSession<C, L = NoLookup> {
    connector: C,
    lookup: L,
    config: PayConfig,
}

impl<C: WalletConnector> PaymentSession<C, NoLookup> {
    /// Create a session with default configuration and no hash lookup.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            lookup: NoLookup,
            config: PayConfig::default(),
        }
    }
}

impl<C: WalletConnector, L: HashLookup> PaymentSession<C, L> {
    /// Use `lookup` to find transaction hashes after sending.
    pub fn with_lookup<L2: HashLookup>(self, lookup: L2) -> PaymentSession<C, L2> {
        PaymentSession {
            connector: self.connector,
            lookup,
            config: self.config,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: PayConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &PayConfig {
        &self.config
    }

    /// Get the connector.
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Currently connected account.
    pub fn account(&self) -> Option<WalletAccount> {
        self.connector.account()
    }

    /// Amount, fee estimate and total for the form, if the amount parses
    /// to something positive.
    pub fn summary(&self, form: &PaymentForm) -> Option<PaymentSummary> {
        let amount = Nanotons::parse_ton(&form.amount).filter(|a| !a.is_zero())?;
        PaymentSummary::new(amount, self.config.fee_estimate)
    }

    /// Validate the form and build a `ton://transfer` link instead of
    /// going through the connector.
    pub fn deep_link(&self, form: &PaymentForm) -> PayResult<String> {
        let payment = form.validate(self.config.min_amount).map_err(PayError::Invalid)?;
        Ok(deeplink::transfer_link(&payment.to, payment.amount, &payment.memo))
    }

    /// Validate, submit to the wallet and wait for the user's decision.
    pub async fn send(&self, form: &PaymentForm) -> PayResult<PaymentReceipt> {
        let payment = form.validate(self.config.min_amount).map_err(PayError::Invalid)?;

        if !self.connector.is_connected() {
            return Err(PayError::NotConnected);
        }

        let prepared = TransferRequest::single(
            &payment.to,
            payment.amount,
            &payment.memo,
            transfer::unix_now(),
            self.config.validity(),
        );

        debug!(
            "Submitting {} to {} (valid until {})",
            payment.amount, payment.to, prepared.request.valid_until
        );

        let receipt = self
            .connector
            .send_transaction(&prepared.request)
            .await
            .map_err(|err| {
                if err.is_user_rejection() {
                    debug!("Transfer rejected in wallet: {}", err);
                    PayError::Cancelled
                } else {
                    PayError::Wallet(err.message)
                }
            })?;

        let tx_hash = match self.lookup.lookup_hash(&receipt.boc).await {
            Ok(hash) => hash,
            Err(e) => {
                warn!("Hash lookup failed: {}", e);
                None
            }
        };

        Ok(PaymentReceipt {
            amount: payment.amount,
            memo: (!payment.memo.is_empty()).then_some(payment.memo),
            memo_truncated: prepared.memo_truncated,
            explorer_url: self.config.explorer_link(tx_hash.as_deref()),
            tx_hash,
        })
    }

    /// Disconnect the wallet.
    pub async fn disconnect(&self) {
        self.connector.disconnect().await;
    }
}

fn trim_zeros(s: &str) -> &str {
    s.trim_end_matches('0').trim_end_matches('.')
}
