//! TON wallet payments
//!
//! This crate drives a single TON transfer from a payment form to a
//! receipt:
//!
//! - **Validation**: recipient address shape, amount in nanotons, minimum
//! - **Transfer requests**: the JSON shape wallet connectors sign, with the
//!   memo encoded as a text-comment BoC by [`ton_memo`]
//! - **Sessions**: a [`PaymentSession`] holding the connector, hash lookup
//!   and configuration
//! - **Fallback**: `ton://transfer` deep links when no wallet is connected
//!
//! Wallet apps and indexers are reached through the [`WalletConnector`]
//! and [`HashLookup`] traits.

pub mod address;
pub mod amount;
pub mod config;
pub mod connector;
pub mod deeplink;
pub mod error;
pub mod lookup;
pub mod session;
pub mod transfer;

// Re-exports
pub use address::{AddressKind, TonAddress};
pub use amount::{Nanotons, PaymentSummary};
pub use config::PayConfig;
pub use connector::{
    ConnectorError, MockConnector, MockOutcome, SendReceipt, WalletAccount, WalletConnector,
};
pub use error::{Field, FieldError, PayError, PayResult};
pub use lookup::{HashLookup, NoLookup, TonCenterClient};
pub use session::{PaymentForm, PaymentReceipt, PaymentSession, ValidPayment};
pub use transfer::{PreparedTransfer, TransferMessage, TransferRequest};
