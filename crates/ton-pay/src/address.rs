//! Recipient address validation.
//!
//! Two textual forms are accepted:
//!
//! - User-friendly: a two-character tag (`EQ`, `UQ`, `kQ`, `0Q`) followed by
//!   46 base64url characters, 48 in total
//! - Raw basechain: `0:` followed by 64 hex digits
//!
//! The address is passed to the wallet unchanged; only its shape is checked
//! here.

use std::fmt;

/// Length of a user-friendly address string.
pub const FRIENDLY_ADDRESS_LEN: usize = 48;

/// Length of the hex account id in a raw address.
const RAW_HEX_LEN: usize = 64;

/// Which textual form an address was given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Base64url user-friendly form.
    Friendly {
        /// `EQ`/`kQ` addresses bounce failed transfers back.
        bounceable: bool,
        /// `kQ`/`0Q` addresses are testnet-only.
        testnet: bool,
    },
    /// `0:<hex>` raw form.
    Raw,
}

/// A recipient address whose format has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TonAddress {
    address: String,
    kind: AddressKind,
}

impl TonAddress {
    /// Parse and validate an address string.
    ///
    /// Returns `None` if the string matches neither accepted form.
    ///
    /// ```
    /// use ton_pay::{AddressKind, TonAddress};
    ///
    /// let addr = TonAddress::parse("UQBvW8Z5huBkMJYdnfAEM5JqTNkuWX3diqYENkWsIL0XggGG").unwrap();
    /// assert_eq!(addr.kind(), AddressKind::Friendly { bounceable: false, testnet: false });
    ///
    /// assert!(TonAddress::parse("not an address").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        let kind = if let Some(hex) = s.strip_prefix("0:") {
            if hex.len() != RAW_HEX_LEN || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            AddressKind::Raw
        } else {
            if s.len() != FRIENDLY_ADDRESS_LEN || !s.is_ascii() {
                return None;
            }
            let (tag, body) = s.split_at(2);
            let (bounceable, testnet) = match tag {
                "EQ" => (true, false),
                "UQ" => (false, false),
                "kQ" => (true, true),
                "0Q" => (false, true),
                _ => return None,
            };
            if !body.bytes().all(is_base64url) {
                return None;
            }
            AddressKind::Friendly { bounceable, testnet }
        };

        Some(TonAddress {
            address: s.to_string(),
            kind,
        })
    }

    /// Check whether a string is an acceptable address.
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_some()
    }

    /// The address as given (trimmed).
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Form of the address.
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// Whether this address targets testnet.
    pub fn is_testnet(&self) -> bool {
        matches!(self.kind, AddressKind::Friendly { testnet: true, .. })
    }
}

impl fmt::Display for TonAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

fn is_base64url(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Shorten an address for display: first 6 and last 4 characters.
///
/// Strings of 10 characters or fewer are returned unchanged.
pub fn short(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
