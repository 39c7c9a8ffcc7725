//! `ton://transfer` deep links.
//!
//! When no wallet connection is available, a payment can still be handed
//! to any installed wallet app through a link:
//!
//! ```text
//! ton://transfer/<address>?amount=<nanotons>&text=<comment>
//! ```
//!
//! The wallet builds the comment cell itself from `text`, so no payload is
//! encoded here.

use crate::address::TonAddress;
use crate::amount::Nanotons;

/// URL scheme and path prefix for transfer links.
pub const TRANSFER_LINK_PREFIX: &str = "ton://transfer/";

/// Build a transfer deep link.
///
/// ```
/// use ton_pay::{deeplink::transfer_link, Nanotons, TonAddress};
///
/// let to = TonAddress::parse("EQBvW8Z5huBkMJYdnfAEM5JqTNkuWX3diqYENkWsIL0XggGG").unwrap();
/// let link = transfer_link(&to, Nanotons(10_000_000), "coffee & cake");
/// assert_eq!(
///     link,
///     "ton://transfer/EQBvW8Z5huBkMJYdnfAEM5JqTNkuWX3diqYENkWsIL0XggGG?amount=10000000&text=coffee%20%26%20cake"
/// );
/// ```
pub fn transfer_link(to: &TonAddress, amount: Nanotons, memo: &str) -> String {
    let mut link = format!("{}{}?amount={}", TRANSFER_LINK_PREFIX, to.as_str(), amount.as_u128());

    let memo = memo.trim();
    if !memo.is_empty() {
        link.push_str("&text=");
        link.push_str(&percent_encode(memo));
    }

    link
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "0:6f5bc67986e06430961d9df00433926a4cd92e597ddd8aa6043645ac20bd1782";

    fn recipient() -> TonAddress {
        TonAddress::parse(RAW).unwrap()
    }

    #[test]
    fn test_link_without_memo() {
        let link = transfer_link(&recipient(), Nanotons::from_ton(2), "  ");
        assert_eq!(link, format!("ton://transfer/{}?amount=2000000000", RAW));
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
        assert_eq!(percent_encode("a b/c?d=e&f"), "a%20b%2Fc%3Fd%3De%26f");
        assert_eq!(percent_encode("café"), "caf%C3%A9");
        assert_eq!(percent_encode("\u{1F600}"), "%F0%9F%98%80");
    }

    #[test]
    fn test_link_memo_not_truncated() {
        let memo = "x".repeat(300);
        let link = transfer_link(&recipient(), Nanotons(1), &memo);
        assert!(link.ends_with(&memo));
    }
}
