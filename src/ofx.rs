//! Data for OFX requests
//!
//! The records passed into request generation. Field values are
//! clipped to the maximum element widths of the OFX 1.02
//! specification when set, so a generated document never carries an
//! over-long element.

pub mod request;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FID_WIDTH: usize = 32;
pub const ORG_WIDTH: usize = 10;
pub const BANKID_WIDTH: usize = 9;
pub const BROKERID_WIDTH: usize = 22;
pub const USERID_WIDTH: usize = 32;
pub const USERPASS_WIDTH: usize = 32;
pub const ACCTID_WIDTH: usize = 22;

/// Login data identifying a financial institution and a user of its
/// OFX service. Empty fields are unset; which fields are required
/// depends on the request kind and is checked during request
/// generation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FiLogin {
    pub fid: String,
    pub org: String,
    pub bankid: String,
    pub brokerid: String,
    pub userid: String,
    pub userpass: String,
}

impl FiLogin {
    pub fn fid(mut self, value: &str) -> Self {
        self.fid = clip("fid", value, FID_WIDTH);
        self
    }

    pub fn org(mut self, value: &str) -> Self {
        self.org = clip("org", value, ORG_WIDTH);
        self
    }

    pub fn bankid(mut self, value: &str) -> Self {
        self.bankid = clip("bankid", value, BANKID_WIDTH);
        self
    }

    pub fn brokerid(mut self, value: &str) -> Self {
        self.brokerid = clip("brokerid", value, BROKERID_WIDTH);
        self
    }

    pub fn userid(mut self, value: &str) -> Self {
        self.userid = clip("userid", value, USERID_WIDTH);
        self
    }

    pub fn userpass(mut self, value: &str) -> Self {
        self.userpass = clip("userpass", value, USERPASS_WIDTH);
        self
    }
}

/// The account a statement is requested for.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRef {
    pub id: String,
    pub kind: AccountKind,
}

impl AccountRef {
    pub fn new(id: &str, kind: AccountKind) -> AccountRef {
        AccountRef {
            id: clip("acct", id, ACCTID_WIDTH),
            kind,
        }
    }
}

#[derive(ValueEnum, Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub enum AccountKind {
    /// A bank account, identified by a routing number.
    Bank,
    /// A brokerage/investment account, identified by a broker id.
    Investment,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Bank => write!(f, "bank"),
            AccountKind::Investment => write!(f, "investment"),
        }
    }
}

/// Clips `value` to at most `width` characters, warning when data is
/// dropped. Mirrors the bounded copies of C OFX clients.
fn clip(field: &str, value: &str, width: usize) -> String {
    match value.char_indices().nth(width) {
        Some((at, _)) => {
            log::warn!("Value for {} exceeds {} chars, clipping", field, width);
            value[..at].to_string()
        }
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_short_values() {
        assert_eq!(clip("fid", "1234", 32), "1234");
        assert_eq!(clip("org", "", 10), "");
    }

    #[test]
    fn clip_cuts_long_values() {
        let long = "x".repeat(40);
        assert_eq!(clip("fid", &long, FID_WIDTH).len(), 32);
    }

    #[test]
    fn clip_respects_char_boundaries() {
        assert_eq!(clip("org", "äöüß", 3), "äöü");
    }

    #[test]
    fn login_fields_are_bounded() {
        let login = FiLogin::default()
            .fid(&"9".repeat(50))
            .org("MYBANK")
            .userid("user");
        assert_eq!(login.fid.len(), FID_WIDTH);
        assert_eq!(login.org, "MYBANK");
        assert_eq!(login.userid, "user");
        assert_eq!(login.userpass, "");
    }

    #[test]
    fn account_id_is_bounded() {
        let acct = AccountRef::new(&"5".repeat(30), AccountKind::Bank);
        assert_eq!(acct.id.len(), ACCTID_WIDTH);
    }
}
