//! OFX request document generation
//!
//! Builds OFX 1.02 SGML request documents: the `OFXHEADER` prologue,
//! a `<SONRQ>` signon block and the message set for the requested
//! operation. The documents follow the shape emitted by libofx, which
//! most institutions running OFX 1.x endpoints accept.
//!
//! Validation happens here, not in the CLI layer: which login fields
//! are required depends on the request kind, for statements also on
//! the account kind.

use super::{AccountKind, AccountRef, FiLogin};
use chrono::{DateTime, Utc};
use snafu::Snafu;

const APP_ID: &str = "QWIN";
const APP_VER: &str = "2300";
const OFX_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

#[derive(Debug, Snafu, PartialEq)]
pub enum Error {
    #[snafu(display("--{} is required for {} request", field, request))]
    MissingField {
        field: &'static str,
        request: &'static str,
    },
}

/// Produces serialized OFX request documents from the login and
/// account records. A seam over the concrete generator so dispatch
/// logic can be exercised without building real documents.
pub trait RequestBuilder {
    /// A statement request asking for transaction history from
    /// `start` up to now.
    fn statement_request(
        &self,
        login: &FiLogin,
        account: &AccountRef,
        start: DateTime<Utc>,
    ) -> Result<String, Error>;

    /// An account info request enumerating the accounts reachable by
    /// the login.
    fn account_info_request(&self, login: &FiLogin) -> Result<String, Error>;
}

/// The OFX 1.02 SGML generator.
#[derive(Debug, Default)]
pub struct OfxRequestBuilder;

impl RequestBuilder for OfxRequestBuilder {
    fn statement_request(
        &self,
        login: &FiLogin,
        account: &AccountRef,
        start: DateTime<Utc>,
    ) -> Result<String, Error> {
        statement_document(login, account, start, Utc::now())
    }

    fn account_info_request(&self, login: &FiLogin) -> Result<String, Error> {
        account_info_document(login, Utc::now())
    }
}

fn statement_document(
    login: &FiLogin,
    account: &AccountRef,
    start: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<String, Error> {
    const REQUEST: &str = "a statement";
    require(&login.fid, "fid", REQUEST)?;
    require(&login.org, "org", REQUEST)?;
    require(&login.userid, "user", REQUEST)?;
    require(&login.userpass, "pass", REQUEST)?;
    require(&account.id, "acct", REQUEST)?;
    match account.kind {
        AccountKind::Bank => require(&login.bankid, "bank", "a bank statement")?,
        AccountKind::Investment => {
            require(&login.brokerid, "broker", "an investment statement")?
        }
    };

    let trnuid = trnuid(now);
    let mut doc = Sgml::new(&trnuid);
    doc.signon(login, now);
    match account.kind {
        AccountKind::Bank => {
            doc.open("BANKMSGSRQV1");
            doc.open("STMTTRNRQ");
            doc.leaf("TRNUID", &trnuid);
            doc.leaf("CLTCOOKIE", "1");
            doc.open("STMTRQ");
            doc.open("BANKACCTFROM");
            doc.leaf("BANKID", &login.bankid);
            doc.leaf("ACCTID", &account.id);
            doc.leaf("ACCTTYPE", "CHECKING");
            doc.close("BANKACCTFROM");
            doc.open("INCTRAN");
            doc.leaf("DTSTART", &ofx_time(start));
            doc.leaf("INCLUDE", "Y");
            doc.close("INCTRAN");
            doc.close("STMTRQ");
            doc.close("STMTTRNRQ");
            doc.close("BANKMSGSRQV1");
        }
        AccountKind::Investment => {
            doc.open("INVSTMTMSGSRQV1");
            doc.open("INVSTMTTRNRQ");
            doc.leaf("TRNUID", &trnuid);
            doc.leaf("CLTCOOKIE", "1");
            doc.open("INVSTMTRQ");
            doc.open("INVACCTFROM");
            doc.leaf("BROKERID", &login.brokerid);
            doc.leaf("ACCTID", &account.id);
            doc.close("INVACCTFROM");
            doc.open("INCTRAN");
            doc.leaf("DTSTART", &ofx_time(start));
            doc.leaf("INCLUDE", "Y");
            doc.close("INCTRAN");
            doc.leaf("INCOO", "Y");
            doc.open("INCPOS");
            doc.leaf("DTASOF", &ofx_time(now));
            doc.leaf("INCLUDE", "Y");
            doc.close("INCPOS");
            doc.leaf("INCBAL", "Y");
            doc.close("INVSTMTRQ");
            doc.close("INVSTMTTRNRQ");
            doc.close("INVSTMTMSGSRQV1");
        }
    }
    Ok(doc.finish())
}

fn account_info_document(login: &FiLogin, now: DateTime<Utc>) -> Result<String, Error> {
    const REQUEST: &str = "an account info";
    require(&login.fid, "fid", REQUEST)?;
    require(&login.org, "org", REQUEST)?;
    require(&login.userid, "user", REQUEST)?;
    require(&login.userpass, "pass", REQUEST)?;

    let trnuid = trnuid(now);
    let mut doc = Sgml::new(&trnuid);
    doc.signon(login, now);
    doc.open("SIGNUPMSGSRQV1");
    doc.open("ACCTINFOTRNRQ");
    doc.leaf("TRNUID", &trnuid);
    doc.leaf("CLTCOOKIE", "1");
    doc.open("ACCTINFORQ");
    // ask for everything, not only changes since a previous sync
    doc.leaf("DTACCTUP", "19700101000000");
    doc.close("ACCTINFORQ");
    doc.close("ACCTINFOTRNRQ");
    doc.close("SIGNUPMSGSRQV1");
    Ok(doc.finish())
}

fn require<'a>(
    value: &'a str,
    field: &'static str,
    request: &'static str,
) -> Result<&'a str, Error> {
    if value.is_empty() {
        MissingFieldSnafu { field, request }.fail()
    } else {
        Ok(value)
    }
}

fn ofx_time(t: DateTime<Utc>) -> String {
    t.format(OFX_TIME_FORMAT).to_string()
}

fn trnuid(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

/// Line-oriented writer for OFX 1.x SGML. Leaf elements carry no
/// closing tag in this dialect.
struct Sgml {
    buf: String,
}

impl Sgml {
    fn new(uid: &str) -> Sgml {
        let mut buf = String::with_capacity(1024);
        for line in [
            "OFXHEADER:100",
            "DATA:OFXSGML",
            "VERSION:102",
            "SECURITY:NONE",
            "ENCODING:USASCII",
            "CHARSET:1252",
            "COMPRESSION:NONE",
            "OLDFILEUID:NONE",
        ] {
            buf.push_str(line);
            buf.push_str("\r\n");
        }
        buf.push_str(&format!("NEWFILEUID:{}\r\n\r\n", uid));
        buf.push_str("<OFX>\r\n");
        Sgml { buf }
    }

    fn signon(&mut self, login: &FiLogin, now: DateTime<Utc>) {
        self.open("SIGNONMSGSRQV1");
        self.open("SONRQ");
        self.leaf("DTCLIENT", &ofx_time(now));
        self.leaf("USERID", &login.userid);
        self.leaf("USERPASS", &login.userpass);
        self.leaf("LANGUAGE", "ENG");
        self.open("FI");
        self.leaf("ORG", &login.org);
        self.leaf("FID", &login.fid);
        self.close("FI");
        self.leaf("APPID", APP_ID);
        self.leaf("APPVER", APP_VER);
        self.close("SONRQ");
        self.close("SIGNONMSGSRQV1");
    }

    fn open(&mut self, tag: &str) {
        self.buf.push_str(&format!("<{}>\r\n", tag));
    }

    fn close(&mut self, tag: &str) {
        self.buf.push_str(&format!("</{}>\r\n", tag));
    }

    fn leaf(&mut self, tag: &str, value: &str) {
        self.buf.push_str(&format!("<{}>{}\r\n", tag, value));
    }

    fn finish(mut self) -> String {
        self.buf.push_str("</OFX>\r\n");
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn login() -> FiLogin {
        FiLogin::default()
            .fid("1")
            .org("MYBANK")
            .bankid("021000021")
            .brokerid("broker.example.com")
            .userid("jdoe")
            .userpass("secret")
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 30, 0).unwrap()
    }

    #[test]
    fn bank_statement_document_shape() {
        let account = AccountRef::new("555", AccountKind::Bank);
        let doc =
            statement_document(&login(), &account, at(2024, 6, 1), at(2024, 7, 1)).unwrap();
        assert!(doc.starts_with("OFXHEADER:100\r\n"));
        assert!(doc.contains("DATA:OFXSGML"));
        assert!(doc.contains("VERSION:102"));
        assert!(doc.contains("<SONRQ>"));
        assert!(doc.contains("<USERID>jdoe"));
        assert!(doc.contains("<ORG>MYBANK"));
        assert!(doc.contains("<FID>1"));
        assert!(doc.contains("<STMTRQ>"));
        assert!(doc.contains("<BANKID>021000021"));
        assert!(doc.contains("<ACCTID>555"));
        assert!(doc.contains("<ACCTTYPE>CHECKING"));
        assert!(doc.contains("<DTSTART>20240601123000"));
        assert!(doc.contains("<DTCLIENT>20240701123000"));
        assert!(doc.ends_with("</OFX>\r\n"));
        assert!(!doc.contains("<INVSTMTRQ>"));
    }

    #[test]
    fn investment_statement_document_shape() {
        let account = AccountRef::new("9912", AccountKind::Investment);
        let doc =
            statement_document(&login(), &account, at(2024, 6, 1), at(2024, 7, 1)).unwrap();
        assert!(doc.contains("<INVSTMTRQ>"));
        assert!(doc.contains("<BROKERID>broker.example.com"));
        assert!(doc.contains("<ACCTID>9912"));
        assert!(doc.contains("<DTASOF>20240701123000"));
        assert!(!doc.contains("<BANKACCTFROM>"));
    }

    #[test]
    fn bank_statement_needs_bankid() {
        let fi = FiLogin { bankid: String::new(), ..login() };
        let account = AccountRef::new("555", AccountKind::Bank);
        let err = statement_document(&fi, &account, at(2024, 6, 1), at(2024, 7, 1))
            .unwrap_err();
        assert_eq!(
            err,
            Error::MissingField { field: "bank", request: "a bank statement" }
        );
    }

    #[test]
    fn investment_statement_needs_brokerid() {
        let fi = FiLogin { brokerid: String::new(), ..login() };
        let account = AccountRef::new("9912", AccountKind::Investment);
        let err = statement_document(&fi, &account, at(2024, 6, 1), at(2024, 7, 1))
            .unwrap_err();
        assert_eq!(
            err,
            Error::MissingField { field: "broker", request: "an investment statement" }
        );
    }

    #[test]
    fn statement_needs_signon_fields() {
        let account = AccountRef::new("555", AccountKind::Bank);
        for field in ["fid", "org", "user", "pass"] {
            let mut fi = login();
            match field {
                "fid" => fi.fid.clear(),
                "org" => fi.org.clear(),
                "user" => fi.userid.clear(),
                _ => fi.userpass.clear(),
            }
            let err = statement_document(&fi, &account, at(2024, 6, 1), at(2024, 7, 1))
                .unwrap_err();
            assert_eq!(
                err,
                Error::MissingField { field, request: "a statement" }
            );
        }
    }

    #[test]
    fn account_info_document_shape() {
        let doc = account_info_document(&login(), at(2024, 7, 1)).unwrap();
        assert!(doc.contains("<SIGNUPMSGSRQV1>"));
        assert!(doc.contains("<ACCTINFORQ>"));
        assert!(doc.contains("<DTACCTUP>19700101000000"));
        assert!(!doc.contains("<STMTRQ>"));
    }

    #[test]
    fn account_info_needs_four_fields() {
        for field in ["fid", "org", "user", "pass"] {
            let mut fi = login();
            match field {
                "fid" => fi.fid.clear(),
                "org" => fi.org.clear(),
                "user" => fi.userid.clear(),
                _ => fi.userpass.clear(),
            }
            let err = account_info_document(&fi, at(2024, 7, 1)).unwrap_err();
            assert_eq!(
                err,
                Error::MissingField { field, request: "an account info" }
            );
        }
        // bank and broker ids are not needed here
        let fi = FiLogin {
            bankid: String::new(),
            brokerid: String::new(),
            ..login()
        };
        assert!(account_info_document(&fi, at(2024, 7, 1)).is_ok());
    }
}
