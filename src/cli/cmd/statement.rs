use super::{Context, DeliverError};
use crate::ofx::request::{Error as RequestError, OfxRequestBuilder, RequestBuilder};
use crate::ofx::{AccountKind, AccountRef, FiLogin};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, ValueHint};
use snafu::{OptionExt, ResultExt, Snafu};
use std::path::PathBuf;
use url::Url;

/// Build a statement request.
///
/// Asks an institution for an account's transaction history starting
/// some days in the past. Without `--url` the request document is
/// printed to stdout; with `--url` it is posted there and the raw
/// response body is written to the output file argument.
#[derive(Parser, Debug)]
pub struct Input {
    /// The financial institution identifier.
    #[arg(long)]
    pub fid: Option<String>,

    /// The organization name of the institution's OFX profile.
    #[arg(long)]
    pub org: Option<String>,

    /// The bank routing number. Required for bank accounts.
    #[arg(long)]
    pub bank: Option<String>,

    /// The broker identifier. Required for investment accounts.
    #[arg(long)]
    pub broker: Option<String>,

    /// The login user name.
    #[arg(long)]
    pub user: Option<String>,

    /// The login password. Never taken from config files.
    #[arg(long)]
    pub pass: Option<String>,

    /// The account to request the statement for.
    #[arg(long)]
    pub acct: String,

    /// The kind of account.
    #[arg(long = "type", value_enum)]
    pub kind: AccountKind,

    /// How many days of history to request, counted back from now.
    #[arg(long)]
    pub past: i64,

    /// The OFX endpoint to post the request to. When absent, the
    /// document is printed instead.
    #[arg(long, value_hint = ValueHint::Url)]
    pub url: Option<Url>,

    /// The file receiving the server response. Required with --url.
    pub outfile: Option<PathBuf>,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{}", source))]
    BuildRequest { source: RequestError },

    #[snafu(display("Invalid url '{}' in config: {}", value, source))]
    ConfigUrl {
        source: url::ParseError,
        value: String,
    },

    #[snafu(display("{}", source))]
    Deliver { source: DeliverError },

    #[snafu(display("--past value {} is out of range", days))]
    Lookback { days: i64 },
}

impl Input {
    pub async fn exec(&self, ctx: &Context) -> Result<(), Error> {
        let login = self.login(ctx);
        log::debug!("acct {}", self.acct);
        log::debug!("type {}", self.kind);
        log::debug!("past {}", self.past);
        let account = AccountRef::new(&self.acct, self.kind);
        let start = lookback_start(self.past)?;

        let document = OfxRequestBuilder
            .statement_request(&login, &account, start)
            .context(BuildRequestSnafu)?;
        let url = self.effective_url(ctx)?;
        ctx.deliver(&document, url.as_ref(), self.outfile.as_deref())
            .await
            .context(DeliverSnafu)
    }

    fn login(&self, ctx: &Context) -> FiLogin {
        let cfg = &ctx.config;
        let fid = flag_or_config(&self.fid, &cfg.fid);
        let org = flag_or_config(&self.org, &cfg.org);
        let bank = flag_or_config(&self.bank, &cfg.bank);
        let broker = flag_or_config(&self.broker, &cfg.broker);
        let user = flag_or_config(&self.user, &cfg.user);
        let pass = self.pass.as_deref().unwrap_or("");
        log::debug!("fid {}", fid);
        log::debug!("org {}", org);
        log::debug!("bank {}", bank);
        log::debug!("broker {}", broker);
        log::debug!("user {}", user);
        log::debug!("pass {}", pass);
        FiLogin::default()
            .fid(fid)
            .org(org)
            .bankid(bank)
            .brokerid(broker)
            .userid(user)
            .userpass(pass)
    }

    fn effective_url(&self, ctx: &Context) -> Result<Option<Url>, Error> {
        effective_url(&self.url, &ctx.config.url)
    }
}

/// The flag value wins; empty when neither is given.
pub(super) fn flag_or_config<'a>(flag: &'a Option<String>, config: &'a Option<String>) -> &'a str {
    flag.as_deref().or(config.as_deref()).unwrap_or("")
}

pub(super) fn effective_url(
    flag: &Option<Url>,
    config: &Option<String>,
) -> Result<Option<Url>, Error> {
    match flag {
        Some(u) => Ok(Some(u.clone())),
        None => match config {
            Some(value) => {
                let u = Url::parse(value).context(ConfigUrlSnafu {
                    value: value.as_str(),
                })?;
                Ok(Some(u))
            }
            None => Ok(None),
        },
    }
}

/// The cutoff passed into the statement request: now minus the given
/// number of days. Fails for day counts that leave the representable
/// time range instead of panicking inside chrono.
pub(super) fn lookback_start(days: i64) -> Result<DateTime<Utc>, Error> {
    Duration::try_days(days)
        .and_then(|delta| Utc::now().checked_sub_signed(delta))
        .context(LookbackSnafu { days })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookback_counts_whole_days() {
        let start = lookback_start(30).unwrap();
        let elapsed = (Utc::now() - start).num_seconds();
        assert!((elapsed - 30 * 86400).abs() <= 2, "off by {}", elapsed);
    }

    #[test]
    fn lookback_rejects_out_of_range_days() {
        // beyond what a TimeDelta can hold
        let err = lookback_start(200_000_000_000).unwrap_err();
        assert!(matches!(err, Error::Lookback { days: 200_000_000_000 }));
        // representable delta, but the resulting date leaves the calendar
        assert!(lookback_start(100_000_000).is_err());
    }

    #[test]
    fn flag_beats_config() {
        let flag = Some("1".to_string());
        let config = Some("2".to_string());
        assert_eq!(flag_or_config(&flag, &config), "1");
        assert_eq!(flag_or_config(&None, &config), "2");
        assert_eq!(flag_or_config(&None, &None), "");
    }

    #[test]
    fn config_url_must_parse() {
        let ok = effective_url(&None, &Some("https://ofx.example.com/x".into())).unwrap();
        assert_eq!(ok.unwrap().as_str(), "https://ofx.example.com/x");
        assert!(effective_url(&None, &Some("not a url".into())).is_err());
        assert!(effective_url(&None, &None).unwrap().is_none());
    }
}
