use super::statement::{effective_url, flag_or_config, Error as StatementError};
use super::{Context, DeliverError};
use crate::ofx::request::{Error as RequestError, OfxRequestBuilder, RequestBuilder};
use crate::ofx::FiLogin;
use clap::{Parser, ValueHint};
use snafu::{ResultExt, Snafu};
use std::path::PathBuf;
use url::Url;

/// Build an account info request.
///
/// Asks an institution which accounts are reachable by the given
/// login. No account descriptor is needed. Without `--url` the
/// request document is printed to stdout; with `--url` it is posted
/// there and the raw response body is written to the output file
/// argument.
#[derive(Parser, Debug)]
pub struct Input {
    /// The financial institution identifier.
    #[arg(long)]
    pub fid: Option<String>,

    /// The organization name of the institution's OFX profile.
    #[arg(long)]
    pub org: Option<String>,

    /// The login user name.
    #[arg(long)]
    pub user: Option<String>,

    /// The login password. Never taken from config files.
    #[arg(long)]
    pub pass: Option<String>,

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

    #[snafu(display("{}", source))]
    ConfigUrl { source: StatementError },

    #[snafu(display("{}", source))]
    Deliver { source: DeliverError },
}

impl Input {
    pub async fn exec(&self, ctx: &Context) -> Result<(), Error> {
        let login = self.login(ctx);
        let document = OfxRequestBuilder
            .account_info_request(&login)
            .context(BuildRequestSnafu)?;
        let url = effective_url(&self.url, &ctx.config.url).context(ConfigUrlSnafu)?;
        ctx.deliver(&document, url.as_ref(), self.outfile.as_deref())
            .await
            .context(DeliverSnafu)
    }

    fn login(&self, ctx: &Context) -> FiLogin {
        let cfg = &ctx.config;
        let fid = flag_or_config(&self.fid, &cfg.fid);
        let org = flag_or_config(&self.org, &cfg.org);
        let user = flag_or_config(&self.user, &cfg.user);
        let pass = self.pass.as_deref().unwrap_or("");
        log::debug!("fid {}", fid);
        log::debug!("org {}", org);
        log::debug!("user {}", user);
        log::debug!("pass {}", pass);
        FiLogin::default()
            .fid(fid)
            .org(org)
            .userid(user)
            .userpass(pass)
    }
}
