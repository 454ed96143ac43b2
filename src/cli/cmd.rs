pub mod account_info;
pub mod shell_completion;
pub mod statement;
pub mod version;

use super::sink::{Error as SinkError, Sink};
use crate::cli::opts::{CommonOpts, ProxySetting};
use crate::config::{ConfigError, ConnectConfig};
use crate::httpclient::{self, proxy, Client};
use serde::Serialize;
use snafu::{OptionExt, ResultExt, Snafu};
use std::path::Path;
use url::Url;

pub struct Context {
    pub opts: CommonOpts,
    pub config: ConnectConfig,
    pub client: Client,
}

impl Context {
    pub fn new(opts: &CommonOpts) -> Result<Context, CmdError> {
        let config = ConnectConfig::load(opts.config.as_deref()).context(ConfigReadSnafu)?;
        let client = Client::new(proxy_settings(opts)).context(ContextCreateSnafu)?;
        Ok(Context {
            opts: opts.clone(),
            config,
            client,
        })
    }

    /// A short hand for `Sink::write(self.format(), value)`
    async fn write_result<A: Sink + Serialize>(&self, value: &A) -> Result<(), SinkError> {
        let fmt = self.opts.format;
        Sink::write(&fmt, value)
    }

    /// Delivers a built request document. Without a url the raw
    /// document goes to stdout. With a url the document is posted and
    /// the response body lands verbatim in `outfile`, which is
    /// required in that mode.
    pub async fn deliver(
        &self,
        document: &str,
        url: Option<&Url>,
        outfile: Option<&Path>,
    ) -> Result<(), DeliverError> {
        match url {
            None => {
                print!("{}", document);
                Ok(())
            }
            Some(url) => {
                let target = outfile.context(MissingOutputFileSnafu)?;
                let written = self
                    .client
                    .post_ofx(url.as_str(), document, target)
                    .await
                    .context(PostSnafu)?;
                log::info!("Wrote {} response bytes to {}", written, target.display());
                Ok(())
            }
        }
    }
}

fn proxy_settings(opts: &CommonOpts) -> proxy::ProxySetting {
    let user = opts.proxy_user.clone();
    let password = opts.proxy_password.clone();
    let prx = opts.proxy.clone();

    log::debug!("Using proxy: {:?} @ {:?}", user, prx);
    match prx {
        None => proxy::ProxySetting::System,
        Some(ProxySetting::None) => proxy::ProxySetting::None,
        Some(ProxySetting::Custom { url }) => proxy::ProxySetting::Custom {
            url: url.clone(),
            user,
            password,
        },
    }
}

#[derive(Debug, Snafu)]
pub enum DeliverError {
    #[snafu(display("An output file argument is required when posting to a url"))]
    MissingOutputFile,

    #[snafu(display("Posting the request failed: {}", source))]
    Post { source: httpclient::Error },
}

#[derive(Debug, Snafu)]
pub enum CmdError {
    #[snafu(display("ContextCreate - {}", source))]
    ContextCreate { source: httpclient::Error },

    #[snafu(display("Config - {}", source))]
    ConfigRead { source: ConfigError },

    #[snafu(display("Statement - {}", source))]
    Statement { source: statement::Error },

    #[snafu(display("AccountInfo - {}", source))]
    AccountInfo { source: account_info::Error },

    #[snafu(display("Version - {}", source))]
    Version { source: version::Error },
}

impl From<statement::Error> for CmdError {
    fn from(source: statement::Error) -> Self {
        CmdError::Statement { source }
    }
}

impl From<account_info::Error> for CmdError {
    fn from(source: account_info::Error) -> Self {
        CmdError::AccountInfo { source }
    }
}

impl From<version::Error> for CmdError {
    fn from(source: version::Error) -> Self {
        CmdError::Version { source }
    }
}
