pub mod cmd;
pub mod opts;
pub mod sink;

use self::cmd::{CmdError, Context};
use self::opts::{MainOpts, SubCommand};
use clap::CommandFactory;
use serde::Serialize;
use std::fmt;

pub async fn execute_cmd(opts: MainOpts) -> Result<(), CmdError> {
    let ctx = Context::new(&opts.common_opts)?;

    log::info!("Running command: {:?}", opts.subcmd);
    match &opts.subcmd {
        SubCommand::Statement(input) => input.exec(&ctx).await?,
        SubCommand::AccountInfo(input) => input.exec(&ctx).await?,
        SubCommand::Version(input) => input.exec(&ctx).await?,
        SubCommand::ShellCompletion(input) => {
            let mut app = MainOpts::command();
            input.print_completions(&mut app).await;
        }
    };
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub build_date: &'static str,
    pub build_version: &'static str,
    pub rustc_host_triple: &'static str,
    pub rustc_version: &'static str,
    pub cargo_target_triple: &'static str,
}
impl Default for BuildInfo {
    fn default() -> Self {
        BuildInfo {
            build_date: env!("VERGEN_BUILD_TIMESTAMP"),
            build_version: env!("CARGO_PKG_VERSION"),
            rustc_host_triple: env!("VERGEN_RUSTC_HOST_TRIPLE"),
            rustc_version: env!("VERGEN_RUSTC_SEMVER"),
            cargo_target_triple: env!("VERGEN_CARGO_TARGET_TRIPLE"),
        }
    }
}
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  Built at: {}\n  Version: {}\n  Rustc: {}",
            self.build_date, self.build_version, self.rustc_version
        )
    }
}
