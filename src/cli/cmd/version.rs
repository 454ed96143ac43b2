use super::Context;
use crate::cli::sink::Error as SinkError;
use crate::cli::BuildInfo;
use clap::Parser;
use snafu::{ResultExt, Snafu};

/// Prints version information about this client.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Error writing data: {}", source))]
    WriteResult { source: SinkError },
}

impl Input {
    pub async fn exec(&self, ctx: &Context) -> Result<(), Error> {
        let info = BuildInfo::default();
        ctx.write_result(&info).await.context(WriteResultSnafu)?;
        Ok(())
    }
}
