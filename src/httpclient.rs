//! The http transport for OFX requests
//!
//! Provides a thin client around reqwest that posts a request
//! document to an institution's OFX endpoint and streams the raw
//! response body into a file. OFX servers answer with the response
//! document as the body; no decoding happens here.
//!
//! # Usage
//!
//! ```rust,no_run
//! use ofxconnect::httpclient;
//! let client = httpclient::Client::new(
//!     httpclient::proxy::ProxySetting::System,
//! ).unwrap();
//! async {
//!     let n = client
//!         .post_ofx("https://ofx.example.com", "OFXHEADER:100…", "response.ofx".as_ref())
//!         .await
//!         .unwrap();
//!     println!("got {} bytes", n);
//! };
//! ```

pub mod proxy;

use futures::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::ClientBuilder;
use snafu::{ResultExt, Snafu};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const OFX_MIME: &str = "application/x-ofx";
const OFX_ACCEPT: &str = "*/*, application/x-ofx";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("An error was received from {}: {}", url, source))]
    Http { source: reqwest::Error, url: String },

    #[snafu(display("An error occurred creating the http client: {}", source))]
    ClientCreate { source: reqwest::Error },

    #[snafu(display("Error opening file '{}': {}", path.display(), source))]
    OpenFile {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("Error writing file '{}': {}", path.display(), source))]
    WriteFile {
        source: std::io::Error,
        path: PathBuf,
    },
}

/// The OFX http client.
///
/// This wraps a reqwest client with the single post operation OFX
/// exchanges need.
pub struct Client {
    client: reqwest::Client,
}

impl Client {
    pub fn new(proxy: proxy::ProxySetting) -> Result<Client, Error> {
        let mut client_builder = ClientBuilder::new().user_agent(USER_AGENT);
        client_builder = proxy.set(client_builder).context(ClientCreateSnafu)?;
        let client = client_builder.build().context(ClientCreateSnafu)?;
        Ok(Client { client })
    }

    /// Posts the OFX `document` to `url` and streams the response
    /// body into `target`, creating or truncating it. Returns the
    /// number of bytes written. There is deliberately no timeout; the
    /// call awaits until the transfer completes or the transport
    /// fails.
    pub async fn post_ofx(&self, url: &str, document: &str, target: &Path) -> Result<u64, Error> {
        log::debug!("POST {} ({} bytes of request)", url, document.len());
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, OFX_MIME)
            .header(ACCEPT, OFX_ACCEPT)
            .body(document.to_string())
            .send()
            .await
            .context(HttpSnafu { url })?;
        log::debug!("Response status: {}", resp.status());

        let mut file = tokio::fs::File::create(target)
            .await
            .context(OpenFileSnafu { path: target })?;
        let mut written: u64 = 0;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let bytes = chunk.context(HttpSnafu { url })?;
            file.write_all(&bytes)
                .await
                .context(WriteFileSnafu { path: target })?;
            written += bytes.len() as u64;
        }
        file.flush().await.context(WriteFileSnafu { path: target })?;
        Ok(written)
    }
}
