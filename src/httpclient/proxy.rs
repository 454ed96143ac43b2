//! Proxy selection for the http client.

use reqwest::{ClientBuilder, Proxy, Result};

#[derive(Debug, Clone)]
pub enum ProxySetting {
    /// Leave the client alone, reqwest picks up the system proxy.
    System,
    /// Disable proxying entirely, including the system proxy.
    None,
    /// Route everything through the given proxy url.
    Custom {
        url: String,
        user: Option<String>,
        password: Option<String>,
    },
}

impl ProxySetting {
    pub fn set(&self, builder: ClientBuilder) -> Result<ClientBuilder> {
        match self {
            ProxySetting::System => Ok(builder),
            ProxySetting::None => {
                log::debug!("Ignoring the system proxy");
                Ok(builder.no_proxy())
            }
            ProxySetting::Custom {
                url,
                user,
                password,
            } => {
                log::debug!("Posting through proxy {}", url);
                let mut proxy = Proxy::all(url)?;
                if let Some(login) = user {
                    proxy = proxy.basic_auth(login, password.as_deref().unwrap_or(""));
                }
                Ok(builder.proxy(proxy))
            }
        }
    }
}
