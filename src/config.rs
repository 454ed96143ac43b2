//! Optional config file with defaults for institution fields.
//!
//! Talking to the same institution over and over means repeating
//! `--fid/--org/--user/--url` on every call. A TOML file can provide
//! those defaults; flags always win over config values. Passwords are
//! never read from (or written to) config files.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use snafu::Snafu;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Unable to read config file {}: {}", path.display(), source))]
    ReadFile {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Unable to write config file {}: {}", path.display(), source))]
    WriteFile {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Unable to parse file {}: {}", path.display(), source))]
    ParseFile {
        source: toml::de::Error,
        path: PathBuf,
    },
    #[snafu(display("The config file could not be serialized"))]
    WriteToml {
        source: toml::ser::Error,
        path: PathBuf,
    },
}

/// Defaults applied to request flags that were not given on the
/// command line. All fields are optional; an absent file behaves like
/// an empty one.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct ConnectConfig {
    /// The institution identifier (--fid).
    pub fid: Option<String>,

    /// The institution's organization name (--org).
    pub org: Option<String>,

    /// The bank routing number (--bank).
    pub bank: Option<String>,

    /// The broker identifier (--broker).
    pub broker: Option<String>,

    /// The login user name (--user).
    pub user: Option<String>,

    /// The OFX endpoint to post to (--url).
    pub url: Option<String>,
}

impl ConnectConfig {
    pub fn read(file: &Path) -> Result<ConnectConfig, ConfigError> {
        let cnt = std::fs::read_to_string(file).map_err(|e| ConfigError::ReadFile {
            source: e,
            path: file.to_path_buf(),
        });
        cnt.and_then(|c| {
            toml::from_str(&c).map_err(|e| ConfigError::ParseFile {
                source: e,
                path: file.to_path_buf(),
            })
        })
    }

    pub fn write(&self, file: &Path) -> Result<(), ConfigError> {
        if !file.exists() {
            if let Some(dir) = file.parent() {
                std::fs::create_dir_all(dir).map_err(|e| ConfigError::WriteFile {
                    source: e,
                    path: file.to_path_buf(),
                })?;
            }
        }
        let cnt = toml::to_string(self).map_err(|e| ConfigError::WriteToml {
            source: e,
            path: file.to_path_buf(),
        });

        cnt.and_then(|c| {
            std::fs::write(file, c).map_err(|e| ConfigError::WriteFile {
                source: e,
                path: file.to_path_buf(),
            })
        })
    }

    /// Loads the config from an explicit path, or from the platform
    /// config directory when none is given. A missing default file is
    /// an empty config; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<ConnectConfig, ConfigError> {
        match explicit {
            Some(file) => {
                log::debug!("Reading config from {}", file.display());
                ConnectConfig::read(file)
            }
            None => match default_location() {
                Some(file) if file.exists() => {
                    log::debug!("Reading config from {}", file.display());
                    ConnectConfig::read(&file)
                }
                _ => Ok(ConnectConfig::default()),
            },
        }
    }
}

fn default_location() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ofxconnect").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[test]
fn write_and_read_config() {
    let data = ConnectConfig {
        fid: Some("4321".into()),
        org: Some("MYBANK".into()),
        bank: Some("021000021".into()),
        broker: None,
        user: Some("jdoe".into()),
        url: Some("https://ofx.example.com".into()),
    };
    let tmp = std::env::temp_dir();
    let target = tmp.join("ofxconnect-test.conf");
    data.write(&target).unwrap();
    let from_file = ConnectConfig::read(&target).unwrap();
    std::fs::remove_file(&target).unwrap();
    assert_eq!(data, from_file);
}
