//! Layered configuration for appleopensource.
//!
//! Settings are merged from (lowest to highest priority):
//! 1. built-in defaults,
//! 2. `config.{toml,yaml,yml,json}` in the platform configuration directory,
//! 3. an explicit configuration file (`--config`),
//! 4. environment variables prefixed with `AOS_`, nested with `__`
//!    (e.g. `AOS_CACHE__BYPASS=true`, `AOS_REMOTE__BASE_URL=...`).
//!
//! Command-line flags are applied last by the caller (see [`Config::with_bypass`]).

pub mod error;

use crate::error::{ErrorKind, Result};
use aos_cache::CacheStore;
use aos_remote::{HttpRemote, RemoteHandle};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const APPLICATION_NAME: &str = "appleopensource";
pub const ENV_PREFIX: &str = "AOS_";
pub const DEFAULT_BASE_URL: &str = "https://opensource.apple.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONFIG_FILE_STEM: &str = "config";
const CONFIG_FILE_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache root. Defaults to the platform cache directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Treat every cache check as a miss for this run. Documents are still
    /// written, so the cache is refreshed.
    pub bypass: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}
impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("{APPLICATION_NAME}/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Load the configuration from every layer and validate it.
    pub fn load(extra_file: Option<&Path>) -> Result<Self> {
        let config_dir = project_dirs().map(|dirs| dirs.config_dir().to_path_buf());
        Self::from_figment(Self::figment(config_dir.as_deref(), extra_file)?)
    }

    /// Build the layered provider without extracting it.
    ///
    /// Missing files in `config_dir` are skipped; a missing `extra_file` is an
    /// error, since the user asked for it explicitly.
    pub fn figment(config_dir: Option<&Path>, extra_file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(dir) = config_dir {
            for extension in CONFIG_FILE_EXTENSIONS {
                let path = dir.join(CONFIG_FILE_STEM).with_extension(extension);
                if path.is_file() {
                    tracing::debug!(path = %path.display(), "merging configuration file");
                    figment = merge_file(figment, &path)?;
                }
            }
        }
        if let Some(path) = extra_file {
            if !path.is_file() {
                exn::bail!(ErrorKind::MissingFile(path.to_path_buf()));
            }
            tracing::debug!(path = %path.display(), "merging explicit configuration file");
            figment = merge_file(figment, path)?;
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Invalid)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.remote.base_url.trim().is_empty() {
            exn::bail!(ErrorKind::Validation {
                key: "remote.base_url",
                reason: "must not be empty",
            });
        }
        if self.remote.timeout_secs == 0 {
            exn::bail!(ErrorKind::Validation {
                key: "remote.timeout_secs",
                reason: "must be greater than zero",
            });
        }
        if self.cache.dir.as_ref().is_some_and(|dir| dir.as_os_str().is_empty()) {
            exn::bail!(ErrorKind::Validation {
                key: "cache.dir",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// Apply the command-line bypass flag. The flag can only switch bypass on.
    pub fn with_bypass(mut self, bypass: bool) -> Self {
        self.cache.bypass |= bypass;
        self
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.cache.dir {
            return Ok(dir.clone());
        }
        let dirs = project_dirs().ok_or_raise(|| ErrorKind::NoCacheDirectory)?;
        Ok(dirs.cache_dir().to_path_buf())
    }

    pub fn cache_store(&self) -> Result<CacheStore> {
        Ok(CacheStore::new(self.cache_dir()?, self.cache.bypass))
    }

    pub fn remote(&self) -> Result<RemoteHandle> {
        let remote = HttpRemote::new(
            &self.remote.base_url,
            Duration::from_secs(self.remote.timeout_secs),
            &self.remote.user_agent,
        )
        .or_raise(|| ErrorKind::Remote)?;
        Ok(Arc::new(remote))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APPLICATION_NAME)
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    Ok(match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    fn load(jail: &Jail, extra: Option<&str>) -> Result<Config> {
        let extra = extra.map(|name| jail.directory().join(name));
        Config::from_figment(Config::figment(Some(jail.directory()), extra.as_deref())?)
    }

    #[test]
    fn defaults() {
        Jail::expect_with(|jail| {
            let config = load(jail, None).map_err(|err| err.to_string())?;
            assert_eq!(config, Config::default());
            assert_eq!(config.remote.base_url, "https://opensource.apple.com");
            assert_eq!(config.remote.timeout_secs, 30);
            assert!(!config.cache.bypass);
            assert!(config.cache.dir.is_none());
            Ok(())
        });
    }

    #[test]
    fn layering_order() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[remote]\nbase_url = \"http://file.local\"\ntimeout_secs = 5\n")?;
            jail.create_file("extra.yaml", "remote:\n  timeout_secs: 10\ncache:\n  dir: /tmp/aos\n")?;
            jail.set_env("AOS_CACHE__BYPASS", "true");
            let config = load(jail, Some("extra.yaml")).map_err(|err| err.to_string())?;
            assert_eq!(config.remote.base_url, "http://file.local");
            assert_eq!(config.remote.timeout_secs, 10);
            assert_eq!(config.cache.dir, Some(PathBuf::from("/tmp/aos")));
            assert!(config.cache.bypass);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file("config.json", r#"{"remote": {"base_url": "http://file.local"}}"#)?;
            jail.set_env("AOS_REMOTE__BASE_URL", "http://env.local");
            let config = load(jail, None).map_err(|err| err.to_string())?;
            assert_eq!(config.remote.base_url, "http://env.local");
            Ok(())
        });
    }

    #[test]
    fn cli_bypass_only_switches_on() {
        let config = Config::default();
        assert!(config.clone().with_bypass(true).cache.bypass);
        assert!(!config.clone().with_bypass(false).cache.bypass);
        let mut bypassed = config;
        bypassed.cache.bypass = true;
        assert!(bypassed.with_bypass(false).cache.bypass);
    }

    #[test]
    fn missing_explicit_file() {
        Jail::expect_with(|jail| {
            let err = load(jail, Some("nope.toml")).unwrap_err();
            assert_eq!(*err, ErrorKind::MissingFile(jail.directory().join("nope.toml")));
            Ok(())
        });
    }

    #[test]
    fn unsupported_format() {
        Jail::expect_with(|jail| {
            jail.create_file("extra.ini", "bypass=true")?;
            let err = load(jail, Some("extra.ini")).unwrap_err();
            assert!(matches!(&*err, ErrorKind::UnsupportedFormat(_)));
            Ok(())
        });
    }

    #[test]
    fn wrong_types_are_invalid() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[remote]\ntimeout_secs = \"soon\"\n")?;
            let err = load(jail, None).unwrap_err();
            assert_eq!(*err, ErrorKind::Invalid);
            Ok(())
        });
    }

    #[rstest]
    #[case::empty_base_url("", 30, "remote.base_url")]
    #[case::blank_base_url("   ", 30, "remote.base_url")]
    #[case::zero_timeout("https://opensource.apple.com", 0, "remote.timeout_secs")]
    fn validation(#[case] base_url: &str, #[case] timeout_secs: u64, #[case] expected: &str) {
        let mut config = Config::default();
        config.remote.base_url = base_url.to_string();
        config.remote.timeout_secs = timeout_secs;
        let err = config.validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::Validation { key, .. } if *key == expected));
    }

    #[test]
    fn explicit_cache_dir_builds_store() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = Config::default().with_bypass(true);
        config.cache.dir = Some(temp.path().to_path_buf());
        let store = config.cache_store().unwrap();
        assert_eq!(store.root(), temp.path());
        assert!(store.is_bypassed());
    }

    #[test]
    fn remote_from_config() {
        let remote = Config::default().remote().unwrap();
        assert_eq!(remote.name(), "https://opensource.apple.com/");

        let mut config = Config::default();
        config.remote.base_url = "not a url".to_string();
        let Err(err) = config.remote() else {
            panic!("expected an invalid base URL to be rejected");
        };
        assert_eq!(*err, ErrorKind::Remote);
    }
}
