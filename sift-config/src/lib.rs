//! Loader for `sift.yaml` with environment overlays.
//!
//! Sources are merged in the order they are added, then `SIFT__`-prefixed
//! environment variables override them (`SIFT__LOGGING__LEVEL=debug`).
//! String values may reference `${VAR}`; references are expanded after the
//! merge, recursively up to a fixed depth. Every section is optional.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use sift_common::LogFormat;
use sift_serp::click::DEFAULT_PATTERNS;
use sift_serp::filter::FilterOptions;
use sift_serp::{Freshness, SelectorSet};
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// File the binary looks for when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sift.yaml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    pub version: Option<String>,
    pub logging: LoggingConfig,
    pub selectors: SelectorSet,
    pub search: SearchDefaults,
    pub click: ClickConfig,
    pub filters: FilterOptions,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
    pub dir: Option<PathBuf>,
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Text,
            dir: None,
            stderr: false,
        }
    }
}

/// Fallbacks for `sift url` options left unset on the command line.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    /// Unknown buckets are dropped rather than rejected.
    #[serde(deserialize_with = "lenient_freshness")]
    pub when: Option<Freshness>,
    pub lang: Option<String>,
    pub country: Option<String>,
    pub safe: Option<bool>,
}

fn lenient_freshness<'de, D>(deserializer: D) -> Result<Option<Freshness>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let bucket = Option::<String>::deserialize(deserializer)?;
    Ok(bucket.and_then(|b| {
        let when = Freshness::from_bucket(&b);
        if when.is_none() {
            tracing::warn!(bucket = %b, "ignoring unknown search.when bucket");
        }
        when
    }))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    /// Regexes with a `url` capture group, tried in order.
    pub patterns: Vec<String>,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct SiftConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    sources: usize,
}

impl Default for SiftConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SiftConfigLoader {
    /// Start with `SIFT__` environment overrides only.
    ///
    /// ```
    /// use sift_config::SiftConfigLoader;
    ///
    /// let config = SiftConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.logging.level, "info");
    /// assert!(config.filters.include.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(env_source()),
            sources: 0,
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format follows the suffix.
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.push(File::from(path.as_ref()).required(true))
    }

    /// Attach a file that is skipped when missing.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.push(File::from(path.as_ref()).required(false))
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use sift_config::SiftConfigLoader;
    /// use sift_serp::Freshness;
    ///
    /// let cfg = SiftConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// search:
    ///   when: week
    ///   country: en-GB
    ///   safe: false
    /// filters:
    ///   deny_domains: ["pinterest.com"]
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.search.when, Some(Freshness::Week));
    /// assert_eq!(cfg.search.country.as_deref(), Some("en-GB"));
    /// assert_eq!(cfg.search.safe, Some(false));
    /// assert_eq!(cfg.filters.deny_domains, ["pinterest.com"]);
    /// ```
    pub fn with_yaml_str(self, yaml: &str) -> Self {
        self.push(File::from_str(yaml, config::FileFormat::Yaml))
    }

    fn push<S>(mut self, source: S) -> Self
    where
        S: config::Source + Send + Sync + 'static,
    {
        self.builder = self.builder.add_source(source);
        self.sources += 1;
        self
    }

    /// Deserialize the merged sources into [`SiftConfig`].
    ///
    /// Sources added after construction would otherwise shadow the
    /// environment, so the `SIFT__` layer is re-applied last.
    pub fn load(self) -> Result<SiftConfig, ConfigError> {
        let builder = if self.sources > 0 {
            self.builder.add_source(env_source())
        } else {
            self.builder
        };
        let cfg = builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: SiftConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        tracing::debug!(version = ?typed.version, "configuration loaded");
        Ok(typed)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("SIFT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
