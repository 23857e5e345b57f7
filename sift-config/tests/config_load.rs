use serial_test::serial;
use sift_common::LogFormat;
use sift_config::SiftConfigLoader;
use sift_serp::Freshness;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

const FILE_YAML: &str = r##"
version: "1"
logging:
  level: debug
  format: json
  dir: "${SIFT_TEST_HOME}/logs"
selectors:
  organic_block: "#results li.hit"
  attribution: [".byline", ".source"]
search:
  when: month
  lang: en-GB
  country: en-GB
click:
  patterns:
    - 'data-href="(?P<url>[^"]+)"'
filters:
  include: ["rust"]
  deny_domains: ["pinterest.com", "quora.com"]
"##;

#[test]
#[serial]
fn loads_every_section_from_file() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "sift.yaml", FILE_YAML);

    let config = temp_env::with_var("SIFT_TEST_HOME", Some("/srv/sift"), || {
        SiftConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load config")
    });

    assert_eq!(config.version.as_deref(), Some("1"));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.dir, Some(PathBuf::from("/srv/sift/logs")));

    assert_eq!(config.selectors.organic_block, "#results li.hit");
    assert_eq!(config.selectors.attribution, [".byline", ".source"]);
    // untouched selectors keep their defaults
    assert_eq!(config.selectors.organic_anchor, "h2 a");

    assert_eq!(config.search.when, Some(Freshness::Month));
    assert_eq!(config.search.country.as_deref(), Some("en-GB"));
    assert_eq!(config.search.safe, None);

    assert_eq!(config.click.patterns.len(), 1);
    assert_eq!(config.filters.include, ["rust"]);
    assert_eq!(config.filters.deny_domains, ["pinterest.com", "quora.com"]);
}

#[test]
#[serial]
fn environment_overrides_file() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "sift.yaml", FILE_YAML);

    let config = temp_env::with_vars(
        [
            ("SIFT_TEST_HOME", Some("/srv/sift")),
            ("SIFT__LOGGING__LEVEL", Some("warn")),
            ("SIFT__SEARCH__SAFE", Some("true")),
        ],
        || SiftConfigLoader::new().with_file(&p).load().expect("load config"),
    );

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.search.safe, Some(true));
    assert_eq!(config.search.lang.as_deref(), Some("en-GB"));
}

#[test]
#[serial]
fn missing_optional_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = SiftConfigLoader::new()
        .with_optional_file(tmp.path().join("absent.yaml"))
        .load()
        .expect("defaults");

    assert!(config.version.is_none());
    assert_eq!(config.selectors.organic_block, "#b_results li.b_algo");
    assert!(!config.click.patterns.is_empty());
}

#[test]
#[serial]
fn missing_required_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let result = SiftConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load();
    assert!(result.is_err());
}
