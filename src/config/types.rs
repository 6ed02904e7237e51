use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// Default location of the console's own settings file.
pub const DEFAULT_CONFIG_FILE: &str = "./palbox.yaml";

/// Environment variable that overrides [`DEFAULT_CONFIG_FILE`].
pub const CONFIG_FILE_ENV: &str = "PALBOX_CONFIG";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(default)]
pub struct ConfigV1 {
    pub bind_address: String,
    pub store: StoreConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl Default for ConfigV1 {
    fn default() -> Self {
        ConfigV1 {
            bind_address: "127.0.0.1:5000".to_string(),
            store: StoreConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Settings for the browser session cookie.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Live sessions kept in memory; the oldest is dropped beyond this.
    pub max_sessions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            cookie_name: "palbox_session".to_string(),
            max_sessions: 64,
        }
    }
}

/// Built-in defaults, overlaid by the YAML file at `path` (if it exists) and
/// then by `PALBOX_*` environment variables.
pub fn figment(path: &Path) -> Figment {
    Figment::from(Serialized::defaults(Config::ConfigV1(ConfigV1::default())))
        .merge(Yaml::file(path))
        .merge(Env::prefixed("PALBOX_").ignore(&["config"]).split("__"))
}

/// Extracts a [`ConfigV1`] from an assembled figment.
pub fn extract(figment: &Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Load config from `palbox.yaml` (or `$PALBOX_CONFIG`) and the environment.
pub fn load_config() -> ConfigV1 {
    let path = std::env::var_os(CONFIG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    match extract(&figment(&path)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    match serde_json::to_string_pretty(&schema) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error rendering configuration schema: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_yaml(yaml: &str) -> Result<ConfigV1, figment::Error> {
        let figment = Figment::from(Serialized::defaults(Config::ConfigV1(ConfigV1::default())))
            .merge(Yaml::string(yaml));
        extract(&figment)
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let cfg = from_yaml("version: \"1.0.0\"\n").unwrap();
        assert_eq!(cfg.bind_address, "127.0.0.1:5000");
        assert_eq!(cfg.store.path, PathBuf::from("config/palbox_config.json"));
        assert_eq!(cfg.session.cookie_name, "palbox_session");
        assert_eq!(cfg.session.max_sessions, 64);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, "console");
    }

    #[test]
    fn yaml_overrides_nested_keys() {
        let cfg = from_yaml(
            r#"
version: "1.0.0"
bind_address: "0.0.0.0:8080"
store:
  path: /var/lib/palbox/config.json
logging:
  format: json
"#,
        )
        .unwrap();

        assert_eq!(cfg.bind_address, "0.0.0.0:8080");
        assert_eq!(cfg.store.path, PathBuf::from("/var/lib/palbox/config.json"));
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn unknown_version_is_rejected() {
        assert!(from_yaml("version: \"2.0.0\"\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let figment = Figment::from(Serialized::defaults(Config::ConfigV1(ConfigV1::default())))
            .merge(Yaml::file(dir.path().join("absent.yaml")));
        let cfg = extract(&figment).unwrap();
        assert_eq!(cfg.session.cookie_name, "palbox_session");
    }
}
