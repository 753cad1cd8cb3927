//! h5sh configuration
//!
//! # Configuration Loading Priority
//!
//! 1. Compiled-in defaults
//! 2. `/etc/h5sh/h5sh.yaml` (system-wide)
//! 3. `~/.config/h5sh/h5sh.yaml` (user)
//! 4. `./h5sh.yaml` (project-local)
//! 5. `H5SH_CONFIG=/path/to/config.yaml` or `--config` (explicit, replaces 2-4)
//! 6. Environment variables (highest priority)
//!
//! # Example Configuration
//!
//! ```yaml
//! shell:
//!   prompt: "{prompt}{file}:{path}{cwd}{prompt}> {reset}"
//!   colour: true
//!   history:
//!     file: "~/.h5sh_history"
//!     max_entries: 1000
//!
//! logging:
//!   level: warn
//! ```

#![allow(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

/// Load configuration from default locations.
pub fn load() -> Result<H5shConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<H5shConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = H5shConfig::default();
        assert!(config.shell.colour);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.logging.directive(), "warn");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = r"
shell:
  colour: false
";
        let config: H5shConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.shell.colour);
        assert_eq!(config.shell.history.max_entries, 1000); // default
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
shell:
  prompt: "{file}:{cwd}> "
  colour: false
  history:
    enabled: false
    file: "/tmp/h5sh_history"
    max_entries: 50

logging:
  level: debug
  format: compact
  filter: "h5sh=trace"
"#;
        let config: H5shConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.shell.prompt, "{file}:{cwd}> ");
        assert!(!config.shell.history.enabled);
        assert_eq!(config.shell.history.max_entries, 50);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.logging.directive(), "h5sh=trace");
    }

    #[test]
    fn history_file_expands_tilde() {
        let history = HistoryConfig {
            file: "~/.h5sh_history".to_string(),
            ..HistoryConfig::default()
        };
        let resolved = history.resolved_file();
        assert!(resolved.ends_with(".h5sh_history"));
        assert!(!resolved.to_string_lossy().starts_with('~'));
    }
}
