use crate::{ConfigError, H5shConfig};
use regex::Regex;
use std::path::PathBuf;

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("h5sh/h5sh.yaml"));
        }
        search_paths.push(PathBuf::from("./h5sh.yaml"));

        #[cfg(unix)]
        search_paths.insert(0, PathBuf::from("/etc/h5sh/h5sh.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = paths;
        self
    }

    pub fn load(&self) -> Result<H5shConfig, ConfigError> {
        let mut config = H5shConfig::default();

        if let Some(ref explicit) = self.explicit_file {
            config = self.parse_yaml(&Self::read(explicit)?)?;
        } else if let Ok(env_path) = std::env::var("H5SH_CONFIG") {
            config = self.parse_yaml(&Self::read(&PathBuf::from(env_path))?)?;
        } else {
            for path in &self.search_paths {
                if path.exists() {
                    if let Ok(content) = std::fs::read_to_string(path) {
                        tracing::debug!(path = %path.display(), "Merging config file");
                        config = self.merge_yaml(&config, &content)?;
                    }
                }
            }
        }

        self.apply_env_overrides(&mut config);
        Ok(config)
    }

    fn read(path: &PathBuf) -> Result<String, ConfigError> {
        std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })
    }

    fn parse_yaml(&self, content: &str) -> Result<H5shConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        if expanded.trim().is_empty() {
            return Ok(H5shConfig::default());
        }
        Ok(serde_yaml::from_str(&expanded)?)
    }

    fn merge_yaml(&self, base: &H5shConfig, content: &str) -> Result<H5shConfig, ConfigError> {
        let overlay = self.parse_yaml(content)?;
        Ok(self.merge_configs(base, &overlay))
    }

    fn merge_configs(&self, base: &H5shConfig, overlay: &H5shConfig) -> H5shConfig {
        let defaults = H5shConfig::default();
        let mut result = base.clone();

        if overlay.shell.prompt != defaults.shell.prompt {
            result.shell.prompt = overlay.shell.prompt.clone();
        }
        if overlay.shell.colour != defaults.shell.colour {
            result.shell.colour = overlay.shell.colour;
        }
        if overlay.shell.history != defaults.shell.history {
            result.shell.history = overlay.shell.history.clone();
        }
        if overlay.logging != defaults.logging {
            result.logging = overlay.logging.clone();
        }

        result
    }

    fn expand_env_vars(&self, content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern");
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_default()
        })
        .to_string()
    }

    fn apply_env_overrides(&self, config: &mut H5shConfig) {
        if let Ok(level) = std::env::var("H5SH_LOG_LEVEL") {
            if let Ok(l) = serde_yaml::from_str(&level) {
                config.logging.level = l;
            }
        }
        if let Ok(prompt) = std::env::var("H5SH_PROMPT") {
            if !prompt.is_empty() {
                config.shell.prompt = prompt;
            }
        }
        if let Ok(file) = std::env::var("H5SH_HISTFILE") {
            if !file.is_empty() {
                config.shell.history.file = file;
            }
        }
        // https://no-color.org: any non-empty value disables colour.
        if std::env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()) {
            config.shell.colour = false;
        }
    }
}
