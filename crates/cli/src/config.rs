use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use mood_client::{ClientConfig, DEFAULT_SERVICE_URL};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_CONFIG_PATH: &str = "MOODTUNES_CONFIG_PATH";
const ENV_SERVICE_URL: &str = "MOODTUNES_SERVICE_URL";
const ENV_USE_CLUSTERING: &str = "MOODTUNES_USE_CLUSTERING";
const ENV_REQUEST_TIMEOUT: &str = "MOODTUNES_REQUEST_TIMEOUT_SECS";
const ENV_LOG_FILE: &str = "MOODTUNES_LOG_FILE";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    service_url: String,
    use_clustering: bool,
    request_timeout: Option<Duration>,
    log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Defaults, then the config file, then the environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        let path = match config_file_override() {
            Some(path) => Some(path),
            None => Self::default_config_path().ok(),
        };
        if let Some(path) = path {
            if path.exists() {
                let partial = read_partial(&path)?;
                config.apply_partial(partial);
            }
        }

        config.apply_env_with(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub fn use_clustering(&self) -> bool {
        self.use_clustering
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.service_url.clone(),
            timeout: self.request_timeout,
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "Moodtunes", "Moodtunes")
            .ok_or_else(|| anyhow!("unable to determine config directory"))?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Command-line flags win over everything else.
    pub fn apply_overrides(&mut self, service_url: Option<String>, timeout_secs: Option<u64>) {
        if let Some(url) = service_url {
            self.service_url = url;
        }
        if let Some(secs) = timeout_secs {
            self.request_timeout = timeout_from_secs(secs);
        }
    }

    fn apply_partial(&mut self, partial: PartialConfig) {
        if let Some(url) = partial.service_url {
            self.service_url = url;
        }
        if let Some(enabled) = partial.use_clustering {
            self.use_clustering = enabled;
        }
        if let Some(secs) = partial.request_timeout_secs {
            self.request_timeout = timeout_from_secs(secs);
        }
        if let Some(path) = partial.log_file {
            self.log_file = Some(path);
        }
    }

    fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SERVICE_URL) {
            if !value.trim().is_empty() {
                self.service_url = value;
            }
        }
        if let Some(value) = lookup(ENV_USE_CLUSTERING) {
            if !value.trim().is_empty() {
                self.use_clustering = parse_flag(&value)
                    .with_context(|| format!("{ENV_USE_CLUSTERING} must be true or false"))?;
            }
        }
        if let Some(value) = lookup(ENV_REQUEST_TIMEOUT) {
            if !value.trim().is_empty() {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("{ENV_REQUEST_TIMEOUT} must be a whole number of seconds"))?;
                self.request_timeout = timeout_from_secs(secs);
            }
        }
        if let Some(value) = lookup(ENV_LOG_FILE) {
            if value.trim().is_empty() {
                self.log_file = None;
            } else {
                self.log_file = Some(PathBuf::from(value));
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            use_clustering: true,
            request_timeout: None,
            log_file: None,
        }
    }
}

/// Zero means no timeout.
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized flag value '{other}'"),
    }
}

fn config_file_override() -> Option<PathBuf> {
    let value = env::var_os(ENV_CONFIG_PATH)?;
    if value.is_empty() {
        return None;
    }
    let path = PathBuf::from(value);
    if path.is_dir() {
        return Some(path.join(CONFIG_FILE_NAME));
    }
    Some(path)
}

fn read_partial(path: &Path) -> Result<PartialConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    parse_partial(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

fn parse_partial(contents: &str) -> Result<PartialConfig> {
    Ok(toml::from_str(contents)?)
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct PartialConfig {
    service_url: Option<String>,
    use_clustering: Option<bool>,
    request_timeout_secs: Option<u64>,
    log_file: Option<PathBuf>,
}
