use crate::core::ConfigProvider;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "vigilance.toml";
const MAX_CHAT_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub auth: Option<AuthConfig>,
    pub output: OutputConfig,
    pub chat: ChatConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:10000".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "./reports".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { delay_ms: 600 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
    pub json_logs: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            json_logs: false,
        }
    }
}

impl TomlConfig {
    /// Reads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// The file `load` will read: the explicit path, else `vigilance.toml`
    /// when present. `None` means built-in defaults.
    pub fn source_path(explicit_path: Option<&str>) -> Option<&str> {
        match explicit_path {
            Some(path) => Some(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Some(DEFAULT_CONFIG_PATH),
            None => None,
        }
    }

    /// Loads from `source_path`, falling back to defaults.
    pub fn load(explicit_path: Option<&str>) -> Result<Self> {
        match Self::source_path(explicit_path) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Parses TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Command-line flags win over the file.
    pub fn apply_overrides(
        &mut self,
        server: Option<String>,
        output: Option<String>,
        no_color: bool,
    ) {
        if let Some(server) = server {
            tracing::debug!("🔧 Server overridden to: {}", server);
            self.server.base_url = server;
        }
        if let Some(output) = output {
            tracing::debug!("🔧 Output path overridden to: {}", output);
            self.output.path = output;
        }
        if no_color {
            self.display.color = false;
        }
    }

    pub fn json_logs(&self) -> bool {
        self.display.json_logs
    }
}

impl ConfigProvider for TomlConfig {
    fn server_url(&self) -> &str {
        &self.server.base_url
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        self.auth
            .as_ref()
            .map(|a| (a.username.as_str(), a.password.as_str()))
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_seconds)
    }

    fn chat_delay(&self) -> Duration {
        Duration::from_millis(self.chat.delay_ms)
    }

    fn color_enabled(&self) -> bool {
        self.display.color
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("server.base_url", &self.server.base_url)?;
        validation::validate_positive_number("server.timeout_seconds", self.server.timeout_seconds, 1)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_range("chat.delay_ms", self.chat.delay_ms, 0, MAX_CHAT_DELAY_MS)?;

        if let Some(auth) = &self.auth {
            validation::validate_non_empty_string("auth.username", &auth.username)?;
            // a placeholder that survived substitution means the variable is unset
            if auth.password.starts_with("${") {
                return Err(DashError::MissingConfigError {
                    field: format!("auth.password ({})", auth.password),
                });
            }
        }
        Ok(())
    }
}
