use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Logical name shared by every artifact in a session unless the caller picks another.
pub const DEFAULT_LOGICAL_NAME: &str = "downloaded_images";

/// User-Agent sent with every image GET.
pub const DEFAULT_USER_AGENT: &str = "artvault-imagetool/1.0";

/// Caller-side retry parameters (optional `[retry]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per URL (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::try_from_secs_f64(self.base_delay_secs)
                .unwrap_or(Duration::ZERO),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/artvault/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Whole-request timeout for a single image GET, in seconds.
    pub request_timeout_secs: u64,
    /// TCP/TLS connect timeout, in seconds.
    pub connect_timeout_secs: u64,
    /// Maximum redirects followed per GET.
    pub max_redirections: u32,
    /// Identifying `User-Agent` header value.
    pub user_agent: String,
    /// Logical name (version lineage) used when the caller does not supply one.
    pub logical_name: String,
    /// Directory where artifact bytes are written; `None` keeps them in memory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Optional retry policy for callers that re-issue failed URLs.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 15,
            max_redirections: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            logical_name: DEFAULT_LOGICAL_NAME.to_string(),
            output_dir: None,
            retry: None,
        }
    }
}

impl VaultConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Retry policy from `[retry]`, or built-in defaults when the section is absent.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("artvault")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VaultConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VaultConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: VaultConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
