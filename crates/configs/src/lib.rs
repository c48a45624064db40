use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub sanitizer: SanitizerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub path: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: "data/preferences.json".into(), data_dir: "data".into() }
    }
}

/// Policy selection for the startup sanitizer.
/// `forced` preserves the clear-on-every-launch behavior; the threshold and
/// load-failure variants only wipe when something is actually wrong.
#[derive(Debug, Clone, Deserialize)]
pub struct SanitizerConfig {
    #[serde(default = "default_policy")]
    pub policy: String,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            max_entries: default_max_entries(),
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_data_dir() -> String { "data".into() }
fn default_policy() -> String { "forced".into() }
fn default_max_entries() -> usize { 10_000 }
fn default_max_bytes() -> u64 { 1024 * 1024 }

pub const POLICY_FORCED: &str = "forced";
pub const POLICY_SIZE_THRESHOLD: &str = "size-threshold";
pub const POLICY_LOAD_FAILURE: &str = "load-failure";

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.store.normalize_from_env();
        self.store.validate()?;
        self.sanitizer.validate()?;
        Ok(())
    }
}

impl StoreConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML wins; fall back to STORE_PATH when the field is left empty
        if self.path.trim().is_empty() {
            if let Ok(path) = std::env::var("STORE_PATH") {
                self.path = path;
            }
        }
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(anyhow!(
                "store.path is empty; set it in config.toml or via STORE_PATH"
            ));
        }
        Ok(())
    }
}

impl SanitizerConfig {
    pub fn validate(&self) -> Result<()> {
        match self.policy.as_str() {
            POLICY_FORCED | POLICY_SIZE_THRESHOLD | POLICY_LOAD_FAILURE => {}
            other => {
                return Err(anyhow!(
                    "sanitizer.policy must be one of forced|size-threshold|load-failure, got {other}"
                ));
            }
        }
        if self.policy == POLICY_SIZE_THRESHOLD && (self.max_entries == 0 || self.max_bytes == 0) {
            return Err(anyhow!("sanitizer thresholds must be positive"));
        }
        Ok(())
    }
}
