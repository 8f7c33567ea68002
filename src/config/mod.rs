use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::{
        services::AlertPolicy,
        utils::{ensure_dir, PathResolver},
    },
    domain::BudgetPercentages,
    errors::LedgerError,
    storage::memory::DEFAULT_STORAGE_KEY,
};

const TMP_SUFFIX: &str = "tmp";

/// Host-level preferences for the budget engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub default_percentages: BudgetPercentages,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_snapshot_name")]
    pub snapshot_name: String,
    #[serde(default)]
    pub alert_policy: AlertPolicy,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_percentages: BudgetPercentages::default(),
            data_dir: None,
            snapshot_name: Self::default_snapshot_name(),
            alert_policy: AlertPolicy::default(),
            currency_symbol: Self::default_currency_symbol(),
        }
    }
}

impl Config {
    pub fn default_snapshot_name() -> String {
        DEFAULT_STORAGE_KEY.into()
    }

    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    /// Directory snapshots are written to.
    pub fn resolve_data_dir(&self) -> PathBuf {
        PathResolver::resolve_base(self.data_dir.clone())
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        self.default_percentages.validate()?;
        if self.snapshot_name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "snapshot name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Loads and saves [`Config`] as JSON.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Returns defaults when no file exists yet.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
