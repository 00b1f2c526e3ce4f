use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::{
    model::{FilterCriteria, Model, ViewScope},
    storage::StorageError,
    utils::paths::{app_data_dir, config_file_in, ensure_dir},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_expense_sort: String,
    pub default_payment_sort: String,
    pub default_view_scope: String,
    pub default_view_offset: u32,
    pub currency_symbol: String,
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_expense_sort: "time".into(),
            default_payment_sort: "time".into(),
            default_view_scope: "all".into(),
            default_view_offset: 0,
            currency_symbol: "$".into(),
            plain_output: false,
        }
    }
}

impl Config {
    /// Applies the configured list defaults. Unknown criteria are logged and skipped.
    pub fn apply_to(&self, model: &mut Model) {
        if let Err(err) = model.set_expense_sort(&self.default_expense_sort) {
            warn!(%err, "ignoring default_expense_sort from config");
        }
        if let Err(err) = model.set_payment_sort(&self.default_payment_sort) {
            warn!(%err, "ignoring default_payment_sort from config");
        }
        match ViewScope::parse(&self.default_view_scope, self.default_view_offset) {
            Ok(scope) => model.set_expense_view(scope),
            Err(err) => warn!(%err, "ignoring default_view_scope from config"),
        }
        model.set_expense_filter(FilterCriteria::All);
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StorageError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, StorageError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, StorageError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config = serde_json::from_str(&data)?;
            info!(path = %self.path.display(), "configuration loaded");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Directory holding the config file and the data files next to it.
    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
