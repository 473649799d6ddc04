//! View configuration: layout geometry and fit-view timing.

use crate::error::{Error, Result};
use crate::fit::{FitScheduler, FitViewRequest};
use canopy_layout::RankDir;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    pub direction: RankDir,
    pub node_width: f64,
    pub node_height: f64,
    pub node_sep: f64,
    pub rank_sep: f64,
    pub fit_padding: f64,
    pub fit_duration_ms: u64,
    pub fit_delay_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            direction: RankDir::LR,
            node_width: 160.0,
            node_height: 80.0,
            node_sep: 100.0,
            rank_sep: 80.0,
            fit_padding: 0.2,
            fit_duration_ms: 800,
            fit_delay_ms: 300,
        }
    }
}

impl ViewConfig {
    /// Parses a (possibly partial) JSON object merged over the defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(config_error)?;
        let mut config = Self::default();
        config.merge_value(&value)?;
        Ok(config)
    }

    /// Merges `overrides` into this config. Keys not present keep their value.
    pub fn merge_value(&mut self, overrides: &Value) -> Result<()> {
        let Value::Object(_) = overrides else {
            return Err(Error::Config {
                message: "expected a JSON object".to_string(),
            });
        };
        let mut merged = serde_json::to_value(&*self).map_err(config_error)?;
        deep_merge_value(&mut merged, overrides);

        // Direction names are matched case-insensitively.
        if let Some(Value::String(name)) = merged.get("direction") {
            let dir: RankDir = name.parse()?;
            merged["direction"] = Value::String(dir.as_str().to_string());
        }

        let next: Self = serde_json::from_value(merged).map_err(config_error)?;
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let sizes = [
            ("nodeWidth", self.node_width),
            ("nodeHeight", self.node_height),
            ("nodeSep", self.node_sep),
            ("rankSep", self.rank_sep),
            ("fitPadding", self.fit_padding),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config {
                    message: format!("`{name}` must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }

    pub fn fit_request(&self) -> FitViewRequest {
        FitViewRequest {
            padding: self.fit_padding,
            duration: Duration::from_millis(self.fit_duration_ms),
        }
    }

    pub fn fit_scheduler(&self) -> FitScheduler {
        FitScheduler::new(Duration::from_millis(self.fit_delay_ms), self.fit_request())
    }
}

fn config_error(e: serde_json::Error) -> Error {
    Error::Config {
        message: e.to_string(),
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
