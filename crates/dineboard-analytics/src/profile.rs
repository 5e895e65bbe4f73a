//! Analytics Profiles
//!
//! Tunables for aggregation and reporting, loadable from YAML.

use dineboard_core::{DineboardError, Zone};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Analytics profile defining limits and fallback buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsProfile {
    /// Profile name (e.g., "standard@1.0")
    pub name: String,

    /// Length of the top-selling dishes list
    pub top_dishes_limit: usize,

    /// Bucket for line items without a category, and for dishes missing
    /// from the menu catalog
    pub fallback_category: String,

    /// Category reported for catalog entries that have none
    pub catalog_fallback_category: String,

    /// Fixed UTC offset in minutes; host local time when absent
    pub utc_offset_minutes: Option<i32>,

    /// Memoized results kept by a dashboard; 0 (the default) disables caching
    pub cache_capacity: usize,
}

impl AnalyticsProfile {
    /// Standard dashboard: top 10 dishes
    pub fn standard() -> Self {
        Self {
            name: "standard@1.0".to_string(),
            top_dishes_limit: 10,
            fallback_category: "Other".to_string(),
            catalog_fallback_category: "Uncategorized".to_string(),
            utc_offset_minutes: None,
            cache_capacity: 0,
        }
    }

    /// Extended report for back-office exports: longer dish ranking
    pub fn extended() -> Self {
        Self {
            name: "extended@1.0".to_string(),
            top_dishes_limit: 25,
            ..Self::standard()
        }
    }

    /// Get profile by name; unknown names fall back to standard
    pub fn for_name(name: &str) -> Self {
        match name {
            "extended" => Self::extended(),
            _ => Self::standard(),
        }
    }

    /// Load profile from YAML. Missing keys take the standard values.
    pub fn from_yaml(yaml: &str) -> Result<Self, DineboardError> {
        serde_yaml::from_str(yaml).map_err(|e| DineboardError::ConfigError(e.to_string()))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, DineboardError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Zone used for local-time computations
    pub fn zone(&self) -> Result<Zone, DineboardError> {
        match self.utc_offset_minutes {
            Some(minutes) => Zone::from_offset_minutes(minutes),
            None => Ok(Zone::Local),
        }
    }
}

impl Default for AnalyticsProfile {
    fn default() -> Self {
        Self::standard()
    }
}
