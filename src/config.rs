//! Runtime configuration, loaded from YAML

use std::collections::HashMap;
use std::path::Path;
use serde::Deserialize;
use crate::aggregate::GrowthBaseline;
use crate::error::ParseError;

/// Top-level configuration; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Baseline used by the performance series
    pub growth_baseline: GrowthBaseline,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Global level filter (e.g. `"info"`, `"debug"`)
    pub level: String,
    /// Per-module overrides, e.g. `{ "blogmetrics::filter": "debug" }`
    pub modules: HashMap<String, String>,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            modules: HashMap::new(),
            format: LogFormat::Plain,
        }
    }
}

impl LoggingConfig {
    /// `EnvFilter` directives: the global level followed by module overrides
    pub fn directives(&self) -> String {
        let mut modules: Vec<_> = self.modules.iter().collect();
        modules.sort();
        let mut directives = self.level.clone();
        for (module, level) in modules {
            directives.push(',');
            directives.push_str(module);
            directives.push('=');
            directives.push_str(level);
        }
        directives
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl AnalyticsConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path_str = path.as_ref().display().to_string();
        let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
            path: path_str,
            source: e,
        })?;
        Self::from_yaml(&contents)
    }

    /// An empty document yields the defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}
