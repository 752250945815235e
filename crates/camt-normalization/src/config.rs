//! Normalization settings, loaded from TOML.
//!
//! ```toml
//! [datetime]
//! local = "local"
//! naive = "+01:00"
//!
//! [code_sets]
//! path = "ExternalCodeSets.json"
//! ```

use std::path::{Path, PathBuf};

use camt_model::TemporalConfig;
use camt_standards::{CodeSetSource, default_source};
use serde::{Deserialize, Serialize};

use crate::error::{NormalizationError, Result};

// =============================================================================
// ROOT SETTINGS
// =============================================================================

/// Normalization settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Zones used to resolve date and time values.
    pub datetime: TemporalConfig,

    /// External code-set document.
    pub code_sets: CodeSetSettings,
}

impl NormalizationConfig {
    /// Load settings from a TOML file.
    ///
    /// Missing sections take their defaults; a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| NormalizationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| NormalizationError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            local = %config.datetime.local,
            naive = %config.datetime.naive,
            "loaded normalization config"
        );
        Ok(config)
    }

    /// Code-set source for these settings; `CAMT_CODE_SETS` takes precedence.
    pub fn code_set_source(&self) -> Box<dyn CodeSetSource> {
        default_source(self.code_sets.path.clone())
    }
}

// =============================================================================
// CODE SETS
// =============================================================================

/// External code-set settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeSetSettings {
    /// Document to load instead of the embedded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
