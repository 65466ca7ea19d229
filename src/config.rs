use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::GraphAttributes;
use crate::trace::TraceOptions;

/// Rendering settings read from a JSON document. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub graph: GraphAttributes,
    pub trace: TraceOptions,
}

impl Config {
    pub fn from_json(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects limits that would make every trace fail or every rank empty.
    pub fn validate(&self) -> Result<()> {
        if self.trace.max_depth == 0 {
            return Err(Error::InvalidConfig(
                "trace.max_depth must be greater than zero".to_string(),
            ));
        }
        if self.trace.list_rank_group == Some(0) {
            return Err(Error::InvalidConfig(
                "trace.list_rank_group must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }
}
