//! Census configuration, loaded from the environment.
//!
//! | Variable          | Meaning                                   | Default          |
//! |-------------------|-------------------------------------------|------------------|
//! | `AMG_CHROMOSOMES` | number of chromosomes                     | `2`              |
//! | `AMG_DSBS`        | comma-separated DSB count per chromosome  | `1` per chromosome |
//! | `AMG_MODE`        | `summary`, `report` or `atlas`            | `summary`        |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::generator::AmgGenerator;
use crate::types::AmgError;

/// Default number of chromosomes.
pub const DEFAULT_CHROMOSOMES: usize = 2;

/// Error type for census configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Environment variable name.
        var: &'static str,
        /// Raw value found.
        value: String,
    },
    /// DSB counts do not cover every chromosome.
    #[error("{num_chromosomes} chromosomes but {num_counts} DSB counts")]
    Mismatch {
        /// Configured chromosome count.
        num_chromosomes: usize,
        /// Number of DSB counts given.
        num_counts: usize,
    },
}

/// What the census produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CensusMode {
    /// Totals by cycle structure and diameter.
    #[default]
    Summary,
    /// One JSON line per AMG.
    Report,
    /// Transformation graph over the family.
    Atlas,
}

impl FromStr for CensusMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "report" => Ok(Self::Report),
            "atlas" => Ok(Self::Atlas),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CensusMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Summary => "summary",
            Self::Report => "report",
            Self::Atlas => "atlas",
        };
        write!(f, "{}", s)
    }
}

/// Layout and output mode of one census run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusConfig {
    /// Number of chromosomes.
    pub num_chromosomes: usize,
    /// DSB count per chromosome.
    pub num_dsbs: Vec<usize>,
    /// Output mode.
    pub mode: CensusMode,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            num_chromosomes: DEFAULT_CHROMOSOMES,
            num_dsbs: vec![1; DEFAULT_CHROMOSOMES],
            mode: CensusMode::default(),
        }
    }
}

impl CensusConfig {
    /// Load from `AMG_CHROMOSOMES`, `AMG_DSBS` and `AMG_MODE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from any variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let num_chromosomes = match lookup("AMG_CHROMOSOMES") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "AMG_CHROMOSOMES",
                value: raw.clone(),
            })?,
            None => DEFAULT_CHROMOSOMES,
        };

        let num_dsbs = match lookup("AMG_DSBS") {
            Some(raw) => raw
                .split(',')
                .map(|n| n.trim().parse::<usize>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "AMG_DSBS",
                    value: raw.clone(),
                })?,
            None => vec![1; num_chromosomes],
        };

        let mode = match lookup("AMG_MODE") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: "AMG_MODE",
                value: raw.clone(),
            })?,
            None => CensusMode::default(),
        };

        let config = Self {
            num_chromosomes,
            num_dsbs,
            mode,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every chromosome has a DSB count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_dsbs.len() != self.num_chromosomes {
            return Err(ConfigError::Mismatch {
                num_chromosomes: self.num_chromosomes,
                num_counts: self.num_dsbs.len(),
            });
        }
        Ok(())
    }

    /// Generator over the default labels for this layout.
    pub fn generator(&self) -> Result<AmgGenerator<usize>, AmgError> {
        AmgGenerator::new(self.num_chromosomes, self.num_dsbs.clone())
    }
}
