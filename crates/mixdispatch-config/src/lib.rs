//! Configuration system for MixDispatch.
//!
//! Load solver configuration from TOML or YAML to control termination,
//! variable selection, and objective weights without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use mixdispatch_config::{SolverConfig, VariableSelection};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     [termination]
//!     seconds_spent_limit = 30
//!     node_count_limit = 100000
//!
//!     [search]
//!     variable_selection = "smallest_domain"
//!
//!     [weights]
//!     lag = 5
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.search.variable_selection, VariableSelection::SmallestDomain);
//! assert_eq!(config.weights.unwrap().lag, 5);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use mixdispatch_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use mixdispatch_core::CostWeights;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Branching policy.
    #[serde(default)]
    pub search: SearchConfig,

    /// Objective weights replacing the instance's own.
    #[serde(default)]
    pub weights: Option<CostWeights>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects weights that would make the objective unbounded below.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(w) = &self.weights {
            let all = [w.lateness, w.waste, w.off_preferred, w.lag, w.travel];
            if all.iter().any(|&x| x < 0) {
                return Err(ConfigError::Invalid(format!(
                    "cost weights must be non-negative, got {w:?}"
                )));
            }
        }
        Ok(())
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the explored node limit.
    pub fn with_node_count_limit(mut self, nodes: u64) -> Self {
        self.termination = Some(TerminationConfig {
            node_count_limit: Some(nodes),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Stops after this many improving solutions.
    pub fn with_solution_count_limit(mut self, solutions: u64) -> Self {
        self.termination = Some(TerminationConfig {
            solution_count_limit: Some(solutions),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    pub fn with_variable_selection(mut self, selection: VariableSelection) -> Self {
        self.search.variable_selection = selection;
        self
    }

    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mixdispatch_config::SolverConfig;
    /// use std::time::Duration;
    ///
    /// let config = SolverConfig::from_toml_str(r#"
    ///     [termination]
    ///     milliseconds_spent_limit = 250
    /// "#).unwrap();
    ///
    /// assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    pub fn node_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.node_count_limit)
    }

    pub fn solution_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.solution_count_limit)
    }
}

/// Termination configuration.
///
/// Every limit is optional. When none is set the search runs until the
/// tree is exhausted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the seconds limit.
    pub milliseconds_spent_limit: Option<u64>,

    /// Maximum number of search nodes to explore.
    pub node_count_limit: Option<u64>,

    /// Stop after this many improving solutions.
    pub solution_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.seconds_spent_limit.unwrap_or(0) * 1000
            + self.milliseconds_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

/// Search policy configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    #[serde(default)]
    pub variable_selection: VariableSelection,
}

/// How the next decision variable is chosen within a branching group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableSelection {
    /// Largest gap between the two smallest remaining values.
    #[default]
    MaxRegret,

    /// First unfixed variable in declaration order.
    InputOrder,

    /// Fewest remaining values.
    SmallestDomain,
}
