use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// How the pairwise correlation loop is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parallelism {
    /// Parallel once the retained ticker count reaches the threshold.
    #[default]
    Auto,
    Sequential,
    Parallel,
}

impl Parallelism {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }
}

impl Display for Parallelism {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Parallelism {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            other => Err(ValidationError::InvalidParallelism {
                value: other.to_owned(),
            }),
        }
    }
}

/// Correlation engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub parallelism: Parallelism,
    /// Retained ticker count from which [`Parallelism::Auto`] fans out.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallelism: Parallelism::Auto,
            parallel_threshold: 32,
        }
    }
}

impl EngineConfig {
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_parallel_threshold(
        mut self,
        parallel_threshold: usize,
    ) -> Result<Self, ValidationError> {
        if parallel_threshold < 2 {
            return Err(ValidationError::InvalidParallelThreshold);
        }
        self.parallel_threshold = parallel_threshold;
        Ok(self)
    }

    pub fn runs_parallel(&self, ticker_count: usize) -> bool {
        match self.parallelism {
            Parallelism::Sequential => false,
            Parallelism::Parallel => true,
            Parallelism::Auto => ticker_count >= self.parallel_threshold,
        }
    }
}
