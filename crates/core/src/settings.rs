use serde::{Deserialize, Serialize};

/// Tunables for recurring session generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Maximum number of items kept in each duplicates/conflicts sample
    pub sample_limit: usize,

    /// Longest inclusive date range a single request may cover
    pub max_range_days: i64,
}

impl GeneratorSettings {
    pub const DEFAULT_SAMPLE_LIMIT: usize = 5;
    pub const DEFAULT_MAX_RANGE_DAYS: i64 = 366;
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            sample_limit: Self::DEFAULT_SAMPLE_LIMIT,
            max_range_days: Self::DEFAULT_MAX_RANGE_DAYS,
        }
    }
}
