use serde::{Deserialize, Serialize};

fn default_result_limit() -> usize {
    30
}

fn default_suggestion_limit() -> usize {
    5
}

fn default_tick_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Max results returned by the quick (ranked) search
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    /// Upper bound for one search tier, timeout skips to the next tier
    #[serde(default = "default_tick_timeout_ms")]
    pub tick_timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
            suggestion_limit: default_suggestion_limit(),
            tick_timeout_ms: default_tick_timeout_ms(),
        }
    }
}
