//! Count results

use serde::{Deserialize, Serialize};

/// Result of a successful count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    /// Number of matching documents
    pub count: u64,
    /// Per-shard outcome, when the cluster reports it
    #[serde(rename = "_shards", default)]
    pub shards: ShardStats,
}

impl CountResponse {
    /// Response with `count` and no shard information.
    pub fn new(count: u64) -> Self {
        Self {
            count,
            shards: ShardStats::default(),
        }
    }

    /// Whether some shards failed to answer, making the count partial.
    pub fn is_partial(&self) -> bool {
        self.shards.failed > 0
    }
}

/// How many shards took part in the count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShardStats {
    /// Shards queried
    pub total: u32,
    /// Shards that answered
    pub successful: u32,
    /// Shards that failed
    pub failed: u32,
}
