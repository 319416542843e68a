// ═══════════════════════════════════════════════════════════════════════
// Search configuration — depths, time budget, evaluation weights
// ═══════════════════════════════════════════════════════════════════════

use hotk_engine::House;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Evaluation weights. `houses` is indexed in house-priority order
/// (Stark first, Tully last).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub companion_pending: i32,
    pub banner: i32,
    pub mobility: i32,
    pub houses: [i32; 7],
}

impl Weights {
    /// Flat weights of the basic agent.
    pub fn basic() -> Self {
        Weights {
            companion_pending: 100,
            banner: 100,
            mobility: 1,
            houses: [100; 7],
        }
    }

    /// Weights found by offline tuning.
    pub fn tuned() -> Self {
        Weights {
            companion_pending: 240,
            banner: 240,
            mobility: 10,
            houses: [297, 165, 282, 172, 316, 127, 356],
        }
    }

    pub fn house(&self, house: House) -> i32 {
        self.houses[house.index()]
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::tuned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched for a normal move.
    pub normal_depth: u32,
    /// Plies searched when choosing a companion effect.
    pub companion_depth: u32,
    /// Wall-clock budget from search start, in milliseconds.
    pub time_budget_ms: u64,
    pub weights: Weights,
}

impl SearchConfig {
    pub fn shallow() -> Self {
        SearchConfig {
            normal_depth: 2,
            companion_depth: 2,
            time_budget_ms: 9_900,
            weights: Weights::basic(),
        }
    }

    pub fn deep() -> Self {
        SearchConfig {
            normal_depth: 7,
            companion_depth: 4,
            time_budget_ms: 9_900,
            weights: Weights::tuned(),
        }
    }

    /// Missing fields fall back to the deep preset.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::deep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = SearchConfig::from_json(r#"{"normal_depth": 3, "weights": {"mobility": 4}}"#).unwrap();
        assert_eq!(cfg.normal_depth, 3);
        assert_eq!(cfg.companion_depth, 4);
        assert_eq!(cfg.time_budget_ms, 9_900);
        assert_eq!(cfg.weights.mobility, 4);
        assert_eq!(cfg.weights.banner, 240);
        assert_eq!(cfg.weights.house(House::Tully), 356);
    }

    #[test]
    fn presets_differ_in_depth() {
        assert!(SearchConfig::shallow().normal_depth < SearchConfig::deep().normal_depth);
        assert_eq!(SearchConfig::default(), SearchConfig::deep());
    }
}
