use crate::{
    driver::TickDriver,
    error::{SimError, SimResult},
    history::{History, HistoryMode},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Run configuration. Loaded from a JSON file by the runner;
/// tests use `SimConfig::default_test()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Length of one logical tick in wall-clock milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Catch-up cap per frame. Required: there is no unbounded mode.
    pub max_ticks_per_frame: u32,
    #[serde(default)]
    pub history: HistoryMode,
}

fn default_tick_interval_ms() -> u64 { 16 }

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:    default_tick_interval_ms(),
            max_ticks_per_frame: 5,
            history:             HistoryMode::Unbounded,
        }
    }
}

impl SimConfig {
    /// Load from a JSON file and validate.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Small ring, tight cap — keeps test histories short.
    pub fn default_test() -> Self {
        Self {
            tick_interval_ms:    16,
            max_ticks_per_frame: 3,
            history:             HistoryMode::Bounded { capacity: 64 },
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(SimError::InvalidConfig("tick_interval_ms must be > 0".into()));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(SimError::InvalidConfig("max_ticks_per_frame must be > 0".into()));
        }
        if let HistoryMode::Bounded { capacity: 0 } = self.history {
            return Err(SimError::InvalidConfig("bounded history capacity must be > 0".into()));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn driver(&self) -> TickDriver {
        TickDriver::new(self.tick_interval(), self.max_ticks_per_frame)
    }

    pub fn history(&self) -> History {
        History::new(self.history)
    }
}
