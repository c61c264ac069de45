//! Anomaly statistics tracking.
//!
//! Counts the per-record anomalies absorbed during a run. The pipeline is
//! single-threaded, so plain counters are enough; every `AnomalyType` starts
//! at zero.

use std::collections::HashMap;

use serde::Serialize;
use strum::IntoEnumIterator;

use super::types::AnomalyType;

/// Per-run anomaly counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyStats {
    counts: HashMap<AnomalyType, usize>,
}

impl AnomalyStats {
    pub fn new() -> Self {
        let counts = AnomalyType::iter().map(|a| (a, 0)).collect();
        AnomalyStats { counts }
    }

    pub fn increment(&mut self, anomaly: AnomalyType) {
        *self.counts.entry(anomaly).or_insert(0) += 1;
    }

    pub fn get(&self, anomaly: AnomalyType) -> usize {
        self.counts.get(&anomaly).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl Default for AnomalyStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for AnomalyStats {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        // Declaration order keeps the report stable between runs
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for anomaly in AnomalyType::iter() {
            map.serialize_entry(anomaly.key(), &self.get(anomaly))?;
        }
        map.end()
    }
}
