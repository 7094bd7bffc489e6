//! Session summary report.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::drill::DrillMode;
use crate::statistics::SessionStats;

/// Summary of one practice session, written at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub id: Uuid,
    pub mode: DrillMode,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub pool_size: usize,
    pub score: u32,
    pub total_answered: u32,
    pub accuracy_percent: u32,
    /// Whether every item in the pool was presented.
    pub completed: bool,
}

impl SessionReport {
    pub fn new(
        mode: DrillMode,
        started_at: DateTime<Utc>,
        stats: &SessionStats,
        completed: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            started_at,
            finished_at: Utc::now(),
            pool_size: stats.pool_size,
            score: stats.score,
            total_answered: stats.total_answered,
            accuracy_percent: stats.accuracy_percent(),
            completed,
        }
    }

    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Load a report from JSON.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse report: {}", path.display()))
    }
}
