use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};
use crate::pipeline::RankedRow;

/// Pass/fail thresholds over a ranking. Scores are clipped to `[0, 1]`
/// before comparing, and a candidate qualifies when every set threshold is
/// met (`>=`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Qualification {
    pub min_total: f64,
    pub min_skills: Option<f64>,
    pub min_sim: Option<f64>,
}

impl Default for Qualification {
    fn default() -> Self {
        Self {
            min_total: 0.5,
            min_skills: None,
            min_sim: None,
        }
    }
}

impl Qualification {
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("min_total", Some(self.min_total)),
            ("min_skills", self.min_skills),
            ("min_sim", self.min_sim),
        ];
        for (name, value) in thresholds {
            let Some(value) = value else { continue };
            if !(0.0..=1.0).contains(&value) {
                return Err(RankError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn is_qualified(&self, row: &RankedRow) -> bool {
        let row = clip(row);
        row.total >= self.min_total
            && self.min_skills.map_or(true, |min| row.skills >= min)
            && self.min_sim.map_or(true, |min| row.sim >= min)
    }

    pub fn split(&self, rows: &[RankedRow]) -> (Vec<RankedRow>, Vec<RankedRow>) {
        rows.iter()
            .map(clip)
            .partition(|row| self.is_qualified(row))
    }
}

pub fn clip(row: &RankedRow) -> RankedRow {
    RankedRow {
        skills: row.skills.clamp(0.0, 1.0),
        sim: row.sim.clamp(0.0, 1.0),
        exp_score: row.exp_score.clamp(0.0, 1.0),
        total: row.total.clamp(0.0, 1.0),
        ..row.clone()
    }
}
