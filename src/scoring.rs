use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::experience::{estimate_years_at, target_years};
use crate::similarity::Similarity;
use crate::skills::score_skills;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub sim: f64,
    /// `min(exp_years / exp_target, 1)`, the value used in `total`.
    pub exp_score: f64,
    pub exp_years: f64,
    pub exp_target: f64,
    pub total: f64,
}

pub struct Scorer<'a> {
    config: &'a Config,
    similarity: &'a dyn Similarity,
    today: NaiveDate,
}

impl<'a> Scorer<'a> {
    pub fn new(config: &'a Config, similarity: &'a dyn Similarity) -> Self {
        Self {
            config,
            similarity,
            today: Local::now().date_naive(),
        }
    }

    /// Pins the date that "present" resolves to.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn score_candidate(&self, resume_text: &str, jd_text: &str) -> Result<ScoreBreakdown> {
        let config = self.config;
        let skills = score_skills(resume_text, &config.skills);
        let sim = self.similarity.similarity(resume_text, jd_text)?;
        let estimate = estimate_years_at(resume_text, self.today);
        let exp_years = estimate.years;

        let mut exp_target = target_years(jd_text, config.default_exp_target_years);
        if exp_target <= 0.0 {
            exp_target = config.default_exp_target_years;
        }
        let exp_score = if exp_target > 0.0 {
            (exp_years / exp_target).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let w = &config.weights;
        let total = w.w_skills * skills + w.w_sim * sim + w.w_exp * exp_score;

        debug!(
            skills,
            sim,
            exp_years,
            exp_target,
            strategy = ?estimate.strategy,
            total,
            "scored candidate"
        );

        Ok(ScoreBreakdown {
            skills,
            sim,
            exp_score,
            exp_years,
            exp_target,
            total,
        })
    }
}
