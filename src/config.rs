//! Ranking configuration.
//!
//! JSON shape (every field optional):
//! {
//!   "skills": ["python", "sql"],
//!   "weights": { "w_skills": 0.5, "w_sim": 0.4, "w_exp": 0.1 },
//!   "default_exp_target_years": 3.0,
//!   "qualification": { "min_total": 0.5, "min_skills": 0.3, "min_sim": 0.3 }
//! }
//!
//! `qualification` is off when absent.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RankError, Result};
use crate::qualify::Qualification;

/// Per-component weights. They do not need to sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub w_skills: f64,
    pub w_sim: f64,
    pub w_exp: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            w_skills: 0.5,
            w_sim: 0.4,
            w_exp: 0.1,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.w_skills + self.w_sim + self.w_exp
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub skills: Vec<String>,
    pub weights: Weights,
    pub default_exp_target_years: f64,
    pub qualification: Option<Qualification>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skills: [
                "python",
                "sql",
                "pandas",
                "numpy",
                "scikit-learn",
                "streamlit",
                "etl",
                "mlops",
                "dashboarding",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            weights: Weights::default(),
            default_exp_target_years: 3.0,
            qualification: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| RankError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("w_skills", self.weights.w_skills),
            ("w_sim", self.weights.w_sim),
            ("w_exp", self.weights.w_exp),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(RankError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.default_exp_target_years.is_finite() || self.default_exp_target_years <= 0.0 {
            return Err(RankError::InvalidConfig(format!(
                "default_exp_target_years must be positive, got {}",
                self.default_exp_target_years
            )));
        }
        if let Some(qualification) = &self.qualification {
            qualification.validate()?;
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-6 {
            warn!(sum, "weights do not sum to 1; totals may fall outside [0, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_stock_profile() {
        let config = Config::default();
        assert_eq!(config.skills.len(), 9);
        assert_eq!(config.skills[0], "python");
        assert!((config.weights.sum() - 1.0).abs() < 1e-9);
        assert_eq!(config.default_exp_target_years, 3.0);
        config.validate().unwrap();
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"skills": ["rust"], "weights": {{"w_exp": 0.7}}}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.skills, vec!["rust".to_string()]);
        assert_eq!(config.weights.w_skills, 0.5);
        assert_eq!(config.weights.w_exp, 0.7);
        assert_eq!(config.default_exp_target_years, 3.0);
        assert_eq!(config.qualification, None);
    }

    #[test]
    fn qualification_section_is_loaded_and_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"qualification": {{"min_skills": 0.3}}}}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(
            config.qualification,
            Some(Qualification {
                min_total: 0.5,
                min_skills: Some(0.3),
                min_sim: None,
            })
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"qualification": {{"min_total": 2.0}}}}"#).unwrap();
        assert!(matches!(Config::load(file.path()), Err(RankError::InvalidConfig(_))));
    }

    #[test]
    fn unnormalised_weights_are_allowed() {
        let config = Config {
            weights: Weights {
                w_skills: 1.0,
                w_sim: 1.0,
                w_exp: 1.0,
            },
            ..Config::default()
        };
        assert_eq!(config.weights.sum(), 3.0);
        config.validate().unwrap();
    }

    #[test]
    fn rejects_negative_weights_and_targets() {
        let mut config = Config::default();
        config.weights.w_sim = -0.1;
        assert!(matches!(config.validate(), Err(RankError::InvalidConfig(_))));

        let mut config = Config::default();
        config.default_exp_target_years = 0.0;
        assert!(matches!(config.validate(), Err(RankError::InvalidConfig(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, RankError::Read { .. }));
    }
}
