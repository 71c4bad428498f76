use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{RankError, Result};
use crate::extract::{extract_text, load_resumes};
use crate::scoring::{ScoreBreakdown, Scorer};
use crate::scraper::scrape_job_url;
use crate::similarity::Similarity;
use crate::utils::round2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JdSource {
    Path(PathBuf),
    Url(String),
}

impl JdSource {
    /// `http://` and `https://` arguments are URLs, anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            JdSource::Url(raw.trim().to_string())
        } else {
            JdSource::Path(PathBuf::from(raw))
        }
    }

    pub fn load(&self) -> Result<String> {
        match self {
            JdSource::Path(path) => {
                if !path.is_file() {
                    return Err(RankError::MissingJobDescription(path.clone()));
                }
                extract_text(path)
            }
            JdSource::Url(url) => scrape_job_url(url),
        }
    }
}

impl fmt::Display for JdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JdSource::Path(path) => write!(f, "{}", path.display()),
            JdSource::Url(url) => f.write_str(url),
        }
    }
}

/// One output row; field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    pub candidate: String,
    pub skills: f64,
    pub sim: f64,
    pub exp_score: f64,
    pub exp_years: f64,
    pub exp_target: f64,
    pub total: f64,
}

impl RankedRow {
    pub fn new(candidate: impl Into<String>, sb: &ScoreBreakdown) -> Self {
        Self {
            candidate: candidate.into(),
            skills: sb.skills,
            sim: sb.sim,
            exp_score: sb.exp_score,
            exp_years: round2(sb.exp_years),
            exp_target: sb.exp_target,
            total: sb.total,
        }
    }
}

// Every input is read before any scoring starts.
pub fn rank(
    jd: &JdSource,
    resumes_dir: &Path,
    top_k: usize,
    config: &Config,
    similarity: &dyn Similarity,
) -> Result<Vec<RankedRow>> {
    if top_k == 0 {
        return Err(RankError::InvalidTopK);
    }
    config.validate()?;

    let jd_text = jd.load()?;
    let resumes = load_resumes(resumes_dir)?;
    info!(jd = %jd, candidates = resumes.len(), "loaded inputs");

    let candidates: Vec<(String, String)> =
        resumes.into_iter().map(|r| (r.name, r.text)).collect();
    let scorer = Scorer::new(config, similarity);
    rank_texts(&scorer, &jd_text, &candidates, top_k)
}

/// Scores `(name, text)` candidates against `jd_text` and returns the
/// `top_k` best, highest `total` first. Ties keep their input order.
pub fn rank_texts(
    scorer: &Scorer<'_>,
    jd_text: &str,
    candidates: &[(String, String)],
    top_k: usize,
) -> Result<Vec<RankedRow>> {
    if top_k == 0 {
        return Err(RankError::InvalidTopK);
    }

    let mut rows = candidates
        .iter()
        .map(|(name, text)| {
            let sb = scorer.score_candidate(text, jd_text)?;
            debug!(candidate = %name, total = sb.total, "candidate scored");
            Ok(RankedRow::new(name.as_str(), &sb))
        })
        .collect::<Result<Vec<_>>>()?;

    rows.sort_by(|a, b| b.total.total_cmp(&a.total));
    rows.truncate(top_k);
    Ok(rows)
}
