//! Ranks candidate resumes against a job description.
//!
//! Each resume gets a skills score (keyword and fuzzy matches against a
//! configured vocabulary), a semantic similarity score, and an experience
//! score (estimated years over the years the job asks for). The weighted sum
//! orders the candidates, and optional thresholds split them into qualified
//! and disqualified.

pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod experience;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod qualify;
pub mod report;
pub mod scoring;
pub mod scraper;
pub mod similarity;
pub mod skills;
pub mod tfidf;
pub mod timeline;
pub mod utils;

pub use config::{Config, Weights};
pub use error::{RankError, Result};
pub use experience::{estimate_years, target_years};
pub use pipeline::{rank, rank_texts, JdSource, RankedRow};
pub use qualify::Qualification;
pub use scoring::{ScoreBreakdown, Scorer};
pub use similarity::{Similarity, TfIdfSimilarity};
pub use timeline::{MergedTimeline, TimeInterval};
