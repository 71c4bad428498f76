use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::dates::find_intervals_at;
use crate::normalize::normalize;
use crate::timeline::MergedTimeline;
use crate::utils::round2;

pub const MAX_EXPERIENCE_YEARS: f64 = 40.0;
pub const MIN_TARGET_YEARS: f64 = 0.5;
pub const MAX_TARGET_YEARS: f64 = 20.0;
const EARLIEST_YEAR: i32 = 1980;

// "6+ years of experience", "3 yrs experience", "2.5 years experience"
static EXPLICIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*\+?\s*(?:years?|yrs?)\s+(?:of\s+)?experience")
        .unwrap()
});

static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Explicit,
    DateRanges,
    YearSpan,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub years: f64,
    pub strategy: Strategy,
}

pub fn estimate_years(resume_text: &str) -> f64 {
    estimate_years_at(resume_text, Local::now().date_naive()).years
}

// explicit statement, then merged date ranges, then year span; first hit wins
pub fn estimate_years_at(resume_text: &str, today: NaiveDate) -> Estimate {
    let text = normalize(resume_text);

    if let Some(years) = explicit_years(&text) {
        let years = years.clamp(0.0, MAX_EXPERIENCE_YEARS);
        debug!(years, "experience from explicit statement");
        return Estimate {
            years,
            strategy: Strategy::Explicit,
        };
    }

    let timeline = MergedTimeline::merge(find_intervals_at(&text, today));
    if !timeline.is_empty() {
        let years = round2(timeline.total_months() as f64 / 12.0).min(MAX_EXPERIENCE_YEARS);
        debug!(years, spans = timeline.len(), "experience from date ranges");
        return Estimate {
            years,
            strategy: Strategy::DateRanges,
        };
    }

    if let Some(span) = year_span(&text, today.year()) {
        let years = (span as f64).min(MAX_EXPERIENCE_YEARS);
        debug!(years, "experience from year span");
        return Estimate {
            years,
            strategy: Strategy::YearSpan,
        };
    }

    Estimate {
        years: 0.0,
        strategy: Strategy::Nothing,
    }
}

/// Required years stated in the job description, clamped to `[0.5, 20]`,
/// or `default` untouched when the description states none.
pub fn target_years(jd_text: &str, default: f64) -> f64 {
    match explicit_years(&normalize(jd_text)) {
        Some(years) => years.clamp(MIN_TARGET_YEARS, MAX_TARGET_YEARS),
        None => default,
    }
}

// Digit strings too long for an f64 parse to infinity and clamp like any
// other oversized value.
fn explicit_years(text: &str) -> Option<f64> {
    let caps = EXPLICIT_RE.captures(text)?;
    caps[1].parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn year_span(text: &str, current_year: i32) -> Option<i32> {
    let years: Vec<i32> = DIGIT_RUN_RE
        .find_iter(text)
        .filter(|m| m.as_str().len() == 4)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .filter(|y| (EARLIEST_YEAR..=current_year).contains(y))
        .collect();

    if years.len() < 2 {
        return None;
    }
    let min = years.iter().min()?;
    let max = years.iter().max()?;
    Some(max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn years(text: &str) -> f64 {
        estimate_years_at(text, today()).years
    }

    #[test]
    fn single_range() {
        let est = estimate_years_at("Jan 2020 - Dec 2020", today());
        assert_eq!(est.strategy, Strategy::DateRanges);
        // half-open month indices: Jan..Dec is 11 months
        assert_eq!(est.years, 0.92);
    }

    #[test]
    fn overlapping_ranges_count_once() {
        let text = "Data Engineer, Jan 2020 - Jun 2021\nConsultant, Mar 2021 – Dec 2022";
        // one merged span Jan 2020 - Dec 2022 (35 months), not 17 + 21
        assert_eq!(years(text), 2.92);
    }

    #[test]
    fn back_to_back_jobs_merge() {
        assert_eq!(years("Jan 2018 - Jan 2019, Jan 2019 - Jan 2021"), 3.0);
    }

    #[test]
    fn explicit_statement_wins_over_dates() {
        let text = "6+ years of experience. Jan 2020 - Dec 2020";
        let est = estimate_years_at(text, today());
        assert_eq!(est.strategy, Strategy::Explicit);
        assert_eq!(est.years, 6.0);
        assert_eq!(years("3 yrs experience in ETL"), 3.0);
        assert_eq!(years("2.5 Years Of Experience"), 2.5);
    }

    #[test]
    fn explicit_statement_is_capped() {
        assert_eq!(years("99 years of experience"), MAX_EXPERIENCE_YEARS);
    }

    #[test]
    fn overflowing_explicit_value_still_caps() {
        let text = format!("{} years of experience. Jan 2020 - Dec 2020", "9".repeat(400));
        let est = estimate_years_at(&text, today());
        assert_eq!(est.strategy, Strategy::Explicit);
        assert_eq!(est.years, MAX_EXPERIENCE_YEARS);
        assert_eq!(target_years(&text, 3.0), MAX_TARGET_YEARS);
    }

    #[test]
    fn year_span_fallback() {
        let est = estimate_years_at("BSc 2015. Joined Acme in 2022.", today());
        assert_eq!(est.strategy, Strategy::YearSpan);
        assert_eq!(est.years, 7.0);
    }

    #[test]
    fn year_span_ignores_out_of_range_and_long_numbers() {
        // 1975 is too early, 2030 is in the future, 120225 is not a year
        assert_eq!(years("1975 2012 2030 120225 2014"), 2.0);
        assert_eq!(years("only 2019 here"), 0.0);
    }

    #[test]
    fn year_span_is_capped() {
        assert_eq!(years("1980 and 2025"), 40.0);
    }

    #[test]
    fn nothing_found_is_zero() {
        let est = estimate_years_at("Project manager, stakeholder comms", today());
        assert_eq!(est.strategy, Strategy::Nothing);
        assert_eq!(est.years, 0.0);
        assert_eq!(years(""), 0.0);
    }

    #[test]
    fn estimate_is_always_bounded() {
        let samples = [
            "",
            "Jan 1950 - Dec 2024",
            "01/1960 - present",
            "100000 years of experience",
            "0 years of experience",
            "Mar 2024 - Feb 2024",
            "ⅩⅫ 1999 – 2003 ２０１０",
            "1980 1990 2000 2010 2020",
        ];
        for text in samples {
            let y = years(text);
            assert!((0.0..=40.0).contains(&y), "{text}: {y}");
        }
    }

    #[test]
    fn target_from_job_description() {
        assert_eq!(target_years("requires 5 years of experience", 3.0), 5.0);
        assert_eq!(target_years("We value curiosity", 3.0), 3.0);
        assert_eq!(target_years("15+ yrs experience", 3.0), 15.0);
    }

    #[test]
    fn target_is_clamped_but_default_is_not() {
        assert_eq!(target_years("0 years experience", 3.0), MIN_TARGET_YEARS);
        assert_eq!(target_years("30 years of experience", 3.0), MAX_TARGET_YEARS);
        assert_eq!(target_years("", 25.0), 25.0);
        assert_eq!(target_years("", -1.0), -1.0);
    }
}
