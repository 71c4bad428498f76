//! Month-name (`Aug 2021 - Jun 2024`) and numeric (`08/2021 - 06/2024`) date
//! ranges. A match that does not resolve is dropped on its own.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::timeline::TimeInterval;

const PRESENT: &str = r"present|current|now|till\s+date|to\s+date|date";

// "till" is tried first so it is not split into the `t` separator plus "ill".
const RANGE_SEP: &str = r"(?:\s+till\s+|\s*[-to]+\s*)";

// `month` matches the month token, `join` what sits between it and the year.
// An open end straight after the separator takes no bare "date", so prose
// like "Mar 2019 - Date of issue" is not read as a range.
fn range_regex(month: &str, join: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)(?P<sm>{month}){join}(?P<sy>[0-9]{{2,4}})(?:\s*-?\s*(?P<phrase>t(?:ill|o)\s+date)\b|{RANGE_SEP}(?:(?P<open>present|current|now)\b|(?P<em>{month}){join}(?P<ey>[0-9]{{2,4}}|{PRESENT})))"
    ))
    .unwrap()
}

static NAME_RANGE_RE: Lazy<Regex> = Lazy::new(|| range_regex(r"[a-z]{3,9}", r"\s+"));

static NUM_RANGE_RE: Lazy<Regex> = Lazy::new(|| range_regex(r"[0-9]{1,2}", r"[/.\-]"));

pub fn find_intervals(text: &str) -> Vec<TimeInterval> {
    find_intervals_at(text, Local::now().date_naive())
}

pub fn find_intervals_at(text: &str, today: NaiveDate) -> Vec<TimeInterval> {
    NAME_RANGE_RE
        .captures_iter(text)
        .chain(NUM_RANGE_RE.captures_iter(text))
        .filter_map(|caps| interval_from_captures(&caps, today))
        .collect()
}

fn interval_from_captures(caps: &Captures<'_>, today: NaiveDate) -> Option<TimeInterval> {
    let start_month = parse_month(&caps["sm"])?;
    let start_year = parse_year(&caps["sy"], today)?;

    let (end_year, end_month) = if caps.name("open").or_else(|| caps.name("phrase")).is_some() {
        (today.year(), today.month())
    } else {
        let end_month = parse_month(caps.name("em")?.as_str())?;
        let end_year = parse_year(caps.name("ey")?.as_str(), today)?;
        (end_year, end_month)
    };

    let interval = TimeInterval::from_months(start_year, start_month, end_year, end_month);
    if interval.is_none() {
        trace!(range = &caps[0], "dropping empty or unresolvable date range");
    }
    interval
}

/// Full or abbreviated English month name, or a numeric month in `1..=12`.
pub fn parse_month(token: &str) -> Option<u32> {
    let token = token.trim().to_ascii_lowercase();
    let month = match token.as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        digits if (1..=2).contains(&digits.len()) && is_ascii_digits(digits) => {
            let m: u32 = digits.parse().ok()?;
            if !(1..=12).contains(&m) {
                return None;
            }
            m
        }
        _ => return None,
    };
    Some(month)
}

/// Four-digit years are taken as-is, two-digit years as `20xx`, and
/// present-tense tokens resolve to the current year.
pub fn parse_year(token: &str, today: NaiveDate) -> Option<i32> {
    let token = token.trim().to_ascii_lowercase();
    if is_present_token(&token) {
        return Some(today.year());
    }
    if !is_ascii_digits(&token) {
        return None;
    }
    match token.len() {
        4 => token.parse().ok(),
        2 => token.parse::<i32>().ok().map(|y| 2000 + y),
        _ => None,
    }
}

fn is_present_token(token: &str) -> bool {
    let collapsed = token.split_whitespace().collect::<Vec<_>>().join(" ");
    matches!(
        collapsed.as_str(),
        "present" | "current" | "now" | "date" | "till date" | "to date"
    )
}

fn is_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
